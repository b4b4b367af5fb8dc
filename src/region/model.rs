use crate::{
    foundation::core::{Point, Rect, VideoInfo},
    foundation::error::{HudError, HudResult},
    region::anchor::{AlignAxis, Anchor, align_1d},
    region::box_format::{BoxFormat, convert_box},
};

/// Reference resolution a game's regions were authored against.
///
/// Ordered by `(width, height)`; used as a lookup key.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct VideoResolution {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl VideoResolution {
    /// Create a resolution.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Parse a catalog key such as `"1920x1080"`.
    ///
    /// Zero dimensions are rejected: alignment divides by them.
    pub fn parse(s: &str) -> HudResult<Self> {
        let (w, h) = s
            .split_once('x')
            .ok_or_else(|| HudError::catalog(format!("resolution '{s}' must be WxH")))?;
        let width: u32 = w
            .parse()
            .map_err(|e| HudError::catalog(format!("resolution width in '{s}': {e}")))?;
        let height: u32 = h
            .parse()
            .map_err(|e| HudError::catalog(format!("resolution height in '{s}': {e}")))?;
        if width == 0 || height == 0 {
            return Err(HudError::catalog(format!(
                "resolution '{s}' has a zero dimension"
            )));
        }
        Ok(Self { width, height })
    }

    /// Return `true` when either dimension is zero.
    pub fn is_degenerate(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl std::fmt::Display for VideoResolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Axis-aligned rectangle in origin + size form.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RegionRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub w: f64,
    /// Height.
    pub h: f64,
}

impl RegionRect {
    /// Create a rectangle.
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Convert into a `kurbo` rectangle.
    pub fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.w, self.y + self.h)
    }

    /// Top-left corner.
    pub fn origin(self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Corner opposite to [`RegionRect::origin`].
    pub fn far_corner(self) -> Point {
        Point::new(self.x + self.w, self.y + self.h)
    }
}

/// A named zone of interest in a game's reference coordinate space.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Region {
    /// Reference resolution the rectangle was authored in.
    pub base: VideoResolution,
    /// Game state this region belongs to (telemetry label).
    pub game_state: String,
    /// Region name (telemetry label, not unique).
    pub region_name: String,
    /// Anchor used when mapping onto the canvas.
    pub alignment: Anchor,
    /// Ignore the user HUD scale when set.
    pub hud_scale_locked: bool,
    /// Authored rectangle in reference space.
    pub rect: RegionRect,
    /// Canvas-space box from the last [`Region::align_box`].
    #[serde(rename = "box")]
    pub canvas_box: RegionRect,
    /// Items that hit this region during the current pass.
    pub hits: u32,
}

impl Region {
    /// Create a region with an empty canvas box.
    pub fn new(
        base: VideoResolution,
        game_state: impl Into<String>,
        region_name: impl Into<String>,
        alignment: Anchor,
        hud_scale_locked: bool,
        rect: RegionRect,
    ) -> Self {
        Self {
            base,
            game_state: game_state.into(),
            region_name: region_name.into(),
            alignment,
            hud_scale_locked,
            rect,
            canvas_box: RegionRect::default(),
            hits: 0,
        }
    }

    /// Recompute [`Region::canvas_box`] for the canvas described by `info`.
    ///
    /// The reference canvas is fit uniformly into the real one; unlocked regions additionally
    /// follow `hud_scale`. Each axis is then placed according to [`Region::alignment`].
    pub fn align_box(&mut self, info: VideoInfo, hud_scale: f64) {
        if self.base.is_degenerate() {
            tracing::warn!(
                region = %self.region_name,
                "skip align: zero-size reference resolution"
            );
            return;
        }

        let img_w = f64::from(info.base_width);
        let img_h = f64::from(info.base_height);
        let ref_w = f64::from(self.base.width);
        let ref_h = f64::from(self.base.height);

        let mut scale = (img_w / ref_w).min(img_h / ref_h);
        if !self.hud_scale_locked {
            scale *= hud_scale;
        }

        let (ref_cx, ref_cy, ref_bw, ref_bh) = convert_box(
            (self.rect.x, self.rect.y, self.rect.w, self.rect.h),
            BoxFormat::Xywh,
            BoxFormat::CxCyWh,
        );

        let w = ref_bw * scale;
        let h = ref_bh * scale;

        // Reserved for per-axis fine tuning; no catalog field sets these yet.
        let (x_offset, y_offset) = (0.0, 0.0);

        let cx = align_1d(
            self.alignment,
            AlignAxis::X,
            img_w,
            ref_w,
            ref_cx,
            scale,
            x_offset,
        );
        let cy = align_1d(
            self.alignment,
            AlignAxis::Y,
            img_h,
            ref_h,
            ref_cy,
            scale,
            y_offset,
        );

        let (x, y, w, h) = convert_box((cx, cy, w, h), BoxFormat::CxCyWh, BoxFormat::Xywh);
        self.canvas_box = RegionRect { x, y, w, h };

        tracing::trace!(
            game_state = %self.game_state,
            region = %self.region_name,
            x, y, w, h,
            "aligned region box"
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/region/model.rs"]
mod tests;
