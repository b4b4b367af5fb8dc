use crate::foundation::error::{HudError, HudResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Tolerance used for every geometric equality check.
pub const GEOM_EPSILON: f64 = 0.01;

/// Compare two scalars with [`GEOM_EPSILON`] tolerance.
#[inline]
pub fn close_f64(a: f64, b: f64) -> bool {
    (a - b).abs() <= GEOM_EPSILON
}

/// Host canvas dimensions sampled once per render pass.
///
/// Regions are aligned against the base (canvas) size; the output size only takes part in change
/// detection because a rescaled output invalidates what the host shows for the same canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct VideoInfo {
    /// Canvas width in pixels.
    pub base_width: u32,
    /// Canvas height in pixels.
    pub base_height: u32,
    /// Scaled output width in pixels.
    pub output_width: u32,
    /// Scaled output height in pixels.
    pub output_height: u32,
}

impl VideoInfo {
    /// Build info where output size equals the canvas size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            base_width: width,
            base_height: height,
            output_width: width,
            output_height: height,
        }
    }

    /// Parse `"<W>x<H>"` into a [`VideoInfo`] with matching output size.
    pub fn parse_size(s: &str) -> HudResult<Self> {
        let (w, h) = s
            .split_once('x')
            .ok_or_else(|| HudError::validation(format!("canvas size '{s}' must be WxH")))?;
        let w: u32 = w
            .trim()
            .parse()
            .map_err(|e| HudError::validation(format!("canvas width in '{s}': {e}")))?;
        let h: u32 = h
            .trim()
            .parse()
            .map_err(|e| HudError::validation(format!("canvas height in '{s}': {e}")))?;
        if w == 0 || h == 0 {
            return Err(HudError::validation(format!(
                "canvas size '{s}' must be non-zero"
            )));
        }
        Ok(Self::new(w, h))
    }

    /// Canvas size as floating-point vector.
    pub fn base_size(self) -> Vec2 {
        Vec2::new(f64::from(self.base_width), f64::from(self.base_height))
    }

    /// Canvas bounds anchored at the origin.
    pub fn base_rect(self) -> Rect {
        Rect::from_origin_size(Point::ORIGIN, self.base_size().to_size())
    }

    /// Return `true` when any of the four tracked dimensions differs.
    pub fn differs(self, other: VideoInfo) -> bool {
        self != other
    }
}
