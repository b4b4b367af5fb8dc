use crate::foundation::error::{HudError, HudResult};

/// Edge, corner or axis a region is pinned to when the canvas differs from the reference size.
///
/// The first nine variants pin both axes; the last six pin a single axis and leave the other one
/// in reference coordinates.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// Top-left corner.
    TopLeft,
    /// Middle of the top edge.
    TopMiddle,
    /// Top-right corner.
    TopRight,
    /// Middle of the left edge.
    MiddleLeft,
    /// Canvas center.
    Center,
    /// Middle of the right edge.
    MiddleRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Middle of the bottom edge.
    BottomMiddle,
    /// Bottom-right corner.
    BottomRight,
    /// Left edge, X axis only.
    Left,
    /// Vertical midline, X axis only.
    MiddleX,
    /// Right edge, X axis only.
    Right,
    /// Top edge, Y axis only.
    Top,
    /// Horizontal midline, Y axis only.
    MiddleY,
    /// Bottom edge, Y axis only.
    Bottom,
}

/// Axis selector for [`align_1d`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AlignAxis {
    /// Horizontal.
    X,
    /// Vertical.
    Y,
}

/// What an anchor pins along one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pin {
    /// Distance from the start edge (left / top) scales.
    Start,
    /// Distance from the end edge (right / bottom) scales.
    End,
    /// Distance from the midline scales.
    Middle,
    /// Axis is not pinned; the reference coordinate passes through.
    Free,
}

impl Anchor {
    /// Every anchor, in catalog order.
    pub const ALL: [Anchor; 15] = [
        Anchor::TopLeft,
        Anchor::TopMiddle,
        Anchor::TopRight,
        Anchor::MiddleLeft,
        Anchor::Center,
        Anchor::MiddleRight,
        Anchor::BottomLeft,
        Anchor::BottomMiddle,
        Anchor::BottomRight,
        Anchor::Left,
        Anchor::MiddleX,
        Anchor::Right,
        Anchor::Top,
        Anchor::MiddleY,
        Anchor::Bottom,
    ];

    /// Catalog name of this anchor (`"top_left"`, `"middle_x"`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Anchor::TopLeft => "top_left",
            Anchor::TopMiddle => "top_middle",
            Anchor::TopRight => "top_right",
            Anchor::MiddleLeft => "middle_left",
            Anchor::Center => "center",
            Anchor::MiddleRight => "middle_right",
            Anchor::BottomLeft => "bottom_left",
            Anchor::BottomMiddle => "bottom_middle",
            Anchor::BottomRight => "bottom_right",
            Anchor::Left => "left",
            Anchor::MiddleX => "middle_x",
            Anchor::Right => "right",
            Anchor::Top => "top",
            Anchor::MiddleY => "middle_y",
            Anchor::Bottom => "bottom",
        }
    }

    /// Parse a catalog anchor name.
    pub fn from_name(name: &str) -> HudResult<Self> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == name)
            .ok_or_else(|| HudError::catalog(format!("unknown alignment '{name}'")))
    }

    /// How this anchor pins `axis`.
    pub fn pin(self, axis: AlignAxis) -> Pin {
        use Anchor::*;
        match axis {
            AlignAxis::X => match self {
                TopLeft | MiddleLeft | BottomLeft | Left => Pin::Start,
                TopRight | MiddleRight | BottomRight | Right => Pin::End,
                TopMiddle | Center | BottomMiddle | MiddleX => Pin::Middle,
                Top | MiddleY | Bottom => Pin::Free,
            },
            AlignAxis::Y => match self {
                TopLeft | TopMiddle | TopRight | Top => Pin::Start,
                BottomLeft | BottomMiddle | BottomRight | Bottom => Pin::End,
                MiddleLeft | Center | MiddleRight | MiddleY => Pin::Middle,
                Left | MiddleX | Right => Pin::Free,
            },
        }
    }
}

impl std::fmt::Display for Anchor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Anchor {
    type Err = HudError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// Map one reference-space coordinate onto the canvas along `axis`.
///
/// `norm_offset` is a fraction of `img_size`. For middle pins the offset is applied only when it
/// moves the point closer to the midline without crossing it.
pub fn align_1d(
    anchor: Anchor,
    axis: AlignAxis,
    img_size: f64,
    ref_size: f64,
    ref_point: f64,
    scale: f64,
    norm_offset: f64,
) -> f64 {
    let scaled_offset = img_size * norm_offset;

    match anchor.pin(axis) {
        Pin::Start => ref_point * scale + scaled_offset,
        Pin::End => {
            let dist_from_edge = (ref_size - ref_point) * scale;
            img_size - dist_from_edge - scaled_offset
        }
        Pin::Middle => {
            let img_mid = img_size * 0.5;
            let ref_mid = ref_size * 0.5;
            let p = img_mid - (ref_mid - ref_point) * scale;

            let dist = (p - img_mid).abs();
            if p < img_mid
                && (p + scaled_offset - img_mid).abs() < dist
                && p + scaled_offset <= img_mid
            {
                p + scaled_offset
            } else if p > img_mid
                && (p - scaled_offset - img_mid).abs() < dist
                && p - scaled_offset >= img_mid
            {
                p - scaled_offset
            } else {
                p
            }
        }
        Pin::Free => ref_point,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/region/anchor.rs"]
mod tests;
