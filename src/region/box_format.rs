//! Box representation conversions.

/// Layout of a four-scalar box tuple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoxFormat {
    /// `(x1, y1, x2, y2)`: opposite corners.
    Xyxy,
    /// `(x, y, w, h)`: origin plus size.
    Xywh,
    /// `(cx, cy, w, h)`: center plus size.
    CxCyWh,
}

/// Four-scalar box in some [`BoxFormat`].
pub type BoxTuple = (f64, f64, f64, f64);

/// Convert `b` from `from` to `to`.
///
/// Pure and stateless; every pair of formats is a bijection up to float rounding.
pub fn convert_box(b: BoxTuple, from: BoxFormat, to: BoxFormat) -> BoxTuple {
    let (a1, a2, a3, a4) = b;

    // Keep the input scalars where they map 1:1 so identity conversions stay exact.
    let (x1, y1, x2, y2) = match from {
        BoxFormat::Xyxy => (a1, a2, a3, a4),
        BoxFormat::Xywh => (a1, a2, a1 + a3, a2 + a4),
        BoxFormat::CxCyWh => (
            a1 - a3 * 0.5,
            a2 - a4 * 0.5,
            a1 + a3 * 0.5,
            a2 + a4 * 0.5,
        ),
    };
    let (w, h) = match from {
        BoxFormat::Xyxy => (x2 - x1, y2 - y1),
        BoxFormat::Xywh | BoxFormat::CxCyWh => (a3, a4),
    };
    let (cx, cy) = match from {
        BoxFormat::CxCyWh => (a1, a2),
        BoxFormat::Xyxy | BoxFormat::Xywh => (x1 + w * 0.5, y1 + h * 0.5),
    };

    match to {
        BoxFormat::Xyxy => (x1, y1, x2, y2),
        BoxFormat::Xywh => (x1, y1, w, h),
        BoxFormat::CxCyWh => (cx, cy, w, h),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/region/box_format.rs"]
mod tests;
