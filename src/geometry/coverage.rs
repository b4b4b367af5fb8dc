use crate::foundation::core::{Point, Rect, Vec2};

/// Axis-aligned bounding box of an item rotated about its origin.
///
/// `size` may be negative on either axis (flipped item); the result always has a positive size.
pub fn rotated_bounds(pos: Point, size: Vec2, rotation_deg: f64) -> Rect {
    if rotation_deg == 0.0 {
        return Rect::from_origin_size(pos, size.to_size()).abs();
    }

    let (sin, cos) = rotation_deg.to_radians().sin_cos();
    let (sin_abs, cos_abs) = (sin.abs(), cos.abs());

    // Extents use magnitudes; the signed size still places the center.
    let bb_w = size.x.abs() * cos_abs + size.y.abs() * sin_abs;
    let bb_h = size.x.abs() * sin_abs + size.y.abs() * cos_abs;

    let center = Point::new(
        pos.x + size.x / 2.0 * cos - size.y / 2.0 * sin,
        pos.y + size.x / 2.0 * sin + size.y / 2.0 * cos,
    );

    Rect::from_center_size(center, (bb_w, bb_h))
}

/// Percentage (0..=100) of `canvas` covered by `bounds`.
pub fn canvas_coverage_pct(bounds: Rect, canvas: Rect) -> f64 {
    let canvas = canvas.abs();
    let canvas_area = canvas.area();
    if canvas_area <= 0.0 {
        return 0.0;
    }
    let overlap = bounds.abs().intersect(canvas);
    (overlap.area() / canvas_area * 100.0).clamp(0.0, 100.0)
}

/// Return `true` when `bounds` covers at least `threshold_pct` percent of `canvas`.
///
/// Such items are treated as full-screen background captures.
pub fn covers_canvas(bounds: Rect, canvas: Rect, threshold_pct: f64) -> bool {
    canvas_coverage_pct(bounds, canvas) >= threshold_pct
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/coverage.rs"]
mod tests;
