use crate::{
    foundation::core::{Affine, Point, close_f64},
    region::model::RegionRect,
};

/// Orientation predicate: `true` when `a -> b -> c` turns counter-clockwise.
#[inline]
pub fn counter_clockwise(a: Point, b: Point, c: Point) -> bool {
    (c.y - a.y) * (b.x - a.x) > (b.y - a.y) * (c.x - a.x)
}

/// Return `true` when segment `p1-p2` properly crosses segment `p3-p4`.
///
/// Collinear and touching configurations do not count.
#[inline]
pub fn segments_cross(p1: Point, p2: Point, p3: Point, p4: Point) -> bool {
    counter_clockwise(p1, p2, p3) != counter_clockwise(p1, p2, p4)
        && counter_clockwise(p3, p4, p1) != counter_clockwise(p3, p4, p2)
}

/// The four corners of a transformed unit square.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemQuad {
    /// Image of `(0, 0)`.
    pub origin: Point,
    /// Image of `(1, 0)`.
    pub along_x: Point,
    /// Image of `(0, 1)`.
    pub along_y: Point,
    /// Image of `(1, 1)`.
    pub opposite: Point,
}

impl ItemQuad {
    /// Map the unit square through `transform`.
    pub fn from_affine(transform: Affine) -> Self {
        Self {
            origin: transform * Point::new(0.0, 0.0),
            along_x: transform * Point::new(1.0, 0.0),
            along_y: transform * Point::new(0.0, 1.0),
            opposite: transform * Point::new(1.0, 1.0),
        }
    }

    /// Image of the unit square's center.
    pub fn centroid(&self) -> Point {
        self.origin.midpoint(self.opposite)
    }

    /// Boundary edges.
    pub fn edges(&self) -> [(Point, Point); 4] {
        [
            (self.origin, self.along_x),
            (self.origin, self.along_y),
            (self.along_x, self.opposite),
            (self.along_y, self.opposite),
        ]
    }
}

/// Decide whether an item's transformed unit square overlaps `target`.
///
/// Tests run cheapest first and short-circuit on the first hit:
/// 1. the target's far corner is pulled back through the inverse transform and checked against
///    `[0,1]²` (skipped when the transform does not round-trip),
/// 2. the quad's corners and centroid are checked for strict containment in the target,
/// 3. the target's edges are checked against the quad's edges for proper crossings.
pub fn item_intersects_box(transform: Affine, target: RegionRect) -> bool {
    let bounds = target.to_rect().abs();

    if far_corner_inside_item(transform, target.far_corner()) {
        return true;
    }

    let quad = ItemQuad::from_affine(transform);
    let strictly_inside =
        |p: Point| p.x > bounds.x0 && p.x < bounds.x1 && p.y > bounds.y0 && p.y < bounds.y1;
    if [
        quad.origin,
        quad.along_x,
        quad.along_y,
        quad.opposite,
        quad.centroid(),
    ]
    .into_iter()
    .any(strictly_inside)
    {
        return true;
    }

    let (x1, y1, x2, y2) = (bounds.x0, bounds.y0, bounds.x1, bounds.y1);
    let box_edges = [
        (Point::new(x1, y1), Point::new(x1, y2)),
        (Point::new(x1, y1), Point::new(x2, y1)),
        (Point::new(x2, y1), Point::new(x2, y2)),
        (Point::new(x1, y2), Point::new(x2, y2)),
    ];
    quad.edges().into_iter().any(|(q1, q2)| {
        box_edges
            .iter()
            .any(|&(b1, b2)| segments_cross(b1, b2, q1, q2))
    })
}

fn far_corner_inside_item(transform: Affine, corner: Point) -> bool {
    let det = transform.determinant();
    if det == 0.0 || !det.is_finite() {
        return false;
    }
    let local = transform.inverse() * corner;
    let back = transform * local;
    close_f64(back.x, corner.x)
        && close_f64(back.y, corner.y)
        && (0.0..=1.0).contains(&local.x)
        && (0.0..=1.0).contains(&local.y)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/occlusion.rs"]
mod tests;
