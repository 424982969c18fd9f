use crate::math::polygon_2d::is_simple_polygon;
use crate::math::Point2;

/// Bretschneider's formula for the area of a quadrilateral with sides
/// `[a, b, c, d]` (in cycle order AB, BC, CD, DA) and the interior angles at
/// two opposite corners.
///
/// Holds for convex and concave shapes alike. A negative radicand, which only
/// arises from rounding near degenerate shapes, yields 0 instead of NaN.
#[must_use]
pub fn bretschneider_area(lengths: [f64; 4], angle_a: f64, angle_c: f64) -> f64 {
    let [a, b, c, d] = lengths;
    let s = (a + b + c + d) / 2.0;
    let cos_half = ((angle_a + angle_c) / 2.0).cos();
    let radicand = (s - a) * (s - b) * (s - c) * (s - d) - a * b * c * d * cos_half * cos_half;

    let area = radicand.sqrt();
    if area.is_finite() {
        area
    } else {
        0.0
    }
}

/// Area of the quadrilateral through `positions`, or exactly 0 when the
/// outline crosses itself.
#[must_use]
pub fn quadrilateral_area(positions: &[Point2; 4], lengths: [f64; 4], angle_a: f64, angle_c: f64) -> f64 {
    if is_simple_polygon(positions) {
        bretschneider_area(lengths, angle_a, angle_c)
    } else {
        0.0
    }
}
