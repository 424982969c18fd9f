use super::{cross_2d, Point2, Vector2, TOLERANCE};

/// Parametric 2D line-line intersection.
///
/// Given lines `p1 + t * d1` and `p2 + u * d2`, returns `(t, u)` if not parallel.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    d1: &Vector2,
    p2: &Point2,
    d2: &Vector2,
) -> Option<(f64, f64)> {
    let cross = cross_2d(d1, d2);
    if cross.abs() < TOLERANCE {
        return None;
    }
    let dp = p2 - p1;
    let t = cross_2d(&dp, d2) / cross;
    let u = cross_2d(&dp, d1) / cross;
    Some((t, u))
}

/// Intersection of the ray `origin + t * dir` (`t >= 0`) with a segment.
///
/// Returns `(point, t, u)` where `u` in `[0, 1]` is the parameter along the
/// segment. Collinear overlap is reported as no intersection.
#[must_use]
pub fn ray_segment_intersect_2d(
    origin: &Point2,
    dir: &Vector2,
    s0: &Point2,
    s1: &Point2,
) -> Option<(Point2, f64, f64)> {
    let ds = s1 - s0;
    let (t, u) = line_line_intersect_2d(origin, dir, s0, &ds)?;
    let eps = TOLERANCE;
    if t >= -eps && u >= -eps && u <= 1.0 + eps {
        let t = t.max(0.0);
        Some((point_at(origin, dir, t), t, u.clamp(0.0, 1.0)))
    } else {
        None
    }
}

/// Returns the ray parameter `t > 0` at which the ray passes through `p`,
/// or `None` if `p` is not on the ray (within `eps` perpendicular distance).
#[must_use]
pub fn ray_passes_through(origin: &Point2, dir: &Vector2, p: &Point2, eps: f64) -> Option<f64> {
    let len = dir.norm();
    if len < TOLERANCE {
        return None;
    }
    let v = p - origin;
    let perpendicular = cross_2d(dir, &v) / len;
    let along = dir.dot(&v) / (len * len);
    (perpendicular.abs() <= eps && along > 0.0).then_some(along)
}

/// Returns `true` when two segments cross at a single interior point.
///
/// Touching at endpoints and collinear overlap are not counted; callers that
/// care about touching test vertex-to-segment distances separately.
#[must_use]
pub fn segments_cross_properly(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2) -> bool {
    let d1 = orientation(b0, b1, a0);
    let d2 = orientation(b0, b1, a1);
    let d3 = orientation(a0, a1, b0);
    let d4 = orientation(a0, a1, b1);

    ((d1 > TOLERANCE && d2 < -TOLERANCE) || (d1 < -TOLERANCE && d2 > TOLERANCE))
        && ((d3 > TOLERANCE && d4 < -TOLERANCE) || (d3 < -TOLERANCE && d4 > TOLERANCE))
}

/// Signed area of the triangle `(a, b, c)` times two.
///
/// Positive when `c` lies to the left of `a → b`.
#[must_use]
pub fn orientation(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    cross_2d(&(b - a), &(c - a))
}

/// Linear interpolation: `origin + dir * t`.
#[must_use]
pub fn point_at(origin: &Point2, dir: &Vector2, t: f64) -> Point2 {
    origin + dir * t
}
