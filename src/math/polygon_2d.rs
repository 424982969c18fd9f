use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::distance_2d::point_to_segment_dist;
use super::intersect_2d::{ray_passes_through, ray_segment_intersect_2d, segments_cross_properly};
use super::{Point2, Vector2, TOLERANCE};

/// Number of ray directions tried by [`polygon_contains`] before giving up.
pub const MAX_RAY_ATTEMPTS: usize = 8;

/// Distance below which a point counts as lying on a polygon edge, and a
/// test ray counts as passing through a polygon vertex.
const CONTACT_EPS: f64 = 1e-9;

/// Orientation of a closed polygon in a y-up coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
}

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Returns the winding of a polygon, or `None` when its area vanishes.
#[must_use]
pub fn winding(points: &[Point2]) -> Option<Winding> {
    let area = signed_area_2d(points);
    if area > TOLERANCE {
        Some(Winding::CounterClockwise)
    } else if area < -TOLERANCE {
        Some(Winding::Clockwise)
    } else {
        None
    }
}

/// Returns `true` when no two non-adjacent edges of the closed polygon cross
/// and no vertex touches an edge it does not belong to.
#[must_use]
pub fn is_simple_polygon(points: &[Point2]) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    for i in 0..n {
        let a0 = &points[i];
        let a1 = &points[(i + 1) % n];
        for j in (i + 2)..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            if segments_cross_properly(a0, a1, &points[j], &points[(j + 1) % n]) {
                return false;
            }
        }
        for (k, v) in points.iter().enumerate() {
            if k == i || k == (i + 1) % n {
                continue;
            }
            if point_to_segment_dist(v, a0, a1) < CONTACT_EPS {
                return false;
            }
        }
    }
    true
}

/// Returns `true` if `p` lies on one of the polygon's edges.
#[must_use]
pub fn on_polygon_boundary(polygon: &[Point2], p: &Point2) -> bool {
    let n = polygon.len();
    (0..n).any(|i| point_to_segment_dist(p, &polygon[i], &polygon[(i + 1) % n]) < CONTACT_EPS)
}

/// Point-in-polygon test by ray casting; the boundary counts as inside.
///
/// A ray that passes through a polygon vertex makes the crossing count
/// ambiguous, so the test is repeated with a randomly rotated ray. The
/// generator is seeded from the query point, which keeps the answer
/// deterministic for identical inputs. After [`MAX_RAY_ATTEMPTS`] ambiguous
/// rays the point is reported as outside.
#[must_use]
pub fn polygon_contains(polygon: &[Point2], p: &Point2) -> bool {
    let mut rng = StdRng::seed_from_u64(point_seed(p));
    let rotated = std::iter::repeat_with(move || {
        let angle = rng.random_range(0.0..TAU);
        Vector2::new(angle.cos(), angle.sin())
    });
    polygon_contains_along(polygon, p, std::iter::once(Vector2::x()).chain(rotated))
}

/// Ray casting along the given test directions, in order.
///
/// Only the first [`MAX_RAY_ATTEMPTS`] directions are tried; if every one of
/// them passes through a vertex, or the source runs dry, the point is
/// reported as outside.
#[must_use]
pub fn polygon_contains_along<I>(polygon: &[Point2], p: &Point2, directions: I) -> bool
where
    I: IntoIterator<Item = Vector2>,
{
    if polygon.len() < 3 {
        return false;
    }
    if on_polygon_boundary(polygon, p) {
        return true;
    }

    for (attempt, dir) in directions.into_iter().take(MAX_RAY_ATTEMPTS).enumerate() {
        if let Some(crossings) = count_ray_crossings(polygon, p, &dir) {
            return crossings % 2 == 1;
        }
        tracing::debug!(attempt, x = p.x, y = p.y, "test ray hit a polygon vertex, perturbing");
    }

    tracing::warn!(x = p.x, y = p.y, "no unambiguous test ray found, treating point as outside");
    false
}

/// Counts edge crossings of the ray `p + t * dir`, or returns `None` when the
/// ray passes through a vertex.
#[must_use]
pub fn count_ray_crossings(polygon: &[Point2], p: &Point2, dir: &Vector2) -> Option<usize> {
    if polygon
        .iter()
        .any(|v| ray_passes_through(p, dir, v, CONTACT_EPS).is_some())
    {
        return None;
    }
    let n = polygon.len();
    let crossings = (0..n)
        .filter_map(|i| ray_segment_intersect_2d(p, dir, &polygon[i], &polygon[(i + 1) % n]))
        .filter(|(_, t, _)| *t > TOLERANCE)
        .count();
    Some(crossings)
}

fn point_seed(p: &Point2) -> u64 {
    p.x.to_bits() ^ p.y.to_bits().rotate_left(32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn unit_square_ccw() -> Vec<Point2> {
        vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)]
    }

    #[test]
    fn signed_area_ccw_square() {
        let area = signed_area_2d(&unit_square_ccw());
        assert!((area - 1.0).abs() < TOLERANCE);
        assert_eq!(winding(&unit_square_ccw()), Some(Winding::CounterClockwise));
    }

    #[test]
    fn signed_area_cw_square() {
        let pts = vec![p(0.0, 0.0), p(0.0, 1.0), p(1.0, 1.0), p(1.0, 0.0)];
        assert!((signed_area_2d(&pts) + 1.0).abs() < TOLERANCE);
        assert_eq!(winding(&pts), Some(Winding::Clockwise));
    }

    #[test]
    fn signed_area_degenerate() {
        assert!(signed_area_2d(&[p(0.0, 0.0)]).abs() < TOLERANCE);
        assert!(signed_area_2d(&[]).abs() < TOLERANCE);
        assert_eq!(winding(&[p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0)]), None);
    }

    #[test]
    fn bow_tie_is_not_simple() {
        let pts = vec![p(0.0, 0.0), p(1.0, 1.0), p(1.0, 0.0), p(0.0, 1.0)];
        assert!(!is_simple_polygon(&pts));
        assert!(is_simple_polygon(&unit_square_ccw()));
    }

    #[test]
    fn vertex_touching_far_edge_is_not_simple() {
        // Vertex 3 sits on edge 0 → 1.
        let pts = vec![p(0.0, 0.0), p(2.0, 0.0), p(2.0, 2.0), p(1.0, 0.0)];
        assert!(!is_simple_polygon(&pts));
    }

    #[test]
    fn contains_interior_and_boundary() {
        let sq = unit_square_ccw();
        assert!(polygon_contains(&sq, &p(0.5, 0.3)));
        assert!(polygon_contains(&sq, &p(1.0, 0.5)));
        assert!(!polygon_contains(&sq, &p(1.5, 0.5)));
        assert!(!polygon_contains(&[], &p(0.0, 0.0)));
    }

    #[test]
    fn horizontal_ray_through_vertex_is_ambiguous() {
        let diamond = vec![p(0.0, 1.0), p(1.0, 0.0), p(0.0, -1.0), p(-1.0, 0.0)];
        assert_eq!(
            count_ray_crossings(&diamond, &p(0.0, 0.0), &Vector2::new(1.0, 0.0)),
            None
        );
        // The perturbed retry still resolves the centre as inside.
        assert!(polygon_contains(&diamond, &p(0.0, 0.0)));
        assert!(!polygon_contains(&diamond, &p(-2.0, 0.0)));
    }

    #[test]
    fn retries_stop_after_attempt_budget() {
        let diamond = vec![p(0.0, 1.0), p(1.0, 0.0), p(0.0, -1.0), p(-1.0, 0.0)];
        let centre = p(0.0, 0.0);
        let through_vertices = [
            Vector2::new(1.0, 0.0),
            Vector2::new(0.0, 1.0),
            Vector2::new(-1.0, 0.0),
            Vector2::new(0.0, -1.0),
        ];

        // Every direction hits a corner: the inside point is given up on.
        assert!(!polygon_contains_along(&diamond, &centre, through_vertices.into_iter().cycle()));

        // A clean direction right after the budget is never tried.
        let late = std::iter::repeat_n(Vector2::x(), MAX_RAY_ATTEMPTS)
            .chain(std::iter::once(Vector2::new(1.0, 0.5)));
        assert!(!polygon_contains_along(&diamond, &centre, late));

        // Within the budget it resolves the point.
        let early = std::iter::repeat_n(Vector2::x(), MAX_RAY_ATTEMPTS - 1)
            .chain(std::iter::once(Vector2::new(1.0, 0.5)));
        assert!(polygon_contains_along(&diamond, &centre, early));

        assert!(!polygon_contains_along(&diamond, &centre, std::iter::empty()));
    }

    #[test]
    fn contains_is_deterministic() {
        let diamond = vec![p(0.0, 1.0), p(1.0, 0.0), p(0.0, -1.0), p(-1.0, 0.0)];
        let q = p(0.25, 0.0);
        let first = polygon_contains(&diamond, &q);
        for _ in 0..5 {
            assert_eq!(polygon_contains(&diamond, &q), first);
        }
    }
}
