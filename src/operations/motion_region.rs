use std::f64::consts::PI;

use crate::math::intersect_2d::{ray_passes_through, ray_segment_intersect_2d};
use crate::math::polygon_2d::Winding;
use crate::math::{Bounds2, Point2, Vector2, TOLERANCE};
use crate::topology::VertexLabel;

/// Perpendicular distance within which a ray counts as passing through a
/// corner of the bounds.
const CORNER_EPS: f64 = 1e-9;

/// Where a ray leaves the world bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryHit {
    pub point: Point2,
    /// Arc length along the clockwise perimeter, starting at the top-left
    /// corner.
    pub parameter: f64,
}

/// Computes the polygon one vertex may move within while the other three
/// stay put, without leaving the bounds or making the outline cross itself.
///
/// With `V` the moving vertex, `P`/`N` its neighbors and `O` the opposite
/// vertex (for a clockwise cycle `P → V → N`):
///
/// - `O` reflex: `V` stays in the wedge beyond `O` bounded by the rays
///   `N → O` and `P → O`, giving `[O, hit(N→O), corners…, hit(P→O)]`.
/// - otherwise: `V` stays on its side of the diagonal `P N`, or inside the
///   triangle `P N O` (which makes `V` reflex), giving
///   `[P, hit(N→P), corners…, hit(P→N), N, O]`.
///
/// Corners are collected walking the bounds clockwise between the two hits.
/// Returns an empty region when any position is outside the bounds or two
/// positions coincide.
#[derive(Debug, Clone)]
pub struct VertexMotionRegion {
    vertex: VertexLabel,
    positions: [Point2; 4],
    opposite_angle: f64,
    bounds: Bounds2,
    winding: Winding,
}

impl VertexMotionRegion {
    /// Creates a new region query for `vertex`.
    ///
    /// `angles` are the interior angles of the current shape, indexed by label.
    #[must_use]
    pub fn new(vertex: VertexLabel, positions: [Point2; 4], angles: [f64; 4], bounds: Bounds2) -> Self {
        Self {
            vertex,
            positions,
            opposite_angle: angles[vertex.opposite().index()],
            bounds,
            winding: Winding::Clockwise,
        }
    }

    /// Sets the winding of the vertex cycle; clockwise by default.
    #[must_use]
    pub fn with_winding(mut self, winding: Winding) -> Self {
        self.winding = winding;
        self
    }

    /// Executes the query, returning the region as a simple polygon.
    #[must_use]
    pub fn execute(&self) -> Vec<Point2> {
        if !self.inputs_are_valid() {
            return Vec::new();
        }

        let (first, second) = match self.winding {
            Winding::Clockwise => (self.vertex.previous(), self.vertex.next()),
            Winding::CounterClockwise => (self.vertex.next(), self.vertex.previous()),
        };
        let first = self.positions[first.index()];
        let second = self.positions[second.index()];
        let opposite = self.positions[self.vertex.opposite().index()];

        let region = if self.opposite_angle > PI {
            let (Some(h1), Some(h2)) = (
                self.boundary_hit(&opposite, &(opposite - second)),
                self.boundary_hit(&opposite, &(opposite - first)),
            ) else {
                return Vec::new();
            };
            let mut region = vec![opposite, h1.point];
            region.extend(self.corners_between(h1.parameter, h2.parameter));
            region.push(h2.point);
            region
        } else {
            let (Some(h1), Some(h2)) = (
                self.boundary_hit(&first, &(first - second)),
                self.boundary_hit(&second, &(second - first)),
            ) else {
                return Vec::new();
            };
            let mut region = vec![first, h1.point];
            region.extend(self.corners_between(h1.parameter, h2.parameter));
            region.extend([h2.point, second, opposite]);
            region
        };

        dedup_closed(region)
    }

    fn inputs_are_valid(&self) -> bool {
        if !self.positions.iter().all(|p| self.bounds.contains(p)) {
            return false;
        }
        for i in 0..4 {
            for j in (i + 1)..4 {
                if (self.positions[i] - self.positions[j]).norm() < TOLERANCE {
                    return false;
                }
            }
        }
        true
    }

    /// Intersects the ray `origin + t * dir` with the four boundary edges,
    /// keeping the farthest hit. A ray through a corner is matched against
    /// the corner explicitly, since the edge tests are unreliable there.
    fn boundary_hit(&self, origin: &Point2, dir: &Vector2) -> Option<BoundaryHit> {
        if dir.norm() < TOLERANCE {
            return None;
        }

        let mut best: Option<(f64, BoundaryHit)> = None;
        let mut edge_start = 0.0;
        for (s0, s1) in self.bounds.edges_clockwise() {
            let edge_len = (s1 - s0).norm();
            if let Some((point, t, u)) = ray_segment_intersect_2d(origin, dir, &s0, &s1) {
                if best.is_none_or(|(best_t, _)| t > best_t) {
                    let parameter = edge_start + u * edge_len;
                    best = Some((t, BoundaryHit { point, parameter }));
                }
            }
            edge_start += edge_len;
        }

        for (i, corner) in self.bounds.corners_clockwise().into_iter().enumerate() {
            let Some(t) = ray_passes_through(origin, dir, &corner, CORNER_EPS) else {
                continue;
            };
            if best.is_none_or(|(best_t, _)| t >= best_t - CORNER_EPS) {
                let hit = BoundaryHit {
                    point: corner,
                    parameter: self.bounds.corner_parameter(i),
                };
                best = Some((t, hit));
            }
        }

        best.map(|(_, hit)| BoundaryHit {
            parameter: hit.parameter.rem_euclid(self.bounds.perimeter()),
            ..hit
        })
    }

    /// Bounds corners strictly between two perimeter parameters, walking
    /// clockwise from `from` to `to`.
    fn corners_between(&self, from: f64, to: f64) -> Vec<Point2> {
        let perimeter = self.bounds.perimeter();
        let span = (to - from).rem_euclid(perimeter);

        let mut corners: Vec<(f64, Point2)> = self
            .bounds
            .corners_clockwise()
            .into_iter()
            .enumerate()
            .filter_map(|(i, corner)| {
                let offset = (self.bounds.corner_parameter(i) - from).rem_euclid(perimeter);
                (offset > TOLERANCE && offset < span - TOLERANCE).then_some((offset, corner))
            })
            .collect();
        corners.sort_by(|a, b| a.0.total_cmp(&b.0));
        corners.into_iter().map(|(_, corner)| corner).collect()
    }
}

/// Drops consecutive duplicate points, including a duplicate closing point.
fn dedup_closed(mut points: Vec<Point2>) -> Vec<Point2> {
    points.dedup_by(|a, b| (*a - *b).norm() < TOLERANCE);
    while points.len() > 1 && (points[0] - points[points.len() - 1]).norm() < TOLERANCE {
        points.pop();
    }
    points
}
