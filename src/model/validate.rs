//! Checks run on a proposed set of positions before it may be committed.
//!
//! The cheap checks look only at the raw positions. The shape checks need the
//! derived state of a trial shape and run after it has been recomputed.

use super::shape::QuadrilateralShape;
use crate::config::QuadrilateralConfig;
use crate::error::ProposalError;
use crate::math::distance_2d::point_to_segment_dist;
use crate::math::intersect_2d::segments_cross_properly;
use crate::math::polygon_2d::{polygon_contains, winding};
use crate::math::{Point2, TOLERANCE};
use crate::topology::{SideLabel, SidePair, VertexLabel};

/// Finite coordinates, inside the bounds, no zero-length side and no two
/// vertices closer than the configured separation.
pub(crate) fn check_positions(
    positions: &[Point2; 4],
    config: &QuadrilateralConfig,
) -> Result<(), ProposalError> {
    for vertex in VertexLabel::ALL {
        let p = positions[vertex.index()];
        if !p.x.is_finite() || !p.y.is_finite() {
            return Err(ProposalError::NonFinite { vertex });
        }
        if !config.bounds.contains(&p) {
            return Err(ProposalError::OutOfBounds { vertex });
        }
    }

    for side in SideLabel::ALL {
        let [start, end] = side.vertices();
        if (positions[end.index()] - positions[start.index()]).norm() < TOLERANCE {
            return Err(ProposalError::ZeroLengthSide { side });
        }
    }

    let separation = config.min_vertex_separation.max(TOLERANCE);
    for (i, first) in VertexLabel::ALL.into_iter().enumerate() {
        for second in VertexLabel::ALL.into_iter().skip(i + 1) {
            if (positions[first.index()] - positions[second.index()]).norm() < separation {
                return Err(ProposalError::CoincidentVertices { first, second });
            }
        }
    }
    Ok(())
}

/// Simplicity, orientation and motion-region containment of a recomputed
/// trial shape.
///
/// Each vertex must lie inside the region computed from the other three
/// trial positions. For a single moved vertex that region is the one the
/// vertex had before the move, since it depends only on the other three.
pub(crate) fn check_shape(
    trial: &QuadrilateralShape,
    config: &QuadrilateralConfig,
) -> Result<(), ProposalError> {
    let positions = trial.positions();

    for pair in SidePair::OPPOSITE {
        let [a0, a1] = pair.first.vertices().map(|v| positions[v.index()]);
        let [b0, b1] = pair.second.vertices().map(|v| positions[v.index()]);
        if segments_cross_properly(&a0, &a1, &b0, &b1) {
            return Err(ProposalError::SelfIntersecting);
        }
    }

    let clearance = config.min_vertex_separation.max(TOLERANCE);
    for vertex in VertexLabel::ALL {
        for side in SideLabel::ALL.into_iter().filter(|s| !s.contains(vertex)) {
            let [s0, s1] = side.vertices().map(|v| positions[v.index()]);
            if point_to_segment_dist(&positions[vertex.index()], &s0, &s1) < clearance {
                return Err(ProposalError::VertexOnSide { vertex, side });
            }
        }
    }

    if winding(&positions) != Some(trial.winding()) {
        return Err(ProposalError::ReversedOrientation);
    }

    for vertex in VertexLabel::ALL {
        let region = trial.vertex(vertex).motion_region();
        if !polygon_contains(region, &positions[vertex.index()]) {
            return Err(ProposalError::OutsideMotionRegion { vertex });
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn trial(config: &QuadrilateralConfig, positions: [Point2; 4]) -> QuadrilateralShape {
        let mut shape = QuadrilateralShape::new(config).unwrap();
        shape.set_positions(positions);
        shape.recompute().unwrap();
        shape
    }

    #[test]
    fn cheap_checks_name_the_offender() {
        let config = QuadrilateralConfig::default();
        let square = config.initial_positions;
        assert_eq!(check_positions(&square, &config), Ok(()));

        let mut nan = square;
        nan[1] = p(f64::NAN, 0.0);
        assert_eq!(
            check_positions(&nan, &config),
            Err(ProposalError::NonFinite { vertex: VertexLabel::B })
        );

        let mut outside = square;
        outside[2] = p(1.5, 0.0);
        assert_eq!(
            check_positions(&outside, &config),
            Err(ProposalError::OutOfBounds { vertex: VertexLabel::C })
        );

        let mut collapsed = square;
        collapsed[3] = collapsed[2];
        assert_eq!(
            check_positions(&collapsed, &config),
            Err(ProposalError::ZeroLengthSide { side: SideLabel::CD })
        );

        let mut close = square;
        close[2] = p(-0.24, 0.24);
        assert_eq!(
            check_positions(&close, &config),
            Err(ProposalError::CoincidentVertices {
                first: VertexLabel::A,
                second: VertexLabel::C,
            })
        );
    }

    #[test]
    fn crossed_outline_is_rejected() {
        let config = QuadrilateralConfig::default();
        let bow_tie = [p(-0.25, 0.25), p(0.25, -0.25), p(0.25, 0.25), p(-0.25, -0.25)];
        assert_eq!(
            check_shape(&trial(&config, bow_tie), &config),
            Err(ProposalError::SelfIntersecting)
        );
    }

    #[test]
    fn vertex_touching_side_is_rejected() {
        let config = QuadrilateralConfig::default();
        // A pushed onto side BC.
        let positions = [p(0.24, 0.0), p(0.25, 0.25), p(0.25, -0.25), p(-0.25, -0.25)];
        assert_eq!(
            check_shape(&trial(&config, positions), &config),
            Err(ProposalError::VertexOnSide {
                vertex: VertexLabel::A,
                side: SideLabel::BC,
            })
        );
    }

    #[test]
    fn reversed_orientation_is_rejected() {
        let config = QuadrilateralConfig::default();
        // A moved past C: a simple outline, but traversed the other way round.
        let positions = [p(0.75, -0.75), p(0.25, 0.25), p(0.25, -0.25), p(-0.25, -0.25)];
        assert_eq!(
            check_shape(&trial(&config, positions), &config),
            Err(ProposalError::ReversedOrientation)
        );
    }

    #[test]
    fn dart_inside_motion_region_is_accepted() {
        let config = QuadrilateralConfig::default();
        let dart = [p(0.1, -0.05), p(0.25, 0.25), p(0.25, -0.25), p(-0.25, -0.25)];
        assert_eq!(check_shape(&trial(&config, dart), &config), Ok(()));
    }
}
