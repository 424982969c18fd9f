use super::NamedQuadrilateral;
use crate::math::Point2;
use crate::topology::{SideLabel, VertexLabel};

/// Immutable copy of the derived state of a shape at one point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeSnapshot {
    pub positions: [Point2; 4],
    pub angles: [f64; 4],
    pub lengths: [f64; 4],
    pub area: f64,
    pub shape: NamedQuadrilateral,
    /// Indexed like [`crate::topology::SidePair::OPPOSITE`].
    pub parallel: [bool; 2],
}

/// How much two snapshots differ.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapshotDelta {
    pub max_angle_change: f64,
    pub max_length_change: f64,
    pub area_change: f64,
    pub shape_changed: bool,
    pub parallel_changed: bool,
}

impl SnapshotDelta {
    /// Returns `true` if nothing moved by more than the given intervals and
    /// no discrete property changed.
    #[must_use]
    pub fn is_within(&self, angle_tolerance: f64, length_tolerance: f64) -> bool {
        !self.shape_changed
            && !self.parallel_changed
            && self.max_angle_change <= angle_tolerance
            && self.max_length_change <= length_tolerance
    }
}

impl ShapeSnapshot {
    /// Position of `label` at snapshot time.
    #[must_use]
    pub fn position(&self, label: VertexLabel) -> Point2 {
        self.positions[label.index()]
    }

    /// Interior angle at `label`, in radians.
    #[must_use]
    pub fn angle(&self, label: VertexLabel) -> f64 {
        self.angles[label.index()]
    }

    /// Length of side `label`.
    #[must_use]
    pub fn length(&self, label: SideLabel) -> f64 {
        self.lengths[label.index()]
    }

    /// Compares `self` (the newer state) against `previous`.
    #[must_use]
    pub fn delta(&self, previous: &Self) -> SnapshotDelta {
        let max_abs_diff = |a: &[f64; 4], b: &[f64; 4]| {
            a.iter()
                .zip(b)
                .map(|(x, y)| (x - y).abs())
                .fold(0.0, f64::max)
        };
        SnapshotDelta {
            max_angle_change: max_abs_diff(&self.angles, &previous.angles),
            max_length_change: max_abs_diff(&self.lengths, &previous.lengths),
            area_change: self.area - previous.area,
            shape_changed: self.shape != previous.shape,
            parallel_changed: self.parallel != previous.parallel,
        }
    }
}
