use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;

use crate::topology::{SidePair, VertexPair};

/// The named quadrilaterals the classifier can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedQuadrilateral {
    Square,
    Rectangle,
    Rhombus,
    Parallelogram,
    IsoscelesTrapezoid,
    Trapezoid,
    Kite,
    Dart,
    ConcaveQuadrilateral,
    ConvexQuadrilateral,
    Triangle,
}

impl fmt::Display for NamedQuadrilateral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Square => "square",
            Self::Rectangle => "rectangle",
            Self::Rhombus => "rhombus",
            Self::Parallelogram => "parallelogram",
            Self::IsoscelesTrapezoid => "isosceles trapezoid",
            Self::Trapezoid => "trapezoid",
            Self::Kite => "kite",
            Self::Dart => "dart",
            Self::ConcaveQuadrilateral => "concave quadrilateral",
            Self::ConvexQuadrilateral => "convex quadrilateral",
            Self::Triangle => "triangle",
        };
        f.write_str(name)
    }
}

/// Maps angles, lengths and parallel flags to a [`NamedQuadrilateral`].
///
/// Rules are checked from the most specific shape to the least specific one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeClassifier {
    angle_tolerance: f64,
    length_tolerance: f64,
}

impl ShapeClassifier {
    /// Creates a classifier comparing angles and lengths within the given
    /// intervals.
    #[must_use]
    pub fn new(angle_tolerance: f64, length_tolerance: f64) -> Self {
        Self {
            angle_tolerance,
            length_tolerance,
        }
    }

    /// Classifies a shape.
    ///
    /// `angles` and `lengths` are indexed by vertex and side label; `parallel`
    /// by [`SidePair::OPPOSITE`].
    #[must_use]
    pub fn classify(&self, angles: [f64; 4], lengths: [f64; 4], parallel: [bool; 2]) -> NamedQuadrilateral {
        let all_right = angles.iter().all(|a| self.angles_equal(*a, FRAC_PI_2));
        let all_equal_lengths = lengths.iter().all(|l| self.lengths_equal(*l, lengths[0]));
        let parallel_count = parallel.iter().filter(|p| **p).count();

        if all_right && all_equal_lengths {
            return NamedQuadrilateral::Square;
        }
        if all_right {
            return NamedQuadrilateral::Rectangle;
        }
        if all_equal_lengths {
            return NamedQuadrilateral::Rhombus;
        }
        if parallel_count == 2 {
            return NamedQuadrilateral::Parallelogram;
        }
        if parallel_count == 1 {
            let legs = if parallel[0] {
                SidePair::OPPOSITE[1]
            } else {
                SidePair::OPPOSITE[0]
            };
            return if self.lengths_equal(lengths[legs.first.index()], lengths[legs.second.index()]) {
                NamedQuadrilateral::IsoscelesTrapezoid
            } else {
                NamedQuadrilateral::Trapezoid
            };
        }

        let concave = angles.iter().any(|a| *a > PI + self.angle_tolerance);
        if self.is_kite_like(angles, lengths) {
            return if concave {
                NamedQuadrilateral::Dart
            } else {
                NamedQuadrilateral::Kite
            };
        }
        if angles.iter().any(|a| self.angles_equal(*a, PI)) {
            return NamedQuadrilateral::Triangle;
        }
        if concave {
            NamedQuadrilateral::ConcaveQuadrilateral
        } else {
            NamedQuadrilateral::ConvexQuadrilateral
        }
    }

    /// One pair of opposite angles equal and exactly two pairs of adjacent
    /// sides equal.
    fn is_kite_like(&self, angles: [f64; 4], lengths: [f64; 4]) -> bool {
        let opposite_angles_equal = VertexPair::OPPOSITE
            .iter()
            .any(|p| self.angles_equal(angles[p.first.index()], angles[p.second.index()]));
        let equal_adjacent_sides = SidePair::ADJACENT
            .iter()
            .filter(|p| self.lengths_equal(lengths[p.first.index()], lengths[p.second.index()]))
            .count();
        opposite_angles_equal && equal_adjacent_sides == 2
    }

    fn angles_equal(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.angle_tolerance
    }

    fn lengths_equal(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.length_tolerance
    }
}
