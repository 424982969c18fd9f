use std::f64::consts::{PI, TAU};

use super::VertexLabel;
use crate::error::{GeometryError, Result};
use crate::math::{cross_2d, Point2, TOLERANCE};

/// One corner of the quadrilateral.
///
/// The position is the only independent field. The angle and motion region
/// are derived and rewritten by the owning shape on every commit.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    label: VertexLabel,
    position: Point2,
    angle: f64,
    pressed: bool,
    motion_region: Vec<Point2>,
}

impl Vertex {
    /// Creates a vertex at `position`; derived fields stay empty until the
    /// first recomputation.
    #[must_use]
    pub fn new(label: VertexLabel, position: Point2) -> Self {
        Self {
            label,
            position,
            angle: 0.0,
            pressed: false,
            motion_region: Vec::new(),
        }
    }

    /// Which corner this vertex is.
    #[must_use]
    pub fn label(&self) -> VertexLabel {
        self.label
    }

    /// Committed position.
    #[must_use]
    pub fn position(&self) -> Point2 {
        self.position
    }

    /// Interior angle in `(0, 2π)`.
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Returns `true` for a reflex (concave) corner.
    #[must_use]
    pub fn is_reflex(&self) -> bool {
        self.angle > PI
    }

    /// Whether the user is currently holding this vertex.
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// The simple polygon this vertex may move within. Empty means there is
    /// no legal destination.
    #[must_use]
    pub fn motion_region(&self) -> &[Point2] {
        &self.motion_region
    }

    pub(crate) fn set_position(&mut self, position: Point2) {
        self.position = position;
    }

    pub(crate) fn set_angle(&mut self, angle: f64) {
        self.angle = angle;
    }

    pub(crate) fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }

    pub(crate) fn set_motion_region(&mut self, region: Vec<Point2>) {
        self.motion_region = region;
    }
}

/// Interior angle at `vertex` for a clockwise cycle `previous → vertex → next`.
///
/// Uses `atan2(cross, dot)` of the vectors towards both neighbors, which keeps
/// reflex corners (> π) apart from convex ones. For a counter-clockwise cycle
/// pass the neighbors swapped.
///
/// # Errors
///
/// Returns `GeometryError::ZeroVector` if a neighbor coincides with `vertex`.
pub fn interior_angle(vertex: &Point2, previous: &Point2, next: &Point2) -> Result<f64> {
    let to_previous = previous - vertex;
    let to_next = next - vertex;
    if to_previous.norm() < TOLERANCE || to_next.norm() < TOLERANCE {
        return Err(GeometryError::ZeroVector.into());
    }

    let angle = cross_2d(&to_previous, &to_next).atan2(to_previous.dot(&to_next));
    Ok(if angle < 0.0 { angle + TAU } else { angle })
}
