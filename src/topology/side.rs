use super::{SideLabel, Vertex, VertexLabel};

/// A side of the quadrilateral between two consecutive vertices.
///
/// Sides hold only labels of their endpoints; the vertices themselves live in
/// the owning shape's vertex array.
#[derive(Debug, Clone, PartialEq)]
pub struct Side {
    label: SideLabel,
    length: f64,
    tilt: f64,
    pressed: bool,
}

impl Side {
    /// Creates an unpressed side with zero length and tilt until the first
    /// recomputation.
    #[must_use]
    pub fn new(label: SideLabel) -> Self {
        Self {
            label,
            length: 0.0,
            tilt: 0.0,
            pressed: false,
        }
    }

    /// Which side this is.
    #[must_use]
    pub fn label(&self) -> SideLabel {
        self.label
    }

    /// Endpoint labels `[start, end]`.
    #[must_use]
    pub fn vertices(&self) -> [VertexLabel; 2] {
        self.label.vertices()
    }

    /// Euclidean distance between the endpoints.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Direction of `start → end` against the +x axis, in `(-π, π]`.
    #[must_use]
    pub fn tilt(&self) -> f64 {
        self.tilt
    }

    /// Whether the user is currently holding this side.
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub(crate) fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }

    /// Recomputes length and tilt from the current endpoint positions.
    pub(crate) fn update(&mut self, vertices: &[Vertex; 4]) {
        let [start, end] = self.vertices();
        let d = vertices[end.index()].position() - vertices[start.index()].position();
        self.length = d.norm();
        self.tilt = d.y.atan2(d.x);
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::math::Point2;

    fn square() -> [Vertex; 4] {
        [
            Vertex::new(VertexLabel::A, Point2::new(-0.25, 0.25)),
            Vertex::new(VertexLabel::B, Point2::new(0.25, 0.25)),
            Vertex::new(VertexLabel::C, Point2::new(0.25, -0.25)),
            Vertex::new(VertexLabel::D, Point2::new(-0.25, -0.25)),
        ]
    }

    #[test]
    fn length_and_tilt_follow_endpoints() {
        let vertices = square();
        let mut ab = Side::new(SideLabel::AB);
        ab.update(&vertices);
        assert_abs_diff_eq!(ab.length(), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(ab.tilt(), 0.0, epsilon = 1e-12);

        let mut bc = Side::new(SideLabel::BC);
        bc.update(&vertices);
        assert_abs_diff_eq!(bc.tilt(), -FRAC_PI_2, epsilon = 1e-12);
    }
}
