//! Fixed topology of the quadrilateral: four vertex labels connected in the
//! cycle A → B → C → D → A, and the four sides between them.
//!
//! The relations are closed enums with `const` tables, so every neighbor,
//! opposite and endpoint lookup is a plain array index.

pub mod pairs;
pub mod side;
pub mod vertex;

use std::fmt;

pub use pairs::{SidePair, VertexPair};
pub use side::Side;
pub use vertex::{interior_angle, Vertex};

/// One of the four fixed vertex positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VertexLabel {
    A,
    B,
    C,
    D,
}

impl VertexLabel {
    /// All labels in cycle order.
    pub const ALL: [Self; 4] = [Self::A, Self::B, Self::C, Self::D];

    /// Stable index into per-vertex arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The vertex following this one in the cycle.
    #[must_use]
    pub const fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % 4]
    }

    /// The vertex preceding this one in the cycle.
    #[must_use]
    pub const fn previous(self) -> Self {
        Self::ALL[(self.index() + 3) % 4]
    }

    /// The vertex across the diagonal.
    #[must_use]
    pub const fn opposite(self) -> Self {
        Self::ALL[(self.index() + 2) % 4]
    }

    /// Both adjacent vertices, `[previous, next]`.
    #[must_use]
    pub const fn adjacent(self) -> [Self; 2] {
        [self.previous(), self.next()]
    }

    /// The two sides meeting at this vertex, `[incoming, outgoing]`.
    #[must_use]
    pub const fn sides(self) -> [SideLabel; 2] {
        [SideLabel::ALL[(self.index() + 3) % 4], SideLabel::ALL[self.index()]]
    }
}

impl fmt::Display for VertexLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        };
        f.write_str(name)
    }
}

/// One of the four sides, named by its endpoints in cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SideLabel {
    AB,
    BC,
    CD,
    DA,
}

impl SideLabel {
    /// All labels in cycle order; side `i` starts at vertex `i`.
    pub const ALL: [Self; 4] = [Self::AB, Self::BC, Self::CD, Self::DA];

    /// Stable index into per-side arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Endpoints `[start, end]` in cycle order.
    #[must_use]
    pub const fn vertices(self) -> [VertexLabel; 2] {
        [
            VertexLabel::ALL[self.index()],
            VertexLabel::ALL[(self.index() + 1) % 4],
        ]
    }

    /// The side that shares no vertex with this one.
    #[must_use]
    pub const fn opposite(self) -> Self {
        Self::ALL[(self.index() + 2) % 4]
    }

    /// Both sides sharing a vertex with this one, `[previous, next]`.
    #[must_use]
    pub const fn adjacent(self) -> [Self; 2] {
        [Self::ALL[(self.index() + 3) % 4], Self::ALL[(self.index() + 1) % 4]]
    }

    /// Returns `true` if `vertex` is one of this side's endpoints.
    #[must_use]
    pub fn contains(self, vertex: VertexLabel) -> bool {
        self.vertices().contains(&vertex)
    }
}

impl fmt::Display for SideLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b] = self.vertices();
        write!(f, "{a}{b}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_cycle_relations() {
        assert_eq!(VertexLabel::A.next(), VertexLabel::B);
        assert_eq!(VertexLabel::A.previous(), VertexLabel::D);
        assert_eq!(VertexLabel::A.opposite(), VertexLabel::C);
        assert_eq!(VertexLabel::D.next(), VertexLabel::A);
        assert_eq!(VertexLabel::B.adjacent(), [VertexLabel::A, VertexLabel::C]);
    }

    #[test]
    fn vertex_sides_share_the_vertex() {
        for v in VertexLabel::ALL {
            for s in v.sides() {
                assert!(s.contains(v), "{s} should contain {v}");
            }
        }
        assert_eq!(VertexLabel::A.sides(), [SideLabel::DA, SideLabel::AB]);
    }

    #[test]
    fn side_relations() {
        assert_eq!(SideLabel::AB.opposite(), SideLabel::CD);
        assert_eq!(SideLabel::DA.vertices(), [VertexLabel::D, VertexLabel::A]);
        assert_eq!(SideLabel::BC.adjacent(), [SideLabel::AB, SideLabel::CD]);
        assert_eq!(SideLabel::DA.to_string(), "DA");
    }
}
