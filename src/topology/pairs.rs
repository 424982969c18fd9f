//! Pairing registry: the fixed adjacent and opposite relations between
//! vertices and between sides that drive every pairwise comparison.

use std::fmt;

use super::{SideLabel, VertexLabel};

/// An unordered pair of vertices, stored in cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexPair {
    pub first: VertexLabel,
    pub second: VertexLabel,
}

impl VertexPair {
    /// Vertices joined by a side.
    pub const ADJACENT: [Self; 4] = [
        Self::new(VertexLabel::A, VertexLabel::B),
        Self::new(VertexLabel::B, VertexLabel::C),
        Self::new(VertexLabel::C, VertexLabel::D),
        Self::new(VertexLabel::D, VertexLabel::A),
    ];

    /// Vertices joined by a diagonal.
    pub const OPPOSITE: [Self; 2] = [
        Self::new(VertexLabel::A, VertexLabel::C),
        Self::new(VertexLabel::B, VertexLabel::D),
    ];

    /// Pairs two vertices; order is kept as given.
    #[must_use]
    pub const fn new(first: VertexLabel, second: VertexLabel) -> Self {
        Self { first, second }
    }

    /// Whether `label` is one of the two vertices.
    #[must_use]
    pub fn contains(self, label: VertexLabel) -> bool {
        self.first == label || self.second == label
    }
}

impl fmt::Display for VertexPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}

/// An unordered pair of sides, stored in cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SidePair {
    pub first: SideLabel,
    pub second: SideLabel,
}

impl SidePair {
    /// Sides sharing a vertex.
    pub const ADJACENT: [Self; 4] = [
        Self::new(SideLabel::AB, SideLabel::BC),
        Self::new(SideLabel::BC, SideLabel::CD),
        Self::new(SideLabel::CD, SideLabel::DA),
        Self::new(SideLabel::DA, SideLabel::AB),
    ];

    /// Sides sharing no vertex.
    pub const OPPOSITE: [Self; 2] = [
        Self::new(SideLabel::AB, SideLabel::CD),
        Self::new(SideLabel::BC, SideLabel::DA),
    ];

    /// Pairs two sides; order is kept as given.
    #[must_use]
    pub const fn new(first: SideLabel, second: SideLabel) -> Self {
        Self { first, second }
    }

    /// Whether `label` is one of the two sides.
    #[must_use]
    pub fn contains(self, label: SideLabel) -> bool {
        self.first == label || self.second == label
    }

    /// For an opposite pair, the side running from the end of `first` to the
    /// start of `second`. Its two interior angles sum to π exactly when the
    /// pair is parallel.
    #[must_use]
    pub const fn transversal(self) -> SideLabel {
        self.first.adjacent()[1]
    }

    /// The other opposite pair of the quadrilateral.
    #[must_use]
    pub const fn other_opposite(self) -> Self {
        match self.first {
            SideLabel::AB | SideLabel::CD => Self::OPPOSITE[1],
            SideLabel::BC | SideLabel::DA => Self::OPPOSITE[0],
        }
    }
}

impl fmt::Display for SidePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_vertex_pairs_match_labels() {
        for pair in VertexPair::OPPOSITE {
            assert_eq!(pair.first.opposite(), pair.second);
        }
        for pair in VertexPair::ADJACENT {
            assert_eq!(pair.first.next(), pair.second);
        }
    }

    #[test]
    fn transversal_joins_the_pair() {
        let [ab_cd, bc_da] = SidePair::OPPOSITE;
        assert_eq!(ab_cd.transversal(), SideLabel::BC);
        assert_eq!(bc_da.transversal(), SideLabel::CD);
        assert_eq!(ab_cd.other_opposite(), bc_da);
        assert_eq!(bc_da.other_opposite(), ab_cd);
    }

    #[test]
    fn adjacent_side_pairs_share_a_vertex() {
        for pair in SidePair::ADJACENT {
            let [_, end] = pair.first.vertices();
            assert!(pair.second.contains(end));
        }
    }
}
