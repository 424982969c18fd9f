//! Incrementally maintained sets of equal angles, equal sides and parallel
//! sides over the fixed pair universe of the pairing registry.

use std::fmt;

use crate::topology::{Side, SidePair, Vertex, VertexPair};

/// Which relation a tracked pair belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PairCategory {
    AdjacentEqualAngles,
    OppositeEqualAngles,
    AdjacentEqualSides,
    OppositeEqualSides,
    ParallelSides,
}

/// A vertex pair or side pair whose relation changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackedPair {
    Vertices(VertexPair),
    Sides(SidePair),
}

impl fmt::Display for TrackedPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vertices(p) => fmt::Display::fmt(p, f),
            Self::Sides(p) => fmt::Display::fmt(p, f),
        }
    }
}

/// A single pair entering (`gained`) or leaving a relation during a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairTransition {
    pub category: PairCategory,
    pub pair: TrackedPair,
    pub gained: bool,
}

/// Currently-equal pairs in each category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EqualityPairs {
    adjacent_equal_angles: Vec<VertexPair>,
    opposite_equal_angles: Vec<VertexPair>,
    adjacent_equal_sides: Vec<SidePair>,
    opposite_equal_sides: Vec<SidePair>,
    parallel_sides: Vec<SidePair>,
}

impl EqualityPairs {
    /// Neighboring vertices with equal angles.
    #[must_use]
    pub fn adjacent_equal_angles(&self) -> &[VertexPair] {
        &self.adjacent_equal_angles
    }

    /// Opposite vertices with equal angles.
    #[must_use]
    pub fn opposite_equal_angles(&self) -> &[VertexPair] {
        &self.opposite_equal_angles
    }

    /// Neighboring sides with equal lengths.
    #[must_use]
    pub fn adjacent_equal_sides(&self) -> &[SidePair] {
        &self.adjacent_equal_sides
    }

    /// Opposite sides with equal lengths.
    #[must_use]
    pub fn opposite_equal_sides(&self) -> &[SidePair] {
        &self.opposite_equal_sides
    }

    /// Opposite sides currently detected as parallel.
    #[must_use]
    pub fn parallel_sides(&self) -> &[SidePair] {
        &self.parallel_sides
    }

    /// Updates the parallel set from the checkers' flags.
    pub fn update_parallel(
        &mut self,
        parallel: [(SidePair, bool); 2],
        transitions: &mut Vec<PairTransition>,
    ) {
        let universe = parallel.map(|(pair, _)| pair);
        diff_update(
            &mut self.parallel_sides,
            &universe,
            |pair| parallel.iter().any(|(p, flag)| *p == pair && *flag),
            |pair, gained| {
                transitions.push(PairTransition {
                    category: PairCategory::ParallelSides,
                    pair: TrackedPair::Sides(pair),
                    gained,
                });
            },
        );
    }

    /// Updates the angle and length sets, comparing with the given intervals.
    pub fn update_equalities(
        &mut self,
        vertices: &[Vertex; 4],
        sides: &[Side; 4],
        angle_tolerance: f64,
        length_tolerance: f64,
        transitions: &mut Vec<PairTransition>,
    ) {
        let angles_equal = |pair: VertexPair| {
            (vertices[pair.first.index()].angle() - vertices[pair.second.index()].angle()).abs()
                <= angle_tolerance
        };
        let lengths_equal = |pair: SidePair| {
            (sides[pair.first.index()].length() - sides[pair.second.index()].length()).abs()
                <= length_tolerance
        };

        let mut pending = Vec::new();
        diff_update(
            &mut self.adjacent_equal_angles,
            &VertexPair::ADJACENT,
            angles_equal,
            |p, g| pending.push((PairCategory::AdjacentEqualAngles, TrackedPair::Vertices(p), g)),
        );
        diff_update(
            &mut self.opposite_equal_angles,
            &VertexPair::OPPOSITE,
            angles_equal,
            |p, g| pending.push((PairCategory::OppositeEqualAngles, TrackedPair::Vertices(p), g)),
        );
        diff_update(
            &mut self.adjacent_equal_sides,
            &SidePair::ADJACENT,
            lengths_equal,
            |p, g| pending.push((PairCategory::AdjacentEqualSides, TrackedPair::Sides(p), g)),
        );
        diff_update(
            &mut self.opposite_equal_sides,
            &SidePair::OPPOSITE,
            lengths_equal,
            |p, g| pending.push((PairCategory::OppositeEqualSides, TrackedPair::Sides(p), g)),
        );

        transitions.extend(pending.into_iter().map(|(category, pair, gained)| {
            tracing::trace!(?category, %pair, gained, "pair transition");
            PairTransition {
                category,
                pair,
                gained,
            }
        }));
    }
}

/// Adds pairs that now hold and removes pairs that no longer hold, reporting
/// each change. Members stay sorted in pair order.
fn diff_update<P: Copy + Ord>(
    set: &mut Vec<P>,
    universe: &[P],
    holds: impl Fn(P) -> bool,
    mut on_change: impl FnMut(P, bool),
) {
    for &pair in universe {
        let present = set.contains(&pair);
        let now = holds(pair);
        if present && !now {
            set.retain(|p| *p != pair);
            on_change(pair, false);
        } else if !present && now {
            set.push(pair);
            set.sort_unstable();
            on_change(pair, true);
        }
    }
}
