use std::f64::consts::PI;

use crate::config::ToleranceConfig;
use crate::topology::{SideLabel, SidePair, Vertex, VertexLabel};

/// Which vertices and sides the user is currently holding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractionContext {
    /// Indexed by [`VertexLabel::index`].
    pub pressed_vertices: [bool; 4],
    /// Indexed by [`SideLabel::index`].
    pub pressed_sides: [bool; 4],
    /// Set while the model is being reset to its initial positions.
    pub reset_in_progress: bool,
}

impl InteractionContext {
    /// Number of held vertices.
    #[must_use]
    pub fn pressed_vertex_count(&self) -> usize {
        self.pressed_vertices.iter().filter(|p| **p).count()
    }

    /// Whether vertex `label` is held.
    #[must_use]
    pub fn is_vertex_pressed(&self, label: VertexLabel) -> bool {
        self.pressed_vertices[label.index()]
    }

    /// Whether side `label` is held.
    #[must_use]
    pub fn is_side_pressed(&self, label: SideLabel) -> bool {
        self.pressed_sides[label.index()]
    }

    /// A pair is being moved when one of its sides or one of their endpoints
    /// is held.
    ///
    /// Every vertex ends a side of both opposite pairs, so any held vertex
    /// moves both pairs; a held side moves only its own pair.
    #[must_use]
    pub fn is_pair_moving(&self, pair: SidePair) -> bool {
        [pair.first, pair.second].into_iter().any(|side| {
            self.is_side_pressed(side)
                || side.vertices().into_iter().any(|v| self.is_vertex_pressed(v))
        })
    }
}

/// Parallel detection for one pair of opposite sides.
///
/// The pair is parallel when the two interior angles along the side joining
/// them sum to π, within a tolerance interval that depends on how the user is
/// interacting with the shape. The interval is re-selected before every
/// evaluation, so the result depends on recent interaction and not only on
/// the current geometry:
///
/// 1. own pair moving while parallel: `+∞` (cannot leave parallel)
/// 2. own pair moving while not parallel: `-∞` (cannot become parallel)
/// 3. other pair moving: base, scaled up if currently parallel
/// 4. otherwise: previous interval, unless it was one of the infinite
///    sentinels, which fall back to base
///
/// A pressed vertex always moves the own pair (see
/// [`InteractionContext::is_pair_moving`]), so the pressed-vertex-count
/// intervals never apply here; they only widen the equality comparisons
/// through [`ToleranceConfig::interactive`].
///
/// A reset in progress forces the base interval.
#[derive(Debug, Clone, PartialEq)]
pub struct ParallelSideChecker {
    pair: SidePair,
    base_tolerance: f64,
    scale_up_factor: f64,
    tolerance: f64,
    is_parallel: bool,
    distance_from_parallel: f64,
}

impl ParallelSideChecker {
    /// Creates a checker for `pair` at the base angle interval, not yet
    /// parallel.
    #[must_use]
    pub fn new(pair: SidePair, tolerances: &ToleranceConfig) -> Self {
        Self {
            pair,
            base_tolerance: tolerances.angle,
            scale_up_factor: tolerances.scale_up_factor,
            tolerance: tolerances.angle,
            is_parallel: false,
            distance_from_parallel: PI,
        }
    }

    /// The opposite side pair this checker watches.
    #[must_use]
    pub fn pair(&self) -> SidePair {
        self.pair
    }

    /// Parallel state after the last update.
    #[must_use]
    pub fn are_sides_parallel(&self) -> bool {
        self.is_parallel
    }

    /// The interval selected on the last update.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// `|θ₁ + θ₂ - π|` for the two angles along the joining side; 0 when
    /// exactly parallel.
    #[must_use]
    pub fn distance_from_parallel(&self) -> f64 {
        self.distance_from_parallel
    }

    /// Picks the tolerance interval for the next evaluation.
    #[must_use]
    pub fn select_tolerance(&self, ctx: &InteractionContext) -> f64 {
        if ctx.reset_in_progress {
            return self.base_tolerance;
        }

        let own_moving = ctx.is_pair_moving(self.pair);
        let other_moving = ctx.is_pair_moving(self.pair.other_opposite());

        if own_moving && self.is_parallel {
            f64::INFINITY
        } else if own_moving {
            f64::NEG_INFINITY
        } else if other_moving {
            if self.is_parallel {
                self.base_tolerance * self.scale_up_factor
            } else {
                self.base_tolerance
            }
        } else if self.tolerance.is_infinite() {
            self.base_tolerance
        } else {
            self.tolerance
        }
    }

    /// Re-selects the tolerance and re-evaluates parallelism.
    ///
    /// Returns `true` if the parallel state flipped.
    pub fn update(&mut self, ctx: &InteractionContext, vertices: &[Vertex; 4]) -> bool {
        let tolerance = self.select_tolerance(ctx);
        if tolerance.to_bits() != self.tolerance.to_bits() {
            tracing::trace!(pair = %self.pair, from = self.tolerance, to = tolerance, "parallel tolerance changed");
        }
        self.tolerance = tolerance;

        let [v1, v2] = self.pair.transversal().vertices();
        let sum = vertices[v1.index()].angle() + vertices[v2.index()].angle();
        self.distance_from_parallel = (sum - PI).abs().min(PI);

        let was_parallel = self.is_parallel;
        self.is_parallel = self.distance_from_parallel <= self.tolerance;
        was_parallel != self.is_parallel
    }
}
