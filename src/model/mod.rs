//! The quadrilateral orchestrator.
//!
//! [`QuadrilateralShapeModel`] owns the live [`QuadrilateralShape`] and is the
//! only place positions change. Every change goes through a commit:
//!
//! 1. merge the proposed positions over the current ones and snap them
//! 2. reject non-finite, out-of-bounds, coinciding or zero-length input
//! 3. clone the shape, write the positions and run the derived pipeline
//! 4. reject a trial that crosses itself, flips orientation or leaves a
//!    vertex outside its motion region
//! 5. adopt the trial and notify every listener once
//!
//! A rejected proposal never touches the live shape.

mod batch;
mod shape;
mod validate;

use std::fmt;

use slotmap::SlotMap;
use tracing::debug;

pub use batch::Batch;
pub use shape::QuadrilateralShape;

use crate::config::{QuadrilateralConfig, ToleranceConfig};
use crate::error::{ProposalError, Result};
use crate::math::{Point2, Vector2};
use crate::shape::{
    EqualityPairs, NamedQuadrilateral, PairTransition, ParallelSideChecker, ShapeSnapshot,
    SnapshotDelta,
};
use crate::topology::{Side, SideLabel, SidePair, Vertex, VertexLabel};

slotmap::new_key_type! {
    /// Handle for a listener registered with
    /// [`QuadrilateralShapeModel::on_shape_changed`].
    pub struct ListenerKey;
}

type Listener = Box<dyn FnMut(&ShapeChangeEvent)>;

/// Fired once per committed batch, after all derived state is recomputed.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeChangeEvent {
    pub snapshot: ShapeSnapshot,
    pub previous: ShapeSnapshot,
    /// Pairs that entered or left a relation during this commit.
    pub transitions: Vec<PairTransition>,
}

impl ShapeChangeEvent {
    /// Named shape before the commit.
    #[must_use]
    pub fn previous_shape(&self) -> NamedQuadrilateral {
        self.previous.shape
    }

    /// Difference between the committed and the previous snapshot.
    #[must_use]
    pub fn delta(&self) -> SnapshotDelta {
        self.snapshot.delta(&self.previous)
    }

    /// Returns `true` when the commit changed a discrete property, or moved
    /// an angle or a length by more than its base interval.
    #[must_use]
    pub fn is_significant(&self, tolerances: &ToleranceConfig) -> bool {
        !self.delta().is_within(tolerances.angle, tolerances.length)
    }
}

/// Interactive quadrilateral: four vertices, their derived properties and
/// the listeners observing them.
pub struct QuadrilateralShapeModel {
    config: QuadrilateralConfig,
    shape: QuadrilateralShape,
    listeners: SlotMap<ListenerKey, Listener>,
}

impl fmt::Debug for QuadrilateralShapeModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuadrilateralShapeModel")
            .field("config", &self.config)
            .field("shape", &self.shape)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl QuadrilateralShapeModel {
    /// Creates a model at the configured initial positions.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if `config` does not validate.
    pub fn new(config: QuadrilateralConfig) -> Result<Self> {
        let shape = QuadrilateralShape::new(&config)?;
        debug!(shape = %shape.named_shape(), area = shape.area(), "created quadrilateral model");
        Ok(Self {
            config,
            shape,
            listeners: SlotMap::with_key(),
        })
    }

    /// Configuration the model was created with.
    #[must_use]
    pub fn config(&self) -> &QuadrilateralConfig {
        &self.config
    }

    /// The committed shape with all derived state.
    #[must_use]
    pub fn shape(&self) -> &QuadrilateralShape {
        &self.shape
    }

    /// Committed vertex record for `label`.
    #[must_use]
    pub fn vertex(&self, label: VertexLabel) -> &Vertex {
        self.shape.vertex(label)
    }

    /// Committed side record for `label`.
    #[must_use]
    pub fn side(&self, label: SideLabel) -> &Side {
        self.shape.side(label)
    }

    /// Interior angles in radians, indexed by [`VertexLabel::index`].
    #[must_use]
    pub fn angles(&self) -> [f64; 4] {
        self.shape.angles()
    }

    /// Side lengths, indexed by [`SideLabel::index`].
    #[must_use]
    pub fn lengths(&self) -> [f64; 4] {
        self.shape.lengths()
    }

    /// Enclosed area; zero for a crossed outline.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.shape.area()
    }

    /// Most specific name that fits the committed shape.
    #[must_use]
    pub fn named_shape(&self) -> NamedQuadrilateral {
        self.shape.named_shape()
    }

    /// Parallel flags indexed like [`SidePair::OPPOSITE`].
    #[must_use]
    pub fn parallel_flags(&self) -> [bool; 2] {
        self.shape.parallel_flags()
    }

    /// Parallel state of an opposite side pair; `None` for an adjacent pair.
    #[must_use]
    pub fn parallel_checker(&self, pair: SidePair) -> Option<&ParallelSideChecker> {
        self.shape.parallel_checker(pair)
    }

    /// Pairs currently equal within tolerance, per category.
    #[must_use]
    pub fn equality_pairs(&self) -> &EqualityPairs {
        self.shape.equality_pairs()
    }

    /// Polygon `label` may currently move within; empty if it cannot move.
    #[must_use]
    pub fn motion_region(&self, label: VertexLabel) -> &[Point2] {
        self.shape.vertex(label).motion_region()
    }

    /// Copy of the committed derived state.
    #[must_use]
    pub fn snapshot(&self) -> ShapeSnapshot {
        self.shape.snapshot()
    }

    /// Marks a vertex as held by the user. Takes effect on the next commit.
    pub fn set_vertex_pressed(&mut self, label: VertexLabel, pressed: bool) {
        self.shape.set_vertex_pressed(label, pressed);
    }

    /// Marks a side as held by the user. Takes effect on the next commit.
    pub fn set_side_pressed(&mut self, label: SideLabel, pressed: bool) {
        self.shape.set_side_pressed(label, pressed);
    }

    /// Number of vertices currently held.
    #[must_use]
    pub fn pressed_vertex_count(&self) -> usize {
        self.shape.interaction().pressed_vertex_count()
    }

    /// Starts a batch of position changes.
    pub fn begin_batch(&mut self) -> Batch<'_> {
        Batch::new(self)
    }

    /// Proposes new positions for one or more vertices as a single batch.
    ///
    /// A label listed twice keeps its last position.
    ///
    /// # Errors
    ///
    /// Returns the reason the batch was rejected; the model is unchanged.
    pub fn propose_positions(
        &mut self,
        positions: &[(VertexLabel, Point2)],
    ) -> std::result::Result<(), ProposalError> {
        let mut batch = self.begin_batch();
        for (label, position) in positions {
            batch.set_position(*label, *position);
        }
        batch.commit()
    }

    /// Moves both endpoints of `side` by `delta`, keeping its length and tilt.
    ///
    /// # Errors
    ///
    /// Returns the reason the move was rejected; the model is unchanged.
    pub fn propose_side_translation(
        &mut self,
        side: SideLabel,
        delta: Vector2,
    ) -> std::result::Result<(), ProposalError> {
        let mut batch = self.begin_batch();
        batch.translate_side(side, delta);
        batch.commit()
    }

    /// Proposes the four positions stored in `snapshot`.
    ///
    /// # Errors
    ///
    /// Returns the reason the positions were rejected; the model is unchanged.
    pub fn restore(&mut self, snapshot: &ShapeSnapshot) -> std::result::Result<(), ProposalError> {
        let proposed = snapshot.positions.map(Some);
        self.commit(proposed, false)
    }

    /// Returns to the configured initial positions, releasing every pressed
    /// vertex and side. Parallel tolerances fall back to their base value.
    ///
    /// # Errors
    ///
    /// Returns the reason the initial positions were rejected from the
    /// current state; the model is then unchanged.
    pub fn reset(&mut self) -> std::result::Result<(), ProposalError> {
        let proposed = self.config.initial_positions.map(Some);
        self.commit(proposed, true)
    }

    /// Registers a listener called after every committed change.
    pub fn on_shape_changed<F>(&mut self, listener: F) -> ListenerKey
    where
        F: FnMut(&ShapeChangeEvent) + 'static,
    {
        self.listeners.insert(Box::new(listener))
    }

    /// Unregisters a listener. Returns `false` if it was already removed.
    pub fn remove_listener(&mut self, key: ListenerKey) -> bool {
        self.listeners.remove(key).is_some()
    }

    fn commit(
        &mut self,
        proposed: [Option<Point2>; 4],
        reset: bool,
    ) -> std::result::Result<(), ProposalError> {
        let current = self.shape.positions();
        let positions = VertexLabel::ALL.map(|label| {
            proposed[label.index()].map_or(current[label.index()], |p| self.config.snap(p))
        });

        match self.build_trial(positions, reset) {
            Ok((trial, transitions)) => {
                let previous = self.shape.snapshot();
                self.shape = trial;
                self.shape.set_reset_in_progress(false);
                self.notify(previous, transitions);
                Ok(())
            }
            Err(reason) => {
                debug!(%reason, reset, "rejected proposal");
                Err(reason)
            }
        }
    }

    fn build_trial(
        &self,
        positions: [Point2; 4],
        reset: bool,
    ) -> std::result::Result<(QuadrilateralShape, Vec<PairTransition>), ProposalError> {
        validate::check_positions(&positions, &self.config)?;

        let mut trial = self.shape.clone();
        if reset {
            trial.release_all();
        }
        trial.set_reset_in_progress(reset);
        trial.set_positions(positions);
        let transitions = trial.recompute().map_err(|err| {
            debug!(%err, "trial recompute failed");
            ProposalError::Degenerate
        })?;

        validate::check_shape(&trial, &self.config)?;
        Ok((trial, transitions))
    }

    fn notify(&mut self, previous: ShapeSnapshot, transitions: Vec<PairTransition>) {
        let event = ShapeChangeEvent {
            snapshot: self.shape.snapshot(),
            previous,
            transitions,
        };
        debug!(
            shape = %event.snapshot.shape,
            area = event.snapshot.area,
            transitions = event.transitions.len(),
            significant = event.is_significant(&self.config.tolerances),
            "committed shape change"
        );
        for listener in self.listeners.values_mut() {
            listener(&event);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::Rc;

    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::error::{ConfigError, QuadrilateralError};
    use crate::math::polygon_2d::polygon_contains;
    use crate::shape::{PairCategory, TrackedPair};

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn model() -> QuadrilateralShapeModel {
        init_tracing();
        QuadrilateralShapeModel::new(QuadrilateralConfig::default()).unwrap()
    }

    fn recorded(model: &mut QuadrilateralShapeModel) -> Rc<RefCell<Vec<ShapeChangeEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        model.on_shape_changed(move |event| sink.borrow_mut().push(event.clone()));
        events
    }

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn initial_square() {
        let m = model();
        assert_eq!(m.named_shape(), NamedQuadrilateral::Square);
        assert_abs_diff_eq!(m.area(), 0.25, epsilon = 1e-12);
        assert_eq!(m.parallel_flags(), [true, true]);
        assert_eq!(m.equality_pairs().opposite_equal_sides().len(), 2);
        assert_eq!(m.equality_pairs().adjacent_equal_angles().len(), 4);
    }

    #[test]
    fn tiny_perturbation_keeps_square() {
        let mut m = model();
        let events = recorded(&mut m);
        m.propose_positions(&[(VertexLabel::A, p(-0.2499, 0.25))]).unwrap();
        assert_eq!(m.named_shape(), NamedQuadrilateral::Square);
        assert!(!events.borrow()[0].is_significant(&m.config().tolerances));
    }

    #[test]
    fn shape_change_is_significant() {
        let mut m = model();
        let events = recorded(&mut m);
        m.propose_positions(&[(VertexLabel::A, p(-0.3, 0.25))]).unwrap();
        let tolerances = m.config().tolerances;
        assert!(events.borrow()[0].is_significant(&tolerances));

        // Coarser intervals absorb the length change but not the new name.
        let coarse = ToleranceConfig {
            angle: 1.0,
            length: 1.0,
            ..tolerances
        };
        assert!(events.borrow()[0].delta().shape_changed);
        assert!(events.borrow()[0].is_significant(&coarse));
    }

    #[test]
    fn invalid_config_is_reported_as_config_error() {
        let config = QuadrilateralConfig::default().with_grid_step(-1.0);
        let err = QuadrilateralShapeModel::new(config).unwrap_err();
        assert!(matches!(
            err,
            QuadrilateralError::Config(ConfigError::InvalidGridStep(_))
        ));
    }

    #[test]
    fn accepted_move_notifies_once_with_transitions() {
        let mut m = model();
        let events = recorded(&mut m);

        m.propose_positions(&[(VertexLabel::C, p(0.3, -0.25))]).unwrap();

        let events = events.borrow();
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.previous_shape(), NamedQuadrilateral::Square);
        assert_eq!(event.snapshot.shape, NamedQuadrilateral::Trapezoid);
        assert_eq!(event.snapshot, m.snapshot());
        assert!(event.transitions.contains(&PairTransition {
            category: PairCategory::ParallelSides,
            pair: TrackedPair::Sides(SidePair::OPPOSITE[1]),
            gained: false,
        }));
        assert!(event.delta().parallel_changed);
    }

    #[test]
    fn rejected_batch_is_atomic() {
        let mut m = model();
        let events = recorded(&mut m);
        let before = m.snapshot();

        let result = m.propose_positions(&[
            (VertexLabel::A, p(-0.3, 0.3)),
            (VertexLabel::B, p(2.0, 0.3)),
        ]);

        assert_eq!(result, Err(ProposalError::OutOfBounds { vertex: VertexLabel::B }));
        assert_eq!(m.snapshot(), before);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn rejection_is_deterministic() {
        let mut m = model();
        let before = m.snapshot();
        let first = m.propose_positions(&[(VertexLabel::A, p(0.5, -0.5))]);
        let second = m.propose_positions(&[(VertexLabel::A, p(0.5, -0.5))]);
        assert!(first.is_err());
        assert_eq!(first, second);
        assert_eq!(m.snapshot(), before);
    }

    #[test]
    fn dart_is_reachable() {
        let mut m = model();
        m.propose_positions(&[(VertexLabel::A, p(0.1, -0.1))]).unwrap();
        assert!(m.vertex(VertexLabel::A).is_reflex());
        assert_eq!(m.named_shape(), NamedQuadrilateral::Dart);
        assert_abs_diff_eq!(m.angles().iter().sum::<f64>(), TAU, epsilon = 1e-9);
    }

    #[test]
    fn side_translation_keeps_length_and_tilt() {
        let mut m = model();
        let before = m.side(SideLabel::AB).clone();
        m.propose_side_translation(SideLabel::AB, Vector2::new(0.1, 0.2)).unwrap();
        let after = m.side(SideLabel::AB);
        assert_abs_diff_eq!(after.length(), before.length(), epsilon = 1e-12);
        assert_abs_diff_eq!(after.tilt(), before.tilt(), epsilon = 1e-12);
        assert!(m.parallel_flags()[0]);
    }

    #[test]
    fn pressed_pair_stays_parallel_until_released() {
        let mut m = model();
        m.set_side_pressed(SideLabel::CD, true);
        m.propose_positions(&[(VertexLabel::D, p(-0.25, -0.35))]).unwrap();

        let checker = m.parallel_checker(SidePair::OPPOSITE[0]).unwrap();
        assert!(checker.tolerance().is_infinite() && checker.tolerance() > 0.0);
        assert!(checker.are_sides_parallel());
        assert!(checker.distance_from_parallel() > 0.1);

        m.set_side_pressed(SideLabel::CD, false);
        let snapshot = m.snapshot();
        m.restore(&snapshot).unwrap();
        let checker = m.parallel_checker(SidePair::OPPOSITE[0]).unwrap();
        assert_abs_diff_eq!(checker.tolerance(), m.config().tolerances.angle);
        assert!(!checker.are_sides_parallel());
    }

    #[test]
    fn pressed_vertex_keeps_both_pairs_parallel() {
        let mut m = model();
        m.set_vertex_pressed(VertexLabel::B, true);
        m.propose_positions(&[(VertexLabel::B, p(0.25, 0.4))]).unwrap();

        for pair in SidePair::OPPOSITE {
            let checker = m.parallel_checker(pair).unwrap();
            assert_eq!(checker.tolerance(), f64::INFINITY);
            assert!(checker.are_sides_parallel());
        }
        assert!(m.parallel_checker(SidePair::OPPOSITE[0]).unwrap().distance_from_parallel() > 0.1);

        m.set_vertex_pressed(VertexLabel::B, false);
        let snapshot = m.snapshot();
        m.restore(&snapshot).unwrap();
        assert!(!m.parallel_flags()[0]);
        assert!(m.parallel_flags()[1]);
    }

    #[test]
    fn pressed_pair_cannot_become_parallel() {
        let mut m = model();
        m.propose_positions(&[(VertexLabel::D, p(-0.25, -0.35))]).unwrap();
        assert!(!m.parallel_flags()[0]);

        m.set_side_pressed(SideLabel::CD, true);
        m.propose_positions(&[(VertexLabel::D, p(-0.25, -0.25))]).unwrap();
        assert!(!m.parallel_flags()[0]);
    }

    #[test]
    fn reset_restores_initial_square() {
        let mut m = model();
        let events = recorded(&mut m);
        m.set_vertex_pressed(VertexLabel::B, true);
        m.set_vertex_pressed(VertexLabel::C, true);
        m.propose_positions(&[(VertexLabel::B, p(0.4, 0.3)), (VertexLabel::C, p(0.35, -0.3))])
            .unwrap();
        assert_eq!(m.pressed_vertex_count(), 2);

        m.reset().unwrap();
        assert_eq!(m.pressed_vertex_count(), 0);
        assert_eq!(m.named_shape(), NamedQuadrilateral::Square);
        assert_eq!(m.snapshot().positions, m.config().initial_positions);
        assert_eq!(events.borrow().len(), 2);
        for pair in SidePair::OPPOSITE {
            let checker = m.parallel_checker(pair).unwrap();
            assert_abs_diff_eq!(checker.tolerance(), m.config().tolerances.angle);
        }
    }

    #[test]
    fn proposals_snap_to_grid() {
        init_tracing();
        let config = QuadrilateralConfig::default().with_grid_step(0.05);
        let mut m = QuadrilateralShapeModel::new(config).unwrap();
        m.propose_positions(&[(VertexLabel::A, p(-0.31, 0.26))]).unwrap();
        let a = m.vertex(VertexLabel::A).position();
        assert_abs_diff_eq!(a.x, -0.3, epsilon = 1e-12);
        assert_abs_diff_eq!(a.y, 0.25, epsilon = 1e-12);
    }

    #[test]
    fn removed_listener_is_not_called() {
        let mut m = model();
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        let key = m.on_shape_changed(move |_| *counter.borrow_mut() += 1);

        m.propose_positions(&[(VertexLabel::A, p(-0.3, 0.25))]).unwrap();
        assert!(m.remove_listener(key));
        assert!(!m.remove_listener(key));
        m.propose_positions(&[(VertexLabel::A, p(-0.25, 0.25))]).unwrap();
        assert_eq!(*calls.borrow(), 1);
    }

    fn proposal() -> impl Strategy<Value = (usize, f64, f64)> {
        (0usize..4, -1.0f64..1.0, -0.8f64..0.8)
    }

    proptest! {
        #[test]
        fn committed_states_stay_valid(moves in prop::collection::vec(proposal(), 1..12)) {
            let mut m = model();
            for (index, x, y) in moves {
                let label = VertexLabel::ALL[index];
                let region = m.motion_region(label).to_vec();
                let before = m.snapshot();
                let target = p(x, y);
                match m.propose_positions(&[(label, target)]) {
                    Ok(()) => prop_assert!(polygon_contains(&region, &target)),
                    Err(reason) => {
                        prop_assert_eq!(m.snapshot(), before);
                        prop_assert_eq!(m.propose_positions(&[(label, target)]), Err(reason));
                    }
                }
                let sum: f64 = m.angles().iter().sum();
                prop_assert!((sum - TAU).abs() < 1e-9, "angle sum {}", sum);
                prop_assert!(m.area().is_finite() && m.area() > 0.0);
            }
        }

        #[test]
        fn restoring_a_snapshot_is_idempotent(moves in prop::collection::vec(proposal(), 1..8)) {
            let mut m = model();
            for (index, x, y) in moves {
                let _ = m.propose_positions(&[(VertexLabel::ALL[index], p(x, y))]);
            }
            let snapshot = m.snapshot();
            prop_assert_eq!(m.restore(&snapshot), Ok(()));
            prop_assert_eq!(m.snapshot(), snapshot);
        }
    }
}
