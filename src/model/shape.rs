use crate::config::{QuadrilateralConfig, ToleranceConfig};
use crate::error::{ConfigError, Result};
use crate::math::polygon_2d::{winding, Winding};
use crate::math::{Bounds2, Point2};
use crate::operations::VertexMotionRegion;
use crate::shape::{
    quadrilateral_area, EqualityPairs, InteractionContext, NamedQuadrilateral, PairTransition,
    ParallelSideChecker, ShapeClassifier, ShapeSnapshot,
};
use crate::topology::{interior_angle, Side, SideLabel, SidePair, Vertex, VertexLabel};

/// The four vertices and sides of a quadrilateral with all derived state.
///
/// This is the clonable part of a model: the orchestrator keeps one live
/// instance and validates every proposal on a disposable clone.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadrilateralShape {
    vertices: [Vertex; 4],
    sides: [Side; 4],
    parallel_checkers: [ParallelSideChecker; 2],
    pairs: EqualityPairs,
    area: f64,
    named: NamedQuadrilateral,
    winding: Winding,
    bounds: Bounds2,
    tolerances: ToleranceConfig,
    reset_in_progress: bool,
}

impl QuadrilateralShape {
    /// Builds the shape at the configured initial positions and runs the
    /// derived-state pipeline once.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the configuration does not validate.
    pub fn new(config: &QuadrilateralConfig) -> Result<Self> {
        config.validate()?;
        let positions = config.initial_positions;
        let winding = winding(&positions).ok_or_else(|| {
            ConfigError::InvalidInitialShape("initial positions enclose no area".to_owned())
        })?;

        let mut shape = Self {
            vertices: VertexLabel::ALL.map(|label| Vertex::new(label, positions[label.index()])),
            sides: SideLabel::ALL.map(Side::new),
            parallel_checkers: SidePair::OPPOSITE
                .map(|pair| ParallelSideChecker::new(pair, &config.tolerances)),
            pairs: EqualityPairs::default(),
            area: 0.0,
            named: NamedQuadrilateral::ConvexQuadrilateral,
            winding,
            bounds: config.bounds,
            tolerances: config.tolerances,
            reset_in_progress: false,
        };
        shape.recompute()?;
        Ok(shape)
    }

    /// Vertex record for `label`.
    #[must_use]
    pub fn vertex(&self, label: VertexLabel) -> &Vertex {
        &self.vertices[label.index()]
    }

    /// Side record for `label`.
    #[must_use]
    pub fn side(&self, label: SideLabel) -> &Side {
        &self.sides[label.index()]
    }

    /// Vertex positions, indexed by [`VertexLabel::index`].
    #[must_use]
    pub fn positions(&self) -> [Point2; 4] {
        self.vertices.each_ref().map(Vertex::position)
    }

    /// Interior angles in radians, indexed by [`VertexLabel::index`].
    #[must_use]
    pub fn angles(&self) -> [f64; 4] {
        self.vertices.each_ref().map(Vertex::angle)
    }

    /// Side lengths, indexed by [`SideLabel::index`].
    #[must_use]
    pub fn lengths(&self) -> [f64; 4] {
        self.sides.each_ref().map(Side::length)
    }

    /// Area from the last recomputation.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Classification from the last recomputation.
    #[must_use]
    pub fn named_shape(&self) -> NamedQuadrilateral {
        self.named
    }

    /// Parallel flags indexed like [`SidePair::OPPOSITE`].
    #[must_use]
    pub fn parallel_flags(&self) -> [bool; 2] {
        self.parallel_checkers
            .each_ref()
            .map(ParallelSideChecker::are_sides_parallel)
    }

    /// Checker for an opposite side pair; `None` for any other pair.
    #[must_use]
    pub fn parallel_checker(&self, pair: SidePair) -> Option<&ParallelSideChecker> {
        self.parallel_checkers.iter().find(|c| c.pair() == pair)
    }

    /// Currently equal vertex and side pairs.
    #[must_use]
    pub fn equality_pairs(&self) -> &EqualityPairs {
        &self.pairs
    }

    /// Orientation fixed at construction.
    #[must_use]
    pub fn winding(&self) -> Winding {
        self.winding
    }

    /// World rectangle the motion regions are clipped to.
    #[must_use]
    pub fn bounds(&self) -> Bounds2 {
        self.bounds
    }

    /// Current pressed state, as seen by the tolerance rules.
    #[must_use]
    pub fn interaction(&self) -> InteractionContext {
        InteractionContext {
            pressed_vertices: self.vertices.each_ref().map(Vertex::is_pressed),
            pressed_sides: self.sides.each_ref().map(Side::is_pressed),
            reset_in_progress: self.reset_in_progress,
        }
    }

    /// Copy of the derived state.
    #[must_use]
    pub fn snapshot(&self) -> ShapeSnapshot {
        ShapeSnapshot {
            positions: self.positions(),
            angles: self.angles(),
            lengths: self.lengths(),
            area: self.area,
            shape: self.named,
            parallel: self.parallel_flags(),
        }
    }

    pub(crate) fn set_positions(&mut self, positions: [Point2; 4]) {
        for (vertex, position) in self.vertices.iter_mut().zip(positions) {
            vertex.set_position(position);
        }
    }

    pub(crate) fn set_vertex_pressed(&mut self, label: VertexLabel, pressed: bool) {
        self.vertices[label.index()].set_pressed(pressed);
    }

    pub(crate) fn set_side_pressed(&mut self, label: SideLabel, pressed: bool) {
        self.sides[label.index()].set_pressed(pressed);
    }

    pub(crate) fn release_all(&mut self) {
        for vertex in &mut self.vertices {
            vertex.set_pressed(false);
        }
        for side in &mut self.sides {
            side.set_pressed(false);
        }
    }

    pub(crate) fn set_reset_in_progress(&mut self, in_progress: bool) {
        self.reset_in_progress = in_progress;
    }

    /// Recomputes every derived field in dependency order: angles, lengths,
    /// parallel pairs, equality pairs, area, named shape, motion regions.
    ///
    /// Returns the pair transitions produced by this pass.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroVector` if two neighboring vertices
    /// coincide; the shape is then left partially updated and must be
    /// discarded.
    pub(crate) fn recompute(&mut self) -> Result<Vec<PairTransition>> {
        let positions = self.positions();
        for label in VertexLabel::ALL {
            let (before, after) = match self.winding {
                Winding::Clockwise => (label.previous(), label.next()),
                Winding::CounterClockwise => (label.next(), label.previous()),
            };
            let angle = interior_angle(
                &positions[label.index()],
                &positions[before.index()],
                &positions[after.index()],
            )?;
            self.vertices[label.index()].set_angle(angle);
        }

        for side in &mut self.sides {
            side.update(&self.vertices);
        }

        let mut transitions = Vec::new();
        let ctx = self.interaction();
        for checker in &mut self.parallel_checkers {
            checker.update(&ctx, &self.vertices);
        }
        let parallel = self
            .parallel_checkers
            .each_ref()
            .map(|c| (c.pair(), c.are_sides_parallel()));
        self.pairs.update_parallel(parallel, &mut transitions);

        let (angle_tolerance, length_tolerance) =
            self.tolerances.interactive(ctx.pressed_vertex_count());
        self.pairs.update_equalities(
            &self.vertices,
            &self.sides,
            angle_tolerance,
            length_tolerance,
            &mut transitions,
        );

        let angles = self.angles();
        let lengths = self.lengths();
        self.area = quadrilateral_area(
            &positions,
            lengths,
            angles[VertexLabel::A.index()],
            angles[VertexLabel::C.index()],
        );

        self.named = ShapeClassifier::new(angle_tolerance, length_tolerance).classify(
            angles,
            lengths,
            self.parallel_flags(),
        );

        for label in VertexLabel::ALL {
            let region = VertexMotionRegion::new(label, positions, angles, self.bounds)
                .with_winding(self.winding)
                .execute();
            self.vertices[label.index()].set_motion_region(region);
        }

        Ok(transitions)
    }
}
