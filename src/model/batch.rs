use super::QuadrilateralShapeModel;
use crate::error::ProposalError;
use crate::math::{Point2, Vector2};
use crate::topology::{SideLabel, VertexLabel};

/// A set of position changes committed together.
///
/// Holding a `Batch` borrows the model mutably, so no other proposal can be
/// started until this one is committed or dropped. Dropping a batch without
/// committing discards it.
#[must_use = "a batch has no effect until it is committed"]
pub struct Batch<'m> {
    model: &'m mut QuadrilateralShapeModel,
    proposed: [Option<Point2>; 4],
}

impl<'m> Batch<'m> {
    pub(super) fn new(model: &'m mut QuadrilateralShapeModel) -> Self {
        Self {
            model,
            proposed: [None; 4],
        }
    }

    /// Proposes a new position for `vertex`, replacing any earlier proposal
    /// for it in this batch.
    pub fn set_position(&mut self, vertex: VertexLabel, position: Point2) -> &mut Self {
        self.proposed[vertex.index()] = Some(position);
        self
    }

    /// Moves `vertex` by `delta` from its proposed position, or from its
    /// committed position if nothing was proposed yet.
    pub fn translate_vertex(&mut self, vertex: VertexLabel, delta: Vector2) -> &mut Self {
        let from = self.position(vertex);
        self.set_position(vertex, from + delta)
    }

    /// Moves both endpoints of `side` by `delta`.
    pub fn translate_side(&mut self, side: SideLabel, delta: Vector2) -> &mut Self {
        for vertex in side.vertices() {
            self.translate_vertex(vertex, delta);
        }
        self
    }

    /// The position `vertex` would have if the batch were committed now.
    #[must_use]
    pub fn position(&self, vertex: VertexLabel) -> Point2 {
        self.proposed[vertex.index()]
            .unwrap_or_else(|| self.model.shape().vertex(vertex).position())
    }

    /// Number of vertices with a proposed position.
    #[must_use]
    pub fn len(&self) -> usize {
        self.proposed.iter().flatten().count()
    }

    /// Returns `true` if no vertex has a proposed position.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Validates and applies all proposed positions at once.
    ///
    /// # Errors
    ///
    /// Returns the reason for rejection; the model is then unchanged and no
    /// listener is notified.
    pub fn commit(self) -> Result<(), ProposalError> {
        self.model.commit(self.proposed, false)
    }
}
