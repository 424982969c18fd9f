use thiserror::Error;

use crate::topology::{SideLabel, VertexLabel};

/// Top-level error type for the quadrilateral core.
///
/// Rejected proposals are reported separately as [`ProposalError`]; they are
/// an expected outcome of interaction, not a failure of the model.
#[derive(Debug, Error)]
pub enum QuadrilateralError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("zero-length vector")]
    ZeroVector,
}

/// Reasons a batch of proposed vertex positions is rejected.
///
/// A rejected proposal leaves the model untouched and fires no notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProposalError {
    #[error("vertex {vertex} has a non-finite position")]
    NonFinite { vertex: VertexLabel },

    #[error("vertex {vertex} lies outside the world bounds")]
    OutOfBounds { vertex: VertexLabel },

    #[error("vertices {first} and {second} coincide")]
    CoincidentVertices {
        first: VertexLabel,
        second: VertexLabel,
    },

    #[error("side {side} has zero length")]
    ZeroLengthSide { side: SideLabel },

    #[error("sides of the quadrilateral cross each other")]
    SelfIntersecting,

    #[error("vertex {vertex} touches side {side}")]
    VertexOnSide { vertex: VertexLabel, side: SideLabel },

    #[error("vertex {vertex} left its motion region")]
    OutsideMotionRegion { vertex: VertexLabel },

    #[error("proposed positions reverse the orientation of the vertex cycle")]
    ReversedOrientation,

    #[error("proposed shape is numerically degenerate")]
    Degenerate,
}

/// Errors raised while validating a configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("world bounds must be finite with positive width and height")]
    InvalidBounds,

    #[error("tolerance `{name}` must be finite and positive, got {value}")]
    InvalidTolerance { name: &'static str, value: f64 },

    #[error("tolerance scale-up factor must be finite and at least 1, got {0}")]
    InvalidScaleFactor(f64),

    #[error("minimum vertex separation must be finite and non-negative, got {0}")]
    InvalidSeparation(f64),

    #[error("grid step must be finite and positive, got {0}")]
    InvalidGridStep(f64),

    #[error("initial shape is invalid: {0}")]
    InvalidInitialShape(String),
}

/// Convenience type alias for results using [`QuadrilateralError`].
pub type Result<T> = std::result::Result<T, QuadrilateralError>;
