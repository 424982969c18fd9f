pub mod config;
pub mod error;
pub mod math;
pub mod model;
pub mod operations;
pub mod shape;
pub mod topology;

pub use config::{QuadrilateralConfig, ToleranceConfig};
pub use error::{ProposalError, QuadrilateralError, Result};
pub use model::{Batch, ListenerKey, QuadrilateralShapeModel, ShapeChangeEvent};
pub use shape::{NamedQuadrilateral, ShapeSnapshot};
pub use topology::{SideLabel, VertexLabel};
