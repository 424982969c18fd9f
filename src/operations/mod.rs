mod motion_region;

pub use motion_region::{BoundaryHit, VertexMotionRegion};
