//! Derived shape properties: parallelism with adaptive tolerance, equal
//! pair tracking, area, named-shape classification and snapshots.

mod area;
mod classify;
mod equality;
mod parallel;
mod snapshot;

pub use area::{bretschneider_area, quadrilateral_area};
pub use classify::{NamedQuadrilateral, ShapeClassifier};
pub use equality::{EqualityPairs, PairCategory, PairTransition, TrackedPair};
pub use parallel::{InteractionContext, ParallelSideChecker};
pub use snapshot::{ShapeSnapshot, SnapshotDelta};
