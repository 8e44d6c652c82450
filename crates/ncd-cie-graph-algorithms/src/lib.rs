pub mod common;
pub mod pathfinding;
pub mod topology;

pub use common::{GraphView, NodeId};
pub use pathfinding::bounded_depth;
pub use topology::{order_violations, topological_sort, CycleError};
