pub mod collect;
#[cfg(any(test, feature = "dom-snapshot"))]
pub mod snapshot;
pub mod traverse;

mod types;

pub use crate::traverse::{
    IdGen, assign_node_ids, find_node_by_id, find_node_by_id_mut, find_parent_of_mut,
    max_assigned_id,
};
pub use crate::types::{Id, Node, NodeId};
