use crate::{Id, Node, NodeId};

/// Monotonic id allocator for one tree. Never hands out `Id(0)`.
#[derive(Clone, Copy, Debug)]
pub struct IdGen {
    next: NodeId,
}

impl IdGen {
    pub fn new(next: NodeId) -> Self {
        Self { next: next.max(1) }
    }

    /// Allocator positioned after every id already assigned in `root`.
    pub fn after(root: &Node) -> Self {
        Self::new(max_assigned_id(root).wrapping_add(1))
    }

    pub fn alloc(&mut self) -> Id {
        let id = Id(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Assign fresh ids to every node whose id is currently unset.
pub fn assign_node_ids(root: &mut Node, ids: &mut IdGen) {
    if root.id() == Id::UNASSIGNED {
        root.set_id(ids.alloc());
    }
    if let Some(children) = root.children_mut() {
        for child in children {
            assign_node_ids(child, ids);
        }
    }
}

pub fn max_assigned_id(root: &Node) -> NodeId {
    let mut max = root.id().0;
    if let Some(children) = root.children() {
        for child in children {
            max = max.max(max_assigned_id(child));
        }
    }
    max
}

pub fn find_node_by_id(node: &Node, id: Id) -> Option<&Node> {
    if node.id() == id {
        return Some(node);
    }
    for child in node.children()? {
        if let Some(found) = find_node_by_id(child, id) {
            return Some(found);
        }
    }
    None
}

pub fn find_node_by_id_mut(node: &mut Node, id: Id) -> Option<&mut Node> {
    if node.id() == id {
        return Some(node);
    }
    for child in node.children_mut()? {
        if let Some(found) = find_node_by_id_mut(child, id) {
            return Some(found);
        }
    }
    None
}

/// The node whose child list directly contains `id`. Returns `None` when `id`
/// is the root itself or not reachable.
pub fn find_parent_of_mut(node: &mut Node, id: Id) -> Option<&mut Node> {
    let direct_child = node
        .children()
        .is_some_and(|children| children.iter().any(|c| c.id() == id));
    if direct_child {
        return Some(node);
    }
    for child in node.children_mut()? {
        if let Some(found) = find_parent_of_mut(child, id) {
            return Some(found);
        }
    }
    None
}
