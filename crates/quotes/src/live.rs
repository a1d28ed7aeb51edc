//! Live document host: owns the tree, the doc-wide id allocator, and the
//! event sender. The single structural edit is fragment insertion; every
//! insertion is announced on the bus for the bridge to pick up.

use bus::DocEvent;
use dom::{Id, IdGen, Node, assign_node_ids, find_node_by_id, find_node_by_id_mut};
use std::sync::mpsc::Sender;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocEditError {
    UnknownParent(Id),
    NotAContainer(Id),
}

pub struct LiveDoc {
    root: Box<Node>,
    ids: IdGen,
    evt_tx: Sender<DocEvent>,
}

impl LiveDoc {
    /// Take ownership of a parsed tree. Nodes without ids get them here.
    pub fn new(mut root: Box<Node>, evt_tx: Sender<DocEvent>) -> Self {
        let mut ids = IdGen::after(&root);
        assign_node_ids(&mut root, &mut ids);
        Self { root, ids, evt_tx }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn root_id(&self) -> Id {
        self.root.id()
    }

    pub fn contains(&self, id: Id) -> bool {
        find_node_by_id(&self.root, id).is_some()
    }

    /// Attach `fragment` as the last child of `parent` and announce it.
    pub fn append_fragment(&mut self, parent: Id, mut fragment: Node) -> Result<Id, DocEditError> {
        assign_node_ids(&mut fragment, &mut self.ids);
        let root_id = fragment.id();
        let target = find_node_by_id_mut(&mut self.root, parent)
            .ok_or(DocEditError::UnknownParent(parent))?;
        let Some(children) = target.children_mut() else {
            return Err(DocEditError::NotAContainer(parent));
        };
        children.push(fragment);
        let _ = self.evt_tx.send(DocEvent::SubtreeInserted {
            parent,
            root: root_id,
        });
        Ok(root_id)
    }

    /// Split borrow: one subtree plus the document-wide id allocator, for
    /// driver runs that create fresh nodes inside the document.
    pub fn subtree_and_ids(&mut self, id: Id) -> Option<(&mut Node, &mut IdGen)> {
        let ids = &mut self.ids;
        let root = find_node_by_id_mut(&mut self.root, id)?;
        Some((root, ids))
    }
}
