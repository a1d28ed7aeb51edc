use crate::markup::is_legacy_quote;
use dom::{Id, Node};

/// Count of legacy quotes strictly enclosing `target` on its path from
/// `root`, not counting the target itself. `None` when the id is not
/// reachable under `root`. Pure lookup; never mutates the tree.
///
/// O(n) per call on an owned tree; the driver calls it once per collected
/// quote per pass, and realistic nesting keeps both factors small.
pub fn nesting_depth(root: &Node, target: Id) -> Option<u32> {
    fn walk(node: &Node, target: Id, enclosing: u32) -> Option<u32> {
        if node.id() == target {
            return Some(enclosing);
        }
        let below = if is_legacy_quote(node) {
            enclosing + 1
        } else {
            enclosing
        };
        for child in node.children()? {
            if let Some(depth) = walk(child, target, below) {
                return Some(depth);
            }
        }
        None
    }
    walk(root, target, 0)
}
