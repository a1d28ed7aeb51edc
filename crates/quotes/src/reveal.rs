//! Load-more activation: the one-shot transition from collapsed to
//! revealed. There is no way back once a region has been revealed.

use crate::markup::{COLLAPSED_CLASS, is_load_more, is_normalized_quote};
use dom::{Id, Node, find_parent_of_mut};

/// Activate the marker addressed by `marker` somewhere under `region`:
/// every normalized quote under the marker's parent loses its collapsed
/// state and every marker there is deleted. Returns false (and leaves the
/// tree alone) when the id is unknown or not a marker.
pub fn reveal_collapsed(region: &mut Node, marker: Id) -> bool {
    let Some(parent) = find_parent_of_mut(region, marker) else {
        return false;
    };
    let is_marker = parent
        .children()
        .is_some_and(|children| children.iter().any(|c| c.id() == marker && is_load_more(c)));
    if !is_marker {
        return false;
    }
    uncollapse(parent);
    remove_markers(parent);
    true
}

fn uncollapse(node: &mut Node) {
    if is_normalized_quote(node) {
        node.remove_class(COLLAPSED_CLASS);
    }
    if let Some(children) = node.children_mut() {
        for child in children {
            uncollapse(child);
        }
    }
}

fn remove_markers(node: &mut Node) {
    if let Some(children) = node.children_mut() {
        children.retain(|child| !is_load_more(child));
        for child in children.iter_mut() {
            remove_markers(child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::reveal_collapsed;
    use crate::markup::{COLLAPSED_CLASS, is_load_more};
    use dom::snapshot::{DomSnapshot, DomSnapshotOptions};
    use dom::{Id, Node};
    use std::sync::Arc;

    fn elem(id: u32, name: &str, class: Option<&str>, children: Vec<Node>) -> Node {
        let attributes = match class {
            Some(c) => vec![(Arc::from("class"), Some(c.to_string()))],
            None => Vec::new(),
        };
        Node::Element {
            id: Id(id),
            name: Arc::from(name),
            attributes,
            style: Vec::new(),
            children,
        }
    }

    fn text(id: u32, t: &str) -> Node {
        Node::Text {
            id: Id(id),
            text: t.to_string(),
        }
    }

    fn marker(id: u32) -> Node {
        elem(
            id,
            "div",
            Some("quoteloadmore"),
            vec![elem(id + 1, "i", Some("fa-solid fa-chevrons-down"), Vec::new())],
        )
    }

    fn collapsed_quote(id: u32) -> Node {
        elem(id, "div", Some("realquote collapsed"), Vec::new())
    }

    fn region() -> Node {
        elem(
            1,
            "div",
            None,
            vec![
                text(2, "intro"),
                marker(3),
                collapsed_quote(5),
                elem(6, "div", None, vec![collapsed_quote(7)]),
            ],
        )
    }

    fn count_collapsed(node: &Node) -> usize {
        let own = usize::from(node.has_class(COLLAPSED_CLASS));
        own + node
            .children()
            .map(|children| children.iter().map(count_collapsed).sum())
            .unwrap_or(0)
    }

    fn count_markers(node: &Node) -> usize {
        let own = usize::from(is_load_more(node));
        own + node
            .children()
            .map(|children| children.iter().map(count_markers).sum())
            .unwrap_or(0)
    }

    #[test]
    fn activation_reveals_every_quote_in_the_region() {
        let mut tree = region();
        assert!(reveal_collapsed(&mut tree, Id(3)));
        assert_eq!(count_collapsed(&tree), 0);
        assert_eq!(count_markers(&tree), 0);
        // revealed quotes keep their identity class
        assert!(tree.children().unwrap()[1].has_class("realquote"));
    }

    #[test]
    fn activation_is_one_shot() {
        let mut tree = region();
        assert!(reveal_collapsed(&mut tree, Id(3)));
        assert!(!reveal_collapsed(&mut tree, Id(3)));
    }

    #[test]
    fn non_marker_ids_leave_the_tree_alone() {
        let mut tree = region();
        let before = DomSnapshot::new(&tree, DomSnapshotOptions::default()).render();
        assert!(!reveal_collapsed(&mut tree, Id(2)));
        assert!(!reveal_collapsed(&mut tree, Id(99)));
        let after = DomSnapshot::new(&tree, DomSnapshotOptions::default()).render();
        assert_eq!(before, after);
    }

    #[test]
    fn activation_only_touches_the_marker_scope() {
        let mut tree = elem(
            1,
            "div",
            None,
            vec![
                elem(10, "div", None, vec![marker(11), collapsed_quote(13)]),
                elem(20, "div", None, vec![marker(21), collapsed_quote(23)]),
            ],
        );
        assert!(reveal_collapsed(&mut tree, Id(11)));
        let kids = tree.children().unwrap();
        assert_eq!(count_collapsed(&kids[0]), 0);
        assert_eq!(count_markers(&kids[0]), 0);
        assert_eq!(count_collapsed(&kids[1]), 1);
        assert_eq!(count_markers(&kids[1]), 1);
    }
}
