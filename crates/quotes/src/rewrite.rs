//! Single-quote rewrite: one legacy `table.classicquote` becomes one
//! `div.realquote` at the same tree position.
//!
//! Invariants:
//! - The attribution and content lookups never descend into nested quote
//!   containers, so an outer quote can never bind an inner quote's fields.
//! - A precondition failure leaves the node byte-for-byte untouched.
//! - Relocated content keeps its ids; only freshly built structure draws
//!   from the caller's allocator.

use crate::markup::{
    COLLAPSED_CLASS, LOAD_MORE_CLASS, NORMALIZED_QUOTE_CLASS, QUOTE_SUFFIX_PROPERTY,
    is_attribution_span, is_content_cell, is_legacy_quote, is_normalized_quote,
};
use dom::collect::text_content_string;
use dom::{Id, IdGen, Node, find_parent_of_mut};
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RewriteSkip {
    NotAttached,
    NotALegacyQuote,
    MissingAttribution,
    MissingContent,
}

impl RewriteSkip {
    pub(crate) const fn label(self) -> &'static str {
        match self {
            Self::NotAttached => "not attached under the given root",
            Self::NotALegacyQuote => "not a legacy quote",
            Self::MissingAttribution => "no attribution sub-node",
            Self::MissingContent => "no content sub-node",
        }
    }
}

/// Rewrite the legacy quote addressed by `id` in place under `root`.
pub(crate) fn rewrite_quote(root: &mut Node, id: Id, ids: &mut IdGen) -> Result<(), RewriteSkip> {
    if root.id() == id {
        return rewrite_slot(root, ids);
    }
    let parent = find_parent_of_mut(root, id).ok_or(RewriteSkip::NotAttached)?;
    let children = parent.children_mut().ok_or(RewriteSkip::NotAttached)?;
    let slot = children
        .iter_mut()
        .find(|child| child.id() == id)
        .ok_or(RewriteSkip::NotAttached)?;
    rewrite_slot(slot, ids)
}

fn rewrite_slot(slot: &mut Node, ids: &mut IdGen) -> Result<(), RewriteSkip> {
    if !is_legacy_quote(slot) {
        return Err(RewriteSkip::NotALegacyQuote);
    }
    let attribution = attribution_text(slot).ok_or(RewriteSkip::MissingAttribution)?;
    let cell = find_content_cell_mut(slot).ok_or(RewriteSkip::MissingContent)?;
    let Some(cell_children) = cell.children_mut() else {
        return Err(RewriteSkip::MissingContent);
    };
    let mut content = std::mem::take(cell_children);
    collapse_nested(&mut content, ids);
    *slot = normalized_quote(&attribution, content, ids);
    Ok(())
}

/// Verbatim attribution text, trailing phrase included. `None` when the
/// header span, its bold element, or any non-whitespace text is missing.
fn attribution_text(quote: &Node) -> Option<String> {
    let span = find_attribution_span(quote)?;
    let bold = find_bold(span)?;
    let text = text_content_string(bold).trim().to_string();
    if text.is_empty() { None } else { Some(text) }
}

/// First attribution span under `node`, never looking inside the content
/// cell or a nested quote container.
fn find_attribution_span(node: &Node) -> Option<&Node> {
    for child in node.children()? {
        if is_attribution_span(child) {
            return Some(child);
        }
        if is_content_cell(child) || is_legacy_quote(child) || is_normalized_quote(child) {
            continue;
        }
        if let Some(found) = find_attribution_span(child) {
            return Some(found);
        }
    }
    None
}

fn find_bold(node: &Node) -> Option<&Node> {
    for child in node.children()? {
        if child.is_element_named("b") {
            return Some(child);
        }
        if let Some(found) = find_bold(child) {
            return Some(found);
        }
    }
    None
}

/// First content cell under `node`, never looking inside a nested quote
/// container (whose own content cell belongs to it, not to `node`).
fn find_content_cell_mut(node: &mut Node) -> Option<&mut Node> {
    for child in node.children_mut()? {
        if is_content_cell(child) {
            return Some(child);
        }
        if is_legacy_quote(child) || is_normalized_quote(child) {
            continue;
        }
        if let Some(found) = find_content_cell_mut(child) {
            return Some(found);
        }
    }
    None
}

/// When the relocated content already holds normalized quotes, collapse
/// them all and place one load-more marker before the first.
fn collapse_nested(content: &mut Vec<Node>, ids: &mut IdGen) {
    if !content.iter().any(contains_normalized) {
        return;
    }
    for node in content.iter_mut() {
        mark_collapsed(node);
    }
    insert_marker_before_first(content, ids);
}

fn contains_normalized(node: &Node) -> bool {
    if is_normalized_quote(node) {
        return true;
    }
    node.children()
        .is_some_and(|children| children.iter().any(contains_normalized))
}

fn mark_collapsed(node: &mut Node) {
    if is_normalized_quote(node) {
        node.add_class(COLLAPSED_CLASS);
    }
    if let Some(children) = node.children_mut() {
        for child in children {
            mark_collapsed(child);
        }
    }
}

fn insert_marker_before_first(children: &mut Vec<Node>, ids: &mut IdGen) -> bool {
    let mut i = 0;
    while i < children.len() {
        if is_normalized_quote(&children[i]) {
            children.insert(i, load_more_marker(ids));
            return true;
        }
        if let Some(grandchildren) = children[i].children_mut()
            && insert_marker_before_first(grandchildren, ids)
        {
            return true;
        }
        i += 1;
    }
    false
}

fn load_more_marker(ids: &mut IdGen) -> Node {
    let icon = Node::Element {
        id: ids.alloc(),
        name: Arc::from("i"),
        attributes: vec![(
            Arc::from("class"),
            Some("fa-solid fa-chevrons-down".to_string()),
        )],
        style: vec![("opacity".to_string(), "0.3".to_string())],
        children: Vec::new(),
    };
    Node::Element {
        id: ids.alloc(),
        name: Arc::from("div"),
        attributes: vec![(Arc::from("class"), Some(LOAD_MORE_CLASS.to_string()))],
        style: Vec::new(),
        children: vec![icon],
    }
}

/// The declaration downstream styling keys off: value is the attribution
/// wrapped in double quotes, exactly.
pub(crate) fn quote_suffix_declaration(attribution: &str) -> (String, String) {
    (
        QUOTE_SUFFIX_PROPERTY.to_string(),
        format!("\"{attribution}\""),
    )
}

fn normalized_quote(attribution: &str, content: Vec<Node>, ids: &mut IdGen) -> Node {
    let cite = Node::Element {
        id: ids.alloc(),
        name: Arc::from("cite"),
        attributes: Vec::new(),
        style: Vec::new(),
        children: vec![Node::Text {
            id: ids.alloc(),
            text: attribution.to_string(),
        }],
    };
    let body = Node::Element {
        id: ids.alloc(),
        name: Arc::from("div"),
        attributes: Vec::new(),
        style: Vec::new(),
        children: content,
    };
    let blockquote = Node::Element {
        id: ids.alloc(),
        name: Arc::from("blockquote"),
        attributes: Vec::new(),
        style: vec![quote_suffix_declaration(attribution)],
        children: vec![cite, body],
    };
    Node::Element {
        id: ids.alloc(),
        name: Arc::from("div"),
        attributes: vec![(
            Arc::from("class"),
            Some(NORMALIZED_QUOTE_CLASS.to_string()),
        )],
        style: Vec::new(),
        children: vec![blockquote],
    }
}

#[cfg(test)]
mod tests {
    use super::{RewriteSkip, quote_suffix_declaration, rewrite_quote};
    use crate::markup::{COLLAPSED_CLASS, is_load_more, is_normalized_quote};
    use dom::collect::text_content_string;
    use dom::snapshot::{DomSnapshotOptions, assert_dom_eq};
    use dom::{Id, IdGen, Node};
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

    /// table.classicquote with the usual header row and content cell.
    fn legacy_quote(base: u32, author: &str, content: Vec<Node>) -> Node {
        let header = elem(
            base + 1,
            "tr",
            None,
            vec![elem(
                base + 2,
                "td",
                None,
                vec![elem(
                    base + 3,
                    "span",
                    Some("genmed"),
                    vec![elem(base + 4, "b", None, vec![text(base + 5, author)])],
                )],
            )],
        );
        let body = elem(
            base + 6,
            "tr",
            None,
            vec![elem(base + 7, "td", Some("quote"), content)],
        );
        elem(base, "table", Some("classicquote"), vec![header, body])
    }

    fn normalized_stub(base: u32, author: &str) -> Node {
        elem(
            base,
            "div",
            Some("realquote"),
            vec![elem(
                base + 1,
                "blockquote",
                None,
                vec![
                    elem(base + 2, "cite", None, vec![text(base + 3, author)]),
                    elem(base + 4, "div", None, vec![text(base + 5, "older text")]),
                ],
            )],
        )
    }

    fn rewrite_under(root: &mut Node, id: u32) -> Result<(), RewriteSkip> {
        let mut ids = IdGen::after(root);
        rewrite_quote(root, Id(id), &mut ids)
    }

    #[test]
    fn produces_the_normalized_shape_in_place() {
        let mut root = elem(
            1,
            "div",
            Some("post"),
            vec![
                text(2, "before"),
                legacy_quote(10, "Alice a écrit:", vec![text(20, "hello")]),
                text(3, "after"),
            ],
        );
        rewrite_under(&mut root, 10).unwrap();

        let children = root.children().unwrap();
        assert_eq!(children.len(), 3);
        let quote = &children[1];
        assert!(is_normalized_quote(quote));
        let blockquote = &quote.children().unwrap()[0];
        assert!(blockquote.is_element_named("blockquote"));
        let inner = blockquote.children().unwrap();
        assert!(inner[0].is_element_named("cite"));
        assert!(inner[1].is_element_named("div"));
        assert_eq!(text_content_string(&inner[1]), "hello");
    }

    #[test]
    fn attribution_is_preserved_exactly() {
        let mut root = elem(
            1,
            "div",
            None,
            vec![legacy_quote(10, "Alice a écrit:", vec![text(20, "hi")])],
        );
        rewrite_under(&mut root, 10).unwrap();

        let quote = &root.children().unwrap()[0];
        let blockquote = &quote.children().unwrap()[0];
        assert_eq!(
            blockquote.style_value("--quote-suffix"),
            Some("\"Alice a écrit:\"")
        );
        let (property, value) = quote_suffix_declaration("Alice a écrit:");
        assert_eq!(
            format!("{property}: {value}"),
            "--quote-suffix: \"Alice a écrit:\""
        );
        let cite = &blockquote.children().unwrap()[0];
        assert_eq!(text_content_string(cite), "Alice a écrit:");
    }

    #[test]
    fn missing_attribution_leaves_the_node_untouched() {
        let broken = || {
            let mut quote = legacy_quote(10, "ignored", vec![text(20, "body")]);
            // strip the header span so no attribution is recognizable
            let header_cell = quote.children_mut().unwrap()[0].children_mut().unwrap()[0]
                .children_mut()
                .unwrap();
            header_cell.clear();
            elem(1, "div", None, vec![quote])
        };
        let mut root = broken();
        let err = rewrite_under(&mut root, 10).unwrap_err();
        assert_eq!(err, RewriteSkip::MissingAttribution);
        assert_dom_eq(&broken(), &root, DomSnapshotOptions::default());
    }

    #[test]
    fn missing_content_cell_leaves_the_node_untouched() {
        let broken = || {
            let mut quote = legacy_quote(10, "Bob a écrit:", Vec::new());
            quote.children_mut().unwrap().pop(); // drop the body row entirely
            elem(1, "div", None, vec![quote])
        };
        let mut root = broken();
        let err = rewrite_under(&mut root, 10).unwrap_err();
        assert_eq!(err, RewriteSkip::MissingContent);
        assert_dom_eq(&broken(), &root, DomSnapshotOptions::default());
    }

    #[test]
    fn whitespace_only_attribution_counts_as_missing() {
        let mut root = elem(
            1,
            "div",
            None,
            vec![legacy_quote(10, "   ", vec![text(20, "body")])],
        );
        let err = rewrite_under(&mut root, 10).unwrap_err();
        assert_eq!(err, RewriteSkip::MissingAttribution);
    }

    #[test]
    fn attribution_is_never_taken_from_a_nested_quote() {
        // outer header is gone; the only genmed/b pair lives inside the
        // nested quote and must not be bound to the outer one
        let nested = legacy_quote(30, "Inner a écrit:", vec![text(40, "deep")]);
        let mut outer = legacy_quote(10, "ignored", vec![nested]);
        let header_cell = outer.children_mut().unwrap()[0].children_mut().unwrap()[0]
            .children_mut()
            .unwrap();
        header_cell.clear();
        let mut root = elem(1, "div", None, vec![outer]);

        let err = rewrite_under(&mut root, 10).unwrap_err();
        assert_eq!(err, RewriteSkip::MissingAttribution);
    }

    #[test]
    fn content_cell_is_never_taken_from_a_nested_quote() {
        // outer body row is gone; the only td.quote lives inside the nested
        // quote sitting in the header cell of the outer one
        let nested = legacy_quote(30, "Inner a écrit:", vec![text(40, "deep")]);
        let mut outer = legacy_quote(10, "Outer a écrit:", Vec::new());
        outer.children_mut().unwrap().pop();
        outer.children_mut().unwrap()[0].children_mut().unwrap()[0]
            .children_mut()
            .unwrap()
            .push(nested);
        let mut root = elem(1, "div", None, vec![outer]);

        let err = rewrite_under(&mut root, 10).unwrap_err();
        assert_eq!(err, RewriteSkip::MissingContent);
    }

    #[test]
    fn nested_normalized_content_gains_marker_and_collapse() {
        let mut root = elem(
            1,
            "div",
            None,
            vec![legacy_quote(
                10,
                "Outer a écrit:",
                vec![text(20, "intro"), normalized_stub(50, "Inner a écrit:")],
            )],
        );
        rewrite_under(&mut root, 10).unwrap();

        let quote = &root.children().unwrap()[0];
        let body = &quote.children().unwrap()[0].children().unwrap()[1];
        let kids = body.children().unwrap();
        assert_eq!(kids.len(), 3);
        assert_eq!(text_content_string(&kids[0]), "intro");
        assert!(is_load_more(&kids[1]));
        assert!(is_normalized_quote(&kids[2]));
        assert!(kids[2].has_class(COLLAPSED_CLASS));
    }

    #[test]
    fn exactly_one_marker_before_the_first_of_several() {
        let mut root = elem(
            1,
            "div",
            None,
            vec![legacy_quote(
                10,
                "Outer a écrit:",
                vec![
                    normalized_stub(50, "First a écrit:"),
                    text(20, "between"),
                    normalized_stub(70, "Second a écrit:"),
                ],
            )],
        );
        rewrite_under(&mut root, 10).unwrap();

        let quote = &root.children().unwrap()[0];
        let body = &quote.children().unwrap()[0].children().unwrap()[1];
        let kids = body.children().unwrap();
        let markers = kids.iter().filter(|k| is_load_more(k)).count();
        assert_eq!(markers, 1);
        assert!(is_load_more(&kids[0]));
        assert!(is_normalized_quote(&kids[1]));
        assert!(kids[1].has_class(COLLAPSED_CLASS));
        assert!(kids[3].has_class(COLLAPSED_CLASS));
    }

    #[test]
    fn plain_content_gets_no_marker() {
        let mut root = elem(
            1,
            "div",
            None,
            vec![legacy_quote(10, "Alice a écrit:", vec![text(20, "plain")])],
        );
        rewrite_under(&mut root, 10).unwrap();

        let quote = &root.children().unwrap()[0];
        let body = &quote.children().unwrap()[0].children().unwrap()[1];
        assert!(body.children().unwrap().iter().all(|k| !is_load_more(k)));
    }

    #[test]
    fn rewriting_the_root_slot_itself_works() {
        let mut root = legacy_quote(10, "Alice a écrit:", vec![text(20, "hi")]);
        rewrite_under(&mut root, 10).unwrap();
        assert!(is_normalized_quote(&root));
    }
}
