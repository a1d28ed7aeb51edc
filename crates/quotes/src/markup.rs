//! Vocabulary of the quote markup: the class names and node shapes the
//! engine recognizes and produces. Downstream styling keys off these exact
//! names, so they are part of the output contract.

use dom::Node;

/// Pre-transform container: `table.classicquote`.
pub const LEGACY_QUOTE_CLASS: &str = "classicquote";
/// Post-transform container: `div.realquote`.
pub const NORMALIZED_QUOTE_CLASS: &str = "realquote";
/// One-shot reveal affordance: `div.quoteloadmore`.
pub const LOAD_MORE_CLASS: &str = "quoteloadmore";
/// State class on nested normalized quotes hidden behind a marker.
pub const COLLAPSED_CLASS: &str = "collapsed";
/// Wrapper around the attribution inside a legacy quote header.
pub const ATTRIBUTION_SPAN_CLASS: &str = "genmed";
/// Content cell of a legacy quote.
pub const CONTENT_CELL_CLASS: &str = "quote";
/// Style property carrying the attribution for CSS-level decoration.
pub const QUOTE_SUFFIX_PROPERTY: &str = "--quote-suffix";

pub fn is_legacy_quote(node: &Node) -> bool {
    node.is_element_named("table") && node.has_class(LEGACY_QUOTE_CLASS)
}

pub fn is_normalized_quote(node: &Node) -> bool {
    node.is_element_named("div") && node.has_class(NORMALIZED_QUOTE_CLASS)
}

pub fn is_load_more(node: &Node) -> bool {
    node.is_element_named("div") && node.has_class(LOAD_MORE_CLASS)
}

pub fn is_content_cell(node: &Node) -> bool {
    node.is_element_named("td") && node.has_class(CONTENT_CELL_CLASS)
}

pub fn is_attribution_span(node: &Node) -> bool {
    node.is_element_named("span") && node.has_class(ATTRIBUTION_SPAN_CLASS)
}

/// True when `node` is, or contains, a legacy quote.
pub fn contains_legacy_quote(node: &Node) -> bool {
    if is_legacy_quote(node) {
        return true;
    }
    node.children()
        .is_some_and(|children| children.iter().any(contains_legacy_quote))
}
