//! Static corpus of quote trees with declared invariants, swept by the
//! integration suite. Fixtures are builders rather than markup strings:
//! the engine consumes parsed trees, so the corpus speaks trees too.

use dom::{Id, Node};
use std::sync::Arc;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Invariant {
    /// No legacy quote is reachable after one driver run.
    ZeroLegacyRemaining,
    /// A second driver run changes nothing.
    SecondRunFixedPoint,
    /// Nested quotes sit collapsed behind exactly one marker per region.
    NestedQuotesCollapsed,
    /// The tree is structurally identical before and after a driver run.
    MalformedUntouched,
}

impl Invariant {
    pub const fn label(self) -> &'static str {
        match self {
            Self::ZeroLegacyRemaining => "zero legacy remaining",
            Self::SecondRunFixedPoint => "second run fixed point",
            Self::NestedQuotesCollapsed => "nested quotes collapsed",
            Self::MalformedUntouched => "malformed untouched",
        }
    }
}

impl std::fmt::Display for Invariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug)]
pub struct GoldenFixture {
    pub name: &'static str,
    pub covers: &'static str,
    pub build: fn() -> Node,
    pub expected_rewrites: usize,
    pub invariants: &'static [Invariant],
}

pub fn corpus() -> &'static [GoldenFixture] {
    CORPUS
}

const CORPUS: &[GoldenFixture] = &[
    GoldenFixture {
        name: "flat_single",
        covers: "One well-formed top-level quote in a post body.",
        build: flat_single,
        expected_rewrites: 1,
        invariants: &[Invariant::ZeroLegacyRemaining, Invariant::SecondRunFixedPoint],
    },
    GoldenFixture {
        name: "nested_pair",
        covers: "A reply quoting a quote; the inner one must be rewritten first.",
        build: nested_pair,
        expected_rewrites: 2,
        invariants: &[
            Invariant::ZeroLegacyRemaining,
            Invariant::SecondRunFixedPoint,
            Invariant::NestedQuotesCollapsed,
        ],
    },
    GoldenFixture {
        name: "deep_chain",
        covers: "Four levels of quotes quoting quotes.",
        build: deep_chain,
        expected_rewrites: 4,
        invariants: &[
            Invariant::ZeroLegacyRemaining,
            Invariant::SecondRunFixedPoint,
            Invariant::NestedQuotesCollapsed,
        ],
    },
    GoldenFixture {
        name: "pre_normalized_inside",
        covers: "Pasted content already carrying a normalized quote.",
        build: pre_normalized_inside,
        expected_rewrites: 1,
        invariants: &[
            Invariant::ZeroLegacyRemaining,
            Invariant::SecondRunFixedPoint,
            Invariant::NestedQuotesCollapsed,
        ],
    },
    GoldenFixture {
        name: "missing_attribution",
        covers: "Legacy quote without a recognizable attribution.",
        build: missing_attribution,
        expected_rewrites: 0,
        invariants: &[Invariant::MalformedUntouched, Invariant::SecondRunFixedPoint],
    },
    GoldenFixture {
        name: "missing_content",
        covers: "Legacy quote without a content cell.",
        build: missing_content,
        expected_rewrites: 0,
        invariants: &[Invariant::MalformedUntouched, Invariant::SecondRunFixedPoint],
    },
    GoldenFixture {
        name: "mixed_siblings",
        covers: "A malformed quote between two well-formed ones.",
        build: mixed_siblings,
        expected_rewrites: 2,
        invariants: &[Invariant::SecondRunFixedPoint],
    },
    GoldenFixture {
        name: "no_quotes",
        covers: "Plain post content; the driver must be a no-op.",
        build: no_quotes,
        expected_rewrites: 0,
        invariants: &[Invariant::ZeroLegacyRemaining, Invariant::SecondRunFixedPoint],
    },
];

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

fn normalized_quote_stub(base: u32, author: &str, body_text: &str) -> Node {
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
                elem(base + 4, "div", None, vec![text(base + 5, body_text)]),
            ],
        )],
    )
}

fn post(children: Vec<Node>) -> Node {
    Node::Fragment {
        id: Id(1),
        children: vec![elem(2, "div", Some("post"), children)],
    }
}

fn flat_single() -> Node {
    post(vec![
        text(3, "said earlier:"),
        legacy_quote(10, "Alice a écrit:", vec![text(20, "bonjour")]),
        text(4, "and I agree."),
    ])
}

fn nested_pair() -> Node {
    let inner = legacy_quote(30, "Bob a écrit:", vec![text(40, "first message")]);
    post(vec![legacy_quote(
        10,
        "Alice a écrit:",
        vec![text(20, "quoting you:"), inner],
    )])
}

fn deep_chain() -> Node {
    let level4 = legacy_quote(70, "Dora a écrit:", vec![text(80, "origin")]);
    let level3 = legacy_quote(50, "Carol a écrit:", vec![level4]);
    let level2 = legacy_quote(30, "Bob a écrit:", vec![level3]);
    post(vec![legacy_quote(10, "Alice a écrit:", vec![level2])])
}

fn pre_normalized_inside() -> Node {
    post(vec![legacy_quote(
        10,
        "Alice a écrit:",
        vec![
            text(20, "pasted:"),
            normalized_quote_stub(50, "Bob a écrit:", "older text"),
        ],
    )])
}

fn missing_attribution() -> Node {
    let mut quote = legacy_quote(10, "ignored", vec![text(20, "raw content")]);
    let header_cell = quote.children_mut().unwrap()[0].children_mut().unwrap()[0]
        .children_mut()
        .unwrap();
    header_cell.clear();
    post(vec![quote])
}

fn missing_content() -> Node {
    let mut quote = legacy_quote(10, "Alice a écrit:", Vec::new());
    quote.children_mut().unwrap().pop();
    post(vec![quote])
}

fn mixed_siblings() -> Node {
    let mut broken = legacy_quote(100, "ignored", vec![text(110, "still visible")]);
    let header_cell = broken.children_mut().unwrap()[0].children_mut().unwrap()[0]
        .children_mut()
        .unwrap();
    header_cell.clear();
    post(vec![
        legacy_quote(10, "Alice a écrit:", vec![text(20, "one")]),
        broken,
        legacy_quote(30, "Bob a écrit:", vec![text(40, "two")]),
    ])
}

fn no_quotes() -> Node {
    post(vec![
        text(3, "just words"),
        elem(4, "p", None, vec![text(5, "and a paragraph")]),
    ])
}
