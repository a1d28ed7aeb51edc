//! Deterministic tree serialization and equality for tests.
//! Not a public stable format; intended for internal comparisons.
//!
//! Equivalence rules:
//! - Node kinds must match.
//! - Element names must match.
//! - Attribute list order is significant; names and values must match.
//! - Style declaration order is significant; properties and values must match.
//! - Text and comments must match exactly.
//! - Ids can be ignored by options (the default).

use crate::Node;
use std::fmt::{self, Write};

#[derive(Clone, Copy, Debug)]
pub struct DomSnapshotOptions {
    pub ignore_ids: bool,
}

impl Default for DomSnapshotOptions {
    fn default() -> Self {
        Self { ignore_ids: true }
    }
}

#[derive(Debug)]
pub struct DomSnapshot {
    lines: Vec<String>,
}

impl DomSnapshot {
    pub fn new(root: &Node, options: DomSnapshotOptions) -> Self {
        let mut lines = Vec::new();
        walk_snapshot(root, &options, 0, &mut lines);
        Self { lines }
    }

    pub fn as_lines(&self) -> &[String] {
        &self.lines
    }

    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

impl fmt::Display for DomSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[derive(Debug)]
pub struct DomMismatch {
    path: String,
    detail: String,
    expected: String,
    actual: String,
    expected_subtree: String,
    actual_subtree: String,
}

impl fmt::Display for DomMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "tree mismatch at {}: {}", self.path, self.detail)?;
        writeln!(f, "expected: {}", self.expected)?;
        writeln!(f, "actual:   {}", self.actual)?;
        writeln!(f, "expected subtree:\n{}", self.expected_subtree)?;
        writeln!(f, "actual subtree:\n{}", self.actual_subtree)?;
        Ok(())
    }
}

impl std::error::Error for DomMismatch {}

pub fn assert_dom_eq(expected: &Node, actual: &Node, options: DomSnapshotOptions) {
    if let Err(mismatch) = compare_dom(expected, actual, options) {
        panic!("{mismatch}");
    }
}

pub fn compare_dom(
    expected: &Node,
    actual: &Node,
    options: DomSnapshotOptions,
) -> Result<(), Box<DomMismatch>> {
    let mut path = vec![node_label(expected)];
    compare_nodes(expected, actual, &options, &mut path)
}

fn compare_nodes(
    expected: &Node,
    actual: &Node,
    options: &DomSnapshotOptions,
    path: &mut Vec<String>,
) -> Result<(), Box<DomMismatch>> {
    if !options.ignore_ids && expected.id() != actual.id() {
        return Err(mismatch(path, "node id", expected, actual, options));
    }
    match (expected, actual) {
        (Node::Fragment { .. }, Node::Fragment { .. }) => {}
        (
            Node::Element {
                name: expected_name,
                attributes: expected_attrs,
                style: expected_style,
                ..
            },
            Node::Element {
                name: actual_name,
                attributes: actual_attrs,
                style: actual_style,
                ..
            },
        ) => {
            if expected_name != actual_name {
                return Err(mismatch(path, "element name", expected, actual, options));
            }
            if expected_attrs.len() != actual_attrs.len() {
                return Err(mismatch(path, "attribute count", expected, actual, options));
            }
            for (i, (exp, act)) in expected_attrs.iter().zip(actual_attrs.iter()).enumerate() {
                if exp.0 != act.0 || exp.1 != act.1 {
                    let detail = format!("attribute at index {i}");
                    return Err(mismatch(path, &detail, expected, actual, options));
                }
            }
            if expected_style.len() != actual_style.len() {
                return Err(mismatch(
                    path,
                    "style declaration count",
                    expected,
                    actual,
                    options,
                ));
            }
            for (i, (exp, act)) in expected_style.iter().zip(actual_style.iter()).enumerate() {
                if exp != act {
                    let detail = format!("style declaration at index {i}");
                    return Err(mismatch(path, &detail, expected, actual, options));
                }
            }
        }
        (Node::Text { text: expected_text, .. }, Node::Text { text: actual_text, .. }) => {
            if expected_text != actual_text {
                return Err(mismatch(path, "text", expected, actual, options));
            }
            return Ok(());
        }
        (
            Node::Comment { text: expected_text, .. },
            Node::Comment { text: actual_text, .. },
        ) => {
            if expected_text != actual_text {
                return Err(mismatch(path, "comment", expected, actual, options));
            }
            return Ok(());
        }
        _ => return Err(mismatch(path, "node kind", expected, actual, options)),
    }

    let expected_children = expected.children().unwrap_or(&[]);
    let actual_children = actual.children().unwrap_or(&[]);
    if expected_children.len() != actual_children.len() {
        let detail = format!(
            "child count (expected {}, actual {})",
            expected_children.len(),
            actual_children.len()
        );
        return Err(mismatch(path, &detail, expected, actual, options));
    }
    for (idx, (exp, act)) in expected_children.iter().zip(actual_children).enumerate() {
        path.push(format!("{}[{}]", node_label(exp), idx));
        let result = compare_nodes(exp, act, options, path);
        path.pop();
        result?;
    }
    Ok(())
}

fn mismatch(
    path: &[String],
    detail: &str,
    expected: &Node,
    actual: &Node,
    options: &DomSnapshotOptions,
) -> Box<DomMismatch> {
    Box::new(DomMismatch {
        path: format!("/{}", path.join("/")),
        detail: detail.to_string(),
        expected: format_node_line(expected, options),
        actual: format_node_line(actual, options),
        expected_subtree: DomSnapshot::new(expected, *options).render(),
        actual_subtree: DomSnapshot::new(actual, *options).render(),
    })
}

fn node_label(node: &Node) -> String {
    match node {
        Node::Fragment { .. } => "#fragment".to_string(),
        Node::Element { name, .. } => {
            let mut label = String::from(name.as_ref());
            if let Some(class) = node.attr("class").filter(|c| !c.is_empty()) {
                label.push_str(".class=");
                write_escaped(&mut label, class);
            }
            label
        }
        Node::Text { .. } => "#text".to_string(),
        Node::Comment { .. } => "#comment".to_string(),
    }
}

fn walk_snapshot(node: &Node, options: &DomSnapshotOptions, depth: usize, out: &mut Vec<String>) {
    let mut line = " ".repeat(depth * 2);
    write_node_line(&mut line, node, options);
    out.push(line);
    if let Some(children) = node.children() {
        for child in children {
            walk_snapshot(child, options, depth + 1, out);
        }
    }
}

fn format_node_line(node: &Node, options: &DomSnapshotOptions) -> String {
    let mut line = String::new();
    write_node_line(&mut line, node, options);
    line
}

fn write_node_line(out: &mut String, node: &Node, options: &DomSnapshotOptions) {
    match node {
        Node::Fragment { id, .. } => {
            out.push_str("#fragment");
            if !options.ignore_ids {
                let _ = write!(out, " id={}", id.0);
            }
        }
        Node::Element {
            id,
            name,
            attributes,
            style,
            ..
        } => {
            out.push('<');
            out.push_str(name);
            for (attr, value) in attributes {
                out.push(' ');
                out.push_str(attr);
                if let Some(value) = value {
                    out.push_str("=\"");
                    write_escaped(out, value);
                    out.push('"');
                }
            }
            if !options.ignore_ids {
                let _ = write!(out, " data-node-id=\"{}\"", id.0);
            }
            if !style.is_empty() {
                out.push_str(" style=[");
                for (i, (k, v)) in style.iter().enumerate() {
                    if i != 0 {
                        out.push_str("; ");
                    }
                    out.push_str(k);
                    out.push_str(": ");
                    write_escaped(out, v);
                }
                out.push(']');
            }
            out.push('>');
        }
        Node::Text { id, text } => {
            out.push('"');
            write_escaped(out, text);
            out.push('"');
            if !options.ignore_ids {
                let _ = write!(out, " id={}", id.0);
            }
        }
        Node::Comment { id, text } => {
            out.push_str("<!-- ");
            write_escaped(out, text);
            out.push_str(" -->");
            if !options.ignore_ids {
                let _ = write!(out, " id={}", id.0);
            }
        }
    }
}

fn write_escaped(out: &mut String, value: &str) {
    for ch in value.chars() {
        match ch {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ => out.push(ch),
        }
    }
}
