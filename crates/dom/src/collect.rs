use crate::Node;

/// Concatenate every text node under `node`, in document order, verbatim.
pub fn text_content(node: &Node, out: &mut String) {
    match node {
        Node::Text { text, .. } => out.push_str(text),
        Node::Fragment { children, .. } | Node::Element { children, .. } => {
            for child in children {
                text_content(child, out);
            }
        }
        Node::Comment { .. } => {}
    }
}

pub fn text_content_string(node: &Node) -> String {
    let mut out = String::new();
    text_content(node, &mut out);
    out
}
