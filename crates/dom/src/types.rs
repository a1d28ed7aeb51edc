use std::sync::Arc;

pub type NodeId = u32;

/// Stable node identity within one tree. `Id(0)` means "not yet assigned".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(pub NodeId);

impl Id {
    pub const UNASSIGNED: Id = Id(0);
}

#[derive(Debug)]
pub enum Node {
    /// A tree root: the whole document or a detached insertion.
    Fragment { id: Id, children: Vec<Node> },
    Element {
        id: Id,
        name: Arc<str>,
        attributes: Vec<(Arc<str>, Option<String>)>,
        style: Vec<(String, String)>,
        children: Vec<Node>,
    },
    Text { id: Id, text: String },
    Comment { id: Id, text: String },
}

impl Node {
    pub fn id(&self) -> Id {
        match self {
            Node::Fragment { id, .. } => *id,
            Node::Element { id, .. } => *id,
            Node::Text { id, .. } => *id,
            Node::Comment { id, .. } => *id,
        }
    }

    pub fn set_id(&mut self, new_id: Id) {
        match self {
            Node::Fragment { id, .. } => *id = new_id,
            Node::Element { id, .. } => *id = new_id,
            Node::Text { id, .. } => *id = new_id,
            Node::Comment { id, .. } => *id = new_id,
        }
    }

    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Fragment { children, .. } | Node::Element { children, .. } => Some(children),
            _ => None,
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Fragment { children, .. } | Node::Element { children, .. } => Some(children),
            _ => None,
        }
    }

    pub fn is_element_named(&self, want: &str) -> bool {
        matches!(self, Node::Element { name, .. } if name.eq_ignore_ascii_case(want))
    }

    /// First value of the attribute, `None` if absent or value-less.
    pub fn attr(&self, want: &str) -> Option<&str> {
        match self {
            Node::Element { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(want))
                .and_then(|(_, v)| v.as_deref()),
            _ => None,
        }
    }

    /// True if the attribute value, split on ASCII whitespace, contains `token`.
    pub fn attr_has_token(&self, attr: &str, token: &str) -> bool {
        self.attr(attr).is_some_and(|value| {
            value
                .split_ascii_whitespace()
                .any(|t| t.eq_ignore_ascii_case(token))
        })
    }

    pub fn has_class(&self, token: &str) -> bool {
        self.attr_has_token("class", token)
    }

    /// Append a class token. No-op on non-elements and when already present.
    pub fn add_class(&mut self, token: &str) {
        if self.has_class(token) {
            return;
        }
        let Node::Element { attributes, .. } = self else {
            return;
        };
        for (k, v) in attributes.iter_mut() {
            if k.eq_ignore_ascii_case("class") {
                match v {
                    Some(value) if !value.is_empty() => {
                        value.push(' ');
                        value.push_str(token);
                    }
                    _ => *v = Some(token.to_string()),
                }
                return;
            }
        }
        attributes.push((Arc::from("class"), Some(token.to_string())));
    }

    /// Remove a class token. The attribute itself is dropped once no tokens remain.
    pub fn remove_class(&mut self, token: &str) {
        let Node::Element { attributes, .. } = self else {
            return;
        };
        let mut now_empty = false;
        for (k, v) in attributes.iter_mut() {
            if k.eq_ignore_ascii_case("class")
                && let Some(value) = v
            {
                let kept = value
                    .split_ascii_whitespace()
                    .filter(|t| !t.eq_ignore_ascii_case(token))
                    .collect::<Vec<_>>()
                    .join(" ");
                now_empty = kept.is_empty();
                *value = kept;
            }
        }
        if now_empty {
            attributes.retain(|(k, _)| !k.eq_ignore_ascii_case("class"));
        }
    }

    /// Value of a style declaration on this element.
    pub fn style_value(&self, property: &str) -> Option<&str> {
        match self {
            Node::Element { style, .. } => style
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(property))
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }
}
