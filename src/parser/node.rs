//! AST types produced by the parser.

use std::collections::HashMap;

use super::span::Span;

/// A node in the parsed document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A literal text span (may still contain escape/code placeholders).
    Text(String),
    /// A `.name{...}` directive with modifiers and ordered children.
    Directive(DirectiveNode),
}

impl Node {
    pub fn text(s: impl Into<String>) -> Self {
        Node::Text(s.into())
    }

    /// The directive node, if this is one.
    pub fn as_directive(&self) -> Option<&DirectiveNode> {
        match self {
            Node::Directive(d) => Some(d),
            Node::Text(_) => None,
        }
    }
}

/// A single `.directive{}` occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveNode {
    /// Directive name without the leading dot (e.g. "slide", "font-doom").
    pub name: String,
    /// Reserved modifiers extracted from the start of the content.
    pub modifiers: Modifiers,
    /// Content in source order: text spans and nested directives.
    pub children: Vec<Node>,
    /// Location of the directive in the (protected) source.
    pub span: Span,
}

impl DirectiveNode {
    /// Concatenated literal text of directly nested text children.
    ///
    /// Handy in tests and for directives that only make sense with plain
    /// content (ASCII art, metadata).
    pub fn text_content(&self) -> String {
        self.children
            .iter()
            .filter_map(|c| match c {
                Node::Text(t) => Some(t.as_str()),
                Node::Directive(_) => None,
            })
            .collect()
    }

    /// Directly nested directive children, in order.
    pub fn directive_children(&self) -> impl Iterator<Item = &DirectiveNode> {
        self.children.iter().filter_map(|c| c.as_directive())
    }
}

/// Insertion-ordered modifier mapping with unique keys.
///
/// Repeated assignment to the same key overwrites in place (last write
/// wins) without changing the key's position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Modifiers {
    entries: Vec<(String, String)>,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A parsed source file: top-level nodes plus parse-time side tables.
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Top-level directives and text spans, in source order.
    pub nodes: Vec<Node>,
    /// Raw content of protected `.code{.syntax{...}...}` blocks, keyed by
    /// the index embedded in their placeholder.
    pub protected_code: HashMap<usize, String>,
}
