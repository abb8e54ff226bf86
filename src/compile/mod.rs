//! Inside-out compilation of a parsed document.
//!
//! Children render before their parents. While a parent's content is being
//! assembled, each directive child is represented by a placeholder that is
//! back-filled exactly once with the child's rendered HTML, so text between
//! children survives byte for byte.

pub mod state;

pub use state::CompileState;

use std::path::PathBuf;

use crate::error::Result;
use crate::escape;
use crate::parser::{self, Document, Node};
use crate::placeholder;
use crate::registry::{DirectiveRegistry, Invocation};

/// Knobs the CLI threads through to compilation.
#[derive(Debug, Default, Clone)]
pub struct CompileOptions {
    /// Directory searched for `.flf` figlet fonts.
    pub fonts_dir: Option<PathBuf>,
}

/// Walks a [`Document`] bottom-up and dispatches each directive to its
/// registered handler.
pub struct Compiler<'r> {
    registry: &'r DirectiveRegistry,
}

impl<'r> Compiler<'r> {
    pub fn new(registry: &'r DirectiveRegistry) -> Self {
        Self { registry }
    }

    /// Renders a parsed document to an HTML fragment, returning the
    /// accumulated state (slide count, watermarks, nav entries, metadata)
    /// alongside it.
    pub fn compile(
        &self,
        doc: &Document,
        options: &CompileOptions,
    ) -> Result<(String, CompileState)> {
        let mut state = CompileState::new();
        state.protected_code = doc.protected_code.clone();
        state.fonts_dir = options.fonts_dir.clone();

        let mut parts = Vec::with_capacity(doc.nodes.len());
        for node in &doc.nodes {
            parts.push(self.node_compile(node, &mut state)?);
        }

        Ok((parts.join("\n"), state))
    }

    fn node_compile(&self, node: &Node, state: &mut CompileState) -> Result<String> {
        let directive = match node {
            Node::Text(text) => return Ok(text.clone()),
            Node::Directive(directive) => directive,
        };

        let mut content = String::new();
        let mut rendered = Vec::new();
        for child in &directive.children {
            match child {
                Node::Text(text) => content.push_str(text),
                Node::Directive(_) => {
                    content.push_str(&placeholder::child(rendered.len()));
                    rendered.push(self.node_compile(child, state)?);
                }
            }
        }
        for (index, html) in rendered.iter().enumerate() {
            content = content.replacen(&placeholder::child(index), html, 1);
        }

        let inv = Invocation {
            name: &directive.name,
            modifiers: &directive.modifiers,
            content: &content,
            span: directive.span,
        };
        self.registry.dispatch(&inv, state)
    }
}

/// Full pipeline: escape protection, parse, compile, escape expansion.
pub fn compile_source(
    source: &str,
    registry: &DirectiveRegistry,
    options: &CompileOptions,
) -> Result<(String, CompileState)> {
    let (protected, escapes) = escape::protect(source);
    let doc = parser::parse(&protected, registry)?;
    let (html, state) = Compiler::new(registry).compile(&doc, options)?;
    let html = escape::expand(&html, &escapes)?;
    Ok((html, state))
}
