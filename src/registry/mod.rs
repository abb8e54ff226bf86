//! Directive registry: name → rendering handler dispatch.
//!
//! Every directive a source file may use is declared here as a
//! [`DirectiveSpec`]. The registry is populated once at construction and
//! immutable afterwards; the parser consults it to validate names and the
//! compiler consults it to dispatch rendering.
//!
//! Dispatch is a closed set of tagged handler variants behind a single
//! lookup table: simple tag wrappers share one variant, everything else is
//! a plain function. Wildcard specs (`font-*`, `cowpy-*`) match any name
//! with the same prefix.

pub mod handlers;

use std::collections::HashMap;

use crate::compile::state::CompileState;
use crate::error::{DeckError, Result};
use crate::parser::{Modifiers, Span};

/// What a handler is given for one directive occurrence.
///
/// `content` is the directive's body with every child already rendered and
/// substituted in place, so handlers post-process finished HTML, never raw
/// markup.
#[derive(Debug)]
pub struct Invocation<'a> {
    pub name: &'a str,
    pub modifiers: &'a Modifiers,
    pub content: &'a str,
    pub span: Span,
}

/// Handler function signature for non-trivial directives.
pub type HandlerFn = fn(&Invocation, &mut CompileState) -> Result<String>;

/// How a directive renders.
#[derive(Debug, Clone, Copy)]
pub enum Handler {
    /// Wrap content in a single HTML tag, honoring the style modifier.
    Wrap { tag: &'static str },
    /// Custom rendering function.
    Fn(HandlerFn),
}

/// Directive categories, used for listing and documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// `.slide{}`, `.title{}`, `.body{}`, `.comment{}`
    Structural,
    /// `.bf{}`, `.em{}`, `.code{}`, headings
    Formatting,
    /// `.column{}`
    Layout,
    /// `.o{}`, `.typewriter{}`
    Effect,
    /// `.font-*{}`, `.cowpy-*{}`
    Transform,
    /// `.watermark{}`, `.navbutton{}`, `.css{}`, `.meta{}`
    State,
    /// `.style{}`, `.class{}`, `.syntax{}` (parser-extracted)
    Modifier,
}

/// Specification for one registered directive.
#[derive(Debug, Clone, Copy)]
pub struct DirectiveSpec {
    /// Name without the leading dot; wildcards end in `-*`.
    pub name: &'static str,
    pub category: Category,
    pub description: &'static str,
    pub handler: Handler,
    pub is_wildcard: bool,
    pub aliases: &'static [&'static str],
}

impl DirectiveSpec {
    /// Whether this spec handles `name` (exact, alias, or wildcard prefix).
    pub fn handles(&self, name: &str) -> bool {
        if self.name == name || self.aliases.contains(&name) {
            return true;
        }
        if self.is_wildcard {
            if let Some(prefix) = self.name.strip_suffix('*') {
                // Require a non-empty suffix: bare "font-" is not a match.
                return name.len() > prefix.len() && name.starts_with(prefix);
            }
        }
        false
    }
}

/// Registry of all directive specifications.
#[derive(Debug)]
pub struct DirectiveRegistry {
    specs: Vec<DirectiveSpec>,
    by_name: HashMap<&'static str, usize>,
    wildcards: Vec<usize>,
}

impl DirectiveRegistry {
    /// Build the registry with the full built-in directive set.
    pub fn new() -> Self {
        let mut registry = Self {
            specs: Vec::new(),
            by_name: HashMap::new(),
            wildcards: Vec::new(),
        };

        for spec in handlers::builtin_specs() {
            registry.register(spec);
        }

        registry
    }

    fn register(&mut self, spec: DirectiveSpec) {
        let index = self.specs.len();
        self.by_name.insert(spec.name, index);
        for alias in spec.aliases {
            self.by_name.insert(alias, index);
        }
        if spec.is_wildcard {
            self.wildcards.push(index);
        }
        self.specs.push(spec);
    }

    /// Whether `name` resolves to a registered directive.
    pub fn matches(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Look up the spec handling `name`.
    pub fn get(&self, name: &str) -> Option<&DirectiveSpec> {
        if let Some(&index) = self.by_name.get(name) {
            return Some(&self.specs[index]);
        }
        self.wildcards
            .iter()
            .map(|&index| &self.specs[index])
            .find(|spec| spec.handles(name))
    }

    /// All specs in a category, registration order.
    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &DirectiveSpec> {
        self.specs.iter().filter(move |s| s.category == category)
    }

    /// All registered specs, registration order.
    pub fn specs(&self) -> impl Iterator<Item = &DirectiveSpec> {
        self.specs.iter()
    }

    /// Dispatch one directive occurrence to its handler.
    pub fn dispatch(&self, inv: &Invocation, state: &mut CompileState) -> Result<String> {
        let spec = self.get(inv.name).ok_or_else(|| DeckError::Build {
            message: format!("no handler registered for directive '.{}'", inv.name),
            help: None,
        })?;

        match spec.handler {
            Handler::Wrap { tag } => Ok(handlers::wrap_tag(tag, inv)),
            Handler::Fn(f) => f(inv, state),
        }
    }
}

impl Default for DirectiveRegistry {
    fn default() -> Self {
        Self::new()
    }
}
