//! Recursive-descent parser for `.directive{}` markup.
//!
//! Transforms (escape-protected) slide source into a tree of directive and
//! text nodes. The grammar is deliberately small:
//!
//! - `.name{content}` where `name` is alphanumeric groups joined by single
//!   hyphens, matched against the directive registry.
//! - Content mixes literal text and nested directives, with brace depth
//!   tracked so a directive's closing `}` is unambiguous even when its
//!   content contains braces.
//! - `.style{}`, `.class{}` and `.syntax{}` at the *start* of a directive's
//!   content are lifted into the node's modifier map instead of becoming
//!   children; a repeated modifier name overwrites (last write wins).
//!
//! Multi-line `.code{.syntax{...}...}` blocks are protected before any
//! directive scanning so their contents are never parsed as markup; the raw
//! text is stored on the [`Document`] for the code handler to restore.
//!
//! # Usage
//!
//! ```ignore
//! use deck::parser::parse;
//! use deck::registry::DirectiveRegistry;
//!
//! let registry = DirectiveRegistry::new();
//! let doc = parse(".slide{.title{Hello} .body{World}}", &registry)?;
//! assert_eq!(doc.nodes.len(), 1);
//! ```

pub mod node;
pub mod span;

pub use node::{DirectiveNode, Document, Modifiers, Node};
pub use span::{offset_to_location, Location, Span};

use std::collections::HashMap;

use crate::error::{DeckError, Result};
use crate::placeholder;
use crate::registry::DirectiveRegistry;

/// Modifier names the parser extracts instead of treating as children.
const RESERVED_MODIFIERS: &[&str] = &["style", "class", "syntax"];

/// Parse protected source text into a [`Document`].
pub fn parse(source: &str, registry: &DirectiveRegistry) -> Result<Document> {
    Parser::new(source, registry).parse()
}

struct Parser<'a> {
    /// Full source after code-block protection; all offsets index into it.
    source: String,
    registry: &'a DirectiveRegistry,
    protected_code: HashMap<usize, String>,
}

/// A `.name{` occurrence found while scanning.
struct DirectiveMatch {
    name: String,
    /// Offset of the leading dot.
    dot: usize,
    /// Offset of the opening brace.
    brace: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &str, registry: &'a DirectiveRegistry) -> Self {
        let mut protected_code = HashMap::new();
        let source = code_protect(source, &mut protected_code);
        Self {
            source,
            registry,
            protected_code,
        }
    }

    fn parse(self) -> Result<Document> {
        let mut nodes = Vec::new();
        let mut pos = 0;

        while pos < self.source.len() {
            let rest = &self.source[pos..];
            pos += rest.len() - rest.trim_start().len();
            if pos >= self.source.len() {
                break;
            }

            if self.source[pos..].starts_with('}') {
                return Err(self.error_at(
                    pos,
                    "closing brace with no open directive".to_string(),
                    Some("remove the stray '}' or escape it as \\}".to_string()),
                ));
            }

            match self.directive_find(pos)? {
                Some(m) => {
                    // Literal text before the directive stays a text node
                    // (top-level whitespace runs are dropped).
                    let before = &self.source[pos..m.dot];
                    if !before.trim().is_empty() {
                        nodes.push(Node::text(before));
                    }
                    let (node, after) = self.directive_parse(m)?;
                    nodes.push(Node::Directive(node));
                    pos = after;
                }
                None => {
                    let rest = &self.source[pos..];
                    if !rest.trim().is_empty() {
                        nodes.push(Node::text(rest));
                    }
                    break;
                }
            }
        }

        Ok(Document {
            nodes,
            protected_code: self.protected_code,
        })
    }

    /// Find the next registered `.name{` pattern at or after `from`.
    ///
    /// A syntactically valid pattern whose name is not registered is a
    /// structural error: unknown directives never silently pass through.
    fn directive_find(&self, from: usize) -> Result<Option<DirectiveMatch>> {
        let bytes = self.source.as_bytes();
        let mut pos = from;

        while let Some(found) = self.source[pos..].find('.') {
            let dot = pos + found;
            let name_start = dot + 1;

            let name_end = directive_name_end(&self.source, name_start);
            if name_end > name_start && bytes.get(name_end) == Some(&b'{') {
                let name = &self.source[name_start..name_end];
                if !self.registry.matches(name) {
                    return Err(self.error_at(
                        dot,
                        format!("unknown directive '.{name}'"),
                        Some(format!(
                            "escape it as \\.{name}\\{{...\\}} to show it literally"
                        )),
                    ));
                }
                return Ok(Some(DirectiveMatch {
                    name: name.to_string(),
                    dot,
                    brace: name_end,
                }));
            }

            pos = dot + 1;
        }

        Ok(None)
    }

    /// Parse one directive starting at `m`, returning the node and the
    /// offset just past its closing brace.
    fn directive_parse(&self, m: DirectiveMatch) -> Result<(DirectiveNode, usize)> {
        let close = brace_match(&self.source, m.brace).ok_or_else(|| {
            self.error_at(
                m.dot,
                format!("unmatched brace in directive '.{}'", m.name),
                Some("add the missing '}'".to_string()),
            )
        })?;

        let content_start = m.brace + 1;
        let (modifiers, body_start) = self.modifiers_extract(content_start, close)?;
        let children = self.content_parse(body_start, close)?;

        let node = DirectiveNode {
            name: m.name,
            modifiers,
            children,
            span: Span::from_offsets(&self.source, m.dot, close + 1),
        };

        Ok((node, close + 1))
    }

    /// Parse the content between `start` and `end` into ordered text and
    /// directive children.
    fn content_parse(&self, start: usize, end: usize) -> Result<Vec<Node>> {
        let mut children = Vec::new();
        let mut pos = start;

        loop {
            match self.directive_find(pos)? {
                // Stop at matches beyond this content's end.
                Some(m) if m.dot < end => {
                    if m.dot > pos {
                        children.push(Node::text(&self.source[pos..m.dot]));
                    }
                    let (node, after) = self.directive_parse(m)?;
                    children.push(Node::Directive(node));
                    pos = after;
                }
                _ => break,
            }
        }

        if pos < end {
            children.push(Node::text(&self.source[pos..end]));
        }

        Ok(children)
    }

    /// Extract leading `.style{} .class{} .syntax{}` sub-forms from the
    /// content between `start` and `end`.
    ///
    /// Returns the modifier map and the offset where the real content
    /// begins. When no modifier leads the content, the original start
    /// (leading whitespace included) is returned untouched.
    fn modifiers_extract(&self, start: usize, end: usize) -> Result<(Modifiers, usize)> {
        let mut modifiers = Modifiers::new();
        let mut pos = start;
        let mut any_found = false;

        loop {
            let rest = &self.source[pos..end];
            let at = pos + (rest.len() - rest.trim_start().len());

            let Some(name) = RESERVED_MODIFIERS
                .iter()
                .find(|name| self.source[at..end].starts_with(&format!(".{name}{{")))
            else {
                break;
            };

            let brace = at + 1 + name.len();
            let close = brace_match(&self.source[..end], brace).ok_or_else(|| {
                self.error_at(
                    at,
                    format!("unmatched brace in modifier '.{name}'"),
                    None,
                )
            })?;

            let value = &self.source[brace + 1..close];
            if *name == "style" {
                style_modifier_set(&mut modifiers, value);
            } else {
                modifiers.set(*name, value);
            }

            any_found = true;
            pos = close + 1;
        }

        if !any_found {
            return Ok((modifiers, start));
        }

        // Skip whitespace after the final modifier.
        let rest = &self.source[pos..end];
        Ok((modifiers, pos + (rest.len() - rest.trim_start().len())))
    }

    fn error_at(&self, offset: usize, message: String, help: Option<String>) -> DeckError {
        let location = offset_to_location(&self.source, offset);
        DeckError::Parse {
            message: format!("{message} at {location}"),
            help,
        }
    }
}

/// Replace multi-line `.code{.syntax{...}...}` blocks with placeholders,
/// recording the raw content in `protected`.
///
/// Inline `.code{}` (no `.syntax{}` lead) is left for normal parsing.
fn code_protect(source: &str, protected: &mut HashMap<usize, String>) -> String {
    let mut out = String::with_capacity(source.len());
    let mut pos = 0;

    while let Some(found) = source[pos..].find(".code{") {
        let start = pos + found;
        let brace = start + ".code".len();

        let Some(close) = brace_match(source, brace) else {
            // Unbalanced; leave it for the parser to report.
            break;
        };

        let raw = &source[brace + 1..close];
        if raw.trim_start().starts_with(".syntax{") {
            let id = protected.len();
            out.push_str(&source[pos..start]);
            out.push_str(".code{");
            out.push_str(&placeholder::code(id));
            out.push('}');
            protected.insert(id, raw.to_string());
        } else {
            out.push_str(&source[pos..close + 1]);
        }
        pos = close + 1;
    }

    out.push_str(&source[pos..]);
    out
}

/// End offset of a directive name starting at `start`.
///
/// Names are `[A-Za-z0-9_]+` groups joined by single hyphens; a trailing
/// hyphen is not part of the name.
fn directive_name_end(source: &str, start: usize) -> usize {
    let bytes = source.as_bytes();
    let mut end = start;

    while end < bytes.len() {
        let b = bytes[end];
        if b.is_ascii_alphanumeric() || b == b'_' {
            end += 1;
        } else if b == b'-'
            && end > start
            && bytes
                .get(end + 1)
                .is_some_and(|n| n.is_ascii_alphanumeric() || *n == b'_')
        {
            end += 1;
        } else {
            break;
        }
    }

    end
}

/// Offset of the `}` matching the `{` at `open`, tracking nesting depth.
fn brace_match(source: &str, open: usize) -> Option<usize> {
    debug_assert_eq!(source.as_bytes().get(open), Some(&b'{'));
    let mut depth = 1usize;

    for (i, b) in source.bytes().enumerate().skip(open + 1) {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }

    None
}

/// Record a `.style{}` value, lifting `align=` and `width=` keys out into
/// their own modifiers. An emptied style value is not recorded.
fn style_modifier_set(modifiers: &mut Modifiers, value: &str) {
    let mut kept = Vec::new();

    for part in value.split(';') {
        let trimmed = part.trim();
        if let Some(v) = key_value(trimmed, "align") {
            modifiers.set("align", v);
        } else if let Some(v) = key_value(trimmed, "width") {
            modifiers.set("width", v);
        } else if !trimmed.is_empty() {
            kept.push(trimmed.to_string());
        }
    }

    if !kept.is_empty() {
        modifiers.set("style", kept.join("; "));
    }
}

/// Parse `key = value` where the key matches exactly.
fn key_value<'v>(part: &'v str, key: &str) -> Option<&'v str> {
    let rest = part.strip_prefix(key)?.trim_start();
    let value = rest.strip_prefix('=')?.trim();
    (!value.is_empty()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::DirectiveRegistry;
    use pretty_assertions::assert_eq;

    fn parse_ok(source: &str) -> Document {
        let registry = DirectiveRegistry::new();
        parse(source, &registry).unwrap()
    }

    fn parse_err(source: &str) -> DeckError {
        let registry = DirectiveRegistry::new();
        parse(source, &registry).unwrap_err()
    }

    fn first(doc: &Document) -> &DirectiveNode {
        doc.nodes[0].as_directive().unwrap()
    }

    #[test]
    fn test_empty_source() {
        assert!(parse_ok("").nodes.is_empty());
        assert!(parse_ok("   \n\t  ").nodes.is_empty());
    }

    #[test]
    fn test_single_directive_with_text() {
        let doc = parse_ok(".slide{Hello world}");
        let slide = first(&doc);

        assert_eq!(slide.name, "slide");
        assert_eq!(slide.children, vec![Node::text("Hello world")]);
    }

    #[test]
    fn test_hyphenated_directive_name() {
        let doc = parse_ok(".font-doom{BIG}");
        assert_eq!(first(&doc).name, "font-doom");
    }

    #[test]
    fn test_multiple_top_level_directives() {
        let doc = parse_ok(".slide{First}\n.slide{Second}");

        assert_eq!(doc.nodes.len(), 2);
        assert_eq!(doc.nodes[0].as_directive().unwrap().text_content(), "First");
        assert_eq!(doc.nodes[1].as_directive().unwrap().text_content(), "Second");
    }

    #[test]
    fn test_nested_directives_in_order() {
        let doc = parse_ok(".slide{.title{Hi} .body{There}}");
        let slide = first(&doc);

        let names: Vec<&str> = slide.directive_children().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["title", "body"]);

        // The whitespace between children is its own text node.
        assert_eq!(slide.children.len(), 3);
        assert_eq!(slide.children[1], Node::text(" "));
    }

    #[test]
    fn test_text_between_children_preserved() {
        let doc = parse_ok(".body{before .bf{bold} after}");
        let body = first(&doc);

        assert_eq!(body.children[0], Node::text("before "));
        assert_eq!(body.children[1].as_directive().unwrap().name, "bf");
        assert_eq!(body.children[2], Node::text(" after"));
    }

    #[test]
    fn test_deep_nesting() {
        let doc = parse_ok(".slide{.body{.o{.bf{deep}}}}");
        let slide = first(&doc);
        let body = slide.directive_children().next().unwrap();
        let o = body.directive_children().next().unwrap();
        let bf = o.directive_children().next().unwrap();

        assert_eq!(bf.name, "bf");
        assert_eq!(bf.text_content(), "deep");
    }

    #[test]
    fn test_braces_in_plain_content() {
        let doc = parse_ok(".code{function() { return {}; }}");
        assert_eq!(first(&doc).text_content(), "function() { return {}; }");
    }

    #[test]
    fn test_unmatched_open_brace_is_error() {
        let err = parse_err(".slide{no close");
        assert!(err.to_string().contains("unmatched brace"), "{err}");
    }

    #[test]
    fn test_unmatched_nested_brace_is_error() {
        let err = parse_err(".slide{.body{x}");
        assert!(err.to_string().contains("unmatched brace"), "{err}");
    }

    #[test]
    fn test_stray_closing_brace_is_error() {
        let err = parse_err("} .slide{x}");
        assert!(err.to_string().contains("closing brace"), "{err}");
    }

    #[test]
    fn test_unknown_directive_is_error_naming_it() {
        let err = parse_err(".slide{.bogus-name{x}}");
        let msg = err.to_string();
        assert!(msg.contains("bogus-name"), "{msg}");
    }

    #[test]
    fn test_error_reports_location() {
        let err = parse_err(".slide{Line one\n.nope{x}}");
        assert!(err.to_string().contains("2:1"), "{err}");
    }

    #[test]
    fn test_style_modifier_extracted_at_start() {
        let doc = parse_ok(".body{.style{color: red} Content}");
        let body = first(&doc);

        assert_eq!(body.modifiers.get("style"), Some("color: red"));
        assert_eq!(body.text_content(), "Content");
    }

    #[test]
    fn test_class_and_style_modifiers() {
        let doc = parse_ok(".body{.class{big} .style{color: red} Content}");
        let body = first(&doc);

        assert_eq!(body.modifiers.get("class"), Some("big"));
        assert_eq!(body.modifiers.get("style"), Some("color: red"));
    }

    #[test]
    fn test_modifier_last_write_wins() {
        let doc = parse_ok(".slide{.style{a} .style{b} body}");
        assert_eq!(first(&doc).modifiers.get("style"), Some("b"));
    }

    #[test]
    fn test_modifier_not_at_start_is_a_child() {
        let doc = parse_ok(".body{Text .style{color: red}}");
        let body = first(&doc);

        assert!(body.modifiers.is_empty());
        assert_eq!(body.directive_children().next().unwrap().name, "style");
    }

    #[test]
    fn test_no_modifiers_preserves_leading_whitespace() {
        let doc = parse_ok(".tt{  indented}");
        assert_eq!(first(&doc).text_content(), "  indented");
    }

    #[test]
    fn test_style_align_and_width_lifted() {
        let doc = parse_ok(".body{.style{align=center; width=50%; color: red} x}");
        let body = first(&doc);

        assert_eq!(body.modifiers.get("align"), Some("center"));
        assert_eq!(body.modifiers.get("width"), Some("50%"));
        assert_eq!(body.modifiers.get("style"), Some("color: red"));
    }

    #[test]
    fn test_style_only_align_records_no_style() {
        let doc = parse_ok(".body{.style{align=center} x}");
        let body = first(&doc);

        assert_eq!(body.modifiers.get("align"), Some("center"));
        assert_eq!(body.modifiers.get("style"), None);
    }

    #[test]
    fn test_empty_style_not_recorded() {
        let doc = parse_ok(".body{.style{} x}");
        assert_eq!(first(&doc).modifiers.get("style"), None);
    }

    #[test]
    fn test_code_block_with_syntax_is_protected() {
        let doc = parse_ok(".code{.syntax{language=python}\ndef foo(): .slide{not parsed}\n}");
        let code = first(&doc);

        assert_eq!(code.name, "code");
        // Content is a placeholder; the nested ".slide{}" was never parsed.
        assert!(code.directive_children().next().is_none());
        assert_eq!(doc.protected_code.len(), 1);
        assert!(doc.protected_code[&0].contains(".slide{not parsed}"));
    }

    #[test]
    fn test_inline_code_is_parsed_normally() {
        let doc = parse_ok(".code{let x = .bf{1};}");
        let code = first(&doc);

        assert!(doc.protected_code.is_empty());
        assert_eq!(code.directive_children().next().unwrap().name, "bf");
    }

    #[test]
    fn test_directive_span_covers_whole_form() {
        let doc = parse_ok("  .bf{x}");
        let bf = first(&doc);

        assert_eq!(bf.span.start.offset, 2);
        assert_eq!(bf.span.len(), ".bf{x}".len());
    }
}
