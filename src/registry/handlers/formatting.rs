//! Formatting directives: inline wrappers, headings, columns, code.

use crate::compile::state::CompileState;
use crate::error::Result;
use crate::placeholder;
use crate::registry::{Category, DirectiveSpec, Handler, Invocation};

use super::{class_attr, html_escape, style_attr};

pub(super) fn specs() -> Vec<DirectiveSpec> {
    let wrap = |name, tag, description| DirectiveSpec {
        name,
        category: Category::Formatting,
        description,
        handler: Handler::Wrap { tag },
        is_wildcard: false,
        aliases: &[],
    };

    vec![
        wrap("bf", "strong", "Bold text"),
        wrap("em", "em", "Emphasized text"),
        wrap("tt", "tt", "Teletype/monospace text"),
        wrap("underline", "u", "Underlined text"),
        wrap("h1", "h1", "Heading level 1"),
        wrap("h2", "h2", "Heading level 2"),
        wrap("h3", "h3", "Heading level 3"),
        wrap("h4", "h4", "Heading level 4"),
        wrap("h5", "h5", "Heading level 5"),
        wrap("h6", "h6", "Heading level 6"),
        DirectiveSpec {
            name: "code",
            category: Category::Formatting,
            description: "Inline code, or a protected block with .syntax{}",
            handler: Handler::Fn(code),
            is_wildcard: false,
            aliases: &[],
        },
        DirectiveSpec {
            name: "column",
            category: Category::Layout,
            description: "Column layout container",
            handler: Handler::Fn(column),
            is_wildcard: false,
            aliases: &[],
        },
    ]
}

/// Inline `.code{}` wraps as-is; a protected block (content is a CODE
/// placeholder) restores the raw text, lifts the `.syntax{language=...}`
/// lead, and HTML-escapes the rest for literal display.
fn code(inv: &Invocation, state: &mut CompileState) -> Result<String> {
    if let Some(index) = placeholder::parse_code_index(inv.content.trim()) {
        let raw = state
            .protected_code
            .get(&index)
            .cloned()
            .unwrap_or_default();
        let (language, body) = syntax_split(&raw);
        let class = match language {
            Some(lang) => format!(" class=\"language-{lang}\""),
            None => String::new(),
        };
        return Ok(format!(
            "<pre class=\"code-block\"><code{class}>{}</code></pre>",
            html_escape(body.trim_matches('\n'))
        ));
    }

    Ok(format!(
        "<code{}{}>{}</code>",
        class_attr(inv, ""),
        style_attr(inv),
        inv.content
    ))
}

fn column(inv: &Invocation, _state: &mut CompileState) -> Result<String> {
    Ok(format!(
        "<div{}{}>{}</div>",
        class_attr(inv, "column"),
        style_attr(inv),
        inv.content
    ))
}

/// Split a raw code block into its `.syntax{language=x}` lead and body.
fn syntax_split(raw: &str) -> (Option<&str>, &str) {
    let trimmed = raw.trim_start();
    let Some(rest) = trimmed.strip_prefix(".syntax{") else {
        return (None, raw);
    };
    let Some(close) = rest.find('}') else {
        return (None, raw);
    };

    let value = &rest[..close];
    let language = value
        .strip_prefix("language")
        .and_then(|v| v.trim_start().strip_prefix('='))
        .map(str::trim)
        .filter(|v| !v.is_empty());

    (language, &rest[close + 1..])
}
