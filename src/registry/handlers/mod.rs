//! Built-in directive handlers.
//!
//! Each submodule contributes the specs for one category; `builtin_specs`
//! is the single list the registry is populated from. Shared rendering
//! helpers (attribute building, HTML escaping, key=value bodies) live here.

mod art;
mod core;
mod effects;
mod formatting;
mod state;

use crate::error::{DeckError, Result};

use super::{DirectiveSpec, Invocation};

/// Every built-in directive spec, registration order.
pub fn builtin_specs() -> Vec<DirectiveSpec> {
    let mut specs = Vec::new();
    specs.extend(core::specs());
    specs.extend(formatting::specs());
    specs.extend(effects::specs());
    specs.extend(art::specs());
    specs.extend(state::specs());
    specs
}

/// Render `<tag ...>content</tag>` honoring style/class modifiers.
pub fn wrap_tag(tag: &str, inv: &Invocation) -> String {
    format!(
        "<{tag}{}{}>{}</{tag}>",
        class_attr(inv, ""),
        style_attr(inv),
        inv.content
    )
}

/// ` style="..."` attribute from the style/align/width modifiers, or "".
pub fn style_attr(inv: &Invocation) -> String {
    let mut rules = Vec::new();

    if let Some(style) = inv.modifiers.get("style") {
        rules.push(style.trim_end_matches(';').to_string());
    }
    if let Some(align) = inv.modifiers.get("align") {
        rules.push(format!("text-align: {align}"));
    }
    if let Some(width) = inv.modifiers.get("width") {
        rules.push(format!("width: {width}"));
    }

    if rules.is_empty() {
        String::new()
    } else {
        format!(" style=\"{}\"", rules.join("; "))
    }
}

/// ` class="..."` attribute combining `base` classes with the class
/// modifier, or "" when both are empty.
pub fn class_attr(inv: &Invocation, base: &str) -> String {
    let extra = inv.modifiers.get("class").unwrap_or("");
    let combined = match (base.is_empty(), extra.is_empty()) {
        (true, true) => return String::new(),
        (false, true) => base.to_string(),
        (true, false) => extra.to_string(),
        (false, false) => format!("{base} {extra}"),
    };
    format!(" class=\"{combined}\"")
}

/// Escape `&`, `<` and `>` for literal HTML display.
pub fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Parse a `key=value; key=value` directive body.
///
/// Empty segments are skipped; a segment without `=` is a validation error
/// naming the directive.
pub fn kv_body(inv: &Invocation) -> Result<Vec<(String, String)>> {
    let mut pairs = Vec::new();

    for part in inv.content.split(';') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let (key, value) = part.split_once('=').ok_or_else(|| DeckError::Validation {
            directive: inv.name.to_string(),
            message: format!("expected key=value, got '{part}'"),
            help: Some("separate entries with ';', e.g. image=logo.png; size=120px".to_string()),
        })?;
        pairs.push((key.trim().to_string(), value.trim().to_string()));
    }

    Ok(pairs)
}

/// Validation error for a bad modifier or field value.
pub fn invalid_value(directive: &str, field: &str, detail: String) -> DeckError {
    DeckError::Validation {
        directive: directive.to_string(),
        message: format!("invalid {field}: {detail}"),
        help: None,
    }
}
