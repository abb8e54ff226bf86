//! Effect directives: progressive reveal (`.o{}`) and `.typewriter{}`.

use crate::compile::state::CompileState;
use crate::error::Result;
use crate::registry::{Category, DirectiveSpec, Handler, Invocation};

use super::style_attr;

pub(super) fn specs() -> Vec<DirectiveSpec> {
    vec![
        DirectiveSpec {
            name: "o",
            category: Category::Effect,
            description: "Progressive reveal bullet (snippet)",
            handler: Handler::Fn(snippet),
            is_wildcard: false,
            aliases: &[],
        },
        DirectiveSpec {
            name: "typewriter",
            category: Category::Effect,
            description: "Character-by-character typing animation",
            handler: Handler::Fn(typewriter),
            is_wildcard: false,
            aliases: &[],
        },
    ]
}

/// Snippets reveal one by one as the viewer advances. Element ids are
/// 1-based (`order-{slide}-{n}`, what the runtime JS walks); the
/// `data-reveal` attribute carries the 0-based reveal index.
fn snippet(inv: &Invocation, state: &mut CompileState) -> Result<String> {
    let slide = state.current_slide();
    let n = state.next_snippet(slide);

    Ok(format!(
        "<div class=\"snippet\" id=\"order-{slide}-{n}\" data-reveal=\"{}\"{}>{}</div>",
        n - 1,
        style_attr(inv),
        inv.content
    ))
}

/// The first typewriter on a slide keeps the bare `typewriter-{slide}` id
/// the runtime JS expects; later ones get a `-{n}` suffix.
fn typewriter(inv: &Invocation, state: &mut CompileState) -> Result<String> {
    let slide = state.current_slide();
    let n = state.next_typewriter(slide);

    let id = if n == 1 {
        format!("typewriter-{slide}")
    } else {
        format!("typewriter-{slide}-{n}")
    };

    Ok(format!(
        "<pre id=\"{id}\"{}>{}</pre>",
        style_attr(inv),
        inv.content
    ))
}
