//! Transform directives: `.font-*{}` FIGlet banners and `.cowpy-*{}`
//! speech bubbles.
//!
//! Both are wildcards; the suffix after the prefix names the font or the
//! character. An unknown font or character renders an error `<pre>` with
//! the original text instead of aborting compilation.

use crate::art;
use crate::compile::state::CompileState;
use crate::error::Result;
use crate::registry::{Category, DirectiveSpec, Handler, Invocation};

use super::html_escape;

pub(super) fn specs() -> Vec<DirectiveSpec> {
    vec![
        DirectiveSpec {
            name: "font-*",
            category: Category::Transform,
            description: "FIGlet ASCII art (e.g. .font-standard{Text})",
            handler: Handler::Fn(figlet),
            is_wildcard: true,
            aliases: &[],
        },
        DirectiveSpec {
            name: "cowpy-*",
            category: Category::Transform,
            description: "ASCII speech bubbles (e.g. .cowpy-cow{Moo!})",
            handler: Handler::Fn(cowpy),
            is_wildcard: true,
            aliases: &[],
        },
    ]
}

fn figlet(inv: &Invocation, state: &mut CompileState) -> Result<String> {
    let font = inv.name.strip_prefix("font-").unwrap_or("standard");

    let html = match art::figlet(font, inv.content, state.fonts_dir.as_deref()) {
        Some(banner) => format!("<pre class=\"figlet\">{}</pre>", html_escape(&banner)),
        None => format!(
            "<pre>ERROR: figlet font \"{font}\" not found\n{}</pre>",
            html_escape(inv.content)
        ),
    };

    Ok(html)
}

fn cowpy(inv: &Invocation, _state: &mut CompileState) -> Result<String> {
    let character = inv.name.strip_prefix("cowpy-").unwrap_or("default");

    let html = match art::cowsay(character, inv.content) {
        Some(speech) => format!("<pre class=\"cowsay\">{}</pre>", html_escape(&speech)),
        None => format!(
            "<pre>ERROR: cowsay character \"{character}\" not found\n{}</pre>",
            html_escape(inv.content)
        ),
    };

    Ok(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{Modifiers, Span};

    fn inv<'a>(name: &'a str, modifiers: &'a Modifiers, content: &'a str) -> Invocation<'a> {
        Invocation {
            name,
            modifiers,
            content,
            span: Span::default(),
        }
    }

    #[test]
    fn test_font_standard_renders_banner() {
        let mut state = CompileState::new();
        let modifiers = Modifiers::new();

        let html = figlet(&inv("font-standard", &modifiers, "Hi"), &mut state).unwrap();
        assert!(html.starts_with("<pre class=\"figlet\">"));
        assert!(!html.contains("ERROR"));
    }

    #[test]
    fn test_font_unknown_falls_back() {
        let mut state = CompileState::new();
        let modifiers = Modifiers::new();

        let html = figlet(&inv("font-nosuch", &modifiers, "Hi"), &mut state).unwrap();
        assert!(html.contains("ERROR: figlet font \"nosuch\" not found"));
        assert!(html.contains("Hi"));
    }

    #[test]
    fn test_cowpy_cow_speaks() {
        let mut state = CompileState::new();
        let modifiers = Modifiers::new();

        let html = cowpy(&inv("cowpy-cow", &modifiers, "Moo!"), &mut state).unwrap();
        assert!(html.contains("&lt; Moo! &gt;"));
    }

    #[test]
    fn test_cowpy_unknown_falls_back() {
        let mut state = CompileState::new();
        let modifiers = Modifiers::new();

        let html = cowpy(&inv("cowpy-gopher", &modifiers, "hm"), &mut state).unwrap();
        assert!(html.contains("ERROR: cowsay character \"gopher\" not found"));
    }
}
