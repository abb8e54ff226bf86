//! Structural directives: `.slide{}`, `.title{}`, `.body{}`, `.comment{}`.

use crate::compile::state::CompileState;
use crate::error::Result;
use crate::registry::{Category, DirectiveSpec, Handler, Invocation};

use super::{class_attr, style_attr};

pub(super) fn specs() -> Vec<DirectiveSpec> {
    vec![
        DirectiveSpec {
            name: "slide",
            category: Category::Structural,
            description: "Defines a presentation slide",
            handler: Handler::Fn(slide),
            is_wildcard: false,
            aliases: &[],
        },
        DirectiveSpec {
            name: "title",
            category: Category::Structural,
            description: "Slide title",
            handler: Handler::Fn(passthrough),
            is_wildcard: false,
            aliases: &[],
        },
        DirectiveSpec {
            name: "body",
            category: Category::Structural,
            description: "Slide content container",
            handler: Handler::Fn(passthrough),
            is_wildcard: false,
            aliases: &[],
        },
        DirectiveSpec {
            name: "comment",
            category: Category::Structural,
            description: "Authoring note, omitted from output",
            handler: Handler::Fn(comment),
            is_wildcard: false,
            aliases: &[],
        },
    ]
}

/// Each slide is a hidden container div; the runtime JS shows slide 1 and
/// drives navigation by the `slide-{n}` ids.
fn slide(inv: &Invocation, state: &mut CompileState) -> Result<String> {
    state.slide_count += 1;
    let n = state.slide_count;

    let user_style = inv.modifiers.get("style").unwrap_or("");
    let style_attr = if user_style.is_empty() {
        "style=\"display:none;\"".to_string()
    } else {
        format!("style=\"display:none; {user_style}\"")
    };
    let class = class_attr(inv, "container slide");

    Ok(format!(
        "<div id=\"slide-{n}-title\" style=\"display: none;\"></div>\n\
         <div{class} id=\"slide-{n}\" name=\"slide-{n}\" {style_attr}>\n{}\n</div>",
        inv.content
    ))
}

fn passthrough(inv: &Invocation, _state: &mut CompileState) -> Result<String> {
    if inv.modifiers.is_empty() {
        Ok(inv.content.to_string())
    } else {
        Ok(format!(
            "<div{}{}>{}</div>",
            class_attr(inv, ""),
            style_attr(inv),
            inv.content
        ))
    }
}

fn comment(_inv: &Invocation, _state: &mut CompileState) -> Result<String> {
    Ok(String::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Modifiers;
    use crate::parser::Span;

    fn inv<'a>(name: &'a str, modifiers: &'a Modifiers, content: &'a str) -> Invocation<'a> {
        Invocation {
            name,
            modifiers,
            content,
            span: Span::default(),
        }
    }

    #[test]
    fn test_slide_increments_count_and_numbers_ids() {
        let mut state = CompileState::new();
        let modifiers = Modifiers::new();

        let first = slide(&inv("slide", &modifiers, "one"), &mut state).unwrap();
        let second = slide(&inv("slide", &modifiers, "two"), &mut state).unwrap();

        assert_eq!(state.slide_count, 2);
        assert!(first.contains("id=\"slide-1\""));
        assert!(second.contains("id=\"slide-2\""));
        assert!(first.contains("display:none"));
    }

    #[test]
    fn test_slide_merges_user_style() {
        let mut state = CompileState::new();
        let mut modifiers = Modifiers::new();
        modifiers.set("style", "background: black");

        let html = slide(&inv("slide", &modifiers, "x"), &mut state).unwrap();
        assert!(html.contains("style=\"display:none; background: black\""));
    }

    #[test]
    fn test_body_without_modifiers_is_passthrough() {
        let mut state = CompileState::new();
        let modifiers = Modifiers::new();

        let html = passthrough(&inv("body", &modifiers, "content"), &mut state).unwrap();
        assert_eq!(html, "content");
    }

    #[test]
    fn test_body_with_style_wraps_in_div() {
        let mut state = CompileState::new();
        let mut modifiers = Modifiers::new();
        modifiers.set("style", "color: red");

        let html = passthrough(&inv("body", &modifiers, "content"), &mut state).unwrap();
        assert_eq!(html, "<div style=\"color: red\">content</div>");
    }

    #[test]
    fn test_comment_renders_nothing() {
        let mut state = CompileState::new();
        let modifiers = Modifiers::new();

        let html = comment(&inv("comment", &modifiers, "note to self"), &mut state).unwrap();
        assert!(html.is_empty());
    }
}
