//! Side-channel directives that render nothing and mutate compilation
//! state: `.watermark{}`, `.navbutton{}`, `.css{}`, `.meta{}`. The reserved
//! modifier names are also registered here, as no-ops: the parser normally
//! extracts them before any handler runs.

use crate::compile::state::{CompileState, CssSize, NavEntry, NavZone, Position, Watermark};
use crate::error::{DeckError, Result};
use crate::registry::{Category, DirectiveSpec, Handler, Invocation};

use super::{invalid_value, kv_body};

pub(super) fn specs() -> Vec<DirectiveSpec> {
    let reserved = |name| DirectiveSpec {
        name,
        category: Category::Modifier,
        description: "Reserved modifier (parser-extracted)",
        handler: Handler::Fn(noop),
        is_wildcard: false,
        aliases: &[],
    };

    vec![
        DirectiveSpec {
            name: "watermark",
            category: Category::State,
            description: "Register a background watermark",
            handler: Handler::Fn(watermark),
            is_wildcard: false,
            aliases: &[],
        },
        DirectiveSpec {
            name: "navbutton",
            category: Category::State,
            description: "Register a navbar button",
            handler: Handler::Fn(navbutton),
            is_wildcard: false,
            aliases: &[],
        },
        DirectiveSpec {
            name: "css",
            category: Category::State,
            description: "Register custom CSS rules",
            handler: Handler::Fn(css),
            is_wildcard: false,
            aliases: &[],
        },
        DirectiveSpec {
            name: "meta",
            category: Category::State,
            description: "Set document metadata (title, theme, ...)",
            handler: Handler::Fn(meta),
            is_wildcard: false,
            aliases: &[],
        },
        reserved("style"),
        reserved("class"),
        reserved("syntax"),
    ]
}

/// `.watermark{image=logo.png; position=bottom-right; size=120px;
/// opacity=0.15; offset=10px 20px}`. Only `image` is required.
fn watermark(inv: &Invocation, state: &mut CompileState) -> Result<String> {
    let mut image = None;
    let mut position = Position::default();
    let mut size = CssSize::px(120.0);
    let mut opacity = 0.15f32;
    let mut offset = None;

    for (key, value) in kv_body(inv)? {
        match key.as_str() {
            "image" => image = Some(value),
            "position" => {
                position = value
                    .parse()
                    .map_err(|e| invalid_value(inv.name, "position", e))?;
            }
            "size" => {
                size = value
                    .parse()
                    .map_err(|e| invalid_value(inv.name, "size", e))?;
            }
            "opacity" => {
                opacity = value.parse().map_err(|_| {
                    invalid_value(inv.name, "opacity", format!("'{value}' is not a number"))
                })?;
                if !(0.0..=1.0).contains(&opacity) {
                    return Err(invalid_value(
                        inv.name,
                        "opacity",
                        format!("{opacity} is outside 0.0..=1.0"),
                    ));
                }
            }
            "offset" => {
                let (x, y) = value.split_once(char::is_whitespace).ok_or_else(|| {
                    invalid_value(
                        inv.name,
                        "offset",
                        format!("'{value}' is not a pair like '10px 20px'"),
                    )
                })?;
                let x: CssSize = x
                    .parse()
                    .map_err(|e| invalid_value(inv.name, "offset", e))?;
                let y: CssSize = y
                    .trim()
                    .parse()
                    .map_err(|e| invalid_value(inv.name, "offset", e))?;
                offset = Some((x, y));
            }
            other => {
                return Err(invalid_value(
                    inv.name,
                    "field",
                    format!("unknown key '{other}'"),
                ));
            }
        }
    }

    let image = image.ok_or_else(|| DeckError::Validation {
        directive: inv.name.to_string(),
        message: "missing required 'image' field".to_string(),
        help: Some("e.g. .watermark{image=logo.png}".to_string()),
    })?;

    state.watermarks.push(Watermark {
        image,
        position,
        size,
        opacity,
        offset,
    });

    Ok(String::new())
}

/// `.navbutton{label=Home; target=#slide-1; zone=left}`.
fn navbutton(inv: &Invocation, state: &mut CompileState) -> Result<String> {
    let mut label = None;
    let mut target = None;
    let mut zone = NavZone::default();

    for (key, value) in kv_body(inv)? {
        match key.as_str() {
            "label" => label = Some(value),
            "target" => target = Some(value),
            "zone" => {
                zone = value
                    .parse()
                    .map_err(|e| invalid_value(inv.name, "zone", e))?;
            }
            other => {
                return Err(invalid_value(
                    inv.name,
                    "field",
                    format!("unknown key '{other}'"),
                ));
            }
        }
    }

    let missing = |field: &str| DeckError::Validation {
        directive: inv.name.to_string(),
        message: format!("missing required '{field}' field"),
        help: Some("e.g. .navbutton{label=Home; target=#slide-1}".to_string()),
    };

    state.nav_entries.push(NavEntry {
        label: label.ok_or_else(|| missing("label"))?,
        target: target.ok_or_else(|| missing("target"))?,
        zone,
    });

    Ok(String::new())
}

fn css(inv: &Invocation, state: &mut CompileState) -> Result<String> {
    let rules = inv.content.trim();
    if !rules.is_empty() {
        state.custom_css.push_str(rules);
        state.custom_css.push('\n');
    }
    Ok(String::new())
}

fn meta(inv: &Invocation, state: &mut CompileState) -> Result<String> {
    for (key, value) in kv_body(inv)? {
        state.metadata.insert(key, value);
    }
    Ok(String::new())
}

fn noop(_inv: &Invocation, _state: &mut CompileState) -> Result<String> {
    Ok(String::new())
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
    fn test_watermark_full_descriptor() {
        let mut state = CompileState::new();
        let modifiers = Modifiers::new();

        let html = watermark(
            &inv(
                "watermark",
                &modifiers,
                "image=logo.png; position=top-left; size=10%; opacity=0.3; offset=10px 20px",
            ),
            &mut state,
        )
        .unwrap();

        assert!(html.is_empty());
        assert_eq!(state.watermarks.len(), 1);
        let w = &state.watermarks[0];
        assert_eq!(w.image, "logo.png");
        assert_eq!(w.position, Position::TopLeft);
        assert_eq!(w.size.to_string(), "10%");
        assert_eq!(w.opacity, 0.3);
        assert_eq!(
            w.offset,
            Some((CssSize::px(10.0), CssSize::px(20.0)))
        );
    }

    #[test]
    fn test_watermark_defaults() {
        let mut state = CompileState::new();
        let modifiers = Modifiers::new();

        watermark(&inv("watermark", &modifiers, "image=bg.svg"), &mut state).unwrap();

        let w = &state.watermarks[0];
        assert_eq!(w.position, Position::BottomRight);
        assert_eq!(w.size.to_string(), "120px");
        assert!(w.offset.is_none());
    }

    #[test]
    fn test_watermark_requires_image() {
        let mut state = CompileState::new();
        let modifiers = Modifiers::new();

        let err = watermark(&inv("watermark", &modifiers, "size=10px"), &mut state).unwrap_err();
        assert!(err.to_string().contains("image"), "{err}");
    }

    #[test]
    fn test_watermark_rejects_bad_size() {
        let mut state = CompileState::new();
        let modifiers = Modifiers::new();

        let err = watermark(
            &inv("watermark", &modifiers, "image=x.png; size=huge"),
            &mut state,
        )
        .unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("watermark"), "{msg}");
        assert!(msg.contains("size"), "{msg}");
    }

    #[test]
    fn test_watermark_rejects_out_of_range_opacity() {
        let mut state = CompileState::new();
        let modifiers = Modifiers::new();

        let err = watermark(
            &inv("watermark", &modifiers, "image=x.png; opacity=1.5"),
            &mut state,
        )
        .unwrap_err();
        assert!(err.to_string().contains("opacity"), "{err}");
    }

    #[test]
    fn test_navbutton_ordered_registration() {
        let mut state = CompileState::new();
        let modifiers = Modifiers::new();

        navbutton(
            &inv("navbutton", &modifiers, "label=Home; target=#slide-1; zone=left"),
            &mut state,
        )
        .unwrap();
        navbutton(
            &inv("navbutton", &modifiers, "label=End; target=#slide-9"),
            &mut state,
        )
        .unwrap();

        assert_eq!(state.nav_entries[0].label, "Home");
        assert_eq!(state.nav_entries[0].zone, NavZone::Left);
        assert_eq!(state.nav_entries[1].zone, NavZone::Right);
    }

    #[test]
    fn test_css_accumulates() {
        let mut state = CompileState::new();
        let modifiers = Modifiers::new();

        css(&inv("css", &modifiers, ".x { color: red }"), &mut state).unwrap();
        css(&inv("css", &modifiers, ".y { color: blue }"), &mut state).unwrap();

        assert_eq!(
            state.custom_css,
            ".x { color: red }\n.y { color: blue }\n"
        );
    }

    #[test]
    fn test_meta_sets_metadata() {
        let mut state = CompileState::new();
        let modifiers = Modifiers::new();

        meta(
            &inv("meta", &modifiers, "title=My Deck; theme=terminal"),
            &mut state,
        )
        .unwrap();

        assert_eq!(state.title(), Some("My Deck"));
        assert_eq!(state.theme(), Some("terminal"));
    }
}
