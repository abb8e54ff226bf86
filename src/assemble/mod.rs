//! Document assembly.
//!
//! Takes the compiled slide HTML plus the accumulated compilation state and
//! produces the complete `index.html`: head with stylesheet links and inline
//! CSS, navbar, slide-count metadata, watermarks, and the runtime script tag.

pub mod assets;

use std::fmt::Write;

use crate::compile::state::{CompileState, NavZone};
use crate::registry::handlers::html_escape;
use crate::theme::Theme;

/// Assemble the full HTML document around a compiled slide body.
pub fn html_document(body: &str, state: &CompileState, theme: Option<&Theme>) -> String {
    let title = html_escape(state.title().unwrap_or("Presentation"));

    let theme_link = match theme.and_then(Theme::css_path) {
        Some(_) => "\n    <link rel=\"stylesheet\" href=\"css/theme.css\">",
        None => "",
    };

    let inline = inline_css(state);
    let style_block = if inline.is_empty() {
        String::new()
    } else {
        format!("\n    <style>\n{inline}    </style>")
    };

    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         \x20   <meta charset=\"utf-8\">\n\
         \x20   <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         \x20   <title>{title}</title>\n\
         \x20   <link rel=\"stylesheet\" href=\"css/deck.css\">{theme_link}{style_block}\n\
         </head>\n\
         <body>\n\
         \x20   <div class=\"metaData\" id=\"numberOfSlides\" style=\"display: none;\">{count}</div>\n\
         \x20   <div class=\"metaData\" id=\"slideIDprefix\" style=\"display: none;\">slide-</div>\n\
         {navbar}{watermarks}\
         \x20   <div class=\"formLayout\">\n\
         {body}\n\
         \x20   </div>\n\
         \x20   <script src=\"js/deck.js\"></script>\n\
         </body>\n\
         </html>\n",
        count = state.slide_count,
        navbar = navbar(state),
        watermarks = watermark_divs(state),
    )
}

/// Watermark placement rules plus any `.css{}` rules, for the inline
/// `<style>` block.
fn inline_css(state: &CompileState) -> String {
    let mut css = String::new();

    for (index, wm) in state.watermarks.iter().enumerate() {
        let n = index + 1;
        let _ = write!(
            css,
            "    .watermark-{n} {{ position: fixed; {} width: {}; opacity: {}; \
             pointer-events: none; z-index: 100; }}\n",
            wm.position.css(),
            wm.size,
            wm.opacity,
        );
        if let Some((x, y)) = wm.offset {
            let _ = write!(css, "    .watermark-{n} img {{ margin: {y} {x}; }}\n");
        }
    }

    if !state.custom_css.is_empty() {
        for line in state.custom_css.lines() {
            css.push_str("    ");
            css.push_str(line);
            css.push('\n');
        }
    }

    css
}

/// Navbar with its three zones; registered buttons land in their zone.
fn navbar(state: &CompileState) -> String {
    let mut html = String::from("    <nav class=\"navbar\">\n");

    for zone in [NavZone::Left, NavZone::Center, NavZone::Right] {
        let _ = write!(
            html,
            "        <div class=\"navbar-zone navbar-{}\">\n",
            zone.as_str()
        );
        for entry in state.nav_entries.iter().filter(|e| e.zone == zone) {
            let _ = write!(
                html,
                "            <a class=\"navbar-button\" href=\"{}\">{}</a>\n",
                entry.target,
                html_escape(&entry.label)
            );
        }
        html.push_str("        </div>\n");
    }

    html.push_str("    </nav>\n");
    html
}

fn watermark_divs(state: &CompileState) -> String {
    let mut html = String::new();
    for (index, wm) in state.watermarks.iter().enumerate() {
        let _ = write!(
            html,
            "    <div class=\"watermark watermark-{}\"><img src=\"{}\" alt=\"\"></div>\n",
            index + 1,
            wm.image
        );
    }
    html
}
