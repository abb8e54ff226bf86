//! ASCII art rendering leaves: FIGlet banners and speech bubbles.
//!
//! These back the `font-*` and `cowpy-*` transform directives. The FIGlet
//! standard font ships embedded with figlet-rs; other fonts are looked up
//! as `<name>.flf` files in an optional fonts directory.

use std::path::Path;

use figlet_rs::FIGfont;

/// Render `text` as FIGlet ASCII art in the named font.
///
/// Returns `None` when the font cannot be loaded or the text cannot be
/// converted; callers decide the fallback.
pub fn figlet(font_name: &str, text: &str, fonts_dir: Option<&Path>) -> Option<String> {
    let font = if font_name == "standard" {
        FIGfont::standard().ok()?
    } else {
        let path = fonts_dir?.join(format!("{font_name}.flf"));
        FIGfont::from_file(path.to_str()?).ok()?
    };

    font.convert(text).map(|figure| figure.to_string())
}

/// Render `text` inside a speech bubble spoken by a built-in character.
pub fn cowsay(character: &str, text: &str) -> Option<String> {
    let figure = match character {
        "cow" | "default" => COW,
        "tux" => TUX,
        _ => return None,
    };

    let mut out = bubble(text);
    out.push_str(figure);
    Some(out)
}

/// Names `cowsay` knows.
pub fn cowsay_characters() -> &'static [&'static str] {
    &["cow", "default", "tux"]
}

/// The classic cowsay speech bubble around `text`, one bubble line per
/// input line.
fn bubble(text: &str) -> String {
    let lines: Vec<&str> = if text.is_empty() {
        vec![""]
    } else {
        text.lines().collect()
    };
    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    out.push(' ');
    out.push_str(&"_".repeat(width + 2));
    out.push('\n');

    let count = lines.len();
    for (i, line) in lines.iter().enumerate() {
        let (open, close) = match (count, i) {
            (1, _) => ('<', '>'),
            (_, 0) => ('/', '\\'),
            (_, i) if i == count - 1 => ('\\', '/'),
            _ => ('|', '|'),
        };
        let padding = " ".repeat(width - line.chars().count());
        out.push_str(&format!("{open} {line}{padding} {close}\n"));
    }

    out.push(' ');
    out.push_str(&"-".repeat(width + 2));
    out.push('\n');
    out
}

const COW: &str = r"        \   ^__^
         \  (oo)\_______
            (__)\       )\/\
                ||----w |
                ||     ||
";

const TUX: &str = r"   \
    \
        .--.
       |o_o |
       |:_/ |
      //   \ \
     (|     | )
    /'\_   _/`\
    \___)=(___/
";
