//! Shared compilation state threaded through the tree walk.
//!
//! One [`CompileState`] is created per compile call, passed `&mut` through
//! every node visit, and handed read-only to the document assembler once
//! the walk completes. Handlers use it for counters (slide, snippet,
//! typewriter numbering) and for side-channel outputs the final document
//! needs (watermarks, navbar entries, custom CSS, metadata).

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Mutable aggregate accumulated during one compilation.
#[derive(Debug, Default)]
pub struct CompileState {
    /// Number of slides whose handler has run.
    pub slide_count: u32,
    /// Per-slide progressive-reveal snippet counters.
    snippet_counters: HashMap<u32, u32>,
    /// Per-slide typewriter counters.
    typewriter_counters: HashMap<u32, u32>,
    /// Watermark descriptors, in registration order.
    pub watermarks: Vec<Watermark>,
    /// Navbar entries, in registration order.
    pub nav_entries: Vec<NavEntry>,
    /// Accumulated `.css{}` rule text.
    pub custom_css: String,
    /// Document metadata (`title`, `theme`, author keys).
    pub metadata: BTreeMap<String, String>,
    /// Raw content of protected code blocks, copied from the parse.
    pub protected_code: HashMap<usize, String>,
    /// Optional directory with `.flf` FIGlet fonts.
    pub fonts_dir: Option<PathBuf>,
}

impl CompileState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The slide currently being compiled (1-based).
    ///
    /// The walk is post-order, so `slide_count` only includes *finished*
    /// slides; effects rendering inside a slide belong to the next one.
    pub fn current_slide(&self) -> u32 {
        self.slide_count + 1
    }

    /// Next snippet number on `slide` (1-based).
    pub fn next_snippet(&mut self, slide: u32) -> u32 {
        let counter = self.snippet_counters.entry(slide).or_insert(0);
        *counter += 1;
        *counter
    }

    /// Next typewriter number on `slide` (1-based).
    pub fn next_typewriter(&mut self, slide: u32) -> u32 {
        let counter = self.typewriter_counters.entry(slide).or_insert(0);
        *counter += 1;
        *counter
    }

    /// Deck title from metadata, if `.meta{title=...}` was seen.
    pub fn title(&self) -> Option<&str> {
        self.metadata.get("title").map(|s| s.as_str())
    }

    /// Theme name from metadata, if `.meta{theme=...}` was seen.
    pub fn theme(&self) -> Option<&str> {
        self.metadata.get("theme").map(|s| s.as_str())
    }
}

/// A watermark registered by `.watermark{}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Watermark {
    /// Image reference (path or URL, emitted verbatim).
    pub image: String,
    pub position: Position,
    pub size: CssSize,
    /// 0.0..=1.0
    pub opacity: f32,
    /// Optional (horizontal, vertical) offset from the anchor position.
    pub offset: Option<(CssSize, CssSize)>,
}

/// Watermark anchor keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    TopLeft,
    Top,
    TopRight,
    Left,
    Center,
    Right,
    BottomLeft,
    Bottom,
    #[default]
    BottomRight,
}

impl Position {
    /// CSS `top/bottom/left/right/transform` declarations for this anchor.
    pub fn css(&self) -> &'static str {
        match self {
            Position::TopLeft => "top: 0; left: 0;",
            Position::Top => "top: 0; left: 50%; transform: translateX(-50%);",
            Position::TopRight => "top: 0; right: 0;",
            Position::Left => "top: 50%; left: 0; transform: translateY(-50%);",
            Position::Center => "top: 50%; left: 50%; transform: translate(-50%, -50%);",
            Position::Right => "top: 50%; right: 0; transform: translateY(-50%);",
            Position::BottomLeft => "bottom: 0; left: 0;",
            Position::Bottom => "bottom: 0; left: 50%; transform: translateX(-50%);",
            Position::BottomRight => "bottom: 0; right: 0;",
        }
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top-left" => Ok(Position::TopLeft),
            "top" => Ok(Position::Top),
            "top-right" => Ok(Position::TopRight),
            "left" => Ok(Position::Left),
            "center" => Ok(Position::Center),
            "right" => Ok(Position::Right),
            "bottom-left" => Ok(Position::BottomLeft),
            "bottom" => Ok(Position::Bottom),
            "bottom-right" => Ok(Position::BottomRight),
            other => Err(format!(
                "'{other}' is not a position keyword (expected e.g. top-left, center, bottom-right)"
            )),
        }
    }
}

/// A CSS length: numeric value plus a recognized unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CssSize {
    pub value: f32,
    pub unit: CssUnit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CssUnit {
    Px,
    Em,
    Rem,
    Percent,
    Vw,
    Vh,
    Pt,
}

impl CssUnit {
    fn as_str(&self) -> &'static str {
        match self {
            CssUnit::Px => "px",
            CssUnit::Em => "em",
            CssUnit::Rem => "rem",
            CssUnit::Percent => "%",
            CssUnit::Vw => "vw",
            CssUnit::Vh => "vh",
            CssUnit::Pt => "pt",
        }
    }
}

impl CssSize {
    pub fn px(value: f32) -> Self {
        Self {
            value,
            unit: CssUnit::Px,
        }
    }
}

impl fmt::Display for CssSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.as_str())
    }
}

impl FromStr for CssSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| !c.is_ascii_digit() && c != '.' && c != '-')
            .ok_or_else(|| format!("'{s}' has no CSS unit (expected e.g. 120px, 10%)"))?;

        let (number, unit) = s.split_at(split);
        let value: f32 = number
            .parse()
            .map_err(|_| format!("'{s}' has no numeric value"))?;

        let unit = match unit {
            "px" => CssUnit::Px,
            "em" => CssUnit::Em,
            "rem" => CssUnit::Rem,
            "%" => CssUnit::Percent,
            "vw" => CssUnit::Vw,
            "vh" => CssUnit::Vh,
            "pt" => CssUnit::Pt,
            other => return Err(format!("'{other}' is not a recognized CSS unit")),
        };

        Ok(CssSize { value, unit })
    }
}

/// Navbar zone a button belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavZone {
    Left,
    Center,
    #[default]
    Right,
}

impl NavZone {
    pub fn as_str(&self) -> &'static str {
        match self {
            NavZone::Left => "left",
            NavZone::Center => "center",
            NavZone::Right => "right",
        }
    }
}

impl FromStr for NavZone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(NavZone::Left),
            "center" => Ok(NavZone::Center),
            "right" => Ok(NavZone::Right),
            other => Err(format!(
                "'{other}' is not a navbar zone (expected left, center, or right)"
            )),
        }
    }
}

/// A navbar button registered by `.navbutton{}`.
#[derive(Debug, Clone, PartialEq)]
pub struct NavEntry {
    pub label: String,
    /// Href target (slide anchor or URL), emitted verbatim.
    pub target: String,
    pub zone: NavZone,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_counters_are_per_slide() {
        let mut state = CompileState::new();

        assert_eq!(state.next_snippet(1), 1);
        assert_eq!(state.next_snippet(1), 2);
        assert_eq!(state.next_snippet(2), 1);
        assert_eq!(state.next_snippet(1), 3);
    }

    #[test]
    fn test_css_size_parsing() {
        assert_eq!("120px".parse::<CssSize>().unwrap(), CssSize::px(120.0));
        assert_eq!(
            "10%".parse::<CssSize>().unwrap(),
            CssSize {
                value: 10.0,
                unit: CssUnit::Percent
            }
        );
        assert_eq!("2.5em".parse::<CssSize>().unwrap().to_string(), "2.5em");
    }

    #[test]
    fn test_css_size_rejects_bad_input() {
        assert!("120".parse::<CssSize>().is_err());
        assert!("px".parse::<CssSize>().is_err());
        assert!("12parsecs".parse::<CssSize>().is_err());
        assert!("".parse::<CssSize>().is_err());
    }

    #[test]
    fn test_position_keywords() {
        assert_eq!("center".parse::<Position>().unwrap(), Position::Center);
        assert_eq!(
            "bottom-right".parse::<Position>().unwrap(),
            Position::BottomRight
        );
        assert!("middle".parse::<Position>().is_err());
    }

    #[test]
    fn test_nav_zone_parsing() {
        assert_eq!("left".parse::<NavZone>().unwrap(), NavZone::Left);
        assert!("top".parse::<NavZone>().is_err());
    }
}
