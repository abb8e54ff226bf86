//! Backslash-escape protection and expansion.
//!
//! Directive syntax uses reserved punctuation (`.`, `{`, `}`, `>`, `<`,
//! `&`) that authors sometimes need literally. Before parsing, every
//! `\<reserved>` pair is swapped for a placeholder token; after
//! compilation the tokens are replaced with the bare literal character.
//! The parser itself is never escape-aware.
//!
//! # Example
//!
//! ```ignore
//! let (protected, escapes) = protect(r"\.bf\{bold\}");
//! // protected contains no directive syntax; the parser sees plain text
//! let restored = expand(&protected, &escapes)?;
//! assert_eq!(restored, ".bf{bold}");
//! ```

use crate::error::{DeckError, Result};
use crate::placeholder;

/// Characters that may be backslash-escaped.
const RESERVED: &[char] = &['.', '{', '}', '>', '<', '&'];

/// Recorded escapes from one `protect` pass, keyed by placeholder index.
#[derive(Debug, Clone, Default)]
pub struct EscapeMap {
    literals: Vec<String>,
}

impl EscapeMap {
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// The literal recorded for placeholder `index`.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.literals.get(index).map(|s| s.as_str())
    }
}

/// Replace every `\<reserved-char>` pair with a fresh placeholder token.
///
/// The recorded literal is the character alone; the backslash is consumed.
/// A backslash before any other character, or a trailing backslash, passes
/// through untouched. Never fails.
pub fn protect(text: &str) -> (String, EscapeMap) {
    let mut out = String::with_capacity(text.len());
    let mut map = EscapeMap::default();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.peek() {
                Some(&next) if RESERVED.contains(&next) => {
                    chars.next();
                    out.push_str(&placeholder::escape(map.literals.len()));
                    map.literals.push(next.to_string());
                }
                _ => out.push(c),
            }
        } else {
            out.push(c);
        }
    }

    (out, map)
}

/// Restore every escape placeholder in `text` to its recorded literal.
///
/// This is the last transform in the pipeline, so it also enforces the
/// no-leak invariant: any internal marker still present after restoration
/// means a placeholder was never substituted, and the whole compilation
/// fails rather than emitting the marker.
pub fn expand(text: &str, escapes: &EscapeMap) -> Result<String> {
    let mut out = text.to_string();

    for (index, literal) in escapes.literals.iter().enumerate() {
        out = out.replace(&placeholder::escape(index), literal);
    }

    if placeholder::contains_marker(&out) {
        return Err(DeckError::Build {
            message: "unresolved placeholder leaked into output".to_string(),
            help: Some(
                "an internal CHILD/CODE/ESC marker was inserted but never substituted; \
                 this usually means a directive handler dropped its content"
                    .to_string(),
            ),
        });
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_round_trip_identity() {
        let source = r"literal \.bf\{bold\} and \> and \< and \& and \} here";

        let (protected, escapes) = protect(source);
        assert_eq!(escapes.len(), 7);
        assert!(!protected.contains('\\'));

        let restored = expand(&protected, &escapes).unwrap();
        assert_eq!(restored, "literal .bf{bold} and > and < and & and } here");
    }

    #[test]
    fn test_protect_hides_directive_syntax() {
        let (protected, _) = protect(r"\.slide\{x\}");
        assert!(!protected.contains(".slide"));
        assert!(!protected.contains('{'));
        assert!(!protected.contains('}'));
    }

    #[test]
    fn test_trailing_backslash_passes_through() {
        let (protected, escapes) = protect("path\\");
        assert_eq!(protected, "path\\");
        assert!(escapes.is_empty());
    }

    #[test]
    fn test_backslash_before_plain_char_passes_through() {
        let (protected, escapes) = protect(r"C:\nothing \x");
        assert_eq!(protected, r"C:\nothing \x");
        assert!(escapes.is_empty());
    }

    #[test]
    fn test_expand_idempotent_without_placeholders() {
        let escapes = EscapeMap::default();
        assert_eq!(expand("plain text", &escapes).unwrap(), "plain text");
    }

    #[test]
    fn test_expand_rejects_leaked_marker() {
        let escapes = EscapeMap::default();
        let leaky = format!("before {} after", crate::placeholder::child(0));

        let err = expand(&leaky, &escapes).unwrap_err();
        assert!(err.to_string().contains("placeholder"));
    }

    #[test]
    fn test_escaped_greater_than_stays_literal() {
        let (protected, escapes) = protect(r"\> go");
        let restored = expand(&protected, &escapes).unwrap();
        assert_eq!(restored, "> go");
    }
}
