//! Internal placeholder tokens.
//!
//! Three kinds of marker stand in for deferred content while the pipeline
//! runs: child markers (a directive child's not-yet-substituted rendered
//! output), code markers (protected `.code{}` blocks), and escape markers
//! (backslash-escaped literals). All are built from control characters so
//! they cannot collide with authored text, and every marker inserted must
//! be substituted exactly once before output is final.

/// Marker delimiter for child and code placeholders.
pub const CHILD_MARK: char = '\u{0}';
/// Marker delimiter for escape placeholders.
pub const ESC_MARK: char = '\u{1}';

/// Placeholder for a directive child's rendered output at `index`.
pub fn child(index: usize) -> String {
    format!("{CHILD_MARK}CHILD_{index}{CHILD_MARK}")
}

/// Placeholder for a protected code block at `index`.
pub fn code(index: usize) -> String {
    format!("{CHILD_MARK}CODE_{index}{CHILD_MARK}")
}

/// Placeholder for an escaped literal at `index`.
pub fn escape(index: usize) -> String {
    format!("{ESC_MARK}ESC_{index}{ESC_MARK}")
}

/// Extract the index from a code placeholder, if `text` is exactly one.
pub fn parse_code_index(text: &str) -> Option<usize> {
    let inner = text
        .strip_prefix(CHILD_MARK)?
        .strip_suffix(CHILD_MARK)?
        .strip_prefix("CODE_")?;
    inner.parse().ok()
}

/// Whether any internal marker survives in `text`.
///
/// Used as the final leak check: a surviving marker means a placeholder was
/// inserted but never substituted, which is a pipeline bug or a malformed
/// document that must not reach output.
pub fn contains_marker(text: &str) -> bool {
    text.contains(CHILD_MARK) || text.contains(ESC_MARK)
}
