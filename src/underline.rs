//! Underline codec
//!
//! Markdown has no native underline syntax, so underline is round-tripped
//! through emphasis: the Underline command wraps the selection in single
//! underscore delimiters, and at render time every emphasis node whose exact
//! source substring is underscore-delimited draws underlined instead of
//! italic.
//!
//! The mapping is purely syntactic. `_world_` typed by hand is
//! indistinguishable from underline produced by the command; both render
//! underlined. That ambiguity is inherent to reusing emphasis delimiters and
//! is preserved deliberately: disambiguating (say, with a marker character)
//! would change the stored value's round-trip semantics.

/// The delimiter underline borrows from emphasis.
pub const DELIMITER: char = '_';

/// How an emphasis node should be drawn in the preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanStyle {
    /// Ordinary emphasis (italic).
    Emphasis,
    /// Underline decoration.
    Underline,
}

/// Encode a selection for the Underline command.
///
/// Wraps the selected text in single underscores; an empty selection yields
/// a lone delimiter for the user to complete.
pub fn encode(selected: &str) -> String {
    if selected.is_empty() {
        DELIMITER.to_string()
    } else {
        format!("{}{}{}", DELIMITER, selected, DELIMITER)
    }
}

/// Classify an emphasis node by the exact source substring it spans.
///
/// Returns [`SpanStyle::Underline`] iff the substring literally starts and
/// ends with the underscore delimiter; everything else is ordinary emphasis.
pub fn classify_span(span: &str) -> SpanStyle {
    if span.starts_with(DELIMITER) && span.ends_with(DELIMITER) {
        SpanStyle::Underline
    } else {
        SpanStyle::Emphasis
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
