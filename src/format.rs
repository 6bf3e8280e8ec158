//! Formatting operations behind the toolbar commands
//!
//! Every formatting command is a pure function from `(text, selection)` to a
//! [`FormatResult`], so the effects are unit-testable without the editing
//! surface. Byte indices come from egui cursor state and are clamped to
//! UTF-8 character boundaries before slicing.

use crate::commands::EditorCommand;
use crate::text::clamp_range;
use crate::underline;

// ─────────────────────────────────────────────────────────────────────────────
// Format Result
// ─────────────────────────────────────────────────────────────────────────────

/// Result of applying a formatting command.
#[derive(Debug, Clone)]
pub struct FormatResult {
    /// The new text after formatting.
    pub text: String,
    /// New cursor position (byte index).
    pub cursor: usize,
    /// New selection range (start, end) if one should be restored.
    pub selection: Option<(usize, usize)>,
    /// Whether formatting was applied (vs toggled off or skipped).
    pub applied: bool,
}

impl FormatResult {
    fn with_cursor(text: String, cursor: usize) -> Self {
        Self {
            text,
            cursor,
            selection: None,
            applied: true,
        }
    }

    fn with_selection(text: String, start: usize, end: usize) -> Self {
        Self {
            text,
            cursor: end,
            selection: Some((start, end)),
            applied: true,
        }
    }

    fn toggled_off(mut self) -> Self {
        self.applied = false;
        self
    }

    fn not_applied(mut self) -> Self {
        self.applied = false;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Dispatch
// ─────────────────────────────────────────────────────────────────────────────

/// Apply a formatting command to `text` with an optional selection.
///
/// View-control commands (`EditOnly`, `LivePreview`, `PreviewOnly`,
/// `ToggleFullscreen`) are not text operations and return the input
/// unchanged; the widget routes them elsewhere.
pub fn apply_command(
    text: &str,
    selection: Option<(usize, usize)>,
    command: EditorCommand,
) -> FormatResult {
    match command {
        EditorCommand::Bold => wrap_inline(text, selection, "**"),
        EditorCommand::Italic => wrap_inline(text, selection, "*"),
        EditorCommand::Strikethrough => wrap_inline(text, selection, "~~"),
        EditorCommand::InlineCode => wrap_inline(text, selection, "`"),
        EditorCommand::Underline => apply_underline(text, selection),
        EditorCommand::Link => insert_link(text, selection, false),
        EditorCommand::Image => insert_link(text, selection, true),
        EditorCommand::Heading(level) => prefix_line(text, selection, &heading_marker(level)),
        EditorCommand::Quote => prefix_line(text, selection, "> "),
        EditorCommand::BulletList => prefix_line(text, selection, "- "),
        EditorCommand::NumberedList => prefix_line(text, selection, "1. "),
        EditorCommand::CodeBlock => fence_lines(text, selection),
        EditorCommand::HorizontalRule => insert_rule(text, selection),
        EditorCommand::EditOnly
        | EditorCommand::LivePreview
        | EditorCommand::PreviewOnly
        | EditorCommand::ToggleFullscreen => {
            FormatResult::with_cursor(text.to_string(), text.len()).not_applied()
        }
    }
}

fn heading_marker(level: u8) -> String {
    format!("{} ", "#".repeat(level.clamp(1, 6) as usize))
}

// ─────────────────────────────────────────────────────────────────────────────
// Underline (replace-selection semantics)
// ─────────────────────────────────────────────────────────────────────────────

/// The Underline command: replace the selection with the selection wrapped
/// in single underscore delimiters, leaving the inner text selected for
/// further edits. An empty selection inserts a lone delimiter.
fn apply_underline(text: &str, selection: Option<(usize, usize)>) -> FormatResult {
    let (start, end) = selection_or_end(text, selection);
    let selected = &text[start..end];
    let encoded = underline::encode(selected);
    let new_text = format!("{}{}{}", &text[..start], encoded, &text[end..]);
    if selected.is_empty() {
        FormatResult::with_cursor(new_text, start + encoded.len())
    } else {
        FormatResult::with_selection(new_text, start + 1, start + 1 + selected.len())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Inline Wrapping
// ─────────────────────────────────────────────────────────────────────────────

/// Wrap the selection in a symmetric delimiter, toggling off when the
/// selection (or its surroundings) already carries it.
fn wrap_inline(text: &str, selection: Option<(usize, usize)>, delim: &str) -> FormatResult {
    let (start, end) = selection_or_end(text, selection);
    let selected = &text[start..end];

    // Selection includes the delimiters: strip them
    if selected.len() >= 2 * delim.len()
        && selected.starts_with(delim)
        && selected.ends_with(delim)
    {
        let inner = &selected[delim.len()..selected.len() - delim.len()];
        let new_text = format!("{}{}{}", &text[..start], inner, &text[end..]);
        return FormatResult::with_selection(new_text, start, start + inner.len()).toggled_off();
    }

    // Delimiters surround the selection: strip them
    if text[..start].ends_with(delim) && text[end..].starts_with(delim) {
        let new_text = format!(
            "{}{}{}",
            &text[..start - delim.len()],
            selected,
            &text[end + delim.len()..]
        );
        return FormatResult::with_selection(
            new_text,
            start - delim.len(),
            start - delim.len() + selected.len(),
        )
        .toggled_off();
    }

    if selected.is_empty() {
        // Nothing to wrap; user must select text first
        return FormatResult::with_cursor(text.to_string(), start).not_applied();
    }

    let new_text = format!("{}{}{}{}{}", &text[..start], delim, selected, delim, &text[end..]);
    FormatResult::with_cursor(new_text, end + 2 * delim.len())
}

// ─────────────────────────────────────────────────────────────────────────────
// Links and Images
// ─────────────────────────────────────────────────────────────────────────────

fn insert_link(text: &str, selection: Option<(usize, usize)>, is_image: bool) -> FormatResult {
    let (start, end) = selection_or_end(text, selection);
    let selected = &text[start..end];
    if selected.is_empty() {
        return FormatResult::with_cursor(text.to_string(), start).not_applied();
    }

    let prefix = if is_image { "![" } else { "[" };
    let new_text = format!(
        "{}{}{}](url){}",
        &text[..start],
        prefix,
        selected,
        &text[end..]
    );
    // Select the "url" placeholder for immediate replacement
    let url_start = start + prefix.len() + selected.len() + 2;
    FormatResult::with_selection(new_text, url_start, url_start + 3)
}

// ─────────────────────────────────────────────────────────────────────────────
// Line-Prefix Operations
// ─────────────────────────────────────────────────────────────────────────────

/// Prefix every line touched by the selection with `marker`, toggling the
/// marker off when every touched line already carries it.
fn prefix_line(text: &str, selection: Option<(usize, usize)>, marker: &str) -> FormatResult {
    let (start, end) = selection_or_end(text, selection);
    let (line_start, line_end) = line_bounds(text, start, end);
    let lines: Vec<&str> = text[line_start..line_end].lines().collect();
    let lines = if lines.is_empty() { vec![""] } else { lines };

    let all_marked = lines.iter().all(|l| l.trim_start().starts_with(marker.trim_end()));

    let new_lines: Vec<String> = lines
        .iter()
        .map(|line| {
            let trimmed = line.trim_start();
            if all_marked {
                trimmed
                    .strip_prefix(marker)
                    .or_else(|| trimmed.strip_prefix(marker.trim_end()))
                    .unwrap_or(trimmed)
                    .to_string()
            } else {
                format!("{}{}", marker, trimmed)
            }
        })
        .collect();

    let replacement = new_lines.join("\n");
    let new_text = format!("{}{}{}", &text[..line_start], replacement, &text[line_end..]);
    let result = FormatResult::with_cursor(new_text, line_start + replacement.len());
    if all_marked {
        result.toggled_off()
    } else {
        result
    }
}

/// Wrap the lines touched by the selection in a fenced code block, removing
/// an existing fence instead when the selection is already fenced.
fn fence_lines(text: &str, selection: Option<(usize, usize)>) -> FormatResult {
    let (start, end) = selection_or_end(text, selection);
    let (line_start, line_end) = line_bounds(text, start, end);
    let block = &text[line_start..line_end];

    // Selection covers the fence lines themselves: strip them
    let lines: Vec<&str> = block.lines().collect();
    let fenced = lines.len() >= 2
        && lines.first().is_some_and(|l| l.trim_start().starts_with("```"))
        && lines.last().is_some_and(|l| l.trim() == "```");

    if fenced {
        let inner = lines[1..lines.len() - 1].join("\n");
        let new_text = format!("{}{}{}", &text[..line_start], inner, &text[line_end..]);
        return FormatResult::with_cursor(new_text, line_start).toggled_off();
    }

    // Caret inside an existing fence: strip the surrounding fence pair
    if let Some((open, close)) = enclosing_fence(text, line_start, line_end) {
        let inner_start = open.1 + 1;
        let inner_end = close.0.saturating_sub(1).max(inner_start);
        let new_text = format!(
            "{}{}{}",
            &text[..open.0],
            &text[inner_start..inner_end],
            &text[close.1..]
        );
        return FormatResult::with_cursor(new_text, open.0).toggled_off();
    }

    let new_text = format!("{}```\n{}\n```{}", &text[..line_start], block, &text[line_end..]);
    // Cursor after the opening fence, where a language tag would go
    FormatResult::with_cursor(new_text, line_start + 3)
}

/// The fence pair enclosing the given line range, as (open, close) line
/// spans, if the range sits inside one.
///
/// The parity of fence lines above the range decides whether the nearest
/// fence above opens a block or closed the previous one; only in the former
/// case is the range inside a fence.
fn enclosing_fence(
    text: &str,
    line_start: usize,
    line_end: usize,
) -> Option<((usize, usize), (usize, usize))> {
    let spans = line_spans(text);
    let first = spans.iter().position(|&(s, e)| s <= line_start && line_start <= e)?;
    let last = spans.iter().position(|&(s, e)| s <= line_end && line_end <= e)?;

    let is_fence = |&(s, e): &(usize, usize)| text[s..e].trim_start().starts_with("```");

    let fences_above = spans[..first].iter().filter(|s| is_fence(s)).count();
    if fences_above % 2 == 0 {
        return None;
    }
    let open = spans[..first].iter().rposition(is_fence)?;
    let close = spans[last + 1..]
        .iter()
        .position(|&(s, e)| text[s..e].trim() == "```")?;
    Some((spans[open], spans[last + 1 + close]))
}

/// Byte spans of every line, excluding the line terminators.
fn line_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = 0;
    for (i, b) in text.bytes().enumerate() {
        if b == b'\n' {
            spans.push((start, i));
            start = i + 1;
        }
    }
    spans.push((start, text.len()));
    spans
}

/// Insert a thematic break on its own line after the current line.
fn insert_rule(text: &str, selection: Option<(usize, usize)>) -> FormatResult {
    let (start, _) = selection_or_end(text, selection);
    let (_, line_end) = line_bounds(text, start, start);
    let new_text = format!("{}\n\n---\n{}", &text[..line_end], &text[line_end..]);
    FormatResult::with_cursor(new_text, line_end + 6)
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Normalize the selection to valid boundaries, defaulting to the text end.
fn selection_or_end(text: &str, selection: Option<(usize, usize)>) -> (usize, usize) {
    let (start, end) = selection.unwrap_or((text.len(), text.len()));
    clamp_range(text, start, end)
}

/// Expand a byte range to whole-line boundaries.
fn line_bounds(text: &str, start: usize, end: usize) -> (usize, usize) {
    let line_start = text[..start].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let line_end = text[end..].find('\n').map(|i| end + i).unwrap_or(text.len());
    (line_start, line_end)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_wraps_selection() {
        let result = apply_command("Hello world", Some((0, 5)), EditorCommand::Bold);
        assert_eq!(result.text, "**Hello** world");
        assert!(result.applied);
    }

    #[test]
    fn test_bold_toggles_off() {
        let result = apply_command("**Hello** world", Some((0, 9)), EditorCommand::Bold);
        assert_eq!(result.text, "Hello world");
        assert!(!result.applied);
    }

    #[test]
    fn test_bold_strips_surrounding_delims() {
        let result = apply_command("**Hello** world", Some((2, 7)), EditorCommand::Bold);
        assert_eq!(result.text, "Hello world");
        assert!(!result.applied);
    }

    #[test]
    fn test_inline_wrap_no_selection_does_nothing() {
        let result = apply_command("Hello", Some((5, 5)), EditorCommand::Bold);
        assert_eq!(result.text, "Hello");
        assert!(!result.applied);
    }

    #[test]
    fn test_italic_wraps_selection() {
        let result = apply_command("Hello world", Some((6, 11)), EditorCommand::Italic);
        assert_eq!(result.text, "Hello *world*");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Underline
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_underline_wraps_selection() {
        // Encoding the selection "hello" yields text containing _hello_
        let result = apply_command("say hello now", Some((4, 9)), EditorCommand::Underline);
        assert_eq!(result.text, "say _hello_ now");
        assert!(result.applied);
    }

    #[test]
    fn test_underline_keeps_selection_editable() {
        let result = apply_command("say hello now", Some((4, 9)), EditorCommand::Underline);
        // the inner text stays selected for further edits
        assert_eq!(result.selection, Some((5, 10)));
        assert_eq!(&result.text[5..10], "hello");
    }

    #[test]
    fn test_underline_empty_selection_inserts_lone_delimiter() {
        let result = apply_command("abc", Some((3, 3)), EditorCommand::Underline);
        assert_eq!(result.text, "abc_");
        assert_eq!(result.cursor, 4);
    }

    #[test]
    fn test_underline_does_not_toggle() {
        // Unlike bold/italic, underline always re-wraps: the command is a
        // selection replacement, not a toggle.
        let result = apply_command("_x_", Some((0, 3)), EditorCommand::Underline);
        assert_eq!(result.text, "__x__");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Links, Lines, Blocks
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_link_selects_url_placeholder() {
        let result = apply_command("Click here", Some((6, 10)), EditorCommand::Link);
        assert_eq!(result.text, "Click [here](url)");
        assert_eq!(result.selection, Some((13, 16)));
    }

    #[test]
    fn test_image_prefix() {
        let result = apply_command("logo", Some((0, 4)), EditorCommand::Image);
        assert_eq!(result.text, "![logo](url)");
    }

    #[test]
    fn test_heading_prefixes_line() {
        let result = apply_command("Title here", Some((3, 3)), EditorCommand::Heading(2));
        assert_eq!(result.text, "## Title here");
    }

    #[test]
    fn test_quote_toggles() {
        let result = apply_command("A quote", Some((0, 0)), EditorCommand::Quote);
        assert_eq!(result.text, "> A quote");

        let result = apply_command("> A quote", Some((0, 0)), EditorCommand::Quote);
        assert_eq!(result.text, "A quote");
        assert!(!result.applied);
    }

    #[test]
    fn test_bullet_list_multi_line() {
        let result = apply_command("one\ntwo", Some((0, 7)), EditorCommand::BulletList);
        assert_eq!(result.text, "- one\n- two");
    }

    #[test]
    fn test_code_block_round_trip() {
        let result = apply_command("let x = 1;", Some((0, 0)), EditorCommand::CodeBlock);
        assert_eq!(result.text, "```\nlet x = 1;\n```");

        let result = apply_command(&result.text, Some((5, 5)), EditorCommand::CodeBlock);
        assert_eq!(result.text, "let x = 1;");
        assert!(!result.applied);
    }

    #[test]
    fn test_code_block_unfences_multi_line_body() {
        let text = "```\none\ntwo\nthree\n```";
        let caret = text.find("two").map(|i| (i, i));
        let result = apply_command(text, caret, EditorCommand::CodeBlock);
        assert_eq!(result.text, "one\ntwo\nthree");
        assert!(!result.applied);
    }

    #[test]
    fn test_code_block_between_fences_wraps() {
        let text = "```\na\n```\nplain\n```\nb\n```";
        let caret = text.find("plain").map(|i| (i, i));
        let result = apply_command(text, caret, EditorCommand::CodeBlock);
        assert_eq!(result.text, "```\na\n```\n```\nplain\n```\n```\nb\n```");
        assert!(result.applied);
    }

    #[test]
    fn test_horizontal_rule_after_line() {
        let result = apply_command("para", Some((2, 2)), EditorCommand::HorizontalRule);
        assert_eq!(result.text, "para\n\n---\n");
    }

    #[test]
    fn test_view_commands_leave_text_unchanged() {
        for command in [
            EditorCommand::EditOnly,
            EditorCommand::LivePreview,
            EditorCommand::PreviewOnly,
            EditorCommand::ToggleFullscreen,
        ] {
            let result = apply_command("text", Some((0, 4)), command);
            assert_eq!(result.text, "text");
            assert!(!result.applied);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // UTF-8 Safety
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_bold_multibyte_selection() {
        let result = apply_command("Hei på deg", Some((4, 6)), EditorCommand::Bold);
        assert!(result.text.contains("**på**"));
    }

    #[test]
    fn test_underline_multibyte_selection() {
        let result = apply_command("Hello 你好 World", Some((6, 12)), EditorCommand::Underline);
        assert!(result.text.contains("_你好_"));
    }

    #[test]
    fn test_no_panic_on_any_byte_index() {
        let text = "på 🎉 你";
        for i in 0..=text.len() + 3 {
            for j in 0..=text.len() + 3 {
                let _ = apply_command(text, Some((i, j)), EditorCommand::Bold);
                let _ = apply_command(text, Some((i, j)), EditorCommand::Underline);
                let _ = apply_command(text, Some((i, j)), EditorCommand::Quote);
            }
        }
    }
}
