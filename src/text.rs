//! UTF-8 safe string utilities
//!
//! Byte indices reaching this crate come from egui cursor positions and
//! parser source positions, and may fall inside a multi-byte character.
//! Slicing a `str` at such an index panics, so formatting and span
//! extraction clamp indices to character boundaries first.

/// Returns the largest index ≤ `index` that is on a UTF-8 character boundary.
///
/// Indices past the end of the string clamp to the string length.
#[inline]
pub fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while i > 0 && !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Returns the smallest index ≥ `index` that is on a UTF-8 character boundary.
///
/// Indices past the end of the string clamp to the string length.
#[inline]
pub fn ceil_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while i < s.len() && !s.is_char_boundary(i) {
        i += 1;
    }
    i
}

/// Clamp a byte range to valid character boundaries, normalizing order.
pub fn clamp_range(s: &str, start: usize, end: usize) -> (usize, usize) {
    let start = floor_char_boundary(s, start.min(s.len()));
    let end = ceil_char_boundary(s, end.min(s.len()));
    if start > end {
        (end, start)
    } else {
        (start, end)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
