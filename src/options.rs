//! Editor options and the host-selected theme
//!
//! The host owns the widget's configuration; this module defines the
//! `EditorOptions` struct the host hands to `MarkdownPad::new`, with serde
//! support so hosts that persist configuration as JSON can round-trip it.
//! All fields have defaults and loaded values are sanitized, so a manually
//! edited or partially filled configuration never fails construction.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Theme Selection
// ─────────────────────────────────────────────────────────────────────────────

/// Color theme selected by the host. Styling only, no behavioral effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Parse the host's theme string.
    ///
    /// Hosts pass the literal strings `"Light"`/`"Dark"`; anything else
    /// (including an undefined value) falls back to Light rather than
    /// failing.
    pub fn from_host_str(value: Option<&str>) -> Self {
        match value {
            Some(s) if s.eq_ignore_ascii_case("dark") => Theme::Dark,
            _ => Theme::Light,
        }
    }

    /// Whether this is the dark theme.
    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Editor Options
// ─────────────────────────────────────────────────────────────────────────────

/// Host-supplied configuration for a `MarkdownPad` instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorOptions {
    /// Quiet period before an edited draft is committed to the host, in
    /// milliseconds.
    pub debounce_ms: u64,

    /// Whether the Underline command is available (the toolbar variant with
    /// underline spliced into the primary command list).
    pub underline_enabled: bool,

    /// Whether the toolbar is shown at all.
    pub show_toolbar: bool,

    /// Font size for the editing pane (in points).
    pub font_size: f32,

    /// Split ratio between the editor and preview panes (0.0 to 1.0).
    pub split_ratio: f32,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            underline_enabled: true,
            show_toolbar: true,
            font_size: 14.0,
            split_ratio: 0.5,
        }
    }
}

impl EditorOptions {
    /// Minimum allowed font size.
    pub const MIN_FONT_SIZE: f32 = 8.0;
    /// Maximum allowed font size.
    pub const MAX_FONT_SIZE: f32 = 72.0;
    /// Maximum allowed debounce window. Beyond this the widget would feel
    /// like it never saves.
    pub const MAX_DEBOUNCE_MS: u64 = 10_000;

    /// Sanitize options by clamping values to valid ranges.
    pub fn sanitize(&mut self) {
        self.font_size = self
            .font_size
            .clamp(Self::MIN_FONT_SIZE, Self::MAX_FONT_SIZE);
        self.split_ratio = self.split_ratio.clamp(0.0, 1.0);
        self.debounce_ms = self.debounce_ms.min(Self::MAX_DEBOUNCE_MS);
    }

    /// The debounce window as a duration.
    pub fn debounce_window(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.debounce_ms)
    }

    /// Deserialize options from JSON and sanitize them.
    pub fn from_json_sanitized(json: &str) -> crate::error::Result<Self> {
        let mut options: Self = serde_json::from_str(json)?;
        options.sanitize();
        Ok(options)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = EditorOptions::default();
        assert_eq!(options.debounce_ms, 300);
        assert!(options.underline_enabled);
        assert!(options.show_toolbar);
        assert_eq!(options.font_size, 14.0);
        assert_eq!(options.split_ratio, 0.5);
    }

    #[test]
    fn test_theme_from_host_str() {
        assert_eq!(Theme::from_host_str(Some("Dark")), Theme::Dark);
        assert_eq!(Theme::from_host_str(Some("dark")), Theme::Dark);
        assert_eq!(Theme::from_host_str(Some("Light")), Theme::Light);
        assert_eq!(Theme::from_host_str(Some("mauve")), Theme::Light);
        assert_eq!(Theme::from_host_str(None), Theme::Light);
    }

    #[test]
    fn test_theme_serialization() {
        assert_eq!(serde_json::to_string(&Theme::Light).unwrap(), "\"light\"");
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        assert_eq!(
            serde_json::from_str::<Theme>("\"dark\"").unwrap(),
            Theme::Dark
        );
    }

    #[test]
    fn test_options_serialization_roundtrip() {
        let original = EditorOptions::default();
        let json = serde_json::to_string_pretty(&original).unwrap();
        let deserialized: EditorOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let json = r#"{"debounce_ms": 500}"#;
        let options: EditorOptions = serde_json::from_str(json).unwrap();
        assert_eq!(options.debounce_ms, 500);
        assert!(options.underline_enabled);
        assert_eq!(options.font_size, 14.0);
    }

    #[test]
    fn test_sanitize_clamps() {
        let mut options = EditorOptions {
            font_size: 2.0,
            split_ratio: 3.0,
            debounce_ms: 1_000_000,
            ..Default::default()
        };
        options.sanitize();
        assert_eq!(options.font_size, EditorOptions::MIN_FONT_SIZE);
        assert_eq!(options.split_ratio, 1.0);
        assert_eq!(options.debounce_ms, EditorOptions::MAX_DEBOUNCE_MS);
    }

    #[test]
    fn test_from_json_sanitized() {
        let options =
            EditorOptions::from_json_sanitized(r#"{"font_size": 200.0}"#).unwrap();
        assert_eq!(options.font_size, EditorOptions::MAX_FONT_SIZE);

        assert!(EditorOptions::from_json_sanitized("not json").is_err());
    }
}
