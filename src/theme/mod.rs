//! Color palettes for the editor widget
//!
//! The host picks the variant through [`Theme`](crate::options::Theme); this
//! module turns that into the concrete colors the toolbar, editing surface
//! and preview paint with.

use eframe::egui::Color32;

use crate::options::Theme;

// ─────────────────────────────────────────────────────────────────────────────
// Theme Colors
// ─────────────────────────────────────────────────────────────────────────────

/// All colors the widget paints with, resolved for one theme variant.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeColors {
    /// Base UI colors (backgrounds, borders)
    pub base: BaseColors,
    /// Text colors for the editing surface and preview
    pub text: TextColors,
    /// Colors for rendered markdown structures
    pub preview: PreviewColors,
}

impl ThemeColors {
    pub fn from_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self::light(),
            Theme::Dark => Self::dark(),
        }
    }

    pub fn light() -> Self {
        Self {
            base: BaseColors::light(),
            text: TextColors::light(),
            preview: PreviewColors::light(),
        }
    }

    pub fn dark() -> Self {
        Self {
            base: BaseColors::dark(),
            text: TextColors::dark(),
            preview: PreviewColors::dark(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Color Groups
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct BaseColors {
    /// Main editor background
    pub background: Color32,
    /// Toolbar background
    pub toolbar: Color32,
    /// Pane separator and borders
    pub border: Color32,
    /// Background of the active toolbar toggle
    pub active: Color32,
}

impl BaseColors {
    fn light() -> Self {
        Self {
            background: Color32::from_rgb(255, 255, 255),
            toolbar: Color32::from_rgb(246, 248, 250),
            border: Color32::from_rgb(216, 222, 228),
            active: Color32::from_rgb(221, 244, 255),
        }
    }

    fn dark() -> Self {
        Self {
            background: Color32::from_rgb(22, 27, 34),
            toolbar: Color32::from_rgb(30, 36, 44),
            border: Color32::from_rgb(48, 54, 61),
            active: Color32::from_rgb(33, 58, 82),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextColors {
    pub primary: Color32,
    pub muted: Color32,
    pub link: Color32,
    /// Inline code and code blocks
    pub code: Color32,
}

impl TextColors {
    fn light() -> Self {
        Self {
            primary: Color32::from_rgb(31, 35, 40),
            muted: Color32::from_rgb(101, 109, 118),
            link: Color32::from_rgb(9, 105, 218),
            code: Color32::from_rgb(130, 80, 223),
        }
    }

    fn dark() -> Self {
        Self {
            primary: Color32::from_rgb(230, 237, 243),
            muted: Color32::from_rgb(125, 133, 144),
            link: Color32::from_rgb(88, 166, 255),
            code: Color32::from_rgb(210, 168, 255),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewColors {
    pub heading: Color32,
    pub blockquote: Color32,
    /// Background of code blocks
    pub code_background: Color32,
    pub rule: Color32,
}

impl PreviewColors {
    fn light() -> Self {
        Self {
            heading: Color32::from_rgb(31, 35, 40),
            blockquote: Color32::from_rgb(101, 109, 118),
            code_background: Color32::from_rgb(246, 248, 250),
            rule: Color32::from_rgb(216, 222, 228),
        }
    }

    fn dark() -> Self {
        Self {
            heading: Color32::from_rgb(230, 237, 243),
            blockquote: Color32::from_rgb(139, 148, 158),
            code_background: Color32::from_rgb(34, 39, 46),
            rule: Color32::from_rgb(48, 54, 61),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
