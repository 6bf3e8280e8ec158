//! Toolbar commands and command set assembly
//!
//! The toolbar is described by two lists of immutable command descriptors:
//! the primary list (formatting commands) and the secondary list (view-mode
//! and fullscreen controls). Both are assembled exactly once per widget
//! instance, since descriptors are stable for the instance's lifetime.
//!
//! Assembly splices the two custom commands into the defaults at fixed
//! positions: Underline at index 2 of the primary list (only in the
//! underline-enabled variant), and Fullscreen replacing the last entry of
//! the secondary list.

// ─────────────────────────────────────────────────────────────────────────────
// Command Identifiers
// ─────────────────────────────────────────────────────────────────────────────

/// Commands the toolbar can trigger. Execution is dispatched by the widget,
/// which routes formatting commands through the editing surface and
/// `ToggleFullscreen` to the fullscreen controller it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorCommand {
    /// Bold text (**text**)
    Bold,
    /// Italic text (*text*)
    Italic,
    /// Underline text (_text_, the emphasis-delimiter round-trip)
    Underline,
    /// Strikethrough (~~text~~)
    Strikethrough,
    /// Inline code (`code`)
    InlineCode,
    /// Heading line (## text)
    Heading(u8),
    /// Link ([text](url))
    Link,
    /// Blockquote (> text)
    Quote,
    /// Fenced code block
    CodeBlock,
    /// Image (![alt](url))
    Image,
    /// Bullet list
    BulletList,
    /// Numbered list
    NumberedList,
    /// Horizontal rule (---)
    HorizontalRule,

    /// Show the editing pane only
    EditOnly,
    /// Show editor and preview side by side
    LivePreview,
    /// Show the preview pane only
    PreviewOnly,
    /// Toggle fullscreen editing mode
    ToggleFullscreen,
}

// ─────────────────────────────────────────────────────────────────────────────
// Command Descriptors
// ─────────────────────────────────────────────────────────────────────────────

/// Immutable toolbar button metadata for one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandDescriptor {
    /// The command this button triggers.
    pub command: EditorCommand,
    /// Button label (also used as the accessibility name).
    pub label: &'static str,
    /// Keyboard shortcut hint, if any.
    pub shortcut: Option<&'static str>,
    /// Toolbar glyph.
    pub icon: &'static str,
}

impl CommandDescriptor {
    const fn new(
        command: EditorCommand,
        label: &'static str,
        shortcut: Option<&'static str>,
        icon: &'static str,
    ) -> Self {
        Self {
            command,
            label,
            shortcut,
            icon,
        }
    }

    /// Tooltip text combining label and shortcut.
    pub fn tooltip(&self) -> String {
        match self.shortcut {
            Some(shortcut) => format!("{} ({})", self.label, shortcut),
            None => self.label.to_string(),
        }
    }
}

/// The Underline command spliced into the primary list.
pub const UNDERLINE: CommandDescriptor = CommandDescriptor::new(
    EditorCommand::Underline,
    "Underline",
    Some("Ctrl+U"),
    "U̲",
);

/// The Fullscreen command that replaces the secondary list's last entry.
pub const FULLSCREEN: CommandDescriptor = CommandDescriptor::new(
    EditorCommand::ToggleFullscreen,
    "Toggle fullscreen",
    Some("Ctrl+0"),
    "⛶",
);

// ─────────────────────────────────────────────────────────────────────────────
// Default Command Lists
// ─────────────────────────────────────────────────────────────────────────────

/// The editing surface's default primary (formatting) commands.
pub fn default_commands() -> Vec<CommandDescriptor> {
    use EditorCommand::*;
    vec![
        CommandDescriptor::new(Bold, "Bold", Some("Ctrl+B"), "𝐁"),
        CommandDescriptor::new(Italic, "Italic", Some("Ctrl+I"), "𝐼"),
        CommandDescriptor::new(Strikethrough, "Strikethrough", Some("Ctrl+Shift+S"), "S̶"),
        CommandDescriptor::new(HorizontalRule, "Horizontal rule", None, "―"),
        CommandDescriptor::new(Heading(2), "Heading", Some("Ctrl+2"), "H"),
        CommandDescriptor::new(Link, "Link", Some("Ctrl+K"), "🔗"),
        CommandDescriptor::new(Quote, "Quote", Some("Ctrl+Q"), "\u{275D}"),
        CommandDescriptor::new(InlineCode, "Inline code", Some("Ctrl+`"), "</>"),
        CommandDescriptor::new(CodeBlock, "Code block", Some("Ctrl+Shift+C"), "{ }"),
        CommandDescriptor::new(Image, "Image", Some("Ctrl+Shift+K"), "🖼"),
        CommandDescriptor::new(BulletList, "Bullet list", Some("Ctrl+Shift+B"), "\u{2022}"),
        CommandDescriptor::new(NumberedList, "Numbered list", Some("Ctrl+Shift+N"), "1."),
    ]
}

/// The editing surface's default secondary (view control) commands.
///
/// Ends with a plain fullscreen entry, which assembly replaces with
/// [`FULLSCREEN`] so the shipped descriptor carries the widget's shortcut
/// and labeling.
pub fn default_extra_commands() -> Vec<CommandDescriptor> {
    use EditorCommand::*;
    vec![
        CommandDescriptor::new(EditOnly, "Edit", None, "📝"),
        CommandDescriptor::new(LivePreview, "Live", None, "⚌"),
        CommandDescriptor::new(PreviewOnly, "Preview", None, "👁"),
        CommandDescriptor::new(ToggleFullscreen, "Fullscreen", None, "⛶"),
    ]
}

// ─────────────────────────────────────────────────────────────────────────────
// Assembly
// ─────────────────────────────────────────────────────────────────────────────

/// Index at which the Underline command is spliced into the primary list.
const UNDERLINE_INDEX: usize = 2;

/// Build the primary command list, inserting Underline at index 2 when the
/// underline variant is enabled.
pub fn assemble_commands(underline_enabled: bool) -> Vec<CommandDescriptor> {
    let mut commands = default_commands();
    if underline_enabled {
        commands.insert(UNDERLINE_INDEX.min(commands.len()), UNDERLINE);
    }
    commands
}

/// Build the secondary command list, replacing its last entry with the
/// Fullscreen descriptor.
pub fn assemble_extra_commands() -> Vec<CommandDescriptor> {
    let mut extra = default_extra_commands();
    match extra.last_mut() {
        Some(last) => *last = FULLSCREEN,
        None => extra.push(FULLSCREEN),
    }
    extra
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
