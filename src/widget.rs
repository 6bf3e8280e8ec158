//! The markdown pad widget
//!
//! Ties the pieces together: the draft buffer, the debounced publisher, the
//! toolbar, the editing surface, the preview pane and fullscreen control.
//! The widget is retained (owns state across frames) and drawn with
//! [`MarkdownPad::show`] once per frame.

use eframe::egui::{self, Key, KeyboardShortcut, Modifiers, ScrollArea, TextEdit, Ui};
use log::debug;

use crate::commands::{assemble_commands, assemble_extra_commands, CommandDescriptor, EditorCommand};
use crate::draft::DraftStore;
use crate::format::{apply_command, FormatResult};
use crate::fullscreen::{FullscreenController, FullscreenHost, ViewportFullscreen};
use crate::host::HostBindings;
use crate::markdown::{self, Document};
use crate::options::{EditorOptions, Theme};
use crate::preview::MarkdownPreview;
use crate::publish::DebouncedPublisher;
use crate::theme::ThemeColors;

// ─────────────────────────────────────────────────────────────────────────────
// Pane Mode
// ─────────────────────────────────────────────────────────────────────────────

/// Which panes are visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaneMode {
    EditOnly,
    #[default]
    LivePreview,
    PreviewOnly,
}

impl PaneMode {
    fn from_command(command: EditorCommand) -> Option<Self> {
        match command {
            EditorCommand::EditOnly => Some(Self::EditOnly),
            EditorCommand::LivePreview => Some(Self::LivePreview),
            EditorCommand::PreviewOnly => Some(Self::PreviewOnly),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Widget
// ─────────────────────────────────────────────────────────────────────────────

/// A rich markdown editing widget bound to a host through [`HostBindings`].
///
/// Construct once, call [`show`](Self::show) every frame. Edits accumulate
/// in the draft immediately; the committed value follows after the debounce
/// window closes.
pub struct MarkdownPad {
    bindings: HostBindings,
    options: EditorOptions,
    draft: DraftStore,
    publisher: DebouncedPublisher,
    fullscreen: FullscreenController,
    commands: Vec<CommandDescriptor>,
    extra_commands: Vec<CommandDescriptor>,
    pane_mode: PaneMode,
    /// Last known selection in the editing surface, in byte offsets.
    selection: Option<(usize, usize)>,
    /// egui id of the editing surface, once it has been shown.
    editor_id: Option<egui::Id>,
    /// Parsed document cache, keyed by draft version.
    parsed: Option<(u64, Document)>,
}

impl MarkdownPad {
    pub fn new(bindings: HostBindings, mut options: EditorOptions) -> Self {
        options.sanitize();
        let draft = DraftStore::seed(bindings.value.get(), bindings.default_value.get());
        let publisher = DebouncedPublisher::new(options.debounce_window());

        Self {
            draft,
            publisher,
            fullscreen: FullscreenController::new(),
            commands: assemble_commands(options.underline_enabled),
            extra_commands: assemble_extra_commands(),
            pane_mode: PaneMode::default(),
            selection: None,
            editor_id: None,
            parsed: None,
            bindings,
            options,
        }
    }

    /// The draft text as it currently reads, committed or not.
    pub fn draft_text(&self) -> &str {
        self.draft.current()
    }

    /// Whether an edit is waiting for its debounce window to close.
    pub fn is_publish_pending(&self) -> bool {
        self.publisher.is_pending()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen.is_active()
    }

    pub fn pane_mode(&self) -> PaneMode {
        self.pane_mode
    }

    /// Commit any pending edit to the host immediately.
    pub fn flush(&mut self) {
        let mut sink = self.bindings.value.clone();
        self.publisher.flush(&mut sink);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Frame Entry Point
    // ─────────────────────────────────────────────────────────────────────────

    /// Draw the widget and run one frame of its state machine.
    pub fn show(&mut self, ui: &mut Ui) {
        // Host-driven state first: a changed default reseeds the draft, and
        // the fullscreen flag follows whatever the platform actually did.
        if self.draft.reconcile_default(self.bindings.default_value.get()) {
            self.publisher.cancel();
        }
        let mut host = ViewportFullscreen::new(ui.ctx().clone());
        self.fullscreen.sync(&host);

        let theme = Theme::from_host_str(self.bindings.theme.get().as_deref());
        let colors = ThemeColors::from_theme(theme);

        egui::Frame::none()
            .fill(colors.base.background)
            .show(ui, |ui| {
                if self.options.show_toolbar {
                    self.toolbar(ui, &colors, &mut host);
                    ui.separator();
                }
                self.keyboard_shortcuts(ui, &mut host);
                self.panes(ui, &colors);
            });

        // Deadline check last, after this frame's edits are scheduled.
        let mut sink = self.bindings.value.clone();
        if self.publisher.poll(&mut sink) {
            ui.ctx().request_repaint();
        } else if self.publisher.is_pending() {
            // Keep frames coming while a commit is outstanding.
            ui.ctx().request_repaint_after(std::time::Duration::from_millis(16));
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Toolbar
    // ─────────────────────────────────────────────────────────────────────────

    fn toolbar(&mut self, ui: &mut Ui, colors: &ThemeColors, host: &mut dyn FullscreenHost) {
        let mut clicked = None;

        egui::Frame::none()
            .fill(colors.base.toolbar)
            .inner_margin(egui::Margin::symmetric(6.0, 4.0))
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    for descriptor in &self.commands {
                        let button = ui
                            .button(descriptor.icon)
                            .on_hover_text(descriptor.tooltip());
                        if button.clicked() {
                            clicked = Some(descriptor.command);
                        }
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        for descriptor in self.extra_commands.iter().rev() {
                            let active = match descriptor.command {
                                EditorCommand::ToggleFullscreen => self.fullscreen.is_active(),
                                command => {
                                    PaneMode::from_command(command) == Some(self.pane_mode)
                                }
                            };
                            let button = egui::Button::new(descriptor.icon).fill(if active {
                                colors.base.active
                            } else {
                                colors.base.toolbar
                            });
                            if ui.add(button).on_hover_text(descriptor.tooltip()).clicked() {
                                clicked = Some(descriptor.command);
                            }
                        }
                    });
                });
            });

        if let Some(command) = clicked {
            self.execute(ui.ctx(), command, host);
        }
    }

    fn keyboard_shortcuts(&mut self, ui: &mut Ui, host: &mut dyn FullscreenHost) {
        const SHORTCUTS: &[(KeyboardShortcut, EditorCommand)] = &[
            (
                KeyboardShortcut::new(Modifiers::COMMAND, Key::B),
                EditorCommand::Bold,
            ),
            (
                KeyboardShortcut::new(Modifiers::COMMAND, Key::I),
                EditorCommand::Italic,
            ),
            (
                KeyboardShortcut::new(Modifiers::COMMAND, Key::U),
                EditorCommand::Underline,
            ),
            (
                KeyboardShortcut::new(Modifiers::COMMAND, Key::Num0),
                EditorCommand::ToggleFullscreen,
            ),
        ];

        for (shortcut, command) in SHORTCUTS {
            if *command == EditorCommand::Underline && !self.options.underline_enabled {
                continue;
            }
            if ui.input_mut(|i| i.consume_shortcut(shortcut)) {
                self.execute(ui.ctx(), *command, host);
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Command Execution
    // ─────────────────────────────────────────────────────────────────────────

    fn execute(&mut self, ctx: &egui::Context, command: EditorCommand, host: &mut dyn FullscreenHost) {
        if command == EditorCommand::ToggleFullscreen {
            // Focus goes back to the editing surface before the transition
            // so typing continues uninterrupted on the other side of it.
            if let Some(id) = self.editor_id {
                ctx.memory_mut(|m| m.request_focus(id));
            }
            self.fullscreen.toggle(host);
            return;
        }
        if let Some(mode) = PaneMode::from_command(command) {
            self.pane_mode = mode;
            return;
        }

        let result = apply_command(self.draft.current(), self.selection, command);
        self.apply_format_result(command, result);
    }

    fn apply_format_result(&mut self, command: EditorCommand, result: FormatResult) {
        if result.text == self.draft.current() {
            return;
        }
        debug!("applied {:?}", command);
        self.selection = result.selection.or(Some((result.cursor, result.cursor)));
        self.draft.set(result.text);
        self.publisher.note_edit(self.draft.current().to_string());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Panes
    // ─────────────────────────────────────────────────────────────────────────

    fn panes(&mut self, ui: &mut Ui, colors: &ThemeColors) {
        let available = ui.available_size();
        match self.pane_mode {
            PaneMode::EditOnly => {
                self.editor_pane(ui, available.x);
            }
            PaneMode::PreviewOnly => {
                self.preview_pane(ui, colors);
            }
            PaneMode::LivePreview => {
                let editor_width = available.x * self.options.split_ratio;
                ui.horizontal_top(|ui| {
                    ui.vertical(|ui| {
                        ui.set_width(editor_width);
                        self.editor_pane(ui, editor_width);
                    });
                    ui.separator();
                    ui.vertical(|ui| {
                        self.preview_pane(ui, colors);
                    });
                });
            }
        }
    }

    fn editor_pane(&mut self, ui: &mut Ui, width: f32) {
        let mut text = self.draft.current().to_string();

        let output = ScrollArea::vertical()
            .id_source("markpad-editor-scroll")
            .show(ui, |ui| {
                TextEdit::multiline(&mut text)
                    .id_source("markpad-editor")
                    .font(egui::FontId::monospace(self.options.font_size))
                    .desired_width(width)
                    .desired_rows(12)
                    .frame(false)
                    .show(ui)
            })
            .inner;

        self.editor_id = Some(output.response.id);

        if let Some(range) = output.cursor_range {
            let (a, b) = (range.primary.ccursor.index, range.secondary.ccursor.index);
            let (start, end) = if a <= b { (a, b) } else { (b, a) };
            self.selection = Some((
                byte_index_of_char(&text, start),
                byte_index_of_char(&text, end),
            ));
        }

        if output.response.changed() {
            self.draft.set(text);
            self.publisher.note_edit(self.draft.current().to_string());
        }
    }

    /// The parsed draft, re-parsing only when the draft version moved.
    fn parsed_document(&mut self) -> &Document {
        let version = self.draft.version();
        let stale = self
            .parsed
            .as_ref()
            .map(|(v, _)| *v != version)
            .unwrap_or(true);
        if stale {
            self.parsed = Some((version, markdown::parse(self.draft.current())));
        }
        let (_, document) = self
            .parsed
            .get_or_insert_with(|| (version, markdown::parse(self.draft.current())));
        document
    }

    fn preview_pane(&mut self, ui: &mut Ui, colors: &ThemeColors) {
        let font_size = self.options.font_size;
        let document = self.parsed_document();

        ScrollArea::vertical()
            .id_source("markpad-preview-scroll")
            .show(ui, |ui| {
                MarkdownPreview::new(document, colors)
                    .font_size(font_size)
                    .show(ui);
            });
    }
}

impl Drop for MarkdownPad {
    fn drop(&mut self) {
        // A half-finished edit dies with the widget; hosts that want it
        // call flush() before teardown.
        self.publisher.cancel();
    }
}

/// Convert a char index from egui's cursor state into a byte offset.
fn byte_index_of_char(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fullscreen::NoFullscreen;

    fn pad_with(value: Option<&str>, default: Option<&str>) -> MarkdownPad {
        let bindings = HostBindings::with_values(
            value.map(str::to_string),
            default.map(str::to_string),
        );
        MarkdownPad::new(bindings, EditorOptions::default())
    }

    fn run(pad: &mut MarkdownPad, command: EditorCommand) {
        let ctx = egui::Context::default();
        pad.execute(&ctx, command, &mut NoFullscreen);
    }

    #[test]
    fn test_new_seeds_from_committed_value() {
        let pad = pad_with(Some("committed"), Some("default"));
        assert_eq!(pad.draft_text(), "committed");
    }

    #[test]
    fn test_new_falls_back_to_default() {
        let pad = pad_with(None, Some("default"));
        assert_eq!(pad.draft_text(), "default");

        let pad = pad_with(None, None);
        assert_eq!(pad.draft_text(), "");
    }

    #[test]
    fn test_format_command_edits_draft_and_schedules_publish() {
        let mut pad = pad_with(Some("hello world"), None);
        pad.selection = Some((0, 5));
        run(&mut pad, EditorCommand::Bold);
        assert_eq!(pad.draft_text(), "**hello** world");
        assert!(pad.is_publish_pending());
    }

    #[test]
    fn test_underline_command_wraps_selection() {
        let mut pad = pad_with(Some("hello world"), None);
        pad.selection = Some((6, 11));
        run(&mut pad, EditorCommand::Underline);
        assert_eq!(pad.draft_text(), "hello _world_");
    }

    #[test]
    fn test_pane_commands_switch_mode_without_editing() {
        let mut pad = pad_with(Some("text"), None);
        run(&mut pad, EditorCommand::PreviewOnly);
        assert_eq!(pad.pane_mode(), PaneMode::PreviewOnly);
        assert_eq!(pad.draft_text(), "text");
        assert!(!pad.is_publish_pending());

        run(&mut pad, EditorCommand::EditOnly);
        assert_eq!(pad.pane_mode(), PaneMode::EditOnly);
    }

    #[test]
    fn test_fullscreen_command_routes_to_controller() {
        let mut pad = pad_with(None, None);
        // A refusing host leaves the flag down and the draft untouched.
        run(&mut pad, EditorCommand::ToggleFullscreen);
        assert!(!pad.is_fullscreen());
        assert!(!pad.is_publish_pending());
    }

    #[test]
    fn test_flush_commits_pending_edit() {
        let mut pad = pad_with(Some("a"), None);
        pad.selection = Some((0, 1));
        run(&mut pad, EditorCommand::Bold);
        assert!(pad.is_publish_pending());

        pad.flush();
        assert!(!pad.is_publish_pending());
        assert_eq!(pad.bindings.value.get().as_deref(), Some("**a**"));
    }

    #[test]
    fn test_host_theme_string_resolves() {
        let pad = pad_with(Some("x"), None);
        assert!(!Theme::from_host_str(pad.bindings.theme.get().as_deref()).is_dark());

        pad.bindings.theme.set(Some("dark".to_string()));
        assert!(Theme::from_host_str(pad.bindings.theme.get().as_deref()).is_dark());
    }

    #[test]
    fn test_preview_document_follows_edits() {
        fn has_strong(node: &crate::markdown::Node) -> bool {
            matches!(node.kind, crate::markdown::NodeKind::Strong)
                || node.children.iter().any(has_strong)
        }

        let mut pad = pad_with(Some("hello world"), None);
        // first render parses the seeded draft
        assert!(!has_strong(&pad.parsed_document().root));

        pad.selection = Some((0, 5));
        run(&mut pad, EditorCommand::Bold);
        assert_eq!(pad.draft_text(), "**hello** world");

        // the next render must see the edited draft, not the cached parse
        assert!(has_strong(&pad.parsed_document().root));
    }

    #[test]
    fn test_underline_disabled_drops_command_from_toolbar() {
        let bindings = HostBindings::with_values(None, None);
        let options = EditorOptions {
            underline_enabled: false,
            ..Default::default()
        };
        let pad = MarkdownPad::new(bindings, options);
        assert!(pad
            .commands
            .iter()
            .all(|d| d.command != EditorCommand::Underline));
    }

    #[test]
    fn test_byte_index_of_char() {
        assert_eq!(byte_index_of_char("abc", 0), 0);
        assert_eq!(byte_index_of_char("abc", 2), 2);
        assert_eq!(byte_index_of_char("abc", 5), 3);
        assert_eq!(byte_index_of_char("på", 2), 3);
    }
}
