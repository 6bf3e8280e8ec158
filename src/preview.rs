//! Read-only rendered preview pane
//!
//! Walks the parsed [`Document`](crate::markdown::Document) and paints it
//! with egui primitives. Inline runs accumulate into a `LayoutJob` so that
//! nested styles (bold inside a link, underline inside a list item) compose
//! instead of overwriting each other.

use eframe::egui::{
    self, text::LayoutJob, Color32, FontId, Frame, Stroke, TextFormat, Ui,
};

use crate::markdown::{Document, ListKind, Node, NodeKind};
use crate::theme::ThemeColors;
use crate::underline::SpanStyle;

// ─────────────────────────────────────────────────────────────────────────────
// Preview Widget
// ─────────────────────────────────────────────────────────────────────────────

/// Renders a parsed markdown document into the given `Ui`.
pub struct MarkdownPreview<'a> {
    document: &'a Document,
    colors: &'a ThemeColors,
    font_size: f32,
}

impl<'a> MarkdownPreview<'a> {
    pub fn new(document: &'a Document, colors: &'a ThemeColors) -> Self {
        Self {
            document,
            colors,
            font_size: 14.0,
        }
    }

    #[must_use]
    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn show(self, ui: &mut Ui) {
        let renderer = Renderer {
            colors: self.colors,
            font_size: self.font_size,
        };
        for block in &self.document.root.children {
            renderer.block(ui, block, 0);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Block Rendering
// ─────────────────────────────────────────────────────────────────────────────

struct Renderer<'a> {
    colors: &'a ThemeColors,
    font_size: f32,
}

impl Renderer<'_> {
    fn block(&self, ui: &mut Ui, node: &Node, indent: usize) {
        match &node.kind {
            NodeKind::Paragraph => {
                ui.label(self.inline_job(node, InlineStyle::default()));
                ui.add_space(4.0);
            }
            NodeKind::Heading(level) => {
                let style = InlineStyle {
                    color: Some(self.colors.preview.heading),
                    ..Default::default()
                };
                let mut job = LayoutJob::default();
                self.collect_inlines(&mut job, node, style, self.heading_size(*level));
                ui.add_space(6.0);
                ui.label(job);
                ui.add_space(4.0);
            }
            NodeKind::BlockQuote => {
                ui.horizontal(|ui| {
                    let bar = ui.available_rect_before_wrap();
                    let bar = egui::Rect::from_min_size(
                        bar.min,
                        egui::vec2(3.0, 0.0),
                    );
                    ui.painter()
                        .rect_filled(bar.expand2(egui::vec2(0.0, 2.0)), 0.0, self.colors.base.border);
                    ui.add_space(10.0);
                    ui.vertical(|ui| {
                        let style = InlineStyle {
                            color: Some(self.colors.preview.blockquote),
                            ..Default::default()
                        };
                        for child in &node.children {
                            self.styled_block(ui, child, indent, style);
                        }
                    });
                });
            }
            NodeKind::List { kind, .. } => {
                self.list(ui, node, *kind, indent);
            }
            NodeKind::CodeBlock { literal, .. } => {
                Frame::none()
                    .fill(self.colors.preview.code_background)
                    .inner_margin(8.0)
                    .rounding(4.0)
                    .show(ui, |ui| {
                        ui.label(
                            egui::RichText::new(literal.trim_end())
                                .font(FontId::monospace(self.font_size - 1.0))
                                .color(self.colors.text.code),
                        );
                    });
                ui.add_space(4.0);
            }
            NodeKind::ThematicBreak => {
                ui.add_space(4.0);
                let rect = ui
                    .allocate_space(egui::vec2(ui.available_width(), 2.0))
                    .1;
                ui.painter().hline(
                    rect.x_range(),
                    rect.center().y,
                    Stroke::new(1.0, self.colors.preview.rule),
                );
                ui.add_space(4.0);
            }
            NodeKind::Html(raw) => {
                ui.label(
                    egui::RichText::new(raw.trim_end())
                        .font(FontId::monospace(self.font_size - 1.0))
                        .color(self.colors.text.muted),
                );
            }
            // Inline nodes reaching here render as a bare paragraph
            _ => {
                ui.label(self.inline_job(node, InlineStyle::default()));
            }
        }
    }

    fn styled_block(&self, ui: &mut Ui, node: &Node, indent: usize, style: InlineStyle) {
        if matches!(node.kind, NodeKind::Paragraph) {
            ui.label(self.inline_job(node, style));
            ui.add_space(2.0);
        } else {
            self.block(ui, node, indent);
        }
    }

    fn list(&self, ui: &mut Ui, node: &Node, kind: ListKind, indent: usize) {
        let mut ordinal = match kind {
            ListKind::Ordered { start } => start,
            ListKind::Bullet => 0,
        };
        for item in &node.children {
            let marker = match (&item.kind, kind) {
                (NodeKind::TaskItem { checked: true }, _) => "☑".to_string(),
                (NodeKind::TaskItem { checked: false }, _) => "☐".to_string(),
                (_, ListKind::Ordered { .. }) => {
                    let m = format!("{ordinal}.");
                    ordinal += 1;
                    m
                }
                (_, ListKind::Bullet) => "•".to_string(),
            };
            ui.horizontal_top(|ui| {
                ui.add_space(indent as f32 * 18.0 + 4.0);
                ui.label(
                    egui::RichText::new(marker)
                        .font(FontId::proportional(self.font_size))
                        .color(self.colors.text.muted),
                );
                ui.vertical(|ui| {
                    for child in &item.children {
                        self.block(ui, child, indent + 1);
                    }
                });
            });
        }
        ui.add_space(2.0);
    }

    fn heading_size(&self, level: u8) -> f32 {
        let factor = match level {
            1 => 2.0,
            2 => 1.6,
            3 => 1.3,
            4 => 1.15,
            5 => 1.0,
            _ => 0.9,
        };
        self.font_size * factor
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Inline Rendering
    // ─────────────────────────────────────────────────────────────────────────

    fn inline_job(&self, node: &Node, style: InlineStyle) -> LayoutJob {
        let mut job = LayoutJob::default();
        self.collect_inlines(&mut job, node, style, self.font_size);
        job
    }

    fn collect_inlines(&self, job: &mut LayoutJob, node: &Node, style: InlineStyle, size: f32) {
        for child in &node.children {
            match &child.kind {
                NodeKind::Text(text) => {
                    job.append(text, 0.0, self.format(style, size));
                }
                NodeKind::Code(code) => {
                    let mut format = self.format(style, size - 1.0);
                    format.font_id = FontId::monospace(size - 1.0);
                    format.color = self.colors.text.code;
                    format.background = self.colors.preview.code_background;
                    job.append(code, 0.0, format);
                }
                NodeKind::SoftBreak => {
                    job.append(" ", 0.0, self.format(style, size));
                }
                NodeKind::LineBreak => {
                    job.append("\n", 0.0, self.format(style, size));
                }
                NodeKind::Emphasis(SpanStyle::Emphasis) => {
                    self.collect_inlines(job, child, style.italic(), size);
                }
                NodeKind::Emphasis(SpanStyle::Underline) => {
                    self.collect_inlines(job, child, style.underlined(), size);
                }
                NodeKind::Strong => {
                    self.collect_inlines(job, child, style.strong(), size);
                }
                NodeKind::Strikethrough => {
                    self.collect_inlines(job, child, style.struck(), size);
                }
                NodeKind::Link { .. } => {
                    let style = InlineStyle {
                        color: Some(self.colors.text.link),
                        ..style
                    };
                    self.collect_inlines(job, child, style.underlined(), size);
                }
                NodeKind::Image { url } => {
                    let label = format!("🖼 {}", child.plain_text());
                    let mut format = self.format(style, size);
                    format.color = self.colors.text.muted;
                    job.append(label.trim(), 0.0, format);
                    let _ = url;
                }
                NodeKind::Html(raw) => {
                    let mut format = self.format(style, size - 1.0);
                    format.font_id = FontId::monospace(size - 1.0);
                    format.color = self.colors.text.muted;
                    job.append(raw, 0.0, format);
                }
                // Nested block inside an inline context: flatten to text
                _ => {
                    self.collect_inlines(job, child, style, size);
                }
            }
        }
    }

    fn format(&self, style: InlineStyle, size: f32) -> TextFormat {
        let color = style.color.unwrap_or(self.colors.text.primary);
        // egui has no bold weight without a registered bold font, so strong
        // text gets the heading color instead.
        let color = if style.strong {
            self.colors.preview.heading
        } else {
            color
        };
        TextFormat {
            font_id: FontId::proportional(size),
            color,
            italics: style.italic,
            underline: if style.underline {
                Stroke::new(1.0, color)
            } else {
                Stroke::NONE
            },
            strikethrough: if style.strike {
                Stroke::new(1.0, color)
            } else {
                Stroke::NONE
            },
            ..Default::default()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Inline Style State
// ─────────────────────────────────────────────────────────────────────────────

/// Accumulated inline styling while descending the inline tree.
#[derive(Debug, Clone, Copy, Default)]
struct InlineStyle {
    strong: bool,
    italic: bool,
    underline: bool,
    strike: bool,
    color: Option<Color32>,
}

impl InlineStyle {
    fn strong(self) -> Self {
        Self {
            strong: true,
            ..self
        }
    }

    fn italic(self) -> Self {
        Self {
            italic: true,
            ..self
        }
    }

    fn underlined(self) -> Self {
        Self {
            underline: true,
            ..self
        }
    }

    fn struck(self) -> Self {
        Self {
            strike: true,
            ..self
        }
    }
}
