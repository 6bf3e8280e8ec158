// Hide console window on Windows in release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! Demo host for the markpad widget
//!
//! Stands in for an embedding application: owns the shared state cells,
//! shows the committed value next to the widget, and lets the default value
//! and theme be changed at runtime to exercise reseeding and styling.

use eframe::egui;
use log::info;
use markpad::error::ResultExt;
use markpad::{EditorOptions, HostBindings, MarkdownPad, Theme};

const APP_NAME: &str = "markpad demo";

const STARTER_DOCUMENT: &str = "\
# Welcome

Type on the left, read on the right.

Try *italic*, **bold** and _underline_ from the toolbar.
";

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting {}", APP_NAME);

    let viewport = eframe::egui::ViewportBuilder::default()
        .with_title(APP_NAME)
        .with_inner_size([1100.0, 720.0])
        .with_min_inner_size([500.0, 360.0]);

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        native_options,
        Box::new(|_cc| Ok(Box::new(DemoApp::new()))),
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Demo App
// ─────────────────────────────────────────────────────────────────────────────

struct DemoApp {
    bindings: HostBindings,
    pad: MarkdownPad,
    /// Host-side editable copy of the default value cell.
    default_draft: String,
    dark: bool,
}

impl DemoApp {
    fn new() -> Self {
        let bindings = HostBindings::with_values(None, Some(STARTER_DOCUMENT.to_string()));

        // Options arrive as JSON in real embeddings; MARKPAD_OPTIONS lets the
        // demo exercise the same path.
        let options = match std::env::var("MARKPAD_OPTIONS") {
            Ok(json) => EditorOptions::from_json_sanitized(&json)
                .unwrap_or_warn_default(EditorOptions::default(), "MARKPAD_OPTIONS"),
            Err(_) => EditorOptions::default(),
        };

        let pad = MarkdownPad::new(bindings.clone(), options);

        Self {
            bindings,
            pad,
            default_draft: STARTER_DOCUMENT.to_string(),
            dark: false,
        }
    }

    fn host_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Host state");
        ui.add_space(4.0);

        if ui.checkbox(&mut self.dark, "Dark theme").changed() {
            let name = if self.dark { "dark" } else { "light" };
            self.bindings.theme.set(Some(name.to_string()));
            let theme = Theme::from_host_str(self.bindings.theme.get().as_deref());
            ui.ctx().set_visuals(if theme.is_dark() {
                egui::Visuals::dark()
            } else {
                egui::Visuals::light()
            });
        }

        ui.add_space(8.0);
        ui.label("Default value (push to reseed the widget):");
        ui.add(
            egui::TextEdit::multiline(&mut self.default_draft)
                .desired_rows(4)
                .desired_width(f32::INFINITY),
        );
        if ui.button("Set default").clicked() {
            self.bindings
                .default_value
                .set(Some(self.default_draft.clone()));
        }

        ui.add_space(8.0);
        ui.separator();
        ui.label(format!(
            "Publish pending: {}",
            self.pad.is_publish_pending()
        ));
        ui.label("Committed value:");
        egui::ScrollArea::vertical()
            .id_source("committed-scroll")
            .max_height(220.0)
            .show(ui, |ui| {
                let committed = self.bindings.value.get();
                ui.monospace(committed.as_deref().unwrap_or("(undefined)"));
            });
    }
}

impl eframe::App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::right("host")
            .default_width(300.0)
            .show(ctx, |ui| {
                self.host_panel(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.pad.show(ui);
        });
    }
}
