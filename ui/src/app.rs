use std::time::Duration;

use chrono::Utc;

use crate::utils::drop_handler::{DropHandler, SystemDropHandler};
use crate::utils::file_picker::{FilePickerHandler, SystemFilePickerHandler};
use crate::utils::shortcuts::Shortcuts;
use crate::{state::State, widgets};

/// Polling interval while a decode or an upload is in flight.
const BUSY_REPAINT_INTERVAL: Duration = Duration::from_millis(50);

pub struct LeafcheckApp {
    pub state: State,
    drop_handler: Box<dyn DropHandler>,
    file_picker: Box<dyn FilePickerHandler>,
}

impl LeafcheckApp {
    /// Called once before the first frame.
    pub fn new(state: State) -> Self {
        Self::with_handlers(
            state,
            Box::new(SystemDropHandler),
            Box::new(SystemFilePickerHandler::default()),
        )
    }

    /// Uses the given input sources instead of the system ones.
    pub fn with_handlers(
        state: State,
        drop_handler: Box<dyn DropHandler>,
        file_picker: Box<dyn FilePickerHandler>,
    ) -> Self {
        Self {
            state,
            drop_handler,
            file_picker,
        }
    }

    fn handle_input(&mut self, ctx: &egui::Context) {
        let shortcuts = Shortcuts::read(ctx);
        if shortcuts.dismiss_overlays {
            self.state.dismiss_overlays();
        }
        if shortcuts.toggle_help {
            self.state.toggle_shortcut_help();
        }

        let open_picker =
            shortcuts.open_picker || std::mem::take(&mut self.state.picker_requested);
        if let Some(file) = self.file_picker.handle_file_pick(ctx, open_picker) {
            self.state.select_file(Some(file));
        }

        self.state.drop_hovering = self.drop_handler.is_hovering(ctx);
        if let Some(file) = self.drop_handler.handle_drop(ctx) {
            self.state.select_file(Some(file));
        }
    }

    fn schedule_repaint(&self, ctx: &egui::Context) {
        if self.state.preview.is_decoding() || self.state.submission.state().is_busy() {
            ctx.request_repaint_after(BUSY_REPAINT_INTERVAL);
        }

        if let Some(expiry) = self.state.alerts.next_expiry() {
            let remaining = (expiry - Utc::now()).to_std().unwrap_or(Duration::ZERO);
            ctx.request_repaint_after(remaining);
        }
    }
}

impl eframe::App for LeafcheckApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll(Utc::now());
        self.handle_input(ctx);

        let generation = self.state.preview.generation();
        self.state
            .image_preview
            .sync(ctx, generation, self.state.preview.state().image());

        egui::TopBottomPanel::top("alerts_panel").show(ctx, |ui| {
            widgets::alert_banner(&mut self.state.alerts, ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                match widgets::upload_form(&mut self.state, ui) {
                    widgets::UploadFormAction::ChooseFile => {
                        self.state.picker_requested = true;
                        ctx.request_repaint();
                    }
                    widgets::UploadFormAction::ClearFile => {
                        self.state.select_file(None);
                    }
                    widgets::UploadFormAction::Submit => {
                        self.state.submit();
                    }
                    widgets::UploadFormAction::None => {}
                }
                ui.add_space(16.0);
                ui.label(egui::RichText::new("Press F1 for keyboard shortcuts").small().weak());
            });
        });

        widgets::maximized_preview(&mut self.state.image_preview, ctx);
        widgets::shortcut_help(&mut self.state.shortcut_help, ctx);

        self.schedule_repaint(ctx);
    }
}
