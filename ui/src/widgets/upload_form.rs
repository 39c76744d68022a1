//! The upload form: drop zone, file chooser, preview and submit button.

use egui::{Frame, Margin, RichText, Stroke, Ui};
use leafcheck_business::MAX_UPLOAD_BYTES;
use leafcheck_business::format_file_size;

use crate::state::State;
use crate::utils::colors::COLOR_DROP_HOVER;
use crate::widgets::{image_preview, submit_button};

pub const CHOOSE_LABEL: &str = "Choose image";
pub const REMOVE_LABEL: &str = "Remove image";

/// What the user asked for while the form was drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UploadFormAction {
    #[default]
    None,
    ChooseFile,
    /// Empty the form, as clearing a file input does.
    ClearFile,
    Submit,
}

pub fn upload_form(state: &mut State, ui: &mut Ui) -> UploadFormAction {
    let mut action = UploadFormAction::None;

    ui.vertical_centered(|ui| {
        ui.heading("Leaf Disease Detection");
        ui.label("Upload a photo of a plant leaf to check it for disease.");
        ui.add_space(12.0);

        if drop_zone(state.drop_hovering, ui) {
            action = UploadFormAction::ChooseFile;
        }

        ui.add_space(12.0);

        if state.preview.is_decoding() {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading preview...");
            });
        }
        image_preview(&mut state.image_preview, ui);

        if state.preview.current_file().is_some()
            && !state.submission.state().is_busy()
            && ui.small_button(REMOVE_LABEL).clicked()
        {
            action = UploadFormAction::ClearFile;
        }

        ui.add_space(12.0);

        if submit_button(state.submission.state(), ui).clicked() {
            action = UploadFormAction::Submit;
        }
    });

    action
}

/// Draws the drop target. Returns true when the chooser button was clicked.
fn drop_zone(hovering: bool, ui: &mut Ui) -> bool {
    let stroke = if hovering {
        Stroke::new(2.0, COLOR_DROP_HOVER)
    } else {
        ui.visuals().widgets.noninteractive.bg_stroke
    };
    let fill = if hovering {
        COLOR_DROP_HOVER.gamma_multiply(0.15)
    } else {
        ui.visuals().faint_bg_color
    };

    Frame::NONE
        .fill(fill)
        .stroke(stroke)
        .inner_margin(Margin::same(24))
        .corner_radius(8.0)
        .show(ui, |ui| {
            ui.vertical_centered(|ui| {
                let prompt = if hovering {
                    "Release to upload"
                } else {
                    "Drag & drop a leaf image here"
                };
                ui.label(RichText::new(prompt).strong());
                ui.label(RichText::new("or").weak());
                let clicked = ui.button(CHOOSE_LABEL).clicked();
                ui.label(
                    RichText::new(format!(
                        "PNG, JPG, JPEG or WebP, up to {}",
                        format_file_size(MAX_UPLOAD_BYTES)
                    ))
                    .small()
                    .weak(),
                );
                clicked
            })
            .inner
        })
        .inner
}
