//! Submit control of the upload form.

use egui::{Response, RichText, Ui};
use leafcheck_business::SubmitState;

use crate::utils::colors::COLOR_BLUE;

pub const SUBMIT_LABEL: &str = "Analyze Image";
pub const BUSY_LABEL: &str = "Analyzing Image...";

/// Renders the submit button. While an upload is in flight it is disabled
/// and shows a spinner next to the name of the file being sent.
pub fn submit_button(state: &SubmitState, ui: &mut Ui) -> Response {
    ui.horizontal(|ui| {
        if let Some(file_name) = state.file_name() {
            ui.spinner();
            let response = ui.add_enabled(false, egui::Button::new(BUSY_LABEL));
            ui.label(RichText::new(format!("Sending {file_name}")).small().weak());
            response
        } else {
            ui.add(
                egui::Button::new(RichText::new(SUBMIT_LABEL).color(egui::Color32::WHITE))
                    .fill(COLOR_BLUE),
            )
        }
    })
    .inner
}
