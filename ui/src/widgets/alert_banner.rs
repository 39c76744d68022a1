//! Alert banners above the upload form.

use egui::{Frame, Margin, RichText, Ui};
use leafcheck_business::{Alert, AlertId, AlertPresenter};

use crate::utils::colors::{severity_color, severity_text_color};

/// Renders every visible alert. Each banner has a close button that
/// dismisses it early.
pub fn alert_banner(alerts: &mut AlertPresenter, ui: &mut Ui) {
    let mut dismissed: Option<AlertId> = None;

    for alert in alerts.alerts() {
        if alert_row(alert, ui) {
            dismissed = Some(alert.id);
        }
    }

    if let Some(id) = dismissed {
        alerts.dismiss(id);
    }
}

/// Draws one banner. Returns true when its close button was clicked.
fn alert_row(alert: &Alert, ui: &mut Ui) -> bool {
    let text_color = severity_text_color(alert.severity);

    Frame::NONE
        .fill(severity_color(alert.severity))
        .inner_margin(Margin::symmetric(12, 6))
        .outer_margin(Margin::symmetric(0, 4))
        .corner_radius(4.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new(format!("{} {}", alert.severity.icon(), alert.message))
                        .color(text_color),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add(
                        egui::Button::new(RichText::new("✖").color(text_color)).frame(false),
                    )
                    .on_hover_text("Dismiss")
                    .clicked()
                })
                .inner
            })
            .inner
        })
        .inner
}
