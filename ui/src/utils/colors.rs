//! Shared color constants for the UI.

use egui::Color32;
use leafcheck_business::Severity;

/// Forest green for successful server responses.
pub const COLOR_GREEN: Color32 = Color32::from_rgb(34, 139, 34);

/// Red for rejected files and failed uploads.
pub const COLOR_RED: Color32 = Color32::from_rgb(220, 53, 69);

/// Amber for warnings.
pub const COLOR_AMBER: Color32 = Color32::from_rgb(255, 193, 7);

/// Blue for informational alerts and the primary button.
pub const COLOR_BLUE: Color32 = Color32::from_rgb(13, 110, 253);

/// Drop zone outline while files hover over the window.
pub const COLOR_DROP_HOVER: Color32 = Color32::from_rgb(100, 200, 255);

/// Banner background for an alert severity.
pub fn severity_color(severity: Severity) -> Color32 {
    match severity {
        Severity::Info => COLOR_BLUE,
        Severity::Success => COLOR_GREEN,
        Severity::Warning => COLOR_AMBER,
        Severity::Error => COLOR_RED,
    }
}

/// Text color that stays readable on [`severity_color`].
pub fn severity_text_color(severity: Severity) -> Color32 {
    match severity {
        Severity::Warning => Color32::BLACK,
        Severity::Info | Severity::Success | Severity::Error => Color32::WHITE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_alerts_are_red() {
        assert_eq!(severity_color(Severity::Error), COLOR_RED);
        assert_eq!(severity_color(Severity::Success), COLOR_GREEN);
        assert_eq!(severity_text_color(Severity::Warning), Color32::BLACK);
    }
}
