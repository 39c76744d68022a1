use egui::{Context, RichText, Window};

use crate::utils::overlay::Overlay;
use crate::utils::shortcuts::SHORTCUTS;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ShortcutHelpState {
    visible: bool,
}

impl Overlay for ShortcutHelpState {
    fn show(&mut self) {
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Lists the keyboard shortcuts while toggled on with F1.
pub fn shortcut_help(state: &mut ShortcutHelpState, ctx: &Context) {
    if !state.visible {
        return;
    }

    let mut open = true;
    Window::new("Keyboard Shortcuts")
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::RIGHT_TOP, [-12.0, 12.0])
        .show(ctx, |ui| {
            egui::Grid::new("shortcut_help_grid")
                .num_columns(2)
                .spacing([16.0, 6.0])
                .show(ui, |ui| {
                    for (keys, action) in SHORTCUTS {
                        ui.label(RichText::new(keys).monospace().strong());
                        ui.label(action);
                        ui.end_row();
                    }
                });
        });

    if !open {
        state.hide();
    }
}
