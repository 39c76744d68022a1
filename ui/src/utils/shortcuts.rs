//! Keyboard shortcuts of the upload page.

use egui::{Key, KeyboardShortcut, Modifiers};

const OPEN_PICKER: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::U);

/// Key bindings shown in the help overlay, in display order.
pub const SHORTCUTS: [(&str, &str); 3] = [
    ("Ctrl+U / ⌘U", "Choose an image"),
    ("Esc", "Close overlays"),
    ("F1", "Show or hide this help"),
];

/// Shortcuts pressed during the current frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Shortcuts {
    pub open_picker: bool,
    pub dismiss_overlays: bool,
    pub toggle_help: bool,
}

impl Shortcuts {
    pub fn read(ctx: &egui::Context) -> Self {
        ctx.input_mut(|i| Self {
            open_picker: i.consume_shortcut(&OPEN_PICKER),
            dismiss_overlays: i.key_pressed(Key::Escape),
            toggle_help: i.key_pressed(Key::F1),
        })
    }
}
