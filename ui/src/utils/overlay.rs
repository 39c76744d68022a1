//! Windows drawn above the form: the maximized preview and the shortcut help.

/// Common capability of everything Escape should close.
pub trait Overlay {
    fn show(&mut self);

    fn hide(&mut self);

    fn is_visible(&self) -> bool;

    /// Closes the overlay on the user's request. Defaults to [`Overlay::hide`].
    fn dismiss(&mut self) {
        self.hide();
    }

    fn toggle(&mut self) {
        if self.is_visible() {
            self.hide();
        } else {
            self.show();
        }
    }
}

/// Dismisses every visible overlay. Returns how many were closed.
pub fn dismiss_all(overlays: &mut [&mut dyn Overlay]) -> usize {
    let mut closed = 0;
    for overlay in overlays.iter_mut().filter(|overlay| overlay.is_visible()) {
        overlay.dismiss();
        closed += 1;
    }
    if closed > 0 {
        log::debug!(target: "leafcheck_ui::overlay", "dismissed {} overlay(s)", closed);
    }
    closed
}
