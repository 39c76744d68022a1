use chrono::{DateTime, Utc};
use leafcheck_business::{
    AlertPresenter, BackgroundDecoder, CandidateFile, EhttpSubmitter, FormSubmitter, ImageDecoder,
    PreviewController, Submission, UploadConfig,
};

use crate::utils::overlay::{Overlay, dismiss_all};
use crate::widgets::{ImagePreviewState, ShortcutHelpState};

/// The main application state.
pub struct State {
    pub config: UploadConfig,
    /// Current form value and the preview derived from it.
    pub preview: PreviewController,
    pub alerts: AlertPresenter,
    pub submission: Submission,
    pub image_preview: ImagePreviewState,
    pub shortcut_help: ShortcutHelpState,
    /// Files are being dragged over the window.
    pub drop_hovering: bool,
    /// The chooser button was clicked; the picker opens next frame.
    pub picker_requested: bool,
}

impl Default for State {
    fn default() -> Self {
        Self::new(UploadConfig::default())
    }
}

impl State {
    pub fn new(config: UploadConfig) -> Self {
        let submitter = EhttpSubmitter::new(config.endpoint());
        Self::with_services(config, Box::new(BackgroundDecoder), Box::new(submitter))
    }

    /// Builds the state around explicit decode and upload back ends.
    pub fn with_services(
        config: UploadConfig,
        decoder: Box<dyn ImageDecoder>,
        submitter: Box<dyn FormSubmitter>,
    ) -> Self {
        Self {
            alerts: AlertPresenter::with_timeout(config.alert_timeout()),
            preview: PreviewController::new(decoder),
            submission: Submission::new(submitter),
            image_preview: ImagePreviewState::new(),
            shortcut_help: ShortcutHelpState::default(),
            drop_hovering: false,
            picker_requested: false,
            config,
        }
    }

    /// Feeds a picked or dropped file into the form.
    pub fn select_file(&mut self, file: Option<CandidateFile>) {
        self.preview.on_file_selected(file, &mut self.alerts);
    }

    /// Submits the current file unless validation vetoes it or an upload
    /// is already running.
    pub fn submit(&mut self) -> bool {
        if self.submission.state().is_busy() {
            return false;
        }
        if !self.preview.on_submit(&mut self.alerts) {
            return false;
        }
        let Some(file) = self.preview.current_file().cloned() else {
            return false;
        };
        self.submission.start(&file, self.preview.generation())
    }

    /// Applies finished background work and expires alerts.
    ///
    /// A successful upload clears the form, leaving the server's answer
    /// pinned above it. A file selected while the upload was running is
    /// kept.
    pub fn poll(&mut self, now: DateTime<Utc>) {
        self.preview.poll_decodes(&mut self.alerts);

        let generation = self.preview.generation();
        let finished = self.submission.poll(&mut self.alerts);
        if finished
            .is_some_and(|finished| finished.response.ok && finished.generation == generation)
        {
            self.preview.reset();
        }

        self.alerts.tick(now);
    }

    /// Closes the maximized preview and the shortcut help.
    pub fn dismiss_overlays(&mut self) -> usize {
        dismiss_all(&mut [&mut self.image_preview, &mut self.shortcut_help])
    }

    pub fn toggle_shortcut_help(&mut self) {
        self.shortcut_help.toggle();
    }
}
