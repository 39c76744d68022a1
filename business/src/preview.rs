//! Preview state machine for the upload form.
//!
//! `PreviewState` is only ever `Shown` for the most recent selection, and
//! only after that selection passed validation and decoded successfully. Any
//! newer selection hides the preview first and invalidates decodes that are
//! still running, so a late result can never resurrect a stale preview.

use flume::{Receiver, Sender};

use crate::{
    AlertSink, CandidateFile, DecodeError, ImageDecoder, PreviewImage, RejectReason, Severity,
    TaskSlot, ValidationResult, validate, validate_submission,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PreviewState {
    #[default]
    Hidden,
    Shown(PreviewImage),
}

impl PreviewState {
    pub fn is_shown(&self) -> bool {
        matches!(self, Self::Shown(_))
    }

    pub fn image(&self) -> Option<&PreviewImage> {
        match self {
            Self::Hidden => None,
            Self::Shown(image) => Some(image),
        }
    }
}

#[derive(Debug)]
struct DecodeCompletion {
    generation: u64,
    result: Result<PreviewImage, DecodeError>,
}

/// Owns the current form value and the preview derived from it.
#[derive(Debug)]
pub struct PreviewController {
    decoder: Box<dyn ImageDecoder>,
    state: PreviewState,
    current_file: Option<CandidateFile>,
    slot: TaskSlot,
    completion_sender: Sender<DecodeCompletion>,
    completion_receiver: Receiver<DecodeCompletion>,
}

impl PreviewController {
    pub fn new(decoder: Box<dyn ImageDecoder>) -> Self {
        let (completion_sender, completion_receiver) = flume::unbounded();
        Self {
            decoder,
            state: PreviewState::Hidden,
            current_file: None,
            slot: TaskSlot::default(),
            completion_sender,
            completion_receiver,
        }
    }

    pub fn state(&self) -> &PreviewState {
        &self.state
    }

    /// The file the form would submit right now.
    pub fn current_file(&self) -> Option<&CandidateFile> {
        self.current_file.as_ref()
    }

    /// Changes with every selection; a shown preview belongs to this
    /// generation.
    pub fn generation(&self) -> u64 {
        self.slot.generation()
    }

    /// True while an accepted file is still being decoded.
    pub fn is_decoding(&self) -> bool {
        self.slot.is_pending()
    }

    /// Handles a file-picker change or a drop.
    ///
    /// A rejected file stays the current form value so a later submit
    /// re-validates and vetoes it.
    pub fn on_file_selected(
        &mut self,
        file: Option<CandidateFile>,
        alerts: &mut dyn AlertSink,
    ) -> Option<ValidationResult> {
        self.state = PreviewState::Hidden;

        let Some(file) = file else {
            self.slot.invalidate();
            self.current_file = None;
            return None;
        };

        let result = validate(&file);
        match result {
            ValidationResult::Rejected(reason) => {
                self.slot.invalidate();
                log::info!(
                    target: "leafcheck_business::preview",
                    "rejected {} ({}, {} bytes): {}",
                    file.name(),
                    file.mime_type(),
                    file.size_bytes(),
                    reason.code()
                );
                alerts.present(&reason.to_string(), Severity::Error);
            }
            ValidationResult::Accepted => {
                let task = self.slot.begin();
                let generation = task.generation();
                let sender = self.completion_sender.clone();
                log::debug!(
                    target: "leafcheck_business::preview",
                    "decode {} generation={}",
                    file.name(),
                    generation
                );
                self.decoder.decode(
                    task,
                    file.clone(),
                    Box::new(move |result| {
                        if sender
                            .send(DecodeCompletion { generation, result })
                            .is_err()
                        {
                            log::trace!(
                                target: "leafcheck_business::preview",
                                "controller dropped before decode generation={} finished",
                                generation
                            );
                        }
                    }),
                );
            }
        }

        self.current_file = Some(file);
        Some(result)
    }

    /// Applies finished decodes. Returns true when the preview changed.
    pub fn poll_decodes(&mut self, alerts: &mut dyn AlertSink) -> bool {
        let mut changed = false;

        while let Ok(DecodeCompletion { generation, result }) =
            self.completion_receiver.try_recv()
        {
            if !self.slot.finish(generation) {
                log::debug!(
                    target: "leafcheck_business::preview",
                    "drop stale decode generation={}",
                    generation
                );
                continue;
            }

            match result {
                Ok(image) => {
                    self.state = PreviewState::Shown(image);
                }
                Err(err) => {
                    log::warn!(
                        target: "leafcheck_business::preview",
                        "preview decode failed: {}",
                        err
                    );
                    self.state = PreviewState::Hidden;
                    alerts.present(&RejectReason::DecodeFailed.to_string(), Severity::Error);
                }
            }
            changed = true;
        }

        changed
    }

    /// Decides whether the form may be submitted.
    ///
    /// On `false` the caller must abort the submission; the reason has
    /// already been presented.
    pub fn on_submit(&self, alerts: &mut dyn AlertSink) -> bool {
        match validate_submission(self.current_file.as_ref()) {
            ValidationResult::Accepted => true,
            ValidationResult::Rejected(reason) => {
                log::info!(
                    target: "leafcheck_business::preview",
                    "submission vetoed: {}",
                    reason.code()
                );
                alerts.present(&reason.to_string(), Severity::Error);
                false
            }
        }
    }

    /// Forgets the current file and preview, e.g. after a finished upload.
    pub fn reset(&mut self) {
        self.slot.invalidate();
        self.state = PreviewState::Hidden;
        self.current_file = None;
    }
}
