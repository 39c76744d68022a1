//! Sending a validated file to the classification endpoint.
//!
//! The busy state is entered by the caller once validation allowed the
//! submission and is only left when the endpoint answers, mirroring a form
//! post whose response replaces the page.

use std::fmt::Debug;
use std::io::Cursor;

use ehttp::multipart::MultipartBuilder;
use flume::{Receiver, Sender};
use thiserror::Error;
use ustr::Ustr;

use crate::{AlertId, AlertPresenter, CandidateFile, Severity};

/// Longest server message shown to the user.
const MAX_MESSAGE_CHARS: usize = 200;

/// Callback invoked once with the outcome of a submission.
pub type SubmitDone = Box<dyn FnOnce(Result<SubmissionResponse, SubmitError>) + Send + 'static>;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("could not build upload request: {0}")]
    Build(#[from] std::io::Error),
    #[error("upload failed: {0}")]
    Transport(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResponse {
    pub status: u16,
    pub ok: bool,
    pub message: String,
}

impl SubmissionResponse {
    fn from_http(response: &ehttp::Response) -> Self {
        let body = response.text().map(str::trim).unwrap_or_default();
        let message = if body.is_empty() {
            format!("{} {}", response.status, response.status_text)
        } else {
            body.chars().take(MAX_MESSAGE_CHARS).collect()
        };

        Self {
            status: response.status,
            ok: response.ok,
            message,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmitState {
    #[default]
    Idle,
    /// Waiting for the endpoint; the submit control is disabled.
    Busy {
        file_name: String,
        /// Preview generation of the selection being uploaded.
        generation: u64,
    },
}

impl SubmitState {
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Busy { .. })
    }

    /// Name of the file being uploaded.
    pub fn file_name(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Busy { file_name, .. } => Some(file_name),
        }
    }
}

/// A server answer together with the selection it was sent for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishedSubmission {
    pub response: SubmissionResponse,
    pub generation: u64,
}

/// Transport used to post the upload form.
pub trait FormSubmitter: Send + Sync + Debug {
    fn submit(&self, file: &CandidateFile, on_done: SubmitDone);
}

/// Builds the `multipart/form-data` POST carrying `file` as field `file`.
pub fn build_upload_request(
    endpoint: &str,
    file: &CandidateFile,
) -> std::io::Result<ehttp::Request> {
    let mut content = Cursor::new(file.load()?);
    let form = MultipartBuilder::new().add_stream(
        &mut content,
        "file",
        Some(file.name()),
        None,
    )?;
    Ok(ehttp::Request::multipart(endpoint, form))
}

#[derive(Debug, Clone)]
pub struct EhttpSubmitter {
    endpoint: Ustr,
}

impl EhttpSubmitter {
    pub fn new(endpoint: Ustr) -> Self {
        Self { endpoint }
    }
}

impl FormSubmitter for EhttpSubmitter {
    fn submit(&self, file: &CandidateFile, on_done: SubmitDone) {
        let request = match build_upload_request(self.endpoint.as_str(), file) {
            Ok(request) => request,
            Err(err) => {
                on_done(Err(SubmitError::Build(err)));
                return;
            }
        };

        log::info!(
            target: "leafcheck_business::submit",
            "POST {} name={} bytes={}",
            self.endpoint,
            file.name(),
            file.size_bytes()
        );

        ehttp::fetch(request, move |result| match result {
            Ok(response) => {
                log::info!(
                    target: "leafcheck_business::submit",
                    "upload answered status={}",
                    response.status
                );
                on_done(Ok(SubmissionResponse::from_http(&response)));
            }
            Err(err) => {
                log::warn!(target: "leafcheck_business::submit", "upload error: {}", err);
                on_done(Err(SubmitError::Transport(err)));
            }
        });
    }
}

/// Submit button state plus the results channel of the upload in flight.
#[derive(Debug)]
pub struct Submission {
    submitter: Box<dyn FormSubmitter>,
    state: SubmitState,
    /// The pinned answer to the previous upload, replaced by the next one.
    response_alert: Option<AlertId>,
    result_sender: Sender<Result<SubmissionResponse, SubmitError>>,
    result_receiver: Receiver<Result<SubmissionResponse, SubmitError>>,
}

impl Submission {
    pub fn new(submitter: Box<dyn FormSubmitter>) -> Self {
        let (result_sender, result_receiver) = flume::unbounded();
        Self {
            submitter,
            state: SubmitState::Idle,
            response_alert: None,
            result_sender,
            result_receiver,
        }
    }

    pub fn state(&self) -> &SubmitState {
        &self.state
    }

    /// Enters the busy state and posts `file`, selected in preview
    /// `generation`. Ignored while already busy.
    pub fn start(&mut self, file: &CandidateFile, generation: u64) -> bool {
        if self.state.is_busy() {
            log::debug!(target: "leafcheck_business::submit", "already submitting");
            return false;
        }

        self.state = SubmitState::Busy {
            file_name: file.name().to_owned(),
            generation,
        };
        let sender = self.result_sender.clone();
        self.submitter.submit(
            file,
            Box::new(move |result| {
                if sender.send(result).is_err() {
                    log::trace!(
                        target: "leafcheck_business::submit",
                        "submission dropped before the response arrived"
                    );
                }
            }),
        );
        true
    }

    /// Applies a finished upload, pinning the server's answer as an alert
    /// in place of the previous answer.
    pub fn poll(&mut self, alerts: &mut AlertPresenter) -> Option<FinishedSubmission> {
        let result = self.result_receiver.try_recv().ok()?;
        let SubmitState::Busy { generation, .. } = std::mem::take(&mut self.state) else {
            log::warn!(
                target: "leafcheck_business::submit",
                "upload result arrived while idle"
            );
            return None;
        };

        if let Some(previous) = self.response_alert.take() {
            alerts.dismiss(previous);
        }

        match result {
            Ok(response) => {
                let severity = if response.ok {
                    Severity::Success
                } else {
                    Severity::Error
                };
                self.response_alert = Some(alerts.pin(response.message.clone(), severity));
                Some(FinishedSubmission {
                    response,
                    generation,
                })
            }
            Err(err) => {
                self.response_alert = Some(alerts.pin(err.to_string(), Severity::Error));
                None
            }
        }
    }
}
