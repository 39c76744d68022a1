//! Business logic behind the Leafcheck upload form.
//!
//! Everything here is UI-toolkit agnostic: the egui front end feeds user
//! events in and renders the resulting state.

mod alert;
mod candidate;
mod config;
mod decode;
mod format;
mod preview;
mod submit;
mod task;
mod validation;

pub use alert::{ALERT_TIMEOUT, Alert, AlertId, AlertPresenter, AlertSink, Severity};
pub use candidate::CandidateFile;
pub use config::UploadConfig;
pub use decode::{
    BackgroundDecoder, DecodeDone, DecodeError, DecodedImage, ImageDecoder, InlineDecoder,
    PreviewImage, decode_preview, to_data_url,
};
pub use format::format_file_size;
pub use preview::{PreviewController, PreviewState};
pub use submit::{
    EhttpSubmitter, FinishedSubmission, FormSubmitter, SubmissionResponse, SubmitDone,
    SubmitError, SubmitState, Submission, build_upload_request,
};
pub use task::{DecodeTask, TaskSlot};
pub use validation::{
    ALLOWED_MIME_TYPES, MAX_UPLOAD_BYTES, RejectReason, ValidationResult, validate,
    validate_submission,
};
