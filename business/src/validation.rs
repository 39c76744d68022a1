//! Client-side checks run before a file is previewed or submitted.

use thiserror::Error;

use crate::CandidateFile;

/// MIME types the classification endpoint accepts, compared verbatim.
pub const ALLOWED_MIME_TYPES: [&str; 4] = ["image/png", "image/jpg", "image/jpeg", "image/webp"];

/// Largest accepted upload, inclusive (16 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;

/// Why a file was turned away. The `Display` text is the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("Invalid file type. Please select PNG, JPG, JPEG, or WEBP images only.")]
    InvalidType,
    #[error("File is too large. Maximum size is 16MB.")]
    TooLarge,
    /// Only produced when the form is submitted without a file.
    #[error("Please select an image file first.")]
    NoFile,
    #[error("Could not read the selected image. The file may be damaged.")]
    DecodeFailed,
}

impl RejectReason {
    /// Stable machine-readable code.
    pub fn code(self) -> &'static str {
        match self {
            Self::InvalidType => "invalid-type",
            Self::TooLarge => "too-large",
            Self::NoFile => "no-file",
            Self::DecodeFailed => "decode-failed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationResult {
    Accepted,
    Rejected(RejectReason),
}

/// Checks type first, then size. A file exactly at the ceiling passes.
pub fn validate(file: &CandidateFile) -> ValidationResult {
    if !ALLOWED_MIME_TYPES.contains(&file.mime_type()) {
        return ValidationResult::Rejected(RejectReason::InvalidType);
    }

    if file.size_bytes() > MAX_UPLOAD_BYTES {
        return ValidationResult::Rejected(RejectReason::TooLarge);
    }

    ValidationResult::Accepted
}

/// Validation applied when the form is submitted, where no file is an error.
pub fn validate_submission(file: Option<&CandidateFile>) -> ValidationResult {
    match file {
        Some(file) => validate(file),
        None => ValidationResult::Rejected(RejectReason::NoFile),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(mime: &str, size: u64) -> CandidateFile {
        CandidateFile::from_parts("leaf", mime, size, Vec::new())
    }

    #[test]
    fn accepts_every_allowed_type_within_limit() {
        for mime in ALLOWED_MIME_TYPES {
            for size in [0, 1, 2 * 1024 * 1024, MAX_UPLOAD_BYTES] {
                assert_eq!(
                    validate(&file(mime, size)),
                    ValidationResult::Accepted,
                    "{mime} with {size} bytes should be accepted"
                );
            }
        }
    }

    #[test]
    fn rejects_unknown_types_regardless_of_size() {
        for mime in ["application/pdf", "image/gif", "", "garbage", "IMAGE/PNG", "image/png "] {
            for size in [0, MAX_UPLOAD_BYTES + 1, u64::MAX] {
                assert_eq!(
                    validate(&file(mime, size)),
                    ValidationResult::Rejected(RejectReason::InvalidType),
                    "{mime:?} should be an invalid type"
                );
            }
        }
    }

    #[test]
    fn rejects_oversized_allowed_types() {
        for mime in ALLOWED_MIME_TYPES {
            assert_eq!(
                validate(&file(mime, 20 * 1024 * 1024)),
                ValidationResult::Rejected(RejectReason::TooLarge)
            );
        }
    }

    #[test]
    fn size_boundary_is_inclusive() {
        assert_eq!(
            validate(&file("image/png", 16_777_216)),
            ValidationResult::Accepted
        );
        assert_eq!(
            validate(&file("image/png", 16_777_217)),
            ValidationResult::Rejected(RejectReason::TooLarge)
        );
    }

    #[test]
    fn submission_without_file_is_no_file() {
        assert_eq!(
            validate_submission(None),
            ValidationResult::Rejected(RejectReason::NoFile)
        );
        assert_eq!(
            validate_submission(Some(&file("image/webp", 10))),
            ValidationResult::Accepted
        );
    }

    #[test]
    fn messages_and_codes() {
        assert_eq!(
            RejectReason::InvalidType.to_string(),
            "Invalid file type. Please select PNG, JPG, JPEG, or WEBP images only."
        );
        assert_eq!(
            RejectReason::TooLarge.to_string(),
            "File is too large. Maximum size is 16MB."
        );
        assert_eq!(
            RejectReason::NoFile.to_string(),
            "Please select an image file first."
        );
        assert_eq!(RejectReason::InvalidType.code(), "invalid-type");
        assert_eq!(RejectReason::TooLarge.code(), "too-large");
        assert_eq!(RejectReason::NoFile.code(), "no-file");
        assert_eq!(RejectReason::DecodeFailed.code(), "decode-failed");
    }
}
