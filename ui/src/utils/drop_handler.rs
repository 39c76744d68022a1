//! Drag-and-drop onto the upload form.
//!
//! Only the first dropped file is used. Native backends hand over a path,
//! browsers hand over the bytes together with the MIME type they detected.
//! Files are passed on unvalidated; type and size checks happen in the
//! preview controller so drops and picks are treated the same.

use leafcheck_business::CandidateFile;

/// Source of dropped files, replaceable by mocks in tests.
pub trait DropHandler {
    /// Returns the first file dropped this frame, if any.
    fn handle_drop(&self, ctx: &egui::Context) -> Option<CandidateFile>;

    /// True while files are dragged over the window.
    fn is_hovering(&self, ctx: &egui::Context) -> bool {
        ctx.input(|i| !i.raw.hovered_files.is_empty())
    }
}

/// Drop handler reading egui's raw input events.
#[derive(Debug, Default)]
pub struct SystemDropHandler;

impl DropHandler for SystemDropHandler {
    fn handle_drop(&self, ctx: &egui::Context) -> Option<CandidateFile> {
        let dropped_files = ctx.input(|i| i.raw.dropped_files.clone());
        let first = dropped_files.first()?;

        log::trace!(
            target: "leafcheck_ui::drop",
            "dropped_files={} first={}",
            dropped_files.len(),
            first.name
        );

        candidate_from_dropped_file(first)
    }
}

/// Builds a candidate from whatever the backend attached to the drop.
pub fn candidate_from_dropped_file(file: &egui::DroppedFile) -> Option<CandidateFile> {
    if let Some(bytes) = &file.bytes {
        let name = if file.name.is_empty() {
            file.path
                .as_ref()
                .and_then(|path| path.file_name())
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default()
        } else {
            file.name.clone()
        };
        return Some(CandidateFile::from_bytes(name, &file.mime, bytes.clone()));
    }

    if let Some(path) = &file.path {
        return match CandidateFile::from_path(path) {
            Ok(candidate) => Some(candidate),
            Err(err) => {
                log::warn!(
                    target: "leafcheck_ui::drop",
                    "dropped_file_unreadable path={:?} err={}",
                    path,
                    err
                );
                None
            }
        };
    }

    log::warn!(
        target: "leafcheck_ui::drop",
        "dropped_file_missing_path_and_bytes name={}",
        file.name
    );
    None
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;
    use std::sync::Arc;

    use super::*;

    struct MockDropHandlerEmpty;

    impl DropHandler for MockDropHandlerEmpty {
        fn handle_drop(&self, _ctx: &egui::Context) -> Option<CandidateFile> {
            None
        }
    }

    #[test]
    fn test_mock_drop_handler_empty() {
        let ctx = egui::Context::default();
        assert!(MockDropHandlerEmpty.handle_drop(&ctx).is_none());
        assert!(!MockDropHandlerEmpty.is_hovering(&ctx));
    }

    #[test]
    fn test_system_drop_handler_without_drops() {
        let ctx = egui::Context::default();
        assert!(SystemDropHandler.handle_drop(&ctx).is_none());
    }

    #[test]
    fn test_drop_handler_trait_is_object_safe() {
        fn _accept_drop_handler(_handler: &dyn DropHandler) {}
        _accept_drop_handler(&SystemDropHandler);
    }

    #[test]
    fn test_web_drop_uses_browser_mime() {
        let dropped = egui::DroppedFile {
            name: "leaf.png".to_owned(),
            mime: "image/png".to_owned(),
            bytes: Some(Arc::from(vec![1u8, 2, 3])),
            ..Default::default()
        };

        let candidate = candidate_from_dropped_file(&dropped).expect("candidate");
        assert_eq!(candidate.name(), "leaf.png");
        assert_eq!(candidate.mime_type(), "image/png");
        assert_eq!(candidate.size_bytes(), 3);
    }

    #[test]
    fn test_web_drop_without_mime_guesses_from_name() {
        let dropped = egui::DroppedFile {
            name: "notes.pdf".to_owned(),
            bytes: Some(Arc::from(vec![0u8; 10])),
            ..Default::default()
        };

        let candidate = candidate_from_dropped_file(&dropped).expect("candidate");
        assert_eq!(candidate.mime_type(), "application/pdf");
    }

    #[test]
    fn test_native_drop_reads_path() {
        let mut temp = tempfile::Builder::new()
            .suffix(".jpg")
            .tempfile()
            .expect("Failed to create temp file");
        temp.write_all(&[0xFF, 0xD8, 0xFF])
            .expect("Failed to write temp file");

        let dropped = egui::DroppedFile {
            path: Some(temp.path().to_path_buf()),
            ..Default::default()
        };

        let candidate = candidate_from_dropped_file(&dropped).expect("candidate");
        assert_eq!(candidate.mime_type(), "image/jpeg");
        assert_eq!(candidate.size_bytes(), 3);
    }

    #[test]
    fn test_drop_without_payload_is_ignored() {
        let dropped = egui::DroppedFile {
            name: "ghost.png".to_owned(),
            ..Default::default()
        };
        assert!(candidate_from_dropped_file(&dropped).is_none());
    }
}
