//! File picker for the "Choose image" button and the Ctrl+U / Cmd+U shortcut.
//!
//! Native builds block on an `rfd` dialog, as a form's file input would.
//! The browser dialog is asynchronous, so on the web the chosen file arrives
//! through a channel in a later frame.

use leafcheck_business::CandidateFile;

/// Extensions offered by the dialog filter. Anything else picked through
/// "All files" still goes through validation.
pub const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

/// Source of picked files, replaceable by mocks in tests.
pub trait FilePickerHandler {
    /// Opens the dialog when `open` is set and returns a file once the user
    /// chose one. A cancelled dialog yields nothing.
    fn handle_file_pick(&self, ctx: &egui::Context, open: bool) -> Option<CandidateFile>;
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct SystemFilePickerHandler;

#[cfg(not(target_arch = "wasm32"))]
impl FilePickerHandler for SystemFilePickerHandler {
    fn handle_file_pick(&self, _ctx: &egui::Context, open: bool) -> Option<CandidateFile> {
        if !open {
            return None;
        }
        pick_image_file()
    }
}

/// Opens a native dialog and reads the chosen file.
#[cfg(not(target_arch = "wasm32"))]
pub fn pick_image_file() -> Option<CandidateFile> {
    let path = rfd::FileDialog::new()
        .add_filter("Image", &IMAGE_EXTENSIONS)
        .add_filter("All files", &["*"])
        .set_title("Select a leaf image")
        .pick_file()?;

    log::info!(target: "leafcheck_ui::picker", "User selected file: {:?}", path);
    load_candidate(&path)
}

#[cfg(not(target_arch = "wasm32"))]
fn load_candidate(path: &std::path::Path) -> Option<CandidateFile> {
    match CandidateFile::from_path(path) {
        Ok(candidate) => Some(candidate),
        Err(err) => {
            log::warn!(
                target: "leafcheck_ui::picker",
                "Failed to read file {:?}: {}",
                path,
                err
            );
            None
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[derive(Debug)]
pub struct SystemFilePickerHandler {
    picked_sender: flume::Sender<CandidateFile>,
    picked_receiver: flume::Receiver<CandidateFile>,
}

#[cfg(target_arch = "wasm32")]
impl Default for SystemFilePickerHandler {
    fn default() -> Self {
        let (picked_sender, picked_receiver) = flume::unbounded();
        Self {
            picked_sender,
            picked_receiver,
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl FilePickerHandler for SystemFilePickerHandler {
    fn handle_file_pick(&self, ctx: &egui::Context, open: bool) -> Option<CandidateFile> {
        if open {
            let sender = self.picked_sender.clone();
            let ctx = ctx.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let Some(handle) = rfd::AsyncFileDialog::new()
                    .add_filter("Image", &IMAGE_EXTENSIONS)
                    .set_title("Select a leaf image")
                    .pick_file()
                    .await
                else {
                    return;
                };

                let name = handle.file_name();
                let bytes = handle.read().await;
                log::info!(
                    target: "leafcheck_ui::picker",
                    "User selected file: {} ({} bytes)",
                    name,
                    bytes.len()
                );
                if sender.send(CandidateFile::from_bytes(name, "", bytes)).is_ok() {
                    ctx.request_repaint();
                }
            });
        }

        self.picked_receiver.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockFilePickerHandlerEmpty;

    impl FilePickerHandler for MockFilePickerHandlerEmpty {
        fn handle_file_pick(&self, _ctx: &egui::Context, _open: bool) -> Option<CandidateFile> {
            None
        }
    }

    struct MockFilePickerHandlerWithFile {
        file: CandidateFile,
    }

    impl FilePickerHandler for MockFilePickerHandlerWithFile {
        fn handle_file_pick(&self, _ctx: &egui::Context, open: bool) -> Option<CandidateFile> {
            open.then(|| self.file.clone())
        }
    }

    #[test]
    fn test_mock_file_picker_handler_empty() {
        let ctx = egui::Context::default();
        assert!(
            MockFilePickerHandlerEmpty
                .handle_file_pick(&ctx, true)
                .is_none()
        );
    }

    #[test]
    fn test_mock_file_picker_only_answers_when_opened() {
        let handler = MockFilePickerHandlerWithFile {
            file: CandidateFile::new("leaf.png", "image/png", vec![0u8; 4]),
        };
        let ctx = egui::Context::default();

        assert!(handler.handle_file_pick(&ctx, false).is_none());
        let picked = handler.handle_file_pick(&ctx, true).expect("file");
        assert_eq!(picked.name(), "leaf.png");
    }

    #[test]
    fn test_file_picker_handler_trait_is_object_safe() {
        fn _accept_file_picker_handler(_handler: &dyn FilePickerHandler) {}
        _accept_file_picker_handler(&MockFilePickerHandlerEmpty);
    }

    #[cfg(not(target_arch = "wasm32"))]
    mod native_tests {
        use std::io::Write as _;

        use super::super::*;

        #[test]
        fn test_system_picker_stays_closed() {
            let ctx = egui::Context::default();
            assert!(
                SystemFilePickerHandler
                    .handle_file_pick(&ctx, false)
                    .is_none()
            );
        }

        #[test]
        fn test_load_candidate_missing_path() {
            let path = std::path::Path::new("/non/existent/path/leaf.png");
            assert!(load_candidate(path).is_none());
        }

        #[test]
        fn test_load_candidate_reads_file() {
            let mut temp = tempfile::Builder::new()
                .suffix(".webp")
                .tempfile()
                .expect("Failed to create temp file");
            temp.write_all(b"RIFF").expect("Failed to write temp file");

            let candidate = load_candidate(temp.path()).expect("candidate");
            assert_eq!(candidate.mime_type(), "image/webp");
            assert_eq!(candidate.size_bytes(), 4);
        }
    }
}
