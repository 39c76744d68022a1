#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use egui_kittest::Harness;
use image::ImageEncoder as _;
use image::codecs::png::PngEncoder;
use leafcheck_business::{
    CandidateFile, FormSubmitter, InlineDecoder, SubmissionResponse, SubmitDone, UploadConfig,
};
use leafcheck_ui::LeafcheckApp;
use leafcheck_ui::state::State;
use leafcheck_ui::utils::drop_handler::DropHandler;
use leafcheck_ui::utils::file_picker::FilePickerHandler;

pub const MB: u64 = 1024 * 1024;

/// Encodes a solid green PNG of the given size.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let pixels: Vec<u8> = [30u8, 160, 60, 255]
        .iter()
        .copied()
        .cycle()
        .take((width * height * 4) as usize)
        .collect();
    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(&pixels, width, height, image::ColorType::Rgba8.into())
        .expect("Failed to encode test PNG");
    png
}

pub fn leaf_png(width: u32, height: u32) -> CandidateFile {
    CandidateFile::new("leaf.png", "image/png", png_bytes(width, height))
}

/// Hands out one queued file on the next frame, like a real drop.
#[derive(Clone, Default)]
pub struct MockDropHandler {
    queued: Arc<Mutex<Option<CandidateFile>>>,
    hovering: Arc<AtomicBool>,
}

impl MockDropHandler {
    pub fn drop_file(&self, file: CandidateFile) {
        *self.queued.lock().expect("lock") = Some(file);
    }

    pub fn set_hovering(&self, hovering: bool) {
        self.hovering.store(hovering, Ordering::SeqCst);
    }
}

impl DropHandler for MockDropHandler {
    fn handle_drop(&self, _ctx: &egui::Context) -> Option<CandidateFile> {
        self.queued.lock().expect("lock").take()
    }

    fn is_hovering(&self, _ctx: &egui::Context) -> bool {
        self.hovering.load(Ordering::SeqCst)
    }
}

/// Answers every open request with the configured file.
#[derive(Clone, Default)]
pub struct MockFilePicker {
    next: Arc<Mutex<Option<CandidateFile>>>,
    opened: Arc<AtomicUsize>,
}

impl MockFilePicker {
    pub fn will_pick(&self, file: CandidateFile) {
        *self.next.lock().expect("lock") = Some(file);
    }

    pub fn times_opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }
}

impl FilePickerHandler for MockFilePicker {
    fn handle_file_pick(&self, _ctx: &egui::Context, open: bool) -> Option<CandidateFile> {
        if !open {
            return None;
        }
        self.opened.fetch_add(1, Ordering::SeqCst);
        self.next.lock().expect("lock").take()
    }
}

/// Holds uploads until the test answers them.
#[derive(Clone, Default)]
pub struct MockSubmitter {
    pending: Arc<Mutex<Vec<SubmitDone>>>,
    submitted: Arc<Mutex<Vec<String>>>,
}

impl std::fmt::Debug for MockSubmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockSubmitter").finish_non_exhaustive()
    }
}

impl MockSubmitter {
    pub fn submitted(&self) -> Vec<String> {
        self.submitted.lock().expect("lock").clone()
    }

    /// Answers the oldest pending upload.
    pub fn respond(&self, status: u16, message: &str) {
        let on_done = self.pending.lock().expect("lock").remove(0);
        on_done(Ok(SubmissionResponse {
            status,
            ok: (200..300).contains(&status),
            message: message.to_owned(),
        }));
    }
}

impl FormSubmitter for MockSubmitter {
    fn submit(&self, file: &CandidateFile, on_done: SubmitDone) {
        self.submitted
            .lock()
            .expect("lock")
            .push(file.name().to_owned());
        self.pending.lock().expect("lock").push(on_done);
    }
}

pub struct TestCtx {
    pub harness: Harness<'static, LeafcheckApp>,
    pub drops: MockDropHandler,
    pub picker: MockFilePicker,
    pub submitter: MockSubmitter,
}

impl TestCtx {
    pub fn new_app() -> Self {
        let drops = MockDropHandler::default();
        let picker = MockFilePicker::default();
        let submitter = MockSubmitter::default();

        let state = State::with_services(
            UploadConfig::default(),
            Box::new(InlineDecoder),
            Box::new(submitter.clone()),
        );
        let app =
            LeafcheckApp::with_handlers(state, Box::new(drops.clone()), Box::new(picker.clone()));
        let harness = Harness::new_eframe(|_| app);

        Self {
            harness,
            drops,
            picker,
            submitter,
        }
    }

    /// Runs enough frames for input, decode results and rendering to settle.
    pub fn settle(&mut self) {
        for _ in 0..4 {
            self.harness.step();
        }
    }

    pub fn drop_file(&mut self, file: CandidateFile) {
        self.drops.drop_file(file);
        self.settle();
    }

    pub fn state(&self) -> &State {
        &self.harness.state().state
    }
}
