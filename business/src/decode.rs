//! Turning an accepted upload into something the preview can display.
//!
//! The decode is single-shot: no retries and no timeout. A decoder receives
//! the [`DecodeTask`] of the selection it serves and drops its work quietly
//! once that task has been cancelled by a newer selection.

use std::fmt::Debug;
use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

use crate::{CandidateFile, DecodeTask};

/// Callback invoked once with the outcome of a decode.
pub type DecodeDone = Box<dyn FnOnce(Result<PreviewImage, DecodeError>) + Send + 'static>;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("could not read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("unsupported or corrupt image: {0}")]
    Image(#[from] image::ImageError),
    #[error("image has no pixels")]
    Empty,
}

/// Decoded RGBA pixels, 4 bytes per pixel.
#[derive(Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

impl DecodedImage {
    pub fn new(width: usize, height: usize, rgba: Vec<u8>) -> Self {
        Self {
            width,
            height,
            rgba,
        }
    }

    /// True when the byte count matches the dimensions.
    pub fn is_consistent(&self) -> bool {
        self.width
            .checked_mul(self.height)
            .and_then(|pixels| pixels.checked_mul(4))
            .is_some_and(|expected| expected == self.rgba.len() && expected > 0)
    }
}

impl Debug for DecodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("rgba_len", &self.rgba.len())
            .finish()
    }
}

/// What the preview shows for an accepted file.
///
/// The original bytes are shared with the candidate, so the `data:` URL is
/// only encoded when someone asks for it.
#[derive(Clone, PartialEq, Eq)]
pub struct PreviewImage {
    pub pixels: DecodedImage,
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub bytes: Arc<[u8]>,
}

impl PreviewImage {
    /// `data:` URL of the original bytes, usable as an image source.
    pub fn data_url(&self) -> String {
        to_data_url(&self.mime_type, &self.bytes)
    }
}

impl Debug for PreviewImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewImage")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("size_bytes", &self.size_bytes)
            .field("pixels", &self.pixels)
            .finish_non_exhaustive()
    }
}

/// Encodes raw bytes as a base64 `data:` URL.
pub fn to_data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{mime_type};base64,{}", STANDARD.encode(bytes))
}

/// Reads and decodes a candidate's payload into preview pixels.
pub fn decode_preview(file: &CandidateFile) -> Result<PreviewImage, DecodeError> {
    let bytes = file.load()?;
    let decoded = image::load_from_memory(&bytes)?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(DecodeError::Empty);
    }

    Ok(PreviewImage {
        pixels: DecodedImage::new(width as usize, height as usize, rgba.into_raw()),
        file_name: file.name().to_owned(),
        mime_type: file.mime_type().to_owned(),
        size_bytes: file.size_bytes(),
        bytes,
    })
}

/// Something that can decode a candidate off the UI's critical path.
pub trait ImageDecoder: Send + Sync + Debug {
    /// Starts decoding and calls `on_done` once, unless `task` is cancelled
    /// first, in which case `on_done` may never run.
    fn decode(&self, task: DecodeTask, file: CandidateFile, on_done: DecodeDone);
}

fn run_decode(task: &DecodeTask, file: &CandidateFile, on_done: DecodeDone) {
    if task.is_cancelled() {
        log::debug!(
            target: "leafcheck_business::decode",
            "skip cancelled decode generation={} name={}",
            task.generation(),
            file.name()
        );
        return;
    }

    let result = decode_preview(file);

    if task.is_cancelled() {
        log::debug!(
            target: "leafcheck_business::decode",
            "discard decode finished after cancel generation={}",
            task.generation()
        );
        return;
    }

    match &result {
        Ok(preview) => log::trace!(
            target: "leafcheck_business::decode",
            "decoded {} {}x{} generation={}",
            preview.file_name,
            preview.pixels.width,
            preview.pixels.height,
            task.generation()
        ),
        Err(err) => log::warn!(
            target: "leafcheck_business::decode",
            "decode failed name={} err={}",
            file.name(),
            err
        ),
    }

    on_done(result);
}

/// Decodes on the calling thread before returning.
#[derive(Debug, Default)]
pub struct InlineDecoder;

impl ImageDecoder for InlineDecoder {
    fn decode(&self, task: DecodeTask, file: CandidateFile, on_done: DecodeDone) {
        run_decode(&task, &file, on_done);
    }
}

/// Decodes on a worker thread natively and on the browser's task queue on
/// the web.
#[derive(Debug, Default)]
pub struct BackgroundDecoder;

impl ImageDecoder for BackgroundDecoder {
    #[cfg(not(target_arch = "wasm32"))]
    fn decode(&self, task: DecodeTask, file: CandidateFile, on_done: DecodeDone) {
        std::thread::spawn(move || run_decode(&task, &file, on_done));
    }

    #[cfg(target_arch = "wasm32")]
    fn decode(&self, task: DecodeTask, file: CandidateFile, on_done: DecodeDone) {
        wasm_bindgen_futures::spawn_local(async move { run_decode(&task, &file, on_done) });
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::mpsc;
    use std::time::Duration;

    use image::ImageEncoder as _;
    use image::codecs::png::PngEncoder;

    use super::*;

    /// Encodes a solid red PNG of the given size.
    pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let pixels: Vec<u8> = [255u8, 0, 0, 255]
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

    #[test]
    fn data_url_has_mime_and_base64_payload() {
        assert_eq!(to_data_url("image/png", b"hi"), "data:image/png;base64,aGk=");
        assert_eq!(to_data_url("image/webp", b""), "data:image/webp;base64,");
    }

    #[test]
    fn decode_preview_valid_png() {
        let file = CandidateFile::new("leaf.png", "image/png", png_bytes(3, 2));
        let preview = decode_preview(&file).expect("Should decode valid PNG");

        assert_eq!(preview.pixels.width, 3);
        assert_eq!(preview.pixels.height, 2);
        assert_eq!(preview.pixels.rgba.len(), 3 * 2 * 4);
        assert!(preview.pixels.is_consistent());
        assert!(preview.data_url().starts_with("data:image/png;base64,"));
        assert_eq!(preview.file_name, "leaf.png");
    }

    #[test]
    fn decode_preview_missing_file_fails() {
        let temp = tempfile::Builder::new()
            .suffix(".png")
            .tempfile()
            .expect("Failed to create temp file");
        let file = CandidateFile::from_path(temp.path()).expect("Failed to open candidate");
        temp.close().expect("Failed to remove temp file");

        assert!(matches!(decode_preview(&file), Err(DecodeError::Io(_))));
    }

    #[test]
    fn decode_preview_garbage_fails() {
        let file = CandidateFile::new("leaf.png", "image/png", b"not an image".to_vec());
        assert!(matches!(decode_preview(&file), Err(DecodeError::Image(_))));
    }

    #[test]
    fn inline_decoder_reports_result() {
        let (tx, rx) = mpsc::channel();
        let file = CandidateFile::new("leaf.png", "image/png", png_bytes(1, 1));

        InlineDecoder.decode(
            DecodeTask::new(1),
            file,
            Box::new(move |result| {
                tx.send(result.is_ok()).expect("receiver alive");
            }),
        );

        assert_eq!(rx.try_recv(), Ok(true));
    }

    #[test]
    fn cancelled_task_never_reports() {
        let (tx, rx) = mpsc::channel::<()>();
        let task = DecodeTask::new(1);
        task.cancel();

        InlineDecoder.decode(
            task,
            CandidateFile::new("leaf.png", "image/png", png_bytes(1, 1)),
            Box::new(move |_| {
                tx.send(()).expect("receiver alive");
            }),
        );

        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn background_decoder_reports_from_worker() {
        let (tx, rx) = mpsc::channel();
        BackgroundDecoder.decode(
            DecodeTask::new(7),
            CandidateFile::new("leaf.png", "image/png", png_bytes(4, 4)),
            Box::new(move |result| {
                tx.send(result.map(|preview| preview.pixels.width).ok())
                    .expect("receiver alive");
            }),
        );

        let width = rx
            .recv_timeout(Duration::from_secs(5))
            .expect("decode should finish");
        assert_eq!(width, Some(4));
    }

    #[test]
    fn decoded_image_consistency() {
        assert!(DecodedImage::new(2, 2, vec![0; 16]).is_consistent());
        assert!(!DecodedImage::new(2, 2, vec![0; 12]).is_consistent());
        assert!(!DecodedImage::new(0, 0, Vec::new()).is_consistent());
    }
}
