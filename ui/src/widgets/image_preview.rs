//! Preview of the selected leaf image.
//!
//! The decoded pixels are uploaded to a texture once per selection and kept
//! until the controller hides the preview or a newer selection replaces it.
//! Clicking the thumbnail opens the image maximized in a window.

use egui::{ColorImage, Context, Response, TextureHandle, TextureOptions, Ui, Window};
use leafcheck_business::{PreviewImage, format_file_size};

use crate::utils::overlay::Overlay;

/// Longest side of the inline preview (pixels).
const PREVIEW_MAX_SIZE: f32 = 320.0;

pub const ENLARGE_LABEL: &str = "🔍 Enlarge";

/// A preview uploaded to the GPU.
pub struct PreviewTexture {
    /// Selection generation the texture was built for.
    pub generation: u64,
    pub texture: TextureHandle,
    pub width: usize,
    pub height: usize,
    pub file_name: String,
    pub size_bytes: u64,
}

impl PreviewTexture {
    /// `name · W×H · size`, as shown under the preview.
    pub fn caption(&self) -> String {
        format!(
            "{} · {}×{} · {}",
            self.file_name,
            self.width,
            self.height,
            format_file_size(self.size_bytes)
        )
    }
}

impl std::fmt::Debug for PreviewTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewTexture")
            .field("generation", &self.generation)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("file_name", &self.file_name)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
pub struct ImagePreviewState {
    current: Option<PreviewTexture>,
    maximized: bool,
}

impl ImagePreviewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mirrors the controller's preview into a texture.
    ///
    /// `generation` identifies the selection `image` belongs to; a texture is
    /// only rebuilt when it changes.
    pub fn sync(&mut self, ctx: &Context, generation: u64, image: Option<&PreviewImage>) {
        let Some(image) = image else {
            if self.current.take().is_some() {
                log::trace!(target: "leafcheck_ui::preview", "preview texture released");
            }
            self.maximized = false;
            return;
        };

        if self
            .current
            .as_ref()
            .is_some_and(|current| current.generation == generation)
        {
            return;
        }

        if !image.pixels.is_consistent() {
            log::warn!(
                target: "leafcheck_ui::preview",
                "Invalid image data for {}: {}x{} with {} bytes",
                image.file_name,
                image.pixels.width,
                image.pixels.height,
                image.pixels.rgba.len()
            );
            self.current = None;
            self.maximized = false;
            return;
        }

        let color_image = ColorImage::from_rgba_unmultiplied(
            [image.pixels.width, image.pixels.height],
            &image.pixels.rgba,
        );
        let texture = ctx.load_texture(
            format!("leaf_preview_{generation}"),
            color_image,
            TextureOptions::LINEAR,
        );

        self.current = Some(PreviewTexture {
            generation,
            texture,
            width: image.pixels.width,
            height: image.pixels.height,
            file_name: image.file_name.clone(),
            size_bytes: image.size_bytes,
        });
        self.maximized = false;
    }

    pub fn current(&self) -> Option<&PreviewTexture> {
        self.current.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    pub fn is_maximized(&self) -> bool {
        self.maximized
    }
}

impl Overlay for ImagePreviewState {
    /// Maximizes the preview; ignored while nothing is shown.
    fn show(&mut self) {
        self.maximized = self.current.is_some();
    }

    fn hide(&mut self) {
        self.maximized = false;
    }

    fn is_visible(&self) -> bool {
        self.maximized
    }
}

/// Fits `width`×`height` into a `max`×`max` box keeping the aspect ratio.
fn fit_within(width: usize, height: usize, max: f32) -> [f32; 2] {
    let (w, h) = (width as f32, height as f32);
    let scale = (max / w).min(max / h).min(1.0);
    [w * scale, h * scale]
}

/// Renders the inline preview with its caption. Nothing is drawn while
/// the preview is hidden.
pub fn image_preview(state: &mut ImagePreviewState, ui: &mut Ui) -> Option<Response> {
    let preview = state.current.as_ref()?;
    let size = fit_within(preview.width, preview.height, PREVIEW_MAX_SIZE);
    let caption = preview.caption();
    let texture_id = preview.texture.id();

    let inner = ui.vertical_centered(|ui| {
        let image_response = ui
            .add(
                egui::Button::image(egui::Image::from_texture(
                    egui::load::SizedTexture::new(texture_id, size),
                ))
                .frame(true)
                .sense(egui::Sense::click()),
            )
            .on_hover_text("Click to enlarge");
        ui.label(caption);
        let enlarge_clicked = ui.small_button(ENLARGE_LABEL).clicked();
        (image_response, enlarge_clicked)
    });

    let (response, enlarge_clicked) = inner.inner;
    if response.clicked() || enlarge_clicked {
        state.show();
    }

    Some(response)
}

/// Shows the maximized preview window while it is open.
pub fn maximized_preview(state: &mut ImagePreviewState, ctx: &Context) {
    if !state.maximized {
        return;
    }
    let Some(preview) = state.current.as_ref() else {
        state.hide();
        return;
    };

    let (width, height) = (preview.width, preview.height);
    let texture_id = preview.texture.id();
    let mut open = true;

    Window::new(format!("Image Preview - {}×{}", width, height))
        .open(&mut open)
        .collapsible(false)
        .resizable(true)
        .default_size([width as f32, height as f32])
        .show(ctx, |ui| {
            let available = ui.available_size();
            let size = fit_within(width, height, available.x.min(available.y));
            ui.image(egui::load::SizedTexture::new(texture_id, size));
        });

    if !open {
        state.hide();
    }
}
