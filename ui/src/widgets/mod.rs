mod alert_banner;
pub mod image_preview;
mod shortcut_help;
mod submit_button;
mod upload_form;

pub use alert_banner::alert_banner;
pub use image_preview::{
    ENLARGE_LABEL, ImagePreviewState, PreviewTexture, image_preview, maximized_preview,
};
pub use shortcut_help::{ShortcutHelpState, shortcut_help};
pub use submit_button::{BUSY_LABEL, SUBMIT_LABEL, submit_button};
pub use upload_form::{CHOOSE_LABEL, REMOVE_LABEL, UploadFormAction, upload_form};
