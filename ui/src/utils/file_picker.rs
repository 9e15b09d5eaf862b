//! Click-to-browse support via the native file dialog (`rfd`).
//!
//! The dialog is opened when the drop zone is clicked or on Ctrl+O / Cmd+O.

use imgshare_business::CandidateFile;

use super::file_source::candidate_from_path;

/// Extensions offered by the dialog filter. Only a hint: the declared type
/// is still validated before upload.
pub const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "bmp", "svg", "ico", "tiff", "tif",
];

pub trait FilePickerHandler {
    /// Blocks until the user picks a file or cancels.
    fn pick_file(&self) -> Option<CandidateFile>;
}

#[derive(Default)]
pub struct SystemFilePickerHandler;

impl FilePickerHandler for SystemFilePickerHandler {
    fn pick_file(&self) -> Option<CandidateFile> {
        let path = rfd::FileDialog::new()
            .add_filter("Image", IMAGE_EXTENSIONS)
            .set_title("Select an image")
            .pick_file()?;

        log::info!(target: "imgshare_ui::picker", "file_selected path={}", path.display());
        candidate_from_path(&path)
    }
}

/// Consumes Ctrl+O / Cmd+O if it was pressed this frame.
pub fn open_shortcut_pressed(ctx: &egui::Context) -> bool {
    ctx.input_mut(|i| i.consume_key(egui::Modifiers::COMMAND, egui::Key::O))
}
