//! Drag-and-drop support.
//!
//! `DropHandler` is the seam tests replace; `SystemDropHandler` reads the
//! files egui reports as dropped in the current frame.
//!
//! On Windows, drag-and-drop has to be enabled on the viewport
//! (`with_drag_and_drop(true)`), which `main` does.

use imgshare_business::CandidateFile;

use super::file_source::candidate_from_path;

pub trait DropHandler {
    /// The first file dropped this frame, if any.
    fn handle_drop(&self, ctx: &egui::Context) -> Option<CandidateFile>;
}

#[derive(Default)]
pub struct SystemDropHandler;

impl DropHandler for SystemDropHandler {
    fn handle_drop(&self, ctx: &egui::Context) -> Option<CandidateFile> {
        let dropped_files = ctx.input(|i| i.raw.dropped_files.clone());
        let first = dropped_files.first()?;

        log::trace!(
            target: "imgshare_ui::drop",
            "dropped_files={} first={}",
            dropped_files.len(),
            first.name
        );
        candidate_from_dropped_file(first)
    }
}

/// True while the OS reports files hovering the window.
pub fn files_hovering(ctx: &egui::Context) -> bool {
    ctx.input(|i| !i.raw.hovered_files.is_empty())
}

/// Builds a candidate from a path (native) or in-memory bytes.
///
/// A MIME type supplied with the drop wins over the extension guess.
pub fn candidate_from_dropped_file(file: &egui::DroppedFile) -> Option<CandidateFile> {
    let mut candidate = if let Some(path) = &file.path {
        candidate_from_path(path)?
    } else if let Some(bytes) = &file.bytes {
        CandidateFile::from_name_guess(file.name.clone(), bytes.to_vec())
    } else {
        log::warn!(
            target: "imgshare_ui::drop",
            "dropped_file_missing_path_and_bytes name={}",
            file.name
        );
        return None;
    };

    if !file.mime.is_empty() {
        candidate.mime_type = file.mime.clone();
    }
    if !file.name.is_empty() {
        candidate.name = file.name.clone();
    }
    Some(candidate)
}
