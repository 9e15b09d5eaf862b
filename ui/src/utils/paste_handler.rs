//! Clipboard paste support (Ctrl+V / Cmd+V anywhere in the window).

use imgshare_business::CandidateFile;

use super::clipboard::{ClipboardProvider, SystemClipboard, encode_png};

pub const PASTED_FILE_NAME: &str = "clipboard.png";
pub const PASTED_MIME_TYPE: &str = "image/png";

pub trait PasteHandler {
    /// The clipboard image if the paste shortcut was used this frame.
    fn handle_paste(&self, ctx: &egui::Context) -> Option<CandidateFile>;
}

/// Paste handler over any clipboard source.
pub struct GenericPasteHandler<C: ClipboardProvider> {
    clipboard: C,
}

impl<C: ClipboardProvider> GenericPasteHandler<C> {
    pub fn new(clipboard: C) -> Self {
        Self { clipboard }
    }
}

pub type SystemPasteHandler = GenericPasteHandler<SystemClipboard>;

impl Default for SystemPasteHandler {
    fn default() -> Self {
        Self::new(SystemClipboard)
    }
}

impl<C: ClipboardProvider> PasteHandler for GenericPasteHandler<C> {
    fn handle_paste(&self, ctx: &egui::Context) -> Option<CandidateFile> {
        if !paste_pressed(ctx) {
            return None;
        }
        read_clipboard_candidate(&self.clipboard)
    }
}

/// egui-winit turns Cmd/Ctrl+V into `Event::Paste` on most platforms, but the
/// raw key event is still delivered on some; accept either.
pub fn paste_pressed(ctx: &egui::Context) -> bool {
    ctx.input(|i| {
        i.events.iter().any(|event| {
            matches!(event, egui::Event::Paste(_))
                || matches!(
                    event,
                    egui::Event::Key {
                        key: egui::Key::V,
                        pressed: true,
                        modifiers,
                        ..
                    } if modifiers.command
                )
        })
    })
}

fn read_clipboard_candidate(clipboard: &impl ClipboardProvider) -> Option<CandidateFile> {
    let image = match clipboard.get_image() {
        Ok(Some(image)) => image,
        Ok(None) => {
            log::debug!(target: "imgshare_ui::paste", "clipboard_has_no_image");
            return None;
        }
        Err(err) => {
            log::warn!(target: "imgshare_ui::paste", "clipboard_read_failed err={err}");
            return None;
        }
    };

    let (width, height) = (image.width, image.height);
    match encode_png(image) {
        Ok(png) => {
            log::info!(
                target: "imgshare_ui::paste",
                "clipboard_image {width}x{height} png_bytes={}",
                png.len()
            );
            Some(CandidateFile::new(PASTED_FILE_NAME, PASTED_MIME_TYPE, png))
        }
        Err(err) => {
            log::warn!(target: "imgshare_ui::paste", "clipboard_encode_failed err={err}");
            None
        }
    }
}
