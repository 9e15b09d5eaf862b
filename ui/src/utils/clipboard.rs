//! Reading images from the system clipboard.
//!
//! Clipboard images arrive as raw RGBA pixels; they are re-encoded as PNG so
//! they can be uploaded like any other file.

use image::{ImageFormat, RgbaImage};
use thiserror::Error;

/// Raw pixels as handed out by the clipboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardImage {
    pub width: usize,
    pub height: usize,
    pub rgba: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    #[error("clipboard read failed: {0}")]
    Read(String),
    #[error("image buffer of {len} bytes does not match {width}x{height} RGBA")]
    BadBuffer {
        width: usize,
        height: usize,
        len: usize,
    },
    #[error("png encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// Source of clipboard images; replaced by a fake in tests.
pub trait ClipboardProvider {
    /// `Ok(None)` when the clipboard holds something other than an image.
    fn get_image(&self) -> Result<Option<ClipboardImage>, ClipboardError>;
}

#[derive(Default)]
pub struct SystemClipboard;

impl ClipboardProvider for SystemClipboard {
    fn get_image(&self) -> Result<Option<ClipboardImage>, ClipboardError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;

        match clipboard.get_image() {
            Ok(image) => Ok(Some(ClipboardImage {
                width: image.width,
                height: image.height,
                rgba: image.bytes.into_owned(),
            })),
            Err(arboard::Error::ContentNotAvailable) => Ok(None),
            Err(e) => Err(ClipboardError::Read(e.to_string())),
        }
    }
}

/// Encodes RGBA pixels as a PNG file.
pub fn encode_png(image: ClipboardImage) -> Result<Vec<u8>, ClipboardError> {
    let ClipboardImage {
        width,
        height,
        rgba,
    } = image;
    let len = rgba.len();
    let bad_buffer = || ClipboardError::BadBuffer { width, height, len };

    let w = u32::try_from(width).map_err(|_| bad_buffer())?;
    let h = u32::try_from(height).map_err(|_| bad_buffer())?;
    let buffer = RgbaImage::from_raw(w, h, rgba).ok_or_else(bad_buffer)?;

    let mut png = Vec::new();
    buffer.write_to(&mut std::io::Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(png)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_valid_png() {
        let png = encode_png(ClipboardImage {
            width: 2,
            height: 2,
            rgba: vec![255; 16],
        })
        .expect("2x2 image encodes");

        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
        let decoded = image::load_from_memory(&png).expect("decodes again");
        assert_eq!((decoded.width(), decoded.height()), (2, 2));
    }

    #[test]
    fn rejects_short_buffer() {
        let err = encode_png(ClipboardImage {
            width: 10,
            height: 10,
            rgba: vec![0; 3],
        })
        .expect_err("buffer too short");
        assert!(matches!(err, ClipboardError::BadBuffer { len: 3, .. }));
    }
}
