//! Turns files coming from the OS into upload candidates.

use std::fs;
use std::path::Path;

use imgshare_business::CandidateFile;

/// Reads `path` and declares its type from the extension.
///
/// The content is not decoded; a mislabelled file is left for the hosting
/// API to reject.
pub fn candidate_from_path(path: &Path) -> Option<CandidateFile> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            log::warn!(
                target: "imgshare_ui::file",
                "file_read_failed path={} err={err}",
                path.display()
            );
            return None;
        }
    };

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_owned());

    log::debug!(
        target: "imgshare_ui::file",
        "file_read path={} bytes={}",
        path.display(),
        bytes.len()
    );
    Some(CandidateFile::from_name_guess(name, bytes))
}
