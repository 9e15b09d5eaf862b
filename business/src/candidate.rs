use std::fmt;
use std::path::Path;

/// A file offered for upload by one of the input adapters.
///
/// The declared `mime_type` is taken at face value; the bytes are never
/// sniffed or decoded before they are sent.
#[derive(Clone, PartialEq, Eq)]
pub struct CandidateFile {
    /// File name sent with the upload.
    pub name: String,
    /// Declared media type, e.g. `image/png`.
    pub mime_type: String,
    /// Raw file content.
    pub bytes: Vec<u8>,
}

impl CandidateFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Builds a candidate whose type is guessed from the file name's extension.
    ///
    /// Unknown extensions map to `application/octet-stream`, which fails
    /// validation later on.
    pub fn from_name_guess(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let mime_type = mime_guess::from_path(Path::new(&name))
            .first_or_octet_stream()
            .essence_str()
            .to_owned();
        Self {
            name,
            mime_type,
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// True when the declared type is in the `image/` family.
    pub fn is_image(&self) -> bool {
        self.mime_type
            .get(..6)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"))
    }
}

impl fmt::Debug for CandidateFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CandidateFile")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.size())
            .finish()
    }
}
