use thiserror::Error;

pub const VALIDATION_MESSAGE: &str = "Please upload a valid image file (JPG, PNG, GIF).";
pub const NETWORK_MESSAGE: &str = "Network error. Please check your connection and try again.";
pub const UPLOAD_FAILED_MESSAGE: &str = "Failed to upload image. Please try again.";

/// Why an upload attempt ended in the error state.
///
/// `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    /// Declared type is not `image/*`. Never reaches the network.
    #[error("{}", VALIDATION_MESSAGE)]
    Validation,
    /// No usable response. The detail is for logs only.
    #[error("{}", NETWORK_MESSAGE)]
    Transport(String),
    /// The hosting API answered but reported a failure.
    #[error("{}", .0.as_deref().unwrap_or(UPLOAD_FAILED_MESSAGE))]
    Api(Option<String>),
}

impl UploadError {
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
