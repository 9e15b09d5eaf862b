//! Client for the ImgBB-style hosting API.
//!
//! One call, one request: `POST {endpoint}?key={api_key}` with a single
//! multipart part named `image`. Nothing here retries.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::http::{Client, FormPart};
use crate::{CandidateFile, HostingConfig, UploadError};

/// Multipart field the hosting API reads the file from.
pub const IMAGE_PART: &str = "image";
/// Query parameter carrying the API key.
pub const KEY_PARAM: &str = "key";

const UPLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// The original image as stored by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    /// Direct link to the image file (hot link).
    pub url: String,
    /// File name the host stored it under.
    pub filename: String,
}

/// The host-generated thumbnail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThumbInfo {
    pub url: String,
}

/// The hosted image as the API describes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResult {
    /// Host-assigned image id.
    pub id: String,
    /// Title derived from the uploaded file name.
    pub title: String,
    /// Page that shows the image to people (share link).
    pub url_viewer: String,
    pub image: ImageInfo,
    pub thumb: ThumbInfo,
    /// Page that lets the uploader delete the image.
    pub delete_url: String,
    /// Direct link as reported at the top level; not every host sends it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Link to a display-sized rendition, when the host makes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_url: Option<String>,
}

impl UploadResult {
    /// Raw image bytes, suitable for embedding.
    pub fn direct_url(&self) -> &str {
        &self.image.url
    }

    /// Human-facing page for the image.
    pub fn viewer_url(&self) -> &str {
        &self.url_viewer
    }
}

/// Envelope of every hosting API response.
///
/// Failure replies vary between deployments: the `success` flag may be
/// missing and `error` may be an object or a bare string, so only `data` is
/// decoded strictly, and only once the reply claims success.
#[derive(Debug, Default, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

impl ApiResponse {
    /// Any JSON value is an envelope; one that is not an object carries
    /// neither a flag nor data and reads as a plain failure.
    fn from_value(body: serde_json::Value) -> Self {
        serde_json::from_value(body).unwrap_or_default()
    }

    fn error_message(&self) -> Option<String> {
        self.error
            .as_ref()
            .and_then(|error| error.get("message"))
            .and_then(serde_json::Value::as_str)
            .filter(|message| !message.is_empty())
            .map(str::to_owned)
    }

    fn into_result(self) -> Result<UploadResult, UploadError> {
        match self {
            Self {
                success: true,
                data: Some(data),
                ..
            } => serde_json::from_value(data)
                .map_err(|err| UploadError::Transport(format!("malformed upload data: {err}"))),
            failure => Err(UploadError::Api(failure.error_message())),
        }
    }
}

/// Sends `file` to the hosting API and interprets the answer.
///
/// The HTTP status is not consulted: the JSON envelope decides between
/// success and failure. Only a body that is not JSON at all counts as a
/// transport failure.
pub async fn upload_image(
    config: &HostingConfig,
    file: CandidateFile,
) -> Result<UploadResult, UploadError> {
    let CandidateFile {
        name,
        mime_type,
        bytes,
    } = file;

    log::info!(
        target: "imgshare_business::hosting",
        "upload_started name={name} mime={mime_type} size={}",
        bytes.len()
    );

    let response = Client::post(config.endpoint.as_str())
        .query(KEY_PARAM, config.api_key.as_str())
        .part(FormPart {
            name: IMAGE_PART.to_owned(),
            filename: name,
            mime_type,
            bytes,
        })
        .timeout(UPLOAD_TIMEOUT)
        .send()
        .await
        .map_err(|err| {
            log::warn!(target: "imgshare_business::hosting", "upload_transport_failed err={err}");
            UploadError::Transport(err.to_string())
        })?;

    let body: serde_json::Value = response.json().map_err(|err| {
        log::warn!(
            target: "imgshare_business::hosting",
            "upload_response_undecodable status={} err={err}",
            response.status
        );
        UploadError::Transport(format!("status {}: {err}", response.status))
    })?;

    let result = ApiResponse::from_value(body).into_result();
    match &result {
        Ok(data) => log::info!(
            target: "imgshare_business::hosting",
            "upload_succeeded id={} status={}",
            data.id,
            response.status
        ),
        Err(err) => log::warn!(
            target: "imgshare_business::hosting",
            "upload_rejected status={} message={err}",
            response.status
        ),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(body: &str) -> Result<UploadResult, UploadError> {
        let body = serde_json::from_str(body).expect("body should be JSON");
        ApiResponse::from_value(body).into_result()
    }

    #[test]
    fn success_envelope_yields_data() {
        let result = decode(
            r#"{
                "success": true,
                "status": 200,
                "data": {
                    "id": "2ndCYJK",
                    "title": "c1f64245afb2",
                    "url_viewer": "https://ibb.co/2ndCYJK",
                    "url": "https://i.ibb.co/w04Prt6/c1f64245afb2.gif",
                    "display_url": "https://i.ibb.co/98W13PY/c1f64245afb2.gif",
                    "image": { "filename": "c1f64245afb2.gif", "url": "https://i.ibb.co/w04Prt6/c1f64245afb2.gif" },
                    "thumb": { "url": "https://i.ibb.co/2ndCYJK/c1f64245afb2.gif" },
                    "delete_url": "https://ibb.co/2ndCYJK/670a7e48ddcb85ac340c717a41047e5c"
                }
            }"#,
        )
        .expect("should succeed");

        assert_eq!(result.id, "2ndCYJK");
        assert_eq!(result.direct_url(), "https://i.ibb.co/w04Prt6/c1f64245afb2.gif");
        assert_eq!(result.viewer_url(), "https://ibb.co/2ndCYJK");
        assert_eq!(
            result.display_url.as_deref(),
            Some("https://i.ibb.co/98W13PY/c1f64245afb2.gif")
        );
    }

    #[test]
    fn failure_envelope_uses_server_message() {
        assert_eq!(
            decode(r#"{"success": false, "error": {"message": "file too big", "code": 400}}"#),
            Err(UploadError::Api(Some("file too big".to_owned())))
        );
    }

    #[test]
    fn failure_without_message_falls_back() {
        assert_eq!(decode(r#"{"success": false}"#), Err(UploadError::Api(None)));
        assert_eq!(
            decode(r#"{"success": false, "error": {"message": ""}}"#),
            Err(UploadError::Api(None))
        );
    }

    #[test]
    fn success_without_data_is_a_failure() {
        assert_eq!(decode(r#"{"success": true}"#), Err(UploadError::Api(None)));
    }

    #[test]
    fn failure_without_success_flag_uses_server_message() {
        assert_eq!(
            decode(
                r#"{
                    "status_code": 400,
                    "error": { "message": "Invalid API v1 key.", "code": 100 },
                    "status_txt": "Bad Request"
                }"#
            ),
            Err(UploadError::Api(Some("Invalid API v1 key.".to_owned())))
        );
    }

    #[test]
    fn error_that_is_not_an_object_falls_back() {
        assert_eq!(
            decode(r#"{"success": false, "error": "nope"}"#),
            Err(UploadError::Api(None))
        );
        assert_eq!(decode(r#""nope""#), Err(UploadError::Api(None)));
        assert_eq!(decode("[]"), Err(UploadError::Api(None)));
    }

    #[test]
    fn success_with_malformed_data_is_a_transport_error() {
        assert!(matches!(
            decode(r#"{"success": true, "data": {"id": 7}}"#),
            Err(UploadError::Transport(_))
        ));
    }
}
