//! Thin HTTP client used by commands.
//!
//! Commands hand their futures to the state runtime, which spawns them on
//! Tokio, so everything here produces `Send` futures and returns plain data
//! (`Response`) that can cross the task boundary.

use std::time::Duration;

use thiserror::Error;

/// A response reduced to owned, `Send` data.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code, kept for logging.
    pub status: u16,
    /// The full response body.
    pub body: Vec<u8>,
}

impl Response {
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// The request never produced a response.
#[derive(Debug, Clone, Error)]
pub enum HttpError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("request timed out")]
    Timeout,
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for HttpError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connect(err.to_string())
        } else if err.is_builder() {
            Self::InvalidRequest(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

pub type HttpResult<T> = Result<T, HttpError>;

/// One part of a `multipart/form-data` body.
#[derive(Debug, Clone)]
pub struct FormPart {
    /// Form field name.
    pub name: String,
    /// File name reported in `Content-Disposition`.
    pub filename: String,
    /// Declared content type of the part.
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// A POST request under construction.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    url: String,
    query: Vec<(String, String)>,
    parts: Vec<FormPart>,
    timeout: Option<Duration>,
}

impl RequestBuilder {
    fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query: Vec::new(),
            parts: Vec::new(),
            timeout: None,
        }
    }

    /// Appends a URL-encoded query parameter.
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Appends a file part; any part makes the body `multipart/form-data`.
    pub fn part(mut self, part: FormPart) -> Self {
        self.parts.push(part);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub async fn send(self) -> HttpResult<Response> {
        let client = reqwest::Client::new();

        let mut request = client.post(&self.url);

        if !self.query.is_empty() {
            request = request.query(&self.query);
        }
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        if !self.parts.is_empty() {
            request = request.multipart(build_form(self.parts)?);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        Ok(Response { status, body })
    }
}

fn build_form(parts: Vec<FormPart>) -> HttpResult<reqwest::multipart::Form> {
    let mut form = reqwest::multipart::Form::new();
    for FormPart {
        name,
        filename,
        mime_type,
        bytes,
    } in parts
    {
        let file = reqwest::multipart::Part::bytes(bytes).file_name(filename);
        // Unparseable types (e.g. a bare "image/") go out untyped.
        let file = match mime_type.parse::<mime_guess::mime::Mime>() {
            Ok(_) => file.mime_str(&mime_type)?,
            Err(err) => {
                log::warn!(
                    target: "imgshare_business::http",
                    "unparseable_part_mime mime={mime_type} err={err}"
                );
                file
            }
        };
        form = form.part(name, file);
    }
    Ok(form)
}

pub struct Client;

impl Client {
    pub fn post(url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_json() {
        #[derive(Debug, serde::Deserialize, PartialEq)]
        struct Payload {
            success: bool,
        }

        let response = Response {
            status: 200,
            body: br#"{"success": true}"#.to_vec(),
        };

        assert_eq!(
            response.json::<Payload>().unwrap(),
            Payload { success: true }
        );
    }

    #[test]
    fn test_parts_accumulate_into_one_multipart_body() {
        let part = |name: &str| FormPart {
            name: name.to_owned(),
            filename: "a.png".to_owned(),
            mime_type: "image/png".to_owned(),
            bytes: vec![1, 2, 3],
        };

        let builder = Client::post("https://example.com/upload")
            .query("key", "abc")
            .part(part("image"))
            .part(part("extra"));

        assert_eq!(builder.query, vec![("key".to_owned(), "abc".to_owned())]);
        assert_eq!(builder.parts.len(), 2);
        assert_eq!(builder.parts[0].name, "image");
    }

    #[test]
    fn test_unparseable_part_type_is_sent_untyped() {
        let form = build_form(vec![FormPart {
            name: "image".to_owned(),
            filename: "a".to_owned(),
            mime_type: "image/".to_owned(),
            bytes: vec![1],
        }]);

        assert!(form.is_ok());
    }
}
