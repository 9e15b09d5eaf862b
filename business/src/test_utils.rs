//! Helpers for driving the upload flow against a mock hosting API.
//!
//! ```ignore
//! let mut test_ctx = TestContext::new().await;
//! test_ctx.mock_upload_success(sample_upload_result("abc")).await;
//!
//! test_ctx.submit(png_file());
//! test_ctx.flush_and_wait().await;
//!
//! assert!(test_ctx.upload_state().result().is_some());
//! ```

use std::time::Duration;

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use imgshare_states::{StateCtx, Time};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

use crate::{
    CandidateFile, CopyFeedbackCompute, HostingConfig, ImageInfo, SubmitFileCommand, ThumbInfo,
    UploadCompute, UploadResult, UploadState,
};

pub const UPLOAD_PATH: &str = "/1/upload";
pub const TEST_KEY: &str = "test-key";

pub struct TestContext {
    pub mock_server: MockServer,
    pub ctx: StateCtx,
}

impl TestContext {
    pub async fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let mock_server = MockServer::start().await;
        let config = HostingConfig::new(format!("{}{UPLOAD_PATH}", mock_server.uri()), TEST_KEY);

        let mut ctx = StateCtx::new();
        crate::register(&mut ctx, config);
        ctx.update::<Time>(|time| *time = Time::new(epoch()));
        ctx.run_all_dirty();
        ctx.sync_computes();

        Self { mock_server, ctx }
    }

    pub fn submit(&mut self, file: CandidateFile) {
        self.ctx.enqueue(SubmitFileCommand::new(file));
    }

    /// Flushes queued commands and waits until every spawned task is done.
    pub async fn flush_and_wait(&mut self) {
        self.ctx.sync_computes();
        self.ctx.flush_commands();

        let timeout = Duration::from_secs(5);
        while self.ctx.task_count() > 0 {
            match tokio::time::timeout(timeout, self.ctx.join_next()).await {
                Ok(_) => self.ctx.sync_computes(),
                Err(_) => panic!(
                    "Timed out waiting for pending tasks ({} still running)",
                    self.ctx.task_count()
                ),
            }
        }

        self.ctx.sync_computes();
    }

    /// Flushes queued commands without waiting for their tasks.
    pub fn flush(&mut self) {
        self.ctx.sync_computes();
        self.ctx.flush_commands();
    }

    /// Moves `Time` to `ms` milliseconds after the test epoch and lets
    /// time-dependent computes react.
    pub fn set_time_ms(&mut self, ms: i64) {
        self.ctx
            .update::<Time>(|time| *time = Time::new(epoch() + TimeDelta::milliseconds(ms)));
        self.ctx.run_all_dirty();
        self.ctx.sync_computes();
    }

    pub fn upload_state(&self) -> &UploadState {
        self.ctx.compute::<UploadCompute>().state()
    }

    pub fn copy_feedback(&self) -> &CopyFeedbackCompute {
        self.ctx.compute::<CopyFeedbackCompute>()
    }

    pub async fn received_uploads(&self) -> usize {
        self.mock_server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or_default()
    }

    pub async fn mock_upload_success(&self, result: UploadResult) {
        self.mount_upload(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true,
                "status": 200,
                "data": result,
            })),
        )
        .await;
    }

    /// Same as [`Self::mock_upload_success`] but the response is held back
    /// for `delay`.
    pub async fn mock_upload_success_delayed(&self, result: UploadResult, delay: Duration) {
        self.mount_upload(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({
                    "success": true,
                    "status": 200,
                    "data": result,
                }))
                .set_delay(delay),
        )
        .await;
    }

    pub async fn mock_upload_failure(&self, status: u16, message: Option<&str>) {
        let body = match message {
            Some(message) => serde_json::json!({
                "success": false,
                "status": status,
                "error": { "message": message, "code": status },
            }),
            None => serde_json::json!({ "success": false, "status": status }),
        };
        self.mount_upload(ResponseTemplate::new(status).set_body_json(body))
            .await;
    }

    pub async fn mock_upload_raw(&self, status: u16, body: &str) {
        self.mount_upload(ResponseTemplate::new(status).set_body_string(body))
            .await;
    }

    async fn mount_upload(&self, response: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path(UPLOAD_PATH))
            .and(query_param("key", TEST_KEY))
            .respond_with(response)
            .mount(&self.mock_server)
            .await;
    }
}

pub fn epoch() -> DateTime<Utc> {
    Utc.timestamp_millis_opt(1_700_000_000_000)
        .single()
        .expect("valid timestamp")
}

pub fn png_file() -> CandidateFile {
    CandidateFile::new("cat.png", "image/png", b"\x89PNG\r\n\x1a\nfake".to_vec())
}

pub fn text_file() -> CandidateFile {
    CandidateFile::new("notes.txt", "text/plain", b"hello".to_vec())
}

pub fn sample_upload_result(id: &str) -> UploadResult {
    UploadResult {
        id: id.to_owned(),
        title: format!("title-{id}"),
        url_viewer: format!("https://ibb.co/{id}"),
        image: ImageInfo {
            url: format!("https://i.ibb.co/{id}/cat.png"),
            filename: "cat.png".to_owned(),
        },
        thumb: ThumbInfo {
            url: format!("https://i.ibb.co/{id}/cat-thumb.png"),
        },
        delete_url: format!("https://ibb.co/{id}/delete-token"),
        url: Some(format!("https://i.ibb.co/{id}/cat.png")),
        display_url: None,
    }
}
