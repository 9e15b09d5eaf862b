use std::sync::{Arc, Mutex};
use std::time::Duration;

use egui_kittest::Harness;
use imgshare_business::{CandidateFile, ImageInfo, ThumbInfo, UploadResult};
use imgshare_ui::ImgShareApp;
use imgshare_ui::state::State;
use imgshare_ui::utils::clipboard::{ClipboardError, ClipboardImage, ClipboardProvider};
use imgshare_ui::utils::drop_handler::{DropHandler, SystemDropHandler};
use imgshare_ui::utils::file_picker::FilePickerHandler;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const UPLOAD_PATH: &str = "/1/upload";

pub struct TestCtx<'a> {
    mock_server: MockServer,
    harness: Harness<'a, ImgShareApp>,
}

impl<'a> TestCtx<'a> {
    pub async fn new_app() -> Self {
        Self::new_app_with(|state| state).await
    }

    /// Builds the app after `configure` had a chance to swap input handlers.
    pub async fn new_app_with(configure: impl FnOnce(State) -> State) -> Self {
        let _ = env_logger::builder().is_test(true).try_init();

        let mock_server = MockServer::start().await;
        let state = configure(State::test(format!("{}{UPLOAD_PATH}", mock_server.uri())));
        let app = ImgShareApp::new(state);
        let harness = Harness::new_eframe(|_| app);

        Self {
            mock_server,
            harness,
        }
    }

    pub fn harness_mut(&mut self) -> &mut Harness<'a, ImgShareApp> {
        &mut self.harness
    }

    #[allow(unused)]
    pub fn harness(&self) -> &Harness<'a, ImgShareApp> {
        &self.harness
    }

    #[allow(unused)]
    pub fn mock_server(&self) -> &MockServer {
        &self.mock_server
    }

    /// Steps frames while yielding to Tokio so upload tasks make progress.
    pub async fn settle(&mut self, frames: usize) {
        for _ in 0..frames {
            self.harness.step();
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    /// Steps until `done` holds or `max_frames` is exhausted.
    #[allow(unused)]
    pub async fn settle_until(&mut self, max_frames: usize, done: impl Fn(&ImgShareApp) -> bool) {
        for _ in 0..max_frames {
            self.harness.step();
            if done(self.harness.state()) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("condition not reached after {max_frames} frames");
    }

    #[allow(unused)]
    pub async fn received_uploads(&self) -> usize {
        self.mock_server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or_default()
    }

    #[allow(unused)]
    pub async fn mock_upload_success(&self, result: UploadResult, delay: Duration) {
        self.mount(
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

    #[allow(unused)]
    pub async fn mock_upload_failure(&self, message: &str) {
        self.mount(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "success": false,
            "status": 400,
            "error": { "message": message },
        })))
        .await;
    }

    async fn mount(&self, response: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path(UPLOAD_PATH))
            .and(query_param("key", "test-key"))
            .respond_with(response)
            .mount(&self.mock_server)
            .await;
    }
}

#[allow(unused)]
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
            url: format!("https://i.ibb.co/{id}/thumb.png"),
        },
        delete_url: format!("https://ibb.co/{id}/delete"),
        url: None,
        display_url: None,
    }
}

/// A file dropped with in-memory bytes, as the web backends deliver it.
#[allow(unused)]
pub fn dropped_file(name: &str, mime: &str, bytes: &[u8]) -> egui::DroppedFile {
    egui::DroppedFile {
        name: name.to_owned(),
        mime: mime.to_owned(),
        bytes: Some(Arc::from(bytes)),
        ..Default::default()
    }
}

#[allow(unused)]
pub fn command_key(key: egui::Key) -> egui::Event {
    egui::Event::Key {
        key,
        physical_key: None,
        pressed: true,
        repeat: false,
        modifiers: egui::Modifiers::COMMAND,
    }
}

/// Clipboard that always holds the same image.
#[allow(unused)]
pub struct FakeClipboard(pub Option<ClipboardImage>);

impl ClipboardProvider for FakeClipboard {
    fn get_image(&self) -> Result<Option<ClipboardImage>, ClipboardError> {
        Ok(self.0.clone())
    }
}

/// File dialog that returns a fixed file and counts how often it opened.
#[derive(Clone, Default)]
#[allow(unused)]
pub struct FakePicker {
    pub file: Option<CandidateFile>,
    pub opened: Arc<Mutex<usize>>,
}

impl FakePicker {
    #[allow(unused)]
    pub fn returning(file: CandidateFile) -> Self {
        Self {
            file: Some(file),
            opened: Arc::default(),
        }
    }

    #[allow(unused)]
    pub fn opened(&self) -> usize {
        self.opened.lock().map(|count| *count).unwrap_or_default()
    }
}

impl FilePickerHandler for FakePicker {
    fn pick_file(&self) -> Option<CandidateFile> {
        if let Ok(mut count) = self.opened.lock() {
            *count += 1;
        }
        self.file.clone()
    }
}

/// The real drop handler, counting how many dropped files it read.
#[derive(Clone, Default)]
#[allow(unused)]
pub struct CountingDropHandler {
    pub read: Arc<Mutex<usize>>,
}

impl CountingDropHandler {
    #[allow(unused)]
    pub fn read(&self) -> usize {
        self.read.lock().map(|count| *count).unwrap_or_default()
    }
}

impl DropHandler for CountingDropHandler {
    fn handle_drop(&self, ctx: &egui::Context) -> Option<CandidateFile> {
        let file = SystemDropHandler.handle_drop(ctx)?;
        if let Ok(mut count) = self.read.lock() {
            *count += 1;
        }
        Some(file)
    }
}
