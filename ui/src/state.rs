use imgshare_business::HostingConfig;
use imgshare_states::StateCtx;

use crate::utils::{
    drop_handler::{DropHandler, SystemDropHandler},
    file_picker::{FilePickerHandler, SystemFilePickerHandler},
    paste_handler::{PasteHandler, SystemPasteHandler},
};

/// The main application state.
///
/// The input handlers are trait objects so tests can swap in fakes for the
/// OS drop events, clipboard and file dialog.
pub struct State {
    pub ctx: StateCtx,
    pub drop_handler: Box<dyn DropHandler>,
    pub paste_handler: Box<dyn PasteHandler>,
    pub file_picker: Box<dyn FilePickerHandler>,
}

impl Default for State {
    fn default() -> Self {
        let config = HostingConfig::init().unwrap_or_else(|err| {
            log::error!(target: "imgshare_ui", "hosting_config_invalid err={err:#}");
            HostingConfig::default()
        });
        Self::with_config(config)
    }
}

impl State {
    pub fn with_config(config: HostingConfig) -> Self {
        let mut ctx = StateCtx::new();
        imgshare_business::register(&mut ctx, config);

        Self {
            ctx,
            drop_handler: Box::new(SystemDropHandler),
            paste_handler: Box::new(SystemPasteHandler::default()),
            file_picker: Box::new(SystemFilePickerHandler),
        }
    }

    /// State pointed at a mock hosting endpoint.
    pub fn test(endpoint: String) -> Self {
        Self::with_config(HostingConfig::new(endpoint, "test-key"))
    }

    pub fn with_drop_handler(mut self, handler: impl DropHandler + 'static) -> Self {
        self.drop_handler = Box::new(handler);
        self
    }

    pub fn with_paste_handler(mut self, handler: impl PasteHandler + 'static) -> Self {
        self.paste_handler = Box::new(handler);
        self
    }

    pub fn with_file_picker(mut self, picker: impl FilePickerHandler + 'static) -> Self {
        self.file_picker = Box::new(picker);
        self
    }
}
