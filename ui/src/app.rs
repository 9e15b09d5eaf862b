use std::time::Duration;

use imgshare_business::{
    CandidateFile, CopyFeedbackCompute, CopyFieldCommand, DropZoneState, ResetUploadCommand,
    SubmitFileCommand, UploadCompute, UploadState,
};
use imgshare_states::Time;

use crate::{
    state::State,
    utils::{drop_handler::files_hovering, file_picker::open_shortcut_pressed},
    widgets::{self, ResultAction},
};

/// Repaint cadence while an upload runs or a "Copied" flag is showing.
const BUSY_REPAINT: Duration = Duration::from_millis(100);
const CONTENT_WIDTH: f32 = 640.0;

pub struct ImgShareApp {
    pub state: State,
}

impl ImgShareApp {
    /// Called once before the first frame.
    pub fn new(state: State) -> Self {
        Self { state }
    }

    fn handle_input(&mut self, ctx: &egui::Context) {
        let hovering = files_hovering(ctx);
        if self.state.ctx.state::<DropZoneState>().dragging != hovering {
            self.state
                .ctx
                .update::<DropZoneState>(|zone| zone.dragging = hovering);
        }

        // A submission would be ignored anyway; skip reading the file.
        if !self.state.ctx.compute::<UploadCompute>().is_uploading() {
            if let Some(file) = self.state.drop_handler.handle_drop(ctx) {
                self.submit(file, "drop");
            }
            if let Some(file) = self.state.paste_handler.handle_paste(ctx) {
                self.submit(file, "paste");
            }
        }
        if open_shortcut_pressed(ctx) {
            self.browse();
        }
    }

    fn browse(&mut self) {
        if self.state.ctx.compute::<UploadCompute>().is_uploading() {
            return;
        }
        if let Some(file) = self.state.file_picker.pick_file() {
            self.submit(file, "picker");
        }
    }

    fn submit(&mut self, file: CandidateFile, source: &str) {
        log::info!(
            target: "imgshare_ui",
            "file_submitted source={source} name={} mime={} size={}",
            file.name,
            file.mime_type,
            file.size()
        );
        self.state.ctx.enqueue(SubmitFileCommand::new(file));
    }

    fn reset(&mut self) {
        self.state.ctx.enqueue_command::<ResetUploadCommand>();
    }

    fn main_view(&mut self, ui: &mut egui::Ui) {
        let upload = self.state.ctx.compute::<UploadCompute>().state().clone();

        if let Some(message) = upload.error() {
            if widgets::error_banner(ui, message) {
                self.reset();
            }
            ui.add_space(16.0);
        }

        if let UploadState::Success(result) = &upload {
            let action = widgets::result_panel(ui, result, self.state.ctx.compute());
            match action {
                ResultAction::Copied(field) => self.state.ctx.enqueue(CopyFieldCommand::new(field)),
                ResultAction::UploadAnother => self.reset(),
                ResultAction::None => {}
            }
            return;
        }

        ui.vertical_centered(|ui| {
            ui.heading(egui::RichText::new("Share images instantly").size(28.0).strong());
            ui.label("Free, anonymous image hosting. Direct links in one click.");
        });
        ui.add_space(24.0);

        let dragging = self.state.ctx.state::<DropZoneState>().dragging;
        if widgets::drop_zone(ui, upload.is_uploading(), dragging).clicked() {
            self.browse();
        }
    }

    fn needs_repaint(&self) -> bool {
        self.state.ctx.compute::<UploadCompute>().is_uploading()
            || self.state.ctx.compute::<CopyFeedbackCompute>().any_active()
            || self.state.ctx.pending_commands() > 0
    }
}

impl eframe::App for ImgShareApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Advance the clock and let expired copy feedback drop before render.
        self.state.ctx.update::<Time>(|time| *time = Time::now());
        self.state.ctx.sync_computes();
        self.state.ctx.run_all_dirty();
        self.state.ctx.sync_computes();

        self.handle_input(ctx);

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.add_space(4.0);
            if widgets::header(ui) {
                self.reset();
            }
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                let side = ((ui.available_width() - CONTENT_WIDTH) / 2.0).max(0.0);
                ui.horizontal(|ui| {
                    ui.add_space(side);
                    ui.vertical(|ui| {
                        ui.set_max_width(CONTENT_WIDTH);
                        ui.add_space(24.0);
                        self.main_view(ui);
                    });
                });
            });
        });

        self.state.ctx.run_all_dirty();
        self.state.ctx.sync_computes();
        self.state.ctx.flush_commands();

        if self.needs_repaint() {
            ctx.request_repaint_after(BUSY_REPAINT);
        }
    }
}
