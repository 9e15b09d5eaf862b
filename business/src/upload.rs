//! Upload lifecycle: `Idle`, `Uploading`, `Error`, `Success`.
//!
//! All transitions go through two commands. [`SubmitFileCommand`] validates a
//! candidate and starts the request; [`ResetUploadCommand`] returns to `Idle`
//! and cancels whatever is in flight. Drag-hover feedback lives in
//! [`DropZoneState`] so it can change freely while a request is running.

use std::any::Any;

use imgshare_states::{
    Command, CommandFuture, CommandSnapshot, Compute, ComputeDeps, Dep, LatestOnlyUpdater, State,
    Updater, assign_impl, done, state_assign_impl,
};
use tokio_util::sync::CancellationToken;

use crate::{
    CandidateFile, CopyFeedbackCompute, HostingConfig, UploadError, UploadResult, upload_image,
};

/// Where the single upload slot stands.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum UploadState {
    /// Nothing submitted, or reset.
    #[default]
    Idle,
    /// One request is in flight; further submissions are ignored.
    Uploading,
    /// The user-facing message of the last failure.
    Error(String),
    /// The hosted image returned by the API.
    Success(UploadResult),
}

impl UploadState {
    pub fn is_uploading(&self) -> bool {
        matches!(self, Self::Uploading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&UploadResult> {
        match self {
            Self::Success(result) => Some(result),
            _ => None,
        }
    }
}

impl From<Result<UploadResult, UploadError>> for UploadState {
    fn from(outcome: Result<UploadResult, UploadError>) -> Self {
        match outcome {
            Ok(result) => Self::Success(result),
            Err(err) => Self::Error(err.user_message()),
        }
    }
}

/// Holds the current [`UploadState`]. Written only by the upload commands.
#[derive(Debug, Default, Clone)]
pub struct UploadCompute {
    state: UploadState,
}

impl UploadCompute {
    pub fn new(state: UploadState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    pub fn is_uploading(&self) -> bool {
        self.state.is_uploading()
    }
}

impl Compute for UploadCompute {
    fn deps(&self) -> ComputeDeps {
        (&[], &[])
    }

    fn compute(&self, _deps: Dep<'_>, _updater: Updater) {}

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        assign_impl(self, new_self);
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        Some(Box::new(self.clone()))
    }
}

/// Whether files are currently hovering the window.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DropZoneState {
    /// True while the OS reports files hovering the window.
    pub dragging: bool,
}

impl State for DropZoneState {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn assign_box(&mut self, new_self: Box<dyn Any + Send>) {
        state_assign_impl(self, new_self);
    }
}

/// Validates `file` and uploads it.
///
/// Ignored while another upload is running. A file whose declared type is
/// not `image/*` ends in the validation error without any request.
#[derive(Debug, Clone)]
pub struct SubmitFileCommand {
    /// The candidate as handed over by an input source.
    pub file: CandidateFile,
}

impl SubmitFileCommand {
    pub fn new(file: CandidateFile) -> Self {
        Self { file }
    }
}

impl Command for SubmitFileCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        cancel: CancellationToken,
    ) -> CommandFuture {
        if snap.compute::<UploadCompute>().is_uploading() {
            log::debug!(
                target: "imgshare_business::upload",
                "submit_ignored_while_uploading name={}",
                self.file.name
            );
            return done();
        }

        if !self.file.is_image() {
            log::info!(
                target: "imgshare_business::upload",
                "submit_rejected name={} mime={:?}",
                self.file.name,
                self.file.mime_type
            );
            // Leaving `Success` drops the links, and their copy flags with them.
            updater.set(CopyFeedbackCompute::default());
            updater.set(UploadCompute::new(UploadState::Error(
                UploadError::Validation.user_message(),
            )));
            return done();
        }

        updater.set(CopyFeedbackCompute::default());
        updater.set(UploadCompute::new(UploadState::Uploading));

        let config = snap.state::<HostingConfig>().clone();
        let file = self.file.clone();
        let generation = updater.generation();

        Box::pin(async move {
            tokio::select! {
                () = cancel.cancelled() => {
                    log::info!(
                        target: "imgshare_business::upload",
                        "upload_cancelled generation={generation}"
                    );
                }
                outcome = upload_image(&config, file) => {
                    updater.set(UploadCompute::new(outcome.into()));
                }
            }
        })
    }
}

/// Back to `Idle`. Clears copy feedback and cancels a running upload.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResetUploadCommand;

impl Command for ResetUploadCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        _cancel: CancellationToken,
    ) -> CommandFuture {
        if snap.compute::<UploadCompute>().is_uploading() {
            log::info!(target: "imgshare_business::upload", "reset_during_upload");
            updater.cancel_command::<SubmitFileCommand>();
        }
        updater.set(UploadCompute::default());
        updater.set(CopyFeedbackCompute::default());
        done()
    }
}
