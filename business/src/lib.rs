//! Business layer of ImgShare: upload lifecycle, result presentation and the
//! hosting API client, expressed as states, computes and commands for
//! `imgshare_states::StateCtx`.

mod candidate;
mod config;
mod error;
mod hosting;
pub mod http;
mod presenter;
mod upload;

#[cfg(test)]
mod test_utils;

use imgshare_states::{StateCtx, Time};

pub use candidate::CandidateFile;
pub use config::{DEFAULT_ENDPOINT, HostingConfig};
pub use error::{NETWORK_MESSAGE, UPLOAD_FAILED_MESSAGE, UploadError, VALIDATION_MESSAGE};
pub use hosting::{IMAGE_PART, ImageInfo, KEY_PARAM, ThumbInfo, UploadResult, upload_image};
pub use presenter::{COPY_FEEDBACK_WINDOW_MS, CopyFeedbackCompute, CopyFieldCommand, LinkField};
pub use upload::{
    DropZoneState, ResetUploadCommand, SubmitFileCommand, UploadCompute, UploadState,
};

/// Registers every state, compute and command of the upload flow.
pub fn register(ctx: &mut StateCtx, config: HostingConfig) {
    ctx.add_state(Time::now());
    ctx.add_state(config);
    ctx.add_state(DropZoneState::default());

    ctx.record_compute(UploadCompute::default());
    ctx.record_compute(CopyFeedbackCompute::default());

    ctx.record_command(ResetUploadCommand);
}
