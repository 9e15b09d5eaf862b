//! Copyable links of a successful upload and their "Copied" feedback.

use std::any::{Any, TypeId};
use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::{DateTime, TimeDelta, Utc};
use imgshare_states::{
    Command, CommandFuture, CommandSnapshot, Compute, ComputeDeps, Dep, LatestOnlyUpdater, Time,
    Updater, assign_impl, done,
};
use tokio_util::sync::CancellationToken;

use crate::UploadResult;

/// How long a field shows "Copied" after its last copy.
pub const COPY_FEEDBACK_WINDOW_MS: i64 = 2000;

/// The copyable links shown for a finished upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LinkField {
    /// Direct image URL, for embedding.
    Direct,
    /// Viewer page URL, for sharing.
    Viewer,
}

impl LinkField {
    pub const ALL: [Self; 2] = [Self::Direct, Self::Viewer];

    pub fn label(self) -> &'static str {
        match self {
            Self::Direct => "Direct Link (Hot Link)",
            Self::Viewer => "Viewer Link (Share Link)",
        }
    }

    pub fn help(self) -> &'static str {
        match self {
            Self::Direct => "Best for embedding in HTML, Markdown, or Discord.",
            Self::Viewer => "Best for sharing on social media, WhatsApp, or Email.",
        }
    }

    pub fn value(self, result: &UploadResult) -> &str {
        match self {
            Self::Direct => result.direct_url(),
            Self::Viewer => result.viewer_url(),
        }
    }
}

/// Per-field expiry of the "Copied" indicator.
///
/// Entries are dropped once `Time` passes their expiry, so presence of an
/// entry is the indicator.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CopyFeedbackCompute {
    until: BTreeMap<LinkField, DateTime<Utc>>,
}

impl CopyFeedbackCompute {
    pub fn is_copied(&self, field: LinkField) -> bool {
        self.until.contains_key(&field)
    }

    pub fn expires_at(&self, field: LinkField) -> Option<DateTime<Utc>> {
        self.until.get(&field).copied()
    }

    pub fn any_active(&self) -> bool {
        !self.until.is_empty()
    }

    fn copied_at(&self, field: LinkField, now: DateTime<Utc>) -> Self {
        let mut next = self.clone();
        next.until.insert(field, now + TimeDelta::milliseconds(COPY_FEEDBACK_WINDOW_MS));
        next
    }

    fn expired_removed(&self, now: DateTime<Utc>) -> Option<Self> {
        let until: BTreeMap<_, _> = self
            .until
            .iter()
            .filter(|&(_, expiry)| *expiry > now)
            .map(|(field, expiry)| (*field, *expiry))
            .collect();
        (until.len() != self.until.len()).then_some(Self { until })
    }
}

static COPY_FEEDBACK_STATE_DEPS: LazyLock<[TypeId; 1]> =
    LazyLock::new(|| [TypeId::of::<Time>()]);

impl Compute for CopyFeedbackCompute {
    fn deps(&self) -> ComputeDeps {
        (&*COPY_FEEDBACK_STATE_DEPS, &[])
    }

    fn compute(&self, deps: Dep<'_>, updater: Updater) {
        let now = *deps.get_state_ref::<Time>().as_ref();
        if let Some(next) = self.expired_removed(now) {
            log::trace!(
                target: "imgshare_business::presenter",
                "copy_feedback_expired remaining={}",
                next.until.len()
            );
            updater.set(next);
        }
    }

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

/// Arms the "Copied" window of one field. The clipboard write itself is
/// done by the UI.
#[derive(Debug, Clone, Copy)]
pub struct CopyFieldCommand {
    /// The field whose value was just copied.
    pub field: LinkField,
}

impl CopyFieldCommand {
    pub fn new(field: LinkField) -> Self {
        Self { field }
    }
}

impl Command for CopyFieldCommand {
    fn run(
        &self,
        snap: CommandSnapshot,
        updater: LatestOnlyUpdater,
        _cancel: CancellationToken,
    ) -> CommandFuture {
        let now = *snap.state::<Time>().as_ref();
        let next = snap
            .compute::<CopyFeedbackCompute>()
            .copied_at(self.field, now);
        log::debug!(
            target: "imgshare_business::presenter",
            "field_copied field={:?} until={:?}",
            self.field,
            next.expires_at(self.field)
        );
        updater.set(next);
        done()
    }
}
