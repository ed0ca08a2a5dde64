mod deadline;
mod download;
mod inquiry;

pub use deadline::{Deadline, DeadlineAction, DeadlineDraft, DeadlinePatch, DeadlineStatus};
pub use download::{
    DownloadAction, DownloadDraft, DownloadPatch, DownloadRequest, DownloadStatus,
};
pub use inquiry::{Inquiry, InquiryAction, InquiryDraft, InquiryPatch, InquiryStatus};

use adit_core::value::Value;
use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// Priority
///
/// Intrinsically ranked: High outranks Medium outranks Low, regardless of
/// how the labels would sort as strings.
///

#[derive(
    Clone, Copy, Debug, Default, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
    Deserialize,
)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }
}

impl From<Priority> for Value {
    fn from(priority: Priority) -> Self {
        Self::Rank(priority.rank())
    }
}
