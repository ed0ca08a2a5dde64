//! Adit — the record administration engine behind the back-office screens:
//! typed record stores with per-kind status state machines, search + filter +
//! sort views, windowed pagination, page-scoped bulk selection, a submit
//! outbox, and the notification-preferences model.
//!
//! Rendering, routing, persistence, and actual message delivery are external
//! collaborators; the engine consumes an initial collection and a
//! [`submit::Transport`] implementation.

// public exports are one module level down
pub mod entity;
pub mod error;
pub mod notice;
pub mod notify;
pub mod session;
pub mod store;
pub mod submit;
pub mod traits;

pub use adit_core as core;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No engine internals or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        entity::{
            Deadline, DeadlineDraft, DeadlineStatus, DownloadRequest, DownloadStatus, Inquiry,
            InquiryDraft, InquiryStatus, Priority,
        },
        notify::{Category, Frequency, NotificationSettings, PrefsAction, QuietHours, Recipient},
        session::{DeadlineScreen, DownloadScreen, InquiryScreen, ScreenView, Session},
        store::RecordStore,
        submit::{SubmitOutcome, Transport},
    };
    pub use adit_core::prelude::*;
}
