use crate::{
    error::{TransitionError, ValidationError},
    traits::{Draft, Lifecycle, Merge},
};
use adit_core::{
    record::Record,
    types::{Id, Timestamp},
    value::Value,
};
use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// DownloadRequest
///
/// A gated-resource request from the public site: someone asked for a
/// technical report or feasibility study and a clerk approves or rejects it.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DownloadRequest {
    id: Id<DownloadRequest>,
    created_at: Timestamp,
    status: DownloadStatus,
    replied_at: Option<Timestamp>,
    pub name: String,
    pub email: String,
    pub company: String,
    pub resource: String,
    pub received_at: Timestamp,
}

impl DownloadRequest {
    #[must_use]
    pub const fn status(&self) -> DownloadStatus {
        self.status
    }

    #[must_use]
    pub const fn replied_at(&self) -> Option<Timestamp> {
        self.replied_at
    }
}

impl Record for DownloadRequest {
    const KIND: &'static str = "download request";
    const FIELDS: &'static [&'static str] = &[
        "name",
        "email",
        "company",
        "resource",
        "received_at",
        "replied_at",
        "status",
        "created_at",
    ];
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "email", "company", "resource"];

    fn id(&self) -> Id<Self> {
        self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }

    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "name" => Some(Value::text(&self.name)),
            "email" => Some(Value::text(&self.email)),
            "company" => Some(Value::text(&self.company)),
            "resource" => Some(Value::text(&self.resource)),
            "received_at" => Some(self.received_at.into()),
            "replied_at" => Some(self.replied_at.into()),
            "status" => Some(self.status.into()),
            "created_at" => Some(self.created_at.into()),
            _ => None,
        }
    }
}

///
/// DownloadStatus
///
/// `New → Reviewed` happens automatically on first view. A reviewed request
/// is approved or rejected (both stamp the decision time). Approved,
/// Rejected, and Archived are terminal.
///

#[derive(
    Clone, Copy, Debug, Default, Display, Eq, Hash, PartialEq, Serialize, Deserialize,
)]
pub enum DownloadStatus {
    #[default]
    New,
    Reviewed,
    Approved,
    Rejected,
    Archived,
}

impl DownloadStatus {
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::New => 0,
            Self::Reviewed => 1,
            Self::Approved => 2,
            Self::Rejected => 3,
            Self::Archived => 4,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Reviewed => "reviewed",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Archived => "archived",
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected | Self::Archived)
    }
}

impl From<DownloadStatus> for Value {
    fn from(status: DownloadStatus) -> Self {
        Self::Rank(status.rank())
    }
}

///
/// DownloadAction
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DownloadAction {
    Approve,
    Archive,
    Reject,
}

impl Lifecycle for DownloadRequest {
    type Action = DownloadAction;

    fn apply(&mut self, action: Self::Action, now: Timestamp) -> Result<(), TransitionError> {
        match action {
            DownloadAction::Approve => self.decide(DownloadStatus::Approved, "approve", now),
            DownloadAction::Reject => self.decide(DownloadStatus::Rejected, "reject", now),
            DownloadAction::Archive => {
                if self.status.is_terminal() {
                    return Err(TransitionError {
                        kind: Self::KIND,
                        from: self.status.label(),
                        action: "archive",
                    });
                }

                self.status = DownloadStatus::Archived;
                Ok(())
            }
        }
    }

    fn on_view(&mut self) -> bool {
        if self.status == DownloadStatus::New {
            self.status = DownloadStatus::Reviewed;
            true
        } else {
            false
        }
    }
}

impl DownloadRequest {
    /// Approve/reject share the same guard: only a reviewed request can be
    /// decided, and the decision time is stamped.
    fn decide(
        &mut self,
        to: DownloadStatus,
        action: &'static str,
        now: Timestamp,
    ) -> Result<(), TransitionError> {
        if self.status != DownloadStatus::Reviewed {
            return Err(TransitionError {
                kind: Self::KIND,
                from: self.status.label(),
                action,
            });
        }

        self.status = to;
        self.replied_at = Some(now);
        Ok(())
    }
}

///
/// DownloadDraft
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct DownloadDraft {
    pub name: String,
    pub email: String,
    pub company: String,
    pub resource: String,
    pub received_at: Option<Timestamp>,
}

impl Draft for DownloadDraft {
    type Entity = DownloadRequest;

    fn build(self, id: Id<DownloadRequest>, now: Timestamp) -> Result<DownloadRequest, ValidationError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::missing("name"));
        }

        let resource = self.resource.trim().to_string();
        if resource.is_empty() {
            return Err(ValidationError::missing("resource"));
        }

        let received_at = self
            .received_at
            .ok_or(ValidationError::missing("received_at"))?;

        Ok(DownloadRequest {
            id,
            created_at: now,
            status: DownloadStatus::New,
            replied_at: None,
            name,
            email: self.email,
            company: self.company,
            resource,
            received_at,
        })
    }
}

///
/// DownloadPatch
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct DownloadPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub resource: Option<String>,
}

impl Merge for DownloadRequest {
    type Patch = DownloadPatch;

    fn merge(&mut self, patch: Self::Patch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(company) = patch.company {
            self.company = company;
        }
        if let Some(resource) = patch.resource {
            self.resource = resource;
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> DownloadRequest {
        DownloadDraft {
            name: "Tom Brask".to_string(),
            email: "tom@brask.no".to_string(),
            company: "Brask Consulting".to_string(),
            resource: "2025 Feasibility Study".to_string(),
            received_at: Some(Timestamp::from_seconds(500)),
        }
        .build(Id::generate(), Timestamp::from_seconds(500))
        .unwrap()
    }

    #[test]
    fn draft_requires_name_resource_and_date() {
        let missing_resource = DownloadDraft {
            name: "Tom".to_string(),
            received_at: Some(Timestamp::from_seconds(1)),
            ..DownloadDraft::default()
        };

        assert_eq!(
            missing_resource
                .build(Id::generate(), Timestamp::EPOCH)
                .unwrap_err(),
            ValidationError::missing("resource")
        );
    }

    #[test]
    fn first_view_marks_reviewed() {
        let mut request = request();

        assert!(request.on_view());
        assert_eq!(request.status(), DownloadStatus::Reviewed);
        assert!(!request.on_view());
    }

    #[test]
    fn approve_requires_review_first() {
        let mut request = request();

        let err = request
            .apply(DownloadAction::Approve, Timestamp::from_seconds(600))
            .unwrap_err();
        assert_eq!(err.from, "new");

        request.on_view();
        request
            .apply(DownloadAction::Approve, Timestamp::from_seconds(600))
            .unwrap();

        assert_eq!(request.status(), DownloadStatus::Approved);
        assert_eq!(request.replied_at(), Some(Timestamp::from_seconds(600)));
    }

    #[test]
    fn reject_stamps_decision_time() {
        let mut request = request();
        request.on_view();

        request
            .apply(DownloadAction::Reject, Timestamp::from_seconds(700))
            .unwrap();

        assert_eq!(request.status(), DownloadStatus::Rejected);
        assert_eq!(request.replied_at(), Some(Timestamp::from_seconds(700)));
    }

    #[test]
    fn archive_only_from_non_terminal_status() {
        let mut fresh = request();
        fresh
            .apply(DownloadAction::Archive, Timestamp::from_seconds(800))
            .unwrap();
        assert_eq!(fresh.status(), DownloadStatus::Archived);

        let mut approved = request();
        approved.on_view();
        approved
            .apply(DownloadAction::Approve, Timestamp::from_seconds(800))
            .unwrap();

        let err = approved
            .apply(DownloadAction::Archive, Timestamp::from_seconds(900))
            .unwrap_err();
        assert_eq!(err.from, "approved");
        assert_eq!(approved.status(), DownloadStatus::Approved);
    }

    #[test]
    fn decided_request_cannot_flip() {
        let mut request = request();
        request.on_view();
        request
            .apply(DownloadAction::Approve, Timestamp::from_seconds(600))
            .unwrap();

        let err = request
            .apply(DownloadAction::Reject, Timestamp::from_seconds(700))
            .unwrap_err();
        assert_eq!(err.from, "approved");
    }
}
