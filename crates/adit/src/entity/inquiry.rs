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
/// Inquiry
///
/// A contact-form message from the public site. Arrives `New`, becomes `Read`
/// the first time a clerk opens it, and carries the reply timestamp once
/// answered.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Inquiry {
    id: Id<Inquiry>,
    created_at: Timestamp,
    status: InquiryStatus,
    replied_at: Option<Timestamp>,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub received_at: Timestamp,
}

impl Inquiry {
    #[must_use]
    pub const fn status(&self) -> InquiryStatus {
        self.status
    }

    #[must_use]
    pub const fn replied_at(&self) -> Option<Timestamp> {
        self.replied_at
    }
}

impl Record for Inquiry {
    const KIND: &'static str = "inquiry";
    const FIELDS: &'static [&'static str] = &[
        "name",
        "email",
        "subject",
        "message",
        "received_at",
        "replied_at",
        "status",
        "created_at",
    ];
    const SEARCH_FIELDS: &'static [&'static str] = &["name", "email", "subject", "message"];

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
            "subject" => Some(Value::text(&self.subject)),
            "message" => Some(Value::text(&self.message)),
            "received_at" => Some(self.received_at.into()),
            "replied_at" => Some(self.replied_at.into()),
            "status" => Some(self.status.into()),
            "created_at" => Some(self.created_at.into()),
            _ => None,
        }
    }
}

///
/// InquiryStatus
///
/// `New → Read` happens automatically on first view; `Read → Replied` stamps
/// the reply time; anything can be archived.
///

#[derive(
    Clone, Copy, Debug, Default, Display, Eq, Hash, PartialEq, Serialize, Deserialize,
)]
pub enum InquiryStatus {
    #[default]
    New,
    Read,
    Replied,
    Archived,
}

impl InquiryStatus {
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::New => 0,
            Self::Read => 1,
            Self::Replied => 2,
            Self::Archived => 3,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Read => "read",
            Self::Replied => "replied",
            Self::Archived => "archived",
        }
    }
}

impl From<InquiryStatus> for Value {
    fn from(status: InquiryStatus) -> Self {
        Self::Rank(status.rank())
    }
}

///
/// InquiryAction
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InquiryAction {
    Archive,
    Reply,
}

impl Lifecycle for Inquiry {
    type Action = InquiryAction;

    fn apply(&mut self, action: Self::Action, now: Timestamp) -> Result<(), TransitionError> {
        match action {
            InquiryAction::Reply => match self.status {
                InquiryStatus::Read => {
                    self.status = InquiryStatus::Replied;
                    self.replied_at = Some(now);
                    Ok(())
                }
                from => Err(TransitionError {
                    kind: Self::KIND,
                    from: from.label(),
                    action: "reply to",
                }),
            },
            InquiryAction::Archive => {
                self.status = InquiryStatus::Archived;
                Ok(())
            }
        }
    }

    fn on_view(&mut self) -> bool {
        if self.status == InquiryStatus::New {
            self.status = InquiryStatus::Read;
            true
        } else {
            false
        }
    }
}

///
/// InquiryDraft
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct InquiryDraft {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub received_at: Option<Timestamp>,
}

impl Draft for InquiryDraft {
    type Entity = Inquiry;

    fn build(self, id: Id<Inquiry>, now: Timestamp) -> Result<Inquiry, ValidationError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::missing("name"));
        }

        let received_at = self
            .received_at
            .ok_or(ValidationError::missing("received_at"))?;

        Ok(Inquiry {
            id,
            created_at: now,
            status: InquiryStatus::New,
            replied_at: None,
            name,
            email: self.email,
            subject: self.subject,
            message: self.message,
            received_at,
        })
    }
}

///
/// InquiryPatch
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct InquiryPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
}

impl Merge for Inquiry {
    type Patch = InquiryPatch;

    fn merge(&mut self, patch: Self::Patch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(subject) = patch.subject {
            self.subject = subject;
        }
        if let Some(message) = patch.message {
            self.message = message;
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn inquiry() -> Inquiry {
        InquiryDraft {
            name: "Jane Halloran".to_string(),
            email: "jane@example.com".to_string(),
            subject: "Site visit".to_string(),
            message: "Can we tour the mill?".to_string(),
            received_at: Some(Timestamp::from_seconds(100)),
        }
        .build(Id::generate(), Timestamp::from_seconds(100))
        .unwrap()
    }

    #[test]
    fn draft_requires_name_and_received_date() {
        let blank = InquiryDraft {
            received_at: Some(Timestamp::from_seconds(1)),
            ..InquiryDraft::default()
        };
        assert_eq!(
            blank.build(Id::generate(), Timestamp::EPOCH).unwrap_err(),
            ValidationError::missing("name")
        );

        let undated = InquiryDraft {
            name: "Jane".to_string(),
            ..InquiryDraft::default()
        };
        assert_eq!(
            undated.build(Id::generate(), Timestamp::EPOCH).unwrap_err(),
            ValidationError::missing("received_at")
        );
    }

    #[test]
    fn first_view_marks_read_once() {
        let mut inquiry = inquiry();

        assert!(inquiry.on_view());
        assert_eq!(inquiry.status(), InquiryStatus::Read);

        // Second view is not a transition.
        assert!(!inquiry.on_view());
        assert_eq!(inquiry.status(), InquiryStatus::Read);
    }

    #[test]
    fn reply_stamps_timestamp_after_view() {
        let mut inquiry = inquiry();
        inquiry.on_view();

        inquiry
            .apply(InquiryAction::Reply, Timestamp::from_seconds(250))
            .unwrap();

        assert_eq!(inquiry.status(), InquiryStatus::Replied);
        let replied_at = inquiry.replied_at().unwrap();
        assert!(replied_at >= inquiry.received_at);
    }

    #[test]
    fn reply_from_new_is_rejected() {
        let mut inquiry = inquiry();

        let err = inquiry
            .apply(InquiryAction::Reply, Timestamp::from_seconds(250))
            .unwrap_err();

        assert_eq!(err.from, "new");
        assert_eq!(inquiry.status(), InquiryStatus::New);
        assert_eq!(inquiry.replied_at(), None);
    }

    #[test]
    fn archive_is_allowed_from_any_status() {
        let preparations: [fn(&mut Inquiry); 3] = [
            |_| {},
            |i| {
                i.on_view();
            },
            |i| {
                i.on_view();
                i.apply(InquiryAction::Reply, Timestamp::from_seconds(250))
                    .unwrap();
            },
        ];

        for prepare in preparations {
            let mut inquiry = inquiry();
            prepare(&mut inquiry);

            inquiry
                .apply(InquiryAction::Archive, Timestamp::from_seconds(300))
                .unwrap();
            assert_eq!(inquiry.status(), InquiryStatus::Archived);
        }
    }
}
