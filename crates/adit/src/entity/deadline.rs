use crate::{
    entity::Priority,
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
/// Deadline
///
/// A tracked obligation on the deadlines screen: permit renewals, inspection
/// windows, filings. The one kind the back office creates by hand.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Deadline {
    id: Id<Deadline>,
    created_at: Timestamp,
    status: DeadlineStatus,
    pub title: String,
    pub notes: String,
    pub priority: Priority,
    pub due_at: Timestamp,
}

impl Deadline {
    #[must_use]
    pub const fn status(&self) -> DeadlineStatus {
        self.status
    }

    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self.status, DeadlineStatus::Completed)
    }
}

impl Record for Deadline {
    const KIND: &'static str = "deadline";
    const FIELDS: &'static [&'static str] =
        &["title", "notes", "priority", "due_at", "status", "created_at"];
    const SEARCH_FIELDS: &'static [&'static str] = &["title", "notes"];

    fn id(&self) -> Id<Self> {
        self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }

    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "title" => Some(Value::text(&self.title)),
            "notes" => Some(Value::text(&self.notes)),
            "priority" => Some(self.priority.into()),
            "due_at" => Some(self.due_at.into()),
            "status" => Some(self.status.into()),
            "created_at" => Some(self.created_at.into()),
            _ => None,
        }
    }
}

///
/// DeadlineStatus
///
/// Two states, toggled in either direction, unguarded.
///

#[derive(
    Clone, Copy, Debug, Default, Display, Eq, Hash, PartialEq, Serialize, Deserialize,
)]
pub enum DeadlineStatus {
    #[default]
    Active,
    Completed,
}

impl DeadlineStatus {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Completed,
            Self::Completed => Self::Active,
        }
    }

    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Active => 0,
            Self::Completed => 1,
        }
    }
}

impl From<DeadlineStatus> for Value {
    fn from(status: DeadlineStatus) -> Self {
        Self::Rank(status.rank())
    }
}

///
/// DeadlineAction
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DeadlineAction {
    Toggle,
}

impl Lifecycle for Deadline {
    type Action = DeadlineAction;

    fn apply(&mut self, action: Self::Action, _now: Timestamp) -> Result<(), TransitionError> {
        match action {
            DeadlineAction::Toggle => {
                self.status = self.status.toggled();
                Ok(())
            }
        }
    }
}

///
/// DeadlineDraft
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct DeadlineDraft {
    pub title: String,
    pub notes: String,
    pub priority: Priority,
    pub due_at: Option<Timestamp>,
}

impl Draft for DeadlineDraft {
    type Entity = Deadline;

    fn build(self, id: Id<Deadline>, now: Timestamp) -> Result<Deadline, ValidationError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(ValidationError::missing("title"));
        }

        let due_at = self.due_at.ok_or(ValidationError::missing("due_at"))?;

        Ok(Deadline {
            id,
            created_at: now,
            status: DeadlineStatus::Active,
            title,
            notes: self.notes,
            priority: self.priority,
            due_at,
        })
    }
}

///
/// DeadlinePatch
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct DeadlinePatch {
    pub title: Option<String>,
    pub notes: Option<String>,
    pub priority: Option<Priority>,
    pub due_at: Option<Timestamp>,
}

impl Merge for Deadline {
    type Patch = DeadlinePatch;

    fn merge(&mut self, patch: Self::Patch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(due_at) = patch.due_at {
            self.due_at = due_at;
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn build(title: &str, due_at: Option<Timestamp>) -> Result<Deadline, ValidationError> {
        DeadlineDraft {
            title: title.to_string(),
            due_at,
            ..DeadlineDraft::default()
        }
        .build(Id::generate(), Timestamp::from_seconds(10))
    }

    #[test]
    fn draft_requires_title() {
        let err = build("   ", Some(Timestamp::from_seconds(99))).unwrap_err();
        assert_eq!(err, ValidationError::missing("title"));
    }

    #[test]
    fn draft_requires_due_date() {
        let err = build("Renew blasting permit", None).unwrap_err();
        assert_eq!(err, ValidationError::missing("due_at"));
    }

    #[test]
    fn draft_builds_active_by_default() {
        let deadline = build("Renew blasting permit", Some(Timestamp::from_seconds(99))).unwrap();

        assert_eq!(deadline.status(), DeadlineStatus::Active);
        assert_eq!(deadline.created_at(), Timestamp::from_seconds(10));
    }

    #[test]
    fn toggle_runs_both_directions() {
        let mut deadline =
            build("Quarterly assay report", Some(Timestamp::from_seconds(99))).unwrap();
        let now = Timestamp::from_seconds(20);

        deadline.apply(DeadlineAction::Toggle, now).unwrap();
        assert!(deadline.is_completed());

        deadline.apply(DeadlineAction::Toggle, now).unwrap();
        assert!(!deadline.is_completed());
    }

    #[test]
    fn merge_leaves_identity_untouched() {
        let mut deadline =
            build("Quarterly assay report", Some(Timestamp::from_seconds(99))).unwrap();
        let id = deadline.id();

        deadline.merge(DeadlinePatch {
            title: Some("Annual assay report".to_string()),
            priority: Some(Priority::High),
            ..DeadlinePatch::default()
        });

        assert_eq!(deadline.id(), id);
        assert_eq!(deadline.created_at(), Timestamp::from_seconds(10));
        assert_eq!(deadline.title, "Annual assay report");
        assert_eq!(deadline.priority, Priority::High);
        // Unpatched fields keep their values.
        assert_eq!(deadline.due_at, Timestamp::from_seconds(99));
    }
}
