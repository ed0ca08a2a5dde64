use crate::error::{TransitionError, ValidationError};
use adit_core::{
    record::Record,
    types::{Id, Timestamp},
};
use std::fmt;

///
/// Draft
///
/// Validated construction input for one record kind. `build` either produces
/// a complete record or names the missing field; it never partially applies.
///

pub trait Draft {
    type Entity: Record;

    fn build(
        self,
        id: Id<Self::Entity>,
        now: Timestamp,
    ) -> Result<Self::Entity, ValidationError>;
}

///
/// Merge
///
/// Partial-field edit. Patches carry only the editable fields; identity and
/// creation timestamp are not representable, so they stay immutable.
///

pub trait Merge {
    type Patch;

    fn merge(&mut self, patch: Self::Patch);
}

///
/// Lifecycle
///
/// Per-kind status state machine: one enum of explicit actions plus the
/// automatic first-view transition. Illegal transitions are rejected as
/// values; status is never assigned around this trait.
///

pub trait Lifecycle: Record {
    type Action: Copy + fmt::Debug;

    /// Apply one explicit transition, stamping timestamps where the table
    /// says so.
    fn apply(&mut self, action: Self::Action, now: Timestamp) -> Result<(), TransitionError>;

    /// Automatic transition on first view; returns `true` if status changed.
    fn on_view(&mut self) -> bool {
        false
    }
}
