//! Module: store
//! Responsibility: the canonical per-screen collection and its mutations.
//! Does not own: query evaluation, pagination, or selection state.
//! Boundary: create/update/delete plus status transitions, most-recent-first.

use crate::{
    error::{StoreError, ValidationError},
    traits::{Draft, Lifecycle, Merge},
};
use adit_core::{
    record::Record,
    types::{Id, Timestamp},
};
use tracing::debug;

///
/// RecordStore
///
/// Owns the canonical collection for one screen. New records are prepended
/// so the collection reads most-recent-first; the seeded order of an initial
/// collection is trusted as-is.
///

#[derive(Clone, Debug)]
pub struct RecordStore<E> {
    records: Vec<E>,
}

impl<E: Record> RecordStore<E> {
    /// Create an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Adopt an initial collection from the surrounding data source.
    #[must_use]
    pub fn seeded(records: Vec<E>) -> Self {
        Self { records }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Borrow the collection, most-recent-first.
    #[must_use]
    pub fn records(&self) -> &[E] {
        &self.records
    }

    #[must_use]
    pub fn get(&self, id: Id<E>) -> Option<&E> {
        self.position(id).map(|index| &self.records[index])
    }

    #[must_use]
    pub fn contains(&self, id: Id<E>) -> bool {
        self.position(id).is_some()
    }

    fn position(&self, id: Id<E>) -> Option<usize> {
        self.records.iter().position(|record| record.id() == id)
    }

    /// Validate a draft and prepend the new record.
    ///
    /// On failure the error names the missing field and nothing is stored.
    pub fn create<D>(&mut self, draft: D, now: Timestamp) -> Result<Id<E>, ValidationError>
    where
        D: Draft<Entity = E>,
    {
        let id = Id::generate();
        let record = draft.build(id, now)?;

        self.records.insert(0, record);
        debug!(kind = E::KIND, %id, "record created");

        Ok(id)
    }

    /// Merge a partial-field patch into one record.
    pub fn update(&mut self, id: Id<E>, patch: E::Patch) -> Result<(), StoreError>
    where
        E: Merge,
    {
        let index = self.position(id).ok_or_else(|| StoreError::UnknownId {
            kind: E::KIND,
            id: id.to_string(),
        })?;

        self.records[index].merge(patch);
        debug!(kind = E::KIND, %id, "record updated");

        Ok(())
    }

    /// Remove one record; returns `true` if it existed.
    pub fn delete(&mut self, id: Id<E>) -> bool {
        match self.position(id) {
            Some(index) => {
                self.records.remove(index);
                debug!(kind = E::KIND, %id, "record deleted");
                true
            }
            None => false,
        }
    }

    /// Remove every record whose id is in `ids`; returns how many went.
    /// Ids that no longer resolve are skipped silently.
    pub fn delete_many(&mut self, ids: &[Id<E>]) -> usize {
        let before = self.records.len();
        self.records.retain(|record| !ids.contains(&record.id()));

        let removed = before - self.records.len();
        if removed > 0 {
            debug!(kind = E::KIND, removed, "bulk delete");
        }

        removed
    }
}

impl<E: Lifecycle> RecordStore<E> {
    /// Open one record for display, applying the kind's automatic
    /// first-view transition (`New → Read`, `New → Reviewed`).
    pub fn open(&mut self, id: Id<E>) -> Option<&E> {
        let index = self.position(id)?;

        if self.records[index].on_view() {
            debug!(kind = E::KIND, %id, "first view transition");
        }

        Some(&self.records[index])
    }

    /// Apply one explicit status transition to one record.
    pub fn transition(
        &mut self,
        id: Id<E>,
        action: E::Action,
        now: Timestamp,
    ) -> Result<(), StoreError> {
        let index = self.position(id).ok_or_else(|| StoreError::UnknownId {
            kind: E::KIND,
            id: id.to_string(),
        })?;

        self.records[index].apply(action, now)?;
        debug!(kind = E::KIND, %id, ?action, "status transition");

        Ok(())
    }

    /// Apply one transition across a selection, page visibility regardless.
    ///
    /// Missing ids are skipped, illegal transitions are rejected per record;
    /// neither aborts the rest of the batch.
    pub fn transition_many(
        &mut self,
        ids: &[Id<E>],
        action: E::Action,
        now: Timestamp,
    ) -> BulkOutcome {
        let mut outcome = BulkOutcome::default();

        for &id in ids {
            match self.transition(id, action, now) {
                Ok(()) => outcome.applied += 1,
                Err(StoreError::UnknownId { .. }) => outcome.skipped += 1,
                Err(StoreError::Transition(_)) => outcome.rejected += 1,
            }
        }

        debug!(kind = E::KIND, ?action, applied = outcome.applied, "bulk transition");
        outcome
    }
}

impl<E: Record> Default for RecordStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

///
/// BulkOutcome
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BulkOutcome {
    pub applied: usize,
    pub skipped: usize,
    pub rejected: usize,
}

impl BulkOutcome {
    #[must_use]
    pub const fn total(self) -> usize {
        self.applied + self.skipped + self.rejected
    }
}

///
/// TESTS
///
