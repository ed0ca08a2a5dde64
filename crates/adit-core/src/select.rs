//! Module: select
//! Responsibility: the set of record ids marked for bulk action.
//! Does not own: the bulk actions themselves (the store applies those).
//! Boundary: page-scoped selection semantics; canonical ascending id order.

use crate::types::Id;
use std::fmt;

///
/// Selection
///
/// Canonical set of typed record identities marked for bulk action.
///
/// - Uniqueness is enforced by identity ordering.
/// - Ordering is canonical (ascending by id) and does NOT reflect click order.
/// - Scope is the visible page: select-all operates on the ids currently
///   rendered, never on the whole filtered result set.
/// - Ids are NOT pruned when a filter change hides their records; bulk
///   operations skip ids that no longer resolve.
///

#[repr(transparent)]
pub struct Selection<E> {
    ids: Vec<Id<E>>,
}

impl<E> Selection<E> {
    /// Create an empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self { ids: Vec::new() }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns `true` if the id is currently selected.
    #[must_use]
    pub fn contains(&self, id: Id<E>) -> bool {
        self.ids.binary_search(&id).is_ok()
    }

    /// Borrow the selected ids in canonical order.
    #[must_use]
    pub fn ids(&self) -> &[Id<E>] {
        &self.ids
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Id<E>> {
        self.ids.iter()
    }

    /// Toggle one id; returns `true` if it is selected afterwards.
    pub fn toggle(&mut self, id: Id<E>) -> bool {
        match self.ids.binary_search(&id) {
            Ok(index) => {
                self.ids.remove(index);
                false
            }
            Err(index) => {
                self.ids.insert(index, id);
                true
            }
        }
    }

    /// Page-scoped select-all toggle.
    ///
    /// If the selection already equals the given page ids exactly, it clears;
    /// otherwise it is replaced by them. Calling twice with the same ids is a
    /// round trip.
    pub fn toggle_all(&mut self, page_ids: &[Id<E>]) {
        let mut page: Vec<Id<E>> = page_ids.to_vec();
        page.sort_unstable();
        page.dedup();

        if page == self.ids {
            self.ids.clear();
        } else {
            self.ids = page;
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Take the selected ids for a bulk operation, leaving the selection
    /// empty. Bulk actions clear the selection unconditionally.
    #[must_use]
    pub fn take(&mut self) -> Vec<Id<E>> {
        std::mem::take(&mut self.ids)
    }
}

impl<E> Clone for Selection<E> {
    fn clone(&self) -> Self {
        Self {
            ids: self.ids.clone(),
        }
    }
}

impl<E> Default for Selection<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Selection<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Selection").field(&self.ids).finish()
    }
}

impl<E> PartialEq for Selection<E> {
    fn eq(&self, other: &Self) -> bool {
        self.ids == other.ids
    }
}

impl<E> Eq for Selection<E> {}

impl<'a, E> IntoIterator for &'a Selection<E> {
    type Item = &'a Id<E>;
    type IntoIter = std::slice::Iter<'a, Id<E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}

///
/// TESTS
///
