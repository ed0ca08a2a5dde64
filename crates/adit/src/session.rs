//! Module: session
//! Responsibility: one screen's worth of state — store, query, page,
//! selection, outbox — and the contracts between them.
//! Does not own: rendering, routing, or the delivery collaborator.
//! Boundary: every upstream change (search/filter/sort/page size) resets the
//! page to 1; bulk actions clear the selection unconditionally.

use crate::{
    entity::{Deadline, DownloadRequest, Inquiry},
    error::{StoreError, ValidationError},
    notice::Notice,
    store::{BulkOutcome, RecordStore},
    submit::{Outbox, Settled, SubmitError, SubmitOutcome, Ticket, Transport},
    traits::{Draft, Lifecycle, Merge},
};
use adit_core::{
    page::{self, PageLink, PageSpec},
    query::{self, FilterChoice, OrderDirection, QueryError, QuerySpec, SortSpec},
    select::Selection,
    types::{Id, Timestamp},
};

///
/// ScreenView
///
/// One render pass: the page slice in view order plus the pagination strip.
/// Rebuilt from scratch on every state change; the engine never diffs.
///

#[derive(Clone, Debug)]
pub struct ScreenView<'a, E> {
    pub rows: Vec<&'a E>,
    pub page: u32,
    pub total_pages: u32,
    pub total_rows: usize,
    pub links: Vec<PageLink>,
}

///
/// Session
///
/// The admin screen facade. Owns the canonical collection and the transient
/// screen state around it; the rendering layer reads `view()` and calls the
/// action methods.
///

pub struct Session<E: Lifecycle> {
    store: RecordStore<E>,
    query: QuerySpec,
    page: PageSpec,
    selection: Selection<E>,
    outbox: Outbox<E>,
    notices: Vec<Notice>,
}

pub type DeadlineScreen = Session<Deadline>;
pub type InquiryScreen = Session<Inquiry>;
pub type DownloadScreen = Session<DownloadRequest>;

impl<E: Lifecycle> Session<E> {
    #[must_use]
    pub fn new(store: RecordStore<E>) -> Self {
        Self {
            store,
            query: QuerySpec::default(),
            page: PageSpec::default(),
            selection: Selection::new(),
            outbox: Outbox::new(),
            notices: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_page_size(mut self, size: u32) -> Self {
        self.page = PageSpec::new(1, size);
        self
    }

    // ------------------------------------------------------------------
    // State inspection
    // ------------------------------------------------------------------

    #[must_use]
    pub const fn store(&self) -> &RecordStore<E> {
        &self.store
    }

    #[must_use]
    pub const fn query(&self) -> &QuerySpec {
        &self.query
    }

    #[must_use]
    pub const fn page(&self) -> PageSpec {
        self.page
    }

    #[must_use]
    pub const fn selection(&self) -> &Selection<E> {
        &self.selection
    }

    #[must_use]
    pub fn is_submit_pending(&self, id: Id<E>) -> bool {
        self.outbox.is_pending(id)
    }

    /// Drain the notices queued since the last render.
    #[must_use]
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    // ------------------------------------------------------------------
    // Query state; every change lands back on page 1
    // ------------------------------------------------------------------

    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        if self.query.search != search {
            self.query.search = search;
            self.page = self.page.reset();
        }
    }

    pub fn set_filter(&mut self, field: impl Into<String>, choice: FilterChoice) {
        let field = field.into();
        if *self.query.filters.choice(&field) != choice {
            self.query.filters.set(field, choice);
            self.page = self.page.reset();
        }
    }

    pub fn sort_by(&mut self, field: impl Into<String>, direction: OrderDirection) {
        let sort = Some(SortSpec::new(field, direction));
        if self.query.sort != sort {
            self.query.sort = sort;
            self.page = self.page.reset();
        }
    }

    /// Column-header behavior: clicking the active sort key flips direction,
    /// clicking another starts ascending.
    pub fn toggle_sort(&mut self, field: impl Into<String>) {
        let field = field.into();
        let direction = match &self.query.sort {
            Some(sort) if sort.field == field => sort.direction.reversed(),
            _ => OrderDirection::Asc,
        };

        self.sort_by(field, direction);
    }

    pub fn set_page_size(&mut self, size: u32) {
        let size = size.max(1);
        if self.page.size != size {
            self.page = PageSpec::new(1, size);
        }
    }

    /// Request a page; out-of-range requests clamp at render time.
    pub fn go_to_page(&mut self, page: u32) {
        self.page.page = page.max(1);
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Re-evaluate the query and paginate. Pure with respect to the screen
    /// state; call it after every action.
    pub fn view(&self) -> Result<ScreenView<'_, E>, QueryError> {
        let matched = query::run(self.store.records(), &self.query)?;
        let paged = page::slice(&matched, self.page);

        Ok(ScreenView {
            rows: paged.items.to_vec(),
            page: paged.page,
            total_pages: paged.total_pages,
            total_rows: paged.total_items,
            links: paged.links,
        })
    }

    /// Ids of the rows on the current page, in view order.
    pub fn visible_ids(&self) -> Result<Vec<Id<E>>, QueryError> {
        Ok(self.view()?.rows.iter().map(|row| row.id()).collect())
    }

    /// Open one record for display, applying its first-view transition.
    pub fn open(&mut self, id: Id<E>) -> Option<&E> {
        self.store.open(id)
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    pub fn toggle_select(&mut self, id: Id<E>) -> bool {
        self.selection.toggle(id)
    }

    /// Page-scoped select-all toggle over the currently visible rows.
    pub fn toggle_select_all(&mut self) -> Result<(), QueryError> {
        let visible = self.visible_ids()?;
        self.selection.toggle_all(&visible);

        Ok(())
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Validate and store a new record. Failure names the missing field and
    /// stores nothing.
    pub fn create<D>(&mut self, draft: D) -> Result<Id<E>, ValidationError>
    where
        D: Draft<Entity = E>,
    {
        let id = self.store.create(draft, Timestamp::now())?;
        self.notices.push(Notice::success(format!("{} created", E::KIND)));

        Ok(id)
    }

    /// Merge a partial edit into one record.
    pub fn update(&mut self, id: Id<E>, patch: E::Patch) -> Result<(), StoreError>
    where
        E: Merge,
    {
        self.store.update(id, patch)?;
        self.notices.push(Notice::success(format!("{} updated", E::KIND)));

        Ok(())
    }

    /// Remove one record; returns `true` if it existed.
    pub fn delete(&mut self, id: Id<E>) -> bool {
        let deleted = self.store.delete(id);
        if deleted {
            self.notices.push(Notice::success(format!("{} deleted", E::KIND)));
        }

        deleted
    }

    /// Apply one explicit status transition to one record.
    pub fn transition(&mut self, id: Id<E>, action: E::Action) -> Result<(), StoreError> {
        self.store.transition(id, action, Timestamp::now())?;
        self.notices.push(Notice::success(format!("{} updated", E::KIND)));

        Ok(())
    }

    /// Delete every selected record, then clear the selection.
    pub fn bulk_delete(&mut self) -> usize {
        let ids = self.selection.take();
        let removed = self.store.delete_many(&ids);

        self.notices
            .push(Notice::success(format!("{removed} records deleted")));
        removed
    }

    /// Apply one transition across the whole selection — ids hidden by
    /// paging included — then clear the selection.
    pub fn bulk_apply(&mut self, action: E::Action) -> BulkOutcome {
        let ids = self.selection.take();
        let outcome = self.store.transition_many(&ids, action, Timestamp::now());

        self.notices.push(Notice::success(format!(
            "{} records updated",
            outcome.applied
        )));
        outcome
    }

    // ------------------------------------------------------------------
    // Submit
    // ------------------------------------------------------------------

    /// Start a reply/reminder submission for one record. Refused while a
    /// submission for the same record is still pending.
    pub fn begin_submit(
        &mut self,
        id: Id<E>,
        recipient: impl Into<String>,
        message: impl Into<String>,
        on_success: E::Action,
        transport: &mut dyn Transport,
    ) -> Result<(), SubmitError> {
        if !self.store.contains(id) {
            return Err(SubmitError::UnknownRecord {
                kind: E::KIND,
                id: id.to_string(),
            });
        }

        self.outbox.begin(
            id,
            Ticket {
                recipient: recipient.into(),
                message: message.into(),
                on_success,
            },
            transport,
        )
    }

    /// Discard a pending submission; returns `true` if one was pending.
    pub fn cancel_submit(&mut self, id: Id<E>) -> bool {
        self.outbox.cancel(id)
    }

    /// Report the transport's outcome; delivery applies the recorded
    /// transition to exactly that record.
    pub fn settle_submit(
        &mut self,
        id: Id<E>,
        outcome: SubmitOutcome,
    ) -> Result<Settled, SubmitError> {
        let settled = self
            .outbox
            .settle(id, outcome, &mut self.store, Timestamp::now())?;

        match settled {
            Settled::Applied => self.notices.push(Notice::success("message sent")),
            Settled::Failed => self.notices.push(Notice::warning("message could not be sent")),
        }

        Ok(settled)
    }
}

///
/// TESTS
///
