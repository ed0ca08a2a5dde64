//! Module: submit
//! Responsibility: the one latent operation — sending a reply or reminder —
//! and its per-record mutual exclusion.
//! Does not own: actual delivery (the `Transport` collaborator) or timing.
//! Boundary: begin/cancel/settle; settling success applies exactly one
//! status transition.

use crate::{error::StoreError, store::RecordStore, traits::Lifecycle};
use adit_core::types::{Id, Timestamp};
use std::collections::BTreeMap;
use thiserror::Error as ThisError;
use tracing::debug;

///
/// Transport
///
/// Delivery collaborator with unspecified latency. `send` hands the message
/// off; completion (or failure) is reported back through [`Outbox::settle`].
///

pub trait Transport {
    fn send(&mut self, recipient: &str, message: &str);
}

///
/// SubmitOutcome
///
/// What the collaborator eventually reports for one in-flight submission.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SubmitOutcome {
    Delivered,
    Failed,
}

///
/// Ticket
///
/// One in-flight submission: where it went and which transition lands when
/// delivery is confirmed.
///

#[derive(Clone, Debug)]
pub struct Ticket<A> {
    pub recipient: String,
    pub message: String,
    pub on_success: A,
}

///
/// Settled
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Settled {
    /// Delivery confirmed; the success transition was applied.
    Applied,
    /// Delivery failed; the record is untouched and no longer pending.
    Failed,
}

///
/// SubmitError
///

#[remain::sorted]
#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SubmitError {
    #[error("a submission for {kind} {id} is already pending")]
    AlreadyPending { kind: &'static str, id: String },

    #[error("no pending submission for {kind} {id}")]
    NotPending { kind: &'static str, id: String },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("no {kind} record with id {id} to submit for")]
    UnknownRecord { kind: &'static str, id: String },
}

///
/// Outbox
///
/// Tracks in-flight submissions per record id. Mutual exclusion is
/// per-record: a second submit for the same record is refused while one is
/// pending; submissions for different records never block each other.
///

#[derive(Debug)]
pub struct Outbox<E: Lifecycle> {
    pending: BTreeMap<Id<E>, Ticket<E::Action>>,
}

impl<E: Lifecycle> Outbox<E> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn is_pending(&self, id: Id<E>) -> bool {
        self.pending.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Start a submission: hand the message to the transport and mark the
    /// record pending until settled or cancelled.
    pub fn begin(
        &mut self,
        id: Id<E>,
        ticket: Ticket<E::Action>,
        transport: &mut dyn Transport,
    ) -> Result<(), SubmitError> {
        if self.is_pending(id) {
            return Err(SubmitError::AlreadyPending {
                kind: E::KIND,
                id: id.to_string(),
            });
        }

        transport.send(&ticket.recipient, &ticket.message);
        debug!(kind = E::KIND, %id, recipient = %ticket.recipient, "submit started");
        self.pending.insert(id, ticket);

        Ok(())
    }

    /// Discard a pending submission; returns `true` if one was pending.
    pub fn cancel(&mut self, id: Id<E>) -> bool {
        let cancelled = self.pending.remove(&id).is_some();
        if cancelled {
            debug!(kind = E::KIND, %id, "submit cancelled");
        }

        cancelled
    }

    /// Report the collaborator's outcome for one pending submission.
    ///
    /// Delivery applies the ticket's success transition to exactly that one
    /// record. Either way the pending slot is freed first, so a record never
    /// gets stuck behind a finished submission.
    pub fn settle(
        &mut self,
        id: Id<E>,
        outcome: SubmitOutcome,
        store: &mut RecordStore<E>,
        now: Timestamp,
    ) -> Result<Settled, SubmitError> {
        let ticket = self.pending.remove(&id).ok_or_else(|| SubmitError::NotPending {
            kind: E::KIND,
            id: id.to_string(),
        })?;

        match outcome {
            SubmitOutcome::Failed => {
                debug!(kind = E::KIND, %id, "submit failed");
                Ok(Settled::Failed)
            }
            SubmitOutcome::Delivered => {
                store.transition(id, ticket.on_success, now)?;
                debug!(kind = E::KIND, %id, "submit delivered");
                Ok(Settled::Applied)
            }
        }
    }
}

impl<E: Lifecycle> Default for Outbox<E> {
    fn default() -> Self {
        Self::new()
    }
}

///
/// TESTS
///
