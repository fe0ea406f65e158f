// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The availability store: an editing session over an `AgendaGateway`.
//!
//! The store holds the current immutable `AvailabilityState`, replaces it
//! through `apply` on every edit, and keeps a bounded log of the
//! transitions. Commits are split into `begin_commit` (synchronous, takes
//! the in-flight guard and snapshots the diff), `CommitTicket::dispatch`
//! (the gateway round trip), and `finish_commit` (folds the result back).
//! `commit` and `commit_all` drive all three for callers that do not need
//! to interleave edits with an outstanding save.

use crate::apply::apply;
use crate::command::AvailabilityCommand;
use crate::error::CoreError;
use crate::gateway::{AgendaGateway, GatewayError, SlotRecord, SlotUpsert};
use crate::state::{AvailabilityState, PendingDiff, SlotMap, TransitionRecord, TransitionResult};
use futures::future::join_all;
use std::collections::{BTreeSet, VecDeque};
use studio_agenda_domain::{DateKey, PhotographerId};
use tracing::{debug, info, warn};

/// Number of transitions retained in the log.
pub const TRANSITION_LOG_CAPACITY: usize = 256;

/// Notifications delivered to store observers after each transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// The baseline was replaced by a fresh fetch.
    Loaded {
        /// Number of slots fetched.
        slots: usize,
    },
    /// A batch of days was staged.
    Staged {
        /// The photographer edited.
        photographer_id: PhotographerId,
        /// Every day in the batch.
        keys: Vec<DateKey>,
        /// Pending edits for this photographer afterwards.
        pending: usize,
    },
    /// A commit was dispatched.
    CommitStarted {
        /// The photographer being saved.
        photographer_id: PhotographerId,
    },
    /// A commit succeeded and was folded into the baseline.
    Committed {
        /// The photographer saved.
        photographer_id: PhotographerId,
        /// Number of days written.
        upserted: usize,
    },
    /// A commit failed; the diff is intact.
    CommitFailed {
        /// The photographer whose save failed.
        photographer_id: PhotographerId,
        /// Whether retrying may succeed.
        retryable: bool,
    },
}

/// Handle returned by `subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObserverId(u64);

type Observer = Box<dyn FnMut(&StoreEvent) + Send>;

/// A snapshot of one photographer's diff, ready to send.
///
/// Holding a ticket means the store considers a commit for that
/// photographer outstanding until `finish_commit` receives the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitTicket {
    photographer_id: PhotographerId,
    generation: u64,
    payload: PendingDiff,
}

impl CommitTicket {
    /// The photographer being committed.
    #[must_use]
    pub const fn photographer_id(&self) -> PhotographerId {
        self.photographer_id
    }

    /// The upsert batch this ticket will send.
    #[must_use]
    pub fn upserts(&self) -> Vec<SlotUpsert> {
        self.payload
            .iter()
            .map(|(date, value)| SlotUpsert {
                date: *date,
                value: *value,
            })
            .collect()
    }

    /// Sends the batch through the gateway.
    ///
    /// This never touches the store, so the store stays editable while the
    /// request is outstanding.
    pub async fn dispatch<G: AgendaGateway>(self, gateway: &G) -> CommitResponse {
        let result: Result<Vec<SlotRecord>, GatewayError> = gateway
            .upsert_slots(self.photographer_id, self.upserts())
            .await;
        CommitResponse {
            ticket: self,
            result,
        }
    }
}

/// The gateway's answer to a dispatched ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitResponse {
    /// The ticket that was dispatched.
    pub ticket: CommitTicket,
    /// The persisted rows, or the failure.
    pub result: Result<Vec<SlotRecord>, GatewayError>,
}

/// The terminal outcome of a successful commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitOutcome {
    /// The photographer saved.
    pub photographer_id: PhotographerId,
    /// Number of days written.
    pub upserted: usize,
    /// Edits still pending afterwards (made while the save was in flight).
    pub still_pending: usize,
    /// False when a reload happened during the flight and the result was
    /// not folded into the (newer) baseline.
    pub folded: bool,
}

/// Editing session for photographer availability.
pub struct AvailabilityStore<G> {
    gateway: G,
    state: AvailabilityState,
    log: VecDeque<TransitionRecord>,
    revision: u64,
    generation: u64,
    in_flight: BTreeSet<PhotographerId>,
    observers: Vec<(ObserverId, Observer)>,
    next_observer: u64,
}

impl<G: AgendaGateway> AvailabilityStore<G> {
    /// Creates an empty store over a gateway.
    #[must_use]
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            state: AvailabilityState::new(),
            log: VecDeque::with_capacity(TRANSITION_LOG_CAPACITY),
            revision: 0,
            generation: 0,
            in_flight: BTreeSet::new(),
            observers: Vec::new(),
            next_observer: 0,
        }
    }

    /// The gateway this store talks to.
    #[must_use]
    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    /// The current immutable state.
    #[must_use]
    pub const fn state(&self) -> &AvailabilityState {
        &self.state
    }

    /// Recent transitions, oldest first.
    #[must_use]
    pub fn transitions(&self) -> Vec<TransitionRecord> {
        self.log.iter().cloned().collect()
    }

    /// The working slots of one photographer.
    #[must_use]
    pub fn working(&self, photographer_id: PhotographerId) -> SlotMap {
        self.state.working(photographer_id)
    }

    /// The pending diff of one photographer.
    #[must_use]
    pub fn pending(&self, photographer_id: PhotographerId) -> PendingDiff {
        self.state.pending(photographer_id)
    }

    /// Whether a photographer is available on a day in the working view.
    #[must_use]
    pub fn availability(&self, photographer_id: PhotographerId, key: DateKey) -> bool {
        self.state.availability(photographer_id, key)
    }

    /// Whether a commit for this photographer is outstanding.
    #[must_use]
    pub fn is_committing(&self, photographer_id: PhotographerId) -> bool {
        self.in_flight.contains(&photographer_id)
    }

    /// Whether the save action should be enabled for a photographer.
    #[must_use]
    pub fn can_save(&self, photographer_id: PhotographerId) -> bool {
        self.state.has_pending(photographer_id) && !self.is_committing(photographer_id)
    }

    /// Registers an observer called after every transition.
    pub fn subscribe(&mut self, observer: impl FnMut(&StoreEvent) + Send + 'static) -> ObserverId {
        let id: ObserverId = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Removes an observer. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before: usize = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    /// Fetches every photographer's slots and replaces the baseline.
    ///
    /// Any pending edits are discarded: a reload always wins over unsaved
    /// local changes. Returns the working slots for `photographer_id`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::LoadFailed` if the fetch fails, leaving the
    /// current state untouched.
    pub async fn load(&mut self, photographer_id: PhotographerId) -> Result<SlotMap, CoreError> {
        let records: Vec<SlotRecord> = self.gateway.fetch_slots().await.map_err(|err| {
            warn!(photographer_id = %photographer_id, error = %err, "Failed to load availability");
            CoreError::LoadFailed(err)
        })?;
        let slots: usize = records.len();
        let dropped: usize = self.state.pending_count();
        self.transition(AvailabilityCommand::Seed { records }, None)?;
        self.generation += 1;
        if dropped > 0 {
            info!(dropped, "Reload discarded pending availability edits");
        }
        debug!(slots, generation = self.generation, "Availability baseline loaded");
        self.notify(&StoreEvent::Loaded { slots });
        Ok(self.state.working(photographer_id))
    }

    /// Stages one availability flag across a batch of days.
    ///
    /// Start and end times carry over from the working slot, or default when
    /// the day has none. Observers are notified once, after the whole batch.
    ///
    /// # Errors
    ///
    /// Returns a `CoreError` only if the transition itself is rejected.
    pub fn stage(
        &mut self,
        photographer_id: PhotographerId,
        keys: &[DateKey],
        available: bool,
    ) -> Result<(), CoreError> {
        if keys.is_empty() {
            return Ok(());
        }
        self.transition(
            AvailabilityCommand::Stage {
                photographer_id,
                keys: keys.to_vec(),
                available,
            },
            Some(photographer_id),
        )?;
        let pending: usize = self
            .state
            .pending
            .get(&photographer_id)
            .map_or(0, PendingDiff::len);
        self.notify(&StoreEvent::Staged {
            photographer_id,
            keys: keys.to_vec(),
            pending,
        });
        Ok(())
    }

    /// Snapshots a photographer's diff and marks a commit as outstanding.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::CommitInFlight` if a commit is already outstanding
    /// for this photographer, or `CoreError::NoPendingChanges` if the diff is
    /// empty.
    pub fn begin_commit(
        &mut self,
        photographer_id: PhotographerId,
    ) -> Result<CommitTicket, CoreError> {
        if self.is_committing(photographer_id) {
            return Err(CoreError::CommitInFlight { photographer_id });
        }
        let payload: PendingDiff = self.state.pending(photographer_id);
        if payload.is_empty() {
            return Err(CoreError::NoPendingChanges { photographer_id });
        }
        self.in_flight.insert(photographer_id);
        info!(photographer_id = %photographer_id, days = payload.len(), "Saving availability");
        self.notify(&StoreEvent::CommitStarted { photographer_id });
        Ok(CommitTicket {
            photographer_id,
            generation: self.generation,
            payload,
        })
    }

    /// Applies the terminal outcome of a dispatched ticket.
    ///
    /// On success the sent values become baseline and the matching diff
    /// entries are cleared. On failure nothing but the in-flight guard
    /// changes, so the same edits can be saved again.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::CommitFailed` when the gateway failed, or
    /// `CoreError::NoCommitInFlight` for a response the store did not issue.
    pub fn finish_commit(&mut self, response: CommitResponse) -> Result<CommitOutcome, CoreError> {
        let CommitResponse { ticket, result } = response;
        let photographer_id: PhotographerId = ticket.photographer_id;
        if !self.in_flight.remove(&photographer_id) {
            return Err(CoreError::NoCommitInFlight { photographer_id });
        }

        let persisted: Vec<SlotRecord> = match result {
            Ok(persisted) => persisted,
            Err(source) => {
                warn!(
                    photographer_id = %photographer_id,
                    error = %source,
                    "Availability save failed"
                );
                self.notify(&StoreEvent::CommitFailed {
                    photographer_id,
                    retryable: source.is_retryable(),
                });
                return Err(CoreError::CommitFailed {
                    photographer_id,
                    source,
                });
            }
        };

        let upserted: usize = ticket.payload.len();
        if ticket.generation != self.generation {
            debug!(
                photographer_id = %photographer_id,
                "Baseline was reloaded during the save; result not folded"
            );
            return Ok(CommitOutcome {
                photographer_id,
                upserted,
                still_pending: self.state.pending(photographer_id).len(),
                folded: false,
            });
        }

        self.transition(
            AvailabilityCommand::ConfirmCommit {
                photographer_id,
                sent: ticket.payload,
                persisted,
            },
            Some(photographer_id),
        )?;
        let still_pending: usize = self.state.pending(photographer_id).len();
        info!(photographer_id = %photographer_id, upserted, still_pending, "Availability saved");
        self.notify(&StoreEvent::Committed {
            photographer_id,
            upserted,
        });
        Ok(CommitOutcome {
            photographer_id,
            upserted,
            still_pending,
            folded: true,
        })
    }

    /// Commits one photographer's pending edits.
    ///
    /// # Errors
    ///
    /// See `begin_commit` and `finish_commit`.
    pub async fn commit(
        &mut self,
        photographer_id: PhotographerId,
    ) -> Result<CommitOutcome, CoreError> {
        let ticket: CommitTicket = self.begin_commit(photographer_id)?;
        let response: CommitResponse = ticket.dispatch(&self.gateway).await;
        self.finish_commit(response)
    }

    /// Commits every photographer with pending edits concurrently.
    ///
    /// Each photographer's commit is independent: a failure for one leaves
    /// its diff intact and does not affect the others. Photographers with a
    /// commit already outstanding are reported as `CommitInFlight`.
    pub async fn commit_all(&mut self) -> Vec<(PhotographerId, Result<CommitOutcome, CoreError>)> {
        let mut outcomes: Vec<(PhotographerId, Result<CommitOutcome, CoreError>)> = Vec::new();
        let mut tickets: Vec<CommitTicket> = Vec::new();
        for photographer_id in self.state.pending_photographers() {
            match self.begin_commit(photographer_id) {
                Ok(ticket) => tickets.push(ticket),
                Err(err) => outcomes.push((photographer_id, Err(err))),
            }
        }

        let gateway: &G = &self.gateway;
        let responses: Vec<CommitResponse> =
            join_all(tickets.into_iter().map(|ticket| ticket.dispatch(gateway))).await;

        for response in responses {
            let photographer_id: PhotographerId = response.ticket.photographer_id;
            outcomes.push((photographer_id, self.finish_commit(response)));
        }
        outcomes.sort_by_key(|(photographer_id, _)| *photographer_id);
        outcomes
    }

    fn transition(
        &mut self,
        command: AvailabilityCommand,
        photographer_id: Option<PhotographerId>,
    ) -> Result<(), CoreError> {
        let result: TransitionResult = apply(&self.state, command)?;
        self.revision += 1;
        let record: TransitionRecord = TransitionRecord {
            revision: self.revision,
            action: result.command.name(),
            photographer_id,
            keys_affected: result.keys_affected,
            pending_after: result.new_state.pending_count(),
        };
        if self.log.len() == TRANSITION_LOG_CAPACITY {
            self.log.pop_front();
        }
        self.log.push_back(record);
        self.state = result.new_state;
        Ok(())
    }

    fn notify(&mut self, event: &StoreEvent) {
        for (_, observer) in &mut self.observers {
            observer(event);
        }
    }
}

impl<G> std::fmt::Debug for AvailabilityStore<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AvailabilityStore")
            .field("state", &self.state)
            .field("revision", &self.revision)
            .field("generation", &self.generation)
            .field("in_flight", &self.in_flight)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}
