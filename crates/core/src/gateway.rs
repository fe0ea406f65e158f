// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The seam between the editing session and the agenda backend.
//!
//! The store never talks to a database or a network directly; it goes
//! through an `AgendaGateway`. The server provides one backed by
//! persistence, tests provide in-memory fakes.

use futures::future::BoxFuture;
use studio_agenda_domain::{AvailabilitySlot, DateKey, PhotographerId, SlotValue, TimeOfDay};
use thiserror::Error;

/// A persisted slot as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRecord {
    /// The persisted slot identifier.
    pub slot_id: i64,
    /// The owning photographer.
    pub photographer_id: PhotographerId,
    /// The day the slot covers.
    pub date: DateKey,
    /// Start of the working window.
    pub start: TimeOfDay,
    /// End of the working window.
    pub end: TimeOfDay,
    /// Whether the photographer takes sessions that day.
    pub available: bool,
}

impl SlotRecord {
    /// The editable value of this record.
    #[must_use]
    pub const fn value(&self) -> SlotValue {
        SlotValue::new(self.available, self.start, self.end)
    }

    /// This record as an availability slot.
    #[must_use]
    pub const fn to_slot(&self) -> AvailabilitySlot {
        AvailabilitySlot::new(Some(self.slot_id), self.value())
    }
}

/// One entry of an idempotent upsert keyed by `(photographer, date)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotUpsert {
    /// The day to write.
    pub date: DateKey,
    /// The value to write.
    pub value: SlotValue,
}

/// Failures reported by a gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The backend rejected the request as invalid.
    #[error("rejected: {0}")]
    Rejected(String),
    /// The addressed resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),
    /// Transport or storage failure.
    #[error("backend failure: {0}")]
    Backend(String),
}

impl GatewayError {
    /// Whether the same request may succeed if sent again.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Backend(_))
    }
}

/// Access to the agenda's source of truth.
pub trait AgendaGateway: Send + Sync {
    /// Fetches every slot of every photographer in one query.
    fn fetch_slots(&self) -> BoxFuture<'_, Result<Vec<SlotRecord>, GatewayError>>;

    /// Upserts slots for one photographer and returns the persisted rows.
    ///
    /// Replaying the same batch must not create duplicate rows.
    fn upsert_slots(
        &self,
        photographer_id: PhotographerId,
        upserts: Vec<SlotUpsert>,
    ) -> BoxFuture<'_, Result<Vec<SlotRecord>, GatewayError>>;
}
