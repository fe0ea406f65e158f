// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::lifecycle::{LifecycleCatalog, LifecycleStatus};
use crate::time_of_day::{DEFAULT_END, DEFAULT_START, TimeOfDay};
use serde::{Deserialize, Serialize};

/// Identifies a photographer whose agenda is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotographerId(i64);

impl PhotographerId {
    /// Creates a photographer identifier.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidIdentifier` unless `value` is positive.
    pub fn new(value: i64) -> Result<Self, DomainError> {
        if value <= 0 {
            return Err(DomainError::InvalidIdentifier {
                field: String::from("photographer_id"),
                value: value.to_string(),
            });
        }
        Ok(Self(value))
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for PhotographerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The editable part of a slot: availability flag plus time window.
///
/// This is the unit compared against the baseline when tracking pending
/// changes, so it deliberately excludes the persisted slot id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotValue {
    /// Whether the photographer takes sessions that day.
    pub available: bool,
    /// Start of the working window.
    pub start: TimeOfDay,
    /// End of the working window.
    pub end: TimeOfDay,
}

impl SlotValue {
    /// Creates a slot value.
    #[must_use]
    pub const fn new(available: bool, start: TimeOfDay, end: TimeOfDay) -> Self {
        Self {
            available,
            start,
            end,
        }
    }

    /// A slot value with the default 08:00-17:00 window.
    #[must_use]
    pub const fn with_default_window(available: bool) -> Self {
        Self::new(available, DEFAULT_START, DEFAULT_END)
    }

    /// Returns a copy with a different availability flag.
    #[must_use]
    pub const fn with_available(self, available: bool) -> Self {
        Self { available, ..self }
    }

    /// Checks that the window does not run backwards.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimeWindow` when `start > end`.
    pub fn validate_window(&self) -> Result<(), DomainError> {
        if self.start > self.end {
            return Err(DomainError::InvalidTimeWindow {
                start: self.start.to_string(),
                end: self.end.to_string(),
            });
        }
        Ok(())
    }
}

/// The value assumed for a day with no slot record: unavailable, default window.
impl Default for SlotValue {
    fn default() -> Self {
        Self::with_default_window(false)
    }
}

/// A photographer's availability record for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    /// The persisted identifier; `None` until first saved.
    pub slot_id: Option<i64>,
    /// Whether the photographer takes sessions that day.
    pub available: bool,
    /// Start of the working window.
    pub start: TimeOfDay,
    /// End of the working window.
    pub end: TimeOfDay,
}

impl AvailabilitySlot {
    /// Creates a slot from a persisted id and a value.
    #[must_use]
    pub const fn new(slot_id: Option<i64>, value: SlotValue) -> Self {
        Self {
            slot_id,
            available: value.available,
            start: value.start,
            end: value.end,
        }
    }

    /// Returns the editable value of this slot.
    #[must_use]
    pub const fn value(&self) -> SlotValue {
        SlotValue::new(self.available, self.start, self.end)
    }
}

/// A scheduled photography session (an "activity").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    /// The booking identifier.
    pub id: i64,
    /// The schedule slot consumed by this booking, if any.
    pub schedule_slot_id: Option<i64>,
    /// The lifecycle status id; `None` means the first (pending) status.
    pub lifecycle_status_id: Option<i64>,
    /// The stored payment label, free text.
    pub payment_status: Option<String>,
    /// The booked package.
    pub package_id: i64,
    /// The customer who booked.
    pub customer_id: i64,
}

impl Booking {
    /// Resolves this booking's lifecycle status, defaulting to the first one.
    #[must_use]
    pub fn resolved_status<'a>(
        &self,
        catalog: &'a LifecycleCatalog,
    ) -> Option<&'a LifecycleStatus> {
        catalog.resolve(self.lifecycle_status_id)
    }

    /// Whether the booking has reached the terminal delivered status.
    #[must_use]
    pub fn is_delivered(&self, catalog: &LifecycleCatalog) -> bool {
        self.resolved_status(catalog)
            .is_some_and(LifecycleStatus::is_delivered)
    }

    /// Rejects any change once the booking has been delivered.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::BookingDelivered` for delivered bookings.
    pub fn ensure_mutable(&self, catalog: &LifecycleCatalog) -> Result<(), DomainError> {
        if self.is_delivered(catalog) {
            return Err(DomainError::BookingDelivered {
                booking_id: self.id,
            });
        }
        Ok(())
    }
}
