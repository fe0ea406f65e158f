// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::gateway::SlotRecord;
use std::collections::BTreeMap;
use studio_agenda_domain::{DateKey, PhotographerId, SlotValue};

/// A command represents an availability edit as data only.
///
/// Commands are the only way to move from one `AvailabilityState` to the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvailabilityCommand {
    /// Replace the baseline with freshly fetched records and drop every
    /// pending edit.
    Seed {
        /// Every slot of every photographer.
        records: Vec<SlotRecord>,
    },
    /// Set the availability flag for a batch of days.
    Stage {
        /// The photographer being edited.
        photographer_id: PhotographerId,
        /// The days to change.
        keys: Vec<DateKey>,
        /// The new availability flag.
        available: bool,
    },
    /// Fold a successful commit into the baseline.
    ConfirmCommit {
        /// The photographer that was committed.
        photographer_id: PhotographerId,
        /// The values that were sent.
        sent: BTreeMap<DateKey, SlotValue>,
        /// The rows the backend reported back.
        persisted: Vec<SlotRecord>,
    },
}

impl AvailabilityCommand {
    /// A short name for logs and the transition log.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Seed { .. } => "Seed",
            Self::Stage { .. } => "Stage",
            Self::ConfirmCommit { .. } => "ConfirmCommit",
        }
    }
}
