// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::AvailabilityCommand;
use std::collections::BTreeMap;
use studio_agenda_domain::{AvailabilitySlot, DateKey, PhotographerId, SlotValue};

/// Slots of one photographer, keyed by day.
pub type SlotMap = BTreeMap<DateKey, AvailabilitySlot>;

/// Pending edits of one photographer, keyed by day.
pub type PendingDiff = BTreeMap<DateKey, SlotValue>;

/// An immutable snapshot of an availability editing session.
///
/// The working view is never stored: it is always the pending diff laid
/// over the baseline. A diff entry exists only while it differs from the
/// baseline value for its day. A day without a baseline slot always
/// differs, so any edit to it stays pending until saved.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AvailabilityState {
    pub(crate) baseline: BTreeMap<PhotographerId, SlotMap>,
    pub(crate) pending: BTreeMap<PhotographerId, PendingDiff>,
}

impl AvailabilityState {
    /// Creates an empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The server-confirmed slot for a day, if one exists.
    #[must_use]
    pub fn baseline_slot(
        &self,
        photographer_id: PhotographerId,
        key: DateKey,
    ) -> Option<&AvailabilitySlot> {
        self.baseline
            .get(&photographer_id)
            .and_then(|slots| slots.get(&key))
    }

    /// The server-confirmed value for a day, if the day has a slot.
    #[must_use]
    pub fn baseline_value(
        &self,
        photographer_id: PhotographerId,
        key: DateKey,
    ) -> Option<SlotValue> {
        self.baseline_slot(photographer_id, key)
            .map(AvailabilitySlot::value)
    }

    /// The pending edit for a day, if any.
    #[must_use]
    pub fn pending_value(
        &self,
        photographer_id: PhotographerId,
        key: DateKey,
    ) -> Option<SlotValue> {
        self.pending
            .get(&photographer_id)
            .and_then(|diff| diff.get(&key))
            .copied()
    }

    /// The working value for a day: the pending edit if any, else the
    /// baseline, else the unavailable default.
    #[must_use]
    pub fn working_value(&self, photographer_id: PhotographerId, key: DateKey) -> SlotValue {
        self.pending_value(photographer_id, key)
            .or_else(|| self.baseline_value(photographer_id, key))
            .unwrap_or_default()
    }

    /// The working slot for a day, carrying the persisted id when one exists.
    #[must_use]
    pub fn working_slot(&self, photographer_id: PhotographerId, key: DateKey) -> AvailabilitySlot {
        let slot_id: Option<i64> = self
            .baseline_slot(photographer_id, key)
            .and_then(|slot| slot.slot_id);
        AvailabilitySlot::new(slot_id, self.working_value(photographer_id, key))
    }

    /// Whether the photographer is available on a day in the working view.
    #[must_use]
    pub fn availability(&self, photographer_id: PhotographerId, key: DateKey) -> bool {
        self.working_value(photographer_id, key).available
    }

    /// Every working slot of a photographer: baseline days plus pending days.
    #[must_use]
    pub fn working(&self, photographer_id: PhotographerId) -> SlotMap {
        let mut slots: SlotMap = self
            .baseline
            .get(&photographer_id)
            .cloned()
            .unwrap_or_default();
        if let Some(diff) = self.pending.get(&photographer_id) {
            for (key, value) in diff {
                let slot_id: Option<i64> = slots.get(key).and_then(|slot| slot.slot_id);
                slots.insert(*key, AvailabilitySlot::new(slot_id, *value));
            }
        }
        slots
    }

    /// The server-confirmed slots of a photographer.
    #[must_use]
    pub fn baseline(&self, photographer_id: PhotographerId) -> SlotMap {
        self.baseline
            .get(&photographer_id)
            .cloned()
            .unwrap_or_default()
    }

    /// The pending diff of a photographer (empty when nothing is staged).
    #[must_use]
    pub fn pending(&self, photographer_id: PhotographerId) -> PendingDiff {
        self.pending
            .get(&photographer_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Whether a photographer has unsaved edits.
    #[must_use]
    pub fn has_pending(&self, photographer_id: PhotographerId) -> bool {
        self.pending
            .get(&photographer_id)
            .is_some_and(|diff| !diff.is_empty())
    }

    /// Photographers with unsaved edits, in id order.
    #[must_use]
    pub fn pending_photographers(&self) -> Vec<PhotographerId> {
        self.pending
            .iter()
            .filter(|(_, diff)| !diff.is_empty())
            .map(|(id, _)| *id)
            .collect()
    }

    /// Photographers known to the baseline, in id order.
    #[must_use]
    pub fn photographers(&self) -> Vec<PhotographerId> {
        self.baseline.keys().copied().collect()
    }

    /// Total number of pending edits across all photographers.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.values().map(BTreeMap::len).sum()
    }

    /// Records `value` as the working value for a day, dropping the diff
    /// entry when it converges back to the baseline.
    pub(crate) fn set_working(
        &mut self,
        photographer_id: PhotographerId,
        key: DateKey,
        value: SlotValue,
    ) {
        let baseline: Option<SlotValue> = self.baseline_value(photographer_id, key);
        let diff: &mut PendingDiff = self.pending.entry(photographer_id).or_default();
        if baseline == Some(value) {
            diff.remove(&key);
        } else {
            diff.insert(key, value);
        }
        if diff.is_empty() {
            self.pending.remove(&photographer_id);
        }
    }

    /// Drops diff entries that equal the baseline after the baseline moved.
    pub(crate) fn prune_converged(&mut self, photographer_id: PhotographerId) {
        let Some(diff) = self.pending.get(&photographer_id) else {
            return;
        };
        let converged: Vec<DateKey> = diff
            .iter()
            .filter(|(key, value)| self.baseline_value(photographer_id, **key) == Some(**value))
            .map(|(key, _)| *key)
            .collect();
        if let Some(diff) = self.pending.get_mut(&photographer_id) {
            for key in converged {
                diff.remove(&key);
            }
            if diff.is_empty() {
                self.pending.remove(&photographer_id);
            }
        }
    }
}

/// One entry of the transition log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionRecord {
    /// Monotonic revision number assigned by the store.
    pub revision: u64,
    /// The command that produced the transition.
    pub action: &'static str,
    /// The photographer affected, when the command is scoped to one.
    pub photographer_id: Option<PhotographerId>,
    /// Number of days the command touched.
    pub keys_affected: usize,
    /// Pending edits across all photographers after the transition.
    pub pending_after: usize,
}

/// The result of applying one command.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects, and the previous state is never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: AvailabilityState,
    /// The command that was applied.
    pub command: AvailabilityCommand,
    /// Number of days the command touched.
    pub keys_affected: usize,
}
