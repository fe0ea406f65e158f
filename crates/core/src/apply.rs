// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::AvailabilityCommand;
use crate::error::CoreError;
use crate::gateway::SlotRecord;
use crate::state::{AvailabilityState, TransitionResult};
use studio_agenda_domain::{AvailabilitySlot, DateKey, DomainError, PhotographerId, SlotValue};

/// Applies a command to a state, producing a new state.
///
/// The input state is never modified. All days in a `Stage` batch are
/// applied to the same new state, so observers of the result never see a
/// partially applied range.
///
/// # Errors
///
/// Returns `CoreError::DomainViolation` if a seeded or confirmed record
/// carries a time window that runs backwards.
pub fn apply(
    state: &AvailabilityState,
    command: AvailabilityCommand,
) -> Result<TransitionResult, CoreError> {
    let mut new_state: AvailabilityState = state.clone();
    let keys_affected: usize = match &command {
        AvailabilityCommand::Seed { records } => {
            validate_records(records)?;
            new_state.baseline.clear();
            new_state.pending.clear();
            for record in records {
                new_state
                    .baseline
                    .entry(record.photographer_id)
                    .or_default()
                    .insert(record.date, record.to_slot());
            }
            records.len()
        }
        AvailabilityCommand::Stage {
            photographer_id,
            keys,
            available,
        } => {
            for key in keys {
                let next: SlotValue = new_state
                    .working_value(*photographer_id, *key)
                    .with_available(*available);
                new_state.set_working(*photographer_id, *key, next);
            }
            keys.len()
        }
        AvailabilityCommand::ConfirmCommit {
            photographer_id,
            sent,
            persisted,
        } => {
            validate_records(persisted)?;
            fold_commit(&mut new_state, *photographer_id, sent, persisted)?;
            sent.len()
        }
    };

    Ok(TransitionResult {
        new_state,
        command,
        keys_affected,
    })
}

fn validate_records(records: &[SlotRecord]) -> Result<(), CoreError> {
    for record in records {
        record.value().validate_window()?;
    }
    Ok(())
}

/// Moves sent values into the baseline.
///
/// The working value of every sent day is captured first and re-staged
/// against the new baseline, so edits made while the commit was in flight
/// stay pending (including a day flipped back to its old value).
fn fold_commit(
    state: &mut AvailabilityState,
    photographer_id: PhotographerId,
    sent: &std::collections::BTreeMap<DateKey, SlotValue>,
    persisted: &[SlotRecord],
) -> Result<(), CoreError> {
    if let Some(stray) = persisted
        .iter()
        .find(|record| record.photographer_id != photographer_id)
    {
        return Err(CoreError::DomainViolation(DomainError::InvalidIdentifier {
            field: String::from("photographer_id"),
            value: stray.photographer_id.to_string(),
        }));
    }

    let intended: Vec<(DateKey, SlotValue)> = sent
        .keys()
        .map(|key| (*key, state.working_value(photographer_id, *key)))
        .collect();

    for (key, value) in sent {
        let slot_id: Option<i64> = state
            .baseline_slot(photographer_id, *key)
            .and_then(|slot| slot.slot_id);
        state
            .baseline
            .entry(photographer_id)
            .or_default()
            .insert(*key, AvailabilitySlot::new(slot_id, *value));
    }
    for record in persisted {
        state
            .baseline
            .entry(photographer_id)
            .or_default()
            .insert(record.date, record.to_slot());
    }

    for (key, value) in intended {
        state.set_working(photographer_id, key, value);
    }
    state.prune_converged(photographer_id);
    Ok(())
}
