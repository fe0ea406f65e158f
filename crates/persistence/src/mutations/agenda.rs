// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::upsert::excluded;
use studio_agenda::SlotRecord;
use studio_agenda_domain::{DEFAULT_END, DEFAULT_START, DateKey, PhotographerId, SlotValue};
use tracing::debug;

use crate::data_models::SlotPatch;
use crate::diesel_schema::schedule_slots;
use crate::error::PersistenceError;
use crate::queries::agenda::{find_slot, photographer_exists};

/// Writes one slot value, inserting or updating the `(photographer, date)` row.
///
/// Must run inside the caller's transaction.
pub(crate) fn upsert_slot_value(
    conn: &mut SqliteConnection,
    photographer_id: PhotographerId,
    date: DateKey,
    value: SlotValue,
) -> Result<SlotRecord, PersistenceError> {
    value.validate_window()?;

    diesel::insert_into(schedule_slots::table)
        .values((
            schedule_slots::photographer_id.eq(photographer_id.value()),
            schedule_slots::slot_date.eq(date.to_string()),
            schedule_slots::start_time.eq(value.start.to_string()),
            schedule_slots::end_time.eq(value.end.to_string()),
            schedule_slots::available.eq(i32::from(value.available)),
        ))
        .on_conflict((schedule_slots::photographer_id, schedule_slots::slot_date))
        .do_update()
        .set((
            schedule_slots::start_time.eq(excluded(schedule_slots::start_time)),
            schedule_slots::end_time.eq(excluded(schedule_slots::end_time)),
            schedule_slots::available.eq(excluded(schedule_slots::available)),
        ))
        .execute(conn)?;

    find_slot(conn, photographer_id, date)?.ok_or_else(|| {
        PersistenceError::QueryFailed(format!(
            "slot ({photographer_id}, {date}) missing after upsert"
        ))
    })
}

/// Resolves a patch against the stored row, or the defaults for a new day.
///
/// A new day without an explicit flag is written as available.
fn merge_patch(existing: Option<&SlotRecord>, patch: &SlotPatch) -> SlotValue {
    let base: SlotValue = existing.map_or(
        SlotValue::new(true, DEFAULT_START, DEFAULT_END),
        SlotRecord::value,
    );
    SlotValue::new(
        patch.available.unwrap_or(base.available),
        patch.start.unwrap_or(base.start),
        patch.end.unwrap_or(base.end),
    )
}

/// Upserts a batch of slot patches for one photographer.
///
/// The whole batch is applied in one transaction; replaying the same batch
/// updates the same rows in place.
///
/// # Errors
///
/// Returns `PersistenceError::PhotographerNotFound` if the photographer
/// does not exist, or a domain violation if a merged window runs backwards.
/// Nothing is written on error.
pub fn upsert_slots(
    conn: &mut SqliteConnection,
    photographer_id: PhotographerId,
    patches: &[SlotPatch],
) -> Result<Vec<SlotRecord>, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        if !photographer_exists(conn, photographer_id)? {
            return Err(PersistenceError::PhotographerNotFound(
                photographer_id.value(),
            ));
        }

        let mut written: Vec<SlotRecord> = Vec::with_capacity(patches.len());
        for patch in patches {
            let existing: Option<SlotRecord> = find_slot(conn, photographer_id, patch.date)?;
            let value: SlotValue = merge_patch(existing.as_ref(), patch);
            written.push(upsert_slot_value(conn, photographer_id, patch.date, value)?);
        }

        debug!(
            photographer_id = photographer_id.value(),
            upserted = written.len(),
            "Upserted schedule slots"
        );
        Ok(written)
    })
}
