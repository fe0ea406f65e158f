// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use studio_agenda::SlotRecord;
use studio_agenda_domain::{DateKey, DomainError, PhotographerId, TimeOfDay};

use crate::data_models::PhotographerData;
use crate::diesel_schema::{photographers, schedule_slots};
use crate::error::PersistenceError;

/// Diesel Queryable struct for schedule slot rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = schedule_slots)]
pub(crate) struct SlotRow {
    pub slot_id: i64,
    pub photographer_id: i64,
    pub slot_date: String,
    pub start_time: String,
    pub end_time: String,
    pub available: i32,
}

impl SlotRow {
    /// Converts a stored row into a slot record.
    ///
    /// Stored times are normalized to `HH:MM` on the way out, so rows
    /// written by older tools with `HH:MM:SS` still read back cleanly.
    pub(crate) fn into_record(self) -> Result<SlotRecord, PersistenceError> {
        let invalid = |e: DomainError| {
            PersistenceError::ReconstructionError(format!("slot {}: {e}", self.slot_id))
        };
        let photographer_id: PhotographerId =
            PhotographerId::new(self.photographer_id).map_err(invalid)?;
        let date: DateKey = DateKey::parse(&self.slot_date).ok_or_else(|| {
            PersistenceError::ReconstructionError(format!(
                "slot {} has invalid date '{}'",
                self.slot_id, self.slot_date
            ))
        })?;
        let start: TimeOfDay = TimeOfDay::parse(&self.start_time).map_err(invalid)?;
        let end: TimeOfDay = TimeOfDay::parse(&self.end_time).map_err(invalid)?;
        Ok(SlotRecord {
            slot_id: self.slot_id,
            photographer_id,
            date,
            start,
            end,
            available: self.available != 0,
        })
    }
}

fn into_records(rows: Vec<SlotRow>) -> Result<Vec<SlotRecord>, PersistenceError> {
    rows.into_iter().map(SlotRow::into_record).collect()
}

/// Lists every slot of every photographer, by photographer then date.
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
pub fn list_all_slots(conn: &mut SqliteConnection) -> Result<Vec<SlotRecord>, PersistenceError> {
    let rows: Vec<SlotRow> = schedule_slots::table
        .order((schedule_slots::photographer_id.asc(), schedule_slots::slot_date.asc()))
        .select(SlotRow::as_select())
        .load(conn)?;
    into_records(rows)
}

/// Lists one photographer's slots in ascending date order, optionally
/// restricted to an inclusive window.
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
pub fn list_slots(
    conn: &mut SqliteConnection,
    photographer_id: PhotographerId,
    from: Option<DateKey>,
    to: Option<DateKey>,
) -> Result<Vec<SlotRecord>, PersistenceError> {
    let mut query = schedule_slots::table
        .select(SlotRow::as_select())
        .filter(schedule_slots::photographer_id.eq(photographer_id.value()))
        .into_boxed();
    // Keys are zero-padded, so text order is calendar order.
    if let Some(from) = from {
        query = query.filter(schedule_slots::slot_date.ge(from.to_string()));
    }
    if let Some(to) = to {
        query = query.filter(schedule_slots::slot_date.le(to.to_string()));
    }
    let rows: Vec<SlotRow> = query.order(schedule_slots::slot_date.asc()).load(conn)?;
    into_records(rows)
}

/// Finds the slot for one `(photographer, date)` pair.
///
/// # Errors
///
/// Returns an error if the query fails or the row is malformed.
pub fn find_slot(
    conn: &mut SqliteConnection,
    photographer_id: PhotographerId,
    date: DateKey,
) -> Result<Option<SlotRecord>, PersistenceError> {
    let row: Option<SlotRow> = schedule_slots::table
        .filter(schedule_slots::photographer_id.eq(photographer_id.value()))
        .filter(schedule_slots::slot_date.eq(date.to_string()))
        .select(SlotRow::as_select())
        .first(conn)
        .optional()?;
    row.map(SlotRow::into_record).transpose()
}

/// Finds a slot by id.
///
/// # Errors
///
/// Returns an error if the query fails or the row is malformed.
pub fn find_slot_by_id(
    conn: &mut SqliteConnection,
    slot_id: i64,
) -> Result<Option<SlotRecord>, PersistenceError> {
    let row: Option<SlotRow> = schedule_slots::table
        .find(slot_id)
        .select(SlotRow::as_select())
        .first(conn)
        .optional()?;
    row.map(SlotRow::into_record).transpose()
}

/// Whether a photographer exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn photographer_exists(
    conn: &mut SqliteConnection,
    photographer_id: PhotographerId,
) -> Result<bool, PersistenceError> {
    let count: i64 = photographers::table
        .filter(photographers::photographer_id.eq(photographer_id.value()))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}

/// Lists photographers by id.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_photographers(
    conn: &mut SqliteConnection,
) -> Result<Vec<PhotographerData>, PersistenceError> {
    let rows: Vec<(i64, String)> = photographers::table
        .order(photographers::photographer_id.asc())
        .select((photographers::photographer_id, photographers::name))
        .load(conn)?;
    Ok(rows
        .into_iter()
        .map(|(photographer_id, name)| PhotographerData {
            photographer_id,
            name,
        })
        .collect())
}
