// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking transitions.
//!
//! A booking's schedule binding and lifecycle status are written by one
//! `UPDATE` inside one transaction, together with the consumed slot and
//! the status history row.

use diesel::SqliteConnection;
use diesel::prelude::*;
use std::collections::BTreeSet;
use studio_agenda::SlotRecord;
use studio_agenda_domain::{Booking, DomainError, LifecycleCatalog, SlotValue};
use tracing::{debug, info};

use crate::data_models::{BookingDetail, ReservationWrite};
use crate::diesel_schema::{booking_status_history, bookings};
use crate::error::PersistenceError;
use crate::mutations::agenda::upsert_slot_value;
use crate::queries::agenda::photographer_exists;
use crate::queries::bookings::{get_booking, get_booking_detail, get_bookings};
use crate::queries::catalog::load_lifecycle_catalog;

fn require_status(catalog: &LifecycleCatalog, status_id: i64) -> Result<i64, PersistenceError> {
    catalog
        .by_id(status_id)
        .map(|status| status.id)
        .ok_or(PersistenceError::DomainViolation(
            DomainError::LifecycleStatusNotFound(status_id),
        ))
}

fn insert_history(
    conn: &mut SqliteConnection,
    booking_id: i64,
    previous_status_id: Option<i64>,
    new_status_id: i64,
) -> Result<(), PersistenceError> {
    diesel::insert_into(booking_status_history::table)
        .values((
            booking_status_history::booking_id.eq(booking_id),
            booking_status_history::previous_status_id.eq(previous_status_id),
            booking_status_history::new_status_id.eq(new_status_id),
        ))
        .execute(conn)?;
    Ok(())
}

/// Applies a single reservation transition and returns the joined booking.
///
/// Steps, all in one transaction:
/// 1. Load the booking and check it still carries `expected_status_id`.
/// 2. Reject delivered bookings.
/// 3. If a binding is present, upsert the `(photographer, date)` slot as
///    unavailable with `start = end = time`.
/// 4. Write the slot reference and status together.
/// 5. Append a history row if the resolved status changed.
///
/// # Errors
///
/// - `BookingNotFound` / `PhotographerNotFound` for missing rows
/// - `StaleRecord` if another writer changed the status first
/// - `DomainViolation(BookingDelivered)` for delivered bookings
pub fn apply_reservation_write(
    conn: &mut SqliteConnection,
    write: &ReservationWrite,
) -> Result<BookingDetail, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let booking: Booking = get_booking(conn, write.booking_id)?
            .ok_or(PersistenceError::BookingNotFound(write.booking_id))?;
        if booking.lifecycle_status_id != write.expected_status_id {
            return Err(PersistenceError::StaleRecord {
                booking_id: booking.id,
            });
        }

        let catalog: LifecycleCatalog = load_lifecycle_catalog(conn)?;
        booking.ensure_mutable(&catalog)?;

        let mut slot_id: Option<i64> = booking.schedule_slot_id;
        if let Some(binding) = write.binding {
            if !photographer_exists(conn, binding.photographer_id)? {
                return Err(PersistenceError::PhotographerNotFound(
                    binding.photographer_id.value(),
                ));
            }
            let consumed: SlotRecord = upsert_slot_value(
                conn,
                binding.photographer_id,
                binding.date,
                SlotValue::new(false, binding.time, binding.time),
            )?;
            slot_id = Some(consumed.slot_id);
        }

        let previous_status_id: Option<i64> = booking.resolved_status(&catalog).map(|s| s.id);
        let status_id: Option<i64> = match write.new_status_id {
            Some(id) => Some(require_status(&catalog, id)?),
            None => booking.lifecycle_status_id,
        };

        diesel::update(bookings::table.find(booking.id))
            .set((
                bookings::schedule_slot_id.eq(slot_id),
                bookings::status_id.eq(status_id),
            ))
            .execute(conn)?;

        if let Some(new_status_id) = write.new_status_id
            && previous_status_id != Some(new_status_id)
        {
            insert_history(conn, booking.id, previous_status_id, new_status_id)?;
        }

        info!(
            booking_id = booking.id,
            ?slot_id,
            ?status_id,
            "Applied reservation transition"
        );
        get_booking_detail(conn, booking.id)
    })
}

/// Overwrites the status of every existing, non-delivered booking in
/// `booking_ids` and returns how many were updated.
///
/// Unknown ids and delivered bookings are skipped rather than failing the
/// batch. Duplicated ids count once.
///
/// # Errors
///
/// Returns a domain violation if `status_id` is not in the catalog, or an
/// error if the database operation fails.
pub fn bulk_update_status(
    conn: &mut SqliteConnection,
    booking_ids: &[i64],
    status_id: i64,
) -> Result<usize, PersistenceError> {
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let catalog: LifecycleCatalog = load_lifecycle_catalog(conn)?;
        let status_id: i64 = require_status(&catalog, status_id)?;

        let unique: Vec<i64> = booking_ids
            .iter()
            .copied()
            .collect::<BTreeSet<i64>>()
            .into_iter()
            .collect();
        let targets: Vec<Booking> = get_bookings(conn, &unique)?
            .into_iter()
            .filter(|booking| !booking.is_delivered(&catalog))
            .collect();
        if targets.is_empty() {
            debug!(requested = booking_ids.len(), "No bookings eligible for bulk update");
            return Ok(0);
        }

        let target_ids: Vec<i64> = targets.iter().map(|booking| booking.id).collect();
        let updated: usize = diesel::update(bookings::table)
            .filter(bookings::booking_id.eq_any(&target_ids))
            .set(bookings::status_id.eq(status_id))
            .execute(conn)?;

        for booking in &targets {
            let previous_status_id: Option<i64> =
                booking.resolved_status(&catalog).map(|s| s.id);
            if previous_status_id != Some(status_id) {
                insert_history(conn, booking.id, previous_status_id, status_id)?;
            }
        }

        info!(
            requested = booking_ids.len(),
            updated, status_id, "Applied bulk status update"
        );
        Ok(updated)
    })
}
