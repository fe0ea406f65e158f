// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking queries.
//!
//! Related records are loaded with separate keyed lookups and assembled
//! into a `BookingDetail` where every to-one relation is a scalar or
//! `None`.

use diesel::SqliteConnection;
use diesel::prelude::*;
use std::cmp::Reverse;
use studio_agenda::SlotRecord;
use studio_agenda_domain::{Booking, LifecycleCatalog, LifecycleStatus};

use crate::data_models::{BookingDetail, CustomerData, PackageData, StatusHistoryEntry};
use crate::diesel_schema::{booking_status_history, bookings, customers, packages};
use crate::error::PersistenceError;
use crate::queries::agenda::find_slot_by_id;
use crate::queries::catalog::load_lifecycle_catalog;
use crate::queries::payments::total_paid;

/// Diesel Queryable struct for booking rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = bookings)]
struct BookingRow {
    booking_id: i64,
    schedule_slot_id: Option<i64>,
    status_id: Option<i64>,
    payment_status: Option<String>,
    package_id: i64,
    customer_id: i64,
    created_at: String,
}

impl BookingRow {
    fn to_booking(&self) -> Booking {
        Booking {
            id: self.booking_id,
            schedule_slot_id: self.schedule_slot_id,
            lifecycle_status_id: self.status_id,
            payment_status: self.payment_status.clone(),
            package_id: self.package_id,
            customer_id: self.customer_id,
        }
    }
}

/// Diesel Queryable struct for status history rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = booking_status_history)]
struct HistoryRow {
    history_id: i64,
    booking_id: i64,
    previous_status_id: Option<i64>,
    new_status_id: i64,
    changed_at: String,
}

/// Loads a booking by id.
///
/// # Errors
///
/// Returns an error if the query fails.
/// Returns `Ok(None)` if the booking is not found.
pub fn get_booking(
    conn: &mut SqliteConnection,
    booking_id: i64,
) -> Result<Option<Booking>, PersistenceError> {
    let row: Option<BookingRow> = bookings::table
        .find(booking_id)
        .select(BookingRow::as_select())
        .first(conn)
        .optional()?;
    Ok(row.as_ref().map(BookingRow::to_booking))
}

/// Loads the bookings among `booking_ids` that exist.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_bookings(
    conn: &mut SqliteConnection,
    booking_ids: &[i64],
) -> Result<Vec<Booking>, PersistenceError> {
    let rows: Vec<BookingRow> = bookings::table
        .filter(bookings::booking_id.eq_any(booking_ids))
        .order(bookings::booking_id.asc())
        .select(BookingRow::as_select())
        .load(conn)?;
    Ok(rows.iter().map(BookingRow::to_booking).collect())
}

fn assemble_detail(
    conn: &mut SqliteConnection,
    catalog: &LifecycleCatalog,
    row: &BookingRow,
) -> Result<BookingDetail, PersistenceError> {
    let booking: Booking = row.to_booking();

    let slot: Option<SlotRecord> = match row.schedule_slot_id {
        Some(slot_id) => find_slot_by_id(conn, slot_id)?,
        None => None,
    };

    let (package_id, package_name, price): (i64, String, f64) = packages::table
        .find(row.package_id)
        .select((packages::package_id, packages::name, packages::price))
        .first(conn)?;

    let (customer_id, customer_name, email): (i64, String, Option<String>) = customers::table
        .find(row.customer_id)
        .select((customers::customer_id, customers::name, customers::email))
        .first(conn)?;

    let status: Option<LifecycleStatus> = booking.resolved_status(catalog).cloned();
    let paid: f64 = total_paid(conn, row.booking_id)?;

    Ok(BookingDetail {
        booking,
        status,
        slot,
        package: PackageData {
            package_id,
            name: package_name,
            price,
        },
        customer: CustomerData {
            customer_id,
            name: customer_name,
            email,
        },
        total_paid: paid,
        created_at: row.created_at.clone(),
    })
}

/// Loads a booking with its status, slot, package, customer, and payments.
///
/// # Errors
///
/// Returns `PersistenceError::BookingNotFound` if the booking does not exist.
pub fn get_booking_detail(
    conn: &mut SqliteConnection,
    booking_id: i64,
) -> Result<BookingDetail, PersistenceError> {
    let row: BookingRow = bookings::table
        .find(booking_id)
        .select(BookingRow::as_select())
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::BookingNotFound(booking_id))?;
    let catalog: LifecycleCatalog = load_lifecycle_catalog(conn)?;
    assemble_detail(conn, &catalog, &row)
}

/// Lists a customer's bookings, latest session first.
///
/// Ordered by slot date then slot time, both descending; bookings without
/// a slot come last, newest booking first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_customer_bookings(
    conn: &mut SqliteConnection,
    customer_id: i64,
) -> Result<Vec<BookingDetail>, PersistenceError> {
    let rows: Vec<BookingRow> = bookings::table
        .filter(bookings::customer_id.eq(customer_id))
        .order(bookings::booking_id.desc())
        .select(BookingRow::as_select())
        .load(conn)?;
    let catalog: LifecycleCatalog = load_lifecycle_catalog(conn)?;

    let mut details: Vec<BookingDetail> = rows
        .iter()
        .map(|row| assemble_detail(conn, &catalog, row))
        .collect::<Result<Vec<BookingDetail>, PersistenceError>>()?;
    // Stable sort keeps the booking-id order among equal keys.
    details.sort_by_key(|detail| Reverse(detail.slot.map(|slot| (slot.date, slot.start))));
    Ok(details)
}

/// Whether a customer exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn customer_exists(
    conn: &mut SqliteConnection,
    customer_id: i64,
) -> Result<bool, PersistenceError> {
    let count: i64 = customers::table
        .filter(customers::customer_id.eq(customer_id))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}

/// Lists a booking's status changes, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_status_history(
    conn: &mut SqliteConnection,
    booking_id: i64,
) -> Result<Vec<StatusHistoryEntry>, PersistenceError> {
    let rows: Vec<HistoryRow> = booking_status_history::table
        .filter(booking_status_history::booking_id.eq(booking_id))
        .order((
            booking_status_history::changed_at.asc(),
            booking_status_history::history_id.asc(),
        ))
        .select(HistoryRow::as_select())
        .load(conn)?;
    let catalog: LifecycleCatalog = load_lifecycle_catalog(conn)?;
    let name_of = |id: i64| {
        catalog
            .by_id(id)
            .map_or_else(|| format!("#{id}"), |status| status.name.clone())
    };

    Ok(rows
        .into_iter()
        .map(|row| StatusHistoryEntry {
            history_id: row.history_id,
            booking_id: row.booking_id,
            previous_status: row.previous_status_id.map(name_of),
            new_status: name_of(row.new_status_id),
            changed_at: row.changed_at,
        })
        .collect())
}
