// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::dsl::sum;
use diesel::prelude::*;

use crate::data_models::PaymentData;
use crate::diesel_schema::{bookings, packages, payments};
use crate::error::PersistenceError;

/// Lists a booking's payments, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_payments(
    conn: &mut SqliteConnection,
    booking_id: i64,
) -> Result<Vec<PaymentData>, PersistenceError> {
    let rows: Vec<(i64, i64, f64, Option<String>, String)> = payments::table
        .filter(payments::booking_id.eq(booking_id))
        .order((payments::paid_at.asc(), payments::payment_id.asc()))
        .select((
            payments::payment_id,
            payments::booking_id,
            payments::amount,
            payments::receipt_url,
            payments::paid_at,
        ))
        .load(conn)?;
    Ok(rows
        .into_iter()
        .map(
            |(payment_id, booking_id, amount, receipt_url, paid_at)| PaymentData {
                payment_id,
                booking_id,
                amount,
                receipt_url,
                paid_at,
            },
        )
        .collect())
}

/// Sum of a booking's payments (0 when there are none).
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn total_paid(conn: &mut SqliteConnection, booking_id: i64) -> Result<f64, PersistenceError> {
    let total: Option<f64> = payments::table
        .filter(payments::booking_id.eq(booking_id))
        .select(sum(payments::amount))
        .first(conn)?;
    Ok(total.unwrap_or(0.0))
}

/// The package price of a booking.
///
/// # Errors
///
/// Returns `PersistenceError::BookingNotFound` if the booking does not exist.
pub fn booking_price(
    conn: &mut SqliteConnection,
    booking_id: i64,
) -> Result<f64, PersistenceError> {
    bookings::table
        .inner_join(packages::table)
        .filter(bookings::booking_id.eq(booking_id))
        .select(packages::price)
        .first(conn)
        .optional()?
        .ok_or(PersistenceError::BookingNotFound(booking_id))
}
