// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use studio_agenda_domain::{Booking, PaymentSummary, classify_payment, validate_amount};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::PaymentRecorded;
use crate::diesel_schema::{bookings, payments};
use crate::error::PersistenceError;
use crate::queries::bookings::get_booking;
use crate::queries::payments::{booking_price, total_paid};

/// Records a payment and refreshes the booking's payment label.
///
/// # Errors
///
/// Returns `BookingNotFound` for an unknown booking, a domain violation for
/// a non-positive amount, or an error if the database operation fails.
pub fn record_payment(
    conn: &mut SqliteConnection,
    booking_id: i64,
    amount: f64,
    receipt_url: Option<&str>,
) -> Result<PaymentRecorded, PersistenceError> {
    let amount: f64 = validate_amount(amount)?;
    conn.transaction::<_, PersistenceError, _>(|conn| {
        let booking: Booking =
            get_booking(conn, booking_id)?.ok_or(PersistenceError::BookingNotFound(booking_id))?;

        diesel::insert_into(payments::table)
            .values((
                payments::booking_id.eq(booking.id),
                payments::amount.eq(amount),
                payments::receipt_url.eq(receipt_url),
            ))
            .execute(conn)?;
        let payment_id: i64 = conn.get_last_insert_rowid()?;

        let paid: f64 = total_paid(conn, booking.id)?;
        let price: f64 = booking_price(conn, booking.id)?;
        let summary: PaymentSummary =
            classify_payment(booking.payment_status.as_deref(), paid, price);

        diesel::update(bookings::table.find(booking.id))
            .set(bookings::payment_status.eq(summary.state.as_str()))
            .execute(conn)?;

        info!(
            booking_id,
            payment_id,
            total_paid = paid,
            payment_status = summary.state.as_str(),
            "Recorded payment"
        );
        Ok(PaymentRecorded {
            payment_id,
            total_paid: paid,
            price,
            payment_status: summary.state.as_str().to_string(),
        })
    })
}
