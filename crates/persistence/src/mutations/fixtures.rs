// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row creation for reference data.
//!
//! Photographers, customers, packages, bookings, and gallery images are
//! owned by other parts of the studio system; these inserts exist for
//! database seeding and tests.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::backend::PersistenceBackend;
use crate::data_models::NewBooking;
use crate::diesel_schema::{bookings, customers, gallery_images, packages, photographers};
use crate::error::PersistenceError;

/// Inserts a photographer and returns its id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_photographer(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(photographers::table)
        .values(photographers::name.eq(name))
        .execute(conn)?;
    let photographer_id: i64 = conn.get_last_insert_rowid()?;
    debug!(photographer_id, name, "Created photographer");
    Ok(photographer_id)
}

/// Inserts a customer and returns its id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_customer(
    conn: &mut SqliteConnection,
    name: &str,
    email: Option<&str>,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(customers::table)
        .values((customers::name.eq(name), customers::email.eq(email)))
        .execute(conn)?;
    conn.get_last_insert_rowid()
}

/// Inserts a package and returns its id.
///
/// # Errors
///
/// Returns an error if the insert fails (for example a negative price).
pub fn create_package(
    conn: &mut SqliteConnection,
    name: &str,
    price: f64,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(packages::table)
        .values((packages::name.eq(name), packages::price.eq(price)))
        .execute(conn)?;
    conn.get_last_insert_rowid()
}

/// Inserts a booking and returns its id.
///
/// # Errors
///
/// Returns an error if the insert fails, including foreign key violations.
pub fn create_booking(
    conn: &mut SqliteConnection,
    booking: &NewBooking,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(bookings::table)
        .values((
            bookings::customer_id.eq(booking.customer_id),
            bookings::package_id.eq(booking.package_id),
            bookings::schedule_slot_id.eq(booking.schedule_slot_id),
            bookings::status_id.eq(booking.status_id),
            bookings::payment_status.eq(booking.payment_status.as_deref()),
        ))
        .execute(conn)?;
    let booking_id: i64 = conn.get_last_insert_rowid()?;
    debug!(booking_id, customer_id = booking.customer_id, "Created booking");
    Ok(booking_id)
}

/// Inserts a gallery image and returns its id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_gallery_image(
    conn: &mut SqliteConnection,
    title: &str,
    image_url: &str,
    category: Option<&str>,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(gallery_images::table)
        .values((
            gallery_images::title.eq(title),
            gallery_images::image_url.eq(image_url),
            gallery_images::category.eq(category),
        ))
        .execute(conn)?;
    conn.get_last_insert_rowid()
}
