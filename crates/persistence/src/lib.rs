// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the studio agenda.
//!
//! Stores photographer schedule slots, bookings and their lifecycle
//! history, payments, and gallery images in `SQLite` through Diesel.
//!
//! ## Write guarantees
//!
//! - Schedule slots are unique per `(photographer, date)`; every write is
//!   an upsert on that key, so replayed commits update rows in place.
//! - A reservation transition writes the consumed slot, the booking's slot
//!   reference, its status, and the history row in one transaction.
//! - Delivered bookings are never modified.
//!
//! ## Testing
//!
//! `Persistence::new_in_memory()` gives every caller a private shared-cache
//! in-memory database, so tests are isolated without temp files.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use studio_agenda::SlotRecord;
use studio_agenda_domain::{Booking, DateKey, LifecycleCatalog, PhotographerId};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{
    BookingDetail, CustomerData, GalleryImageData, NewBooking, PackageData, PaymentData,
    PaymentRecorded, PhotographerData, ReservationWrite, SlotBinding, SlotPatch,
    StatusHistoryEntry,
};
pub use error::PersistenceError;

use backend::PersistenceBackend;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter over a single `SQLite` connection.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    /// Reverts every migration, leaving an empty schema.
    ///
    /// # Errors
    ///
    /// Returns an error if a migration cannot be reverted.
    pub fn revert_all_migrations(&mut self) -> Result<usize, PersistenceError> {
        backend::sqlite::revert_all_migrations(&mut self.conn)
    }

    /// Applies every pending migration.
    ///
    /// # Errors
    ///
    /// Returns an error if a migration fails.
    pub fn run_migrations(&mut self) -> Result<usize, PersistenceError> {
        backend::sqlite::run_migrations(&mut self.conn)
    }

    // ========================================================================
    // Agenda
    // ========================================================================

    /// Lists every photographer's slots.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_all_slots(&mut self) -> Result<Vec<SlotRecord>, PersistenceError> {
        queries::agenda::list_all_slots(&mut self.conn)
    }

    /// Lists one photographer's slots by ascending date, optionally within
    /// an inclusive window.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_slots(
        &mut self,
        photographer_id: PhotographerId,
        from: Option<DateKey>,
        to: Option<DateKey>,
    ) -> Result<Vec<SlotRecord>, PersistenceError> {
        queries::agenda::list_slots(&mut self.conn, photographer_id, from, to)
    }

    /// Finds the slot for `(photographer, date)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_slot(
        &mut self,
        photographer_id: PhotographerId,
        date: DateKey,
    ) -> Result<Option<SlotRecord>, PersistenceError> {
        queries::agenda::find_slot(&mut self.conn, photographer_id, date)
    }

    /// Upserts a batch of slot patches for one photographer.
    ///
    /// # Errors
    ///
    /// Returns an error if the photographer does not exist or the write fails.
    pub fn upsert_slots(
        &mut self,
        photographer_id: PhotographerId,
        patches: &[SlotPatch],
    ) -> Result<Vec<SlotRecord>, PersistenceError> {
        mutations::agenda::upsert_slots(&mut self.conn, photographer_id, patches)
    }

    /// Whether a photographer exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn photographer_exists(
        &mut self,
        photographer_id: PhotographerId,
    ) -> Result<bool, PersistenceError> {
        queries::agenda::photographer_exists(&mut self.conn, photographer_id)
    }

    /// Lists photographers.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_photographers(&mut self) -> Result<Vec<PhotographerData>, PersistenceError> {
        queries::agenda::list_photographers(&mut self.conn)
    }

    // ========================================================================
    // Bookings
    // ========================================================================

    /// Loads the lifecycle status catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn lifecycle_catalog(&mut self) -> Result<LifecycleCatalog, PersistenceError> {
        queries::catalog::load_lifecycle_catalog(&mut self.conn)
    }

    /// Loads a booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_booking(&mut self, booking_id: i64) -> Result<Option<Booking>, PersistenceError> {
        queries::bookings::get_booking(&mut self.conn, booking_id)
    }

    /// Loads a booking with its relations.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::BookingNotFound` if the booking does not exist.
    pub fn get_booking_detail(
        &mut self,
        booking_id: i64,
    ) -> Result<BookingDetail, PersistenceError> {
        queries::bookings::get_booking_detail(&mut self.conn, booking_id)
    }

    /// Lists a customer's bookings, latest session first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_customer_bookings(
        &mut self,
        customer_id: i64,
    ) -> Result<Vec<BookingDetail>, PersistenceError> {
        queries::bookings::list_customer_bookings(&mut self.conn, customer_id)
    }

    /// Whether a customer exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn customer_exists(&mut self, customer_id: i64) -> Result<bool, PersistenceError> {
        queries::bookings::customer_exists(&mut self.conn, customer_id)
    }

    /// Applies a single reservation transition.
    ///
    /// # Errors
    ///
    /// See `mutations::bookings::apply_reservation_write`.
    pub fn apply_reservation_write(
        &mut self,
        write: &ReservationWrite,
    ) -> Result<BookingDetail, PersistenceError> {
        mutations::bookings::apply_reservation_write(&mut self.conn, write)
    }

    /// Overwrites the status of many bookings; returns how many changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the status is unknown or the write fails.
    pub fn bulk_update_status(
        &mut self,
        booking_ids: &[i64],
        status_id: i64,
    ) -> Result<usize, PersistenceError> {
        mutations::bookings::bulk_update_status(&mut self.conn, booking_ids, status_id)
    }

    /// Lists a booking's status changes, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_status_history(
        &mut self,
        booking_id: i64,
    ) -> Result<Vec<StatusHistoryEntry>, PersistenceError> {
        queries::bookings::list_status_history(&mut self.conn, booking_id)
    }

    // ========================================================================
    // Payments & Gallery
    // ========================================================================

    /// Lists a booking's payments.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_payments(&mut self, booking_id: i64) -> Result<Vec<PaymentData>, PersistenceError> {
        queries::payments::list_payments(&mut self.conn, booking_id)
    }

    /// The package price of a booking.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::BookingNotFound` if the booking does not exist.
    pub fn booking_price(&mut self, booking_id: i64) -> Result<f64, PersistenceError> {
        queries::payments::booking_price(&mut self.conn, booking_id)
    }

    /// Records a payment.
    ///
    /// # Errors
    ///
    /// Returns an error if the booking does not exist, the amount is not
    /// positive, or the write fails.
    pub fn record_payment(
        &mut self,
        booking_id: i64,
        amount: f64,
        receipt_url: Option<&str>,
    ) -> Result<PaymentRecorded, PersistenceError> {
        mutations::payments::record_payment(&mut self.conn, booking_id, amount, receipt_url)
    }

    /// Lists gallery images, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_gallery_images(&mut self) -> Result<Vec<GalleryImageData>, PersistenceError> {
        queries::gallery::list_gallery_images(&mut self.conn)
    }

    /// Deletes a gallery image.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::GalleryImageNotFound` if absent.
    pub fn delete_gallery_image(&mut self, image_id: i64) -> Result<(), PersistenceError> {
        mutations::gallery::delete_gallery_image(&mut self.conn, image_id)
    }

    // ========================================================================
    // Reference data
    // ========================================================================

    /// Creates a photographer.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_photographer(&mut self, name: &str) -> Result<i64, PersistenceError> {
        mutations::fixtures::create_photographer(&mut self.conn, name)
    }

    /// Creates a customer.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_customer(
        &mut self,
        name: &str,
        email: Option<&str>,
    ) -> Result<i64, PersistenceError> {
        mutations::fixtures::create_customer(&mut self.conn, name, email)
    }

    /// Creates a package.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_package(&mut self, name: &str, price: f64) -> Result<i64, PersistenceError> {
        mutations::fixtures::create_package(&mut self.conn, name, price)
    }

    /// Creates a booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_booking(&mut self, booking: &NewBooking) -> Result<i64, PersistenceError> {
        mutations::fixtures::create_booking(&mut self.conn, booking)
    }

    /// Creates a gallery image.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_gallery_image(
        &mut self,
        title: &str,
        image_url: &str,
        category: Option<&str>,
    ) -> Result<i64, PersistenceError> {
        mutations::fixtures::create_gallery_image(&mut self.conn, title, image_url, category)
    }
}
