// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` connection plumbing for the studio database.
//!
//! Opening connections, running the embedded migrations, and the PRAGMA
//! checks live here. Agenda, booking, payment and gallery statements stay
//! in `queries/` and `mutations/`.

pub mod sqlite;

use diesel::{Connection, SqliteConnection};

use crate::error::PersistenceError;

/// Connection-level helpers the row writers rely on.
pub trait PersistenceBackend: Connection {
    /// Returns the id of the photographer, customer, booking or payment row
    /// inserted last on this connection.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::QueryFailed` if `SQLite` cannot report it.
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError>;

    /// Confirms bookings cannot point at missing slots, statuses or customers.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ForeignKeyEnforcementNotEnabled` when the
    /// `foreign_keys` pragma is off.
    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError>;
}

impl PersistenceBackend for SqliteConnection {
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError> {
        sqlite::get_last_insert_rowid(self)
    }

    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        sqlite::verify_foreign_key_enforcement(self)
    }
}
