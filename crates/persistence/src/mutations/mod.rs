// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! Multi-statement writes run inside a single `SQLite` transaction so a
//! failure leaves nothing half-applied.
//!
//! - `agenda`: schedule slot upserts keyed on `(photographer, date)`
//! - `bookings`: single reservation transitions and bulk status overwrites
//! - `payments`: payment recording and payment label refresh
//! - `gallery`: gallery deletes
//! - `fixtures`: row creation for seeding and tests

pub mod agenda;
pub mod bookings;
pub mod fixtures;
pub mod gallery;
pub mod payments;
