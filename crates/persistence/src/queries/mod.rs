// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! - `agenda`: schedule slots and photographers
//! - `bookings`: bookings, joined booking detail, status history
//! - `catalog`: the lifecycle status catalog
//! - `payments`: payments and package prices
//! - `gallery`: gallery images

pub mod agenda;
pub mod bookings;
pub mod catalog;
pub mod gallery;
pub mod payments;
