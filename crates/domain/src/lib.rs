// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod date_key;
mod error;
mod lifecycle;
mod month_grid;
mod payment;
mod time_of_day;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use date_key::{DateKey, from_date_key, to_date_key};
pub use error::DomainError;
pub use lifecycle::{LifecycleCatalog, LifecycleStatus, normalize_status_name};
pub use month_grid::{MONTH_GRID_CELLS, MonthCell, build_month_grid};
pub use payment::{PaymentState, PaymentSummary, classify_payment, payment_progress};
pub use time_of_day::{DEFAULT_END, DEFAULT_START, TimeOfDay};
pub use types::{AvailabilitySlot, Booking, PhotographerId, SlotValue};
pub use validation::{
    validate_amount, validate_date, validate_identifier, validate_time,
};
