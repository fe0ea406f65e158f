// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A calendar date is malformed or does not exist.
    InvalidDate {
        /// The rejected input.
        value: String,
        /// Why the input was rejected.
        reason: String,
    },
    /// A time of day is malformed or out of range.
    InvalidTime {
        /// The rejected input.
        value: String,
        /// Why the input was rejected.
        reason: String,
    },
    /// A slot's start time is after its end time.
    InvalidTimeWindow {
        /// The normalized start time.
        start: String,
        /// The normalized end time.
        end: String,
    },
    /// An identifier is not a positive integer.
    InvalidIdentifier {
        /// The field carrying the identifier.
        field: String,
        /// The rejected input.
        value: String,
    },
    /// A lifecycle status name does not resolve against the catalog.
    UnknownLifecycleStatus(String),
    /// A lifecycle status id does not exist in the catalog.
    LifecycleStatusNotFound(i64),
    /// The lifecycle catalog has no entries.
    EmptyLifecycleCatalog,
    /// The booking has been delivered and can no longer change.
    BookingDelivered {
        /// The booking identifier.
        booking_id: i64,
    },
    /// A payment state code does not resolve against the catalog.
    UnknownPaymentState(String),
    /// A monetary amount is not a positive finite number.
    InvalidAmount(String),
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate { value, reason } => {
                write!(f, "Invalid date '{value}': {reason}")
            }
            Self::InvalidTime { value, reason } => {
                write!(f, "Invalid time '{value}': {reason}")
            }
            Self::InvalidTimeWindow { start, end } => {
                write!(f, "Start time {start} must not be after end time {end}")
            }
            Self::InvalidIdentifier { field, value } => {
                write!(f, "Invalid identifier for '{field}': '{value}'")
            }
            Self::UnknownLifecycleStatus(name) => {
                write!(f, "Unknown lifecycle status '{name}'")
            }
            Self::LifecycleStatusNotFound(id) => {
                write!(f, "Lifecycle status {id} not found")
            }
            Self::EmptyLifecycleCatalog => write!(f, "Lifecycle status catalog is empty"),
            Self::BookingDelivered { booking_id } => {
                write!(
                    f,
                    "Booking {booking_id} has been delivered and cannot be modified"
                )
            }
            Self::UnknownPaymentState(code) => write!(f, "Unknown payment state '{code}'"),
            Self::InvalidAmount(msg) => write!(f, "Invalid amount: {msg}"),
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
