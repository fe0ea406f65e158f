// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use studio_agenda::SlotRecord;
use studio_agenda_domain::{Booking, DateKey, LifecycleStatus, PhotographerId, TimeOfDay};

/// A photographer row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotographerData {
    pub photographer_id: i64,
    pub name: String,
}

/// A customer row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerData {
    pub customer_id: i64,
    pub name: String,
    pub email: Option<String>,
}

/// A package row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageData {
    pub package_id: i64,
    pub name: String,
    pub price: f64,
}

/// One day of an agenda write. Omitted fields keep the stored value, or
/// fall back to the defaults when the day has no row yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotPatch {
    pub date: DateKey,
    pub start: Option<TimeOfDay>,
    pub end: Option<TimeOfDay>,
    pub available: Option<bool>,
}

/// A booking with its to-one relations resolved into scalars.
///
/// A missing relation is `None`, never an empty list.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingDetail {
    pub booking: Booking,
    /// The resolved lifecycle status (the initial status when unset).
    pub status: Option<LifecycleStatus>,
    pub slot: Option<SlotRecord>,
    pub package: PackageData,
    pub customer: CustomerData,
    /// Sum of recorded payments.
    pub total_paid: f64,
    pub created_at: String,
}

/// The schedule binding requested by a reservation transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotBinding {
    pub photographer_id: PhotographerId,
    pub date: DateKey,
    pub time: TimeOfDay,
}

/// A fully validated single-booking transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservationWrite {
    pub booking_id: i64,
    /// The status id the caller based its decision on; the write is
    /// rejected if another writer changed it in the meantime.
    pub expected_status_id: Option<i64>,
    pub binding: Option<SlotBinding>,
    pub new_status_id: Option<i64>,
}

/// One entry of a booking's status history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusHistoryEntry {
    pub history_id: i64,
    pub booking_id: i64,
    pub previous_status: Option<String>,
    pub new_status: String,
    pub changed_at: String,
}

/// A recorded payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentData {
    pub payment_id: i64,
    pub booking_id: i64,
    pub amount: f64,
    pub receipt_url: Option<String>,
    pub paid_at: String,
}

/// The result of recording a payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecorded {
    pub payment_id: i64,
    pub total_paid: f64,
    pub price: f64,
    /// The label written back to the booking.
    pub payment_status: String,
}

/// A gallery image row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImageData {
    pub image_id: i64,
    pub title: String,
    pub image_url: String,
    pub category: Option<String>,
    pub created_at: String,
}

/// Input for creating a booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub customer_id: i64,
    pub package_id: i64,
    pub schedule_slot_id: Option<i64>,
    pub status_id: Option<i64>,
    pub payment_status: Option<String>,
}
