// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the studio agenda.
//!
//! Handlers take validated wire DTOs, call into persistence, and return
//! wire DTOs. Errors from lower layers are translated explicitly into
//! `ApiError`; nothing below this crate leaks to callers.

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

mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{ApiError, translate_domain_error, translate_persistence_error};
pub use handlers::{
    bulk_update_reservations, commit_agenda, delete_gallery_image, get_reservation_history,
    list_agenda, list_customer_reservations, list_gallery, list_payments, list_statuses,
    record_payment, update_reservation,
};
pub use request_response::{
    AgendaCommitRequest, AgendaCommitResponse, AgendaEntryRequest, AgendaItem,
    AgendaListResponse, AvailabilityFlag, BulkUpdateReservationsRequest,
    BulkUpdateReservationsResponse, CustomerItem, DeleteGalleryImageResponse, GalleryItem,
    GalleryListResponse, HistoryItem, HistoryResponse, ListAgendaRequest, PackageItem,
    PaymentItem, PaymentListResponse, RecordPaymentRequest, RecordPaymentResponse,
    ReservationItem, ReservationListResponse, StatusItem, StatusListResponse,
    UpdateReservationRequest, UpdateReservationResponse,
};
