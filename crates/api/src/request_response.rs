// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Field names on the wire follow the studio's admin UI contract
//! (`fecha`, `horainicio`, `disponible`, ...). Dates are `YYYY-MM-DD` and
//! times are zero-padded `HH:MM` on output.

use serde::{Deserialize, Serialize};

/// An availability flag as sent by the admin UI: a boolean or `0`/`1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AvailabilityFlag {
    /// `true` / `false`.
    Bool(bool),
    /// `1` / `0`.
    Number(i64),
}

/// One day of an agenda commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgendaEntryRequest {
    /// The day, `YYYY-MM-DD`.
    pub fecha: String,
    /// Start of the window; the stored or default value when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horainicio: Option<String>,
    /// End of the window; the stored or default value when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horafin: Option<String>,
    /// Availability; the stored value, or available for a new day, when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disponible: Option<AvailabilityFlag>,
}

/// Body of `PATCH /api/agenda/{photographerId}`: a batch or a single day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AgendaCommitRequest {
    /// `{registros: [...]}`.
    Batch {
        /// The days to write.
        registros: Vec<AgendaEntryRequest>,
    },
    /// A single `{fecha, ...}` entry.
    Single(AgendaEntryRequest),
}

impl AgendaCommitRequest {
    /// The entries in request order.
    #[must_use]
    pub fn entries(&self) -> &[AgendaEntryRequest] {
        match self {
            Self::Batch { registros } => registros,
            Self::Single(entry) => std::slice::from_ref(entry),
        }
    }
}

/// One persisted schedule slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgendaItem {
    /// The slot id.
    pub id: i64,
    /// The photographer owning the slot.
    #[serde(rename = "idfotografo")]
    pub photographer_id: i64,
    /// The day.
    pub fecha: String,
    /// Start of the window.
    pub horainicio: String,
    /// End of the window.
    pub horafin: String,
    /// Whether the photographer takes sessions that day.
    pub disponible: bool,
}

/// Response of an agenda commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgendaCommitResponse {
    pub success: bool,
    /// How many days were written.
    pub upserted: usize,
    /// The rows as stored after the write, by ascending date.
    pub items: Vec<AgendaItem>,
}

/// Filters for `GET /api/agenda`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListAgendaRequest {
    /// Restrict to one photographer; every photographer when absent.
    pub photographer_id: Option<i64>,
    /// Inclusive lower bound, `YYYY-MM-DD`.
    pub desde: Option<String>,
    /// Inclusive upper bound, `YYYY-MM-DD`.
    pub hasta: Option<String>,
}

/// Response of an agenda listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgendaListResponse {
    pub success: bool,
    pub items: Vec<AgendaItem>,
}

/// Body of `PATCH /api/reservas/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateReservationRequest {
    /// New session day, `YYYY-MM-DD`.
    #[serde(default)]
    pub fecha: Option<String>,
    /// New session time, `HH:MM`.
    #[serde(default)]
    pub hora: Option<String>,
    /// Photographer whose agenda the session consumes.
    #[serde(default)]
    pub idfotografo: Option<i64>,
    /// New lifecycle status name, matched ignoring case and accents.
    #[serde(default)]
    pub estado: Option<String>,
}

/// A lifecycle status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusItem {
    pub id: i64,
    pub nombre: String,
    pub orden: i32,
}

/// A booking's package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageItem {
    pub id: i64,
    pub nombre: String,
    pub precio: f64,
}

/// A booking's customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerItem {
    pub id: i64,
    pub nombre: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A booking joined with its status, schedule, package, customer, and
/// payment summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationItem {
    pub id: i64,
    /// The resolved status (the initial status when none is stored).
    pub estado: Option<StatusItem>,
    /// The consumed schedule slot, if any.
    pub agenda: Option<AgendaItem>,
    /// The session time, taken from the slot.
    pub hora: Option<String>,
    pub paquete: PackageItem,
    pub cliente: CustomerItem,
    #[serde(rename = "totalPagado")]
    pub total_paid: f64,
    #[serde(rename = "progreso")]
    pub progress: u8,
    #[serde(rename = "estadoPago")]
    pub payment_state: String,
    #[serde(rename = "creadoEn")]
    pub created_at: String,
}

/// Response of a single reservation transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateReservationResponse {
    pub success: bool,
    /// The booking as stored after the transition.
    pub item: ReservationItem,
}

/// Body of `PATCH /api/reservas/actualizar-multiples`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkUpdateReservationsRequest {
    /// Booking ids to update.
    pub reservas: Vec<i64>,
    /// Target status name.
    pub nuevo_estado: String,
}

/// Response of a bulk transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkUpdateReservationsResponse {
    pub success: bool,
    /// How many of the requested bookings actually changed.
    pub updated: usize,
    /// The resolved status id written.
    #[serde(rename = "estadoId")]
    pub status_id: i64,
}

/// Response of a reservation listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationListResponse {
    pub success: bool,
    pub items: Vec<ReservationItem>,
}

/// One status change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    #[serde(rename = "estadoAnterior", skip_serializing_if = "Option::is_none")]
    pub previous_status: Option<String>,
    #[serde(rename = "estadoNuevo")]
    pub new_status: String,
    pub fecha: String,
}

/// Response of `GET /api/reservas/{id}/historial`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub success: bool,
    pub items: Vec<HistoryItem>,
}

/// Response of `GET /api/estados`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusListResponse {
    pub success: bool,
    pub items: Vec<StatusItem>,
}

/// One recorded payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentItem {
    pub id: i64,
    pub monto: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comprobante: Option<String>,
    pub fecha: String,
}

/// Response of `GET /api/pagos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentListResponse {
    pub success: bool,
    pub items: Vec<PaymentItem>,
    #[serde(rename = "totalPagado")]
    pub total_paid: f64,
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde(rename = "progreso")]
    pub progress: u8,
    #[serde(rename = "estadoPago")]
    pub payment_state: String,
}

/// Body of `POST /api/pagos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordPaymentRequest {
    #[serde(rename = "reservaId")]
    pub booking_id: i64,
    pub monto: f64,
    #[serde(default)]
    pub comprobante: Option<String>,
}

/// Response of `POST /api/pagos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordPaymentResponse {
    pub success: bool,
    /// The new payment id.
    pub id: i64,
    #[serde(rename = "totalPagado")]
    pub total_paid: f64,
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde(rename = "progreso")]
    pub progress: u8,
    #[serde(rename = "estadoPago")]
    pub payment_state: String,
}

/// A gallery image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub id: i64,
    pub titulo: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoria: Option<String>,
}

/// Response of `GET /api/galeria`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryListResponse {
    pub success: bool,
    pub items: Vec<GalleryItem>,
}

/// Response of `DELETE /api/galeria/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteGalleryImageResponse {
    pub success: bool,
    /// The deleted image id.
    pub deleted: i64,
}
