// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every handler validates its whole input before touching persistence, so
//! a rejected request never leaves a partial write behind.

use std::collections::BTreeMap;
use studio_agenda::SlotRecord;
use studio_agenda_domain::{
    Booking, DateKey, LifecycleCatalog, LifecycleStatus, PaymentSummary, PhotographerId,
    TimeOfDay, classify_payment, payment_progress, validate_amount, validate_date,
    validate_identifier, validate_time,
};
use studio_agenda_persistence::{
    BookingDetail, GalleryImageData, PaymentData, PaymentRecorded, Persistence, PersistenceError,
    ReservationWrite, SlotBinding, SlotPatch, StatusHistoryEntry,
};
use tracing::{debug, info};

use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::{
    AgendaCommitRequest, AgendaCommitResponse, AgendaEntryRequest, AgendaItem,
    AgendaListResponse, AvailabilityFlag, BulkUpdateReservationsRequest,
    BulkUpdateReservationsResponse, CustomerItem, DeleteGalleryImageResponse, GalleryItem,
    GalleryListResponse, HistoryItem, HistoryResponse, ListAgendaRequest, PackageItem,
    PaymentItem, PaymentListResponse, RecordPaymentRequest, RecordPaymentResponse,
    ReservationItem, ReservationListResponse, StatusItem, StatusListResponse,
    UpdateReservationRequest, UpdateReservationResponse,
};

fn agenda_item(slot: &SlotRecord) -> AgendaItem {
    AgendaItem {
        id: slot.slot_id,
        photographer_id: slot.photographer_id.value(),
        fecha: slot.date.to_string(),
        horainicio: slot.start.to_string(),
        horafin: slot.end.to_string(),
        disponible: slot.available,
    }
}

fn status_item(status: &LifecycleStatus) -> StatusItem {
    StatusItem {
        id: status.id,
        nombre: status.name.clone(),
        orden: status.order,
    }
}

fn reservation_item(detail: &BookingDetail) -> ReservationItem {
    let summary: PaymentSummary = classify_payment(
        detail.booking.payment_status.as_deref(),
        detail.total_paid,
        detail.package.price,
    );
    ReservationItem {
        id: detail.booking.id,
        estado: detail.status.as_ref().map(status_item),
        agenda: detail.slot.as_ref().map(agenda_item),
        hora: detail.slot.map(|slot| slot.start.to_string()),
        paquete: PackageItem {
            id: detail.package.package_id,
            nombre: detail.package.name.clone(),
            precio: detail.package.price,
        },
        cliente: CustomerItem {
            id: detail.customer.customer_id,
            nombre: detail.customer.name.clone(),
            email: detail.customer.email.clone(),
        },
        total_paid: summary.total_paid,
        progress: summary.progress,
        payment_state: summary.state.as_str().to_string(),
        created_at: detail.created_at.clone(),
    }
}

fn parse_photographer(value: i64) -> Result<PhotographerId, ApiError> {
    PhotographerId::new(value).map_err(translate_domain_error)
}

fn parse_flag(flag: AvailabilityFlag) -> Result<bool, ApiError> {
    match flag {
        AvailabilityFlag::Bool(value) => Ok(value),
        AvailabilityFlag::Number(0) => Ok(false),
        AvailabilityFlag::Number(1) => Ok(true),
        AvailabilityFlag::Number(other) => Err(ApiError::invalid_input(
            "disponible",
            format!("expected true, false, 0 or 1, got {other}"),
        )),
    }
}

fn parse_optional_time(value: Option<&str>) -> Result<Option<TimeOfDay>, ApiError> {
    value
        .map(validate_time)
        .transpose()
        .map_err(translate_domain_error)
}

fn parse_entry(entry: &AgendaEntryRequest) -> Result<SlotPatch, ApiError> {
    let date: DateKey = validate_date(&entry.fecha).map_err(translate_domain_error)?;
    let start: Option<TimeOfDay> = parse_optional_time(entry.horainicio.as_deref())?;
    let end: Option<TimeOfDay> = parse_optional_time(entry.horafin.as_deref())?;
    if let (Some(start), Some(end)) = (start, end)
        && start > end
    {
        return Err(ApiError::invalid_input(
            "horainicio",
            format!("{date}: start {start} is after end {end}"),
        ));
    }
    let available: Option<bool> = entry.disponible.map(parse_flag).transpose()?;
    Ok(SlotPatch {
        date,
        start,
        end,
        available,
    })
}

fn parse_window(
    desde: Option<&str>,
    hasta: Option<&str>,
) -> Result<(Option<DateKey>, Option<DateKey>), ApiError> {
    let bound = |field: &str, value: Option<&str>| {
        value
            .map(validate_date)
            .transpose()
            .map_err(|e| ApiError::invalid_input(field, e.to_string()))
    };
    let from: Option<DateKey> = bound("desde", desde)?;
    let to: Option<DateKey> = bound("hasta", hasta)?;
    if let (Some(from), Some(to)) = (from, to)
        && from > to
    {
        return Err(ApiError::invalid_input(
            "hasta",
            format!("{to} is before {from}"),
        ));
    }
    Ok((from, to))
}

/// Commits availability changes for one photographer.
///
/// Accepts a batch (`{registros: [...]}`) or a single entry. Every entry is
/// validated before anything is written; when a batch names the same day
/// twice, the last entry wins. Each day is upserted on
/// `(photographer, date)`, so a replayed commit updates rows in place.
///
/// # Errors
///
/// - `InvalidInput` for an empty batch or any malformed field
/// - `ResourceNotFound` if the photographer does not exist
/// - `Internal` if the write fails
pub fn commit_agenda(
    persistence: &mut Persistence,
    photographer_id: i64,
    request: &AgendaCommitRequest,
) -> Result<AgendaCommitResponse, ApiError> {
    let photographer: PhotographerId = parse_photographer(photographer_id)?;
    let entries: &[AgendaEntryRequest] = request.entries();
    if entries.is_empty() {
        return Err(ApiError::invalid_input(
            "registros",
            "no pending changes to commit",
        ));
    }

    let mut by_date: BTreeMap<DateKey, SlotPatch> = BTreeMap::new();
    for entry in entries {
        let patch: SlotPatch = parse_entry(entry)?;
        by_date.insert(patch.date, patch);
    }
    let patches: Vec<SlotPatch> = by_date.into_values().collect();

    let written: Vec<SlotRecord> = persistence
        .upsert_slots(photographer, &patches)
        .map_err(translate_persistence_error)?;

    info!(
        photographer_id,
        upserted = written.len(),
        "Committed agenda changes"
    );
    Ok(AgendaCommitResponse {
        success: true,
        upserted: written.len(),
        items: written.iter().map(agenda_item).collect(),
    })
}

/// Lists schedule slots in ascending date order.
///
/// Without a photographer every photographer's slots are returned, grouped
/// by photographer. An unknown photographer simply has no slots.
///
/// # Errors
///
/// Returns `InvalidInput` for a malformed id or window bound, or `Internal`
/// if the query fails.
pub fn list_agenda(
    persistence: &mut Persistence,
    request: &ListAgendaRequest,
) -> Result<AgendaListResponse, ApiError> {
    let (from, to) = parse_window(request.desde.as_deref(), request.hasta.as_deref())?;

    let slots: Vec<SlotRecord> = match request.photographer_id {
        Some(id) => persistence
            .list_slots(parse_photographer(id)?, from, to)
            .map_err(translate_persistence_error)?,
        None => persistence
            .list_all_slots()
            .map_err(translate_persistence_error)?
            .into_iter()
            .filter(|slot| from.is_none_or(|from| slot.date >= from))
            .filter(|slot| to.is_none_or(|to| slot.date <= to))
            .collect(),
    };

    debug!(
        photographer_id = ?request.photographer_id,
        count = slots.len(),
        "Listed agenda"
    );
    Ok(AgendaListResponse {
        success: true,
        items: slots.iter().map(agenda_item).collect(),
    })
}

/// Applies a single reservation transition.
///
/// The request may reschedule (`fecha` + `hora`, with `idfotografo` or the
/// photographer of the booking's current slot) and/or change the lifecycle
/// status. The consumed slot, the slot reference, and the status are
/// written together; the response carries the booking as stored afterwards.
///
/// # Errors
///
/// - `InvalidInput` for malformed fields, an unknown status name, a
///   reschedule without a photographer, or a request that changes nothing
/// - `ResourceNotFound` for an unknown booking or photographer
/// - `Conflict` for a delivered booking or a concurrent status change
pub fn update_reservation(
    persistence: &mut Persistence,
    booking_id: i64,
    request: &UpdateReservationRequest,
) -> Result<UpdateReservationResponse, ApiError> {
    let booking_id: i64 = validate_identifier("id", booking_id).map_err(translate_domain_error)?;
    let date: Option<DateKey> = request
        .fecha
        .as_deref()
        .map(validate_date)
        .transpose()
        .map_err(translate_domain_error)?;
    let time: Option<TimeOfDay> = parse_optional_time(request.hora.as_deref())?;
    let photographer: Option<PhotographerId> =
        request.idfotografo.map(parse_photographer).transpose()?;
    let status_name: Option<&str> = request
        .estado
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty());

    if date.is_some() != time.is_some() {
        return Err(ApiError::invalid_input(
            if date.is_some() { "hora" } else { "fecha" },
            "fecha and hora must be given together",
        ));
    }
    if photographer.is_some() && date.is_none() {
        return Err(ApiError::invalid_input(
            "fecha",
            "fecha and hora are required when idfotografo is given",
        ));
    }

    let current: BookingDetail = persistence
        .get_booking_detail(booking_id)
        .map_err(translate_persistence_error)?;
    let catalog: LifecycleCatalog = persistence
        .lifecycle_catalog()
        .map_err(translate_persistence_error)?;
    current
        .booking
        .ensure_mutable(&catalog)
        .map_err(translate_domain_error)?;

    let new_status_id: Option<i64> = status_name
        .map(|name| catalog.require_by_name(name).map(|status| status.id))
        .transpose()
        .map_err(translate_domain_error)?;

    let binding: Option<SlotBinding> = match date.zip(time) {
        Some((date, time)) => {
            let photographer_id: PhotographerId = photographer
                .or_else(|| current.slot.map(|slot| slot.photographer_id))
                .ok_or_else(|| {
                    ApiError::invalid_input(
                        "idfotografo",
                        "the booking has no schedule yet; idfotografo is required",
                    )
                })?;
            Some(SlotBinding {
                photographer_id,
                date,
                time,
            })
        }
        None => None,
    };

    if binding.is_none() && new_status_id.is_none() {
        return Err(ApiError::invalid_input(
            "estado",
            "nothing to update: provide estado and/or fecha and hora",
        ));
    }

    let updated: BookingDetail = persistence
        .apply_reservation_write(&ReservationWrite {
            booking_id,
            expected_status_id: current.booking.lifecycle_status_id,
            binding,
            new_status_id,
        })
        .map_err(translate_persistence_error)?;

    info!(
        booking_id,
        status_id = ?updated.booking.lifecycle_status_id,
        slot_id = ?updated.booking.schedule_slot_id,
        "Updated reservation"
    );
    Ok(UpdateReservationResponse {
        success: true,
        item: reservation_item(&updated),
    })
}

/// Moves many bookings to one status.
///
/// The status name is resolved once; ids that do not exist, and bookings
/// already delivered, are left out of the `updated` count instead of
/// failing the batch.
///
/// # Errors
///
/// Returns `InvalidInput` for an empty id list, a non-positive id, or an
/// unknown status name, or `Internal` if the write fails.
pub fn bulk_update_reservations(
    persistence: &mut Persistence,
    request: &BulkUpdateReservationsRequest,
) -> Result<BulkUpdateReservationsResponse, ApiError> {
    if request.reservas.is_empty() {
        return Err(ApiError::invalid_input(
            "reservas",
            "at least one booking id is required",
        ));
    }
    for &id in &request.reservas {
        validate_identifier("reservas", id).map_err(translate_domain_error)?;
    }

    let catalog: LifecycleCatalog = persistence
        .lifecycle_catalog()
        .map_err(translate_persistence_error)?;
    let status_id: i64 = catalog
        .require_by_name(&request.nuevo_estado)
        .map_err(translate_domain_error)?
        .id;

    let updated: usize = persistence
        .bulk_update_status(&request.reservas, status_id)
        .map_err(translate_persistence_error)?;

    info!(
        requested = request.reservas.len(),
        updated, status_id, "Bulk updated reservations"
    );
    Ok(BulkUpdateReservationsResponse {
        success: true,
        updated,
        status_id,
    })
}

/// Lists a customer's bookings, latest session first.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown customer.
pub fn list_customer_reservations(
    persistence: &mut Persistence,
    customer_id: i64,
) -> Result<ReservationListResponse, ApiError> {
    let customer_id: i64 =
        validate_identifier("clienteId", customer_id).map_err(translate_domain_error)?;
    if !persistence
        .customer_exists(customer_id)
        .map_err(translate_persistence_error)?
    {
        return Err(translate_persistence_error(
            PersistenceError::CustomerNotFound(customer_id),
        ));
    }

    let details: Vec<BookingDetail> = persistence
        .list_customer_bookings(customer_id)
        .map_err(translate_persistence_error)?;
    Ok(ReservationListResponse {
        success: true,
        items: details.iter().map(reservation_item).collect(),
    })
}

fn require_booking(persistence: &mut Persistence, booking_id: i64) -> Result<Booking, ApiError> {
    persistence
        .get_booking(booking_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| {
            ApiError::not_found("Booking", format!("Booking {booking_id} does not exist"))
        })
}

/// Returns a booking's status changes, oldest first.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown booking.
pub fn get_reservation_history(
    persistence: &mut Persistence,
    booking_id: i64,
) -> Result<HistoryResponse, ApiError> {
    let booking: Booking = require_booking(persistence, booking_id)?;
    let entries: Vec<StatusHistoryEntry> = persistence
        .list_status_history(booking.id)
        .map_err(translate_persistence_error)?;
    Ok(HistoryResponse {
        success: true,
        items: entries
            .into_iter()
            .map(|entry| HistoryItem {
                previous_status: entry.previous_status,
                new_status: entry.new_status,
                fecha: entry.changed_at,
            })
            .collect(),
    })
}

/// Lists the lifecycle status catalog in lifecycle order.
///
/// # Errors
///
/// Returns `Internal` if the query fails.
pub fn list_statuses(persistence: &mut Persistence) -> Result<StatusListResponse, ApiError> {
    let catalog: LifecycleCatalog = persistence
        .lifecycle_catalog()
        .map_err(translate_persistence_error)?;
    Ok(StatusListResponse {
        success: true,
        items: catalog.statuses().iter().map(status_item).collect(),
    })
}

/// Lists a booking's payments with the derived payment summary.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown booking.
pub fn list_payments(
    persistence: &mut Persistence,
    booking_id: i64,
) -> Result<PaymentListResponse, ApiError> {
    let booking: Booking = require_booking(persistence, booking_id)?;
    let payments: Vec<PaymentData> = persistence
        .list_payments(booking.id)
        .map_err(translate_persistence_error)?;
    let price: f64 = persistence
        .booking_price(booking.id)
        .map_err(translate_persistence_error)?;
    let total_paid: f64 = payments.iter().map(|payment| payment.amount).sum();
    let summary: PaymentSummary =
        classify_payment(booking.payment_status.as_deref(), total_paid, price);

    Ok(PaymentListResponse {
        success: true,
        items: payments
            .into_iter()
            .map(|payment| PaymentItem {
                id: payment.payment_id,
                monto: payment.amount,
                comprobante: payment.receipt_url,
                fecha: payment.paid_at,
            })
            .collect(),
        total_paid: summary.total_paid,
        price: summary.price,
        progress: summary.progress,
        payment_state: summary.state.as_str().to_string(),
    })
}

/// Records a payment against a booking.
///
/// # Errors
///
/// Returns `InvalidInput` for a non-positive amount or id, or
/// `ResourceNotFound` for an unknown booking.
pub fn record_payment(
    persistence: &mut Persistence,
    request: &RecordPaymentRequest,
) -> Result<RecordPaymentResponse, ApiError> {
    let booking_id: i64 =
        validate_identifier("reservaId", request.booking_id).map_err(translate_domain_error)?;
    let amount: f64 = validate_amount(request.monto).map_err(translate_domain_error)?;
    let receipt: Option<&str> = request
        .comprobante
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty());

    let recorded: PaymentRecorded = persistence
        .record_payment(booking_id, amount, receipt)
        .map_err(translate_persistence_error)?;

    Ok(RecordPaymentResponse {
        success: true,
        id: recorded.payment_id,
        total_paid: recorded.total_paid,
        price: recorded.price,
        progress: payment_progress(recorded.total_paid, recorded.price),
        payment_state: recorded.payment_status,
    })
}

/// Lists gallery images, newest first.
///
/// # Errors
///
/// Returns `Internal` if the query fails.
pub fn list_gallery(persistence: &mut Persistence) -> Result<GalleryListResponse, ApiError> {
    let images: Vec<GalleryImageData> = persistence
        .list_gallery_images()
        .map_err(translate_persistence_error)?;
    Ok(GalleryListResponse {
        success: true,
        items: images
            .into_iter()
            .map(|image| GalleryItem {
                id: image.image_id,
                titulo: image.title,
                url: image.image_url,
                categoria: image.category,
            })
            .collect(),
    })
}

/// Deletes a gallery image.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the image does not exist.
pub fn delete_gallery_image(
    persistence: &mut Persistence,
    image_id: i64,
) -> Result<DeleteGalleryImageResponse, ApiError> {
    let image_id: i64 = validate_identifier("id", image_id).map_err(translate_domain_error)?;
    persistence
        .delete_gallery_image(image_id)
        .map_err(translate_persistence_error)?;
    info!(image_id, "Deleted gallery image");
    Ok(DeleteGalleryImageResponse {
        success: true,
        deleted: image_id,
    })
}
