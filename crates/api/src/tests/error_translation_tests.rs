// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use studio_agenda_domain::DomainError;
use studio_agenda_persistence::PersistenceError;

use crate::{ApiError, translate_domain_error, translate_persistence_error};

fn field_of(err: &ApiError) -> Option<&str> {
    match err {
        ApiError::InvalidInput { field, .. } => Some(field),
        _ => None,
    }
}

#[test]
fn test_validation_errors_name_the_wire_field() {
    let cases: Vec<(DomainError, &str)> = vec![
        (
            DomainError::InvalidDate {
                value: String::from("2024-13-01"),
                reason: String::from("not a calendar date"),
            },
            "fecha",
        ),
        (
            DomainError::InvalidTime {
                value: String::from("7pm"),
                reason: String::from("expected HH:MM"),
            },
            "hora",
        ),
        (
            DomainError::InvalidTimeWindow {
                start: String::from("18:00"),
                end: String::from("09:00"),
            },
            "horainicio",
        ),
        (
            DomainError::InvalidIdentifier {
                field: String::from("reservaId"),
                value: String::from("0"),
            },
            "reservaId",
        ),
        (DomainError::UnknownLifecycleStatus(String::from("x")), "estado"),
        (DomainError::LifecycleStatusNotFound(77), "estado"),
        (DomainError::UnknownPaymentState(String::from("x")), "estadoPago"),
        (DomainError::InvalidAmount(String::from("-1")), "monto"),
    ];

    for (domain, expected) in cases {
        let translated: ApiError = translate_domain_error(domain);
        assert_eq!(field_of(&translated), Some(expected), "{translated}");
    }
}

#[test]
fn test_delivered_booking_is_a_conflict() {
    let translated: ApiError =
        translate_domain_error(DomainError::BookingDelivered { booking_id: 3 });
    assert!(matches!(
        translated,
        ApiError::Conflict { ref rule, .. } if rule == "delivered_is_terminal"
    ));
}

#[test]
fn test_empty_catalog_is_internal() {
    assert!(matches!(
        translate_domain_error(DomainError::EmptyLifecycleCatalog),
        ApiError::Internal { .. }
    ));
}

#[test]
fn test_missing_rows_become_not_found() {
    for err in [
        PersistenceError::PhotographerNotFound(1),
        PersistenceError::CustomerNotFound(2),
        PersistenceError::BookingNotFound(3),
        PersistenceError::GalleryImageNotFound(4),
        PersistenceError::NotFound(String::from("slot")),
    ] {
        assert!(matches!(
            translate_persistence_error(err),
            ApiError::ResourceNotFound { .. }
        ));
    }
}

#[test]
fn test_stale_record_is_a_conflict() {
    assert!(matches!(
        translate_persistence_error(PersistenceError::StaleRecord { booking_id: 9 }),
        ApiError::Conflict { ref rule, .. } if rule == "stale_record"
    ));
}

#[test]
fn test_domain_violation_keeps_its_meaning() {
    let translated: ApiError = translate_persistence_error(PersistenceError::DomainViolation(
        DomainError::InvalidAmount(String::from("0")),
    ));
    assert_eq!(field_of(&translated), Some("monto"));
}

#[test]
fn test_storage_failures_are_internal() {
    for err in [
        PersistenceError::DatabaseError(String::from("disk I/O error")),
        PersistenceError::ReconstructionError(String::from("bad time")),
        PersistenceError::ForeignKeyEnforcementNotEnabled,
    ] {
        assert!(matches!(
            translate_persistence_error(err),
            ApiError::Internal { .. }
        ));
    }
}
