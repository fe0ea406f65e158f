// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde_json::{Value, json};

use crate::{
    AgendaCommitRequest, AvailabilityFlag, BulkUpdateReservationsRequest,
    BulkUpdateReservationsResponse, HistoryItem, RecordPaymentRequest, UpdateReservationRequest,
};

#[test]
fn test_batch_commit_body() {
    let request: AgendaCommitRequest = serde_json::from_value(json!({
        "registros": [
            {"fecha": "2024-06-01", "disponible": 1},
            {"fecha": "2024-06-02", "horainicio": "10:00", "horafin": "14:00", "disponible": false}
        ]
    }))
    .unwrap();

    let entries = request.entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].disponible, Some(AvailabilityFlag::Number(1)));
    assert_eq!(entries[1].disponible, Some(AvailabilityFlag::Bool(false)));
    assert_eq!(entries[1].horainicio.as_deref(), Some("10:00"));
}

#[test]
fn test_single_commit_body() {
    let request: AgendaCommitRequest =
        serde_json::from_value(json!({"fecha": "2024-06-01", "disponible": true})).unwrap();

    assert!(matches!(request, AgendaCommitRequest::Single(_)));
    assert_eq!(request.entries()[0].fecha, "2024-06-01");
    assert!(request.entries()[0].horafin.is_none());
}

#[test]
fn test_commit_body_without_date_is_rejected() {
    let result: Result<AgendaCommitRequest, _> =
        serde_json::from_value(json!({"disponible": true}));
    assert!(result.is_err());
}

#[test]
fn test_reservation_body_fields_are_optional() {
    let request: UpdateReservationRequest =
        serde_json::from_value(json!({"estado": "Reservada"})).unwrap();

    assert_eq!(request.estado.as_deref(), Some("Reservada"));
    assert!(request.fecha.is_none());
    assert!(request.idfotografo.is_none());
}

#[test]
fn test_bulk_wire_names() {
    let request: BulkUpdateReservationsRequest = serde_json::from_value(json!({
        "reservas": [1, 2, 999],
        "nuevo_estado": "Entregada"
    }))
    .unwrap();
    assert_eq!(request.reservas, vec![1, 2, 999]);

    let body: Value = serde_json::to_value(BulkUpdateReservationsResponse {
        success: true,
        updated: 2,
        status_id: 4,
    })
    .unwrap();
    assert_eq!(body, json!({"success": true, "updated": 2, "estadoId": 4}));
}

#[test]
fn test_payment_body_uses_booking_key() {
    let request: RecordPaymentRequest =
        serde_json::from_value(json!({"reservaId": 5, "monto": 150.5})).unwrap();

    assert_eq!(request.booking_id, 5);
    assert!(request.comprobante.is_none());
}

#[test]
fn test_first_history_entry_omits_previous_status() {
    let body: Value = serde_json::to_value(HistoryItem {
        previous_status: None,
        new_status: String::from("Reservada"),
        fecha: String::from("2024-06-01 10:00:00"),
    })
    .unwrap();

    assert_eq!(
        body,
        json!({"estadoNuevo": "Reservada", "fecha": "2024-06-01 10:00:00"})
    );
}
