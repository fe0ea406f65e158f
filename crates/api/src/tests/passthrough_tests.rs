// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_booking, create_test_persistence};
use crate::{
    ApiError, GalleryListResponse, PaymentListResponse, RecordPaymentRequest,
    RecordPaymentResponse, StatusListResponse, delete_gallery_image, list_gallery, list_payments,
    list_statuses, record_payment,
};

fn payment(booking_id: i64, monto: f64) -> RecordPaymentRequest {
    RecordPaymentRequest {
        booking_id,
        monto,
        comprobante: None,
    }
}

#[test]
fn test_payment_flow_updates_summary() {
    let (mut persistence, fixture) = create_test_persistence();
    let booking: i64 = create_booking(&mut persistence, &fixture, None);

    let empty: PaymentListResponse = list_payments(&mut persistence, booking).unwrap();
    assert!(empty.items.is_empty());
    assert_eq!(empty.progress, 0);
    assert_eq!(empty.payment_state, "pendiente");

    let deposit: RecordPaymentResponse = record_payment(
        &mut persistence,
        &RecordPaymentRequest {
            booking_id: booking,
            monto: 200.0,
            comprobante: Some(String::from(" https://files.example.com/abono.pdf ")),
        },
    )
    .unwrap();
    assert_eq!(deposit.progress, 25);
    assert_eq!(deposit.payment_state, "abonado");

    let rest: RecordPaymentResponse =
        record_payment(&mut persistence, &payment(booking, 600.0)).unwrap();
    assert_eq!(rest.progress, 100);
    assert_eq!(rest.payment_state, "pagado");

    let listed: PaymentListResponse = list_payments(&mut persistence, booking).unwrap();
    assert_eq!(listed.items.len(), 2);
    assert_eq!(
        listed.items[0].comprobante.as_deref(),
        Some("https://files.example.com/abono.pdf")
    );
    assert!((listed.total_paid - 800.0).abs() < f64::EPSILON);
    assert!((listed.price - 800.0).abs() < f64::EPSILON);
    assert_eq!(listed.progress, 100);
    assert_eq!(listed.payment_state, "pagado");
}

#[test]
fn test_overpayment_caps_progress() {
    let (mut persistence, fixture) = create_test_persistence();
    let booking: i64 = create_booking(&mut persistence, &fixture, None);

    let response: RecordPaymentResponse =
        record_payment(&mut persistence, &payment(booking, 1000.0)).unwrap();

    assert_eq!(response.progress, 100);
    assert_eq!(response.payment_state, "pagado");
}

#[test]
fn test_payment_validation() {
    let (mut persistence, fixture) = create_test_persistence();
    let booking: i64 = create_booking(&mut persistence, &fixture, None);

    assert!(matches!(
        record_payment(&mut persistence, &payment(booking, -5.0)),
        Err(ApiError::InvalidInput { ref field, .. }) if field == "monto"
    ));
    assert!(matches!(
        record_payment(&mut persistence, &payment(booking + 50, 5.0)),
        Err(ApiError::ResourceNotFound { .. })
    ));
    assert!(matches!(
        list_payments(&mut persistence, booking + 50),
        Err(ApiError::ResourceNotFound { .. })
    ));
}

#[test]
fn test_statuses_in_lifecycle_order() {
    let (mut persistence, _fixture) = create_test_persistence();

    let response: StatusListResponse = list_statuses(&mut persistence).unwrap();

    let orders: Vec<i32> = response.items.iter().map(|item| item.orden).collect();
    assert_eq!(orders, vec![1, 2, 3, 4, 5]);
    assert_eq!(response.items[3].nombre, "Entregada");
}

#[test]
fn test_gallery_list_and_delete() {
    let (mut persistence, _fixture) = create_test_persistence();
    let image: i64 = persistence
        .create_gallery_image("Quince años", "https://img.example.com/q.jpg", Some("eventos"))
        .unwrap();

    let listed: GalleryListResponse = list_gallery(&mut persistence).unwrap();
    assert_eq!(listed.items.len(), 1);
    assert_eq!(listed.items[0].titulo, "Quince años");
    assert_eq!(listed.items[0].categoria.as_deref(), Some("eventos"));

    assert_eq!(
        delete_gallery_image(&mut persistence, image).unwrap().deleted,
        image
    );
    assert!(matches!(
        delete_gallery_image(&mut persistence, image),
        Err(ApiError::ResourceNotFound { .. })
    ));
}
