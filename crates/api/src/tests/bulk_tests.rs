// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_booking, create_test_persistence};
use crate::{
    ApiError, BulkUpdateReservationsRequest, BulkUpdateReservationsResponse,
    bulk_update_reservations,
};

fn request(ids: Vec<i64>, status: &str) -> BulkUpdateReservationsRequest {
    BulkUpdateReservationsRequest {
        reservas: ids,
        nuevo_estado: status.to_string(),
    }
}

#[test]
fn test_missing_ids_are_not_counted() {
    let (mut persistence, fixture) = create_test_persistence();
    let first: i64 = create_booking(&mut persistence, &fixture, None);
    let second: i64 = create_booking(&mut persistence, &fixture, Some(2));

    let response: BulkUpdateReservationsResponse = bulk_update_reservations(
        &mut persistence,
        &request(vec![first, second, 999], "Entregada"),
    )
    .unwrap();

    assert!(response.success);
    assert_eq!(response.updated, 2);
    assert_eq!(response.status_id, 4);
    for id in [first, second] {
        let booking = persistence.get_booking(id).unwrap().unwrap();
        assert_eq!(booking.lifecycle_status_id, Some(4));
    }
}

#[test]
fn test_unknown_status_fails_fast() {
    let (mut persistence, fixture) = create_test_persistence();
    let id: i64 = create_booking(&mut persistence, &fixture, None);

    let result = bulk_update_reservations(&mut persistence, &request(vec![id], "Perdida"));

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "estado"
    ));
    assert_eq!(
        persistence.get_booking(id).unwrap().unwrap().lifecycle_status_id,
        None
    );
}

#[test]
fn test_empty_id_list_is_rejected() {
    let (mut persistence, _fixture) = create_test_persistence();

    let result = bulk_update_reservations(&mut persistence, &request(Vec::new(), "Reservada"));

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "reservas"
    ));
}

#[test]
fn test_non_positive_id_is_rejected() {
    let (mut persistence, _fixture) = create_test_persistence();

    let result = bulk_update_reservations(&mut persistence, &request(vec![3, -1], "Reservada"));

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "reservas"
    ));
}

#[test]
fn test_delivered_bookings_keep_their_status() {
    let (mut persistence, fixture) = create_test_persistence();
    let delivered: i64 = create_booking(&mut persistence, &fixture, Some(4));

    let response: BulkUpdateReservationsResponse =
        bulk_update_reservations(&mut persistence, &request(vec![delivered], "Cancelada"))
            .unwrap();

    assert_eq!(response.updated, 0);
    assert_eq!(
        persistence
            .get_booking(delivered)
            .unwrap()
            .unwrap()
            .lifecycle_status_id,
        Some(4)
    );
}
