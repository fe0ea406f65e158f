// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use studio_agenda::SlotRecord;

use super::helpers::{STATUS_RESERVED, create_booking, patch, seeded_persistence};
use crate::error::PersistenceError;
use crate::{BookingDetail, SlotPatch};

#[test]
fn test_detail_defaults_missing_status_to_pending() {
    let (mut persistence, seed) = seeded_persistence();
    let id: i64 = create_booking(&mut persistence, &seed, None, None);

    let detail: BookingDetail = persistence.get_booking_detail(id).unwrap();

    assert_eq!(detail.status.unwrap().name, "Pendiente");
    assert!(detail.slot.is_none());
    assert!(detail.total_paid.abs() < f64::EPSILON);
    assert_eq!(detail.customer.email.as_deref(), Some("ana@example.com"));
}

#[test]
fn test_detail_for_unknown_booking() {
    let (mut persistence, _seed) = seeded_persistence();
    assert_eq!(
        persistence.get_booking_detail(5),
        Err(PersistenceError::BookingNotFound(5))
    );
}

#[test]
fn test_customer_bookings_latest_session_first() {
    let (mut persistence, seed) = seeded_persistence();
    let batch: Vec<SlotPatch> = vec![
        patch("2024-06-01", Some(false)),
        patch("2024-07-01", Some(false)),
    ];
    let slots: Vec<SlotRecord> = persistence
        .upsert_slots(seed.photographer, &batch)
        .unwrap();

    let june: i64 = create_booking(&mut persistence, &seed, Some(slots[0].slot_id), None);
    let unscheduled: i64 = create_booking(&mut persistence, &seed, None, None);
    let july: i64 = create_booking(
        &mut persistence,
        &seed,
        Some(slots[1].slot_id),
        Some(STATUS_RESERVED),
    );

    let listed: Vec<i64> = persistence
        .list_customer_bookings(seed.customer)
        .unwrap()
        .iter()
        .map(|detail| detail.booking.id)
        .collect();

    assert_eq!(listed, vec![july, june, unscheduled]);
}

#[test]
fn test_customer_without_bookings() {
    let (mut persistence, seed) = seeded_persistence();
    assert!(
        persistence
            .list_customer_bookings(seed.customer)
            .unwrap()
            .is_empty()
    );
    assert!(persistence.customer_exists(seed.customer).unwrap());
    assert!(!persistence.customer_exists(seed.customer + 100).unwrap());
}

#[test]
fn test_history_of_untouched_booking_is_empty() {
    let (mut persistence, seed) = seeded_persistence();
    let id: i64 = create_booking(&mut persistence, &seed, None, Some(STATUS_RESERVED));
    assert!(persistence.list_status_history(id).unwrap().is_empty());
}
