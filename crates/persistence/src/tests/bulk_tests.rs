// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use studio_agenda_domain::{Booking, DomainError};

use super::helpers::{STATUS_DELIVERED, STATUS_RESERVED, create_booking, seeded_persistence};
use crate::error::PersistenceError;
use crate::StatusHistoryEntry;

#[test]
fn test_missing_ids_are_excluded_from_count() {
    let (mut persistence, seed) = seeded_persistence();
    let first: i64 = create_booking(&mut persistence, &seed, None, None);
    let second: i64 = create_booking(&mut persistence, &seed, None, Some(STATUS_RESERVED));

    let updated: usize = persistence
        .bulk_update_status(&[first, second, 999], STATUS_DELIVERED)
        .unwrap();

    assert_eq!(updated, 2);
    for id in [first, second] {
        let booking: Booking = persistence.get_booking(id).unwrap().unwrap();
        assert_eq!(booking.lifecycle_status_id, Some(STATUS_DELIVERED));
    }
}

#[test]
fn test_delivered_bookings_are_skipped() {
    let (mut persistence, seed) = seeded_persistence();
    let open: i64 = create_booking(&mut persistence, &seed, None, None);
    let delivered: i64 = create_booking(&mut persistence, &seed, None, Some(STATUS_DELIVERED));

    let updated: usize = persistence
        .bulk_update_status(&[open, delivered], STATUS_RESERVED)
        .unwrap();

    assert_eq!(updated, 1);
    let untouched: Booking = persistence.get_booking(delivered).unwrap().unwrap();
    assert_eq!(untouched.lifecycle_status_id, Some(STATUS_DELIVERED));
}

#[test]
fn test_duplicate_ids_count_once() {
    let (mut persistence, seed) = seeded_persistence();
    let id: i64 = create_booking(&mut persistence, &seed, None, None);

    let updated: usize = persistence
        .bulk_update_status(&[id, id, id], STATUS_RESERVED)
        .unwrap();

    assert_eq!(updated, 1);
    assert_eq!(persistence.list_status_history(id).unwrap().len(), 1);
}

#[test]
fn test_unknown_status_fails_before_writing() {
    let (mut persistence, seed) = seeded_persistence();
    let id: i64 = create_booking(&mut persistence, &seed, None, None);

    let result: Result<usize, PersistenceError> = persistence.bulk_update_status(&[id], 99);

    assert_eq!(
        result,
        Err(PersistenceError::DomainViolation(
            DomainError::LifecycleStatusNotFound(99)
        ))
    );
    assert_eq!(
        persistence.get_booking(id).unwrap().unwrap().lifecycle_status_id,
        None
    );
}

#[test]
fn test_bulk_update_records_history() {
    let (mut persistence, seed) = seeded_persistence();
    let id: i64 = create_booking(&mut persistence, &seed, None, Some(STATUS_RESERVED));

    persistence
        .bulk_update_status(&[id], STATUS_DELIVERED)
        .unwrap();

    let history: Vec<StatusHistoryEntry> = persistence.list_status_history(id).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].previous_status.as_deref(), Some("Reservada"));
    assert_eq!(history[0].new_status, "Entregada");
}

#[test]
fn test_empty_request_updates_nothing() {
    let (mut persistence, _seed) = seeded_persistence();
    assert_eq!(
        persistence
            .bulk_update_status(&[], STATUS_RESERVED)
            .unwrap(),
        0
    );
}
