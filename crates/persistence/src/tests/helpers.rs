// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use studio_agenda_domain::{DateKey, PhotographerId, TimeOfDay};

use crate::{NewBooking, Persistence, SlotPatch};

pub const STATUS_PENDING: i64 = 1;
pub const STATUS_RESERVED: i64 = 2;
pub const STATUS_DELIVERED: i64 = 4;

/// Ids of the reference rows created by `seeded_persistence`.
pub struct Seed {
    pub photographer: PhotographerId,
    pub customer: i64,
    pub package: i64,
}

pub fn key(value: &str) -> DateKey {
    DateKey::parse(value).expect("valid test date")
}

pub fn time(value: &str) -> TimeOfDay {
    TimeOfDay::parse(value).expect("valid test time")
}

pub fn patch(date: &str, available: Option<bool>) -> SlotPatch {
    SlotPatch {
        date: key(date),
        start: None,
        end: None,
        available,
    }
}

/// An in-memory database with one photographer, customer, and package.
pub fn seeded_persistence() -> (Persistence, Seed) {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let photographer: i64 = persistence.create_photographer("Lucía Torres").unwrap();
    let customer: i64 = persistence
        .create_customer("Ana Pérez", Some("ana@example.com"))
        .unwrap();
    let package: i64 = persistence.create_package("Sesión básica", 1000.0).unwrap();
    (
        persistence,
        Seed {
            photographer: PhotographerId::new(photographer).unwrap(),
            customer,
            package,
        },
    )
}

pub fn create_booking(
    persistence: &mut Persistence,
    seed: &Seed,
    slot_id: Option<i64>,
    status_id: Option<i64>,
) -> i64 {
    persistence
        .create_booking(&NewBooking {
            customer_id: seed.customer,
            package_id: seed.package,
            schedule_slot_id: slot_id,
            status_id,
            payment_status: None,
        })
        .unwrap()
}
