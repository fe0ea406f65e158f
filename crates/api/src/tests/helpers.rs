// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use studio_agenda_persistence::{NewBooking, Persistence};

use crate::{AgendaEntryRequest, AvailabilityFlag};

/// Reference rows shared by the API tests.
pub struct Fixture {
    pub photographer: i64,
    pub customer: i64,
    pub package: i64,
}

pub fn create_test_persistence() -> (Persistence, Fixture) {
    let mut persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    let photographer: i64 = persistence.create_photographer("Lucía Torres").unwrap();
    let customer: i64 = persistence.create_customer("Ana Pérez", None).unwrap();
    let package: i64 = persistence.create_package("Sesión familiar", 800.0).unwrap();
    (
        persistence,
        Fixture {
            photographer,
            customer,
            package,
        },
    )
}

pub fn create_booking(
    persistence: &mut Persistence,
    fixture: &Fixture,
    status: Option<i64>,
) -> i64 {
    persistence
        .create_booking(&NewBooking {
            customer_id: fixture.customer,
            package_id: fixture.package,
            schedule_slot_id: None,
            status_id: status,
            payment_status: None,
        })
        .unwrap()
}

pub fn entry(fecha: &str, disponible: Option<bool>) -> AgendaEntryRequest {
    AgendaEntryRequest {
        fecha: fecha.to_string(),
        horainicio: None,
        horafin: None,
        disponible: disponible.map(AvailabilityFlag::Bool),
    }
}
