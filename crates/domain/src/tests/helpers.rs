// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Booking, DateKey, LifecycleCatalog, LifecycleStatus};

/// The catalog seeded by the initial migration.
pub fn create_test_catalog() -> LifecycleCatalog {
    LifecycleCatalog::new(vec![
        LifecycleStatus::new(4, "Entregada", 4),
        LifecycleStatus::new(1, "Pendiente", 1),
        LifecycleStatus::new(3, "En edición", 3),
        LifecycleStatus::new(2, "Reservada", 2),
        LifecycleStatus::new(5, "Cancelada", 5),
    ])
}

pub fn create_test_booking(id: i64, lifecycle_status_id: Option<i64>) -> Booking {
    Booking {
        id,
        schedule_slot_id: None,
        lifecycle_status_id,
        payment_status: None,
        package_id: 1,
        customer_id: 1,
    }
}

pub fn key(value: &str) -> DateKey {
    DateKey::parse(value).unwrap()
}
