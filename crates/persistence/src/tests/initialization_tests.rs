// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use studio_agenda_domain::LifecycleCatalog;

use crate::Persistence;
use crate::error::PersistenceError;

#[test]
fn test_persistence_initialization() {
    let result: Result<Persistence, PersistenceError> = Persistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_foreign_keys_are_enforced() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1: Persistence = Persistence::new_in_memory().unwrap();
    let mut db2: Persistence = Persistence::new_in_memory().unwrap();

    db1.create_photographer("Only in db1").unwrap();

    assert_eq!(db1.list_photographers().unwrap().len(), 1);
    assert!(db2.list_photographers().unwrap().is_empty());
}

#[test]
fn test_lifecycle_catalog_is_seeded_in_order() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let catalog: LifecycleCatalog = persistence.lifecycle_catalog().unwrap();

    let names: Vec<&str> = catalog.statuses().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Pendiente", "Reservada", "En edición", "Entregada", "Cancelada"]
    );
    assert_eq!(catalog.initial().unwrap().id, 1);
    assert_eq!(catalog.delivered_ids(), vec![4]);
}

#[test]
fn test_migrations_revert_and_reapply() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    assert_eq!(persistence.revert_all_migrations().unwrap(), 1);
    assert!(persistence.list_photographers().is_err());

    assert_eq!(persistence.run_migrations().unwrap(), 1);
    assert_eq!(persistence.lifecycle_catalog().unwrap().statuses().len(), 5);
}

#[test]
fn test_booking_requires_existing_customer() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let package: i64 = persistence.create_package("Básico", 100.0).unwrap();

    let result: Result<i64, PersistenceError> = persistence.create_booking(&crate::NewBooking {
        customer_id: 404,
        package_id: package,
        schedule_slot_id: None,
        status_id: None,
        payment_status: None,
    });

    assert!(matches!(result, Err(PersistenceError::DatabaseError(_))));
}
