// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::create_test_catalog;
use crate::{DomainError, LifecycleCatalog, LifecycleStatus, normalize_status_name};

#[test]
fn test_catalog_is_ordered() {
    let catalog: LifecycleCatalog = create_test_catalog();
    let names: Vec<&str> = catalog
        .statuses()
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(
        names,
        vec!["Pendiente", "Reservada", "En edición", "Entregada", "Cancelada"]
    );
    assert_eq!(catalog.initial().unwrap().id, 1);
}

#[test]
fn test_lookup_by_name_ignores_case_and_accents() {
    let catalog: LifecycleCatalog = create_test_catalog();
    assert_eq!(catalog.by_name("reservada").unwrap().id, 2);
    assert_eq!(catalog.by_name("RESERVADA").unwrap().id, 2);
    assert_eq!(catalog.by_name("en edicion").unwrap().id, 3);
    assert_eq!(catalog.by_name("  En   EDICIÓN ").unwrap().id, 3);
    assert!(catalog.by_name("").is_none());
    assert!(catalog.by_name("archivada").is_none());
}

#[test]
fn test_lookup_by_id() {
    let catalog: LifecycleCatalog = create_test_catalog();
    assert_eq!(catalog.by_id(4).unwrap().name, "Entregada");
    assert!(catalog.by_id(99).is_none());
}

#[test]
fn test_resolve_none_defaults_to_initial() {
    let catalog: LifecycleCatalog = create_test_catalog();
    assert_eq!(catalog.resolve(None).unwrap().name, "Pendiente");
    assert_eq!(catalog.resolve(Some(2)).unwrap().name, "Reservada");
}

#[test]
fn test_require_by_name_errors() {
    let catalog: LifecycleCatalog = create_test_catalog();
    assert!(matches!(
        catalog.require_by_name("nope"),
        Err(DomainError::UnknownLifecycleStatus(name)) if name == "nope"
    ));

    let empty: LifecycleCatalog = LifecycleCatalog::default();
    assert_eq!(
        empty.require_by_name("Reservada"),
        Err(DomainError::EmptyLifecycleCatalog)
    );
}

#[test]
fn test_delivered_detection() {
    let catalog: LifecycleCatalog = create_test_catalog();
    assert_eq!(catalog.delivered_ids(), vec![4]);
    assert!(LifecycleStatus::new(9, "ENTREGADO", 9).is_delivered());
    assert!(!LifecycleStatus::new(9, "Reservada", 2).is_delivered());
}

#[test]
fn test_normalize_status_name() {
    assert_eq!(normalize_status_name("  Ñandú  Pagó "), "nandu pago");
}
