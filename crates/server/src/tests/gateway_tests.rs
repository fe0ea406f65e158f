// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde_json::{Value, json};
use studio_agenda::{
    AgendaEditor, AvailabilityStore, CalendarCell, CommitOutcome, CoreError, GatewayError, SlotMap,
};
use studio_agenda_domain::{DateKey, PhotographerId};
use time::macros::date;

use super::helpers::{send, test_app};
use crate::gateway::PersistenceGateway;

fn key(value: &str) -> DateKey {
    DateKey::parse(value).unwrap()
}

#[tokio::test]
async fn test_painted_range_is_saved_and_reloaded() {
    let (app, app_state, fixture) = test_app();
    let photographer: PhotographerId = PhotographerId::new(fixture.photographer).unwrap();
    let uri: String = format!("/api/agenda/{}", fixture.photographer);
    send(
        &app,
        "PATCH",
        &uri,
        Some(json!({"registros": [
            {"fecha": "2024-06-01", "disponible": true},
            {"fecha": "2024-06-02", "disponible": true},
            {"fecha": "2024-06-03", "disponible": true}
        ]})),
    )
    .await;

    let mut editor: AgendaEditor<PersistenceGateway> =
        AgendaEditor::new(PersistenceGateway::new(app_state.persistence.clone()));
    editor.select(Some(photographer));
    let loaded: SlotMap = editor.reload().await.unwrap();
    assert_eq!(loaded.len(), 3);

    editor.pointer_down(key("2024-06-01")).unwrap();
    editor.pointer_enter(key("2024-06-03")).unwrap();
    editor.pointer_up();
    assert!(editor.can_save());

    let outcome: CommitOutcome = editor.save().await.unwrap();
    assert_eq!(outcome.upserted, 3);
    assert_eq!(outcome.still_pending, 0);
    assert!(!editor.can_save());

    let reloaded: SlotMap = editor.reload().await.unwrap();
    assert_eq!(reloaded.len(), 3);
    assert!(reloaded.values().all(|slot| !slot.available));

    let (_, listed) = send(
        &app,
        "GET",
        &format!("/api/agenda?photographerId={}", fixture.photographer),
        None,
    )
    .await;
    let items: &Vec<Value> = listed["items"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert!(items.iter().all(|item| item["disponible"] == json!(false)));

    let view: Vec<CalendarCell> = editor.month_view(date!(2024 - 06 - 15)).unwrap();
    let first: &CalendarCell = view
        .iter()
        .find(|cell| cell.key == key("2024-06-01"))
        .unwrap();
    assert!(!first.available);
    assert!(!first.pending);
}

#[tokio::test]
async fn test_unavailable_range_on_empty_agenda_creates_rows() {
    let (app, app_state, fixture) = test_app();
    let photographer: PhotographerId = PhotographerId::new(fixture.photographer).unwrap();
    let days: Vec<DateKey> = DateKey::inclusive_range(key("2024-06-01"), key("2024-06-03"));

    let mut store: AvailabilityStore<PersistenceGateway> =
        AvailabilityStore::new(PersistenceGateway::new(app_state.persistence.clone()));
    store.load(photographer).await.unwrap();
    store.stage(photographer, &days, false).unwrap();
    let outcome: CommitOutcome = store.commit(photographer).await.unwrap();
    assert_eq!(outcome.upserted, 3);

    let (_, listed) = send(
        &app,
        "GET",
        &format!("/api/agenda?photographerId={}", fixture.photographer),
        None,
    )
    .await;
    let items: &Vec<Value> = listed["items"].as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert!(items.iter().all(|item| item["disponible"] == json!(false)));
    assert_eq!(items[0]["fecha"], json!("2024-06-01"));
}

#[tokio::test]
async fn test_failed_save_keeps_the_edit() {
    let (_app, app_state, _fixture) = test_app();
    let missing: PhotographerId = PhotographerId::new(99).unwrap();

    let mut editor: AgendaEditor<PersistenceGateway> =
        AgendaEditor::new(PersistenceGateway::new(app_state.persistence.clone()));
    editor.select(Some(missing));
    assert!(editor.reload().await.unwrap().is_empty());
    editor.pointer_down(key("2024-06-10")).unwrap();
    editor.pointer_up();

    let result: Result<CommitOutcome, CoreError> = editor.save().await;

    assert!(matches!(
        result,
        Err(CoreError::CommitFailed {
            source: GatewayError::NotFound(_),
            ..
        })
    ));
    assert!(editor.can_save());
    assert!(editor.store().availability(missing, key("2024-06-10")));
}
