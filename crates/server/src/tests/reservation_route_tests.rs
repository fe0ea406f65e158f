// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::http::StatusCode;
use serde_json::{Value, json};

use super::helpers::{create_bookings_up_to, send, test_app};

#[tokio::test]
async fn test_reschedule_consumes_one_slot() {
    let (app, app_state, fixture) = test_app();
    let booking: i64 = create_bookings_up_to(&app_state, &fixture, 42).await;
    assert_eq!(booking, 42);

    let (status, body) = send(
        &app,
        "PATCH",
        "/api/reservas/42",
        Some(json!({
            "fecha": "2024-07-10",
            "hora": "09:00",
            "idfotografo": fixture.photographer,
            "estado": "Reservada"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let item: &Value = &body["item"];
    assert_eq!(item["id"], json!(42));
    assert_eq!(item["estado"]["nombre"], json!("Reservada"));
    assert_eq!(item["hora"], json!("09:00"));
    assert_eq!(item["agenda"]["fecha"], json!("2024-07-10"));
    assert_eq!(item["agenda"]["idfotografo"], json!(fixture.photographer));
    assert_eq!(item["agenda"]["disponible"], json!(false));
    assert_eq!(item["cliente"]["nombre"], json!("Ana Pérez"));
    assert_eq!(item["estadoPago"], json!("pendiente"));

    let (_, listed) = send(
        &app,
        "GET",
        &format!("/api/agenda?photographerId={}", fixture.photographer),
        None,
    )
    .await;
    let slots: &Vec<Value> = listed["items"].as_array().unwrap();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0]["id"], item["agenda"]["id"]);
}

#[tokio::test]
async fn test_bulk_update_counts_existing_bookings() {
    let (app, app_state, fixture) = test_app();
    create_bookings_up_to(&app_state, &fixture, 2).await;

    let (status, body) = send(
        &app,
        "PATCH",
        "/api/reservas/actualizar-multiples",
        Some(json!({"reservas": [1, 2, 999], "nuevo_estado": "Entregada"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"success": true, "updated": 2, "estadoId": 4})
    );

    let (status, body) = send(
        &app,
        "PATCH",
        "/api/reservas/1",
        Some(json!({"estado": "Reservada"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("delivered_is_terminal")
    );

    let (status, history) = send(&app, "GET", "/api/reservas/1/historial", None).await;
    assert_eq!(status, StatusCode::OK);
    let items: &Vec<Value> = history["items"].as_array().unwrap();
    assert_eq!(items.last().unwrap()["estadoNuevo"], json!("Entregada"));
}

#[tokio::test]
async fn test_unknown_status_name_is_a_bad_request() {
    let (app, app_state, fixture) = test_app();
    create_bookings_up_to(&app_state, &fixture, 1).await;

    let (status, body) = send(
        &app,
        "PATCH",
        "/api/reservas/1",
        Some(json!({"estado": "Archivada"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn test_unknown_booking_is_not_found() {
    let (app, _state, _fixture) = test_app();

    let (status, _) = send(
        &app,
        "PATCH",
        "/api/reservas/5",
        Some(json!({"estado": "Reservada"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_history_lists_transitions() {
    let (app, app_state, fixture) = test_app();
    create_bookings_up_to(&app_state, &fixture, 1).await;
    send(
        &app,
        "PATCH",
        "/api/reservas/1",
        Some(json!({"estado": "reservada"})),
    )
    .await;

    let (status, body) = send(&app, "GET", "/api/reservas/1/historial", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["items"][0]["estadoAnterior"],
        json!("Pendiente")
    );
    assert_eq!(body["items"][0]["estadoNuevo"], json!("Reservada"));

    let (status, _) = send(&app, "GET", "/api/reservas/77/historial", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_customer_reservations() {
    let (app, app_state, fixture) = test_app();
    create_bookings_up_to(&app_state, &fixture, 2).await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/mis-reservas?clienteId={}", fixture.customer),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 2);

    let (status, _) = send(&app, "GET", "/api/mis-reservas?clienteId=500", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "GET", "/api/mis-reservas", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn test_status_catalog() {
    let (app, _state, _fixture) = test_app();

    let (status, body) = send(&app, "GET", "/api/estados", None).await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["nombre"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec!["Pendiente", "Reservada", "En edición", "Entregada", "Cancelada"]
    );
}
