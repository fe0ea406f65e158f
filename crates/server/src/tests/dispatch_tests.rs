// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::http::{Method, StatusCode};
use serde_json::json;

use super::helpers::{send, test_app};
use crate::dispatch::{DispatchError, Endpoint};

#[test]
fn test_recognizes_every_endpoint() {
    let cases: Vec<(Method, &str, Endpoint)> = vec![
        (
            Method::PATCH,
            "/api/agenda/7",
            Endpoint::CommitAgenda { photographer_id: 7 },
        ),
        (Method::GET, "/api/agenda", Endpoint::ListAgenda),
        (
            Method::PATCH,
            "/api/reservas/actualizar-multiples",
            Endpoint::BulkUpdateReservations,
        ),
        (
            Method::PATCH,
            "/api/reservas/42",
            Endpoint::UpdateReservation { booking_id: 42 },
        ),
        (
            Method::GET,
            "/api/reservas/42/historial",
            Endpoint::ReservationHistory { booking_id: 42 },
        ),
        (Method::GET, "/api/mis-reservas", Endpoint::CustomerReservations),
        (Method::GET, "/api/estados", Endpoint::Statuses),
        (Method::GET, "/api/pagos", Endpoint::ListPayments),
        (Method::POST, "/api/pagos", Endpoint::RecordPayment),
        (Method::GET, "/api/galeria", Endpoint::ListGallery),
        (
            Method::DELETE,
            "/api/galeria/3",
            Endpoint::DeleteGalleryImage { image_id: 3 },
        ),
    ];

    for (method, path, expected) in cases {
        assert_eq!(
            Endpoint::recognize(&method, path),
            Ok(Some(expected)),
            "{method} {path}"
        );
    }
}

#[test]
fn test_unmatched_pairs_are_not_recognized() {
    let cases: Vec<(Method, &str)> = vec![
        (Method::GET, "/api/reservas/42"),
        (Method::POST, "/api/agenda/7"),
        (Method::DELETE, "/api/agenda"),
        (Method::GET, "/api/estados/"),
        (Method::GET, "/api/desconocido"),
        (Method::GET, "/health"),
        (Method::GET, "/"),
    ];

    for (method, path) in cases {
        assert_eq!(
            Endpoint::recognize(&method, path),
            Ok(None),
            "{method} {path}"
        );
    }
}

#[test]
fn test_malformed_path_id_is_an_error() {
    assert_eq!(
        Endpoint::recognize(&Method::PATCH, "/api/reservas/abc"),
        Err(DispatchError::InvalidPathId {
            field: "id",
            value: String::from("abc"),
        })
    );
}

#[tokio::test]
async fn test_unrecognized_request_reaches_fallback() {
    let (app, _state, _fixture) = test_app();

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    let (status, body) = send(&app, "GET", "/api/reservas/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("No route for GET /api/reservas/1"));
}

#[tokio::test]
async fn test_malformed_path_id_is_a_bad_request() {
    let (app, _state, _fixture) = test_app();

    let (status, body) = send(
        &app,
        "PATCH",
        "/api/agenda/siete",
        Some(json!({"fecha": "2024-06-01"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
}
