// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::Value;
use studio_agenda_persistence::{NewBooking, Persistence};
use tower::ServiceExt;

use crate::routes::{AppState, build_router};

/// Reference rows shared by the server tests.
pub struct Fixture {
    /// Photographer 7, so ids match the documented scenarios.
    pub photographer: i64,
    pub customer: i64,
    pub package: i64,
}

/// Helper to create test app state with in-memory persistence and seeded
/// reference rows.
pub fn create_test_app_state() -> (AppState, Fixture) {
    let mut persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    let mut photographer: i64 = 0;
    for n in 1..=7 {
        photographer = persistence
            .create_photographer(&format!("Fotógrafo {n}"))
            .unwrap();
    }
    let customer: i64 = persistence
        .create_customer("Ana Pérez", Some("ana@example.com"))
        .unwrap();
    let package: i64 = persistence.create_package("Sesión de estudio", 1200.0).unwrap();
    (
        AppState::new(persistence),
        Fixture {
            photographer,
            customer,
            package,
        },
    )
}

/// Creates bookings until the last one has id `target` and returns it.
pub async fn create_bookings_up_to(app_state: &AppState, fixture: &Fixture, target: i64) -> i64 {
    let mut persistence = app_state.persistence.lock().await;
    let mut last: i64 = 0;
    while last < target {
        last = persistence
            .create_booking(&NewBooking {
                customer_id: fixture.customer,
                package_id: fixture.package,
                schedule_slot_id: None,
                status_id: None,
                payment_status: None,
            })
            .unwrap();
    }
    last
}

/// Sends one request through the full application and decodes the body.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request: Request<Body> = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status: StatusCode = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

pub fn test_app() -> (Router, AppState, Fixture) {
    let (app_state, fixture) = create_test_app_state();
    (build_router(app_state.clone()), app_state, fixture)
}
