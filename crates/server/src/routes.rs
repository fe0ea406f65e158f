// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP handlers and the route tables.

use axum::{
    Json, Router,
    extract::{
        Path, Query, State as AxumState,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{delete, get, patch},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use studio_agenda_api::{
    AgendaCommitRequest, AgendaCommitResponse, AgendaListResponse, ApiError,
    BulkUpdateReservationsRequest, BulkUpdateReservationsResponse, DeleteGalleryImageResponse,
    GalleryListResponse, HistoryResponse, ListAgendaRequest, PaymentListResponse,
    RecordPaymentRequest, RecordPaymentResponse, ReservationListResponse, StatusListResponse,
    UpdateReservationRequest, UpdateReservationResponse, bulk_update_reservations, commit_agenda,
    delete_gallery_image, get_reservation_history, list_agenda, list_customer_reservations,
    list_gallery, list_payments, list_statuses, record_payment, update_reservation,
};
use studio_agenda_persistence::Persistence;
use tokio::sync::Mutex;
use tower::Layer;
use tracing::{error, info, warn};

use crate::dispatch::{DispatchError, DispatchLayer, Dispatcher};

/// Application state shared across handlers.
///
/// Every request works against the same persistence handle; the mutex
/// serializes writes so each handler sees a consistent database.
#[derive(Clone)]
pub struct AppState {
    /// The persistence layer.
    pub persistence: Arc<Mutex<Persistence>>,
}

impl AppState {
    /// Wraps an opened persistence layer.
    #[must_use]
    pub fn new(persistence: Persistence) -> Self {
        Self {
            persistence: Arc::new(Mutex::new(persistence)),
        }
    }
}

/// Query string of `GET /api/agenda`.
#[derive(Debug, Deserialize)]
struct ListAgendaQuery {
    #[serde(rename = "photographerId")]
    photographer_id: Option<i64>,
    desde: Option<String>,
    hasta: Option<String>,
}

/// Query string of `GET /api/mis-reservas`.
#[derive(Debug, Deserialize)]
struct CustomerQuery {
    #[serde(rename = "clienteId")]
    customer_id: i64,
}

/// Query string of `GET /api/pagos`.
#[derive(Debug, Deserialize)]
struct PaymentQuery {
    #[serde(rename = "reservaId")]
    booking_id: i64,
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Error message.
    pub message: String,
}

/// Health check body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
pub struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            success: false,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            // A rejected transition is reported as a bad request; the
            // message names the rule.
            ApiError::InvalidInput { .. } | ApiError::Conflict { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<DispatchError> for HttpError {
    fn from(err: DispatchError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: err.to_string(),
        }
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(error = %rejection.body_text(), "Rejected request body");
        Self {
            status: StatusCode::BAD_REQUEST,
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for HttpError {
    fn from(rejection: QueryRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: rejection.body_text(),
        }
    }
}

/// Handler for PATCH `/api/agenda/{photographer_id}`.
async fn handle_commit_agenda(
    AxumState(app_state): AxumState<AppState>,
    Path(photographer_id): Path<i64>,
    payload: Result<Json<AgendaCommitRequest>, JsonRejection>,
) -> Result<Json<AgendaCommitResponse>, HttpError> {
    let Json(request) = payload?;
    info!(
        photographer_id,
        entries = request.entries().len(),
        "Handling commit_agenda request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: AgendaCommitResponse =
        commit_agenda(&mut persistence, photographer_id, &request)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/api/agenda`.
async fn handle_list_agenda(
    AxumState(app_state): AxumState<AppState>,
    query: Result<Query<ListAgendaQuery>, QueryRejection>,
) -> Result<Json<AgendaListResponse>, HttpError> {
    let Query(query) = query?;
    info!(photographer_id = ?query.photographer_id, "Handling list_agenda request");

    let request: ListAgendaRequest = ListAgendaRequest {
        photographer_id: query.photographer_id,
        desde: query.desde,
        hasta: query.hasta,
    };
    let mut persistence = app_state.persistence.lock().await;
    let response: AgendaListResponse = list_agenda(&mut persistence, &request)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for PATCH `/api/reservas/{id}`.
async fn handle_update_reservation(
    AxumState(app_state): AxumState<AppState>,
    Path(booking_id): Path<i64>,
    payload: Result<Json<UpdateReservationRequest>, JsonRejection>,
) -> Result<Json<UpdateReservationResponse>, HttpError> {
    let Json(request) = payload?;
    info!(booking_id, estado = ?request.estado, "Handling update_reservation request");

    let mut persistence = app_state.persistence.lock().await;
    let response: UpdateReservationResponse =
        update_reservation(&mut persistence, booking_id, &request)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for PATCH `/api/reservas/actualizar-multiples`.
async fn handle_bulk_update_reservations(
    AxumState(app_state): AxumState<AppState>,
    payload: Result<Json<BulkUpdateReservationsRequest>, JsonRejection>,
) -> Result<Json<BulkUpdateReservationsResponse>, HttpError> {
    let Json(request) = payload?;
    info!(
        requested = request.reservas.len(),
        nuevo_estado = %request.nuevo_estado,
        "Handling bulk_update_reservations request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: BulkUpdateReservationsResponse =
        bulk_update_reservations(&mut persistence, &request)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/api/reservas/{id}/historial`.
async fn handle_reservation_history(
    AxumState(app_state): AxumState<AppState>,
    Path(booking_id): Path<i64>,
) -> Result<Json<HistoryResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: HistoryResponse = get_reservation_history(&mut persistence, booking_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/api/mis-reservas`.
async fn handle_customer_reservations(
    AxumState(app_state): AxumState<AppState>,
    query: Result<Query<CustomerQuery>, QueryRejection>,
) -> Result<Json<ReservationListResponse>, HttpError> {
    let Query(query) = query?;
    info!(
        customer_id = query.customer_id,
        "Handling customer_reservations request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: ReservationListResponse =
        list_customer_reservations(&mut persistence, query.customer_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/api/estados`.
async fn handle_list_statuses(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<StatusListResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: StatusListResponse = list_statuses(&mut persistence)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/api/pagos`.
async fn handle_list_payments(
    AxumState(app_state): AxumState<AppState>,
    query: Result<Query<PaymentQuery>, QueryRejection>,
) -> Result<Json<PaymentListResponse>, HttpError> {
    let Query(query) = query?;

    let mut persistence = app_state.persistence.lock().await;
    let response: PaymentListResponse = list_payments(&mut persistence, query.booking_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/api/pagos`.
async fn handle_record_payment(
    AxumState(app_state): AxumState<AppState>,
    payload: Result<Json<RecordPaymentRequest>, JsonRejection>,
) -> Result<Json<RecordPaymentResponse>, HttpError> {
    let Json(request) = payload?;
    info!(
        booking_id = request.booking_id,
        monto = request.monto,
        "Handling record_payment request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: RecordPaymentResponse = record_payment(&mut persistence, &request)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/api/galeria`.
async fn handle_list_gallery(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<GalleryListResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: GalleryListResponse = list_gallery(&mut persistence)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for DELETE `/api/galeria/{id}`.
async fn handle_delete_gallery_image(
    AxumState(app_state): AxumState<AppState>,
    Path(image_id): Path<i64>,
) -> Result<Json<DeleteGalleryImageResponse>, HttpError> {
    info!(image_id, "Handling delete_gallery_image request");

    let mut persistence = app_state.persistence.lock().await;
    let response: DeleteGalleryImageResponse = delete_gallery_image(&mut persistence, image_id)?;
    drop(persistence);

    Ok(Json(response))
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

async fn handle_not_found(method: Method, uri: Uri) -> HttpError {
    HttpError {
        status: StatusCode::NOT_FOUND,
        message: format!("No route for {method} {}", uri.path()),
    }
}

/// Builds the router for the agenda API endpoints.
pub fn build_api_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/agenda", get(handle_list_agenda))
        .route("/api/agenda/{photographer_id}", patch(handle_commit_agenda))
        .route(
            "/api/reservas/actualizar-multiples",
            patch(handle_bulk_update_reservations),
        )
        .route("/api/reservas/{id}", patch(handle_update_reservation))
        .route(
            "/api/reservas/{id}/historial",
            get(handle_reservation_history),
        )
        .route("/api/mis-reservas", get(handle_customer_reservations))
        .route("/api/estados", get(handle_list_statuses))
        .route(
            "/api/pagos",
            get(handle_list_payments).post(handle_record_payment),
        )
        .route("/api/galeria", get(handle_list_gallery))
        .route("/api/galeria/{id}", delete(handle_delete_gallery_image))
        .with_state(app_state)
}

/// Builds the service that receives everything the dispatcher does not
/// recognize.
pub fn build_fallback_router() -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .fallback(handle_not_found)
}

/// Builds the application: the dispatcher in front of the fallback router.
pub fn build_router(app_state: AppState) -> Router {
    let dispatcher: Dispatcher<Router> =
        DispatchLayer::new(build_api_router(app_state)).layer(build_fallback_router());
    Router::new().fallback_service(dispatcher)
}
