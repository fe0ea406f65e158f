// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request dispatch for the agenda API.
//!
//! The dispatcher recognizes a fixed set of `(method, path shape)` pairs and
//! hands those requests to the API router. Anything it does not recognize
//! is forwarded unchanged to the inner service, so the API composes with
//! whatever else the server mounts instead of replacing it.

use axum::{
    Router,
    body::Body,
    http::{Method, Request},
    response::{IntoResponse, Response},
};
use futures::future::BoxFuture;
use std::convert::Infallible;
use std::task::{Context, Poll};
use thiserror::Error;
use tower::{Layer, Service, ServiceExt};
use tracing::debug;

use crate::routes::HttpError;

/// Failures detected while recognizing a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// A recognized path carried an identifier that is not an integer.
    #[error("invalid {field} in path: {value:?}")]
    InvalidPathId {
        /// The path parameter.
        field: &'static str,
        /// The raw segment.
        value: String,
    },
}

/// The endpoints served by the API router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `PATCH /api/agenda/{photographerId}`
    CommitAgenda {
        /// The photographer whose agenda is written.
        photographer_id: i64,
    },
    /// `GET /api/agenda`
    ListAgenda,
    /// `PATCH /api/reservas/actualizar-multiples`
    BulkUpdateReservations,
    /// `PATCH /api/reservas/{id}`
    UpdateReservation {
        /// The booking being transitioned.
        booking_id: i64,
    },
    /// `GET /api/reservas/{id}/historial`
    ReservationHistory {
        /// The booking whose history is listed.
        booking_id: i64,
    },
    /// `GET /api/mis-reservas`
    CustomerReservations,
    /// `GET /api/estados`
    Statuses,
    /// `GET /api/pagos`
    ListPayments,
    /// `POST /api/pagos`
    RecordPayment,
    /// `GET /api/galeria`
    ListGallery,
    /// `DELETE /api/galeria/{id}`
    DeleteGalleryImage {
        /// The image being deleted.
        image_id: i64,
    },
}

fn path_id(field: &'static str, segment: &str) -> Result<i64, DispatchError> {
    segment
        .parse::<i64>()
        .map_err(|_| DispatchError::InvalidPathId {
            field,
            value: segment.to_string(),
        })
}

impl Endpoint {
    /// Recognizes a request by method and path shape.
    ///
    /// Returns `Ok(None)` for anything outside the fixed endpoint set. The
    /// literal `actualizar-multiples` segment takes precedence over the
    /// `{id}` shape.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError::InvalidPathId` when the shape matches but an
    /// identifier segment is not an integer.
    pub fn recognize(method: &Method, path: &str) -> Result<Option<Self>, DispatchError> {
        let Some(rest) = path.strip_prefix("/api/") else {
            return Ok(None);
        };
        let segments: Vec<&str> = rest.split('/').collect();

        let endpoint: Self = match segments.as_slice() {
            ["agenda"] if method == Method::GET => Self::ListAgenda,
            ["agenda", id] if method == Method::PATCH && !id.is_empty() => Self::CommitAgenda {
                photographer_id: path_id("photographerId", id)?,
            },
            ["reservas", "actualizar-multiples"] if method == Method::PATCH => {
                Self::BulkUpdateReservations
            }
            ["reservas", id] if method == Method::PATCH && !id.is_empty() => {
                Self::UpdateReservation {
                    booking_id: path_id("id", id)?,
                }
            }
            ["reservas", id, "historial"] if method == Method::GET => Self::ReservationHistory {
                booking_id: path_id("id", id)?,
            },
            ["mis-reservas"] if method == Method::GET => Self::CustomerReservations,
            ["estados"] if method == Method::GET => Self::Statuses,
            ["pagos"] if method == Method::GET => Self::ListPayments,
            ["pagos"] if method == Method::POST => Self::RecordPayment,
            ["galeria"] if method == Method::GET => Self::ListGallery,
            ["galeria", id] if method == Method::DELETE && !id.is_empty() => {
                Self::DeleteGalleryImage {
                    image_id: path_id("id", id)?,
                }
            }
            _ => return Ok(None),
        };
        Ok(Some(endpoint))
    }

    /// A stable name for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CommitAgenda { .. } => "commit_agenda",
            Self::ListAgenda => "list_agenda",
            Self::BulkUpdateReservations => "bulk_update_reservations",
            Self::UpdateReservation { .. } => "update_reservation",
            Self::ReservationHistory { .. } => "reservation_history",
            Self::CustomerReservations => "customer_reservations",
            Self::Statuses => "statuses",
            Self::ListPayments => "list_payments",
            Self::RecordPayment => "record_payment",
            Self::ListGallery => "list_gallery",
            Self::DeleteGalleryImage { .. } => "delete_gallery_image",
        }
    }
}

/// Wraps an inner service with the API dispatcher.
#[derive(Clone)]
pub struct DispatchLayer {
    api: Router,
}

impl DispatchLayer {
    /// Creates a layer that sends recognized requests to `api`.
    #[must_use]
    pub const fn new(api: Router) -> Self {
        Self { api }
    }
}

impl<S> Layer<S> for DispatchLayer {
    type Service = Dispatcher<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Dispatcher {
            api: self.api.clone(),
            inner,
        }
    }
}

/// Routes recognized endpoints to the API router and everything else to
/// the inner service.
#[derive(Clone)]
pub struct Dispatcher<S> {
    api: Router,
    inner: S,
}

impl<S> Service<Request<Body>> for Dispatcher<S>
where
    S: Service<Request<Body>, Response = Response, Error = Infallible> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Response, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        // Both targets are driven through `oneshot`, which polls readiness itself.
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        match Endpoint::recognize(request.method(), request.uri().path()) {
            Ok(Some(endpoint)) => {
                debug!(
                    endpoint = endpoint.name(),
                    path = request.uri().path(),
                    "Dispatching API request"
                );
                Box::pin(self.api.clone().oneshot(request))
            }
            Ok(None) => {
                debug!(
                    method = %request.method(),
                    path = request.uri().path(),
                    "Forwarding unrecognized request"
                );
                Box::pin(self.inner.clone().oneshot(request))
            }
            Err(err) => {
                let response: Response = HttpError::from(err).into_response();
                Box::pin(async move { Ok(response) })
            }
        }
    }
}
