// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use studio_agenda_domain::DomainError;
use studio_agenda_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain and persistence errors and represent the
/// API contract. Each variant maps to exactly one HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The request conflicts with the current state of the resource.
    Conflict {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the conflict.
        message: String,
    },
    /// An internal error occurred. The caller may retry.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// Shorthand for an `InvalidInput` error.
    #[must_use]
    pub fn invalid_input(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Shorthand for a `ResourceNotFound` error.
    #[must_use]
    pub fn not_found(resource_type: &str, message: impl Into<String>) -> Self {
        Self::ResourceNotFound {
            resource_type: resource_type.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Conflict { rule, message } => {
                write!(f, "Conflict ({rule}): {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidDate { .. } => ApiError::invalid_input("fecha", err.to_string()),
        DomainError::InvalidTime { .. } => ApiError::invalid_input("hora", err.to_string()),
        DomainError::InvalidTimeWindow { .. } => {
            ApiError::invalid_input("horainicio", err.to_string())
        }
        DomainError::InvalidIdentifier { ref field, .. } => {
            ApiError::invalid_input(field, err.to_string())
        }
        DomainError::UnknownLifecycleStatus(_) | DomainError::LifecycleStatusNotFound(_) => {
            ApiError::invalid_input("estado", err.to_string())
        }
        DomainError::UnknownPaymentState(_) => {
            ApiError::invalid_input("estadoPago", err.to_string())
        }
        DomainError::InvalidAmount(_) => ApiError::invalid_input("monto", err.to_string()),
        DomainError::DateArithmeticOverflow { .. } => {
            ApiError::invalid_input("fecha", err.to_string())
        }
        DomainError::BookingDelivered { .. } => ApiError::Conflict {
            rule: String::from("delivered_is_terminal"),
            message: err.to_string(),
        },
        DomainError::EmptyLifecycleCatalog => ApiError::Internal {
            message: err.to_string(),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Missing rows become `ResourceNotFound`, rule violations keep their
/// domain meaning, and everything else is an internal failure.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::PhotographerNotFound(id) => {
            ApiError::not_found("Photographer", format!("Photographer {id} does not exist"))
        }
        PersistenceError::CustomerNotFound(id) => {
            ApiError::not_found("Customer", format!("Customer {id} does not exist"))
        }
        PersistenceError::BookingNotFound(id) => {
            ApiError::not_found("Booking", format!("Booking {id} does not exist"))
        }
        PersistenceError::GalleryImageNotFound(id) => {
            ApiError::not_found("Gallery image", format!("Image {id} does not exist"))
        }
        PersistenceError::NotFound(msg) => ApiError::not_found("Record", msg),
        PersistenceError::StaleRecord { .. } => ApiError::Conflict {
            rule: String::from("stale_record"),
            message: err.to_string(),
        },
        PersistenceError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        PersistenceError::DatabaseError(_)
        | PersistenceError::DatabaseConnectionFailed(_)
        | PersistenceError::MigrationFailed(_)
        | PersistenceError::QueryFailed(_)
        | PersistenceError::ReconstructionError(_)
        | PersistenceError::InitializationError(_)
        | PersistenceError::ForeignKeyEnforcementNotEnabled => ApiError::Internal {
            message: err.to_string(),
        },
    }
}
