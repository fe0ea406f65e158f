// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking lifecycle catalog.
//!
//! The catalog is data, not an enum: statuses live in the database and are
//! ordered by `order`. Names are matched case- and accent-insensitively so
//! "Reservada", "reservada", and "RESERVADA" all resolve to the same entry.
//! The delivered status is terminal.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// Normalized names recognized as the terminal delivered status.
const DELIVERED_NAMES: [&str; 3] = ["entregada", "entregado", "delivered"];

/// One entry of the lifecycle catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleStatus {
    /// The catalog identifier.
    pub id: i64,
    /// The display name.
    pub name: String,
    /// Position in the lifecycle (ascending).
    pub order: i32,
}

impl LifecycleStatus {
    /// Creates a catalog entry.
    #[must_use]
    pub fn new(id: i64, name: &str, order: i32) -> Self {
        Self {
            id,
            name: name.to_string(),
            order,
        }
    }

    /// Whether this is the terminal delivered status.
    #[must_use]
    pub fn is_delivered(&self) -> bool {
        DELIVERED_NAMES.contains(&normalize_status_name(&self.name).as_str())
    }
}

/// The ordered set of lifecycle statuses.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LifecycleCatalog {
    statuses: Vec<LifecycleStatus>,
}

impl LifecycleCatalog {
    /// Builds a catalog, sorting entries by `order` then `id`.
    #[must_use]
    pub fn new(mut statuses: Vec<LifecycleStatus>) -> Self {
        statuses.sort_by_key(|s| (s.order, s.id));
        Self { statuses }
    }

    /// Returns all statuses in lifecycle order.
    #[must_use]
    pub fn statuses(&self) -> &[LifecycleStatus] {
        &self.statuses
    }

    /// The first status of the lifecycle (pending).
    #[must_use]
    pub fn initial(&self) -> Option<&LifecycleStatus> {
        self.statuses.first()
    }

    /// Looks up a status by id.
    #[must_use]
    pub fn by_id(&self, id: i64) -> Option<&LifecycleStatus> {
        self.statuses.iter().find(|s| s.id == id)
    }

    /// Looks up a status by name, ignoring case and accents.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&LifecycleStatus> {
        let wanted: String = normalize_status_name(name);
        if wanted.is_empty() {
            return None;
        }
        self.statuses
            .iter()
            .find(|s| normalize_status_name(&s.name) == wanted)
    }

    /// Resolves a nullable status reference; `None` means the initial status.
    #[must_use]
    pub fn resolve(&self, id: Option<i64>) -> Option<&LifecycleStatus> {
        id.map_or_else(|| self.initial(), |id| self.by_id(id))
    }

    /// Resolves a status name or fails.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyLifecycleCatalog` if there is nothing to
    /// resolve against, or `DomainError::UnknownLifecycleStatus` if no entry
    /// matches.
    pub fn require_by_name(&self, name: &str) -> Result<&LifecycleStatus, DomainError> {
        if self.statuses.is_empty() {
            return Err(DomainError::EmptyLifecycleCatalog);
        }
        self.by_name(name)
            .ok_or_else(|| DomainError::UnknownLifecycleStatus(name.to_string()))
    }

    /// Ids of every status treated as delivered.
    #[must_use]
    pub fn delivered_ids(&self) -> Vec<i64> {
        self.statuses
            .iter()
            .filter(|s| s.is_delivered())
            .map(|s| s.id)
            .collect()
    }
}

/// Normalizes a status name for comparison.
///
/// Lowercases, strips Latin diacritics, and collapses runs of whitespace.
#[must_use]
pub fn normalize_status_name(name: &str) -> String {
    let folded: String = name.to_lowercase().chars().map(fold_diacritic).collect();
    folded.split_whitespace().collect::<Vec<&str>>().join(" ")
}

const fn fold_diacritic(c: char) -> char {
    match c {
        'á' | 'à' | 'ä' | 'â' | 'ã' | 'å' => 'a',
        'é' | 'è' | 'ë' | 'ê' => 'e',
        'í' | 'ì' | 'ï' | 'î' => 'i',
        'ó' | 'ò' | 'ö' | 'ô' | 'õ' => 'o',
        'ú' | 'ù' | 'ü' | 'û' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        other => other,
    }
}
