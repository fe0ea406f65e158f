// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Payment state classification.
//!
//! Payment state is derived rather than stored authoritatively. When a
//! booking has recorded payments, the classification comes from the
//! amounts; otherwise the stored label is resolved against the fixed
//! catalog, falling back to pending.

use crate::error::DomainError;
use crate::lifecycle::normalize_status_name;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The fixed payment state catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentState {
    /// Nothing paid yet.
    Pending,
    /// A deposit has been paid.
    Partial,
    /// Fully paid.
    Paid,
}

impl PaymentState {
    /// Returns the label used for persistence and the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pendiente",
            Self::Partial => "abonado",
            Self::Paid => "pagado",
        }
    }

    /// Resolves a numeric or textual code.
    ///
    /// Accepts the catalog codes `1`-`3` and the usual labels in Spanish or
    /// English, ignoring case and accents.
    #[must_use]
    pub fn resolve(code: &str) -> Option<Self> {
        match normalize_status_name(code).as_str() {
            "1" | "pendiente" | "pending" | "sin pago" => Some(Self::Pending),
            "2" | "abonado" | "con abono" | "parcial" | "partial" | "con anticipo" | "anticipo" => {
                Some(Self::Partial)
            }
            "3" | "pagado" | "paid" | "liquidado" | "pagada" => Some(Self::Paid),
            _ => None,
        }
    }

    /// Classifies a payment progress percentage.
    #[must_use]
    pub const fn from_progress(progress: u8) -> Self {
        match progress {
            0 => Self::Pending,
            100.. => Self::Paid,
            _ => Self::Partial,
        }
    }
}

impl FromStr for PaymentState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s).ok_or_else(|| DomainError::UnknownPaymentState(s.to_string()))
    }
}

impl std::fmt::Display for PaymentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Percentage of the price covered by payments: `min(100, round(paid / price * 100))`.
///
/// A non-positive price or paid total yields 0.
#[must_use]
pub fn payment_progress(total_paid: f64, price: f64) -> u8 {
    if !(price.is_finite() && total_paid.is_finite()) || price <= 0.0 || total_paid <= 0.0 {
        return 0;
    }
    let ratio: f64 = (total_paid / price * 100.0).round().min(100.0);
    ratio.to_u8().unwrap_or(0)
}

/// Derived payment view of one booking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaymentSummary {
    /// The resolved classification.
    pub state: PaymentState,
    /// Percentage paid, 0-100.
    pub progress: u8,
    /// Sum of recorded payments.
    pub total_paid: f64,
    /// Package price.
    pub price: f64,
}

/// Resolves a booking's payment state.
///
/// Recorded payments win over the stored label; the label is only
/// consulted when nothing has been paid.
#[must_use]
pub fn classify_payment(stored_label: Option<&str>, total_paid: f64, price: f64) -> PaymentSummary {
    let progress: u8 = payment_progress(total_paid, price);
    let state: PaymentState = if total_paid > 0.0 {
        if price <= 0.0 {
            PaymentState::Paid
        } else {
            PaymentState::from_progress(progress)
        }
    } else {
        stored_label
            .and_then(PaymentState::resolve)
            .unwrap_or(PaymentState::Pending)
    };
    PaymentSummary {
        state,
        progress,
        total_paid,
        price,
    }
}
