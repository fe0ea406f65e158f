// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::gateway::GatewayError;
use studio_agenda_domain::{DomainError, PhotographerId};

/// Errors that can occur while editing and committing availability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// A commit was requested with an empty diff.
    NoPendingChanges {
        /// The photographer whose diff is empty.
        photographer_id: PhotographerId,
    },
    /// A commit for this photographer is still outstanding.
    CommitInFlight {
        /// The photographer being committed.
        photographer_id: PhotographerId,
    },
    /// A commit result arrived for a photographer with no outstanding commit.
    NoCommitInFlight {
        /// The photographer named by the result.
        photographer_id: PhotographerId,
    },
    /// Fetching the baseline failed; local state is unchanged.
    LoadFailed(GatewayError),
    /// The backend refused or failed a commit; the diff is left intact.
    CommitFailed {
        /// The photographer whose commit failed.
        photographer_id: PhotographerId,
        /// The gateway failure.
        source: GatewayError,
    },
    /// An editor action needs a selected photographer.
    NoPhotographerSelected,
}

impl CoreError {
    /// Whether retrying the same operation may succeed.
    ///
    /// Only backend failures are retryable; validation failures and caller
    /// errors are not.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::LoadFailed(source) | Self::CommitFailed { source, .. } => source.is_retryable(),
            Self::DomainViolation(_)
            | Self::NoPendingChanges { .. }
            | Self::CommitInFlight { .. }
            | Self::NoCommitInFlight { .. }
            | Self::NoPhotographerSelected => false,
        }
    }
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::NoPendingChanges { photographer_id } => {
                write!(f, "No pending changes for photographer {photographer_id}")
            }
            Self::CommitInFlight { photographer_id } => {
                write!(
                    f,
                    "A save for photographer {photographer_id} is already in progress"
                )
            }
            Self::NoCommitInFlight { photographer_id } => {
                write!(f, "No save in progress for photographer {photographer_id}")
            }
            Self::LoadFailed(err) => write!(f, "Failed to load availability: {err}"),
            Self::CommitFailed {
                photographer_id,
                source,
            } => write!(
                f,
                "Failed to save availability for photographer {photographer_id}: {source}"
            ),
            Self::NoPhotographerSelected => write!(f, "No photographer selected"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
