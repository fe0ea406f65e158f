// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod command;
mod editor;
mod error;
mod gateway;
mod paint;
mod state;
mod store;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::apply;
pub use command::AvailabilityCommand;
pub use editor::{AgendaEditor, CalendarCell};
pub use error::CoreError;
pub use gateway::{AgendaGateway, GatewayError, SlotRecord, SlotUpsert};
pub use paint::{DragSession, PaintState, StageRequest};
pub use state::{AvailabilityState, PendingDiff, SlotMap, TransitionRecord, TransitionResult};
pub use store::{
    AvailabilityStore, CommitOutcome, CommitResponse, CommitTicket, ObserverId, StoreEvent,
    TRANSITION_LOG_CAPACITY,
};
