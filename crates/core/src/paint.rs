// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Drag-to-paint range selection on the calendar.
//!
//! A pointer-down flips the anchor cell and remembers the flipped value.
//! Every cell entered while dragging re-stages the whole inclusive range
//! from the anchor to that cell with the same value. Releasing the pointer
//! only ends the drag; nothing is persisted until the store commits.

use studio_agenda_domain::{DateKey, PhotographerId};

/// A batch of days to stage with one availability flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageRequest {
    /// The photographer being painted.
    pub photographer_id: PhotographerId,
    /// The days to stage, walking from the anchor.
    pub keys: Vec<DateKey>,
    /// The value painted onto every day.
    pub available: bool,
}

/// An active drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    /// The photographer being painted.
    pub photographer_id: PhotographerId,
    /// The cell where the drag started.
    pub anchor: DateKey,
    /// The value applied to every cell in the range.
    pub target: bool,
    /// The most recently entered cell.
    pub last: DateKey,
}

/// The paint interaction state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaintState {
    /// No drag in progress.
    #[default]
    Idle,
    /// A drag is in progress.
    Dragging(DragSession),
}

impl PaintState {
    /// Whether a drag is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }

    /// Starts a drag on `key`, whose current availability is `current`.
    ///
    /// The anchor is flipped immediately; a single click is a range of one.
    /// A pointer-down during a drag starts a new drag.
    pub fn pointer_down(
        &mut self,
        photographer_id: PhotographerId,
        key: DateKey,
        current: bool,
    ) -> StageRequest {
        let target: bool = !current;
        *self = Self::Dragging(DragSession {
            photographer_id,
            anchor: key,
            target,
            last: key,
        });
        StageRequest {
            photographer_id,
            keys: vec![key],
            available: target,
        }
    }

    /// Extends the drag to `key`.
    ///
    /// Returns `None` when idle or when `key` is the cell last entered, so
    /// repeated enter events on one cell never stage twice.
    pub fn pointer_enter(&mut self, key: DateKey) -> Option<StageRequest> {
        let Self::Dragging(session) = self else {
            return None;
        };
        if session.last == key {
            return None;
        }
        session.last = key;
        Some(StageRequest {
            photographer_id: session.photographer_id,
            keys: DateKey::inclusive_range(session.anchor, key),
            available: session.target,
        })
    }

    /// Ends the drag on pointer release.
    pub fn pointer_up(&mut self) {
        self.release();
    }

    /// Ends the drag when the pointer is cancelled.
    pub fn pointer_cancel(&mut self) {
        self.release();
    }

    /// Ends the drag when the pointer leaves the calendar surface.
    pub fn pointer_leave(&mut self) {
        self.release();
    }

    fn release(&mut self) {
        *self = Self::Idle;
    }
}
