// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::gateway::AgendaGateway;
use crate::paint::{PaintState, StageRequest};
use crate::state::SlotMap;
use crate::store::{AvailabilityStore, CommitOutcome};
use studio_agenda_domain::{DateKey, MonthCell, PhotographerId, build_month_grid};
use time::Date;

/// One day of the editor's month view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCell {
    /// The day shown.
    pub key: DateKey,
    /// Whether the day belongs to the displayed month.
    pub in_month: bool,
    /// Working availability for the selected photographer.
    pub available: bool,
    /// Whether the day carries an unsaved edit.
    pub pending: bool,
}

/// The availability calendar screen: a store, a paint state, and the
/// photographer currently selected.
#[derive(Debug)]
pub struct AgendaEditor<G> {
    store: AvailabilityStore<G>,
    paint: PaintState,
    selected: Option<PhotographerId>,
}

impl<G: AgendaGateway> AgendaEditor<G> {
    /// Creates an editor with nobody selected.
    #[must_use]
    pub fn new(gateway: G) -> Self {
        Self {
            store: AvailabilityStore::new(gateway),
            paint: PaintState::Idle,
            selected: None,
        }
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &AvailabilityStore<G> {
        &self.store
    }

    /// The underlying store, mutably (for subscribing observers).
    pub const fn store_mut(&mut self) -> &mut AvailabilityStore<G> {
        &mut self.store
    }

    /// The current paint state.
    #[must_use]
    pub const fn paint_state(&self) -> PaintState {
        self.paint
    }

    /// The selected photographer.
    #[must_use]
    pub const fn selected(&self) -> Option<PhotographerId> {
        self.selected
    }

    /// Selects a photographer; any drag in progress ends.
    pub fn select(&mut self, photographer_id: Option<PhotographerId>) {
        self.paint.pointer_cancel();
        self.selected = photographer_id;
    }

    /// Reloads the baseline and returns the selected photographer's slots.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NoPhotographerSelected` or the store's load error.
    pub async fn reload(&mut self) -> Result<SlotMap, CoreError> {
        let photographer_id: PhotographerId =
            self.selected.ok_or(CoreError::NoPhotographerSelected)?;
        self.paint.pointer_cancel();
        self.store.load(photographer_id).await
    }

    /// Handles a pointer-down on a day cell. Ignored with nobody selected.
    ///
    /// # Errors
    ///
    /// Propagates a rejected stage.
    pub fn pointer_down(&mut self, key: DateKey) -> Result<bool, CoreError> {
        let Some(photographer_id) = self.selected else {
            return Ok(false);
        };
        let current: bool = self.store.availability(photographer_id, key);
        let request: StageRequest = self.paint.pointer_down(photographer_id, key, current);
        self.apply_request(&request)?;
        Ok(true)
    }

    /// Handles a pointer entering a day cell.
    ///
    /// Returns whether anything was staged.
    ///
    /// # Errors
    ///
    /// Propagates a rejected stage.
    pub fn pointer_enter(&mut self, key: DateKey) -> Result<bool, CoreError> {
        if self.selected.is_none() {
            return Ok(false);
        }
        match self.paint.pointer_enter(key) {
            Some(request) => {
                self.apply_request(&request)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Handles pointer release.
    pub fn pointer_up(&mut self) {
        self.paint.pointer_up();
    }

    /// Handles pointer cancellation.
    pub fn pointer_cancel(&mut self) {
        self.paint.pointer_cancel();
    }

    /// Handles the pointer leaving the calendar surface.
    pub fn pointer_leave(&mut self) {
        self.paint.pointer_leave();
    }

    /// Whether the save action is enabled.
    #[must_use]
    pub fn can_save(&self) -> bool {
        self.selected
            .is_some_and(|photographer_id| self.store.can_save(photographer_id))
    }

    /// Saves the selected photographer's pending edits.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NoPhotographerSelected` or the store's commit error.
    pub async fn save(&mut self) -> Result<CommitOutcome, CoreError> {
        let photographer_id: PhotographerId =
            self.selected.ok_or(CoreError::NoPhotographerSelected)?;
        self.store.commit(photographer_id).await
    }

    /// The 42-cell month view for the month containing `reference`.
    ///
    /// With nobody selected every day shows as unavailable and unchanged.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::DomainViolation` if the grid leaves the
    /// representable date range.
    pub fn month_view(&self, reference: Date) -> Result<Vec<CalendarCell>, CoreError> {
        let grid: Vec<MonthCell> = build_month_grid(reference)?;
        Ok(grid
            .into_iter()
            .map(|cell| {
                let (available, pending) = self.selected.map_or((false, false), |photographer_id| {
                    let state = self.store.state();
                    (
                        state.availability(photographer_id, cell.key),
                        state.pending_value(photographer_id, cell.key).is_some(),
                    )
                });
                CalendarCell {
                    key: cell.key,
                    in_month: cell.in_month,
                    available,
                    pending,
                }
            })
            .collect())
    }

    fn apply_request(&mut self, request: &StageRequest) -> Result<(), CoreError> {
        self.store
            .stage(request.photographer_id, &request.keys, request.available)
    }
}
