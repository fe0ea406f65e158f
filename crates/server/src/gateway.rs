// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use futures::future::BoxFuture;
use std::sync::Arc;
use studio_agenda::{AgendaGateway, GatewayError, SlotRecord, SlotUpsert};
use studio_agenda_domain::PhotographerId;
use studio_agenda_persistence::{Persistence, PersistenceError, SlotPatch};
use tokio::sync::Mutex;
use tracing::debug;

/// An `AgendaGateway` over the server's own persistence.
#[derive(Clone)]
pub struct PersistenceGateway {
    persistence: Arc<Mutex<Persistence>>,
}

impl PersistenceGateway {
    /// Creates a gateway sharing the server's persistence handle.
    #[must_use]
    pub const fn new(persistence: Arc<Mutex<Persistence>>) -> Self {
        Self { persistence }
    }
}

fn gateway_error(err: PersistenceError) -> GatewayError {
    match err {
        PersistenceError::PhotographerNotFound(_) | PersistenceError::NotFound(_) => {
            GatewayError::NotFound(err.to_string())
        }
        PersistenceError::DomainViolation(_) => GatewayError::Rejected(err.to_string()),
        _ => GatewayError::Backend(err.to_string()),
    }
}

impl AgendaGateway for PersistenceGateway {
    fn fetch_slots(&self) -> BoxFuture<'_, Result<Vec<SlotRecord>, GatewayError>> {
        Box::pin(async move {
            let mut persistence = self.persistence.lock().await;
            let slots: Vec<SlotRecord> = persistence.list_all_slots().map_err(gateway_error)?;
            drop(persistence);
            debug!(count = slots.len(), "Fetched agenda baseline");
            Ok(slots)
        })
    }

    fn upsert_slots(
        &self,
        photographer_id: PhotographerId,
        upserts: Vec<SlotUpsert>,
    ) -> BoxFuture<'_, Result<Vec<SlotRecord>, GatewayError>> {
        Box::pin(async move {
            let patches: Vec<SlotPatch> = upserts
                .iter()
                .map(|upsert| SlotPatch {
                    date: upsert.date,
                    start: Some(upsert.value.start),
                    end: Some(upsert.value.end),
                    available: Some(upsert.value.available),
                })
                .collect();
            let mut persistence = self.persistence.lock().await;
            let written: Vec<SlotRecord> = persistence
                .upsert_slots(photographer_id, &patches)
                .map_err(gateway_error)?;
            drop(persistence);
            debug!(
                photographer_id = photographer_id.value(),
                upserted = written.len(),
                "Upserted agenda slots"
            );
            Ok(written)
        })
    }
}
