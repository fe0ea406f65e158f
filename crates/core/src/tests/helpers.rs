// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{AgendaGateway, GatewayError, SlotRecord, SlotUpsert};
use futures::future::BoxFuture;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use studio_agenda_domain::{DEFAULT_END, DEFAULT_START, DateKey, PhotographerId, TimeOfDay};

pub fn photographer(id: i64) -> PhotographerId {
    PhotographerId::new(id).unwrap()
}

pub fn key(value: &str) -> DateKey {
    DateKey::parse(value).unwrap()
}

pub fn keys(from: &str, to: &str) -> Vec<DateKey> {
    DateKey::inclusive_range(key(from), key(to))
}

pub fn time(value: &str) -> TimeOfDay {
    TimeOfDay::parse(value).unwrap()
}

pub fn record(slot_id: i64, photographer_id: i64, date: &str, available: bool) -> SlotRecord {
    SlotRecord {
        slot_id,
        photographer_id: photographer(photographer_id),
        date: key(date),
        start: DEFAULT_START,
        end: DEFAULT_END,
        available,
    }
}

/// In-memory agenda backend keyed by `(photographer, date)`.
#[derive(Debug, Default)]
pub struct FakeGateway {
    rows: Mutex<BTreeMap<(PhotographerId, DateKey), SlotRecord>>,
    next_id: AtomicI64,
    failing: Mutex<BTreeSet<PhotographerId>>,
    fail_fetch: AtomicBool,
    upsert_calls: AtomicUsize,
}

impl FakeGateway {
    pub fn with_rows(rows: Vec<SlotRecord>) -> Self {
        let gateway: Self = Self::default();
        let max_id: i64 = rows.iter().map(|r| r.slot_id).max().unwrap_or(0);
        gateway.next_id.store(max_id, Ordering::SeqCst);
        {
            let mut stored = gateway.rows.lock().unwrap();
            for row in rows {
                stored.insert((row.photographer_id, row.date), row);
            }
        }
        gateway
    }

    pub fn fail_upserts_for(&self, photographer_id: PhotographerId, failing: bool) {
        let mut set = self.failing.lock().unwrap();
        if failing {
            set.insert(photographer_id);
        } else {
            set.remove(&photographer_id);
        }
    }

    pub fn fail_fetch(&self, failing: bool) {
        self.fail_fetch.store(failing, Ordering::SeqCst);
    }

    pub fn rows_for(&self, photographer_id: PhotographerId) -> Vec<SlotRecord> {
        self.rows
            .lock()
            .unwrap()
            .values()
            .filter(|r| r.photographer_id == photographer_id)
            .copied()
            .collect()
    }

    pub fn upsert_calls(&self) -> usize {
        self.upsert_calls.load(Ordering::SeqCst)
    }
}

impl AgendaGateway for FakeGateway {
    fn fetch_slots(&self) -> BoxFuture<'_, Result<Vec<SlotRecord>, GatewayError>> {
        Box::pin(async move {
            if self.fail_fetch.load(Ordering::SeqCst) {
                return Err(GatewayError::Backend(String::from("connection reset")));
            }
            Ok(self.rows.lock().unwrap().values().copied().collect())
        })
    }

    fn upsert_slots(
        &self,
        photographer_id: PhotographerId,
        upserts: Vec<SlotUpsert>,
    ) -> BoxFuture<'_, Result<Vec<SlotRecord>, GatewayError>> {
        Box::pin(async move {
            self.upsert_calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.lock().unwrap().contains(&photographer_id) {
                return Err(GatewayError::Backend(String::from("timed out")));
            }
            let mut rows = self.rows.lock().unwrap();
            let mut persisted: Vec<SlotRecord> = Vec::new();
            for upsert in upserts {
                let slot_id: i64 = rows
                    .get(&(photographer_id, upsert.date))
                    .map_or_else(|| self.next_id.fetch_add(1, Ordering::SeqCst) + 1, |r| r.slot_id);
                let row: SlotRecord = SlotRecord {
                    slot_id,
                    photographer_id,
                    date: upsert.date,
                    start: upsert.value.start,
                    end: upsert.value.end,
                    available: upsert.value.available,
                };
                rows.insert((photographer_id, upsert.date), row);
                persisted.push(row);
            }
            Ok(persisted)
        })
    }
}
