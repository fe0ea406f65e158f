// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use studio_agenda_domain::{LifecycleCatalog, LifecycleStatus};

use crate::diesel_schema::lifecycle_statuses;
use crate::error::PersistenceError;

/// Loads the lifecycle status catalog.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn load_lifecycle_catalog(
    conn: &mut SqliteConnection,
) -> Result<LifecycleCatalog, PersistenceError> {
    let rows: Vec<(i64, String, i32)> = lifecycle_statuses::table
        .select((
            lifecycle_statuses::status_id,
            lifecycle_statuses::name,
            lifecycle_statuses::sort_order,
        ))
        .load(conn)?;
    Ok(LifecycleCatalog::new(
        rows.into_iter()
            .map(|(id, name, order)| LifecycleStatus::new(id, &name, order))
            .collect(),
    ))
}
