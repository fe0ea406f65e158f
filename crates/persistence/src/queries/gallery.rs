// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;

use crate::data_models::GalleryImageData;
use crate::diesel_schema::gallery_images;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = gallery_images)]
struct GalleryRow {
    image_id: i64,
    title: String,
    image_url: String,
    category: Option<String>,
    created_at: String,
}

/// Lists gallery images, newest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_gallery_images(
    conn: &mut SqliteConnection,
) -> Result<Vec<GalleryImageData>, PersistenceError> {
    let rows: Vec<GalleryRow> = gallery_images::table
        .order((gallery_images::created_at.desc(), gallery_images::image_id.desc()))
        .select(GalleryRow::as_select())
        .load(conn)?;
    Ok(rows
        .into_iter()
        .map(|row| GalleryImageData {
            image_id: row.image_id,
            title: row.title,
            image_url: row.image_url,
            category: row.category,
            created_at: row.created_at,
        })
        .collect())
}
