// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::diesel_schema::gallery_images;
use crate::error::PersistenceError;

/// Deletes a gallery image.
///
/// # Errors
///
/// Returns `PersistenceError::GalleryImageNotFound` if no row was deleted.
pub fn delete_gallery_image(
    conn: &mut SqliteConnection,
    image_id: i64,
) -> Result<(), PersistenceError> {
    let deleted: usize =
        diesel::delete(gallery_images::table.find(image_id)).execute(conn)?;
    if deleted == 0 {
        return Err(PersistenceError::GalleryImageNotFound(image_id));
    }
    info!(image_id, "Deleted gallery image");
    Ok(())
}
