//! Park operations over any `ParkStore`.

use crate::error::AppError;
use crate::model::{Park, ParkFilter, ParkInput};
use crate::store::ParkStore;

pub struct ParkService;

impl ParkService {
    /// Rows matching every supplied substring filter. Unbounded.
    pub async fn list(store: &dyn ParkStore, filter: &ParkFilter) -> Result<Vec<Park>, AppError> {
        store.list(filter).await
    }

    pub async fn read(store: &dyn ParkStore, id: i32) -> Result<Park, AppError> {
        store
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("park {}", id)))
    }

    /// Insert one row; the store assigns the id. Returns the created row.
    pub async fn create(store: &dyn ParkStore, input: &ParkInput) -> Result<Park, AppError> {
        let park = store.insert(input).await?;
        tracing::info!(id = park.id, name = %park.name, "park created");
        Ok(park)
    }

    /// Whole-row overwrite guarded by the concurrency token.
    ///
    /// The body id must equal `id`. The expected version is the body's `version` when
    /// supplied, otherwise the one currently stored. A write that matches no row is
    /// classified as not-found when the row is gone and as a concurrency conflict otherwise.
    pub async fn replace(store: &dyn ParkStore, id: i32, input: &ParkInput) -> Result<(), AppError> {
        if input.id != Some(id) {
            return Err(AppError::BadRequest(format!(
                "body id {} does not match path id {}",
                input.id.map_or_else(|| "(missing)".to_string(), |i| i.to_string()),
                id
            )));
        }
        let expected_version = match input.version {
            Some(v) => v,
            None => store
                .current_version(id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("park {}", id)))?,
        };
        if store.update(id, input, expected_version).await? {
            return Ok(());
        }
        if !store.exists(id).await? {
            return Err(AppError::NotFound(format!("park {}", id)));
        }
        tracing::warn!(id, expected_version, "park changed since it was read");
        Err(AppError::Concurrency { id })
    }

    pub async fn delete(store: &dyn ParkStore, id: i32) -> Result<(), AppError> {
        if !store.delete(id).await? {
            return Err(AppError::NotFound(format!("park {}", id)));
        }
        tracing::info!(id, "park deleted");
        Ok(())
    }
}
