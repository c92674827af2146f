//! In-memory `ParkStore` for tests and local runs without a database.

use super::ParkStore;
use crate::error::AppError;
use crate::model::{Park, ParkFilter, ParkInput};
use crate::seed::seed_parks;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct MemoryParkStore {
    data: Arc<RwLock<MemoryData>>,
}

#[derive(Default)]
struct MemoryData {
    parks: BTreeMap<i32, Park>,
    last_id: i32,
}

impl MemoryParkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the same rows the initial migration inserts.
    pub fn seeded() -> Self {
        let parks: BTreeMap<i32, Park> = seed_parks().into_iter().map(|p| (p.id, p)).collect();
        let last_id = parks.keys().next_back().copied().unwrap_or(0);
        MemoryParkStore {
            data: Arc::new(RwLock::new(MemoryData { parks, last_id })),
        }
    }

    pub async fn len(&self) -> usize {
        self.data.read().await.parks.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ParkStore for MemoryParkStore {
    async fn list(&self, filter: &ParkFilter) -> Result<Vec<Park>, AppError> {
        let data = self.data.read().await;
        Ok(data.parks.values().filter(|p| filter.matches(p)).cloned().collect())
    }

    async fn get(&self, id: i32) -> Result<Option<Park>, AppError> {
        Ok(self.data.read().await.parks.get(&id).cloned())
    }

    async fn insert(&self, input: &ParkInput) -> Result<Park, AppError> {
        let mut data = self.data.write().await;
        data.last_id += 1;
        let park = Park::from_input(data.last_id, 1, input);
        data.parks.insert(park.id, park.clone());
        Ok(park)
    }

    async fn current_version(&self, id: i32) -> Result<Option<i64>, AppError> {
        Ok(self.data.read().await.parks.get(&id).map(|p| p.version))
    }

    async fn update(&self, id: i32, input: &ParkInput, expected_version: i64) -> Result<bool, AppError> {
        let mut data = self.data.write().await;
        match data.parks.get_mut(&id) {
            Some(park) if park.version == expected_version => {
                *park = Park::from_input(id, expected_version + 1, input);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, AppError> {
        Ok(self.data.write().await.parks.remove(&id).is_some())
    }

    async fn exists(&self, id: i32) -> Result<bool, AppError> {
        Ok(self.data.read().await.parks.contains_key(&id))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
