//! Shared application state for all routes.

use crate::store::ParkStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub parks: Arc<dyn ParkStore>,
}

impl AppState {
    pub fn new(parks: Arc<dyn ParkStore>) -> Self {
        AppState { parks }
    }
}
