//! Shared application state for all routes.

use crate::service::RecordStore;

#[derive(Clone)]
pub struct AppState {
    pub store: RecordStore,
}

impl AppState {
    pub fn new(store: RecordStore) -> Self {
        AppState { store }
    }
}
