use crate::models::AppData;
use crate::storage::JsonStore;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub store: JsonStore,
    pub data: Arc<Mutex<AppData>>,
}

impl AppState {
    pub fn new(store: JsonStore, data: AppData) -> Self {
        Self {
            store,
            data: Arc::new(Mutex::new(data)),
        }
    }
}
