//! Shared application state.

use std::sync::Arc;

use crate::requests::Analytics;

#[derive(Clone)]
pub struct AppState {
    pub analytics: Arc<Analytics>,
    pub api_key: Arc<str>,
}

impl AppState {
    pub fn new(api_key: impl Into<Arc<str>>) -> Self {
        Self {
            analytics: Arc::new(Analytics::new()),
            api_key: api_key.into(),
        }
    }
}
