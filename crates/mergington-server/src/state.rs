use mergington_core::ActivityStore;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: ActivityStore,
}

impl AppState {
    pub fn new(store: ActivityStore) -> Self {
        Self { store }
    }
}
