//! Shared application state.

use std::sync::Arc;

use shopbridge_store::Store;

use crate::chat::ChatService;

/// State shared across all request handlers.
///
/// Cheap to clone; axum clones it per request.
#[derive(Debug, Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

#[derive(Debug)]
struct AppStateInner {
    store: Store,
    chat: ChatService,
}

impl AppState {
    #[must_use]
    pub fn new(store: Store, chat: ChatService) -> Self {
        Self {
            inner: Arc::new(AppStateInner { store, chat }),
        }
    }

    #[must_use]
    pub fn store(&self) -> &Store {
        &self.inner.store
    }

    #[must_use]
    pub fn chat(&self) -> &ChatService {
        &self.inner.chat
    }
}
