use std::sync::Arc;

use crate::llm_client::ModelTransport;
use crate::manuscript::store::LocalStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The only way out to the model. `GeminiClient` in production.
    pub llm: Arc<dyn ModelTransport>,
    /// Chapters and the saved API key.
    pub store: Arc<LocalStore>,
}
