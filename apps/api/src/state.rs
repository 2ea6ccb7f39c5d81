use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::ContentGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable content generator. Production: `LlmClient`; tests swap in a stub.
    pub generator: Arc<dyn ContentGenerator>,
    pub config: Config,
}
