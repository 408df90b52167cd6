use std::sync::Arc;

use crate::auth::IdentityProvider;
use crate::llm_client::LlmClient;
use crate::storage::AnalysisStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Resume and analysis storage. `PgStore` in production.
    pub store: Arc<dyn AnalysisStore>,
    /// Resolves bearer credentials. `JwtIdentityProvider` in production.
    pub identity: Arc<dyn IdentityProvider>,
    pub llm: LlmClient,
}
