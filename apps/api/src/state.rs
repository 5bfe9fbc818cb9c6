use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::TokenVerifier;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Pluggable token verifier. Default: local HS256 against the shared
    /// secret; a remote introspection backend can be swapped in here.
    pub verifier: Arc<dyn TokenVerifier>,
}
