use bursar_config::{CorsConfig, JwtConfig};
use bursar_db::AnyStore;

/// Shared, immutable per-process state. Cloned into every request.
#[derive(Clone, Debug)]
pub struct AppState {
    pub store: AnyStore,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(store: impl Into<AnyStore>, jwt_config: JwtConfig, cors_config: CorsConfig) -> Self {
        Self {
            store: store.into(),
            jwt_config,
            cors_config,
        }
    }
}
