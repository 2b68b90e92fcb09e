use actix_cors::Cors;

use crate::config::{AppConfig, CORS_METHODS};

/// CORS policy: configured origin plus the fixed frontend, credentials allowed.
/// Requested headers are reflected back on preflight.
pub fn build_cors(config: &AppConfig) -> Cors {
    config
        .allowed_origins()
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(CORS_METHODS)
        .allow_any_header()
        .supports_credentials()
}
