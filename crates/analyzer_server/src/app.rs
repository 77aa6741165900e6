use std::sync::Arc;

use analyzer_observability::http_request_span;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderValue, Request};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::{ServerConfig, Variant};
use crate::routes;
use crate::state::AppState;

/// CORS policy: the report variant is open, the structured variant only
/// answers the configured origins. Requests without `Origin` are unaffected.
pub fn cors_layer(config: &ServerConfig) -> CorsLayer {
    match config.variant {
        Variant::Report => CorsLayer::permissive(),
        Variant::Structured => {
            let origins: Vec<HeaderValue> = config
                .allowed_origins
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!(origin = %origin, "Ignoring invalid allowed origin");
                        None
                    }
                })
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// Full application: routes for the configured variant, tracing, CORS.
pub fn build_app(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config);

    routes::api_router(state.config.variant)
        .layer(TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
            http_request_span!(req.method().as_str(), req.uri().path())
        }))
        .layer(cors)
        .with_state(state)
}
