use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{ACCESS_CONTROL_ALLOW_HEADERS, AUTHORIZATION, CONTENT_TYPE},
        HeaderName, HeaderValue, Method,
    },
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod handlers;
pub mod reflection;
pub mod summary;
pub mod upstream;

#[cfg(test)]
pub mod testing;

use reflection::ReflectionService;

/// Headers browsers may send on the reflect call
pub const ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// Shared, read-only handler state
#[derive(Clone)]
pub struct AppState {
    pub reflections: Arc<ReflectionService>,
}

impl AppState {
    pub fn new(reflections: ReflectionService) -> Self {
        Self {
            reflections: Arc::new(reflections),
        }
    }
}

pub fn app(state: AppState, max_request_size_bytes: usize) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        // Same handler under the hosted-functions path so existing clients keep working
        .route("/gentle-ai", post(handlers::reflect))
        .route("/functions/v1/gentle-ai", post(handlers::reflect))
        .route("/summaries/weekly", post(handlers::weekly_summary))
        .with_state(state)
        .layer(DefaultBodyLimit::max(max_request_size_bytes))
        .layer(cors())
        // Error responses carry the allowed headers too, not only preflights
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ))
        .layer(TraceLayer::new_for_http())
}

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            CONTENT_TYPE,
        ])
}
