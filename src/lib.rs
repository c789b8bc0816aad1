//! Talent Profile Server Library
//!
//! HTTP API for a talent-profile application: registration, login, profile
//! and video management behind an API-key gate. Exposed as a library so the
//! router can be driven directly in tests.

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod security;

pub use config::Config;
pub use db::{open_database, Db};
pub use error::{AppError, Result};

use axum::{
    http::{header, HeaderValue, Method},
    routing::{any, get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use routes::{
    create_talent, create_videos, health_check, list_talents, list_videos, login,
    login_method_not_allowed, method_not_allowed, register_user, update_password, update_user,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Db,
    pub config: Config,
}

impl AppState {
    /// Create a new AppState with the given database and configuration
    pub fn new(db: Db, config: Config) -> Self {
        Self { db, config }
    }
}

/// Build the application router with all routes and layers
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config);
    let log_requests = state.config.log_requests;

    let router = Router::new()
        .route("/health", get(health_check))
        .route(
            "/api/register",
            post(register_user).fallback(method_not_allowed),
        )
        .route("/api/login", post(login).fallback(login_method_not_allowed))
        .route(
            "/api/update-user",
            put(update_user).fallback(method_not_allowed),
        )
        .route(
            "/api/update-password",
            put(update_password).fallback(method_not_allowed),
        )
        .route("/api/create-talent", any(create_talent))
        .route(
            "/api/create-video",
            post(create_videos).fallback(method_not_allowed),
        )
        .route(
            "/api/talents",
            get(list_talents).fallback(method_not_allowed),
        )
        .route("/api/videos", get(list_videos).fallback(method_not_allowed))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(cors);

    let router = if log_requests {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    };

    router.with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers(Any);

    if config.allows_any_origin() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    cors.allow_origin(origins)
}
