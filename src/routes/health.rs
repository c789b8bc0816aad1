use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::db;
use crate::AppState;

/// Health check endpoint
///
/// Reads the user, talent and video tables in one transaction. Any failure
/// there reports the store as disconnected; counts are only present when
/// the read succeeded.
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let db = state.db.clone();
    let counts = match tokio::task::spawn_blocking(move || db::table_counts(&db)).await {
        Ok(Ok(counts)) => Some(counts),
        Ok(Err(e)) => {
            tracing::error!("Database health check failed: {:?}", e);
            None
        }
        Err(e) => {
            tracing::error!("Health check task failed: {:?}", e);
            None
        }
    };

    let body = match counts {
        Some(counts) => json!({
            "status": "healthy",
            "database": "connected",
            "users": counts.users,
            "talents": counts.talents,
            "videos": counts.videos,
            "version": env!("CARGO_PKG_VERSION"),
        }),
        None => json!({
            "status": "unhealthy",
            "database": "disconnected",
            "version": env!("CARGO_PKG_VERSION"),
        }),
    };
    Json(body)
}
