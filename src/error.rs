use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::constants::{
    ERR_INTERNAL, ERR_INVALID_BODY, ERR_INVALID_CREDENTIALS, ERR_METHOD_NOT_ALLOWED,
    ERR_UNAUTHORIZED,
};

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] redb::Error),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::error::EncodeError),

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] bincode::error::DecodeError),

    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] argon2::password_hash::Error),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Account not found")]
    AccountNotFound,

    #[error("Talent not found")]
    TalentNotFound,

    #[error("Email already registered")]
    EmailTaken,
}

impl AppError {
    /// Map the error to its HTTP status and client-facing message.
    ///
    /// Store and runtime failures are logged here and collapsed into an
    /// opaque 500 so internals never reach the caller.
    pub fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::Database(e) => internal("Database error", e),
            AppError::Transaction(e) => internal("Transaction error", e),
            AppError::Table(e) => internal("Table error", e),
            AppError::Storage(e) => internal("Storage error", e),
            AppError::Commit(e) => internal("Commit error", e),
            AppError::Serialization(e) => internal("Serialization error", e),
            AppError::Deserialization(e) => internal("Deserialization error", e),
            AppError::TaskJoin(e) => internal("Task join error", e),
            AppError::PasswordHash(e) => internal("Password hashing error", e),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, ERR_UNAUTHORIZED.to_string()),
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                ERR_METHOD_NOT_ALLOWED.to_string(),
            ),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, ERR_INVALID_CREDENTIALS.to_string())
            }
            AppError::UserNotFound => (StatusCode::NOT_FOUND, "User not found".to_string()),
            AppError::AccountNotFound => (StatusCode::NOT_FOUND, "Account not found".to_string()),
            AppError::TalentNotFound => (StatusCode::NOT_FOUND, "Talent not found".to_string()),
            AppError::EmailTaken => (StatusCode::CONFLICT, "Email already registered".to_string()),
        }
    }

    /// Response variant used by the login endpoint, which flags every
    /// failure with `isLogin: false`.
    pub fn into_login_response(self) -> Response {
        let (status, message) = self.status_and_message();
        let body = Json(json!({
            "message": message,
            "isLogin": false
        }));

        (status, body).into_response()
    }
}

fn internal(kind: &str, err: &dyn std::fmt::Debug) -> (StatusCode, String) {
    tracing::error!("{}: {:?}", kind, err);
    (StatusCode::INTERNAL_SERVER_ERROR, ERR_INTERNAL.to_string())
}

/// Malformed, mistyped or non-JSON bodies all become a plain 400; the
/// rejection detail stays in the logs.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        AppError::InvalidInput(ERR_INVALID_BODY.to_string())
    }
}

/// Implement IntoResponse to convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        let body = Json(json!({
            "message": message
        }));

        (status, body).into_response()
    }
}

/// Result type alias for application results
pub type Result<T> = std::result::Result<T, AppError>;
