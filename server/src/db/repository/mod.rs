//! Repository Module
//!
//! One file per table family; all functions are free functions over
//! `&SqlitePool` with plain SQL strings and positional binds. Domain-level
//! error codes (seat conflicts, promotion validity, point balances) are the
//! service layer's job; repositories only report generic outcomes.

pub mod booking;
pub mod credit;
pub mod device;
pub mod expense;
pub mod food_item;
pub mod group;
pub mod history;
pub mod loyalty;
pub mod pricing;
pub mod promotion;
pub mod settings;

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::Duplicate(db.message().to_string())
            }
            sqlx::Error::RowNotFound => RepoError::NotFound("Row not found".into()),
            _ => RepoError::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(err: serde_json::Error) -> Self {
        RepoError::Database(format!("JSON column error: {err}"))
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::with_message(ErrorCode::NotFound, msg),
            RepoError::Duplicate(msg) => AppError::with_message(ErrorCode::AlreadyExists, msg),
            RepoError::Validation(msg) => {
                AppError::with_message(ErrorCode::ValidationFailed, msg)
            }
            RepoError::Database(msg) => {
                tracing::error!(error = %msg, "Repository database error");
                AppError::new(ErrorCode::DatabaseError)
            }
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
