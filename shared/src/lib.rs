//! Shared types for the arcade booking system
//!
//! Common types used across crates: domain models, unified error
//! codes, response structures, and id/time utilities.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use util::{generate_code, now_millis, snowflake_id};
