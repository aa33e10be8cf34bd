//! Shared helpers for the server crate
//!
//! - [`AppError`] / [`ApiResponse`] come from `shared::error`
//! - [`logger`]: tracing setup with optional daily file rotation
//! - [`money`]: rupee arithmetic through `rust_decimal`
//! - [`time`]: business-timezone conversions for windows and sweeps
//! - [`validation`]: request text/amount guards

pub mod logger;
pub mod money;
pub mod time;
pub mod validation;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
