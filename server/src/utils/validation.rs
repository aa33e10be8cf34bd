//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement, so handlers guard
//! request payloads here before anything touches the database.

use shared::error::{AppError, AppResult};

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: customers, food items, rewards, groups, expense categories.
pub const MAX_NAME_LEN: usize = 200;

/// Notes and descriptions (credit payment notes, reward descriptions, ...).
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone / WhatsApp numbers, duration labels, setting keys.
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Maximum rupee amount accepted on any single row.
pub const MAX_AMOUNT: f64 = 1_000_000.0;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(value: &Option<String>, field: &str, max_len: usize) -> AppResult<()> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Validate a rupee amount: finite, non-negative, below the sanity cap.
pub fn validate_money(value: f64, field: &str) -> AppResult<()> {
    if !value.is_finite() {
        return Err(AppError::validation(format!(
            "{field} must be a finite number"
        )));
    }
    if value < 0.0 {
        return Err(AppError::validation(format!(
            "{field} must be non-negative, got {value}"
        )));
    }
    if value > MAX_AMOUNT {
        return Err(AppError::validation(format!(
            "{field} exceeds maximum allowed ({MAX_AMOUNT}), got {value}"
        )));
    }
    Ok(())
}

/// Validate a strictly positive rupee amount.
pub fn validate_positive_money(value: f64, field: &str) -> AppResult<()> {
    validate_money(value, field)?;
    if value <= 0.0 {
        return Err(AppError::validation(format!(
            "{field} must be positive, got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_rejects_blank_and_oversized() {
        assert!(validate_required_text("Ravi", "customer_name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("   ", "customer_name", MAX_NAME_LEN).is_err());
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(validate_required_text(&long, "customer_name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn money_guard_rejects_nan_negative_and_huge() {
        assert!(validate_money(150.0, "price").is_ok());
        assert!(validate_money(0.0, "price").is_ok());
        assert!(validate_money(f64::NAN, "price").is_err());
        assert!(validate_money(-1.0, "price").is_err());
        assert!(validate_money(MAX_AMOUNT + 1.0, "price").is_err());
        assert!(validate_positive_money(0.0, "amount").is_err());
    }
}
