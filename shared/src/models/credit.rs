//! Credit Ledger Model
//!
//! Regulars can take sessions on credit. Each account tracks a running
//! balance; every credit sale appends an entry snapshotting the balance
//! movement, and repayments are recorded against the account.

use serde::{Deserialize, Serialize};

/// Credit account entity, keyed by WhatsApp number
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CreditAccount {
    pub id: i64,
    pub customer_name: String,
    pub whatsapp_number: String,
    /// Outstanding amount the customer owes
    pub current_balance: f64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Settlement state of one credit entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum CreditEntryStatus {
    Pending,
    Paid,
}

/// One credit sale against an account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CreditEntry {
    pub id: i64,
    pub account_id: i64,
    pub booking_id: i64,
    /// Account balance before this sale
    pub opening_balance: f64,
    /// Amount put on credit by this sale
    pub credit_issued: f64,
    /// Portion of the bill paid on the spot (cash/UPI)
    pub non_credit_paid: f64,
    /// Unsettled portion of this entry, reduced by repayments
    pub remaining_credit: f64,
    pub status: CreditEntryStatus,
    pub issued_at: i64,
    pub last_activity_at: i64,
}

/// A repayment against an account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CreditPayment {
    pub id: i64,
    pub account_id: i64,
    pub amount: f64,
    /// cash or upi_online; credit cannot pay off credit
    pub payment_method: String,
    pub notes: Option<String>,
    pub paid_at: i64,
}

/// Record a repayment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditPaymentCreate {
    /// Must be positive and no more than the outstanding balance
    pub amount: f64,
    pub payment_method: String,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_status_wire_values() {
        assert_eq!(
            serde_json::to_string(&CreditEntryStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&CreditEntryStatus::Paid).unwrap(),
            "\"paid\""
        );
    }
}
