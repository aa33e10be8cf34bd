//! Credit Ledger Repository
//!
//! Credit sales append entries against an account; repayments reduce the
//! account balance and settle pending entries oldest-first. All multi-row
//! movements run in one transaction.

use super::{RepoError, RepoResult};
use crate::utils::money::MONEY_TOLERANCE;
use shared::models::{
    CreditAccount, CreditEntry, CreditEntryStatus, CreditPayment, CreditPaymentCreate,
};
use shared::snowflake_id;
use sqlx::SqlitePool;

const ACCOUNT_SELECT: &str = "SELECT id, customer_name, whatsapp_number, current_balance, created_at, updated_at FROM credit_accounts";

const ENTRY_SELECT: &str = "SELECT id, account_id, booking_id, opening_balance, credit_issued, non_credit_paid, remaining_credit, status, issued_at, last_activity_at FROM credit_entries";

const PAYMENT_SELECT: &str =
    "SELECT id, account_id, amount, payment_method, notes, paid_at FROM credit_payments";

pub async fn find_accounts(pool: &SqlitePool) -> RepoResult<Vec<CreditAccount>> {
    let sql = format!("{} ORDER BY updated_at DESC", ACCOUNT_SELECT);
    let rows = sqlx::query_as::<_, CreditAccount>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_account(pool: &SqlitePool, id: i64) -> RepoResult<Option<CreditAccount>> {
    let sql = format!("{} WHERE id = ?", ACCOUNT_SELECT);
    let row = sqlx::query_as::<_, CreditAccount>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_account_by_whatsapp(
    pool: &SqlitePool,
    whatsapp_number: &str,
) -> RepoResult<Option<CreditAccount>> {
    let sql = format!("{} WHERE whatsapp_number = ?", ACCOUNT_SELECT);
    let row = sqlx::query_as::<_, CreditAccount>(&sql)
        .bind(whatsapp_number)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_entries(pool: &SqlitePool, account_id: i64) -> RepoResult<Vec<CreditEntry>> {
    let sql = format!(
        "{} WHERE account_id = ? ORDER BY issued_at DESC",
        ENTRY_SELECT
    );
    let rows = sqlx::query_as::<_, CreditEntry>(&sql)
        .bind(account_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_entry(pool: &SqlitePool, id: i64) -> RepoResult<Option<CreditEntry>> {
    let sql = format!("{} WHERE id = ?", ENTRY_SELECT);
    let row = sqlx::query_as::<_, CreditEntry>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_payments(pool: &SqlitePool, account_id: i64) -> RepoResult<Vec<CreditPayment>> {
    let sql = format!("{} WHERE account_id = ? ORDER BY paid_at DESC", PAYMENT_SELECT);
    let rows = sqlx::query_as::<_, CreditPayment>(&sql)
        .bind(account_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Put part of a bill on credit. Finds or opens the account for the
/// WhatsApp number, bumps its balance and appends the sale entry, all in
/// one transaction.
pub async fn issue_credit(
    pool: &SqlitePool,
    customer_name: &str,
    whatsapp_number: &str,
    booking_id: i64,
    credit_amount: f64,
    non_credit_paid: f64,
    now: i64,
) -> RepoResult<(CreditAccount, CreditEntry)> {
    let mut tx = pool.begin().await?;

    let account_sql = format!("{} WHERE whatsapp_number = ?", ACCOUNT_SELECT);
    let existing = sqlx::query_as::<_, CreditAccount>(&account_sql)
        .bind(whatsapp_number)
        .fetch_optional(&mut *tx)
        .await?;

    let (account_id, opening_balance) = match existing {
        Some(account) => (account.id, account.current_balance),
        None => {
            let id = snowflake_id();
            sqlx::query(
                "INSERT INTO credit_accounts (id, customer_name, whatsapp_number, current_balance, created_at, updated_at) VALUES (?, ?, ?, 0, ?, ?)",
            )
            .bind(id)
            .bind(customer_name)
            .bind(whatsapp_number)
            .bind(now)
            .bind(now)
            .execute(&mut *tx)
            .await?;
            (id, 0.0)
        }
    };

    sqlx::query(
        "UPDATE credit_accounts SET current_balance = current_balance + ?1, updated_at = ?2 WHERE id = ?3",
    )
    .bind(credit_amount)
    .bind(now)
    .bind(account_id)
    .execute(&mut *tx)
    .await?;

    let entry_id = snowflake_id();
    sqlx::query(
        "INSERT INTO credit_entries (id, account_id, booking_id, opening_balance, credit_issued, non_credit_paid, remaining_credit, status, issued_at, last_activity_at) VALUES (?, ?, ?, ?, ?, ?, ?, 'pending', ?, ?)",
    )
    .bind(entry_id)
    .bind(account_id)
    .bind(booking_id)
    .bind(opening_balance)
    .bind(credit_amount)
    .bind(non_credit_paid)
    .bind(credit_amount)
    .bind(now)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    let account = find_account(pool, account_id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to open credit account".into()))?;
    let entry = find_entry(pool, entry_id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to record credit entry".into()))?;
    Ok((account, entry))
}

/// Record a repayment: debit the account, log the payment, then settle
/// pending entries oldest-first until the amount runs out.
pub async fn record_payment(
    pool: &SqlitePool,
    account_id: i64,
    data: CreditPaymentCreate,
    now: i64,
) -> RepoResult<CreditAccount> {
    let mut tx = pool.begin().await?;

    let debited = sqlx::query(
        "UPDATE credit_accounts SET current_balance = MAX(current_balance - ?1, 0), updated_at = ?2 WHERE id = ?3 AND current_balance + ?4 >= ?1",
    )
    .bind(data.amount)
    .bind(now)
    .bind(account_id)
    .bind(MONEY_TOLERANCE)
    .execute(&mut *tx)
    .await?
    .rows_affected();
    if debited == 0 {
        tx.rollback().await?;
        return Err(RepoError::Validation(
            "Payment exceeds the outstanding balance".into(),
        ));
    }

    sqlx::query(
        "INSERT INTO credit_payments (id, account_id, amount, payment_method, notes, paid_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(snowflake_id())
    .bind(account_id)
    .bind(data.amount)
    .bind(&data.payment_method)
    .bind(&data.notes)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    let pending_sql = format!(
        "{} WHERE account_id = ? AND status = 'pending' ORDER BY issued_at",
        ENTRY_SELECT
    );
    let pending = sqlx::query_as::<_, CreditEntry>(&pending_sql)
        .bind(account_id)
        .fetch_all(&mut *tx)
        .await?;

    let mut left = data.amount;
    for entry in pending {
        if left <= MONEY_TOLERANCE {
            break;
        }
        let take = left.min(entry.remaining_credit);
        let remaining = entry.remaining_credit - take;
        let settled = remaining <= MONEY_TOLERANCE;
        sqlx::query(
            "UPDATE credit_entries SET remaining_credit = ?1, status = ?2, last_activity_at = ?3 WHERE id = ?4",
        )
        .bind(if settled { 0.0 } else { remaining })
        .bind(if settled {
            CreditEntryStatus::Paid
        } else {
            CreditEntryStatus::Pending
        })
        .bind(now)
        .bind(entry.id)
        .execute(&mut *tx)
        .await?;
        left -= take;
    }

    tx.commit().await?;

    find_account(pool, account_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Credit account {account_id} not found")))
}

/// Settle one entry by hand: zero its remainder and take the same amount
/// off the account balance.
pub async fn mark_entry_paid(pool: &SqlitePool, entry_id: i64, now: i64) -> RepoResult<CreditEntry> {
    let mut tx = pool.begin().await?;

    let entry_sql = format!("{} WHERE id = ?", ENTRY_SELECT);
    let entry = sqlx::query_as::<_, CreditEntry>(&entry_sql)
        .bind(entry_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Credit entry {entry_id} not found")))?;

    if entry.status == CreditEntryStatus::Paid {
        tx.rollback().await?;
        return Err(RepoError::Validation(
            "Credit entry has already been settled".into(),
        ));
    }

    sqlx::query(
        "UPDATE credit_accounts SET current_balance = MAX(current_balance - ?1, 0), updated_at = ?2 WHERE id = ?3",
    )
    .bind(entry.remaining_credit)
    .bind(now)
    .bind(entry.account_id)
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        "UPDATE credit_entries SET remaining_credit = 0, status = 'paid', last_activity_at = ?1 WHERE id = ?2",
    )
    .bind(now)
    .bind(entry_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    find_entry(pool, entry_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Credit entry {entry_id} not found")))
}
