//! Balance-history reconstruction
//!
//! This module derives past balances of a single account by reverse replay:
//! start from the current balance and undo transactions newest-first while
//! walking bucket boundaries from newest to oldest.
//!
//! # Algorithm
//!
//! 1. Keep the account's transactions and sort them newest first
//! 2. Start the running balance at the account's current balance
//! 3. For each boundary (newest to oldest), undo every transaction whose
//!    timestamp is strictly later than the boundary, then record the point
//! 4. Emit points oldest first
//!
//! Both sequences are descending, so one cursor visits each transaction at
//! most once for the whole pass: the cost is linear in the number of
//! transactions regardless of how many buckets are requested.
//!
//! # Boundary Convention
//!
//! A transaction stamped exactly at a boundary is *not* undone for that
//! boundary; the recorded balance already includes it. It is undone before the
//! next older boundary is recorded.

use crate::core::buckets::generate_buckets;
use crate::types::{Account, BalanceHistoryPoint, DashboardError, DateRange, Transaction};
use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

/// Decimal places kept in recorded balances
const BALANCE_SCALE: u32 = 2;

/// Reconstruct the balance history of `account` for `range`
///
/// Transactions belonging to other accounts are ignored, so callers can pass
/// the unfiltered transaction list.
///
/// # Arguments
///
/// * `account` - Account whose current balance anchors the replay
/// * `transactions` - Transaction list (any order, any accounts)
/// * `range` - Validated range selector
/// * `now` - Reference instant for bucket generation
///
/// # Returns
///
/// * `Ok(Vec<BalanceHistoryPoint>)` - One point per bucket, oldest first
/// * `Err(DashboardError::DateOutOfRange)` - Only when bucket arithmetic overflows
/// * `Err(DashboardError::BalanceOverflow)` - Undoing a transaction leaves Decimal's range
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use rust_dashboard_engine::core::derive_balance_history;
/// use rust_dashboard_engine::types::{Account, DateRange};
/// use rust_decimal::Decimal;
///
/// let now = Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap();
/// let account = Account {
///     id: "acc_1".into(),
///     customer_id: "cus_1".into(),
///     account_type: "checking".into(),
///     nickname: String::new(),
///     currency: "USD".into(),
///     balance: Decimal::new(100000, 2),
///     updated_at: now,
/// };
///
/// let points = derive_balance_history(&account, &[], DateRange::OneYear, now).unwrap();
/// assert_eq!(points.len(), 12);
/// assert!(points.iter().all(|p| p.balance == account.balance));
/// ```
pub fn derive_balance_history(
    account: &Account,
    transactions: &[Transaction],
    range: DateRange,
    now: DateTime<Utc>,
) -> Result<Vec<BalanceHistoryPoint>, DashboardError> {
    let buckets = generate_buckets(range, now)?;

    let mut account_txns: Vec<&Transaction> = transactions
        .iter()
        .filter(|txn| txn.account_id == account.id)
        .collect();
    account_txns.sort_by(|a, b| b.date.cmp(&a.date));

    let mut running_balance = account.balance;
    let mut cursor = account_txns.iter().peekable();
    let mut points = Vec::with_capacity(buckets.len());

    for bucket_end in buckets.into_iter().rev() {
        while let Some(txn) = cursor.next_if(|txn| txn.date > bucket_end) {
            // Undo: a credit raised the balance, a debit lowered it
            running_balance = running_balance
                .checked_sub(txn.signed_amount())
                .ok_or_else(|| DashboardError::balance_overflow(&account.id))?;
        }

        points.push(BalanceHistoryPoint {
            date: bucket_end,
            balance: round_balance(running_balance),
        });
    }

    points.reverse();

    debug!(
        account_id = %account.id,
        range = %range,
        transactions = account_txns.len(),
        points = points.len(),
        "Derived balance history"
    );

    Ok(points)
}

/// Round to cents, halves away from zero
fn round_balance(balance: Decimal) -> Decimal {
    balance.round_dp_with_strategy(BALANCE_SCALE, RoundingStrategy::MidpointAwayFromZero)
}
