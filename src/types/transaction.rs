//! Transaction-related types for the Rust Dashboard Engine
//!
//! This module defines the transaction record, its kind, and the lookback
//! windows accepted by the transactions listing.

use super::account::AccountId;
use super::error::DashboardError;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Transaction identifier (e.g. `txn_0042`)
pub type TransactionId = String;

/// Direction of a transaction's balance effect
///
/// The stored amount is a positive magnitude; the kind alone decides whether
/// it raises or lowers the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money leaving the account
    Debit,

    /// Money entering the account
    Credit,
}

/// A single posted transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique transaction identifier
    pub id: TransactionId,

    /// Account the transaction was posted to
    pub account_id: AccountId,

    /// Positive magnitude of the transaction
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub amount: Decimal,

    /// Posting instant
    pub date: DateTime<Utc>,

    /// Free-text description shown in the UI
    #[serde(default)]
    pub description: String,

    /// Spending category
    #[serde(default)]
    pub category: String,

    /// Debit or credit
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

impl Transaction {
    /// Balance effect of this transaction when applied forward in time
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionKind::Credit => self.amount.abs(),
            TransactionKind::Debit => -self.amount.abs(),
        }
    }
}

/// Lookback window accepted by the transactions listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionWindow {
    /// Last 5 days
    FiveDays,

    /// Last 30 days
    OneMonth,
}

impl TransactionWindow {
    /// Length of the window
    pub fn duration(self) -> Duration {
        match self {
            TransactionWindow::FiveDays => Duration::days(5),
            TransactionWindow::OneMonth => Duration::days(30),
        }
    }

    /// Whether a transaction posted at `date` falls inside the window ending at `now`
    pub fn contains(self, date: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        date >= now - self.duration()
    }
}

impl FromStr for TransactionWindow {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "5d" => Ok(TransactionWindow::FiveDays),
            "1m" => Ok(TransactionWindow::OneMonth),
            other => Err(DashboardError::invalid_window(other)),
        }
    }
}

impl fmt::Display for TransactionWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionWindow::FiveDays => write!(f, "5d"),
            TransactionWindow::OneMonth => write!(f, "1m"),
        }
    }
}
