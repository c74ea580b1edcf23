//! Rust Dashboard Engine Library
//! # Overview
//!
//! Read-only backend for a personal-finance dashboard. Its core reconstructs
//! historical balance series from an account's current balance and its
//! transaction log; around it sit a request layer with bearer-token
//! authentication and role permissions, JSON fixture loading, and a
//! multi-account report available as a sync and an async strategy.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (Account, Transaction, DateRange, etc.)
//! - [`core`] - Business logic components:
//!   - [`core::buckets`] - Bucket boundaries for each range
//!   - [`core::history`] - Reverse-replay balance reconstruction
//!   - [`core::auth`] - Authentication, permission table and ownership checks
//!   - [`core::traits`] - `DataSource` and `Authenticator` seams
//! - [`api`] - Routes, request/response model and typed read services
//! - [`io`] - Fixture loaders and CSV output
//! - [`strategy`] - Sync and async report generation
//! - [`cli`] - CLI arguments parsing and command dispatch
//!
//! # Reconstruction
//!
//! Given a range, the engine lays out bucket end instants (end of a UTC day,
//! or end of a calendar month for `1y`), then walks transactions newest
//! first, undoing every transaction dated strictly after each bucket end.
//! A transaction exactly at a bucket end still counts toward that bucket.
//!
//! | range | points | spacing |
//! |-------|--------|---------|
//! | `1m`  | 30     | 1 day   |
//! | `3m`  | 13     | 7 days  |
//! | `6m`  | 13     | 14 days |
//! | `1y`  | 12     | 1 month |
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use rust_dashboard_engine::core::derive_balance_history;
//! use rust_dashboard_engine::types::{Account, DateRange};
//! use rust_decimal::Decimal;
//!
//! let now = Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap();
//! let account = Account {
//!     id: "acc_1".into(),
//!     customer_id: "cus_1".into(),
//!     account_type: "checking".into(),
//!     nickname: String::new(),
//!     currency: "USD".into(),
//!     balance: Decimal::new(100000, 2),
//!     updated_at: now,
//! };
//!
//! let points = derive_balance_history(&account, &[], DateRange::OneMonth, now).unwrap();
//! assert_eq!(points.len(), 30);
//! assert!(points.iter().all(|p| p.balance == account.balance));
//! ```

// Module declarations
pub mod api;
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use api::{Api, ApiRequest, ApiResponse, Route};
pub use crate::core::{derive_balance_history, generate_buckets};
pub use io::{write_history_csv, FixtureStore};
pub use types::{
    Account, AccountHistory, BalanceHistoryPoint, DashboardError, DateRange, Transaction,
    TransactionKind,
};
