//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account records
//! - `transaction`: Transactions, their kind and lookback windows
//! - `history`: Range selectors and balance-history points
//! - `message`: Inbox messages and customer profiles
//! - `user`: Caller identity, roles and permissions
//! - `error`: Error types for the dashboard engine

pub mod account;
pub mod error;
pub mod history;
pub mod message;
pub mod transaction;
pub mod user;

pub use account::{Account, AccountId, CustomerId};
pub use error::DashboardError;
pub use history::{format_instant, AccountHistory, BalanceHistoryPoint, BucketSpacing, DateRange};
pub use message::{Customer, Message, MessageIcon, MessageKind};
pub use transaction::{Transaction, TransactionId, TransactionKind, TransactionWindow};
pub use user::{AuthenticatedUser, Permission, Role};
