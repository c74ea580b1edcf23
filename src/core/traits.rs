//! Core traits for data access and caller authentication
//!
//! The request layer never reaches for a global client: a [`DataSource`] and an
//! [`Authenticator`] are passed into every handler, so fixture files, an
//! in-memory store, or a future database can be swapped in freely.

use crate::types::{Account, AuthenticatedUser, Customer, DashboardError, Message, Transaction};
use serde_json::Value;

/// Read access to dashboard records
///
/// Implementations load records fresh on every call; callers do not cache.
pub trait DataSource {
    /// All accounts, unfiltered
    fn accounts(&self) -> Result<Vec<Account>, DashboardError>;

    /// All transactions, unfiltered and in storage order
    fn transactions(&self) -> Result<Vec<Transaction>, DashboardError>;

    /// Inbox messages
    fn messages(&self) -> Result<Vec<Message>, DashboardError>;

    /// Customer profiles
    fn customers(&self) -> Result<Vec<Customer>, DashboardError>;

    /// Insights document, passed through untouched
    fn insights(&self) -> Result<Value, DashboardError>;

    /// Look up a single account by id
    fn account(&self, account_id: &str) -> Result<Account, DashboardError> {
        self.accounts()?
            .into_iter()
            .find(|account| account.id == account_id)
            .ok_or_else(|| DashboardError::account_not_found(account_id))
    }
}

/// Resolves bearer tokens to users
pub trait Authenticator {
    /// Resolve a raw bearer token (without the `Bearer ` prefix)
    ///
    /// Returns `None` when the token is unknown or expired.
    fn resolve(&self, token: &str) -> Option<AuthenticatedUser>;
}
