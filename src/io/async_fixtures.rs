//! Asynchronous fixture loading
//!
//! Same file layout as [`crate::io::fixtures`], read with `tokio::fs` so the
//! async report strategy does not block its runtime's worker threads.
//! Accounts and transactions are read concurrently.

use crate::io::fixtures::{
    open_error, parse_accounts, parse_transactions, ACCOUNTS_FILE, TRANSACTIONS_FILE,
};
use crate::types::{Account, DashboardError, Transaction};
use std::path::PathBuf;
use tracing::debug;

/// Non-blocking fixture loader rooted at a data directory
#[derive(Debug, Clone)]
pub struct AsyncFixtureStore {
    dir: PathBuf,
}

impl AsyncFixtureStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    async fn read(&self, file: &str) -> Result<String, DashboardError> {
        let path = self.dir.join(file);
        debug!(path = %path.display(), "Reading fixture asynchronously");
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| open_error(&path, e))
    }

    pub async fn accounts(&self) -> Result<Vec<Account>, DashboardError> {
        parse_accounts(&self.read(ACCOUNTS_FILE).await?)
    }

    pub async fn transactions(&self) -> Result<Vec<Transaction>, DashboardError> {
        parse_transactions(&self.read(TRANSACTIONS_FILE).await?)
    }

    /// Load accounts and transactions together
    pub async fn ledger(&self) -> Result<(Vec<Account>, Vec<Transaction>), DashboardError> {
        futures::try_join!(self.accounts(), self.transactions())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_async_ledger_loads_both_files() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        fs::write(
            dir.path().join(ACCOUNTS_FILE),
            r#"{"accounts":[{"id":"acc_1","customerId":"cus_1","type":"savings",
                "currency":"USD","balance":10,"updatedAt":"2025-01-15T00:00:00Z"}]}"#,
        )
        .unwrap();
        fs::write(dir.path().join(TRANSACTIONS_FILE), r#"{"transactions":[]}"#).unwrap();

        let (accounts, transactions) = AsyncFixtureStore::new(dir.path()).ledger().await.unwrap();
        assert_eq!(accounts.len(), 1);
        assert!(transactions.is_empty());
    }

    #[tokio::test]
    async fn test_async_missing_file() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let err = AsyncFixtureStore::new(dir.path()).accounts().await.unwrap_err();
        assert!(err.to_string().contains("Failed to open file"));
    }
}
