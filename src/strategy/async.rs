//! Asynchronous report strategy
//!
//! Multi-threaded implementation of [`ReportStrategy`].
//!
//! # Architecture
//!
//! ```text
//! AsyncReportStrategy
//!     ├── ReportConfig (max_concurrent worker threads)
//!     ├── AsyncFixtureStore (accounts + transactions read concurrently)
//!     ├── one tokio task per account, all ranges
//!     │     └── shared Arc<[Transaction]>, read-only
//!     └── DashMap<(account, range), points> collecting results
//! ```
//!
//! Reconstructions share no mutable state: the transaction list is immutable
//! and each task writes only its own keys. Results are sorted after all tasks
//! finish, so output matches the sync strategy exactly.

use crate::core::auth::authorize_resource_owner;
use crate::core::history::derive_balance_history;
use crate::io::AsyncFixtureStore;
use crate::strategy::{sort_report, ReportStrategy};
use crate::types::{
    AccountHistory, AccountId, AuthenticatedUser, BalanceHistoryPoint, DashboardError, DateRange,
    Transaction,
};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// Configuration for concurrent report generation
#[derive(Clone, Debug)]
pub struct ReportConfig {
    /// Number of runtime worker threads
    pub max_concurrent: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            max_concurrent: num_cpus::get(),
        }
    }
}

impl ReportConfig {
    /// Create a ReportConfig; zero falls back to the default with a warning
    pub fn new(max_concurrent: usize) -> Self {
        let default = Self::default();

        let max_concurrent = if max_concurrent == 0 {
            warn!(
                "Invalid max_concurrent ({}), using default ({})",
                max_concurrent, default.max_concurrent
            );
            default.max_concurrent
        } else {
            max_concurrent
        };

        Self { max_concurrent }
    }
}

type HistoryMap = DashMap<(AccountId, DateRange), Vec<BalanceHistoryPoint>>;

/// Asynchronous report strategy
#[derive(Debug, Clone)]
pub struct AsyncReportStrategy {
    config: ReportConfig,
}

impl AsyncReportStrategy {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }
}

impl ReportStrategy for AsyncReportStrategy {
    fn generate(
        &self,
        data_dir: &Path,
        user: &AuthenticatedUser,
        now: DateTime<Utc>,
    ) -> Result<Vec<AccountHistory>, DashboardError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent)
            .build()
            .map_err(|e| DashboardError::runtime(format!("Failed to create tokio runtime: {}", e)))?;

        runtime.block_on(async {
            let store = AsyncFixtureStore::new(data_dir);
            let (mut accounts, transactions) = store.ledger().await?;
            accounts.retain(|account| authorize_resource_owner(user, &account.customer_id));

            info!(
                accounts = accounts.len(),
                transactions = transactions.len(),
                workers = self.config.max_concurrent,
                "Generating report (async)"
            );

            let transactions: Arc<[Transaction]> = transactions.into();
            let results: Arc<HistoryMap> = Arc::new(DashMap::new());

            let tasks: Vec<_> = accounts
                .into_iter()
                .map(|account| {
                    let transactions = Arc::clone(&transactions);
                    let results = Arc::clone(&results);
                    tokio::spawn(async move {
                        for range in DateRange::ALL {
                            let points =
                                derive_balance_history(&account, &transactions, range, now)?;
                            results.insert((account.id.clone(), range), points);
                        }
                        Ok::<(), DashboardError>(())
                    })
                })
                .collect();

            for outcome in futures::future::join_all(tasks).await {
                outcome.map_err(|e| DashboardError::runtime(format!("History task failed: {}", e)))??;
            }

            let mut histories: Vec<AccountHistory> = results
                .iter()
                .map(|entry| {
                    let (account_id, range) = entry.key().clone();
                    AccountHistory {
                        account_id,
                        range,
                        points: entry.value().clone(),
                    }
                })
                .collect();

            sort_report(&mut histories);
            Ok(histories)
        })
    }
}
