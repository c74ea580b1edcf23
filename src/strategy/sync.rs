//! Synchronous report strategy
//!
//! Single-threaded implementation of [`ReportStrategy`]: fixtures are read
//! with blocking I/O through [`FixtureStore`] and each (account, range)
//! history is derived in turn.

use crate::api::service::visible_accounts;
use crate::core::history::derive_balance_history;
use crate::core::traits::DataSource;
use crate::io::FixtureStore;
use crate::strategy::{sort_report, ReportStrategy};
use crate::types::{AccountHistory, AuthenticatedUser, DashboardError, DateRange};
use chrono::{DateTime, Utc};
use std::path::Path;
use tracing::info;

/// Synchronous report strategy
///
/// # Examples
///
/// ```no_run
/// use chrono::Utc;
/// use rust_dashboard_engine::strategy::{ReportStrategy, SyncReportStrategy};
/// use rust_dashboard_engine::types::{AuthenticatedUser, Role};
/// use std::path::Path;
///
/// let admin = AuthenticatedUser { id: "admin".into(), email: None, role: Role::Admin };
/// let report = SyncReportStrategy
///     .generate(Path::new("data"), &admin, Utc::now())
///     .expect("Report failed");
/// println!("{} histories", report.len());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncReportStrategy;

impl ReportStrategy for SyncReportStrategy {
    fn generate(
        &self,
        data_dir: &Path,
        user: &AuthenticatedUser,
        now: DateTime<Utc>,
    ) -> Result<Vec<AccountHistory>, DashboardError> {
        let store = FixtureStore::new(data_dir);
        let accounts = visible_accounts(&store, user)?;
        let transactions = store.transactions()?;

        info!(
            accounts = accounts.len(),
            transactions = transactions.len(),
            "Generating report (sync)"
        );

        let mut histories = Vec::with_capacity(accounts.len() * DateRange::ALL.len());
        for account in &accounts {
            for range in DateRange::ALL {
                histories.push(AccountHistory {
                    account_id: account.id.clone(),
                    range,
                    points: derive_balance_history(account, &transactions, range, now)?,
                });
            }
        }

        sort_report(&mut histories);
        Ok(histories)
    }
}
