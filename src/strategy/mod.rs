//! Report strategy module
//!
//! A report is the balance history of every account a user may read, for
//! every range. This module defines the Strategy pattern for producing it so
//! that a blocking, single-threaded implementation and a concurrent one can
//! be selected at runtime.

use crate::cli::StrategyType;
use crate::types::{AccountHistory, AuthenticatedUser, DashboardError};
use chrono::{DateTime, Utc};
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncReportStrategy, ReportConfig};
pub use sync::SyncReportStrategy;

/// Report strategy trait
///
/// Implementations load accounts and transactions from a fixture directory
/// and return one [`AccountHistory`] per (visible account, range) pair.
///
/// Output is sorted by account id, then by range (`1m`, `3m`, `6m`, `1y`), so
/// every strategy produces identical results for identical input.
pub trait ReportStrategy: Send + Sync {
    /// Build the report
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Directory holding `accounts.json` and `transactions.json`
    /// * `user` - Caller; non-admins only get their own accounts
    /// * `now` - Reference instant shared by every history in the report
    ///
    /// # Errors
    ///
    /// Returns an error if a fixture cannot be read or parsed, or if the
    /// async runtime cannot be started.
    fn generate(
        &self,
        data_dir: &Path,
        user: &AuthenticatedUser,
        now: DateTime<Utc>,
    ) -> Result<Vec<AccountHistory>, DashboardError>;
}

/// Create a report strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of strategy to create (Sync or Async)
/// * `config` - Optional configuration for the async strategy (ignored for sync)
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<ReportConfig>,
) -> Box<dyn ReportStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncReportStrategy),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncReportStrategy::new(config))
        }
    }
}

/// Sort histories into report order
pub(crate) fn sort_report(histories: &mut [AccountHistory]) {
    histories.sort_by(|a, b| {
        a.account_id
            .cmp(&b.account_id)
            .then_with(|| a.range.cmp(&b.range))
    });
}
