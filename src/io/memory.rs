//! In-memory data source
//!
//! Holds already-loaded records. Used by the benchmarks and tests, and by
//! callers that load data themselves.

use crate::core::traits::DataSource;
use crate::types::{Account, Customer, DashboardError, Message, Transaction};
use serde_json::Value;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub accounts: Vec<Account>,
    pub transactions: Vec<Transaction>,
    pub messages: Vec<Message>,
    pub customers: Vec<Customer>,
    pub insights: Value,
}

impl MemoryStore {
    pub fn new(accounts: Vec<Account>, transactions: Vec<Transaction>) -> Self {
        Self {
            accounts,
            transactions,
            ..Self::default()
        }
    }
}

impl DataSource for MemoryStore {
    fn accounts(&self) -> Result<Vec<Account>, DashboardError> {
        Ok(self.accounts.clone())
    }

    fn transactions(&self) -> Result<Vec<Transaction>, DashboardError> {
        Ok(self.transactions.clone())
    }

    fn messages(&self) -> Result<Vec<Message>, DashboardError> {
        Ok(self.messages.clone())
    }

    fn customers(&self) -> Result<Vec<Customer>, DashboardError> {
        Ok(self.customers.clone())
    }

    fn insights(&self) -> Result<Value, DashboardError> {
        Ok(self.insights.clone())
    }
}
