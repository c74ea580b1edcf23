//! JSON fixture loading
//!
//! Reads dashboard records from a data directory. Each file wraps its records
//! in a single top-level key:
//!
//! | file | shape |
//! |---|---|
//! | `accounts.json` | `{"accounts": [Account]}` |
//! | `transactions.json` | `{"transactions": [Transaction]}` |
//! | `messages.json` | `{"messages": [Message]}` |
//! | `customers.json` | `{"customers": [Customer]}` |
//! | `insights.json` | any JSON document |
//! | `users.json` | `{"users": [{"token", "id", "email", "role"}]}` |
//!
//! Parsing is split from reading so the async loader can share it.
//! Files are re-read on every call; nothing is cached.

use crate::core::auth::{TokenEntry, TokenTable};
use crate::core::traits::DataSource;
use crate::types::{Account, Customer, DashboardError, Message, Transaction};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const ACCOUNTS_FILE: &str = "accounts.json";
pub const TRANSACTIONS_FILE: &str = "transactions.json";
pub const MESSAGES_FILE: &str = "messages.json";
pub const CUSTOMERS_FILE: &str = "customers.json";
pub const INSIGHTS_FILE: &str = "insights.json";
pub const USERS_FILE: &str = "users.json";

#[derive(Deserialize)]
struct AccountsFile {
    accounts: Vec<Account>,
}

#[derive(Deserialize)]
struct TransactionsFile {
    transactions: Vec<Transaction>,
}

#[derive(Deserialize)]
struct MessagesFile {
    messages: Vec<Message>,
}

#[derive(Deserialize)]
struct CustomersFile {
    customers: Vec<Customer>,
}

#[derive(Deserialize)]
struct UsersFile {
    users: Vec<TokenEntry>,
}

fn parse<T: DeserializeOwned>(file: &str, content: &str) -> Result<T, DashboardError> {
    serde_json::from_str(content).map_err(|e| DashboardError::parse(file, e))
}

/// Parse the contents of `accounts.json`
pub fn parse_accounts(content: &str) -> Result<Vec<Account>, DashboardError> {
    parse::<AccountsFile>(ACCOUNTS_FILE, content).map(|f| f.accounts)
}

/// Parse the contents of `transactions.json`
pub fn parse_transactions(content: &str) -> Result<Vec<Transaction>, DashboardError> {
    parse::<TransactionsFile>(TRANSACTIONS_FILE, content).map(|f| f.transactions)
}

/// Parse the contents of `messages.json`
pub fn parse_messages(content: &str) -> Result<Vec<Message>, DashboardError> {
    parse::<MessagesFile>(MESSAGES_FILE, content).map(|f| f.messages)
}

/// Parse the contents of `customers.json`
pub fn parse_customers(content: &str) -> Result<Vec<Customer>, DashboardError> {
    parse::<CustomersFile>(CUSTOMERS_FILE, content).map(|f| f.customers)
}

/// Parse the contents of `insights.json`
pub fn parse_insights(content: &str) -> Result<Value, DashboardError> {
    parse(INSIGHTS_FILE, content)
}

/// Parse the contents of `users.json`
pub fn parse_users(content: &str) -> Result<TokenTable, DashboardError> {
    parse::<UsersFile>(USERS_FILE, content).map(|f| TokenTable::new(f.users))
}

/// Error for a fixture that could not be opened
pub(crate) fn open_error(path: &Path, error: std::io::Error) -> DashboardError {
    DashboardError::IoError {
        message: format!("Failed to open file '{}': {}", path.display(), error),
    }
}

/// Blocking fixture loader rooted at a data directory
///
/// # Examples
///
/// ```no_run
/// use rust_dashboard_engine::core::DataSource;
/// use rust_dashboard_engine::io::FixtureStore;
///
/// let store = FixtureStore::new("data");
/// let accounts = store.accounts().expect("accounts.json is readable");
/// println!("{} accounts", accounts.len());
/// ```
#[derive(Debug, Clone)]
pub struct FixtureStore {
    dir: PathBuf,
}

impl FixtureStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read(&self, file: &str) -> Result<String, DashboardError> {
        let path = self.dir.join(file);
        debug!(path = %path.display(), "Reading fixture");
        fs::read_to_string(&path).map_err(|e| open_error(&path, e))
    }

    /// Load the token table from `users.json`
    pub fn token_table(&self) -> Result<TokenTable, DashboardError> {
        parse_users(&self.read(USERS_FILE)?)
    }
}

impl DataSource for FixtureStore {
    fn accounts(&self) -> Result<Vec<Account>, DashboardError> {
        parse_accounts(&self.read(ACCOUNTS_FILE)?)
    }

    fn transactions(&self) -> Result<Vec<Transaction>, DashboardError> {
        parse_transactions(&self.read(TRANSACTIONS_FILE)?)
    }

    fn messages(&self) -> Result<Vec<Message>, DashboardError> {
        parse_messages(&self.read(MESSAGES_FILE)?)
    }

    fn customers(&self) -> Result<Vec<Customer>, DashboardError> {
        parse_customers(&self.read(CUSTOMERS_FILE)?)
    }

    fn insights(&self) -> Result<Value, DashboardError> {
        parse_insights(&self.read(INSIGHTS_FILE)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::Authenticator;
    use crate::types::Role;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    /// Helper function to create a data directory with the given fixture files
    fn create_data_dir(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().expect("Failed to create temp dir");
        for (name, content) in files {
            fs::write(dir.path().join(name), content).expect("Failed to write fixture");
        }
        dir
    }

    #[test]
    fn test_loads_accounts_and_transactions() {
        let dir = create_data_dir(&[
            (
                ACCOUNTS_FILE,
                r#"{"accounts":[{"id":"acc_1","customerId":"cus_1","type":"checking","nickname":"Main",
                    "currency":"USD","balance":1000.0,"updatedAt":"2025-01-15T00:00:00Z"}]}"#,
            ),
            (
                TRANSACTIONS_FILE,
                r#"{"transactions":[{"id":"t1","accountId":"acc_1","amount":200,"date":"2025-01-05T10:00:00Z",
                    "description":"Salary","category":"income","type":"credit"}]}"#,
            ),
        ]);
        let store = FixtureStore::new(dir.path());

        let accounts = store.accounts().unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].balance, dec!(1000));

        let transactions = store.transactions().unwrap();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].amount, dec!(200));
    }

    #[test]
    fn test_account_lookup() {
        let dir = create_data_dir(&[(
            ACCOUNTS_FILE,
            r#"{"accounts":[{"id":"acc_1","customerId":"cus_1","type":"checking",
                "currency":"USD","balance":"5.00","updatedAt":"2025-01-15T00:00:00Z"}]}"#,
        )]);
        let store = FixtureStore::new(dir.path());

        assert_eq!(store.account("acc_1").unwrap().customer_id, "cus_1");
        assert_eq!(
            store.account("acc_2").unwrap_err(),
            DashboardError::account_not_found("acc_2")
        );
    }

    #[test]
    fn test_missing_fixture_reports_path() {
        let dir = create_data_dir(&[]);
        let store = FixtureStore::new(dir.path());

        let err = store.messages().unwrap_err();
        assert!(err.to_string().contains("Failed to open file"));
        assert!(err.to_string().contains(MESSAGES_FILE));
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_malformed_fixture_names_file() {
        let dir = create_data_dir(&[(CUSTOMERS_FILE, r#"{"customers": [{"name": "no id"}]}"#)]);
        let store = FixtureStore::new(dir.path());

        match store.customers().unwrap_err() {
            DashboardError::ParseError { file, .. } => assert_eq!(file, CUSTOMERS_FILE),
            other => panic!("Expected ParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_insights_pass_through() {
        let dir = create_data_dir(&[(INSIGHTS_FILE, r#"{"insights":[{"id":"i1","score":0.7}]}"#)]);
        let store = FixtureStore::new(dir.path());

        let insights = store.insights().unwrap();
        assert_eq!(insights["insights"][0]["id"], "i1");
    }

    #[test]
    fn test_token_table_from_users_file() {
        let dir = create_data_dir(&[(
            USERS_FILE,
            r#"{"users":[{"token":"tok","id":"cus_1","email":"a@example.com","role":"readonly"}]}"#,
        )]);
        let table = FixtureStore::new(dir.path()).token_table().unwrap();

        let user = table.resolve("tok").unwrap();
        assert_eq!(user.id, "cus_1");
        assert_eq!(user.role, Role::Readonly);
    }
}
