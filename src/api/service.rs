//! Typed read operations behind the routes
//!
//! Each function takes an already-authenticated user and enforces ownership
//! itself, so the CLI and the report strategies can call them directly without
//! going through JSON.

use crate::core::auth::authorize_resource_owner;
use crate::core::history::derive_balance_history;
use crate::core::traits::DataSource;
use crate::types::{
    Account, AuthenticatedUser, BalanceHistoryPoint, Customer, DashboardError, DateRange,
    Transaction, TransactionWindow,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use tracing::info;

/// Transactions returned per page
pub const TRANSACTION_PAGE_SIZE: usize = 20;

/// Accounts the user may see (all of them for admins)
pub fn visible_accounts(
    source: &dyn DataSource,
    user: &AuthenticatedUser,
) -> Result<Vec<Account>, DashboardError> {
    let mut accounts = source.accounts()?;
    if !user.is_admin() {
        accounts.retain(|account| account.is_owned_by(&user.id));
    }
    Ok(accounts)
}

/// Customer profiles the user may see (only their own unless admin)
pub fn visible_customers(
    source: &dyn DataSource,
    user: &AuthenticatedUser,
) -> Result<Vec<Customer>, DashboardError> {
    let mut customers = source.customers()?;
    if !user.is_admin() {
        customers.retain(|customer| customer.id == user.id);
    }
    Ok(customers)
}

/// Fetch an account and check that `user` may read it
pub fn owned_account(
    source: &dyn DataSource,
    user: &AuthenticatedUser,
    account_id: &str,
) -> Result<Account, DashboardError> {
    let account = source.account(account_id)?;
    if !authorize_resource_owner(user, &account.customer_id) {
        return Err(DashboardError::access_denied(account_id));
    }
    Ok(account)
}

/// Balance history of one account the user may read
pub fn balance_history(
    source: &dyn DataSource,
    user: &AuthenticatedUser,
    account_id: &str,
    range: DateRange,
    now: DateTime<Utc>,
) -> Result<Vec<BalanceHistoryPoint>, DashboardError> {
    let account = owned_account(source, user, account_id)?;
    let transactions = source.transactions()?;

    info!(account_id, range = %range, "Computing balance history");
    derive_balance_history(&account, &transactions, range, now)
}

/// Filters for the transactions listing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionQuery {
    pub account_id: Option<String>,
    pub window: Option<TransactionWindow>,
    /// Id of the last transaction on the previous page
    pub cursor: Option<String>,
}

/// One page of transactions, newest first
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    pub data: Vec<Transaction>,
    pub next_cursor: Option<String>,
}

/// List transactions visible to the user, newest first, one page at a time
///
/// # Errors
///
/// * `AccountNotFound` / `AccessDenied` - `account_id` unknown or foreign
/// * `InvalidCursor` - cursor does not name a transaction in the filtered list
pub fn list_transactions(
    source: &dyn DataSource,
    user: &AuthenticatedUser,
    query: &TransactionQuery,
    now: DateTime<Utc>,
) -> Result<TransactionPage, DashboardError> {
    let mut transactions = source.transactions()?;

    match &query.account_id {
        Some(account_id) => {
            owned_account(source, user, account_id)?;
            transactions.retain(|txn| &txn.account_id == account_id);
        }
        None if !user.is_admin() => {
            let owned: HashSet<String> = visible_accounts(source, user)?
                .into_iter()
                .map(|account| account.id)
                .collect();
            transactions.retain(|txn| owned.contains(&txn.account_id));
        }
        None => {}
    }

    if let Some(window) = query.window {
        transactions.retain(|txn| window.contains(txn.date, now));
    }

    transactions.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));

    let start = match &query.cursor {
        Some(cursor) => {
            transactions
                .iter()
                .position(|txn| &txn.id == cursor)
                .ok_or_else(|| DashboardError::invalid_cursor(cursor))?
                + 1
        }
        None => 0,
    };

    let remaining = transactions.len().saturating_sub(start);
    let data: Vec<Transaction> = transactions
        .into_iter()
        .skip(start)
        .take(TRANSACTION_PAGE_SIZE)
        .collect();
    let next_cursor = if remaining > TRANSACTION_PAGE_SIZE {
        data.last().map(|txn| txn.id.clone())
    } else {
        None
    };

    Ok(TransactionPage { data, next_cursor })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemoryStore;
    use crate::types::{Role, TransactionKind};
    use chrono::{Duration, TimeZone};
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 1, 12, 0, 0).unwrap()
    }

    fn user(id: &str, role: Role) -> AuthenticatedUser {
        AuthenticatedUser {
            id: id.to_string(),
            email: None,
            role,
        }
    }

    fn account(id: &str, customer: &str) -> Account {
        Account {
            id: id.to_string(),
            customer_id: customer.to_string(),
            account_type: "checking".to_string(),
            nickname: String::new(),
            currency: "USD".to_string(),
            balance: dec!(100),
            updated_at: now(),
        }
    }

    fn txn(id: &str, account_id: &str, days_ago: i64) -> Transaction {
        Transaction {
            id: id.to_string(),
            account_id: account_id.to_string(),
            amount: dec!(1),
            date: now() - Duration::days(days_ago),
            description: String::new(),
            category: String::new(),
            kind: TransactionKind::Debit,
        }
    }

    fn store() -> MemoryStore {
        let mut store = MemoryStore::new(
            vec![account("acc_1", "cus_1"), account("acc_2", "cus_2")],
            vec![
                txn("t1", "acc_1", 1),
                txn("t2", "acc_2", 2),
                txn("t3", "acc_1", 10),
            ],
        );
        store.customers = vec![
            serde_json::from_value(json!({"id": "cus_1", "name": "Ada"})).unwrap(),
            serde_json::from_value(json!({"id": "cus_2", "name": "Bo"})).unwrap(),
        ];
        store
    }

    #[test]
    fn test_visible_accounts_filters_by_owner() {
        let store = store();
        let own = visible_accounts(&store, &user("cus_1", Role::User)).unwrap();
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].id, "acc_1");

        let all = visible_accounts(&store, &user("admin", Role::Admin)).unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_visible_customers_filters_by_id() {
        let store = store();
        let own = visible_customers(&store, &user("cus_2", Role::User)).unwrap();
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].profile["name"], "Bo");
        assert_eq!(visible_customers(&store, &user("x", Role::Admin)).unwrap().len(), 2);
    }

    #[test]
    fn test_balance_history_checks_ownership() {
        let store = store();
        let err = balance_history(
            &store,
            &user("cus_1", Role::User),
            "acc_2",
            DateRange::OneMonth,
            now(),
        )
        .unwrap_err();
        assert_eq!(err, DashboardError::access_denied("acc_2"));

        let points = balance_history(
            &store,
            &user("admin", Role::Admin),
            "acc_2",
            DateRange::OneMonth,
            now(),
        )
        .unwrap();
        assert_eq!(points.len(), 30);
        assert_eq!(points[29].balance, dec!(100));
        assert_eq!(points[0].balance, dec!(101));
    }

    #[test]
    fn test_list_transactions_for_own_accounts() {
        let page = list_transactions(
            &store(),
            &user("cus_1", Role::User),
            &TransactionQuery::default(),
            now(),
        )
        .unwrap();

        let ids: Vec<&str> = page.data.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "t3"]);
        assert_eq!(page.next_cursor, None);
    }

    #[test]
    fn test_list_transactions_window_filter() {
        let query = TransactionQuery {
            window: Some(TransactionWindow::FiveDays),
            ..TransactionQuery::default()
        };
        let page = list_transactions(&store(), &user("a", Role::Admin), &query, now()).unwrap();

        let ids: Vec<&str> = page.data.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "t2"]);
    }

    #[test]
    fn test_list_transactions_foreign_account() {
        let query = TransactionQuery {
            account_id: Some("acc_2".to_string()),
            ..TransactionQuery::default()
        };
        let err = list_transactions(&store(), &user("cus_1", Role::User), &query, now())
            .unwrap_err();
        assert_eq!(err.status_code(), 403);
    }

    #[test]
    fn test_list_transactions_paginates() {
        let transactions: Vec<Transaction> = (0..45)
            .map(|i| txn(&format!("t{:02}", i), "acc_1", i))
            .collect();
        let store = MemoryStore::new(vec![account("acc_1", "cus_1")], transactions);
        let owner = user("cus_1", Role::User);

        let first = list_transactions(&store, &owner, &TransactionQuery::default(), now()).unwrap();
        assert_eq!(first.data.len(), 20);
        assert_eq!(first.data[0].id, "t00");
        assert_eq!(first.next_cursor.as_deref(), Some("t19"));

        let second_query = TransactionQuery {
            cursor: first.next_cursor.clone(),
            ..TransactionQuery::default()
        };
        let second = list_transactions(&store, &owner, &second_query, now()).unwrap();
        assert_eq!(second.data[0].id, "t20");
        assert_eq!(second.next_cursor.as_deref(), Some("t39"));

        let third_query = TransactionQuery {
            cursor: second.next_cursor.clone(),
            ..TransactionQuery::default()
        };
        let third = list_transactions(&store, &owner, &third_query, now()).unwrap();
        assert_eq!(third.data.len(), 5);
        assert_eq!(third.next_cursor, None);
    }

    #[test]
    fn test_list_transactions_exact_page_has_no_cursor() {
        let transactions: Vec<Transaction> = (0..20)
            .map(|i| txn(&format!("t{:02}", i), "acc_1", i))
            .collect();
        let store = MemoryStore::new(vec![account("acc_1", "cus_1")], transactions);

        let page = list_transactions(
            &store,
            &user("cus_1", Role::User),
            &TransactionQuery::default(),
            now(),
        )
        .unwrap();
        assert_eq!(page.data.len(), 20);
        assert_eq!(page.next_cursor, None);
    }

    #[test]
    fn test_list_transactions_unknown_cursor() {
        let query = TransactionQuery {
            cursor: Some("missing".to_string()),
            ..TransactionQuery::default()
        };
        let err = list_transactions(&store(), &user("a", Role::Admin), &query, now()).unwrap_err();
        assert_eq!(err, DashboardError::invalid_cursor("missing"));
    }

    #[test]
    fn test_page_serializes_next_cursor_as_null() {
        let page = TransactionPage {
            data: Vec::new(),
            next_cursor: None,
        };
        assert_eq!(
            serde_json::to_value(&page).unwrap(),
            json!({"data": [], "nextCursor": null})
        );
    }
}
