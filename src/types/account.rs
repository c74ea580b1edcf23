//! Account-related types for the Rust Dashboard Engine
//!
//! This module defines the Account record as served by the accounts route
//! and consumed by balance-history reconstruction.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Account identifier (e.g. `acc_1001`)
pub type AccountId = String;

/// Customer identifier; matches the authenticated user's id for owners
pub type CustomerId = String;

/// Customer account as stored in the data source
///
/// The balance is the authoritative "now" value. It is assumed to equal the
/// signed sum of the account's transactions; nothing here verifies that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Unique account identifier
    pub id: AccountId,

    /// Owning customer
    pub customer_id: CustomerId,

    /// Account type as labelled by the data source (checking, savings, ...)
    #[serde(rename = "type")]
    pub account_type: String,

    /// Display name chosen by the customer
    #[serde(default)]
    pub nickname: String,

    /// ISO 4217 currency code
    pub currency: String,

    /// Current balance
    ///
    /// Read from either a JSON number or a string, written back as a number.
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub balance: Decimal,

    /// Last time the balance was refreshed
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Whether `customer_id` owns this account
    pub fn is_owned_by(&self, customer_id: &str) -> bool {
        self.customer_id == customer_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_account_deserializes_fixture_shape() {
        let json = r#"{
            "id": "acc_1001",
            "customerId": "cus_1",
            "type": "checking",
            "nickname": "Everyday",
            "currency": "USD",
            "balance": 1234.56,
            "updatedAt": "2025-01-15T10:00:00Z"
        }"#;

        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.id, "acc_1001");
        assert_eq!(account.account_type, "checking");
        assert_eq!(account.balance, dec!(1234.56));
        assert!(account.is_owned_by("cus_1"));
        assert!(!account.is_owned_by("cus_2"));
    }

    #[test]
    fn test_account_serializes_balance_as_number() {
        let json = r#"{"id":"a","customerId":"c","type":"savings","currency":"EUR",
                       "balance":"10.50","updatedAt":"2025-01-15T10:00:00Z"}"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.nickname, "");

        let value = serde_json::to_value(&account).unwrap();
        assert_eq!(value["balance"], serde_json::json!(10.5));
        assert_eq!(value["customerId"], "c");
        assert_eq!(value["type"], "savings");
    }
}
