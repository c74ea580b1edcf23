//! Caller identity types
//!
//! An [`AuthenticatedUser`] is what a successful bearer-token lookup yields.
//! Its [`Role`] decides which [`Permission`]s it holds.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Role attached to a user by the identity provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access; bypasses ownership checks
    Admin,

    /// Regular customer; sees only their own resources
    #[default]
    #[serde(alias = "")]
    User,

    /// Can list accounts and nothing else
    Readonly,

    /// Any role name the engine does not know; grants nothing
    #[serde(other)]
    Unknown,
}

/// A permission a route may require
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    #[serde(rename = "read:accounts")]
    ReadAccounts,
    #[serde(rename = "write:accounts")]
    WriteAccounts,
    #[serde(rename = "read:transactions")]
    ReadTransactions,
    #[serde(rename = "write:transactions")]
    WriteTransactions,
    #[serde(rename = "read:customers")]
    ReadCustomers,
    #[serde(rename = "write:customers")]
    WriteCustomers,
    #[serde(rename = "read:messages")]
    ReadMessages,
    #[serde(rename = "read:insights")]
    ReadInsights,
    #[serde(rename = "read:balance-history")]
    ReadBalanceHistory,
}

impl Permission {
    pub fn as_str(self) -> &'static str {
        match self {
            Permission::ReadAccounts => "read:accounts",
            Permission::WriteAccounts => "write:accounts",
            Permission::ReadTransactions => "read:transactions",
            Permission::WriteTransactions => "write:transactions",
            Permission::ReadCustomers => "read:customers",
            Permission::WriteCustomers => "write:customers",
            Permission::ReadMessages => "read:messages",
            Permission::ReadInsights => "read:insights",
            Permission::ReadBalanceHistory => "read:balance-history",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity resolved from a bearer token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// User id; equals the `customerId` of accounts the user owns
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Missing, null or empty roles default to [`Role::User`]
    #[serde(default, deserialize_with = "role_or_default")]
    pub role: Role,
}

fn role_or_default<'de, D>(deserializer: D) -> Result<Role, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Role>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
