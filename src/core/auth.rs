//! Authentication and authorization
//!
//! This module provides:
//! - Bearer-header parsing and token resolution through an [`Authenticator`]
//! - The role → permission table
//! - The resource-owner check (admins bypass it)
//! - [`TokenTable`], an [`Authenticator`] backed by a fixed token list

use crate::core::traits::Authenticator;
use crate::types::{AuthenticatedUser, DashboardError, Permission, Role};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::warn;

const BEARER_PREFIX: &str = "Bearer ";

/// Authenticate a request from its `Authorization` header value
///
/// # Errors
///
/// * `Unauthenticated("Authentication required")` - header absent or not a bearer header
/// * `Unauthenticated("Invalid or expired token")` - token unknown to the authenticator
pub fn authenticate(
    authenticator: &dyn Authenticator,
    authorization: Option<&str>,
) -> Result<AuthenticatedUser, DashboardError> {
    let token = authorization
        .and_then(|header| header.strip_prefix(BEARER_PREFIX))
        .ok_or_else(|| DashboardError::unauthenticated("Authentication required"))?;

    authenticator.resolve(token).ok_or_else(|| {
        warn!("Rejected unknown bearer token");
        DashboardError::unauthenticated("Invalid or expired token")
    })
}

/// Permissions granted to a role
pub fn permissions_for(role: Role) -> &'static [Permission] {
    match role {
        Role::Admin => &[
            Permission::ReadAccounts,
            Permission::WriteAccounts,
            Permission::ReadTransactions,
            Permission::WriteTransactions,
            Permission::ReadCustomers,
            Permission::WriteCustomers,
            Permission::ReadMessages,
            Permission::ReadInsights,
            Permission::ReadBalanceHistory,
        ],
        Role::User => &[
            Permission::ReadAccounts,
            Permission::ReadTransactions,
            Permission::ReadCustomers,
            Permission::ReadMessages,
            Permission::ReadInsights,
            Permission::ReadBalanceHistory,
        ],
        Role::Readonly => &[Permission::ReadAccounts],
        Role::Unknown => &[],
    }
}

/// Whether `user` holds `permission`
pub fn authorize(user: &AuthenticatedUser, permission: Permission) -> bool {
    permissions_for(user.role).contains(&permission)
}

/// Whether `user` may read a resource owned by `owner_id`
pub fn authorize_resource_owner(user: &AuthenticatedUser, owner_id: &str) -> bool {
    user.is_admin() || user.id == owner_id
}

/// Authenticate and check `permission` in one step
pub fn require(
    authenticator: &dyn Authenticator,
    authorization: Option<&str>,
    permission: Permission,
) -> Result<AuthenticatedUser, DashboardError> {
    let user = authenticate(authenticator, authorization)?;
    if !authorize(&user, permission) {
        warn!(user = %user.id, required = %permission, "Permission denied");
        return Err(DashboardError::insufficient_permissions(permission));
    }
    Ok(user)
}

/// One row of `users.json`
#[derive(Debug, Clone, Deserialize)]
pub struct TokenEntry {
    pub token: String,
    #[serde(flatten)]
    pub user: AuthenticatedUser,
}

/// Fixed token → user table standing in for the identity provider
#[derive(Debug, Clone, Default)]
pub struct TokenTable {
    users: HashMap<String, AuthenticatedUser>,
}

impl TokenTable {
    /// Build a table; later entries win on duplicate tokens
    pub fn new(entries: impl IntoIterator<Item = TokenEntry>) -> Self {
        Self {
            users: entries
                .into_iter()
                .map(|entry| (entry.token, entry.user))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Authenticator for TokenTable {
    fn resolve(&self, token: &str) -> Option<AuthenticatedUser> {
        self.users.get(token).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn user(id: &str, role: Role) -> AuthenticatedUser {
        AuthenticatedUser {
            id: id.to_string(),
            email: None,
            role,
        }
    }

    fn table() -> TokenTable {
        TokenTable::new(vec![
            TokenEntry {
                token: "admin-token".to_string(),
                user: user("admin_1", Role::Admin),
            },
            TokenEntry {
                token: "user-token".to_string(),
                user: user("cus_1", Role::User),
            },
        ])
    }

    #[rstest]
    #[case::missing_header(None, "Authentication required")]
    #[case::wrong_scheme(Some("Basic dXNlcjpwYXNz"), "Authentication required")]
    #[case::lowercase_scheme(Some("bearer user-token"), "Authentication required")]
    #[case::unknown_token(Some("Bearer nope"), "Invalid or expired token")]
    #[case::empty_token(Some("Bearer "), "Invalid or expired token")]
    fn test_authenticate_failures(#[case] header: Option<&str>, #[case] message: &str) {
        let err = authenticate(&table(), header).unwrap_err();
        assert_eq!(err, DashboardError::unauthenticated(message));
        assert_eq!(err.status_code(), 401);
    }

    #[test]
    fn test_authenticate_resolves_user() {
        let resolved = authenticate(&table(), Some("Bearer user-token")).unwrap();
        assert_eq!(resolved, user("cus_1", Role::User));
    }

    #[rstest]
    #[case(Role::Admin, Permission::WriteTransactions, true)]
    #[case(Role::Admin, Permission::ReadBalanceHistory, true)]
    #[case(Role::User, Permission::ReadBalanceHistory, true)]
    #[case(Role::User, Permission::ReadInsights, true)]
    #[case(Role::User, Permission::WriteAccounts, false)]
    #[case(Role::Readonly, Permission::ReadAccounts, true)]
    #[case(Role::Readonly, Permission::ReadTransactions, false)]
    #[case(Role::Unknown, Permission::ReadAccounts, false)]
    fn test_authorize(#[case] role: Role, #[case] permission: Permission, #[case] expected: bool) {
        assert_eq!(authorize(&user("u", role), permission), expected);
    }

    #[rstest]
    #[case(Role::Admin, "someone_else", true)]
    #[case(Role::User, "cus_1", true)]
    #[case(Role::User, "cus_2", false)]
    #[case(Role::Readonly, "cus_2", false)]
    fn test_authorize_resource_owner(
        #[case] role: Role,
        #[case] owner: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(authorize_resource_owner(&user("cus_1", role), owner), expected);
    }

    #[test]
    fn test_require_reports_missing_permission() {
        let table = TokenTable::new(vec![TokenEntry {
            token: "ro".to_string(),
            user: user("cus_3", Role::Readonly),
        }]);

        let err = require(&table, Some("Bearer ro"), Permission::ReadMessages).unwrap_err();
        assert_eq!(
            err,
            DashboardError::insufficient_permissions(Permission::ReadMessages)
        );
        assert!(require(&table, Some("Bearer ro"), Permission::ReadAccounts).is_ok());
    }

    #[test]
    fn test_token_entry_deserializes_flat_shape() {
        let json = r#"[{"token":"t1","id":"cus_1","email":"a@b.c","role":"admin"},{"token":"t2","id":"cus_2"}]"#;
        let entries: Vec<TokenEntry> = serde_json::from_str(json).unwrap();
        let table = TokenTable::new(entries);

        assert_eq!(table.len(), 2);
        assert_eq!(table.resolve("t1").unwrap().role, Role::Admin);
        assert_eq!(table.resolve("t2").unwrap().role, Role::User);
        assert!(table.resolve("t3").is_none());
    }
}
