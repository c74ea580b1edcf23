//! Route handlers
//!
//! [`Api`] bundles the injected data source, authenticator and reference
//! instant, and answers each [`Route`] with an [`ApiResponse`].
//!
//! Guarded routes check, in order: authentication (401), permission (403),
//! method (405), query parameters (400), then resource existence and
//! ownership (404/403).

use crate::api::request::{ApiRequest, ApiResponse, Method};
use crate::api::service::{self, TransactionQuery};
use crate::core::auth::require;
use crate::core::traits::{Authenticator, DataSource};
use crate::types::{AuthenticatedUser, DashboardError, DateRange, Permission, TransactionWindow};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

/// Every route the engine answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Health,
    Accounts,
    Transactions,
    BalanceHistory,
    Messages,
    Customers,
    Insights,
}

impl Route {
    pub const ALL: [Route; 7] = [
        Route::Health,
        Route::Accounts,
        Route::Transactions,
        Route::BalanceHistory,
        Route::Messages,
        Route::Customers,
        Route::Insights,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Health => "/api/health",
            Route::Accounts => "/api/accounts",
            Route::Transactions => "/api/transactions",
            Route::BalanceHistory => "/api/balance-history",
            Route::Messages => "/api/messages",
            Route::Customers => "/api/customers",
            Route::Insights => "/api/insights",
        }
    }

    /// Permission the route requires; `None` for public routes
    pub fn permission(self) -> Option<Permission> {
        match self {
            Route::Health => None,
            Route::Accounts => Some(Permission::ReadAccounts),
            Route::Transactions => Some(Permission::ReadTransactions),
            Route::BalanceHistory => Some(Permission::ReadBalanceHistory),
            Route::Messages => Some(Permission::ReadMessages),
            Route::Customers => Some(Permission::ReadCustomers),
            Route::Insights => Some(Permission::ReadInsights),
        }
    }
}

impl FromStr for Route {
    type Err = String;

    /// Accepts both `/api/accounts` and `accounts`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim_start_matches("/api/");
        Route::ALL
            .into_iter()
            .find(|route| route.path().trim_start_matches("/api/") == name)
            .ok_or_else(|| format!("Unknown route '{}'", s))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Request handler context
///
/// `now` is fixed once per handler instance so every computation in a request
/// shares the same reference instant.
pub struct Api<'a> {
    source: &'a dyn DataSource,
    authenticator: &'a dyn Authenticator,
    now: DateTime<Utc>,
}

impl<'a> Api<'a> {
    pub fn new(
        source: &'a dyn DataSource,
        authenticator: &'a dyn Authenticator,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            source,
            authenticator,
            now,
        }
    }

    /// Dispatch a request to its route handler
    pub fn handle(&self, route: Route, request: &ApiRequest) -> ApiResponse {
        let response = match route {
            Route::Health => health(),
            Route::Accounts => self.accounts(request),
            Route::Transactions => self.transactions(request),
            Route::BalanceHistory => self.balance_history(request),
            Route::Messages => self.messages(request),
            Route::Customers => self.customers(request),
            Route::Insights => self.insights(request),
        };

        if response.is_success() {
            info!(route = %route, method = %request.method, status = response.status, "Handled request");
        } else {
            warn!(route = %route, method = %request.method, status = response.status, "Request rejected");
        }
        response
    }

    /// Run `handler` behind authentication, the route's permission and a GET-only check
    fn guarded<T, F>(&self, route: Route, request: &ApiRequest, handler: F) -> ApiResponse
    where
        T: Serialize,
        F: FnOnce(&AuthenticatedUser) -> Result<T, DashboardError>,
    {
        let result = self
            .authorize(route, request)
            .and_then(|user| {
                if request.method != Method::Get {
                    return Err(DashboardError::MethodNotAllowed);
                }
                handler(&user)
            })
            .and_then(|body| serde_json::to_value(body).map_err(DashboardError::from));

        match result {
            Ok(body) => ApiResponse::ok(body),
            Err(error) => ApiResponse::error(&error),
        }
    }

    fn authorize(
        &self,
        route: Route,
        request: &ApiRequest,
    ) -> Result<AuthenticatedUser, DashboardError> {
        let authorization = request.authorization.as_deref();
        match route.permission() {
            Some(permission) => require(self.authenticator, authorization, permission),
            None => crate::core::auth::authenticate(self.authenticator, authorization),
        }
    }

    fn accounts(&self, request: &ApiRequest) -> ApiResponse {
        self.guarded(Route::Accounts, request, |user| {
            Ok(json!({ "data": service::visible_accounts(self.source, user)? }))
        })
    }

    fn transactions(&self, request: &ApiRequest) -> ApiResponse {
        self.guarded(Route::Transactions, request, |user| {
            let query = TransactionQuery {
                account_id: request.query("accountId").map(str::to_string),
                window: request
                    .query("range")
                    .map(TransactionWindow::from_str)
                    .transpose()?,
                cursor: request.query("cursor").map(str::to_string),
            };
            service::list_transactions(self.source, user, &query, self.now)
        })
    }

    fn balance_history(&self, request: &ApiRequest) -> ApiResponse {
        self.guarded(Route::BalanceHistory, request, |user| {
            let account_id = request
                .query("accountId")
                .ok_or_else(|| DashboardError::missing_parameter("accountId"))?;
            let range: DateRange = request
                .query("range")
                .ok_or_else(|| DashboardError::invalid_range(""))?
                .parse()?;

            let points = service::balance_history(self.source, user, account_id, range, self.now)?;
            Ok(json!({ "data": points }))
        })
    }

    fn messages(&self, request: &ApiRequest) -> ApiResponse {
        self.guarded(Route::Messages, request, |_user| {
            Ok(json!({ "data": self.source.messages()? }))
        })
    }

    fn customers(&self, request: &ApiRequest) -> ApiResponse {
        self.guarded(Route::Customers, request, |user| {
            Ok(json!({ "data": service::visible_customers(self.source, user)? }))
        })
    }

    fn insights(&self, request: &ApiRequest) -> ApiResponse {
        self.guarded(Route::Insights, request, |_user| {
            let insights: Value = self.source.insights()?;
            Ok(json!({ "data": insights }))
        })
    }
}

fn health() -> ApiResponse {
    ApiResponse::ok(json!({ "status": "ok" }))
}
