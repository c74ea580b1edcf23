//! Request and response model
//!
//! Routing and transport belong to whatever hosts the engine; handlers only
//! see a method, a query map and the `Authorization` header, and answer with a
//! status code and a JSON body.

use crate::types::DashboardError;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "PATCH" => Ok(Method::Patch),
            "DELETE" => Ok(Method::Delete),
            other => Err(format!("Unsupported method '{}'", other)),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// Inbound request as seen by a handler
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub query: BTreeMap<String, String>,
    /// Raw `Authorization` header value
    pub authorization: Option<String>,
}

impl ApiRequest {
    /// A GET request with no query and no credentials
    pub fn get() -> Self {
        Self {
            method: Method::Get,
            query: BTreeMap::new(),
            authorization: None,
        }
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_query(mut self, name: &str, value: impl Into<String>) -> Self {
        self.query.insert(name.to_string(), value.into());
        self
    }

    /// Attach `Authorization: Bearer <token>`
    pub fn with_bearer(mut self, token: &str) -> Self {
        self.authorization = Some(format!("Bearer {}", token));
        self
    }

    /// Query parameter value; empty strings count as absent
    pub fn query(&self, name: &str) -> Option<&str> {
        self.query
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

/// Handler result
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    /// Error response; permission failures also name the missing permission
    pub fn error(error: &DashboardError) -> Self {
        let body = match error {
            DashboardError::InsufficientPermissions { required } => json!({
                "error": error.to_string(),
                "required": required.as_str(),
            }),
            _ => json!({ "error": error.to_string() }),
        };
        Self {
            status: error.status_code(),
            body,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Permission;
    use rstest::rstest;

    #[rstest]
    #[case("GET", Method::Get)]
    #[case("get", Method::Get)]
    #[case("Delete", Method::Delete)]
    fn test_method_parsing(#[case] input: &str, #[case] expected: Method) {
        assert_eq!(input.parse::<Method>().unwrap(), expected);
    }

    #[test]
    fn test_method_parsing_rejects_unknown() {
        assert!("TRACE".parse::<Method>().is_err());
    }

    #[test]
    fn test_empty_query_values_are_absent() {
        let request = ApiRequest::get()
            .with_query("accountId", "")
            .with_query("range", "1m");
        assert_eq!(request.query("accountId"), None);
        assert_eq!(request.query("range"), Some("1m"));
        assert_eq!(request.query("cursor"), None);
    }

    #[test]
    fn test_bearer_header() {
        let request = ApiRequest::get().with_bearer("abc");
        assert_eq!(request.authorization.as_deref(), Some("Bearer abc"));
    }

    #[test]
    fn test_error_response_bodies() {
        let forbidden =
            ApiResponse::error(&DashboardError::insufficient_permissions(Permission::ReadInsights));
        assert_eq!(forbidden.status, 403);
        assert_eq!(
            forbidden.body,
            json!({"error": "Insufficient permissions", "required": "read:insights"})
        );

        let not_found = ApiResponse::error(&DashboardError::account_not_found("acc_1"));
        assert_eq!(not_found.status, 404);
        assert_eq!(not_found.body, json!({"error": "Account not found"}));
        assert!(!not_found.is_success());
    }
}
