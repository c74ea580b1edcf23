//! Request layer
//!
//! Turns authenticated requests into JSON responses over an injected
//! [`DataSource`](crate::core::DataSource).
//!
//! - `request` - Method, request and response model
//! - `service` - Typed read operations with ownership checks
//! - `routes` - Route handlers and dispatch

pub mod request;
pub mod routes;
pub mod service;

pub use request::{ApiRequest, ApiResponse, Method};
pub use routes::{Api, Route};
pub use service::{TransactionPage, TransactionQuery, TRANSACTION_PAGE_SIZE};
