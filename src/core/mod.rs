//! Core business logic module
//!
//! This module contains the core components:
//! - `traits` - Data-source and authenticator seams
//! - `buckets` - Bucket boundary generation per range
//! - `history` - Reverse-replay balance reconstruction
//! - `auth` - Authentication, permission table and ownership checks

pub mod auth;
pub mod buckets;
pub mod history;
pub mod traits;

pub use auth::{authenticate, authorize, authorize_resource_owner, TokenEntry, TokenTable};
pub use buckets::generate_buckets;
pub use history::derive_balance_history;
pub use traits::{Authenticator, DataSource};
