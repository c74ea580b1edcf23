//! I/O module
//!
//! Handles fixture loading and output.
//!
//! # Components
//!
//! - `fixtures` - Blocking JSON fixture loader (`FixtureStore`)
//! - `async_fixtures` - Non-blocking loader built on `tokio::fs`
//! - `memory` - In-memory `DataSource`
//! - `csv_format` - CSV serialization of balance histories

pub mod async_fixtures;
pub mod csv_format;
pub mod fixtures;
pub mod memory;

pub use async_fixtures::AsyncFixtureStore;
pub use csv_format::write_history_csv;
pub use fixtures::FixtureStore;
pub use memory::MemoryStore;
