//! Dashboard Engine CLI
//!
//! Command-line front end over the dashboard fixtures.
//!
//! # Usage
//!
//! ```bash
//! dashboard-engine --token tok_alice accounts
//! dashboard-engine --token tok_alice transactions --account acc_1 --range 5d
//! dashboard-engine --token tok_alice balance-history --account acc_1 --range 3m
//! dashboard-engine --token tok_admin report --strategy async --format csv > report.csv
//! ```
//!
//! JSON responses are printed to stdout. Logs go to stderr and are filtered
//! with `RUST_LOG` (default `warn`).
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (authentication, permission, bad parameters, unreadable fixtures, etc.)

use chrono::Utc;
use rust_dashboard_engine::api::ApiResponse;
use rust_dashboard_engine::cli;
use std::io::Write;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();

    // One clock read per invocation
    let now = args.now.unwrap_or_else(Utc::now);

    let mut output = std::io::stdout();
    let response = match cli::run(&args, now, &mut output) {
        Ok(Some(response)) => response,
        Ok(None) => return,
        Err(e) => ApiResponse::error(&e),
    };

    if response.is_success() {
        if let Err(e) = writeln!(output, "{:#}", response.body) {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    } else {
        eprintln!("{}", response.body);
        process::exit(1);
    }
}
