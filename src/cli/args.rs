use crate::api::{Method, Route};
use crate::strategy::ReportConfig;
use crate::types::{DashboardError, DateRange, TransactionWindow};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Read-only dashboard backend over JSON fixtures
#[derive(Parser, Debug)]
#[command(name = "dashboard-engine")]
#[command(about = "Query dashboard data and reconstruct account balance history", long_about = None)]
pub struct CliArgs {
    /// Directory holding the JSON fixtures
    #[arg(
        long = "data-dir",
        value_name = "DIR",
        env = "DASHBOARD_DATA_DIR",
        default_value = "data",
        global = true
    )]
    pub data_dir: PathBuf,

    /// Bearer token identifying the caller
    #[arg(long, value_name = "TOKEN", env = "DASHBOARD_TOKEN", global = true)]
    pub token: Option<String>,

    /// Reference instant (RFC 3339); defaults to the current time
    #[arg(long, value_name = "INSTANT", value_parser = parse_instant, global = true)]
    pub now: Option<DateTime<Utc>>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Liveness check
    Health,
    /// List accounts
    Accounts,
    /// List transactions, newest first, 20 per page
    Transactions {
        #[arg(long, value_name = "ACCOUNT_ID")]
        account: Option<String>,
        /// Lookback window: 5d or 1m
        #[arg(long, value_name = "WINDOW")]
        range: Option<TransactionWindow>,
        /// Id of the last transaction on the previous page
        #[arg(long)]
        cursor: Option<String>,
    },
    /// Reconstruct one account's balance history
    BalanceHistory {
        #[arg(long, value_name = "ACCOUNT_ID")]
        account: String,
        /// One of 1m, 3m, 6m, 1y
        #[arg(long)]
        range: DateRange,
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
    },
    /// List inbox messages
    Messages,
    /// List customer profiles
    Customers,
    /// Dump the insights document
    Insights,
    /// Send a raw request to any route
    Call {
        /// Route path, e.g. `/api/accounts` or `accounts`
        route: Route,
        #[arg(long, default_value = "GET")]
        method: Method,
        /// Query parameter; repeatable
        #[arg(long = "query", value_name = "NAME=VALUE", value_parser = parse_query_pair)]
        query: Vec<(String, String)>,
    },
    /// Balance history of every visible account for every range
    Report {
        #[arg(
            long,
            value_enum,
            default_value = "async",
            help = "Report strategy: 'sync' for single-threaded or 'async' for concurrent"
        )]
        strategy: StrategyType,

        /// Worker threads (async only)
        #[arg(
            long = "max-concurrent",
            value_name = "COUNT",
            help = "Number of worker threads (default: CPU cores)"
        )]
        max_concurrent: Option<usize>,

        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
    },
}

/// Available report strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

/// Output encoding for balance histories
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Csv,
}

impl Command {
    /// Create a ReportConfig for `report --strategy async`
    ///
    /// Returns `None` for every other command and for the sync strategy.
    /// A zero worker count falls back to the default (see [`ReportConfig::new`]).
    pub fn to_report_config(&self) -> Option<ReportConfig> {
        match self {
            Command::Report {
                strategy: StrategyType::Async,
                max_concurrent,
                ..
            } => Some(
                max_concurrent
                    .map(ReportConfig::new)
                    .unwrap_or_default(),
            ),
            _ => None,
        }
    }
}

fn parse_query_pair(value: &str) -> Result<(String, String), String> {
    value
        .split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("Invalid query '{}': expected NAME=VALUE", value))
}

fn parse_instant(value: &str) -> Result<DateTime<Utc>, DashboardError> {
    DateTime::parse_from_rfc3339(value)
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|e| DashboardError::InvalidTimestamp {
            value: value.to_string(),
            message: e.to_string(),
        })
}
