//! Subcommand execution
//!
//! Read-only subcommands map onto [`Route`]s and go through [`Api::handle`],
//! so the CLI answers exactly like the request layer; `call` sends a raw
//! method, route and query. CSV output and the
//! multi-account report call the typed services directly after the same
//! authentication and permission checks.

use crate::api::{service, Api, ApiRequest, ApiResponse, Route};
use crate::cli::{CliArgs, Command, OutputFormat};
use crate::core::auth::{require, TokenTable};
use crate::io::{write_history_csv, FixtureStore};
use crate::strategy::create_strategy;
use crate::types::{AccountHistory, DashboardError, Permission};
use chrono::{DateTime, Utc};
use serde_json::json;
use std::io::Write;
use tracing::debug;

/// Execute the parsed command
///
/// # Returns
///
/// * `Ok(Some(response))` - a JSON response for the caller to print
/// * `Ok(None)` - output was already written to `output` (CSV)
/// * `Err(_)` - fixtures could not be loaded, output could not be written,
///   or a CSV/report caller failed authentication, permission or ownership
pub fn run(
    args: &CliArgs,
    now: DateTime<Utc>,
    output: &mut dyn Write,
) -> Result<Option<ApiResponse>, DashboardError> {
    let store = FixtureStore::new(&args.data_dir);
    let authorization = args.token.as_ref().map(|token| format!("Bearer {}", token));

    let tokens = match args.command {
        Command::Health
        | Command::Call {
            route: Route::Health,
            ..
        } => TokenTable::default(),
        _ => store.token_table()?,
    };
    debug!(data_dir = %store.dir().display(), users = tokens.len(), now = %now, "Dispatching command");

    let mut request = ApiRequest::get();
    request.authorization = authorization.clone();

    let route = match &args.command {
        Command::Health => Route::Health,
        Command::Accounts => Route::Accounts,
        Command::Messages => Route::Messages,
        Command::Customers => Route::Customers,
        Command::Insights => Route::Insights,
        Command::Transactions {
            account,
            range,
            cursor,
        } => {
            if let Some(account) = account {
                request = request.with_query("accountId", account.as_str());
            }
            if let Some(range) = range {
                request = request.with_query("range", range.to_string());
            }
            if let Some(cursor) = cursor {
                request = request.with_query("cursor", cursor.as_str());
            }
            Route::Transactions
        }
        Command::Call {
            route,
            method,
            query,
        } => {
            request = request.with_method(*method);
            for (name, value) in query {
                request = request.with_query(name, value.as_str());
            }
            *route
        }
        Command::BalanceHistory {
            account,
            range,
            format: OutputFormat::Json,
        } => {
            request = request
                .with_query("accountId", account.as_str())
                .with_query("range", range.to_string());
            Route::BalanceHistory
        }
        Command::BalanceHistory {
            account,
            range,
            format: OutputFormat::Csv,
        } => {
            let user = require(&tokens, authorization.as_deref(), Permission::ReadBalanceHistory)?;
            let history = AccountHistory {
                account_id: account.clone(),
                range: *range,
                points: service::balance_history(&store, &user, account, *range, now)?,
            };
            write_history_csv(&[history], output)?;
            return Ok(None);
        }
        Command::Report {
            strategy,
            format,
            ..
        } => {
            let user = require(&tokens, authorization.as_deref(), Permission::ReadBalanceHistory)?;
            let strategy = create_strategy(*strategy, args.command.to_report_config());
            let histories = strategy.generate(store.dir(), &user, now)?;

            return match format {
                OutputFormat::Json => Ok(Some(ApiResponse::ok(json!({ "data": histories })))),
                OutputFormat::Csv => {
                    write_history_csv(&histories, output)?;
                    Ok(None)
                }
            };
        }
    };

    let api = Api::new(&store, &tokens, now);
    Ok(Some(api.handle(route, &request)))
}
