// CLI module
// Command-line interface and argument parsing

mod args;
mod dispatch;

pub use args::{CliArgs, Command, OutputFormat, StrategyType};
pub use dispatch::run;

use clap::Parser;

/// Parse command-line arguments using clap
///
/// If parsing fails (invalid arguments, unknown subcommand, or `--help`),
/// clap displays an error message or help text and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
