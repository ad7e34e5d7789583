//! CLI module for vtabkit
//!
//! Provides command-line access to the generator tables:
//! - series: integer series
//! - calendar: dates stepped by frequency
//!
//! Rows go to stdout as JSON lines; logs go to stderr.

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, Order, QueryArgs};
pub use commands::{build_query, explain, load_config, parse_filter, parse_value, query, run, run_command, Filter};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{row_object, write_json_line, write_row};
