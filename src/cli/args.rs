//! CLI argument definitions using clap
//!
//! Commands:
//! - vtabkit series [START STOP STEP] [--where EXPR].. [--order asc|desc] [--limit N] [--explain]
//! - vtabkit calendar [START STOP STEP] [--where EXPR].. [--order asc|desc] [--limit N] [--explain]

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// vtabkit - bounded row generators driven by constraint planning
#[derive(Parser, Debug)]
#[command(name = "vtabkit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Query the integer series table
    Series(QueryArgs),

    /// Query the calendar table
    Calendar(QueryArgs),
}

/// One single-table query
#[derive(Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// Table construction arguments
    #[arg(value_name = "ARGS", allow_negative_numbers = true)]
    pub args: Vec<String>,

    /// Constraint as `column OP value`; may be repeated
    #[arg(long = "where", value_name = "EXPR")]
    pub filters: Vec<String>,

    /// Order by the table's primary column
    #[arg(long, value_enum)]
    pub order: Option<Order>,

    /// Maximum number of rows to print
    #[arg(long)]
    pub limit: Option<usize>,

    /// Print the negotiated plan instead of rows
    #[arg(long)]
    pub explain: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
