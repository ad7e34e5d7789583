//! CLI command implementations
//!
//! Each subcommand constructs one table from its positional arguments,
//! turns the `--where`/`--order`/`--limit` flags into a [`HostQuery`], and
//! either runs it or prints the negotiated plan.

use std::io::{self, Write};
use std::path::Path;

use serde_json::json;

use crate::calendar::CalendarTable;
use crate::config::VtabConfig;
use crate::planner::{ColumnIndex, ConstraintOp, PlanExplain};
use crate::series::SeriesTable;
use crate::vtab::{unquote, HostQuery, TableArgs, Value, VirtualTable};

use super::args::{Cli, Command, Order, QueryArgs};
use super::errors::{CliError, CliResult};
use super::io::{write_json_line, write_row};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cli: Cli) -> CliResult<()> {
    let config = load_config(cli.config.as_deref())?;
    config.apply()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Command::Series(args) => query::<SeriesTable, _>(&config, &args, &mut out),
        Command::Calendar(args) => query::<CalendarTable, _>(&config, &args, &mut out),
    }
}

/// Load configuration, or defaults when no file is given
pub fn load_config(path: Option<&Path>) -> CliResult<VtabConfig> {
    match path {
        Some(path) => Ok(VtabConfig::load(path)?),
        None => Ok(VtabConfig::default()),
    }
}

/// Construct table `T`, run the query and stream rows (or the plan)
pub fn query<T: VirtualTable, W: Write>(
    config: &VtabConfig,
    args: &QueryArgs,
    out: &mut W,
) -> CliResult<()> {
    let mut table = T::connect(&TableArgs::positional(&args.args), config);
    let host = build_query::<T>(args)?;

    if args.explain {
        return explain(&mut table, &host, out);
    }

    host.run_with(&mut table, |row| write_row::<T, _>(out, &row))?;
    out.flush()?;
    Ok(())
}

/// Print the plan the table negotiates for a query
pub fn explain<T: VirtualTable, W: Write>(
    table: &mut T,
    host: &HostQuery,
    out: &mut W,
) -> CliResult<()> {
    let (info, result) = host.plan(table);

    let report = match result {
        Ok(id) => {
            let values = host.bound_values(&info);
            let plan = table
                .plans()
                .get(id)
                .map(|plan| PlanExplain::new::<T::Column>(plan).with_values(&values).to_string())
                .unwrap_or_default();
            let usage: Vec<_> = info
                .usage
                .iter()
                .map(|u| json!({ "argv_index": u.argv_index, "omit": u.omit }))
                .collect();

            json!({
                "table": T::MODULE,
                "status": "accepted",
                "plan": plan,
                "idx_num": id,
                "estimated_cost": info.estimated_cost,
                "estimated_rows": info.estimated_rows,
                "unique": info.is_unique_scan(),
                "order_by_consumed": info.order_by_consumed,
                "usage": usage,
            })
        }
        Err(err) => json!({
            "table": T::MODULE,
            "status": "rejected",
            "code": err.code().code(),
            "message": err.message(),
        }),
    };

    write_json_line(out, &report)?;
    out.flush()?;
    Ok(())
}

/// Translate query flags into a host query against table `T`
pub fn build_query<T: VirtualTable>(args: &QueryArgs) -> CliResult<HostQuery> {
    let mut host = HostQuery::new();

    for expr in &args.filters {
        let filter = parse_filter::<T::Column>(T::MODULE, expr)?;
        host = host.filter(filter.column, filter.op, filter.value);
    }
    if let Some(order) = args.order {
        host = host.order_by(T::PRIMARY, order == Order::Desc);
    }
    if let Some(limit) = args.limit {
        host = host.limit(limit);
    }
    Ok(host)
}

/// A parsed `--where` expression
#[derive(Debug, Clone, PartialEq)]
pub struct Filter<C> {
    pub column: C,
    pub op: ConstraintOp,
    pub value: Value,
}

const OP_CHARS: &[char] = &['<', '>', '=', '!'];

/// Parse `column OP value` with OP one of `= == != <> < <= > >=`
pub fn parse_filter<C: ColumnIndex>(table: &str, expr: &str) -> CliResult<Filter<C>> {
    let start = expr.find(OP_CHARS).ok_or_else(|| CliError::invalid_filter(expr))?;
    let rest = &expr[start..];
    let end = rest.find(|c: char| !OP_CHARS.contains(&c)).unwrap_or(rest.len());

    let op = match &rest[..end] {
        "=" | "==" => ConstraintOp::Eq,
        "!=" | "<>" => ConstraintOp::Ne,
        "<" => ConstraintOp::Lt,
        "<=" => ConstraintOp::Le,
        ">" => ConstraintOp::Gt,
        ">=" => ConstraintOp::Ge,
        _ => return Err(CliError::invalid_filter(expr)),
    };

    let name = expr[..start].trim();
    let value = rest[end..].trim();
    if name.is_empty() || value.is_empty() {
        return Err(CliError::invalid_filter(expr));
    }

    let column = C::from_name(name).ok_or_else(|| CliError::unknown_column(table, name))?;

    Ok(Filter {
        column,
        op,
        value: parse_value(value),
    })
}

/// `null` is NULL, numbers parse as numbers, quoted or other text is text
pub fn parse_value(text: &str) -> Value {
    let text = text.trim();
    let unquoted = unquote(text);
    if unquoted.len() != text.len() {
        return Value::Text(unquoted.to_string());
    }
    if text.eq_ignore_ascii_case("null") {
        return Value::Null;
    }
    if let Ok(i) = text.parse::<i64>() {
        return Value::Integer(i);
    }
    match text.parse::<f64>() {
        Ok(f) if f.is_finite() => Value::Float(f),
        _ => Value::Text(text.to_string()),
    }
}
