//! `kerbo` CLI — apply KerboScript value operators from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Binary operators coerce through the precedence ladders
//! kerbo eval str:3 + int:4            # string: 34
//! kerbo eval float:1.5 '*' int:2      # float: 3
//! kerbo eval 'pair:(1, 2)' + 'pair:(3, 4)'
//!
//! # Unary operators (`--` needs the option terminator first)
//! kerbo unary ++ 'pair:(1, 1)'
//! kerbo unary -- -- int:5
//!
//! # Show every projection of a value
//! kerbo inspect str:12
//!
//! # Machine-readable output
//! kerbo --json eval int:5 / int:2
//! ```
//!
//! Operands use a typed literal syntax: `null`, `str:TEXT`, `ptr:NAME`,
//! `int:N`, `float:F`, `bool:B`, `pair:(X, Y)`. Anything without a recognized
//! prefix is a plain string.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use kerbo_core::{coerce, BinaryOp, OrderedPair, UnaryOp, Value};
use tracing::{debug, Level};

#[derive(Parser)]
#[command(
    name = "kerbo",
    version,
    about = "Evaluate KerboScript value operators"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a binary operator (== != + - * / % ^ & |)
    Eval {
        /// Left operand
        #[arg(allow_hyphen_values = true)]
        lhs: String,
        /// Operator symbol
        #[arg(allow_hyphen_values = true)]
        op: String,
        /// Right operand
        #[arg(allow_hyphen_values = true)]
        rhs: String,
    },
    /// Apply a unary operator (+ - ~ ! ++ --)
    Unary {
        /// Operator symbol
        #[arg(allow_hyphen_values = true)]
        op: String,
        /// Operand
        #[arg(allow_hyphen_values = true)]
        operand: String,
    },
    /// Show the kind and every projection of a value
    Inspect {
        /// Operand
        #[arg(allow_hyphen_values = true)]
        operand: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Eval { lhs, op, rhs } => {
            let operator: BinaryOp = op.parse()?;
            let a = parse_operand(&lhs)?;
            let b = parse_operand(&rhs)?;
            let result = a
                .binary(operator, &b)
                .with_context(|| format!("Failed to evaluate {} {} {}", lhs, op, rhs))?;
            print_value(&result, cli.json)?;
        }
        Commands::Unary { op, operand } => {
            let operator: UnaryOp = op.parse()?;
            let value = parse_operand(&operand)?;
            let result = value
                .unary(operator)
                .with_context(|| format!("Failed to evaluate {}{}", op, operand))?;
            print_value(&result, cli.json)?;
        }
        Commands::Inspect { operand } => {
            let value = parse_operand(&operand)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&value.projections())?);
            } else {
                print_projections(&value);
            }
        }
    }

    Ok(())
}

/// Install a stderr subscriber; warnings only unless `-v` is given.
fn init_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("Failed to initialise logging: {err}"))
}

/// Parse a typed operand literal such as `int:5` or `pair:(1, 2)`.
///
/// - `null` is the null value
/// - an unknown prefix (or none) makes the whole text a plain string
/// - a known prefix with a malformed body is an error
fn parse_operand(text: &str) -> Result<Value> {
    if text == "null" {
        return Ok(Value::null());
    }
    let Some((prefix, body)) = text.split_once(':') else {
        return Ok(Value::from_string(text));
    };

    let value = match prefix {
        "str" => Value::from_string(body),
        "ptr" => Value::pointer(body),
        "int" => body
            .trim()
            .parse::<i64>()
            .map(Value::from_integer)
            .with_context(|| format!("Invalid integer literal: '{}'", body))?,
        "float" => body
            .trim()
            .parse::<f64>()
            .map(Value::from_float)
            .with_context(|| format!("Invalid float literal: '{}'", body))?,
        "bool" => match body.trim().to_ascii_lowercase().as_str() {
            "true" => Value::from_boolean(true),
            "false" => Value::from_boolean(false),
            _ => anyhow::bail!("Invalid boolean literal: '{}'. Expected true or false", body),
        },
        "pair" => body
            .parse::<OrderedPair>()
            .map(Value::from_pair)
            .with_context(|| format!("Invalid ordered pair literal: '{}'", body))?,
        _ => Value::from_string(text),
    };
    debug!(operand = text, kind = %value.kind(), "parsed operand");
    Ok(value)
}

fn print_value(value: &Value, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else if value.is_null() {
        println!("null");
    } else {
        println!("{}: {}", value.kind(), value);
    }
    Ok(())
}

fn print_projections(value: &Value) {
    let p = value.projections();
    println!("null:    {}", p.is_null);
    println!("kind:    {}", p.kind);
    println!("string:  {}", p.string);
    println!("integer: {}", p.integer);
    println!("float:   {}", coerce::format_float(p.float));
    println!("boolean: {}", p.boolean);
    println!("pair:    {}", p.pair);
}
