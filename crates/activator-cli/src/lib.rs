//! # activator-cli
//!
//! Command-line front end: constructs a fixture type from literal arguments
//! through the process-wide activator.
//!
//! ## Environment Variables
//!
//! - `ACTIVATOR_RS_LOG`: `tracing` filter directives (default: `warn`)
//! - `ACTIVATOR_RS_METRICS`: see [`ActivatorConfig`](activator_core::ActivatorConfig)
use activator_core::{ActivationError, Activator};
use activator_types::{error::TypeResolutionError, ObjectRef, TypeResolver, Value};
use clap::Parser;
use std::{
    io::{self, Write},
    process::ExitCode,
    time::Instant,
};
use thiserror::Error;

pub mod fixtures;
pub mod literal;

pub const LOG_ENV: &str = "ACTIVATOR_RS_LOG";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Construct a type from literal arguments using cached factories"
)]
pub struct Args {
    /// Full name of the type to construct (e.g. Fixtures.MultiCtor)
    #[arg(value_name = "TYPE")]
    pub type_name: String,
    /// Constructor arguments: null, true/false, 42, 42L, 1.5, 'c', @<ticks>, or text
    #[arg(value_name = "ARGS", allow_negative_numbers = true)]
    pub arguments: Vec<String>,
    /// Construct this many times and report the time per call
    #[arg(short = 'n', long, default_value_t = 1, value_name = "N")]
    pub iterations: u32,
    /// Print factory cache statistics
    #[arg(long)]
    pub stats: bool,
    /// Print statistics as JSON
    #[arg(long, requires = "stats")]
    pub json: bool,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Literal(#[from] literal::LiteralError),
    #[error(transparent)]
    TypeResolution(#[from] TypeResolutionError),
    #[error(transparent)]
    Activation(#[from] ActivationError),
    #[error("failed to serialize statistics: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

pub fn run_cli() -> ExitCode {
    init_tracing();
    let args = Args::parse();
    let stdout = io::stdout();

    match run(&args, activator_core::global(), &mut stdout.lock()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

/// Executes one invocation, writing the constructed instance (and optional
/// timing and statistics) to `out`.
pub fn run(args: &Args, activator: &Activator, out: &mut impl Write) -> Result<ObjectRef, CliError> {
    let ty = fixtures::registry().locate_type(&args.type_name)?;
    let values = args
        .arguments
        .iter()
        .map(|a| literal::parse_literal(a))
        .collect::<Result<Vec<Value>, _>>()?;

    let iterations = args.iterations.max(1);
    let started = Instant::now();
    let mut instance = activator.construct(&ty, &values)?;
    for _ in 1..iterations {
        instance = activator.construct(&ty, &values)?;
    }
    let elapsed = started.elapsed();

    writeln!(out, "{:#?}", instance)?;
    if iterations > 1 {
        writeln!(
            out,
            "{} iterations in {:?} ({:?}/call)",
            iterations,
            elapsed,
            elapsed / iterations
        )?;
    }
    if args.stats {
        let stats = activator.cache_stats();
        if args.json {
            writeln!(out, "{}", serde_json::to_string_pretty(&stats)?)?;
        } else {
            writeln!(out, "{}", stats)?;
        }
    }
    Ok(instance)
}
