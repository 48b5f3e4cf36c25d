use budget_charts::args::{Args, Command};
use budget_charts::commands::{self, Outcome};
use budget_charts::{Config, ErrorType, Result};
use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    let result = main_inner(args);
    let outcome = Outcome::of(&result);
    if let Err(e) = &result {
        error!("Exiting with error ({outcome}): {e}");
    }
    ExitCode::from(outcome.exit_code())
}

pub fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let config = Config::load(args.common().config()).map_err(|e| {
        budget_charts::Error::new(ErrorType::Config, e.context("Unable to load configuration"))
    })?;

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Chart(chart_args) => commands::chart(config, chart_args)?.print(),
        Command::List(list_args) => commands::list(config, list_args)?.print(),
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
