use clap::Parser;
use expense_tracker::args::{Args, Command};
use expense_tracker::{commands, Config, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e}");
            ExitCode::FAILURE
        }
    }
}

pub fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let common = args.common();
    let mut config = Config::load(common.config(), common.file())?;
    if let Some(policy) = common.on_bad_line() {
        config = config.with_load_policy(policy);
    }
    debug!("Using expenses file {}", config.data_file().display());

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Add(add_args) => commands::add(&config, add_args)?.print(false),
        Command::Remove(remove_args) => commands::remove(&config, remove_args)?.print(false),
        Command::List(list_args) => commands::list(&config, list_args)?.print(list_args.json()),
        Command::Totals(json_args) => {
            commands::totals(&config, json_args)?.print(json_args.json())
        }
        Command::Months(json_args) => {
            commands::months(&config, json_args)?.print(json_args.json())
        }
        Command::Summary(list_args) => {
            commands::summary(&config, list_args)?.print(list_args.json())
        }
        Command::Export(export_args) => commands::export(&config, export_args)?.print(false),
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
            // RUST_LOG does not exist; use the given level for the library and the binary only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                level,
                env!("CARGO_CRATE_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
