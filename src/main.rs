use clap::Parser;
use expense_tracker::args::{Args, Command};
use expense_tracker::{commands, Config, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().expenses_home().path();

    let _: () = match args.command() {
        Command::Init(init_args) => commands::init(home, init_args.storage_key())
            .await?
            .print(),

        Command::Add(add_args) => commands::add(Config::open(home).await?, add_args.clone())
            .await?
            .print(),

        Command::Delete(delete_args) => {
            commands::delete(Config::open(home).await?, delete_args.clone())
                .await?
                .print()
        }

        Command::List(list_args) => {
            let out = commands::list(Config::open(home).await?, list_args.clone()).await?;
            if let Some(listing) = out.structure() {
                print!("{listing}");
            }
            out.print()
        }

        Command::Categories => {
            let out = commands::categories().await?;
            if let Some(categories) = out.structure() {
                for category in categories {
                    println!("{category}");
                }
            }
            out.print()
        }
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
                env!("CARGO_PKG_NAME").replace('-', "_"),
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
