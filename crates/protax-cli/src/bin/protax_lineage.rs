//! protax-lineage - Main entry point

use clap::error::ErrorKind;
use clap::Parser;
use protax_cli::commands::lineage;
use protax_cli::LineageArgs;
use protax_common::logging::{init_logging, LogConfig, LogLevel};
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Parse command-line arguments. Usage errors exit before any file is
    // created or truncated.
    let args = match LineageArgs::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = e.print();
            process::exit(code);
        }
    };

    let (file_level, console_level) = if args.verbose {
        (LogLevel::Debug, LogLevel::Debug)
    } else {
        (LogLevel::Info, LogLevel::Error)
    };

    let mut log_config = LogConfig::builder()
        .level(file_level)
        .console_level(console_level)
        .log_file(lineage::LOG_FILE)
        .build();
    if let Err(e) = log_config.apply_env() {
        eprintln!("Warning: {}", e);
    }

    // Keep the guard alive so buffered log lines flush on exit
    let guard = match init_logging(&log_config) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: failed to initialize logging: {}", e);
            None
        }
    };

    if let Err(e) = lineage::run(&args).await {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        drop(guard);
        process::exit(1);
    }
}
