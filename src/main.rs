//! invoice-validator - AI validation of delivery platform invoices

#![allow(missing_docs)]

use clap::Parser;
use invoice_validator::cli::{self, Cli};
use invoice_validator::config::Config;
use invoice_validator::utils::logging::LoggingUtils;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let args = Cli::parse();

    let config = match Config::load(args.config.as_deref()).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = LoggingUtils::init_logger(&config.logging) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match cli::run(args, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Display keeps the server message readable
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
