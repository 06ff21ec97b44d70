//! Command line arguments

use crate::core::validation::InvoiceDoctype;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// AI validation of delivery platform invoices
#[derive(Debug, Parser)]
#[command(name = "invoice-validator", version, about)]
pub struct Cli {
    /// YAML configuration file
    #[arg(short, long, env = "INVOICE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate several documents one after another
    Batch {
        #[arg(short, long, value_parser = parse_doctype)]
        doctype: InvoiceDoctype,

        /// Document names, in processing order
        names: Vec<String>,
    },
    /// Re-run AI validation of a single document
    Recheck {
        #[arg(short, long, value_parser = parse_doctype)]
        doctype: InvoiceDoctype,

        name: String,
    },
}

fn parse_doctype(value: &str) -> Result<InvoiceDoctype, String> {
    value.parse().map_err(|e: crate::utils::error::ValidatorError| e.to_string())
}
