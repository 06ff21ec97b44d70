//! Command line front end
//!
//! `batch` drives the list view batch dialog over the given names and
//! `recheck` runs the single document action.

mod args;
mod console;

pub use args::{Cli, Command};
pub use console::{ArgsListView, ConsolePresenter};

use crate::config::Config;
use crate::core::trigger::{BatchValidation, Indicator, recheck_document};
use crate::core::validation::{ConfidenceBadge, HttpValidationClient};
use crate::utils::error::{Result, ValidatorError};
use crate::utils::logging::LoggingUtils;
use std::sync::Arc;
use tracing::info;

/// Execute a parsed command against the configured ERP
pub async fn run(cli: Cli, config: Config) -> Result<()> {
    let client = Arc::new(HttpValidationClient::new(&config.server)?);
    info!(endpoint = %client.endpoint(), "Validation client ready");

    match cli.command {
        Command::Batch { doctype, names } => {
            let list = ArgsListView::new(doctype, names);
            let presenter = ConsolePresenter;
            let validation = BatchValidation::new(client, &config.batch);

            let Some(report) = validation.confirm(&list, &presenter).await else {
                return Err(ValidatorError::EmptySelection);
            };

            info!(
                run_id = %report.run_id,
                succeeded = report.succeeded,
                failed = report.failed,
                elapsed = %LoggingUtils::format_duration(report.elapsed()),
                "Batch finished"
            );
            for (item, failure) in report.failures() {
                eprintln!("  {}: {}", item.name, failure.reason);
            }
            Ok(())
        }
        Command::Recheck { doctype, name } => {
            let outcome = recheck_document(client.as_ref(), doctype, &name).await;
            println!("{}", ConsolePresenter::notice_line(&outcome.notice));

            if let Some(result) = &outcome.result {
                if let Some(badge) = ConfidenceBadge::from_score(result.confidence_percent()) {
                    println!("Confidence: {}", badge);
                }
                for comparison in result.mismatched_fields() {
                    println!(
                        "  {}: pdf={} document={}",
                        comparison.field, comparison.pdf_value, comparison.doctype_value
                    );
                }
            }

            if outcome.notice.indicator == Indicator::Red {
                return Err(ValidatorError::remote(None, outcome.notice.message));
            }
            Ok(())
        }
    }
}
