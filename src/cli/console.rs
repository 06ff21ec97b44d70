//! Terminal stand-ins for the list view and the progress dialog

use crate::core::trigger::{BatchPresenter, Indicator, ListView, Notice};
use crate::core::validation::InvoiceDoctype;
use crate::utils::error::Result;
use async_trait::async_trait;
use tracing::{debug, info};

/// A "list view" whose checked rows are the names given on the command line
#[derive(Debug, Clone)]
pub struct ArgsListView {
    doctype: InvoiceDoctype,
    names: Vec<String>,
}

impl ArgsListView {
    pub fn new(doctype: InvoiceDoctype, names: Vec<String>) -> Self {
        Self { doctype, names }
    }
}

#[async_trait]
impl ListView for ArgsListView {
    fn doctype(&self) -> InvoiceDoctype {
        self.doctype
    }

    fn checked_items(&self) -> Vec<String> {
        self.names.clone()
    }

    async fn refresh(&self) -> Result<()> {
        debug!(doctype = %self.doctype, "Nothing to refresh on the console");
        Ok(())
    }
}

/// Writes progress to stderr and notices to stdout
#[derive(Debug, Default)]
pub struct ConsolePresenter;

impl ConsolePresenter {
    pub fn notice_line(notice: &Notice) -> String {
        let marker = match notice.indicator {
            Indicator::Green => "[ok]",
            Indicator::Orange => "[warn]",
            Indicator::Red => "[error]",
        };
        format!("{} {}", marker, notice)
    }
}

impl BatchPresenter for ConsolePresenter {
    fn set_busy(&self, busy: bool) {
        debug!(busy, "Batch dialog busy state changed");
    }

    fn render(&self, text: &str) {
        eprintln!("{}", text.replace('\n', " | "));
    }

    fn hide(&self) {
        debug!("Batch dialog closed");
    }

    fn notify(&self, notice: Notice) {
        info!(indicator = ?notice.indicator, "{}", notice.message);
        println!("{}", Self::notice_line(&notice));
    }
}
