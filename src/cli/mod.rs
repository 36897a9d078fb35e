use anyhow::{Context, Result};
use clap::Parser;
use std::io::{stdin, stdout};
use tracing::info;

use crate::application::LedgerStore;
use crate::domain::{Clock, FixedClock, SystemClock, parse_date};
use crate::io::{Exporter, OutputFormat};
use crate::logging;

mod shell;

pub use shell::Shell;

/// finledger - Personal Finance Ledger
#[derive(Parser)]
#[command(name = "finledger")]
#[command(about = "Track income and expenses in an interactive, in-memory ledger")]
#[command(version)]
pub struct Cli {
    /// Enable verbose (debug) logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Output format for listings and summaries: table, json, csv
    #[arg(short, long, default_value = "table")]
    pub format: String,

    /// Pretend today is this date (YYYY-MM-DD) instead of reading the system clock
    #[arg(long)]
    pub today: Option<String>,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        logging::init(self.verbose);

        let format = OutputFormat::from_str(&self.format).ok_or_else(|| {
            anyhow::anyhow!(
                "Invalid format '{}'. Valid formats: table, json, csv",
                self.format
            )
        })?;

        let clock: Box<dyn Clock> = match self.today.as_deref() {
            Some(date_str) => {
                let date = parse_date(date_str).with_context(|| {
                    format!("Invalid date format '{}'. Use YYYY-MM-DD", date_str)
                })?;
                Box::new(FixedClock(date))
            }
            None => Box::new(SystemClock),
        };

        info!(today = %clock.today(), %format, "starting ledger session");

        let mut store = LedgerStore::with_clock(clock);
        let shell = Shell::new(
            &mut store,
            stdin().lock(),
            stdout().lock(),
            Exporter::new(format),
        );
        shell.run()
    }
}
