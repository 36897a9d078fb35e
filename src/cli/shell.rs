use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tracing::warn;

use crate::application::{LedgerError, LedgerStore, RecordPatch, parse_kind};
use crate::domain::{
    Clock, Record, filter_by_category, filter_by_date_range, filter_by_kind,
    parse_cents, parse_date, search_by_description, sort_by_amount, sort_by_date,
};
use crate::io::Exporter;

const MAIN_MENU: &str = "\
Main Menu:
1. Add Record
2. View Records
3. Edit Record
4. Delete Record
5. Summarize Records
6. Search Records by Date
7. Exit";

const VIEW_MENU: &str = "\
View Menu:
1. Filter Records
2. Sort Records
3. Search Records
4. Back to Main Menu";

const FILTER_MENU: &str = "\
Filter Options:
1. By Type
2. By Category
3. By Date Range
4. Back to View Menu";

const SORT_MENU: &str = "\
Sort Options:
1. By Date (Latest to Oldest)
2. By Amount (Highest to Lowest)
3. Back to View Menu";

const SUMMARY_MENU: &str = "\
Summarize Options:
1. Last 7 Days
2. Last 30 Days";

/// What the user sees when an answer is rejected
fn rejection_message(error: &LedgerError) -> &'static str {
    match error {
        LedgerError::InvalidDateFormat(_) => "Invalid date format.",
        LedgerError::InvalidKind(_) => "Invalid type.",
        LedgerError::InvalidAmount(_) => "Invalid amount.",
    }
}

/// Whether the session goes on after a menu action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Reads one answer or leaves the session when input runs out.
macro_rules! ask {
    ($shell:expr, $prompt:expr) => {
        match $shell.prompt($prompt)? {
            Some(answer) => answer,
            None => return Ok(Flow::Exit),
        }
    };
}

/// Interactive menu session over a [`LedgerStore`].
///
/// Generic over its streams so a session can be scripted from a buffer.
pub struct Shell<'a, C: Clock, R: BufRead, W: Write> {
    store: &'a mut LedgerStore<C>,
    input: R,
    output: W,
    exporter: Exporter,
}

impl<'a, C: Clock, R: BufRead, W: Write> Shell<'a, C, R, W> {
    pub fn new(store: &'a mut LedgerStore<C>, input: R, output: W, exporter: Exporter) -> Self {
        Self {
            store,
            input,
            output,
            exporter,
        }
    }

    /// Run the main menu until the user exits or input ends.
    pub fn run(mut self) -> Result<()> {
        loop {
            self.say(MAIN_MENU)?;
            let Some(choice) = self.prompt("Choose an option: ")? else {
                return Ok(());
            };

            let flow = match choice.trim() {
                "1" => self.add_record()?,
                "2" => self.view_records()?,
                "3" => self.edit_record()?,
                "4" => self.delete_record()?,
                "5" => self.summarize()?,
                "6" => self.search_by_date()?,
                "7" => {
                    self.say("Exiting...")?;
                    Flow::Exit
                }
                _ => self.invalid_option()?,
            };

            if flow == Flow::Exit {
                return Ok(());
            }
        }
    }

    fn add_record(&mut self) -> Result<Flow> {
        let date = ask!(self, "Enter date (yyyy-MM-dd): ");
        let kind = ask!(self, "Enter type (INCOME/EXPENSE): ");
        let category = ask!(self, "Enter category: ");
        let description = ask!(self, "Enter description: ");
        let amount = ask!(self, "Enter amount: ");

        let parsed = parse_kind(&kind).and_then(|kind| Ok((kind, parse_cents(&amount)?)));
        let added = parsed.and_then(|(kind, amount_cents)| {
            self.store
                .add(&date, kind, category, description, amount_cents)
        });

        match added {
            Ok(_) => self.say("Record added successfully!")?,
            Err(e) => {
                warn!(error = %e, "rejected record");
                self.say(rejection_message(&e))?;
            }
        }
        Ok(Flow::Continue)
    }

    fn view_records(&mut self) -> Result<Flow> {
        let all = self.store.get_all().to_vec();
        self.list(&all)?;

        loop {
            self.say(VIEW_MENU)?;
            let choice = ask!(self, "Choose an option: ");

            let flow = match choice.trim() {
                "1" => self.filter_records()?,
                "2" => self.sort_records()?,
                "3" => {
                    let needle = ask!(self, "Enter description to search: ");
                    let found = search_by_description(self.store.get_all(), &needle);
                    self.list(&found)?;
                    Flow::Continue
                }
                "4" => return Ok(Flow::Continue),
                _ => self.invalid_option()?,
            };

            if flow == Flow::Exit {
                return Ok(Flow::Exit);
            }
        }
    }

    fn filter_records(&mut self) -> Result<Flow> {
        self.say(FILTER_MENU)?;
        let choice = ask!(self, "Choose an option: ");

        match choice.trim() {
            "1" => {
                let kind = ask!(self, "Enter type (INCOME/EXPENSE): ");
                let found = filter_by_kind(self.store.get_all(), &kind);
                self.list(&found)?;
            }
            "2" => {
                let category = ask!(self, "Enter category: ");
                let found = filter_by_category(self.store.get_all(), &category);
                self.list(&found)?;
            }
            "3" => {
                let start = ask!(self, "Enter start date (yyyy-MM-dd): ");
                let end = ask!(self, "Enter end date (yyyy-MM-dd): ");
                match (parse_date(&start), parse_date(&end)) {
                    (Ok(start), Ok(end)) => {
                        let found = filter_by_date_range(self.store.get_all(), start, end);
                        self.list(&found)?;
                    }
                    _ => self.say("Invalid date format.")?,
                }
            }
            "4" => {}
            _ => {
                self.invalid_option()?;
            }
        }
        Ok(Flow::Continue)
    }

    fn sort_records(&mut self) -> Result<Flow> {
        self.say(SORT_MENU)?;
        let choice = ask!(self, "Choose an option: ");

        match choice.trim() {
            "1" => {
                let sorted = sort_by_date(self.store.get_all());
                self.list(&sorted)?;
            }
            "2" => {
                let sorted = sort_by_amount(self.store.get_all());
                self.list(&sorted)?;
            }
            "3" => {}
            _ => {
                self.invalid_option()?;
            }
        }
        Ok(Flow::Continue)
    }

    fn edit_record(&mut self) -> Result<Flow> {
        let date = ask!(self, "Enter date of the record to edit: ");
        let kind = ask!(self, "Enter new type (or leave blank): ");
        let category = ask!(self, "Enter new category (or leave blank): ");
        let description = ask!(self, "Enter new description (or leave blank): ");
        let amount = ask!(self, "Enter new amount (or enter -1 to leave unchanged): ");

        let Ok(date) = parse_date(&date) else {
            self.say("Invalid date format.")?;
            return Ok(Flow::Continue);
        };

        let mut patch = RecordPatch::new().category(category).description(description);
        if !kind.trim().is_empty() {
            match parse_kind(&kind) {
                Ok(kind) => patch = patch.kind(kind),
                Err(e) => {
                    self.say(rejection_message(&e))?;
                    return Ok(Flow::Continue);
                }
            }
        }
        // Any negative answer means "unchanged", even one that rounds to zero cents
        let amount = amount.trim();
        if !amount.is_empty() {
            match parse_cents(amount) {
                Ok(_) if amount.starts_with('-') => {}
                Ok(cents) => patch = patch.amount(cents),
                Err(e) => {
                    self.say(rejection_message(&e.into()))?;
                    return Ok(Flow::Continue);
                }
            }
        }

        if self.store.edit(date, patch) {
            self.say("Record edited successfully!")?;
        } else {
            self.say("Record not found.")?;
        }
        Ok(Flow::Continue)
    }

    fn delete_record(&mut self) -> Result<Flow> {
        let date = ask!(self, "Enter date of the record to delete: ");
        let Ok(date) = parse_date(&date) else {
            self.say("Invalid date format.")?;
            return Ok(Flow::Continue);
        };

        if self.store.delete(date) {
            self.say("Record deleted successfully!")?;
        } else {
            self.say("Record not found.")?;
        }
        Ok(Flow::Continue)
    }

    fn summarize(&mut self) -> Result<Flow> {
        self.say(SUMMARY_MENU)?;
        let choice = ask!(self, "Choose an option: ");

        let days = if choice.trim() == "1" { 7 } else { 30 };
        let summary = self.store.summarize(days);
        self.exporter.write_summary(&mut self.output, &summary)?;
        Ok(Flow::Continue)
    }

    fn search_by_date(&mut self) -> Result<Flow> {
        let date = ask!(self, "Enter date to search (yyyy-MM-dd): ");
        let Ok(date) = parse_date(&date) else {
            self.say("Invalid date format.")?;
            return Ok(Flow::Continue);
        };

        let found = self.store.find_by_date(date);
        self.list(&found)?;
        Ok(Flow::Continue)
    }

    fn invalid_option(&mut self) -> Result<Flow> {
        self.say("Invalid option.")?;
        Ok(Flow::Continue)
    }

    /// Print records plus the balance of the whole ledger.
    fn list(&mut self, records: &[Record]) -> Result<()> {
        let balance = self.store.calculate_balance();
        self.exporter
            .write_records(&mut self.output, records, balance)?;
        Ok(())
    }

    fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text).context("Failed to write to output")
    }

    /// Show `text` and read one line. `None` once input is exhausted.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}", text).context("Failed to write to output")?;
        self.output.flush().context("Failed to flush output")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            return Ok(None);
        }

        let answer = line.trim_end_matches(['\r', '\n']).to_string();
        Ok(Some(answer))
    }
}
