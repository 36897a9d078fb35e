use anyhow::Result;
use serde::Serialize;
use std::io::Write;

use crate::application::PeriodSummary;
use crate::domain::{Cents, DATE_FORMAT, Record, format_cents};

/// How list views and summaries are written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            "csv" => Some(OutputFormat::Csv),
            _ => None,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// JSON shape of a list view
#[derive(Serialize)]
struct RecordListing<'a> {
    records: &'a [Record],
    balance_cents: Cents,
}

/// Writes records and summaries in one [`OutputFormat`].
pub struct Exporter {
    format: OutputFormat,
}

impl Exporter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Write a list of records followed by the ledger balance.
    /// Returns the number of records written.
    pub fn write_records<W: Write>(
        &self,
        mut writer: W,
        records: &[Record],
        balance: Cents,
    ) -> Result<usize> {
        match self.format {
            OutputFormat::Table => {
                if records.is_empty() {
                    writeln!(writer, "No records found.")?;
                } else {
                    writeln!(
                        writer,
                        "{:<10} {:<8} {:<16} {:<28} {:>12}",
                        "DATE", "TYPE", "CATEGORY", "DESCRIPTION", "AMOUNT"
                    )?;
                    writeln!(writer, "{}", "-".repeat(78))?;
                    for record in records {
                        writeln!(writer, "{}", record)?;
                    }
                }
                writeln!(writer, "Balance: {}", format_cents(balance))?;
            }
            OutputFormat::Json => {
                let listing = RecordListing {
                    records,
                    balance_cents: balance,
                };
                serde_json::to_writer_pretty(&mut writer, &listing)?;
                writeln!(writer)?;
            }
            OutputFormat::Csv => {
                {
                    let mut csv_writer = csv::Writer::from_writer(&mut writer);
                    csv_writer.write_record(["date", "type", "category", "description", "amount"])?;
                    for record in records {
                        csv_writer.write_record([
                            record.date.format(DATE_FORMAT).to_string(),
                            record.kind.as_str().to_string(),
                            record.category.clone(),
                            record.description.clone(),
                            format_cents(record.amount_cents),
                        ])?;
                    }
                    csv_writer.flush()?;
                }
                writeln!(writer, "Balance: {}", format_cents(balance))?;
            }
        }

        Ok(records.len())
    }

    /// Write a period summary.
    pub fn write_summary<W: Write>(&self, mut writer: W, summary: &PeriodSummary) -> Result<()> {
        match self.format {
            OutputFormat::Table => {
                writeln!(writer, "Summary for the last {} days:", summary.days)?;
                writeln!(writer, "Total Income: {}", format_cents(summary.total_income))?;
                writeln!(writer, "Total Expenses: {}", format_cents(summary.total_expenses))?;
                writeln!(
                    writer,
                    "Average Daily Spending: {}",
                    format_cents(summary.average_daily_spending)
                )?;
            }
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut writer, summary)?;
                writeln!(writer)?;
            }
            OutputFormat::Csv => {
                let mut csv_writer = csv::Writer::from_writer(&mut writer);
                csv_writer.write_record([
                    "days",
                    "total_income",
                    "total_expenses",
                    "average_daily_spending",
                    "record_count",
                ])?;
                csv_writer.write_record([
                    summary.days.to_string(),
                    format_cents(summary.total_income),
                    format_cents(summary.total_expenses),
                    format_cents(summary.average_daily_spending),
                    summary.record_count.to_string(),
                ])?;
                csv_writer.flush()?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::RecordKind;

    fn records() -> Vec<Record> {
        vec![
            Record::new(
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                RecordKind::Income,
                "Salary",
                "Jan pay",
                300000,
            ),
            Record::new(
                NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
                RecordKind::Expense,
                "Food",
                "Groceries, weekly",
                15000,
            ),
        ]
    }

    fn render(format: OutputFormat, records: &[Record], balance: Cents) -> String {
        let mut out = Vec::new();
        Exporter::new(format)
            .write_records(&mut out, records, balance)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_str("csv"), Some(OutputFormat::Csv));
        assert_eq!(OutputFormat::from_str("yaml"), None);
    }

    #[test]
    fn test_table_ends_with_balance() {
        let text = render(OutputFormat::Table, &records(), 285000);

        assert!(text.contains("Jan pay"));
        assert!(text.contains("3000.00"));
        assert_eq!(text.lines().last(), Some("Balance: 2850.00"));
    }

    #[test]
    fn test_table_empty_listing() {
        let text = render(OutputFormat::Table, &[], 0);
        assert_eq!(text, "No records found.\nBalance: 0.00\n");
    }

    #[test]
    fn test_json_embeds_balance() {
        let text = render(OutputFormat::Json, &records(), 285000);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["balance_cents"], 285000);
        assert_eq!(value["records"].as_array().unwrap().len(), 2);
        assert_eq!(value["records"][1]["category"], "Food");
    }

    #[test]
    fn test_csv_quotes_fields_with_commas() {
        let text = render(OutputFormat::Csv, &records(), 285000);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "date,type,category,description,amount");
        assert_eq!(lines[1], "2024-01-01,INCOME,Salary,Jan pay,3000.00");
        assert_eq!(lines[2], "2024-01-05,EXPENSE,Food,\"Groceries, weekly\",150.00");
        assert_eq!(lines[3], "Balance: 2850.00");
    }

    #[test]
    fn test_summary_table() {
        let summary = PeriodSummary::new(7, 300000, 15000, 2);
        let mut out = Vec::new();
        Exporter::new(OutputFormat::Table)
            .write_summary(&mut out, &summary)
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Summary for the last 7 days:\n\
             Total Income: 3000.00\n\
             Total Expenses: 150.00\n\
             Average Daily Spending: 75.00\n"
        );
    }
}
