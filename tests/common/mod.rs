// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use chrono::NaiveDate;
use finledger::application::LedgerStore;
use finledger::domain::{FixedClock, RecordKind};

/// Helper to create an empty store whose "today" is `today`
pub fn test_store(today: &str) -> LedgerStore<FixedClock> {
    LedgerStore::with_clock(FixedClock(parse_date(today)))
}

/// Helper to parse a date string into NaiveDate
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// Test fixture: the two records from the January salary/groceries scenario
pub struct JanuaryRecords;

impl JanuaryRecords {
    pub fn add(store: &mut LedgerStore<FixedClock>) -> Result<()> {
        store.add("2024-01-01", RecordKind::Income, "Salary", "Jan pay", 300000)?;
        store.add("2024-01-05", RecordKind::Expense, "Food", "Groceries", 15000)?;
        Ok(())
    }
}
