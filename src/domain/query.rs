//! Stateless views over a slice of records.
//!
//! Every function here takes whatever sequence the caller has (the whole store or an
//! already narrowed list) and returns a new `Vec`, so they chain:
//! filter, then sort, then search.

use chrono::NaiveDate;

use super::Record;

/// Records whose kind matches `kind`, ignoring case ("expense" matches EXPENSE).
pub fn filter_by_kind(records: &[Record], kind: &str) -> Vec<Record> {
    let kind = kind.trim();
    records
        .iter()
        .filter(|r| r.kind.as_str().eq_ignore_ascii_case(kind))
        .cloned()
        .collect()
}

/// Records whose category equals `category`, ignoring case.
pub fn filter_by_category(records: &[Record], category: &str) -> Vec<Record> {
    let wanted = category.to_lowercase();
    records
        .iter()
        .filter(|r| r.category.to_lowercase() == wanted)
        .cloned()
        .collect()
}

/// Records dated within `[start, end]`, both ends inclusive.
/// An inverted range yields nothing.
pub fn filter_by_date_range(records: &[Record], start: NaiveDate, end: NaiveDate) -> Vec<Record> {
    records
        .iter()
        .filter(|r| r.date >= start && r.date <= end)
        .cloned()
        .collect()
}

/// Latest first. Records sharing a date keep their input order.
pub fn sort_by_date(records: &[Record]) -> Vec<Record> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

/// Highest amount first. Equal amounts keep their input order.
pub fn sort_by_amount(records: &[Record]) -> Vec<Record> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| b.amount_cents.cmp(&a.amount_cents));
    sorted
}

/// Records whose description contains `needle` (case-sensitive).
pub fn search_by_description(records: &[Record], needle: &str) -> Vec<Record> {
    records
        .iter()
        .filter(|r| r.description.contains(needle))
        .cloned()
        .collect()
}
