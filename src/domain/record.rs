use chrono::NaiveDate;
use serde::Serialize;

use super::{Cents, format_cents};

/// Format used for every date entering or leaving the ledger.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordKind {
    /// Money coming in; counts positive towards the balance
    Income,
    /// Money going out; counts negative towards the balance
    Expense,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Income => "INCOME",
            RecordKind::Expense => "EXPENSE",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "INCOME" => Some(RecordKind::Income),
            "EXPENSE" => Some(RecordKind::Expense),
            _ => None,
        }
    }

    /// Apply this kind's sign to a magnitude.
    pub fn signed(&self, amount_cents: Cents) -> Cents {
        match self {
            RecordKind::Income => amount_cents,
            RecordKind::Expense => -amount_cents,
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// One ledger entry.
///
/// Records are values: updates go through the `with_*` builders, which hand back a new
/// record and leave the original untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// Calendar day of the entry; also the key used by edit/delete
    pub date: NaiveDate,
    pub kind: RecordKind,
    pub category: String,
    pub description: String,
    /// Amount in cents. Not validated, so negative values are possible.
    pub amount_cents: Cents,
}

impl Record {
    pub fn new(
        date: NaiveDate,
        kind: RecordKind,
        category: impl Into<String>,
        description: impl Into<String>,
        amount_cents: Cents,
    ) -> Self {
        Self {
            date,
            kind,
            category: category.into(),
            description: description.into(),
            amount_cents,
        }
    }

    pub fn with_kind(mut self, kind: RecordKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_amount(mut self, amount_cents: Cents) -> Self {
        self.amount_cents = amount_cents;
        self
    }

    /// Amount as it contributes to the balance.
    pub fn signed_amount(&self) -> Cents {
        self.kind.signed(self.amount_cents)
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {:<8} {:<16} {:<28} {:>12}",
            self.date.format(DATE_FORMAT),
            self.kind,
            self.category,
            self.description,
            format_cents(self.amount_cents)
        )
    }
}
