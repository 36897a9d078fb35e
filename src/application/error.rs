use thiserror::Error;

use crate::domain::ParseCentsError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Invalid date format: '{0}' (expected YYYY-MM-DD)")]
    InvalidDateFormat(String),

    #[error("Invalid record type: '{0}' (expected INCOME or EXPENSE)")]
    InvalidKind(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] ParseCentsError),
}
