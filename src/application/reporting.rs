use serde::Serialize;

use crate::domain::Cents;

/// Totals over the trailing window for the last `days` days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodSummary {
    pub days: u32,
    pub total_income: Cents,
    /// Positive magnitude of all matching expenses
    pub total_expenses: Cents,
    /// `total_expenses / record_count`: per matching record, not per calendar day
    pub average_daily_spending: Cents,
    /// Matching records of either kind
    pub record_count: usize,
}

impl PeriodSummary {
    pub fn new(days: u32, total_income: Cents, total_expenses: Cents, record_count: usize) -> Self {
        let average_daily_spending = if record_count > 0 {
            total_expenses / record_count as Cents
        } else {
            0
        };
        Self {
            days,
            total_income,
            total_expenses,
            average_daily_spending,
            record_count,
        }
    }
}
