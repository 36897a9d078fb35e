use super::{Cents, Record, RecordKind};

/// Compute the balance of a list of records.
/// Balance = sum of income amounts - sum of expense amounts
pub fn compute_balance(records: &[Record]) -> Cents {
    records
        .iter()
        .fold(0, |balance, record| balance + record.signed_amount())
}

/// Income and expense totals for a list of records, expenses as a positive magnitude.
pub fn income_and_expenses<'a>(records: impl IntoIterator<Item = &'a Record>) -> (Cents, Cents) {
    records
        .into_iter()
        .fold((0, 0), |(income, expenses), record| match record.kind {
            RecordKind::Income => (income + record.amount_cents, expenses),
            RecordKind::Expense => (income, expenses + record.amount_cents),
        })
}
