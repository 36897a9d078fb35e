use std::collections::VecDeque;

use chrono::{Days, NaiveDate};
use tracing::debug;

use crate::domain::{
    Cents, Clock, Record, RecordKind, SystemClock, compute_balance, income_and_expenses,
    parse_date,
};

use super::{LedgerError, PeriodSummary};

/// Parse a record type name, ignoring case.
pub fn parse_kind(input: &str) -> Result<RecordKind, LedgerError> {
    RecordKind::from_str(input).ok_or_else(|| LedgerError::InvalidKind(input.trim().to_string()))
}

/// How far back the trailing window reaches, in days.
pub const WINDOW_DAYS: u64 = 30;

/// Optional field updates for [`LedgerStore::edit`].
///
/// Empty strings and negative amounts are ignored, so a caller can forward raw prompt
/// answers (blank, or `-1` for the amount) without translating them first.
#[derive(Debug, Clone, Default)]
pub struct RecordPatch {
    pub kind: Option<RecordKind>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub amount_cents: Option<Cents>,
}

impl RecordPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: RecordKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn amount(mut self, amount_cents: Cents) -> Self {
        self.amount_cents = Some(amount_cents);
        self
    }

    fn apply(&self, record: Record) -> Record {
        let mut record = record;
        if let Some(kind) = self.kind {
            record = record.with_kind(kind);
        }
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            record = record.with_category(category);
        }
        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            record = record.with_description(description);
        }
        if let Some(amount) = self.amount_cents.filter(|a| *a >= 0) {
            record = record.with_amount(amount);
        }
        record
    }
}

/// In-memory ledger: the records in insertion order plus a trailing window of recent
/// ones used for summaries.
///
/// The window is a FIFO of snapshots taken at `add` time. Only `add` changes it:
/// edits and deletes on the main list never reach the window.
pub struct LedgerStore<C: Clock = SystemClock> {
    records: Vec<Record>,
    window: VecDeque<Record>,
    clock: C,
}

impl LedgerStore<SystemClock> {
    /// Create an empty store on the local wall clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for LedgerStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> LedgerStore<C> {
    /// Create an empty store reading "today" from `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self {
            records: Vec::new(),
            window: VecDeque::new(),
            clock,
        }
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    // ========================
    // CRUD
    // ========================

    /// Append a record dated `date` (YYYY-MM-DD) and refresh the trailing window.
    pub fn add(
        &mut self,
        date: &str,
        kind: RecordKind,
        category: impl Into<String>,
        description: impl Into<String>,
        amount_cents: Cents,
    ) -> Result<Record, LedgerError> {
        let date =
            parse_date(date).map_err(|_| LedgerError::InvalidDateFormat(date.to_string()))?;
        let record = Record::new(date, kind, category, description, amount_cents);

        debug!(date = %record.date, kind = %record.kind, amount_cents, "adding record");
        self.records.push(record.clone());
        self.update_window(record.clone());

        Ok(record)
    }

    /// Apply `patch` to the first record dated `date`.
    /// Returns false when no record has that date.
    pub fn edit(&mut self, date: NaiveDate, patch: RecordPatch) -> bool {
        let Some(slot) = self.records.iter_mut().find(|r| r.date == date) else {
            debug!(%date, "no record to edit");
            return false;
        };

        *slot = patch.apply(slot.clone());
        debug!(%date, "edited record");
        true
    }

    /// Remove every record dated `date`.
    /// Returns true if at least one record was removed.
    pub fn delete(&mut self, date: NaiveDate) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.date != date);
        let removed = before - self.records.len();

        debug!(%date, removed, "deleted records");
        removed > 0
    }

    /// All records in insertion order.
    pub fn get_all(&self) -> &[Record] {
        &self.records
    }

    /// Records dated exactly `date`, in insertion order.
    pub fn find_by_date(&self, date: NaiveDate) -> Vec<Record> {
        self.records
            .iter()
            .filter(|r| r.date == date)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    // ========================
    // Aggregates
    // ========================

    /// Signed sum over every record, recomputed on each call.
    pub fn calculate_balance(&self) -> Cents {
        compute_balance(&self.records)
    }

    /// `days` before today, or the earliest representable date when that underflows.
    fn cutoff(&self, days: u64) -> NaiveDate {
        self.clock
            .today()
            .checked_sub_days(Days::new(days))
            .unwrap_or(NaiveDate::MIN)
    }

    /// Income/expense totals for window records dated on or after `today - days`.
    ///
    /// Only the trailing window is scanned, so a range wider than the window (or a
    /// record the window already evicted) is silently cut short.
    pub fn summarize(&self, days: u32) -> PeriodSummary {
        let cutoff = self.cutoff(u64::from(days));
        let matching: Vec<&Record> = self.window.iter().filter(|r| r.date >= cutoff).collect();
        let (total_income, total_expenses) = income_and_expenses(matching.iter().copied());

        PeriodSummary::new(days, total_income, total_expenses, matching.len())
    }

    /// Snapshot of the trailing window, oldest entry first.
    pub fn window(&self) -> impl Iterator<Item = &Record> {
        self.window.iter()
    }

    fn update_window(&mut self, record: Record) {
        self.window.push_back(record);

        let cutoff = self.cutoff(WINDOW_DAYS);
        while let Some(head) = self.window.front() {
            if head.date >= cutoff {
                break;
            }
            debug!(date = %head.date, %cutoff, "evicting record from trailing window");
            self.window.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FixedClock;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn store_on(today: &str) -> LedgerStore<FixedClock> {
        LedgerStore::with_clock(FixedClock(date(today)))
    }

    #[test]
    fn test_add_rejects_bad_date() {
        let mut store = store_on("2024-01-10");
        let result = store.add("01/05/2024", RecordKind::Expense, "Food", "Lunch", 1200);

        assert_eq!(
            result,
            Err(LedgerError::InvalidDateFormat("01/05/2024".to_string()))
        );
        assert!(store.is_empty());
        assert_eq!(store.window().count(), 0);
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!(parse_kind("expense"), Ok(RecordKind::Expense));
        assert_eq!(
            parse_kind(" loan "),
            Err(LedgerError::InvalidKind("loan".to_string()))
        );
    }

    #[test]
    fn test_add_accepts_negative_amount() {
        let mut store = store_on("2024-01-10");
        let record = store
            .add("2024-01-09", RecordKind::Expense, "Refund", "Returned shoes", -4000)
            .unwrap();

        assert_eq!(record.amount_cents, -4000);
        assert_eq!(store.calculate_balance(), 4000);
    }

    #[test]
    fn test_edit_touches_first_match_only() {
        let mut store = store_on("2024-01-10");
        store.add("2024-01-05", RecordKind::Expense, "Food", "Lunch", 1200).unwrap();
        store.add("2024-01-05", RecordKind::Expense, "Food", "Dinner", 2500).unwrap();

        assert!(store.edit(date("2024-01-05"), RecordPatch::new().category("Dining")));

        let all = store.get_all();
        assert_eq!(all[0].category, "Dining");
        assert_eq!(all[1].category, "Food");
    }

    #[test]
    fn test_edit_ignores_blank_fields_and_negative_amount() {
        let mut store = store_on("2024-01-10");
        let original = store
            .add("2024-01-05", RecordKind::Expense, "Food", "Lunch", 1200)
            .unwrap();

        let patch = RecordPatch::new().category("").description("").amount(-100);
        assert!(store.edit(date("2024-01-05"), patch));
        assert_eq!(store.get_all()[0], original);
    }

    #[test]
    fn test_edit_missing_date_returns_false() {
        let mut store = store_on("2024-01-10");
        store.add("2024-01-05", RecordKind::Income, "Gift", "Birthday", 5000).unwrap();

        assert!(!store.edit(date("2024-01-06"), RecordPatch::new().amount(1)));
        assert_eq!(store.get_all()[0].amount_cents, 5000);
    }

    #[test]
    fn test_delete_removes_all_matches() {
        let mut store = store_on("2024-01-10");
        store.add("2024-01-05", RecordKind::Expense, "Food", "Lunch", 1200).unwrap();
        store.add("2024-01-06", RecordKind::Expense, "Food", "Snack", 300).unwrap();
        store.add("2024-01-05", RecordKind::Expense, "Food", "Dinner", 2500).unwrap();

        assert!(store.delete(date("2024-01-05")));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get_all()[0].description, "Snack");

        assert!(!store.delete(date("2024-01-05")));
    }

    #[test]
    fn test_edit_and_delete_do_not_touch_window() {
        let mut store = store_on("2024-01-10");
        store.add("2024-01-05", RecordKind::Expense, "Food", "Lunch", 1200).unwrap();

        store.edit(date("2024-01-05"), RecordPatch::new().amount(9900));
        assert_eq!(store.summarize(30).total_expenses, 1200);

        store.delete(date("2024-01-05"));
        assert!(store.is_empty());
        assert_eq!(store.summarize(30).record_count, 1);
    }

    #[test]
    fn test_window_evicts_only_from_head() {
        let mut store = store_on("2024-03-01");
        // 2024-03-01 - 30 days = 2024-01-31
        store.add("2024-02-20", RecordKind::Expense, "Food", "Recent", 100).unwrap();
        store.add("2024-01-01", RecordKind::Expense, "Food", "Old", 200).unwrap();

        // The old record sits behind a recent head, so it stays queued
        let queued: Vec<_> = store.window().map(|r| r.description.as_str()).collect();
        assert_eq!(queued, vec!["Recent", "Old"]);
    }

    #[test]
    fn test_summarize_huge_range_covers_whole_window() {
        let mut store = store_on("2024-03-01");
        store.add("2024-02-20", RecordKind::Expense, "Food", "Recent", 100).unwrap();

        let summary = store.summarize(u32::MAX);
        assert_eq!(summary.record_count, 1);
        assert_eq!(summary.total_expenses, 100);
    }

    #[test]
    fn test_window_near_earliest_date() {
        let mut store = LedgerStore::with_clock(FixedClock(NaiveDate::MIN));
        let record = Record::new(NaiveDate::MIN, RecordKind::Income, "Gift", "Ancient", 500);
        store.records.push(record.clone());
        store.update_window(record);

        assert_eq!(store.window().count(), 1);
        assert_eq!(store.summarize(7).record_count, 1);
    }

    #[test]
    fn test_window_keeps_cutoff_day() {
        let mut store = store_on("2024-03-01");
        store.add("2024-01-31", RecordKind::Expense, "Food", "On cutoff", 100).unwrap();
        store.add("2024-01-30", RecordKind::Expense, "Food", "Before cutoff", 100).unwrap();

        assert_eq!(store.window().count(), 2);

        store.clock_mut().set(date("2024-03-02"));
        store.add("2024-03-02", RecordKind::Expense, "Food", "Today", 100).unwrap();

        let queued: Vec<_> = store.window().map(|r| r.description.as_str()).collect();
        assert_eq!(queued, vec!["Today"]);
    }
}
