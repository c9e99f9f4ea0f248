//! Aggregation helpers for the ledger's derived views.
//!
//! Every function here is pure: it reads a snapshot of records, never
//! mutates it, and recomputes its result from scratch.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::domain::{Category, ExpenseRecord};

/// Length of the recent-activity list shown on the dashboard.
pub const DEFAULT_RECENT_LIMIT: usize = 20;

/// Calendar window used by [`SummaryService::windowed_total`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Day,
    Month,
}

impl Granularity {
    /// Whether `date` falls in the same window as `reference`.
    pub fn contains(self, reference: NaiveDate, date: NaiveDate) -> bool {
        match self {
            Granularity::Day => reference == date,
            Granularity::Month => {
                reference.year() == date.year() && reference.month() == date.month()
            }
        }
    }
}

/// Sum and record count for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: Decimal,
    pub count: usize,
}

/// Per-category sums in order of each category's first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTotals {
    entries: Vec<CategoryTotal>,
}

impl CategoryTotals {
    pub fn get(&self, category: &Category) -> Option<Decimal> {
        self.entries
            .iter()
            .find(|entry| &entry.category == category)
            .map(|entry| entry.total)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryTotal> {
        self.entries.iter()
    }

    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.entries.iter().map(|entry| &entry.category)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn grand_total(&self) -> Decimal {
        self.entries
            .iter()
            .fold(Decimal::ZERO, |total, entry| add_or_skip(total, entry.total))
    }
}

impl<'a> IntoIterator for &'a CategoryTotals {
    type Item = &'a CategoryTotal;
    type IntoIter = std::slice::Iter<'a, CategoryTotal>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Everything the dashboard shows, computed in one pass over a snapshot.
#[derive(Debug, Clone)]
pub struct LedgerOverview<'a> {
    pub today_total: Decimal,
    pub month_total: Decimal,
    pub categories: CategoryTotals,
    pub recent: Vec<&'a ExpenseRecord>,
    pub record_count: usize,
}

/// Derives views and totals from ledger snapshots.
pub struct SummaryService;

impl SummaryService {
    /// Newest-first list truncated to `limit`; equal dates keep insertion
    /// order.
    pub fn recent_activity(records: &[ExpenseRecord], limit: usize) -> Vec<&ExpenseRecord> {
        let mut ordered = Self::chronological(records);
        ordered.truncate(limit);
        ordered
    }

    /// Every record, newest first.
    pub fn chronological(records: &[ExpenseRecord]) -> Vec<&ExpenseRecord> {
        let mut ordered: Vec<&ExpenseRecord> = records.iter().collect();
        ordered.sort_by(|a, b| b.date.instant().cmp(&a.date.instant()));
        ordered
    }

    /// Sum of amounts dated in the same local day or month as `reference`.
    pub fn windowed_total(
        records: &[ExpenseRecord],
        reference: NaiveDateTime,
        granularity: Granularity,
    ) -> Decimal {
        let anchor = reference.date();
        records
            .iter()
            .filter(|record| granularity.contains(anchor, record.date.day()))
            .fold(Decimal::ZERO, |total, record| {
                add_or_skip(total, record.amount)
            })
    }

    pub fn category_totals(records: &[ExpenseRecord]) -> CategoryTotals {
        let mut totals = CategoryTotals::default();
        for record in records {
            match totals
                .entries
                .iter_mut()
                .find(|entry| entry.category == record.category)
            {
                Some(entry) => {
                    entry.total = add_or_skip(entry.total, record.amount);
                    entry.count += 1;
                }
                None => totals.entries.push(CategoryTotal {
                    category: record.category.clone(),
                    total: record.amount,
                    count: 1,
                }),
            }
        }
        totals
    }

    pub fn total(records: &[ExpenseRecord]) -> Decimal {
        records
            .iter()
            .fold(Decimal::ZERO, |total, record| {
                add_or_skip(total, record.amount)
            })
    }

    pub fn overview(
        records: &[ExpenseRecord],
        now: NaiveDateTime,
        recent_limit: usize,
    ) -> LedgerOverview<'_> {
        LedgerOverview {
            today_total: Self::windowed_total(records, now, Granularity::Day),
            month_total: Self::windowed_total(records, now, Granularity::Month),
            categories: Self::category_totals(records),
            recent: Self::recent_activity(records, recent_limit),
            record_count: records.len(),
        }
    }
}

/// Adds `amount` unless the sum would overflow, in which case the amount
/// counts as zero.
fn add_or_skip(total: Decimal, amount: Decimal) -> Decimal {
    total.checked_add(amount).unwrap_or_else(|| {
        tracing::warn!(%amount, "amount overflows running total, counting it as zero");
        total
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ExpenseDate, ExpenseId, NewExpense};

    fn record(id: &str, amount: i64, category: Category, date: &str) -> ExpenseRecord {
        let date: ExpenseDate = date.parse().unwrap();
        ExpenseRecord::from_parts(
            ExpenseId::from(id),
            NewExpense::new(id, Decimal::from(amount), category),
            date,
        )
    }

    fn at(raw: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    #[test]
    fn empty_input_yields_empty_views() {
        let now = at("2024-03-01T10:00:00");
        assert!(SummaryService::recent_activity(&[], 20).is_empty());
        assert!(SummaryService::chronological(&[]).is_empty());
        assert_eq!(
            SummaryService::windowed_total(&[], now, Granularity::Month),
            Decimal::ZERO
        );
        assert!(SummaryService::category_totals(&[]).is_empty());
    }

    #[test]
    fn chronological_is_newest_first_and_stable() {
        let records = vec![
            record("a", 1, Category::Food, "2024-03-01"),
            record("b", 1, Category::Food, "2024-03-03"),
            record("c", 1, Category::Food, "2024-03-01"),
            record("d", 1, Category::Food, "2024-03-02T08:00:00"),
        ];
        let ids: Vec<&str> = SummaryService::chronological(&records)
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn recent_activity_truncates() {
        let records: Vec<ExpenseRecord> = (1..=25)
            .map(|day| {
                record(
                    &format!("r{day}"),
                    1,
                    Category::Other,
                    &format!("2024-01-{day:02}"),
                )
            })
            .collect();
        let recent = SummaryService::recent_activity(&records, DEFAULT_RECENT_LIMIT);
        assert_eq!(recent.len(), 20);
        assert_eq!(recent[0].id.as_str(), "r25");
        assert_eq!(recent[19].id.as_str(), "r6");
    }

    #[test]
    fn windowed_totals_respect_day_and_month() {
        let records = vec![
            record("a", 100, Category::Food, "2024-03-01"),
            record("b", 50, Category::Food, "2024-03-01T23:59:59"),
            record("c", 25, Category::Bills, "2024-03-15"),
            record("d", 10, Category::Bills, "2024-02-29"),
            record("e", 5, Category::Bills, "2023-03-01"),
        ];
        let reference = at("2024-03-01T10:00:00");
        assert_eq!(
            SummaryService::windowed_total(&records, reference, Granularity::Day),
            Decimal::from(150)
        );
        assert_eq!(
            SummaryService::windowed_total(&records, reference, Granularity::Month),
            Decimal::from(175)
        );
    }

    #[test]
    fn category_totals_follow_first_occurrence() {
        let records = vec![
            record("a", 100, Category::Travel, "2024-03-01"),
            record("b", 200, Category::Food, "2024-03-02"),
            record("c", 300, Category::Travel, "2024-03-03"),
            record("d", 7, Category::Custom("Pets".into()), "2024-03-03"),
        ];
        let totals = SummaryService::category_totals(&records);
        let order: Vec<&Category> = totals.categories().collect();
        assert_eq!(
            order,
            vec![
                &Category::Travel,
                &Category::Food,
                &Category::Custom("Pets".into())
            ]
        );
        assert_eq!(totals.get(&Category::Travel), Some(Decimal::from(400)));
        assert_eq!(totals.get(&Category::Bills), None);
        assert_eq!(totals.grand_total(), SummaryService::total(&records));
    }

    #[test]
    fn overflowing_amounts_count_as_zero() {
        let records = vec![
            record("a", 1, Category::Food, "2024-03-01"),
            ExpenseRecord::from_parts(
                ExpenseId::from("huge"),
                NewExpense::new("huge", Decimal::MAX, Category::Food),
                "2024-03-01".parse().unwrap(),
            ),
        ];
        assert_eq!(SummaryService::total(&records), Decimal::from(1));
    }

    #[test]
    fn overview_bundles_views() {
        let records = vec![
            record("a", 100, Category::Food, "2024-03-01"),
            record("b", 40, Category::Bills, "2024-03-05"),
        ];
        let overview = SummaryService::overview(&records, at("2024-03-01T09:00:00"), 1);
        assert_eq!(overview.today_total, Decimal::from(100));
        assert_eq!(overview.month_total, Decimal::from(140));
        assert_eq!(overview.recent.len(), 1);
        assert_eq!(overview.recent[0].id.as_str(), "b");
        assert_eq!(overview.categories.len(), 2);
        assert_eq!(overview.record_count, 2);
    }
}
