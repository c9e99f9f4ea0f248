mod common;

use chrono::{NaiveDate, NaiveDateTime};
use expense_ledger::{
    core::{Granularity, LedgerStore, SummaryService, DEFAULT_RECENT_LIMIT},
    domain::{Category, ExpenseDate, NewExpense},
};
use rust_decimal::Decimal;

use common::{memory_ledger, now};

fn add(store: &mut LedgerStore, title: &str, amount: i64, category: Category, date: &str) {
    let date: ExpenseDate = date.parse().unwrap();
    store
        .add(NewExpense::new(title, Decimal::from(amount), category).on(date))
        .unwrap();
}

fn titles(records: &[&expense_ledger::domain::ExpenseRecord]) -> Vec<String> {
    records.iter().map(|r| r.title().to_string()).collect()
}

fn at(raw: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").unwrap()
}

#[test]
fn chronological_is_newest_first_and_stable() {
    let (mut store, _) = memory_ledger();
    add(&mut store, "old", 1, Category::Food, "2024-01-10");
    add(&mut store, "tie-a", 1, Category::Food, "2024-02-01");
    add(&mut store, "newest", 1, Category::Food, "2024-02-01T18:30:00");
    add(&mut store, "tie-b", 1, Category::Food, "2024-02-01");

    let ordered = SummaryService::chronological(store.get_all());
    assert_eq!(titles(&ordered), ["newest", "tie-a", "tie-b", "old"]);
}

#[test]
fn recent_activity_caps_at_the_limit() {
    let (mut store, _) = memory_ledger();
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    for offset in 0..25 {
        let date = start + chrono::Duration::days(offset);
        store
            .add(NewExpense::new(format!("day {offset}"), Decimal::ONE, Category::Other).on(date))
            .unwrap();
    }

    let recent = SummaryService::recent_activity(store.get_all(), DEFAULT_RECENT_LIMIT);
    assert_eq!(recent.len(), 20);
    assert_eq!(recent[0].title(), "day 24");
    assert_eq!(recent[19].title(), "day 5");
    assert!(SummaryService::recent_activity(store.get_all(), 0).is_empty());
}

#[test]
fn windowed_totals_follow_calendar_boundaries() {
    let (mut store, _) = memory_ledger();
    add(&mut store, "today", 40, Category::Food, "2024-03-01");
    add(&mut store, "today late", 10, Category::Food, "2024-03-01T23:59:00");
    add(&mut store, "later this month", 5, Category::Bills, "2024-03-31");
    add(&mut store, "last day of february", 100, Category::Bills, "2024-02-29");
    add(&mut store, "last year", 1000, Category::Travel, "2023-03-01");

    let records = store.get_all();
    assert_eq!(
        SummaryService::windowed_total(records, now(), Granularity::Day),
        Decimal::from(50)
    );
    assert_eq!(
        SummaryService::windowed_total(records, now(), Granularity::Month),
        Decimal::from(55)
    );
    assert_eq!(
        SummaryService::windowed_total(records, at("2024-02-15T08:00:00"), Granularity::Month),
        Decimal::from(100)
    );
    assert_eq!(
        SummaryService::windowed_total(&[], now(), Granularity::Day),
        Decimal::ZERO
    );
}

#[test]
fn category_totals_group_in_first_seen_order() {
    let (mut store, _) = memory_ledger();
    add(&mut store, "taxi", 20, Category::Travel, "2024-03-01");
    add(&mut store, "lunch", 15, Category::Food, "2024-03-01");
    add(&mut store, "flight", 300, Category::Travel, "2024-02-01");
    add(&mut store, "stamps", 4, Category::from_label("Postage"), "2024-02-01");

    let totals = SummaryService::category_totals(store.get_all());
    let order: Vec<_> = totals.categories().map(|c| c.label().to_string()).collect();
    assert_eq!(order, ["Travel", "Food", "Postage"]);
    assert_eq!(totals.get(&Category::Travel), Some(Decimal::from(320)));
    assert_eq!(totals.get(&Category::Shopping), None);
    assert_eq!(totals.grand_total(), SummaryService::total(store.get_all()));
    assert_eq!(totals.grand_total(), Decimal::from(339));
}

#[test]
fn category_totals_sum_exactly() {
    let (mut store, _) = memory_ledger();
    for _ in 0..3 {
        store
            .add(NewExpense::new("gum", Decimal::new(1, 1), Category::Food))
            .unwrap();
    }
    let totals = SummaryService::category_totals(store.get_all());
    assert_eq!(totals.get(&Category::Food), Some(Decimal::new(3, 1)));
}

#[test]
fn overview_bundles_dashboard_views() {
    let (mut store, _) = memory_ledger();
    add(&mut store, "coffee", 150, Category::Food, "2024-03-01");
    add(&mut store, "book", 20, Category::Shopping, "2024-03-02");
    add(&mut store, "train", 80, Category::Travel, "2024-02-20");

    let overview = store.overview(2);
    assert_eq!(overview.today_total, Decimal::from(150));
    assert_eq!(overview.month_total, Decimal::from(170));
    assert_eq!(overview.record_count, 3);
    assert_eq!(titles(&overview.recent), ["book", "coffee"]);
    assert_eq!(overview.categories.len(), 3);
}
