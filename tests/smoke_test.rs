use expense_ledger::{
    core::{FixedClock, LedgerStore},
    domain::{Category, NewExpense},
    init,
    storage::{ExpenseRepository, MemoryStore},
};
use chrono::NaiveDate;

#[test]
fn ledger_overview_smoke() {
    init();

    let now = NaiveDate::from_ymd_opt(2025, 1, 15)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    let repository = ExpenseRepository::new(Box::new(MemoryStore::new()));
    let mut store = LedgerStore::initialize(repository, Box::new(FixedClock(now)));

    let draft = NewExpense::from_form("Breakfast", "8.40", "food", "", None).unwrap();
    store.add(draft).unwrap();
    store
        .add(NewExpense::new("Bus pass", 60.into(), Category::Travel))
        .unwrap();

    let overview = store.overview(20);
    assert_eq!(overview.record_count, 2);
    assert_eq!(overview.today_total.to_string(), "68.40");
    assert_eq!(overview.recent.len(), 2);
}
