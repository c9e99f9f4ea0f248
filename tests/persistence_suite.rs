mod common;

use std::fs;

use expense_ledger::{
    domain::{Amounted, Category, Identifiable, NewExpense},
    errors::{LedgerError, PersistenceError},
    storage::{FileStore, KeyValueStore, LoadStatus, STORAGE_KEY},
};
use rust_decimal::Decimal;

use common::{file_ledger, store_over, temp_dir};

fn blob_path(dir: &std::path::Path) -> std::path::PathBuf {
    FileStore::new(dir.to_path_buf())
        .unwrap()
        .path_for(STORAGE_KEY)
}

#[test]
fn file_backed_ledger_survives_restart() {
    let (mut store, dir) = file_ledger();
    store
        .add(NewExpense::new("Rent", Decimal::from(1200), Category::Bills))
        .unwrap();
    store
        .add(NewExpense::new("Cinema", Decimal::new(1450, 2), Category::Entertainment))
        .unwrap();

    let reopened = store_over(FileStore::new(dir).unwrap());
    assert_eq!(reopened.get_all(), store.get_all());
}

#[test]
fn stored_blob_uses_the_documented_shape() {
    let (mut store, dir) = file_ledger();
    let record = store
        .add(
            NewExpense::from_form("Coffee", "150", "Food", "flat white", Some("2024-03-01"))
                .unwrap(),
        )
        .unwrap();

    let raw = fs::read_to_string(blob_path(&dir)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let entry = &value.as_array().unwrap()[0];
    assert_eq!(entry["id"], record.id().as_str());
    assert_eq!(entry["title"], "Coffee");
    assert_eq!(entry["amount"], 150);
    assert_eq!(entry["category"], "Food");
    assert_eq!(entry["note"], "flat white");
    assert_eq!(entry["date"], "2024-03-01");
}

#[test]
fn corrupt_blob_loads_empty_and_is_overwritten_on_next_save() {
    let dir = temp_dir().join("data");
    let backend = FileStore::new(dir.clone()).unwrap();
    backend.set(STORAGE_KEY, "{not json").unwrap();

    let mut store = store_over(backend.clone());
    assert!(store.is_empty());
    assert!(matches!(store.load_status(), LoadStatus::Corrupt(_)));

    store
        .add(NewExpense::new("Bus", Decimal::from(2), Category::Travel))
        .unwrap();
    let reopened = store_over(backend);
    assert_eq!(reopened.len(), 1);
    assert_eq!(reopened.load_status(), &LoadStatus::Loaded);
}

#[test]
fn malformed_entries_are_dropped_individually() {
    let dir = temp_dir().join("data");
    let backend = FileStore::new(dir).unwrap();
    let blob = r#"[
        {"id":"a1","title":"Lunch","amount":12.5,"category":"Food","note":"","date":"2024-03-01"},
        {"id":"a2","title":"Broken","amount":"lots","category":"Food","note":"","date":"2024-03-01"},
        {"id":"a3","title":"Stamps","amount":"4.20","category":"Postage","date":"2024-02-28T09:15:00"},
        "not an object",
        {"id":"a1","title":"Duplicate","amount":1,"category":"Food","note":"","date":"2024-03-01"}
    ]"#;
    backend.set(STORAGE_KEY, blob).unwrap();

    let store = store_over(backend);
    assert_eq!(store.load_status(), &LoadStatus::Loaded);
    assert_eq!(store.len(), 2);
    assert_eq!(store.load_warnings().len(), 3);
    assert_eq!(store.get_all()[0].amount(), Decimal::new(125, 1));
    assert_eq!(store.get_all()[1].amount(), Decimal::new(420, 2));
    assert_eq!(store.get_all()[1].note(), "");
    assert!(store.load_warnings().iter().any(|w| w.index == 1));
}

#[test]
fn interrupted_write_preserves_previous_blob() {
    let (mut store, dir) = file_ledger();
    store
        .add(NewExpense::new("Water", Decimal::from(30), Category::Bills))
        .unwrap();
    let path = blob_path(&dir);
    let original = fs::read_to_string(&path).unwrap();

    // A directory squatting on the temp file name makes the staged write fail.
    let mut tmp = path.clone();
    tmp.set_extension("json.tmp");
    fs::create_dir_all(&tmp).unwrap();

    let err = store
        .add(NewExpense::new("Gas", Decimal::from(45), Category::Bills))
        .unwrap_err();
    assert!(matches!(err, LedgerError::Persistence(PersistenceError::Io(_))));
    assert_eq!(store.len(), 2);
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn export_then_import_replaces_the_ledger() {
    let (mut source, _) = file_ledger();
    source
        .add(NewExpense::new("Shoes", Decimal::new(8999, 2), Category::Shopping))
        .unwrap();
    source
        .add(NewExpense::new("Museum", Decimal::from(15), Category::Entertainment))
        .unwrap();
    let export = temp_dir().join("expenses.json");
    source.export_file(&export).unwrap();

    let (mut target, _) = file_ledger();
    target
        .add(NewExpense::new("Old", Decimal::ONE, Category::Other))
        .unwrap();
    let warnings = target.import_file(&export).unwrap();
    assert!(warnings.is_empty());
    assert_eq!(target.get_all(), source.get_all());
}

#[test]
fn corrupt_import_leaves_ledger_untouched() {
    let (mut store, _) = file_ledger();
    store
        .add(NewExpense::new("Keep me", Decimal::from(7), Category::Food))
        .unwrap();
    let revision = store.revision();

    let bad = temp_dir().join("bad.json");
    fs::write(&bad, "{\"expenses\": 3}").unwrap();

    let err = store.import_file(&bad).unwrap_err();
    assert!(matches!(
        err,
        LedgerError::Persistence(PersistenceError::Corrupt(_))
    ));
    assert_eq!(store.len(), 1);
    assert_eq!(store.revision(), revision);
}
