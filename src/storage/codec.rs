//! Tolerant JSON decoding of the stored ledger blob.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde_json::{Map, Value};

use crate::{
    domain::{parse_amount, Category, ExpenseDate, ExpenseId, ExpenseRecord},
    errors::MalformedRecordWarning,
};

/// How the durable blob looked when it was read.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// Nothing stored under the key yet.
    #[default]
    Missing,
    Loaded,
    /// The blob could not be read as a JSON array; nothing was loaded.
    Corrupt(String),
}

/// Outcome of reading the ledger: the usable records plus what was dropped.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub records: Vec<ExpenseRecord>,
    pub warnings: Vec<MalformedRecordWarning>,
    pub status: LoadStatus,
}

impl LoadReport {
    pub fn missing() -> Self {
        Self::default()
    }

    pub fn corrupt(reason: impl Into<String>) -> Self {
        Self {
            status: LoadStatus::Corrupt(reason.into()),
            ..Self::default()
        }
    }

    pub fn is_corrupt(&self) -> bool {
        matches!(self.status, LoadStatus::Corrupt(_))
    }
}

/// Serializes records into the compact stored form.
pub fn encode_records(records: &[ExpenseRecord]) -> serde_json::Result<String> {
    serde_json::to_string(records)
}

/// Parses a stored blob. Entries that fail shape checks are dropped one by
/// one; only a blob that is not a JSON array is reported as corrupt.
pub fn decode_records(raw: &str) -> LoadReport {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => return LoadReport::corrupt(err.to_string()),
    };
    let entries = match value {
        Value::Array(entries) => entries,
        other => {
            return LoadReport::corrupt(format!(
                "expected a JSON array, found {}",
                json_kind(&other)
            ))
        }
    };

    let mut seen = HashSet::new();
    let mut report = LoadReport {
        status: LoadStatus::Loaded,
        ..LoadReport::default()
    };
    for (index, entry) in entries.iter().enumerate() {
        match decode_entry(index, entry, &mut seen) {
            Ok(record) => report.records.push(record),
            Err(warning) => {
                tracing::warn!(%warning, "dropping malformed expense record");
                report.warnings.push(warning);
            }
        }
    }
    report
}

fn decode_entry(
    index: usize,
    entry: &Value,
    seen: &mut HashSet<ExpenseId>,
) -> Result<ExpenseRecord, MalformedRecordWarning> {
    let Some(fields) = entry.as_object() else {
        return Err(MalformedRecordWarning::new(
            index,
            None,
            format!("expected an object, found {}", json_kind(entry)),
        ));
    };

    let id = decode_id(fields)
        .ok_or_else(|| MalformedRecordWarning::new(index, None, "missing or blank id"))?;
    let fail = |reason: String| MalformedRecordWarning::new(index, Some(id.to_string()), reason);

    let title = match fields.get("title") {
        Some(Value::String(title)) if !title.trim().is_empty() => title.clone(),
        _ => return Err(fail("missing or blank title".into())),
    };
    let amount = decode_amount(fields.get("amount")).ok_or_else(|| {
        fail(format!(
            "amount {} is not a number",
            fields.get("amount").unwrap_or(&Value::Null)
        ))
    })?;
    if amount <= Decimal::ZERO {
        return Err(fail(format!("amount {amount} is not positive")));
    }
    let category = match fields.get("category") {
        None | Some(Value::Null) => Category::Other,
        Some(Value::String(label)) => Category::from_label(label),
        Some(other) => Category::from_label(&other.to_string()),
    };
    let note = match fields.get("note") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(note)) => note.clone(),
        Some(other) => other.to_string(),
    };
    let date = match fields.get("date") {
        Some(Value::String(raw)) => {
            ExpenseDate::parse(raw).ok_or_else(|| fail(format!("date `{raw}` is not ISO-8601")))?
        }
        _ => return Err(fail("missing date".into())),
    };

    if !seen.insert(id.clone()) {
        return Err(fail("duplicate id".into()));
    }

    Ok(ExpenseRecord {
        id,
        title,
        amount,
        category,
        note,
        date,
    })
}

fn decode_id(fields: &Map<String, Value>) -> Option<ExpenseId> {
    match fields.get("id")? {
        Value::String(id) if !id.trim().is_empty() => Some(ExpenseId::from(id.as_str())),
        Value::Number(id) => Some(ExpenseId::from(id.to_string())),
        _ => None,
    }
}

fn decode_amount(value: Option<&Value>) -> Option<Decimal> {
    match value? {
        Value::Number(number) => parse_amount(&number.to_string()),
        Value::String(raw) => parse_amount(raw),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
