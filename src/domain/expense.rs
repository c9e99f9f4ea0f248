//! The expense record and the candidate shape accepted by the ledger.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::errors::ValidationError;

use super::category::Category;
use super::common::{Amounted, BelongsToCategory, Displayable, Identifiable};

const DATE_FORMAT: &str = "%Y-%m-%d";
/// Accepted local date-time layouts; the first is the one written back.
const DATE_TIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
];

/// Opaque, immutable identifier of a stored expense.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(String);

impl ExpenseId {
    /// Draws a fresh identifier from a millisecond timestamp plus random bits.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ExpenseId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ExpenseId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl PartialEq<str> for ExpenseId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// When an expense occurred: a calendar day, or a day with a time of day.
///
/// Both forms are interpreted on the local calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpenseDate {
    Day(NaiveDate),
    Moment(NaiveDateTime),
}

impl ExpenseDate {
    /// Parses `YYYY-MM-DD`, a local date-time, or an RFC 3339 instant
    /// (converted to local time).
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Ok(day) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
            return Some(ExpenseDate::Day(day));
        }
        if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
            return Some(ExpenseDate::Moment(
                instant.with_timezone(&Local).naive_local(),
            ));
        }
        DATE_TIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
            .map(ExpenseDate::Moment)
    }

    pub fn day(&self) -> NaiveDate {
        match self {
            ExpenseDate::Day(day) => *day,
            ExpenseDate::Moment(moment) => moment.date(),
        }
    }

    /// Point in time used for ordering; bare days sort at midnight.
    pub fn instant(&self) -> NaiveDateTime {
        match self {
            ExpenseDate::Day(day) => day.and_time(NaiveTime::MIN),
            ExpenseDate::Moment(moment) => *moment,
        }
    }

    pub fn to_iso_string(&self) -> String {
        match self {
            ExpenseDate::Day(day) => day.format(DATE_FORMAT).to_string(),
            ExpenseDate::Moment(moment) => moment.format(DATE_TIME_FORMATS[0]).to_string(),
        }
    }
}

impl From<NaiveDate> for ExpenseDate {
    fn from(value: NaiveDate) -> Self {
        ExpenseDate::Day(value)
    }
}

impl From<NaiveDateTime> for ExpenseDate {
    fn from(value: NaiveDateTime) -> Self {
        ExpenseDate::Moment(value)
    }
}

impl FromStr for ExpenseDate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExpenseDate::parse(s).ok_or_else(|| ValidationError::InvalidDate(s.to_string()))
    }
}

impl fmt::Display for ExpenseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso_string())
    }
}

impl Serialize for ExpenseDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso_string())
    }
}

impl<'de> Deserialize<'de> for ExpenseDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ExpenseDate::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid expense date `{raw}`")))
    }
}

/// Parses a monetary amount the way a form field would: plain or scientific
/// decimal notation, surrounding whitespace ignored.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Writes amounts as exact JSON numbers in their shortest decimal form, so
/// what is stored parses back to the same value.
pub(crate) fn serialize_amount<S: Serializer>(
    amount: &Decimal,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let number = serde_json::Number::from_str(&amount.normalize().to_string())
        .map_err(serde::ser::Error::custom)?;
    number.serialize(serializer)
}

/// A single stored expense.
///
/// Records are only minted by the ledger store; the rest of the crate sees
/// them through shared borrows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpenseRecord {
    pub(crate) id: ExpenseId,
    pub(crate) title: String,
    #[serde(serialize_with = "serialize_amount")]
    pub(crate) amount: Decimal,
    pub(crate) category: Category,
    pub(crate) note: String,
    pub(crate) date: ExpenseDate,
}

impl ExpenseRecord {
    pub(crate) fn from_parts(id: ExpenseId, draft: NewExpense, date: ExpenseDate) -> Self {
        Self {
            id,
            title: draft.title,
            amount: draft.amount,
            category: draft.category,
            note: draft.note,
            date,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn date(&self) -> ExpenseDate {
        self.date
    }
}

impl Identifiable for ExpenseRecord {
    fn id(&self) -> &ExpenseId {
        &self.id
    }
}

impl Amounted for ExpenseRecord {
    fn amount(&self) -> Decimal {
        self.amount
    }
}

impl BelongsToCategory for ExpenseRecord {
    fn category(&self) -> &Category {
        &self.category
    }
}

impl Displayable for ExpenseRecord {
    fn display_label(&self) -> String {
        format!("{} • {}", self.title, self.category)
    }
}

/// Caller-supplied fields for a new expense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    pub title: String,
    pub amount: Decimal,
    pub category: Category,
    pub note: String,
    pub date: Option<ExpenseDate>,
}

impl NewExpense {
    pub fn new(title: impl Into<String>, amount: Decimal, category: Category) -> Self {
        Self {
            title: title.into(),
            amount,
            category,
            note: String::new(),
            date: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    pub fn on(mut self, date: impl Into<ExpenseDate>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Builds a candidate from raw form values. Title and note are trimmed;
    /// a blank date means "today".
    pub fn from_form(
        title: &str,
        amount: &str,
        category: &str,
        note: &str,
        date: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let amount =
            parse_amount(amount).ok_or_else(|| ValidationError::InvalidAmount(amount.to_string()))?;
        let date = match date.map(str::trim).filter(|raw| !raw.is_empty()) {
            Some(raw) => Some(raw.parse::<ExpenseDate>()?),
            None => None,
        };
        Ok(Self {
            title: title.trim().to_string(),
            amount,
            category: Category::from_label(category),
            note: note.trim().to_string(),
            date,
        })
    }

    /// Checks the invariants every stored record must satisfy.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount(self.amount));
        }
        Ok(())
    }
}
