//! Text rendering of records and totals for the shell.

use colored::Colorize;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::{
    core::CategoryTotals,
    domain::{Amounted, BelongsToCategory, Category, Displayable, ExpenseRecord, Identifiable},
};

/// Formats `amount` with two decimals and comma thousands separators,
/// prefixed by `symbol`.
pub fn format_amount(amount: Decimal, symbol: &str) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    let text = rounded.abs().to_string();
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}{symbol}{grouped}.{fraction}")
}

/// Coloured bullet for a category; falls back to grey for unknown labels.
pub fn category_dot(category: &Category) -> String {
    let (r, g, b) = category.rgb();
    "●".truecolor(r, g, b).to_string()
}

/// One list row: date, title, category, amount, optional note, and id.
pub fn render_row(record: &ExpenseRecord, symbol: &str) -> String {
    let mut row = format!(
        "{} {}  {}  {}",
        category_dot(record.category()),
        record.date(),
        record.display_label(),
        format_amount(record.amount(), symbol).bold(),
    );
    if !record.note().is_empty() {
        row.push_str(&format!("  ({})", record.note()));
    }
    row.push_str(&format!("  [{}]", record.id()));
    row
}

/// Category breakdown lines with each category's share of the total.
pub fn render_category_totals(totals: &CategoryTotals, symbol: &str) -> Vec<String> {
    let grand_total = totals.grand_total();
    totals
        .iter()
        .map(|entry| {
            let share = if grand_total.is_zero() {
                Decimal::ZERO
            } else {
                (entry.total * Decimal::ONE_HUNDRED / grand_total).round_dp(1)
            };
            format!(
                "{} {:<14} {:>14}  {:>5}%  ({} {})",
                category_dot(&entry.category),
                entry.category.label(),
                format_amount(entry.total, symbol),
                share.to_string(),
                entry.count,
                if entry.count == 1 { "record" } else { "records" },
            )
        })
        .collect()
}
