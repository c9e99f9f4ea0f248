//! Expense categories and their display palette.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Colour used for labels that fall outside the fixed category set.
pub const FALLBACK_COLOR: &str = "#888888";

/// Closed classification tag attached to every expense.
///
/// Labels outside the fixed set are kept verbatim in [`Category::Custom`] so
/// historical data survives a round-trip; they are grouped and rendered with
/// [`FALLBACK_COLOR`] but never rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Food,
    Travel,
    Bills,
    Shopping,
    Entertainment,
    Other,
    Custom(String),
}

impl Category {
    /// The recognised categories, in form order.
    pub const ALL: [Category; 6] = [
        Category::Food,
        Category::Travel,
        Category::Bills,
        Category::Shopping,
        Category::Entertainment,
        Category::Other,
    ];

    /// Maps a raw label onto a category. Matching ignores case and surrounding
    /// whitespace; anything unrecognised becomes [`Category::Custom`].
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "food" => Category::Food,
            "travel" => Category::Travel,
            "bills" => Category::Bills,
            "shopping" => Category::Shopping,
            "entertainment" => Category::Entertainment,
            "other" => Category::Other,
            _ => Category::Custom(trimmed.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Category::Food => "Food",
            Category::Travel => "Travel",
            Category::Bills => "Bills",
            Category::Shopping => "Shopping",
            Category::Entertainment => "Entertainment",
            Category::Other => "Other",
            Category::Custom(label) => label,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Category::Custom(_))
    }

    /// Hex colour used by list rows and the category chart.
    pub fn color(&self) -> &'static str {
        match self {
            Category::Food => "#ef4444",
            Category::Travel => "#f59e0b",
            Category::Bills => "#06b6d4",
            Category::Shopping => "#a78bfa",
            Category::Entertainment => "#10b981",
            Category::Other => "#94a3b8",
            Category::Custom(_) => FALLBACK_COLOR,
        }
    }

    /// Splits [`Category::color`] into RGB components.
    pub fn rgb(&self) -> (u8, u8, u8) {
        let hex = self.color().trim_start_matches('#');
        let channel = |range: std::ops::Range<usize>| {
            hex.get(range)
                .and_then(|raw| u8::from_str_radix(raw, 16).ok())
                .unwrap_or(0x88)
        };
        (channel(0..2), channel(2..4), channel(4..6))
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Other
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Category::from_label(&value)
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Category::from_label(value)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        match value {
            Category::Custom(label) => label,
            other => other.label().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
