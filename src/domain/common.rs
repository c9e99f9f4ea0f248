use rust_decimal::Decimal;

use super::category::Category;
use super::expense::ExpenseId;

/// Identifies entities that expose a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> &ExpenseId;
}

/// Exposes the monetary value carried by an entity.
pub trait Amounted {
    fn amount(&self) -> Decimal;
}

/// Links an entity to the category it is grouped under.
pub trait BelongsToCategory {
    fn category(&self) -> &Category;
}

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}
