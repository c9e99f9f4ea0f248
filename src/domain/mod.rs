pub mod category;
pub mod common;
pub mod expense;

pub use category::{Category, FALLBACK_COLOR};
pub use common::{Amounted, BelongsToCategory, Displayable, Identifiable};
pub use expense::{parse_amount, ExpenseDate, ExpenseId, ExpenseRecord, NewExpense};
