//! Ledger state management and the views derived from it.

pub mod ledger_store;
pub mod summary;
pub mod time;

pub use ledger_store::LedgerStore;
pub use summary::{
    CategoryTotal, CategoryTotals, Granularity, LedgerOverview, SummaryService,
    DEFAULT_RECENT_LIMIT,
};
pub use time::{Clock, FixedClock, SystemClock};
