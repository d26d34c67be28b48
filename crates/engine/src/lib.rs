pub use commands::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Page, Paged, TransactionCmd, TransactionFilter};
pub use currency::Currency;
pub use error::EngineError;
pub use export::{Export, ExportFormat};
pub use journals::Journal;
pub use ops::{Engine, EngineBuilder};
pub use reports::{
    MonthGroup, MonthSpending, MonthlySpending, PeriodRollup, SpendingByTag, Summary,
    TagSpending, UNTAGGED, YearGroup,
};
pub use tags::{TAG_PALETTE, Tag};
pub use transactions::{Transaction, TransactionKind, TransactionRecord};

mod commands;
mod currency;
mod error;
pub mod export;
mod journals;
mod money;
mod ops;
pub mod reports;
mod tags;
mod transaction_tags;
mod transactions;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
