//! Command and query structs for engine operations.
//!
//! These types group parameters for transaction writes and listing, keeping
//! call sites readable and avoiding long argument lists.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::TransactionKind;

pub const DEFAULT_PAGE_SIZE: u64 = 50;
pub const MAX_PAGE_SIZE: u64 = 200;

/// Create or replace a transaction.
#[derive(Clone, Debug)]
pub struct TransactionCmd {
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub occurred_at: DateTime<Utc>,
    pub note: Option<String>,
    pub tag_ids: Vec<Uuid>,
}

impl TransactionCmd {
    #[must_use]
    pub fn new(kind: TransactionKind, amount: Decimal, occurred_at: DateTime<Utc>) -> Self {
        Self {
            kind,
            amount,
            occurred_at,
            note: None,
            tag_ids: Vec::new(),
        }
    }

    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    #[must_use]
    pub fn tag_ids(mut self, tag_ids: impl IntoIterator<Item = Uuid>) -> Self {
        self.tag_ids = tag_ids.into_iter().collect();
        self
    }
}

/// Filters for listing, reporting and exporting the transactions of one
/// journal.
///
/// Both `from` and `to` are inclusive. A transaction matches `tag_ids` when it
/// carries at least one of them. `note_search` is a case-insensitive substring
/// match; exports ignore it.
#[derive(Clone, Debug, Default)]
pub struct TransactionFilter {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub tag_ids: Vec<Uuid>,
    pub note_search: Option<String>,
}

impl TransactionFilter {
    #[must_use]
    pub fn since(mut self, from: DateTime<Utc>) -> Self {
        self.from = Some(from);
        self
    }

    #[must_use]
    pub fn until(mut self, to: DateTime<Utc>) -> Self {
        self.to = Some(to);
        self
    }

    #[must_use]
    pub fn tag_ids(mut self, tag_ids: impl IntoIterator<Item = Uuid>) -> Self {
        self.tag_ids = tag_ids.into_iter().collect();
        self
    }

    #[must_use]
    pub fn note_search(mut self, search: impl Into<String>) -> Self {
        self.note_search = Some(search.into());
        self
    }

    /// Search text as given, `None` when blank. Surrounding spaces are part
    /// of the match.
    pub(crate) fn search_text(&self) -> Option<&str> {
        self.note_search
            .as_deref()
            .filter(|s| !s.trim().is_empty())
    }
}

/// 1-based page request, clamped on construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    page: u64,
    page_size: u64,
}

impl Page {
    /// Page below 1 becomes 1. A size below 1 falls back to
    /// [`DEFAULT_PAGE_SIZE`] and sizes above [`MAX_PAGE_SIZE`] are capped.
    #[must_use]
    pub fn new(page: i64, page_size: i64) -> Self {
        let page = if page < 1 { 1 } else { page as u64 };
        let page_size = if page_size < 1 {
            DEFAULT_PAGE_SIZE
        } else {
            (page_size as u64).min(MAX_PAGE_SIZE)
        };
        Self { page, page_size }
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Rows to skip, capped at `i64::MAX` (the largest offset SQLite binds).
    pub(crate) fn offset(&self) -> u64 {
        (self.page - 1)
            .saturating_mul(self.page_size)
            .min(i64::MAX as u64)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE as i64)
    }
}

/// One page of results plus the total count of matching rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub page_size: u64,
    pub total_count: u64,
}
