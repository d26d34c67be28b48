//! JSON contracts of the HTTP API.
//!
//! Field names are camelCase on the wire. Money amounts are plain JSON
//! numbers.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod journal {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CreateJournalRequest {
        pub name: String,
        pub primary_currency: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct UpdateJournalRequest {
        pub name: String,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct JournalResponse {
        pub id: Uuid,
        pub name: String,
        pub primary_currency: String,
        pub is_closed: bool,
        pub created_at: DateTime<Utc>,
    }
}

pub mod tag {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CreateTagRequest {
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct UpdateTagRequest {
        pub name: String,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TagResponse {
        pub id: Uuid,
        pub name: String,
        pub color: String,
    }
}

pub mod transaction {
    use super::*;
    use crate::tag::TagResponse;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub enum TransactionType {
        In,
        Out,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CreateTransactionRequest {
        pub journal_id: Uuid,
        #[serde(rename = "type")]
        pub kind: TransactionType,
        pub amount: Decimal,
        pub occurred_at: DateTime<Utc>,
        #[serde(default)]
        pub note: Option<String>,
        #[serde(default)]
        pub tag_ids: Option<Vec<Uuid>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct UpdateTransactionRequest {
        #[serde(rename = "type")]
        pub kind: TransactionType,
        pub amount: Decimal,
        pub occurred_at: DateTime<Utc>,
        #[serde(default)]
        pub note: Option<String>,
        #[serde(default)]
        pub tag_ids: Option<Vec<Uuid>>,
    }

    /// Query string shared by the list, report and export endpoints.
    ///
    /// `tagIds` may be repeated.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionQuery {
        pub journal_id: Uuid,
        pub from: Option<DateTime<Utc>>,
        pub to: Option<DateTime<Utc>>,
        #[serde(default)]
        pub tag_ids: Vec<Uuid>,
        pub note_search: Option<String>,
        pub page: Option<i64>,
        pub page_size: Option<i64>,
        /// Export only: `json` (default) or `csv`.
        pub format: Option<String>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionResponse {
        pub id: Uuid,
        pub journal_id: Uuid,
        pub journal_name: String,
        pub currency: String,
        #[serde(rename = "type")]
        pub kind: TransactionType,
        #[serde(with = "rust_decimal::serde::float")]
        pub amount: Decimal,
        pub occurred_at: DateTime<Utc>,
        pub note: Option<String>,
        pub tags: Vec<TagResponse>,
    }
}

pub mod report {
    use super::*;
    use crate::transaction::TransactionResponse;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TransactionSummaryResponse {
        pub currency: String,
        #[serde(with = "rust_decimal::serde::float")]
        pub total_in: Decimal,
        #[serde(with = "rust_decimal::serde::float")]
        pub total_out: Decimal,
        #[serde(with = "rust_decimal::serde::float")]
        pub net: Decimal,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct PeriodRollupResponse {
        pub currency: String,
        #[serde(with = "rust_decimal::serde::float")]
        pub opening: Decimal,
        #[serde(with = "rust_decimal::serde::float")]
        pub total_in: Decimal,
        #[serde(with = "rust_decimal::serde::float")]
        pub total_out: Decimal,
        #[serde(with = "rust_decimal::serde::float")]
        pub net_change: Decimal,
        #[serde(with = "rust_decimal::serde::float")]
        pub closing: Decimal,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MonthGroupResponse {
        pub year: i32,
        pub month: u32,
        pub transactions: Vec<TransactionResponse>,
        pub rollups: Vec<PeriodRollupResponse>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct YearGroupResponse {
        pub year: i32,
        pub months: Vec<MonthGroupResponse>,
        pub rollups: Vec<PeriodRollupResponse>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SpendingByTagItemResponse {
        /// Absent for the "Untagged" bucket.
        pub tag_id: Option<Uuid>,
        pub tag_name: String,
        #[serde(with = "rust_decimal::serde::float")]
        pub total_out: Decimal,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SpendingByTagResponse {
        pub currency: String,
        pub items: Vec<SpendingByTagItemResponse>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SpendingByTagMonthResponse {
        pub year: i32,
        pub month: u32,
        pub items: Vec<SpendingByTagItemResponse>,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SpendingByTagMonthlyResponse {
        pub currency: String,
        pub months: Vec<SpendingByTagMonthResponse>,
    }
}

pub mod problem {
    use super::*;

    /// Error body returned for every failed request.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ProblemDetails {
        pub title: String,
        pub status: u16,
        pub detail: String,
    }
}
