//! Rendering of transaction records as downloadable files.

use chrono::{DateTime, Utc};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::{EngineError, ResultEngine, TransactionKind, TransactionRecord};

const CSV_HEADER: &str = "Id,JournalId,JournalName,Currency,Type,Amount,OccurredAt,Note,Tags\n";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Csv => "text/csv",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Self::Json => "transactions.json",
            Self::Csv => "transactions.csv",
        }
    }
}

impl TryFrom<&str> for ExportFormat {
    type Error = EngineError;

    /// Case-insensitive, surrounding whitespace ignored.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            _ => Err(EngineError::InvalidFormat(
                "Unsupported export format. Use 'json' or 'csv'.".to_string(),
            )),
        }
    }
}

/// A rendered export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Export {
    pub content: Vec<u8>,
    pub content_type: &'static str,
    pub file_name: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportTag<'a> {
    id: Uuid,
    name: &'a str,
    color: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportRow<'a> {
    id: Uuid,
    journal_id: Uuid,
    journal_name: &'a str,
    currency: &'a str,
    #[serde(rename = "type")]
    kind: TransactionKind,
    #[serde(with = "rust_decimal::serde::float")]
    amount: Decimal,
    occurred_at: DateTime<Utc>,
    note: Option<&'a str>,
    tags: Vec<ExportTag<'a>>,
}

impl<'a> From<&'a TransactionRecord> for ExportRow<'a> {
    fn from(record: &'a TransactionRecord) -> Self {
        let tx = &record.transaction;
        Self {
            id: tx.id(),
            journal_id: tx.journal_id(),
            journal_name: &record.journal_name,
            currency: record.currency.code(),
            kind: tx.kind(),
            amount: tx.amount(),
            occurred_at: tx.occurred_at(),
            note: tx.note(),
            tags: tx
                .tags()
                .iter()
                .map(|tag| ExportTag {
                    id: tag.id(),
                    name: tag.name(),
                    color: tag.color(),
                })
                .collect(),
        }
    }
}

/// Render `records` in the requested format.
pub fn render(records: &[TransactionRecord], format: ExportFormat) -> ResultEngine<Export> {
    let content = match format {
        ExportFormat::Json => render_json(records)?,
        ExportFormat::Csv => render_csv(records)?,
    };
    Ok(Export {
        content,
        content_type: format.content_type(),
        file_name: format.file_name(),
    })
}

fn render_json(records: &[TransactionRecord]) -> ResultEngine<Vec<u8>> {
    let rows: Vec<ExportRow<'_>> = records.iter().map(ExportRow::from).collect();
    serde_json::to_vec(&rows).map_err(|err| EngineError::Export(err.to_string()))
}

/// Header is written bare; every data field is quoted with inner quotes
/// doubled. Tag names are joined by `|`.
fn render_csv(records: &[TransactionRecord]) -> ResultEngine<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(CSV_HEADER.as_bytes().to_vec());

    for record in records {
        let tx = &record.transaction;
        let tags = tx
            .tags()
            .iter()
            .map(|tag| tag.name())
            .collect::<Vec<_>>()
            .join("|");
        writer
            .write_record([
                tx.id().to_string(),
                tx.journal_id().to_string(),
                record.journal_name.clone(),
                record.currency.to_string(),
                tx.kind().to_string(),
                tx.amount().to_string(),
                tx.occurred_at().to_rfc3339(),
                tx.note().unwrap_or_default().to_string(),
                tags,
            ])
            .map_err(|err| EngineError::Export(err.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|err| EngineError::Export(err.to_string()))
}
