//! Transaction primitives.
//!
//! A `Transaction` is a single dated money movement (`In` or `Out`) inside a
//! journal. Its amount is always strictly positive: the direction lives in
//! the kind, never in the sign.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    Currency, EngineError, ResultEngine, Tag,
    money::{from_minor, normalize_amount, to_minor},
    util::normalize_optional_text,
};

pub const MAX_NOTE_CHARS: usize = 500;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    In,
    Out,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::In => "In",
            Self::Out => "Out",
        }
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "In" => Ok(Self::In),
            "Out" => Ok(Self::Out),
            other => Err(EngineError::InvalidFormat(format!(
                "invalid transaction type: {other}"
            ))),
        }
    }
}

impl core::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    id: Uuid,
    journal_id: Uuid,
    kind: TransactionKind,
    amount: Decimal,
    occurred_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    note: Option<String>,
    tags: Vec<Tag>,
}

impl Transaction {
    /// Create a transaction in a journal.
    ///
    /// Fails with [`EngineError::JournalClosed`] when the journal is closed and
    /// with [`EngineError::InvalidAmount`] when `amount <= 0`.
    pub fn new(
        journal_id: Uuid,
        journal_is_closed: bool,
        kind: TransactionKind,
        amount: Decimal,
        occurred_at: DateTime<Utc>,
        note: Option<&str>,
    ) -> ResultEngine<Self> {
        if journal_is_closed {
            return Err(EngineError::JournalClosed(
                "cannot add a transaction to a closed journal".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            journal_id,
            kind,
            amount: normalize_amount(amount)?,
            occurred_at,
            created_at: Utc::now(),
            note: normalize_note(note)?,
            tags: Vec::new(),
        })
    }

    /// Replace kind, amount, date and note.
    ///
    /// Nothing is modified if any check fails.
    pub fn update(
        &mut self,
        journal_is_closed: bool,
        kind: TransactionKind,
        amount: Decimal,
        occurred_at: DateTime<Utc>,
        note: Option<&str>,
    ) -> ResultEngine<()> {
        if journal_is_closed {
            return Err(EngineError::JournalClosed(
                "cannot modify a transaction in a closed journal".to_string(),
            ));
        }
        let amount = normalize_amount(amount)?;
        let note = normalize_note(note)?;

        self.kind = kind;
        self.amount = amount;
        self.occurred_at = occurred_at;
        self.note = note;
        Ok(())
    }

    /// Replace the tag set, dropping duplicates by tag id.
    pub fn set_tags(&mut self, tags: impl IntoIterator<Item = Tag>) {
        self.tags.clear();
        for tag in tags {
            if !self.tags.iter().any(|t| t.id() == tag.id()) {
                self.tags.push(tag);
            }
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn journal_id(&self) -> Uuid {
        self.journal_id
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    #[cfg(test)]
    pub(crate) fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

fn normalize_note(note: Option<&str>) -> ResultEngine<Option<String>> {
    let note = normalize_optional_text(note);
    if let Some(text) = &note
        && text.chars().count() > MAX_NOTE_CHARS
    {
        return Err(EngineError::InvalidNote(format!(
            "note must be {MAX_NOTE_CHARS} characters or fewer"
        )));
    }
    Ok(note)
}

/// A transaction together with the journal data needed to display it.
///
/// Built at the persistence boundary with an explicit journal fetch, so the
/// reporting code always receives fully materialized values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionRecord {
    pub transaction: Transaction,
    pub journal_name: String,
    pub currency: Currency,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub journal_id: Uuid,
    pub kind: String,
    pub amount_minor: i64,
    pub occurred_at: DateTimeUtc,
    pub created_at: DateTimeUtc,
    pub note: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::journals::Entity",
        from = "Column::JournalId",
        to = "super::journals::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Journal,
    #[sea_orm(has_many = "super::transaction_tags::Entity")]
    TransactionTags,
}

impl Related<super::journals::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Journal.def()
    }
}

impl Related<super::transaction_tags::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TransactionTags.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<&Transaction> for ActiveModel {
    type Error = EngineError;

    fn try_from(tx: &Transaction) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ActiveValue::Set(tx.id),
            journal_id: ActiveValue::Set(tx.journal_id),
            kind: ActiveValue::Set(tx.kind.as_str().to_string()),
            amount_minor: ActiveValue::Set(to_minor(tx.amount)?),
            occurred_at: ActiveValue::Set(tx.occurred_at),
            created_at: ActiveValue::Set(tx.created_at),
            note: ActiveValue::Set(tx.note.clone()),
        })
    }
}

impl TryFrom<Model> for Transaction {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            journal_id: model.journal_id,
            kind: TransactionKind::try_from(model.kind.as_str())?,
            amount: from_minor(model.amount_minor),
            occurred_at: model.occurred_at,
            created_at: model.created_at,
            note: model.note,
            tags: Vec::new(),
        })
    }
}
