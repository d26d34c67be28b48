//! A `Journal` is a named ledger with one primary currency. Every
//! transaction belongs to exactly one journal.
//!
//! A journal is created open. Closing it freezes its transactions (no
//! create/update/delete) and is the precondition for deleting it.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{Currency, EngineError, ResultEngine, util::normalize_required_name};

pub const MAX_JOURNAL_NAME_CHARS: usize = 100;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Journal {
    id: Uuid,
    name: String,
    primary_currency: Currency,
    is_closed: bool,
    created_at: DateTime<Utc>,
}

impl Journal {
    /// Create an open journal with a fresh id.
    ///
    /// The name is trimmed (1..=100 chars) and the currency normalized to an
    /// upper-case 3-letter code.
    pub fn new(name: &str, primary_currency: &str) -> ResultEngine<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            name: normalize_required_name(name, "journal", MAX_JOURNAL_NAME_CHARS)?,
            primary_currency: Currency::try_from(primary_currency)?,
            is_closed: false,
            created_at: Utc::now(),
        })
    }

    pub fn rename(&mut self, name: &str) -> ResultEngine<()> {
        self.name = normalize_required_name(name, "journal", MAX_JOURNAL_NAME_CHARS)?;
        Ok(())
    }

    pub fn close(&mut self) {
        self.is_closed = true;
    }

    pub fn reopen(&mut self) {
        self.is_closed = false;
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn primary_currency(&self) -> &Currency {
        &self.primary_currency
    }

    pub fn is_closed(&self) -> bool {
        self.is_closed
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "journals")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub primary_currency: String,
    pub is_closed: bool,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::transactions::Entity")]
    Transactions,
}

impl Related<super::transactions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Journal> for ActiveModel {
    fn from(journal: &Journal) -> Self {
        Self {
            id: ActiveValue::Set(journal.id),
            name: ActiveValue::Set(journal.name.clone()),
            primary_currency: ActiveValue::Set(journal.primary_currency.code().to_string()),
            is_closed: ActiveValue::Set(journal.is_closed),
            created_at: ActiveValue::Set(journal.created_at),
        }
    }
}

impl TryFrom<Model> for Journal {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            name: model.name,
            primary_currency: Currency::try_from(model.primary_currency.as_str())?,
            is_closed: model.is_closed,
            created_at: model.created_at,
        })
    }
}
