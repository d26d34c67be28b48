//! Tags label transactions for spending breakdowns.
//!
//! Tag names are globally unique (compared after trimming, case-sensitive).
//! Colors are picked round-robin from a fixed palette when a tag is created.

use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use crate::{ResultEngine, util::normalize_required_name};

pub const MAX_TAG_NAME_CHARS: usize = 60;

/// Display colors handed out to new tags, in order.
pub const TAG_PALETTE: [&str; 12] = [
    "#6366f1", // indigo
    "#f97316", // orange
    "#10b981", // emerald
    "#ec4899", // pink
    "#3b82f6", // blue
    "#f59e0b", // amber
    "#14b8a6", // teal
    "#a855f7", // purple
    "#ef4444", // red
    "#84cc16", // lime
    "#06b6d4", // cyan
    "#f472b6", // fuchsia-pink
];

/// Color for the next tag given how many tags already exist.
///
/// Two concurrent creations can observe the same count and get the same
/// color; colors are cosmetic so this is accepted.
#[must_use]
pub fn palette_color(existing_tags: u64) -> &'static str {
    TAG_PALETTE[(existing_tags % TAG_PALETTE.len() as u64) as usize]
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tag {
    id: Uuid,
    name: String,
    color: String,
}

impl Tag {
    pub fn new(name: &str, color: &str) -> ResultEngine<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            name: normalize_tag_name(name)?,
            color: color.to_string(),
        })
    }

    pub fn rename(&mut self, name: &str) -> ResultEngine<()> {
        self.name = normalize_tag_name(name)?;
        Ok(())
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> &str {
        &self.color
    }
}

/// Trim and validate a tag name (1..=60 chars).
pub(crate) fn normalize_tag_name(name: &str) -> ResultEngine<String> {
    normalize_required_name(name, "tag", MAX_TAG_NAME_CHARS)
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tags")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub color: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::transaction_tags::Entity")]
    TransactionTags,
}

impl Related<super::transaction_tags::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TransactionTags.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Tag> for ActiveModel {
    fn from(tag: &Tag) -> Self {
        Self {
            id: ActiveValue::Set(tag.id),
            name: ActiveValue::Set(tag.name.clone()),
            color: ActiveValue::Set(tag.color.clone()),
        }
    }
}

impl From<Model> for Tag {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            color: model.color,
        }
    }
}
