use sea_orm::{DatabaseTransaction, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine, Tag,
    tags::{self, normalize_tag_name, palette_color},
    transaction_tags,
};

use super::{Engine, with_tx};

impl Engine {
    /// All tags ordered by name.
    pub async fn tags(&self) -> ResultEngine<Vec<Tag>> {
        Ok(tags::Entity::find()
            .order_by_asc(tags::Column::Name)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Tag::from)
            .collect())
    }

    pub async fn tag(&self, tag_id: Uuid) -> ResultEngine<Option<Tag>> {
        Ok(tags::Entity::find_by_id(tag_id)
            .one(&self.database)
            .await?
            .map(Tag::from))
    }

    /// Create a tag, picking its color from the palette.
    ///
    /// Fails with [`EngineError::ExistingKey`] when another tag already has
    /// the same (trimmed) name.
    pub async fn create_tag(&self, name: &str) -> ResultEngine<Tag> {
        let name = normalize_tag_name(name)?;
        let tag = with_tx!(self, |db_tx| {
            ensure_unique_name(&db_tx, &name, None).await?;
            let existing = tags::Entity::find().count(&db_tx).await?;
            let tag = Tag::new(&name, palette_color(existing))?;
            tags::ActiveModel::from(&tag).insert(&db_tx).await?;
            Ok::<_, EngineError>(tag)
        })?;
        tracing::info!(
            "created tag {} ({}) with color {}",
            tag.id(),
            tag.name(),
            tag.color()
        );
        Ok(tag)
    }

    /// Rename a tag. Keeping its current name is allowed.
    pub async fn rename_tag(&self, tag_id: Uuid, name: &str) -> ResultEngine<Option<Tag>> {
        with_tx!(self, |db_tx| {
            let Some(model) = tags::Entity::find_by_id(tag_id).one(&db_tx).await? else {
                tracing::warn!("attempted to update non-existent tag {tag_id}");
                return Ok(None);
            };
            let mut tag = Tag::from(model);
            tag.rename(name)?;
            ensure_unique_name(&db_tx, tag.name(), Some(tag_id)).await?;
            tags::ActiveModel::from(&tag).update(&db_tx).await?;
            tracing::info!("updated tag {tag_id}");
            Ok(Some(tag))
        })
    }

    /// Detach a tag from every transaction and delete it.
    pub async fn delete_tag(&self, tag_id: Uuid) -> ResultEngine<bool> {
        with_tx!(self, |db_tx| {
            if tags::Entity::find_by_id(tag_id).one(&db_tx).await?.is_none() {
                tracing::warn!("attempted to delete non-existent tag {tag_id}");
                return Ok(false);
            }
            transaction_tags::Entity::delete_many()
                .filter(transaction_tags::Column::TagId.eq(tag_id))
                .exec(&db_tx)
                .await?;
            tags::Entity::delete_by_id(tag_id).exec(&db_tx).await?;
            tracing::info!("deleted tag {tag_id}");
            Ok(true)
        })
    }
}

async fn ensure_unique_name(
    db_tx: &DatabaseTransaction,
    name: &str,
    except: Option<Uuid>,
) -> ResultEngine<()> {
    let mut query = tags::Entity::find().filter(tags::Column::Name.eq(name));
    if let Some(id) = except {
        query = query.filter(tags::Column::Id.ne(id));
    }
    if query.one(db_tx).await?.is_some() {
        return Err(EngineError::ExistingKey(name.to_string()));
    }
    Ok(())
}
