use sea_orm::{QueryFilter, QueryOrder, QuerySelect, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{EngineError, Journal, ResultEngine, journals, transaction_tags, transactions};

use super::{Engine, with_tx};

impl Engine {
    /// All journals, oldest first.
    pub async fn journals(&self) -> ResultEngine<Vec<Journal>> {
        journals::Entity::find()
            .order_by_asc(journals::Column::CreatedAt)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Journal::try_from)
            .collect()
    }

    pub async fn journal(&self, journal_id: Uuid) -> ResultEngine<Option<Journal>> {
        journals::Entity::find_by_id(journal_id)
            .one(&self.database)
            .await?
            .map(Journal::try_from)
            .transpose()
    }

    pub async fn create_journal(&self, name: &str, primary_currency: &str) -> ResultEngine<Journal> {
        let journal = Journal::new(name, primary_currency)?;
        with_tx!(self, |db_tx| {
            journals::ActiveModel::from(&journal).insert(&db_tx).await?;
            Ok::<_, EngineError>(())
        })?;
        tracing::info!(
            "created journal {} ({}) in {}",
            journal.id(),
            journal.name(),
            journal.primary_currency()
        );
        Ok(journal)
    }

    pub async fn rename_journal(&self, journal_id: Uuid, name: &str) -> ResultEngine<Option<Journal>> {
        self.change_journal(journal_id, |journal| journal.rename(name))
            .await
    }

    /// Close a journal. Closing an already closed journal is a no-op.
    pub async fn close_journal(&self, journal_id: Uuid) -> ResultEngine<Option<Journal>> {
        self.change_journal(journal_id, |journal| {
            journal.close();
            Ok(())
        })
        .await
    }

    /// Reopen a journal. Reopening an open journal is a no-op.
    pub async fn reopen_journal(&self, journal_id: Uuid) -> ResultEngine<Option<Journal>> {
        self.change_journal(journal_id, |journal| {
            journal.reopen();
            Ok(())
        })
        .await
    }

    /// Delete a closed journal together with its transactions.
    ///
    /// Returns `false` when the journal does not exist and
    /// [`EngineError::JournalOpen`] when it is still open.
    pub async fn delete_journal(&self, journal_id: Uuid) -> ResultEngine<bool> {
        with_tx!(self, |db_tx| {
            let Some(model) = journals::Entity::find_by_id(journal_id).one(&db_tx).await? else {
                tracing::warn!("attempted to delete non-existent journal {journal_id}");
                return Ok(false);
            };
            if !model.is_closed {
                return Err(EngineError::JournalOpen(
                    "journal must be closed before it can be deleted".to_string(),
                ));
            }

            let transaction_ids = transactions::Entity::find()
                .select_only()
                .column(transactions::Column::Id)
                .filter(transactions::Column::JournalId.eq(journal_id))
                .into_tuple::<Uuid>()
                .all(&db_tx)
                .await?;
            if !transaction_ids.is_empty() {
                transaction_tags::Entity::delete_many()
                    .filter(transaction_tags::Column::TransactionId.is_in(transaction_ids.clone()))
                    .exec(&db_tx)
                    .await?;
            }
            transactions::Entity::delete_many()
                .filter(transactions::Column::JournalId.eq(journal_id))
                .exec(&db_tx)
                .await?;
            journals::Entity::delete_by_id(journal_id)
                .exec(&db_tx)
                .await?;

            tracing::info!(
                "deleted journal {journal_id} with {} transactions",
                transaction_ids.len()
            );
            Ok(true)
        })
    }

    async fn change_journal<F>(&self, journal_id: Uuid, change: F) -> ResultEngine<Option<Journal>>
    where
        F: FnOnce(&mut Journal) -> ResultEngine<()>,
    {
        with_tx!(self, |db_tx| {
            let Some(model) = journals::Entity::find_by_id(journal_id).one(&db_tx).await? else {
                tracing::warn!("attempted to update non-existent journal {journal_id}");
                return Ok(None);
            };
            let mut journal = Journal::try_from(model)?;
            change(&mut journal)?;
            journals::ActiveModel::from(&journal).update(&db_tx).await?;
            tracing::info!("updated journal {journal_id}");
            Ok(Some(journal))
        })
    }
}
