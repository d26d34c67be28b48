use std::collections::HashMap;

use sea_orm::{
    ActiveValue, ConnectionTrait, DatabaseTransaction, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, TransactionTrait,
    prelude::*,
    sea_query::{Expr, Func, LikeExpr, Query},
};
use uuid::Uuid;

use crate::{
    Currency, EngineError, Journal, Page, Paged, ResultEngine, Tag, Transaction, TransactionCmd,
    TransactionFilter, TransactionRecord, journals, tags, transaction_tags, transactions,
};

use super::{Engine, with_tx};

trait ApplyTxFilters: QueryFilter + Sized {
    fn apply_tx_filters(self, filter: &TransactionFilter, with_note: bool) -> Self;
}

impl<T> ApplyTxFilters for T
where
    T: QueryFilter + Sized,
{
    fn apply_tx_filters(mut self, filter: &TransactionFilter, with_note: bool) -> Self {
        if let Some(from) = filter.from {
            self = self.filter(transactions::Column::OccurredAt.gte(from));
        }
        if let Some(to) = filter.to {
            self = self.filter(transactions::Column::OccurredAt.lte(to));
        }
        if !filter.tag_ids.is_empty() {
            self = self.filter(
                transactions::Column::Id.in_subquery(
                    Query::select()
                        .column(transaction_tags::Column::TransactionId)
                        .from(transaction_tags::Entity)
                        .and_where(transaction_tags::Column::TagId.is_in(filter.tag_ids.clone()))
                        .to_owned(),
                ),
            );
        }
        if with_note && let Some(search) = filter.search_text() {
            self = self.filter(
                Expr::expr(Func::lower(Expr::col(transactions::Column::Note)))
                    .like(LikeExpr::new(like_pattern(search)).escape('\\')),
            );
        }
        self
    }
}

/// `%search%` with LIKE wildcards in the search escaped, lower-cased.
fn like_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for c in search.to_lowercase().chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn journal_query(journal_id: Uuid, filter: &TransactionFilter, with_note: bool) -> Select<transactions::Entity> {
    transactions::Entity::find()
        .filter(transactions::Column::JournalId.eq(journal_id))
        .apply_tx_filters(filter, with_note)
        .order_by_desc(transactions::Column::OccurredAt)
        .order_by_desc(transactions::Column::CreatedAt)
}

/// Attach tags and journal data to stored transactions, keeping their order.
async fn materialize<C: ConnectionTrait>(
    db: &C,
    models: Vec<transactions::Model>,
) -> ResultEngine<Vec<TransactionRecord>> {
    if models.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
    let mut tags_by_tx: HashMap<Uuid, Vec<Tag>> = HashMap::new();
    for (link, tag) in transaction_tags::Entity::find()
        .filter(transaction_tags::Column::TransactionId.is_in(ids))
        .find_also_related(tags::Entity)
        .order_by_asc(tags::Column::Name)
        .all(db)
        .await?
    {
        if let Some(tag) = tag {
            tags_by_tx
                .entry(link.transaction_id)
                .or_default()
                .push(Tag::from(tag));
        }
    }

    let mut journal_ids: Vec<Uuid> = models.iter().map(|m| m.journal_id).collect();
    journal_ids.sort_unstable();
    journal_ids.dedup();
    let mut journals_by_id: HashMap<Uuid, Journal> = HashMap::new();
    for model in journals::Entity::find()
        .filter(journals::Column::Id.is_in(journal_ids))
        .all(db)
        .await?
    {
        let journal = Journal::try_from(model)?;
        journals_by_id.insert(journal.id(), journal);
    }

    models
        .into_iter()
        .map(|model| {
            let tx_id = model.id;
            let journal_id = model.journal_id;
            let mut transaction = Transaction::try_from(model)?;
            transaction.set_tags(tags_by_tx.remove(&tx_id).unwrap_or_default());
            let journal = journals_by_id
                .get(&journal_id)
                .ok_or_else(|| EngineError::KeyNotFound(format!("journal {journal_id}")))?;
            Ok::<_, EngineError>(record(transaction, journal))
        })
        .collect()
}

fn record(transaction: Transaction, journal: &Journal) -> TransactionRecord {
    TransactionRecord {
        transaction,
        journal_name: journal.name().to_string(),
        currency: journal.primary_currency().clone(),
    }
}

/// Load the tags named by `tag_ids`, failing if any of them is unknown.
async fn resolve_tags(db_tx: &DatabaseTransaction, tag_ids: &[Uuid]) -> ResultEngine<Vec<Tag>> {
    let mut ids = tag_ids.to_vec();
    ids.sort_unstable();
    ids.dedup();
    if ids.is_empty() {
        return Ok(Vec::new());
    }

    let found = tags::Entity::find()
        .filter(tags::Column::Id.is_in(ids.clone()))
        .order_by_asc(tags::Column::Name)
        .all(db_tx)
        .await?;
    if found.len() != ids.len() {
        return Err(EngineError::InvalidTags(
            "One or more tag IDs are invalid.".to_string(),
        ));
    }
    Ok(found.into_iter().map(Tag::from).collect())
}

async fn replace_links(db_tx: &DatabaseTransaction, transaction: &Transaction) -> ResultEngine<()> {
    transaction_tags::Entity::delete_many()
        .filter(transaction_tags::Column::TransactionId.eq(transaction.id()))
        .exec(db_tx)
        .await?;
    if transaction.tags().is_empty() {
        return Ok(());
    }
    let links = transaction.tags().iter().map(|tag| transaction_tags::ActiveModel {
        transaction_id: ActiveValue::Set(transaction.id()),
        tag_id: ActiveValue::Set(tag.id()),
    });
    transaction_tags::Entity::insert_many(links)
        .exec_without_returning(db_tx)
        .await?;
    Ok(())
}

async fn journal_of(db_tx: &DatabaseTransaction, journal_id: Uuid) -> ResultEngine<Journal> {
    journals::Entity::find_by_id(journal_id)
        .one(db_tx)
        .await?
        .ok_or_else(|| EngineError::KeyNotFound(format!("journal {journal_id}")))
        .and_then(Journal::try_from)
}

impl Engine {
    /// One page of a journal's transactions, newest first.
    pub async fn list_transactions(
        &self,
        journal_id: Uuid,
        filter: &TransactionFilter,
        page: Page,
    ) -> ResultEngine<Paged<TransactionRecord>> {
        with_tx!(self, |db_tx| {
            let query = journal_query(journal_id, filter, true);
            let total_count = query.clone().count(&db_tx).await?;
            let models = query
                .offset(page.offset())
                .limit(page.page_size())
                .all(&db_tx)
                .await?;
            let items = materialize(&db_tx, models).await?;
            Ok(Paged {
                items,
                page: page.page(),
                page_size: page.page_size(),
                total_count,
            })
        })
    }

    /// Every matching transaction of a journal, newest first.
    ///
    /// `with_note` controls whether `note_search` is applied.
    pub(super) async fn journal_records(
        &self,
        journal_id: Uuid,
        filter: &TransactionFilter,
        with_note: bool,
    ) -> ResultEngine<Vec<TransactionRecord>> {
        with_tx!(self, |db_tx| {
            let models = journal_query(journal_id, filter, with_note)
                .all(&db_tx)
                .await?;
            materialize(&db_tx, models).await
        })
    }

    pub async fn transaction(&self, transaction_id: Uuid) -> ResultEngine<Option<TransactionRecord>> {
        with_tx!(self, |db_tx| {
            let Some(model) = transactions::Entity::find_by_id(transaction_id)
                .one(&db_tx)
                .await?
            else {
                return Ok(None);
            };
            Ok(materialize(&db_tx, vec![model]).await?.pop())
        })
    }

    /// Record a new transaction in a journal.
    ///
    /// Fails with [`EngineError::KeyNotFound`] for an unknown journal,
    /// [`EngineError::JournalClosed`] for a closed one and
    /// [`EngineError::InvalidTags`] when a tag id does not exist.
    pub async fn create_transaction(
        &self,
        journal_id: Uuid,
        cmd: TransactionCmd,
    ) -> ResultEngine<TransactionRecord> {
        let record = with_tx!(self, |db_tx| {
            let journal = journal_of(&db_tx, journal_id).await?;
            let mut transaction = Transaction::new(
                journal.id(),
                journal.is_closed(),
                cmd.kind,
                cmd.amount,
                cmd.occurred_at,
                cmd.note.as_deref(),
            )?;
            transaction.set_tags(resolve_tags(&db_tx, &cmd.tag_ids).await?);

            transactions::ActiveModel::try_from(&transaction)?
                .insert(&db_tx)
                .await?;
            replace_links(&db_tx, &transaction).await?;
            Ok::<_, EngineError>(record(transaction, &journal))
        })?;
        let tx = &record.transaction;
        tracing::info!(
            "created transaction {} of type {} with amount {} in journal {}",
            tx.id(),
            tx.kind(),
            tx.amount(),
            tx.journal_id()
        );
        Ok(record)
    }

    /// Replace kind, amount, date, note and tags of a transaction.
    pub async fn update_transaction(
        &self,
        transaction_id: Uuid,
        cmd: TransactionCmd,
    ) -> ResultEngine<Option<TransactionRecord>> {
        with_tx!(self, |db_tx| {
            let Some(model) = transactions::Entity::find_by_id(transaction_id)
                .one(&db_tx)
                .await?
            else {
                tracing::warn!("attempted to update non-existent transaction {transaction_id}");
                return Ok(None);
            };
            let journal = journal_of(&db_tx, model.journal_id).await?;
            let mut transaction = Transaction::try_from(model)?;
            transaction.update(
                journal.is_closed(),
                cmd.kind,
                cmd.amount,
                cmd.occurred_at,
                cmd.note.as_deref(),
            )?;
            transaction.set_tags(resolve_tags(&db_tx, &cmd.tag_ids).await?);

            transactions::ActiveModel::try_from(&transaction)?
                .update(&db_tx)
                .await?;
            replace_links(&db_tx, &transaction).await?;
            tracing::info!("updated transaction {transaction_id}");
            Ok(Some(record(transaction, &journal)))
        })
    }

    /// Delete a transaction of an open journal.
    pub async fn delete_transaction(&self, transaction_id: Uuid) -> ResultEngine<bool> {
        with_tx!(self, |db_tx| {
            let Some(model) = transactions::Entity::find_by_id(transaction_id)
                .one(&db_tx)
                .await?
            else {
                tracing::warn!("attempted to delete non-existent transaction {transaction_id}");
                return Ok(false);
            };
            if journal_of(&db_tx, model.journal_id).await?.is_closed() {
                return Err(EngineError::JournalClosed(
                    "cannot delete a transaction from a closed journal".to_string(),
                ));
            }
            transaction_tags::Entity::delete_many()
                .filter(transaction_tags::Column::TransactionId.eq(transaction_id))
                .exec(&db_tx)
                .await?;
            transactions::Entity::delete_by_id(transaction_id)
                .exec(&db_tx)
                .await?;
            tracing::info!("deleted transaction {transaction_id}");
            Ok(true)
        })
    }

    /// Primary currency of a journal, if it exists.
    pub(super) async fn journal_currency(&self, journal_id: Uuid) -> ResultEngine<Option<Currency>> {
        Ok(self
            .journal(journal_id)
            .await?
            .map(|journal| journal.primary_currency().clone()))
    }
}
