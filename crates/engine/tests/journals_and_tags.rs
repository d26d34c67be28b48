use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::Database;

use engine::{
    Engine, EngineError, Page, TAG_PALETTE, TransactionCmd, TransactionFilter, TransactionKind,
};
use migration::MigratorTrait;
use uuid::Uuid;

async fn engine() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder().database(db).build().await.unwrap()
}

#[tokio::test]
async fn journals_are_listed_oldest_first() {
    let engine = engine().await;
    let first = engine.create_journal("First", "USD").await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = engine.create_journal("Second", "JPY").await.unwrap();

    let ids: Vec<Uuid> = engine
        .journals()
        .await
        .unwrap()
        .iter()
        .map(|j| j.id())
        .collect();
    assert_eq!(ids, [first.id(), second.id()]);
}

#[tokio::test]
async fn journal_validation() {
    let engine = engine().await;
    assert!(matches!(
        engine.create_journal("  ", "USD").await,
        Err(EngineError::InvalidName(_))
    ));
    assert!(matches!(
        engine.create_journal(&"x".repeat(101), "USD").await,
        Err(EngineError::InvalidName(_))
    ));
    assert!(matches!(
        engine.create_journal("Trip", "EU").await,
        Err(EngineError::InvalidCurrency(_))
    ));
    assert!(engine.journals().await.unwrap().is_empty());
}

#[tokio::test]
async fn rename_close_and_reopen() {
    let engine = engine().await;
    let journal = engine.create_journal("Main", "USD").await.unwrap();

    let renamed = engine
        .rename_journal(journal.id(), " Household ")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(renamed.name(), "Household");
    assert_eq!(renamed.primary_currency().code(), "USD");

    let closed = engine.close_journal(journal.id()).await.unwrap().unwrap();
    assert!(closed.is_closed());
    let closed = engine.close_journal(journal.id()).await.unwrap().unwrap();
    assert!(closed.is_closed());
    let reopened = engine.reopen_journal(journal.id()).await.unwrap().unwrap();
    assert!(!reopened.is_closed());

    assert!(engine.rename_journal(Uuid::new_v4(), "X").await.unwrap().is_none());
    assert!(engine.close_journal(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_requires_closed_journal_and_cascades() {
    let engine = engine().await;
    let journal = engine.create_journal("Main", "USD").await.unwrap();
    let tag = engine.create_tag("Food").await.unwrap();
    engine
        .create_transaction(
            journal.id(),
            TransactionCmd::new(TransactionKind::Out, Decimal::new(100, 2), Utc::now())
                .tag_ids([tag.id()]),
        )
        .await
        .unwrap();

    let err = engine.delete_journal(journal.id()).await.unwrap_err();
    assert!(matches!(err, EngineError::JournalOpen(_)));

    engine.close_journal(journal.id()).await.unwrap();
    assert!(engine.delete_journal(journal.id()).await.unwrap());
    assert!(engine.journal(journal.id()).await.unwrap().is_none());
    assert!(!engine.delete_journal(journal.id()).await.unwrap());

    let page = engine
        .list_transactions(journal.id(), &TransactionFilter::default(), Page::default())
        .await
        .unwrap();
    assert_eq!(page.total_count, 0);
    assert!(engine.tag(tag.id()).await.unwrap().is_some());
}

#[tokio::test]
async fn tag_colors_follow_palette() {
    let engine = engine().await;
    for i in 0..=TAG_PALETTE.len() {
        let tag = engine.create_tag(&format!("tag {i:02}")).await.unwrap();
        assert_eq!(tag.color(), TAG_PALETTE[i % TAG_PALETTE.len()]);
    }
    let names: Vec<String> = engine
        .tags()
        .await
        .unwrap()
        .iter()
        .map(|t| t.name().to_string())
        .collect();
    assert_eq!(names.first().map(String::as_str), Some("tag 00"));
    assert_eq!(names.len(), TAG_PALETTE.len() + 1);
}

#[tokio::test]
async fn tag_names_are_unique_after_trimming() {
    let engine = engine().await;
    let food = engine.create_tag("Food").await.unwrap();
    let fun = engine.create_tag("Fun").await.unwrap();

    assert!(matches!(
        engine.create_tag(" Food ").await,
        Err(EngineError::ExistingKey(_))
    ));
    assert!(matches!(
        engine.rename_tag(fun.id(), "Food").await,
        Err(EngineError::ExistingKey(_))
    ));
    let same = engine.rename_tag(food.id(), "Food").await.unwrap().unwrap();
    assert_eq!(same.name(), "Food");
    assert!(matches!(
        engine.create_tag(&"t".repeat(61)).await,
        Err(EngineError::InvalidName(_))
    ));
    assert!(engine.rename_tag(Uuid::new_v4(), "X").await.unwrap().is_none());
}

#[tokio::test]
async fn deleting_a_tag_detaches_it() {
    let engine = engine().await;
    let journal = engine.create_journal("Main", "USD").await.unwrap();
    let food = engine.create_tag("Food").await.unwrap();
    let record = engine
        .create_transaction(
            journal.id(),
            TransactionCmd::new(TransactionKind::Out, Decimal::new(100, 2), Utc::now())
                .tag_ids([food.id()]),
        )
        .await
        .unwrap();

    assert!(engine.delete_tag(food.id()).await.unwrap());
    assert!(!engine.delete_tag(food.id()).await.unwrap());

    let loaded = engine
        .transaction(record.transaction.id())
        .await
        .unwrap()
        .unwrap();
    assert!(loaded.transaction.tags().is_empty());
}
