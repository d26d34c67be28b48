use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use sea_orm::Database;

use engine::{Engine, EngineError, Page, TransactionCmd, TransactionFilter, TransactionKind};
use migration::MigratorTrait;
use uuid::Uuid;

async fn engine() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder().database(db).build().await.unwrap()
}

fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}

fn out(cents: i64, occurred_at: DateTime<Utc>) -> TransactionCmd {
    TransactionCmd::new(TransactionKind::Out, Decimal::new(cents, 2), occurred_at)
}

#[tokio::test]
async fn create_resolves_journal_and_tags() {
    let engine = engine().await;
    let journal = engine.create_journal("Main", "eur").await.unwrap();
    let travel = engine.create_tag("Travel").await.unwrap();
    let food = engine.create_tag("Food").await.unwrap();

    let record = engine
        .create_transaction(
            journal.id(),
            out(1250, at(2026, 1, 5))
                .note("  Train snack ")
                .tag_ids([travel.id(), food.id(), travel.id()]),
        )
        .await
        .unwrap();

    assert_eq!(record.journal_name, "Main");
    assert_eq!(record.currency.code(), "EUR");
    let tx = &record.transaction;
    assert_eq!(tx.amount(), Decimal::new(1250, 2));
    assert_eq!(tx.note(), Some("Train snack"));
    let names: Vec<&str> = tx.tags().iter().map(|t| t.name()).collect();
    assert_eq!(names, ["Food", "Travel"]);

    let loaded = engine.transaction(tx.id()).await.unwrap().unwrap();
    assert_eq!(loaded.transaction.tags().len(), 2);
    assert_eq!(loaded.transaction.occurred_at(), at(2026, 1, 5));
}

#[tokio::test]
async fn create_rejects_bad_input() {
    let engine = engine().await;
    let journal = engine.create_journal("Main", "USD").await.unwrap();

    let err = engine
        .create_transaction(journal.id(), out(0, at(2026, 1, 1)))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let err = engine
        .create_transaction(journal.id(), out(100, at(2026, 1, 1)).note("x".repeat(501)))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidNote(_)));

    let err = engine
        .create_transaction(journal.id(), out(100, at(2026, 1, 1)).tag_ids([Uuid::new_v4()]))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidTags("One or more tag IDs are invalid.".to_string())
    );

    let err = engine
        .create_transaction(Uuid::new_v4(), out(100, at(2026, 1, 1)))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));

    let page = engine
        .list_transactions(journal.id(), &TransactionFilter::default(), Page::default())
        .await
        .unwrap();
    assert_eq!(page.total_count, 0);
}

#[tokio::test]
async fn amounts_are_rounded_to_cents() {
    let engine = engine().await;
    let journal = engine.create_journal("Main", "USD").await.unwrap();

    let record = engine
        .create_transaction(
            journal.id(),
            TransactionCmd::new(TransactionKind::In, Decimal::new(10125, 3), at(2026, 1, 1)),
        )
        .await
        .unwrap();
    assert_eq!(record.transaction.amount(), Decimal::new(1012, 2));

    let err = engine
        .create_transaction(
            journal.id(),
            TransactionCmd::new(TransactionKind::In, Decimal::new(4, 3), at(2026, 1, 1)),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));
}

#[tokio::test]
async fn update_replaces_fields_and_tags() {
    let engine = engine().await;
    let journal = engine.create_journal("Main", "USD").await.unwrap();
    let food = engine.create_tag("Food").await.unwrap();
    let fun = engine.create_tag("Fun").await.unwrap();

    let created = engine
        .create_transaction(
            journal.id(),
            out(500, at(2026, 1, 1)).note("lunch").tag_ids([food.id()]),
        )
        .await
        .unwrap();
    let id = created.transaction.id();

    let updated = engine
        .update_transaction(
            id,
            TransactionCmd::new(TransactionKind::In, Decimal::new(700, 2), at(2026, 1, 2))
                .tag_ids([fun.id()]),
        )
        .await
        .unwrap()
        .unwrap();
    let tx = &updated.transaction;
    assert_eq!(tx.kind(), TransactionKind::In);
    assert_eq!(tx.amount(), Decimal::new(700, 2));
    assert_eq!(tx.note(), None);
    assert_eq!(tx.tags().len(), 1);
    assert_eq!(tx.tags()[0].id(), fun.id());

    let missing = engine
        .update_transaction(Uuid::new_v4(), out(100, at(2026, 1, 1)))
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn failed_update_leaves_transaction_untouched() {
    let engine = engine().await;
    let journal = engine.create_journal("Main", "USD").await.unwrap();
    let food = engine.create_tag("Food").await.unwrap();
    let created = engine
        .create_transaction(journal.id(), out(500, at(2026, 1, 1)).tag_ids([food.id()]))
        .await
        .unwrap();
    let id = created.transaction.id();

    let err = engine
        .update_transaction(id, out(900, at(2026, 1, 1)).tag_ids([Uuid::new_v4()]))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidTags(_)));

    let loaded = engine.transaction(id).await.unwrap().unwrap();
    assert_eq!(loaded.transaction.amount(), Decimal::new(500, 2));
    assert_eq!(loaded.transaction.tags().len(), 1);
}

#[tokio::test]
async fn closed_journal_freezes_transactions() {
    let engine = engine().await;
    let journal = engine.create_journal("Main", "USD").await.unwrap();
    let created = engine
        .create_transaction(journal.id(), out(500, at(2026, 1, 1)))
        .await
        .unwrap();
    let id = created.transaction.id();
    engine.close_journal(journal.id()).await.unwrap();

    let err = engine
        .create_transaction(journal.id(), out(100, at(2026, 1, 1)))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::JournalClosed(_)));
    let err = engine
        .update_transaction(id, out(100, at(2026, 1, 1)))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::JournalClosed(_)));
    let err = engine.delete_transaction(id).await.unwrap_err();
    assert!(matches!(err, EngineError::JournalClosed(_)));

    engine.reopen_journal(journal.id()).await.unwrap();
    assert!(engine.delete_transaction(id).await.unwrap());
    assert!(!engine.delete_transaction(id).await.unwrap());
    assert!(engine.transaction(id).await.unwrap().is_none());
}

#[tokio::test]
async fn list_orders_filters_and_pages() {
    let engine = engine().await;
    let journal = engine.create_journal("Main", "USD").await.unwrap();
    let other = engine.create_journal("Other", "USD").await.unwrap();
    let transit = engine.create_tag("Transit").await.unwrap();

    for (day, note) in [(1, "Bus"), (2, "Coffee 100%"), (3, "bus pass"), (4, "Lunch")] {
        let mut cmd = out(100, at(2026, 1, day)).note(note);
        if note.to_lowercase().contains("bus") {
            cmd = cmd.tag_ids([transit.id()]);
        }
        engine.create_transaction(journal.id(), cmd).await.unwrap();
    }
    engine
        .create_transaction(other.id(), out(100, at(2026, 1, 2)).note("bus"))
        .await
        .unwrap();

    let all = engine
        .list_transactions(journal.id(), &TransactionFilter::default(), Page::default())
        .await
        .unwrap();
    assert_eq!(all.total_count, 4);
    let notes: Vec<_> = all.items.iter().map(|r| r.transaction.note().unwrap()).collect();
    assert_eq!(notes, ["Lunch", "bus pass", "Coffee 100%", "Bus"]);

    let second = engine
        .list_transactions(journal.id(), &TransactionFilter::default(), Page::new(2, 3))
        .await
        .unwrap();
    assert_eq!(second.page, 2);
    assert_eq!(second.total_count, 4);
    assert_eq!(second.items.len(), 1);
    assert_eq!(second.items[0].transaction.note(), Some("Bus"));

    let search = TransactionFilter::default().note_search("BUS");
    let found = engine
        .list_transactions(journal.id(), &search, Page::default())
        .await
        .unwrap();
    assert_eq!(found.total_count, 2);

    let spaced = TransactionFilter::default().note_search("bus ");
    let found = engine
        .list_transactions(journal.id(), &spaced, Page::default())
        .await
        .unwrap();
    assert_eq!(found.total_count, 1);
    assert_eq!(found.items[0].transaction.note(), Some("bus pass"));

    let blank = TransactionFilter::default().note_search("   ");
    let found = engine
        .list_transactions(journal.id(), &blank, Page::default())
        .await
        .unwrap();
    assert_eq!(found.total_count, 4);

    let percent = TransactionFilter::default().note_search("0%");
    let found = engine
        .list_transactions(journal.id(), &percent, Page::default())
        .await
        .unwrap();
    assert_eq!(found.total_count, 1);

    let tagged = TransactionFilter::default().tag_ids([transit.id()]);
    let found = engine
        .list_transactions(journal.id(), &tagged, Page::default())
        .await
        .unwrap();
    assert_eq!(found.total_count, 2);

    let range = TransactionFilter::default()
        .since(at(2026, 1, 2))
        .until(at(2026, 1, 3));
    let found = engine
        .list_transactions(journal.id(), &range, Page::default())
        .await
        .unwrap();
    assert_eq!(found.total_count, 2);
}

#[tokio::test]
async fn same_day_ties_break_on_creation_time() {
    let engine = engine().await;
    let journal = engine.create_journal("Main", "USD").await.unwrap();
    engine
        .create_transaction(journal.id(), out(100, at(2026, 1, 1)).note("first"))
        .await
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    engine
        .create_transaction(journal.id(), out(100, at(2026, 1, 1)).note("second"))
        .await
        .unwrap();

    let page = engine
        .list_transactions(journal.id(), &TransactionFilter::default(), Page::default())
        .await
        .unwrap();
    assert_eq!(page.items[0].transaction.note(), Some("second"));
}

#[tokio::test]
async fn page_past_the_end_is_empty() {
    let engine = engine().await;
    let journal = engine.create_journal("Main", "USD").await.unwrap();
    engine
        .create_transaction(journal.id(), out(100, at(2026, 1, 1)))
        .await
        .unwrap();

    for page in [Page::new(i64::MAX, 200), Page::new(i64::MAX, 1), Page::new(3, 1)] {
        let found = engine
            .list_transactions(journal.id(), &TransactionFilter::default(), page)
            .await
            .unwrap();
        assert!(found.items.is_empty());
        assert_eq!(found.total_count, 1);
    }
}
