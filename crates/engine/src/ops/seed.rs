//! Demo data for local development.

use chrono::{TimeZone, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveValue, PaginatorTrait, TransactionTrait, prelude::*};

use crate::{
    EngineError, Journal, ResultEngine, Tag, Transaction, TransactionKind, journals, tags,
    transaction_tags, transactions,
};

use super::{Engine, with_tx};

use crate::TransactionKind::{In, Out};

const FOOD: usize = 0;
const TRANSPORT: usize = 1;
const ENTERTAINMENT: usize = 2;
const UTILITIES: usize = 3;
const SHOPPING: usize = 4;
const HEALTH: usize = 5;
const EDUCATION: usize = 6;
const GROCERIES: usize = 7;

const SEED_TAGS: [(&str, &str); 8] = [
    ("Food & Dining", "#ef4444"),
    ("Transport", "#f59e0b"),
    ("Entertainment", "#8b5cf6"),
    ("Utilities", "#06b6d4"),
    ("Shopping", "#ec4899"),
    ("Health", "#10b981"),
    ("Education", "#6366f1"),
    ("Groceries", "#84cc16"),
];

/// `(kind, amount in cents, year, month, day, note, tags)`, all at 12:00 UTC.
type SeedRow = (TransactionKind, i64, i32, u32, u32, &'static str, &'static [usize]);

#[rustfmt::skip]
const SEED_TRANSACTIONS: &[SeedRow] = &[
    // Sep 2025
    (In,  420000, 2025, 9, 1,  "Salary", &[]),
    (Out, 135000, 2025, 9, 2,  "Rent", &[UTILITIES]),
    (Out,   8550, 2025, 9, 4,  "Weekly groceries", &[GROCERIES]),
    (Out,   4200, 2025, 9, 6,  "Sushi dinner", &[FOOD]),
    (Out,   5500, 2025, 9, 8,  "Monthly transit pass", &[TRANSPORT]),
    (Out,   1299, 2025, 9, 10, "Netflix subscription", &[ENTERTAINMENT]),
    (Out,   9200, 2025, 9, 11, "Groceries - Costco", &[GROCERIES]),
    (Out,   3500, 2025, 9, 14, "New running shoes", &[SHOPPING, HEALTH]),
    (Out,   2800, 2025, 9, 18, "Thai takeout", &[FOOD]),
    (Out,  12000, 2025, 9, 20, "Electric bill", &[UTILITIES]),
    (Out,   1500, 2025, 9, 22, "Uber ride", &[TRANSPORT]),
    (In,   15000, 2025, 9, 25, "Freelance side gig", &[]),
    (Out,   6500, 2025, 9, 27, "Birthday gift for friend", &[SHOPPING]),
    // Oct 2025
    (In,  420000, 2025, 10, 1,  "Salary", &[]),
    (Out, 135000, 2025, 10, 2,  "Rent", &[UTILITIES]),
    (Out,   7800, 2025, 10, 3,  "Weekly groceries", &[GROCERIES]),
    (Out,   5500, 2025, 10, 5,  "Monthly transit pass", &[TRANSPORT]),
    (Out,   3800, 2025, 10, 7,  "Ramen night out", &[FOOD]),
    (Out,  25000, 2025, 10, 9,  "Online Python course", &[EDUCATION]),
    (Out,   1299, 2025, 10, 10, "Netflix subscription", &[ENTERTAINMENT]),
    (Out,   4500, 2025, 10, 12, "Concert tickets", &[ENTERTAINMENT]),
    (Out,   9500, 2025, 10, 14, "Groceries - Trader Joe's", &[GROCERIES]),
    (Out,   2200, 2025, 10, 16, "Coffee beans & supplies", &[FOOD]),
    (Out,  11000, 2025, 10, 18, "Electric bill", &[UTILITIES]),
    (Out,   3000, 2025, 10, 20, "Flu medication", &[HEALTH]),
    (Out,   1800, 2025, 10, 24, "Uber ride", &[TRANSPORT]),
    (In,   20000, 2025, 10, 28, "Sold old textbooks", &[]),
    (Out,   7500, 2025, 10, 30, "Halloween costume & decor", &[SHOPPING, ENTERTAINMENT]),
    // Nov 2025
    (In,  420000, 2025, 11, 1,  "Salary", &[]),
    (Out, 135000, 2025, 11, 2,  "Rent", &[UTILITIES]),
    (Out,   8200, 2025, 11, 3,  "Weekly groceries", &[GROCERIES]),
    (Out,   5500, 2025, 11, 5,  "Monthly transit pass", &[TRANSPORT]),
    (Out,   1299, 2025, 11, 10, "Netflix subscription", &[ENTERTAINMENT]),
    (Out,   6500, 2025, 11, 11, "Italian dinner date", &[FOOD]),
    (Out,  34000, 2025, 11, 14, "Black Friday laptop deal", &[SHOPPING]),
    (Out,   8800, 2025, 11, 16, "Groceries - Whole Foods", &[GROCERIES]),
    (Out,  10500, 2025, 11, 18, "Electric bill", &[UTILITIES]),
    (Out,   5000, 2025, 11, 20, "Annual flu shot", &[HEALTH]),
    (Out,   3200, 2025, 11, 22, "Uber rides (3)", &[TRANSPORT]),
    (Out,   2500, 2025, 11, 24, "Streaming services", &[ENTERTAINMENT]),
    (In,   50000, 2025, 11, 26, "Thanksgiving bonus", &[]),
    (Out,  18000, 2025, 11, 28, "Thanksgiving dinner supplies", &[FOOD, GROCERIES]),
    // Dec 2025
    (In,  420000, 2025, 12, 1,  "Salary", &[]),
    (In,   80000, 2025, 12, 15, "Year-end bonus", &[]),
    (Out, 135000, 2025, 12, 2,  "Rent", &[UTILITIES]),
    (Out,   9000, 2025, 12, 3,  "Weekly groceries", &[GROCERIES]),
    (Out,   5500, 2025, 12, 5,  "Monthly transit pass", &[TRANSPORT]),
    (Out,   1299, 2025, 12, 10, "Netflix subscription", &[ENTERTAINMENT]),
    (Out,  42000, 2025, 12, 12, "Christmas gifts", &[SHOPPING]),
    (Out,   5800, 2025, 12, 14, "Holiday party dinner", &[FOOD, ENTERTAINMENT]),
    (Out,  11500, 2025, 12, 16, "Groceries for holiday baking", &[GROCERIES]),
    (Out,  12500, 2025, 12, 18, "Electric bill (winter)", &[UTILITIES]),
    (Out,   4000, 2025, 12, 20, "Dentist co-pay", &[HEALTH]),
    (Out,   2200, 2025, 12, 22, "Uber to airport", &[TRANSPORT]),
    (Out,   3500, 2025, 12, 28, "New Year's party supplies", &[ENTERTAINMENT, FOOD]),
    // Jan 2026
    (In,  450000, 2026, 1, 1,  "Salary (raise!)", &[]),
    (Out, 135000, 2026, 1, 2,  "Rent", &[UTILITIES]),
    (Out,   7500, 2026, 1, 4,  "Weekly groceries", &[GROCERIES]),
    (Out,   5500, 2026, 1, 5,  "Monthly transit pass", &[TRANSPORT]),
    (Out,  15000, 2026, 1, 8,  "Gym annual membership", &[HEALTH]),
    (Out,   1299, 2026, 1, 10, "Netflix subscription", &[ENTERTAINMENT]),
    (Out,   8800, 2026, 1, 12, "Groceries - Costco", &[GROCERIES]),
    (Out,   4200, 2026, 1, 14, "Korean BBQ dinner", &[FOOD]),
    (Out,  30000, 2026, 1, 16, "Online UX design course", &[EDUCATION]),
    (Out,  11500, 2026, 1, 18, "Electric bill", &[UTILITIES]),
    (Out,   2800, 2026, 1, 20, "Pharmacy", &[HEALTH]),
    (Out,   9500, 2026, 1, 22, "Winter jacket on sale", &[SHOPPING]),
    (Out,   1800, 2026, 1, 25, "Uber ride", &[TRANSPORT]),
    (In,   25000, 2026, 1, 28, "Freelance design work", &[]),
    // Feb 2026
    (In,  450000, 2026, 2, 1,  "Salary", &[]),
    (Out, 135000, 2026, 2, 2,  "Rent", &[UTILITIES]),
    (Out,   8000, 2026, 2, 3,  "Weekly groceries", &[GROCERIES]),
    (Out,   5500, 2026, 2, 5,  "Monthly transit pass", &[TRANSPORT]),
    (Out,   8500, 2026, 2, 8,  "Valentine's dinner", &[FOOD, ENTERTAINMENT]),
    (Out,   4500, 2026, 2, 10, "Valentine's gift", &[SHOPPING]),
    (Out,   1299, 2026, 2, 10, "Netflix subscription", &[ENTERTAINMENT]),
    (Out,   9200, 2026, 2, 13, "Groceries - Trader Joe's", &[GROCERIES]),
    (Out,  11000, 2026, 2, 16, "Electric bill", &[UTILITIES]),
    (Out,   3500, 2026, 2, 18, "Brunch with friends", &[FOOD]),
    (Out,   2000, 2026, 2, 20, "Book - Clean Architecture", &[EDUCATION]),
    (Out,   2500, 2026, 2, 22, "Uber rides", &[TRANSPORT]),
];

impl Engine {
    /// Populate an empty database with a sample journal.
    ///
    /// Does nothing and returns `false` when any transaction exists. Otherwise
    /// the leftover (transaction-less) journals and tags are removed first,
    /// so the seed tags never collide with existing names.
    pub async fn seed_demo_data(&self) -> ResultEngine<bool> {
        let seeded = with_tx!(self, |db_tx| {
            if transactions::Entity::find().count(&db_tx).await? > 0 {
                tracing::info!("seed skipped: transactions already exist");
                return Ok(false);
            }

            transaction_tags::Entity::delete_many().exec(&db_tx).await?;
            tags::Entity::delete_many().exec(&db_tx).await?;
            journals::Entity::delete_many().exec(&db_tx).await?;

            let mut seed_tags = Vec::with_capacity(SEED_TAGS.len());
            for (name, color) in SEED_TAGS {
                let tag = Tag::new(name, color)?;
                tags::ActiveModel::from(&tag).insert(&db_tx).await?;
                seed_tags.push(tag);
            }

            let journal = Journal::new("Personal Budget", "USD")?;
            journals::ActiveModel::from(&journal).insert(&db_tx).await?;

            for &(kind, cents, year, month, day, note, tag_idx) in SEED_TRANSACTIONS {
                let occurred_at = Utc
                    .with_ymd_and_hms(year, month, day, 12, 0, 0)
                    .single()
                    .ok_or_else(|| {
                        EngineError::InvalidRange(format!("invalid seed date {year}-{month}-{day}"))
                    })?;
                let mut transaction = Transaction::new(
                    journal.id(),
                    journal.is_closed(),
                    kind,
                    Decimal::new(cents, 2),
                    occurred_at,
                    Some(note),
                )?;
                transaction.set_tags(tag_idx.iter().map(|&i| seed_tags[i].clone()));

                transactions::ActiveModel::try_from(&transaction)?
                    .insert(&db_tx)
                    .await?;
                if !transaction.tags().is_empty() {
                    let links = transaction.tags().iter().map(|tag| transaction_tags::ActiveModel {
                        transaction_id: ActiveValue::Set(transaction.id()),
                        tag_id: ActiveValue::Set(tag.id()),
                    });
                    transaction_tags::Entity::insert_many(links)
                        .exec_without_returning(&db_tx)
                        .await?;
                }
            }
            Ok::<_, EngineError>(true)
        })?;

        if seeded {
            tracing::info!(
                "seed created {} tags, 1 journal and {} transactions",
                SEED_TAGS.len(),
                SEED_TRANSACTIONS.len()
            );
        }
        Ok(seeded)
    }
}
