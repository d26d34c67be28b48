//! Aggregation over already fetched transaction records.
//!
//! Every function here is pure: the caller fetches and filters the records,
//! these functions only fold them into report shapes. All records of a report
//! belong to one journal and therefore share a single currency.

use std::collections::{BTreeMap, HashMap};

use chrono::Datelike;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{TransactionKind, TransactionRecord};

/// Bucket name used for spending without any tag.
pub const UNTAGGED: &str = "Untagged";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    pub currency: String,
    pub total_in: Decimal,
    pub total_out: Decimal,
    pub net: Decimal,
}

/// Totals of one period. `opening` is always zero: balances are not carried
/// from one period to the next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PeriodRollup {
    pub currency: String,
    pub opening: Decimal,
    pub total_in: Decimal,
    pub total_out: Decimal,
    pub net_change: Decimal,
    pub closing: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthGroup {
    pub year: i32,
    pub month: u32,
    pub records: Vec<TransactionRecord>,
    pub rollups: Vec<PeriodRollup>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct YearGroup {
    pub year: i32,
    pub months: Vec<MonthGroup>,
    pub rollups: Vec<PeriodRollup>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagSpending {
    /// `None` for the untagged bucket.
    pub tag_id: Option<Uuid>,
    pub tag_name: String,
    pub total_out: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpendingByTag {
    pub currency: String,
    pub items: Vec<TagSpending>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthSpending {
    pub year: i32,
    pub month: u32,
    pub items: Vec<TagSpending>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonthlySpending {
    pub currency: String,
    pub months: Vec<MonthSpending>,
}

#[derive(Default)]
struct Totals {
    total_in: Decimal,
    total_out: Decimal,
}

fn totals<'a>(records: impl IntoIterator<Item = &'a TransactionRecord>) -> Totals {
    records
        .into_iter()
        .fold(Totals::default(), |mut acc, record| {
            match record.transaction.kind() {
                TransactionKind::In => acc.total_in += record.transaction.amount(),
                TransactionKind::Out => acc.total_out += record.transaction.amount(),
            }
            acc
        })
}

/// Sum of inflows and outflows. An empty input yields zeros and an empty
/// currency.
pub fn summarize(records: &[TransactionRecord]) -> Summary {
    let currency = records
        .first()
        .map(|r| r.currency.to_string())
        .unwrap_or_default();
    let Totals {
        total_in,
        total_out,
    } = totals(records);
    Summary {
        currency,
        total_in,
        total_out,
        net: total_in - total_out,
    }
}

fn rollups(records: &[&TransactionRecord]) -> Vec<PeriodRollup> {
    let Some(first) = records.first() else {
        return Vec::new();
    };
    let Totals {
        total_in,
        total_out,
    } = totals(records.iter().copied());
    let net = total_in - total_out;
    vec![PeriodRollup {
        currency: first.currency.to_string(),
        opening: Decimal::ZERO,
        total_in,
        total_out,
        net_change: net,
        closing: net,
    }]
}

/// Partition records by year then month of `occurred_at` (UTC).
///
/// Years and months are ordered newest first. Inside a month records are
/// ordered by `occurred_at` desc, then `created_at` desc.
pub fn group_by_period(records: &[TransactionRecord]) -> Vec<YearGroup> {
    let mut years: BTreeMap<i32, BTreeMap<u32, Vec<&TransactionRecord>>> = BTreeMap::new();
    for record in records {
        let occurred_at = record.transaction.occurred_at();
        years
            .entry(occurred_at.year())
            .or_default()
            .entry(occurred_at.month())
            .or_default()
            .push(record);
    }

    years
        .into_iter()
        .rev()
        .map(|(year, months)| {
            let year_records: Vec<&TransactionRecord> =
                months.values().flatten().copied().collect();
            let year_rollups = rollups(&year_records);

            let months = months
                .into_iter()
                .rev()
                .map(|(month, mut month_records)| {
                    month_records.sort_by(|a, b| {
                        b.transaction
                            .occurred_at()
                            .cmp(&a.transaction.occurred_at())
                            .then_with(|| {
                                b.transaction.created_at().cmp(&a.transaction.created_at())
                            })
                    });
                    MonthGroup {
                        year,
                        month,
                        rollups: rollups(&month_records),
                        records: month_records.into_iter().cloned().collect(),
                    }
                })
                .collect();

            YearGroup {
                year,
                months,
                rollups: year_rollups,
            }
        })
        .collect()
}

/// Accumulates outflows per tag, splitting each amount evenly across the
/// tags of its transaction.
#[derive(Default)]
struct TagBuckets {
    totals: HashMap<(Option<Uuid>, String), Decimal>,
}

impl TagBuckets {
    fn add(&mut self, record: &TransactionRecord) {
        let tx = &record.transaction;
        if tx.kind() != TransactionKind::Out || tx.amount() <= Decimal::ZERO {
            return;
        }
        let tags = tx.tags();
        if tags.is_empty() {
            *self
                .totals
                .entry((None, UNTAGGED.to_string()))
                .or_default() += tx.amount();
            return;
        }
        let split = tx.amount() / Decimal::from(tags.len());
        for tag in tags {
            *self
                .totals
                .entry((Some(tag.id()), tag.name().to_string()))
                .or_default() += split;
        }
    }

    /// Largest total first, ties by case-insensitive name. Rounded only here.
    fn into_items(self) -> Vec<TagSpending> {
        let mut entries: Vec<_> = self.totals.into_iter().collect();
        entries.sort_by(|((_, a_name), a_total), ((_, b_name), b_total)| {
            b_total
                .cmp(a_total)
                .then_with(|| a_name.to_lowercase().cmp(&b_name.to_lowercase()))
        });
        entries
            .into_iter()
            .map(|((tag_id, tag_name), total)| TagSpending {
                tag_id,
                tag_name,
                total_out: total.round_dp(2),
            })
            .collect()
    }
}

/// Outflows per tag over the whole input.
pub fn spending_by_tag(records: &[TransactionRecord], currency: &str) -> SpendingByTag {
    let mut buckets = TagBuckets::default();
    for record in records {
        buckets.add(record);
    }
    SpendingByTag {
        currency: currency.to_string(),
        items: buckets.into_items(),
    }
}

/// Outflows per tag for every month that has any, oldest month first.
pub fn spending_by_tag_monthly(records: &[TransactionRecord], currency: &str) -> MonthlySpending {
    let mut months: BTreeMap<(i32, u32), TagBuckets> = BTreeMap::new();
    for record in records
        .iter()
        .filter(|r| r.transaction.kind() == TransactionKind::Out)
    {
        let occurred_at = record.transaction.occurred_at();
        months
            .entry((occurred_at.year(), occurred_at.month()))
            .or_default()
            .add(record);
    }

    MonthlySpending {
        currency: currency.to_string(),
        months: months
            .into_iter()
            .map(|((year, month), buckets)| MonthSpending {
                year,
                month,
                items: buckets.into_items(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::{DateTime, Duration, TimeZone, Utc};

    use super::*;
    use crate::{Currency, Tag, Transaction};

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn record(kind: TransactionKind, amount: &str, when: DateTime<Utc>, tags: &[&Tag]) -> TransactionRecord {
        let mut tx = Transaction::new(Uuid::nil(), false, kind, dec(amount), when, None).unwrap();
        tx.set_tags(tags.iter().map(|t| (*t).clone()));
        TransactionRecord {
            transaction: tx,
            journal_name: "Main".to_string(),
            currency: Currency::try_from("USD").unwrap(),
        }
    }

    #[test]
    fn summary_of_empty_input_is_zero() {
        let summary = summarize(&[]);
        assert_eq!(summary.currency, "");
        assert_eq!(summary.total_in, Decimal::ZERO);
        assert_eq!(summary.total_out, Decimal::ZERO);
        assert_eq!(summary.net, Decimal::ZERO);
    }

    #[test]
    fn summary_nets_in_and_out() {
        let records = vec![
            record(TransactionKind::In, "100", at(2026, 1, 1), &[]),
            record(TransactionKind::Out, "30.25", at(2026, 1, 2), &[]),
            record(TransactionKind::Out, "9.75", at(2026, 1, 3), &[]),
        ];
        let summary = summarize(&records);
        assert_eq!(summary.currency, "USD");
        assert_eq!(summary.total_in, dec("100"));
        assert_eq!(summary.total_out, dec("40"));
        assert_eq!(summary.net, dec("60"));
    }

    #[test]
    fn grouping_orders_years_and_months_desc() {
        let records = vec![
            record(TransactionKind::Out, "50", at(2026, 1, 15), &[]),
            record(TransactionKind::In, "100", at(2026, 2, 5), &[]),
            record(TransactionKind::Out, "20", at(2025, 12, 1), &[]),
            record(TransactionKind::Out, "30", at(2026, 2, 10), &[]),
        ];
        let groups = group_by_period(&records);

        assert_eq!(groups.iter().map(|g| g.year).collect::<Vec<_>>(), [2026, 2025]);
        let y2026 = &groups[0];
        assert_eq!(y2026.months.iter().map(|m| m.month).collect::<Vec<_>>(), [2, 1]);

        let feb = &y2026.months[0].rollups[0];
        assert_eq!(feb.opening, Decimal::ZERO);
        assert_eq!(feb.total_in, dec("100"));
        assert_eq!(feb.total_out, dec("30"));
        assert_eq!(feb.net_change, dec("70"));
        assert_eq!(feb.closing, dec("70"));

        let jan = &y2026.months[1].rollups[0];
        assert_eq!(jan.total_in, Decimal::ZERO);
        assert_eq!(jan.total_out, dec("50"));

        assert_eq!(y2026.rollups[0].net_change, dec("20"));
        assert_eq!(y2026.rollups[0].currency, "USD");
    }

    #[test]
    fn grouping_orders_records_within_month() {
        let when = at(2026, 3, 10);
        let older = record(TransactionKind::Out, "1", when, &[]);
        let newer = TransactionRecord {
            transaction: record(TransactionKind::Out, "2", when, &[])
                .transaction
                .with_created_at(older.transaction.created_at() + Duration::seconds(5)),
            ..older.clone()
        };
        let earlier_day = record(TransactionKind::Out, "3", at(2026, 3, 1), &[]);

        let groups = group_by_period(&[earlier_day.clone(), older.clone(), newer.clone()]);
        let ids: Vec<Uuid> = groups[0].months[0]
            .records
            .iter()
            .map(|r| r.transaction.id())
            .collect();
        assert_eq!(
            ids,
            [
                newer.transaction.id(),
                older.transaction.id(),
                earlier_day.transaction.id()
            ]
        );
    }

    #[test]
    fn grouping_empty_input() {
        assert!(group_by_period(&[]).is_empty());
    }

    #[test]
    fn spending_splits_shared_tags_evenly() {
        let food = Tag::new("Food", "#6366f1").unwrap();
        let travel = Tag::new("travel", "#f97316").unwrap();
        let records = vec![
            record(TransactionKind::Out, "10", at(2026, 1, 1), &[&food, &travel]),
            record(TransactionKind::Out, "4", at(2026, 1, 2), &[&food]),
            record(TransactionKind::Out, "3", at(2026, 1, 3), &[]),
            record(TransactionKind::In, "1000", at(2026, 1, 4), &[&travel]),
        ];
        let report = spending_by_tag(&records, "USD");
        assert_eq!(report.currency, "USD");

        let items: Vec<(Option<Uuid>, &str, Decimal)> = report
            .items
            .iter()
            .map(|i| (i.tag_id, i.tag_name.as_str(), i.total_out))
            .collect();
        assert_eq!(
            items,
            [
                (Some(food.id()), "Food", dec("9")),
                (Some(travel.id()), "travel", dec("5")),
                (None, UNTAGGED, dec("3")),
            ]
        );
    }

    #[test]
    fn spending_split_does_not_leak() {
        let tags: Vec<Tag> = ["a", "b", "c"]
            .iter()
            .map(|n| Tag::new(n, "#000000").unwrap())
            .collect();
        let refs: Vec<&Tag> = tags.iter().collect();
        let records = vec![record(TransactionKind::Out, "10", at(2026, 1, 1), &refs)];
        let report = spending_by_tag(&records, "USD");

        assert_eq!(report.items.len(), 3);
        let total: Decimal = report.items.iter().map(|i| i.total_out).sum();
        assert!((total - dec("10")).abs() <= dec("0.01"));
        assert!(report.items.iter().all(|i| i.total_out == dec("3.33")));
    }

    #[test]
    fn spending_ties_sort_by_name_case_insensitive() {
        let beta = Tag::new("beta", "#000000").unwrap();
        let alpha = Tag::new("Alpha", "#000000").unwrap();
        let records = vec![
            record(TransactionKind::Out, "5", at(2026, 1, 1), &[&beta]),
            record(TransactionKind::Out, "5", at(2026, 1, 1), &[&alpha]),
        ];
        let names: Vec<String> = spending_by_tag(&records, "USD")
            .items
            .into_iter()
            .map(|i| i.tag_name)
            .collect();
        assert_eq!(names, ["Alpha", "beta"]);
    }

    #[test]
    fn spending_ignores_inflows() {
        let records = vec![record(TransactionKind::In, "100", at(2026, 1, 1), &[])];
        assert!(spending_by_tag(&records, "USD").items.is_empty());
        assert!(spending_by_tag_monthly(&records, "USD").months.is_empty());
    }

    #[test]
    fn monthly_spending_is_chronological() {
        let transit = Tag::new("MonthlyTransit", "#6366f1").unwrap();
        let records = vec![
            record(TransactionKind::Out, "60", at(2026, 2, 3), &[&transit]),
            record(TransactionKind::Out, "40", at(2026, 1, 3), &[&transit]),
            record(TransactionKind::In, "500", at(2026, 3, 1), &[]),
        ];
        let report = spending_by_tag_monthly(&records, "USD");

        assert_eq!(report.months.len(), 2);
        let jan = &report.months[0];
        assert_eq!((jan.year, jan.month), (2026, 1));
        assert_eq!(jan.items[0].tag_name, "MonthlyTransit");
        assert_eq!(jan.items[0].total_out, dec("40"));
        let feb = &report.months[1];
        assert_eq!((feb.year, feb.month), (2026, 2));
        assert_eq!(feb.items[0].total_out, dec("60"));
    }
}
