//! Conversions from engine values to API contracts.

use api_types::{
    journal::JournalResponse,
    report::{
        MonthGroupResponse, PeriodRollupResponse, SpendingByTagItemResponse,
        SpendingByTagMonthResponse, SpendingByTagMonthlyResponse, SpendingByTagResponse,
        TransactionSummaryResponse, YearGroupResponse,
    },
    tag::TagResponse,
    transaction::{TransactionQuery, TransactionResponse, TransactionType},
};
use engine::{
    Journal, MonthGroup, MonthlySpending, PeriodRollup, SpendingByTag, Summary, Tag,
    TagSpending, TransactionFilter, TransactionKind, TransactionRecord, YearGroup,
};

pub(crate) fn journal(journal: &Journal) -> JournalResponse {
    JournalResponse {
        id: journal.id(),
        name: journal.name().to_string(),
        primary_currency: journal.primary_currency().to_string(),
        is_closed: journal.is_closed(),
        created_at: journal.created_at(),
    }
}

pub(crate) fn tag(tag: &Tag) -> TagResponse {
    TagResponse {
        id: tag.id(),
        name: tag.name().to_string(),
        color: tag.color().to_string(),
    }
}

pub(crate) fn kind_to_api(kind: TransactionKind) -> TransactionType {
    match kind {
        TransactionKind::In => TransactionType::In,
        TransactionKind::Out => TransactionType::Out,
    }
}

pub(crate) fn kind_from_api(kind: TransactionType) -> TransactionKind {
    match kind {
        TransactionType::In => TransactionKind::In,
        TransactionType::Out => TransactionKind::Out,
    }
}

pub(crate) fn transaction(record: &TransactionRecord) -> TransactionResponse {
    let tx = &record.transaction;
    TransactionResponse {
        id: tx.id(),
        journal_id: tx.journal_id(),
        journal_name: record.journal_name.clone(),
        currency: record.currency.to_string(),
        kind: kind_to_api(tx.kind()),
        amount: tx.amount(),
        occurred_at: tx.occurred_at(),
        note: tx.note().map(ToString::to_string),
        tags: tx.tags().iter().map(tag).collect(),
    }
}

pub(crate) fn filter(query: &TransactionQuery) -> TransactionFilter {
    TransactionFilter {
        from: query.from,
        to: query.to,
        tag_ids: query.tag_ids.clone(),
        note_search: query.note_search.clone(),
    }
}

pub(crate) fn summary(summary: Summary) -> TransactionSummaryResponse {
    TransactionSummaryResponse {
        currency: summary.currency,
        total_in: summary.total_in,
        total_out: summary.total_out,
        net: summary.net,
    }
}

fn rollup(rollup: PeriodRollup) -> PeriodRollupResponse {
    PeriodRollupResponse {
        currency: rollup.currency,
        opening: rollup.opening,
        total_in: rollup.total_in,
        total_out: rollup.total_out,
        net_change: rollup.net_change,
        closing: rollup.closing,
    }
}

fn month_group(group: MonthGroup) -> MonthGroupResponse {
    MonthGroupResponse {
        year: group.year,
        month: group.month,
        transactions: group.records.iter().map(transaction).collect(),
        rollups: group.rollups.into_iter().map(rollup).collect(),
    }
}

pub(crate) fn year_group(group: YearGroup) -> YearGroupResponse {
    YearGroupResponse {
        year: group.year,
        months: group.months.into_iter().map(month_group).collect(),
        rollups: group.rollups.into_iter().map(rollup).collect(),
    }
}

fn tag_spending(item: TagSpending) -> SpendingByTagItemResponse {
    SpendingByTagItemResponse {
        tag_id: item.tag_id,
        tag_name: item.tag_name,
        total_out: item.total_out,
    }
}

pub(crate) fn spending_by_tag(report: SpendingByTag) -> SpendingByTagResponse {
    SpendingByTagResponse {
        currency: report.currency,
        items: report.items.into_iter().map(tag_spending).collect(),
    }
}

pub(crate) fn spending_by_tag_monthly(report: MonthlySpending) -> SpendingByTagMonthlyResponse {
    SpendingByTagMonthlyResponse {
        currency: report.currency,
        months: report
            .months
            .into_iter()
            .map(|month| SpendingByTagMonthResponse {
                year: month.year,
                month: month.month,
                items: month.items.into_iter().map(tag_spending).collect(),
            })
            .collect(),
    }
}
