use uuid::Uuid;

use crate::{
    Export, ExportFormat, MonthlySpending, ResultEngine, SpendingByTag, Summary,
    TransactionFilter, YearGroup, export, reports,
};

use super::Engine;

impl Engine {
    /// Totals of the matching transactions of a journal.
    ///
    /// An unknown journal yields an empty summary.
    pub async fn summary(&self, journal_id: Uuid, filter: &TransactionFilter) -> ResultEngine<Summary> {
        let records = self.journal_records(journal_id, filter, true).await?;
        Ok(reports::summarize(&records))
    }

    /// Matching transactions grouped by year and month, newest first.
    pub async fn grouped(
        &self,
        journal_id: Uuid,
        filter: &TransactionFilter,
    ) -> ResultEngine<Vec<YearGroup>> {
        let records = self.journal_records(journal_id, filter, true).await?;
        tracing::info!("building grouped transactions for {} records", records.len());
        Ok(reports::group_by_period(&records))
    }

    pub async fn spending_by_tag(
        &self,
        journal_id: Uuid,
        filter: &TransactionFilter,
    ) -> ResultEngine<SpendingByTag> {
        let records = self.journal_records(journal_id, filter, true).await?;
        tracing::info!("building spending-by-tag breakdown for {} records", records.len());
        let currency = self.currency_code(journal_id).await?;
        Ok(reports::spending_by_tag(&records, &currency))
    }

    pub async fn spending_by_tag_monthly(
        &self,
        journal_id: Uuid,
        filter: &TransactionFilter,
    ) -> ResultEngine<MonthlySpending> {
        let records = self.journal_records(journal_id, filter, true).await?;
        tracing::info!(
            "building monthly spending-by-tag breakdown for {} records",
            records.len()
        );
        let currency = self.currency_code(journal_id).await?;
        Ok(reports::spending_by_tag_monthly(&records, &currency))
    }

    /// Render the matching transactions of a journal as a file.
    ///
    /// `note_search` is not applied to exports.
    pub async fn export(
        &self,
        journal_id: Uuid,
        filter: &TransactionFilter,
        format: ExportFormat,
    ) -> ResultEngine<Export> {
        let records = self.journal_records(journal_id, filter, false).await?;
        let rendered = export::render(&records, format)?;
        tracing::info!("exported {} transactions as {format:?}", records.len());
        Ok(rendered)
    }

    async fn currency_code(&self, journal_id: Uuid) -> ResultEngine<String> {
        Ok(self
            .journal_currency(journal_id)
            .await?
            .map(|currency| currency.to_string())
            .unwrap_or_default())
    }
}
