use crate::core::{estimator, executor::CatalogQueryExecutor, extractor, region, services};
use crate::domain::model::{
    CatalogQuery, PriceRecord, PricingOutcome, QueryParameters, ServiceType,
};
use crate::domain::ports::CatalogClient;
use crate::utils::error::Result;

/// 參數 → 條件 → 目錄查詢 → 價格記錄
///
/// 不保留任何跨請求狀態，同樣的參數對同一份目錄永遠得到同樣的結果。
pub struct PricingEngine<C: CatalogClient> {
    catalog: C,
}

impl<C: CatalogClient> PricingEngine<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    pub async fn resolve(&self, params: &QueryParameters) -> Result<Vec<PriceRecord>> {
        let service = params.service_type()?;
        let candidates = params.region().map(region::resolve);
        let primary = candidates.as_ref().map(|c| c.primary().location.as_str());

        let filters = services::build_filters(service, params, primary);
        let query = CatalogQuery::new(service, filters);

        tracing::info!(
            service = %service,
            region = primary.unwrap_or("-"),
            "Resolving pricing with {} filters",
            query.filters.len()
        );

        let documents = CatalogQueryExecutor::new(&self.catalog)
            .execute(&query, candidates.as_ref())
            .await?;

        let records = extractor::extract(service, &documents);

        let records = match (service, params.storage_size()) {
            (ServiceType::ObjectStorage, Some(size)) => estimator::estimate(records, size),
            _ => records,
        };

        tracing::info!("Resolved {} price records", records.len());
        Ok(records)
    }

    /// 錯誤折疊為 `{ "error": ... }`
    pub async fn resolve_outcome(&self, params: &QueryParameters) -> PricingOutcome {
        match self.resolve(params).await {
            Ok(records) => PricingOutcome::Records(records),
            Err(e) => {
                tracing::error!(
                    "❌ Pricing resolution failed: {} (Category: {:?}, Severity: {:?})",
                    e,
                    e.category(),
                    e.severity()
                );
                PricingOutcome::from_error(&e)
            }
        }
    }
}
