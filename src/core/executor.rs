use crate::domain::model::{CatalogQuery, ProductDocument, RegionCandidate, RegionCandidates};
use crate::domain::ports::CatalogClient;
use crate::utils::error::{PriceError, Result};

/// 空結果時的放寬查詢階段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackStage {
    /// 全部條件，主要地區候選
    Full,
    /// 只保留實例類型與地區
    Reduced,
    /// 放寬條件搭配第 n 個備用地區候選
    AltRegion(usize),
    /// 全部嘗試完仍無結果
    Empty,
}

impl FallbackStage {
    /// 目前階段得到空結果後的下一個階段
    pub fn next(self, alternates: usize) -> FallbackStage {
        let alt_region = |index: usize| {
            if index < alternates {
                FallbackStage::AltRegion(index)
            } else {
                FallbackStage::Empty
            }
        };

        match self {
            FallbackStage::Full => FallbackStage::Reduced,
            FallbackStage::Reduced => alt_region(0),
            FallbackStage::AltRegion(index) => alt_region(index + 1),
            FallbackStage::Empty => FallbackStage::Empty,
        }
    }
}

pub struct CatalogQueryExecutor<'a, C: CatalogClient + ?Sized> {
    client: &'a C,
}

impl<'a, C: CatalogClient + ?Sized> CatalogQueryExecutor<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// 依序執行各階段，第一個非空結果即回傳
    ///
    /// 只有運算實例會走放寬流程；其他服務只查一次。FULL 階段的傳輸錯誤直接
    /// 回報，後續階段的錯誤記錄後視為空結果。
    pub async fn execute(
        &self,
        query: &CatalogQuery,
        candidates: Option<&RegionCandidates>,
    ) -> Result<Vec<ProductDocument>> {
        let alternates: &[RegionCandidate] = match candidates {
            Some(candidates) if query.has_region() => candidates.alternates(),
            _ => &[],
        };
        let fallback = query.service.supports_fallback();

        let mut stage = FallbackStage::Full;
        loop {
            let stage_query = match stage {
                FallbackStage::Full => query.clone(),
                FallbackStage::Reduced => query.reduced(),
                FallbackStage::AltRegion(index) => {
                    query.reduced().with_region(&alternates[index].location)
                }
                FallbackStage::Empty => {
                    tracing::info!(
                        "No catalog entries matched {} after all fallback stages",
                        query.service_code()
                    );
                    return Ok(Vec::new());
                }
            };

            tracing::debug!(
                stage = ?stage,
                service_code = stage_query.service_code(),
                filters = stage_query.filters.len(),
                "Querying pricing catalog"
            );

            match self.client.get_products(&stage_query).await {
                Ok(documents) if !documents.is_empty() => {
                    tracing::debug!(stage = ?stage, "Catalog returned {} documents", documents.len());
                    return Ok(documents);
                }
                Ok(_) => {
                    tracing::debug!(stage = ?stage, "Catalog returned no documents");
                }
                Err(e) if stage == FallbackStage::Full => {
                    tracing::error!("❌ Catalog query failed: {}", e);
                    return Err(PriceError::CatalogTransportError { message: e.detail() });
                }
                Err(e) => {
                    tracing::warn!(stage = ?stage, "Catalog query failed, treating as empty: {}", e);
                }
            }

            if !fallback {
                return Ok(Vec::new());
            }

            stage = stage.next(alternates.len());
            if stage != FallbackStage::Empty {
                tracing::warn!(stage = ?stage, "Relaxing catalog query");
            }
        }
    }
}
