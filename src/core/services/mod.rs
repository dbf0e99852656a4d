//! 各服務類型的條件建構與價格記錄擷取
//!
//! 新增服務只需新增一個 [`PricingService`] 實作並在 [`handler`] 登記。

pub mod compute;
pub mod database;
pub mod grouped;
pub mod object_storage;

use crate::domain::model::{Filter, PriceRecord, ProductDocument, QueryParameters, ServiceType};

pub trait PricingService: Send + Sync {
    /// 建構查詢條件；缺少選填參數時不可失敗
    fn build_filters(&self, params: &QueryParameters, region: Option<&str>) -> Vec<Filter>;

    /// 從單一產品文件擷取價格記錄
    fn extract_records(&self, document: &ProductDocument) -> Vec<PriceRecord>;
}

pub fn handler(service: ServiceType) -> &'static dyn PricingService {
    match service {
        ServiceType::ComputeInstance => &compute::ComputeInstance,
        ServiceType::ObjectStorage => &object_storage::ObjectStorage,
        ServiceType::RelationalDatabase => &database::RelationalDatabase,
        ServiceType::ServerlessFunction => &grouped::ServerlessFunction,
        ServiceType::KeyValueStore => &grouped::KeyValueStore,
    }
}

pub fn build_filters(
    service: ServiceType,
    params: &QueryParameters,
    region: Option<&str>,
) -> Vec<Filter> {
    handler(service).build_filters(params, region)
}

/// 小寫並把 `-`、`_` 視為空白，方便子字串比對
pub(crate) fn normalize_token(token: &str) -> String {
    token.trim().to_lowercase().replace(['-', '_'], " ")
}

/// 依表格順序做子字串比對，回傳第一個命中的標準名稱
pub(crate) fn match_alias(
    token: &str,
    table: &[(&'static str, &[&str])],
) -> Option<&'static str> {
    let normalized = normalize_token(token);
    table
        .iter()
        .find(|(_, aliases)| aliases.iter().any(|alias| normalized.contains(alias)))
        .map(|(name, _)| *name)
}

/// 所有 OnDemand 條款的每個價格維度各產生一筆記錄
pub(crate) fn records_per_dimension(
    document: &ProductDocument,
    details: impl Fn() -> crate::domain::model::RecordDetails,
) -> Vec<PriceRecord> {
    let region = document.attribute_or_na("location");
    document
        .price_dimensions()
        .into_iter()
        .map(|dimension| PriceRecord::new(region.clone(), details(), Some(dimension)))
        .collect()
}
