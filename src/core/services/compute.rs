use super::PricingService;
use crate::domain::model::{
    Filter, PriceRecord, ProductDocument, QueryParameters, RecordDetails, FIELD_INSTANCE_TYPE,
    FIELD_LOCATION,
};

const COMPUTE_UNIT: &str = "USD per Hour";

/// EC2 運算實例
pub struct ComputeInstance;

/// 作業系統關鍵字正規化：包含 linux / windows 即歸類，否則原樣傳遞
pub fn normalize_operating_system(token: &str) -> String {
    let lowered = token.to_lowercase();
    if lowered.contains("linux") {
        "Linux".to_string()
    } else if lowered.contains("windows") {
        "Windows".to_string()
    } else {
        token.trim().to_string()
    }
}

impl PricingService for ComputeInstance {
    fn build_filters(&self, params: &QueryParameters, region: Option<&str>) -> Vec<Filter> {
        let mut filters = Vec::new();

        if let Some(instance_type) = params.instance_type() {
            filters.push(Filter::optional(FIELD_INSTANCE_TYPE, instance_type));
        }

        if let Some(location) = region {
            filters.push(Filter::optional(FIELD_LOCATION, location));
        }

        if let Some(os) = params.operating_system() {
            filters.push(Filter::optional(
                "operatingSystem",
                normalize_operating_system(os),
            ));
        }

        filters.push(Filter::mandatory("productFamily", "Compute Instance"));
        filters.push(Filter::mandatory("tenancy", "Shared"));

        filters
    }

    /// 隨需運算價格只有單一維度，取第一個條款的第一個維度
    fn extract_records(&self, document: &ProductDocument) -> Vec<PriceRecord> {
        let details = RecordDetails::Compute {
            instance_type: document.attribute_or_na("instanceType"),
            operating_system: document.attribute_or_na("operatingSystem"),
        };

        let mut record = PriceRecord::new(
            document.attribute_or_na("location"),
            details,
            document.first_price_dimension(),
        );
        record.unit = COMPUTE_UNIT.to_string();

        vec![record]
    }
}
