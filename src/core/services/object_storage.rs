use super::{match_alias, records_per_dimension, PricingService};
use crate::domain::model::{
    Filter, PriceRecord, ProductDocument, QueryParameters, RecordDetails, FIELD_LOCATION,
};

pub const DEFAULT_STORAGE_CLASS: &str = "Standard";

/// 儲存層級與別名（英文或中文），順序即比對優先序：
/// 較長的名稱必須排在會被它包含的短名稱之前
const STORAGE_CLASSES: &[(&str, &[&str])] = &[
    (
        "Glacier Deep Archive",
        &["deep archive", "deeparchive", "深度歸檔", "深度归档", "深度封存"],
    ),
    ("Intelligent-Tiering", &["intelligent", "智能分層", "智能分层", "智能"]),
    (
        "One Zone-Infrequent Access",
        &["one zone", "onezone", "單區", "单区"],
    ),
    (
        "Standard-Infrequent Access",
        &["infrequent", "standard ia", "不常", "低頻", "低频"],
    ),
    ("Glacier", &["glacier", "冷藏", "冰川", "封存"]),
    ("Standard", &["standard", "標準", "标准"]),
];

/// S3 物件儲存
pub struct ObjectStorage;

/// 未指定或無法辨識時回到 Standard
pub fn normalize_storage_class(token: Option<&str>) -> &'static str {
    token
        .and_then(|t| match_alias(t, STORAGE_CLASSES))
        .unwrap_or(DEFAULT_STORAGE_CLASS)
}

impl PricingService for ObjectStorage {
    fn build_filters(&self, params: &QueryParameters, region: Option<&str>) -> Vec<Filter> {
        let mut filters = Vec::new();

        if let Some(location) = region {
            filters.push(Filter::optional(FIELD_LOCATION, location));
        }

        filters.push(Filter::mandatory(
            "storageClass",
            normalize_storage_class(params.storage_class()),
        ));

        filters
    }

    fn extract_records(&self, document: &ProductDocument) -> Vec<PriceRecord> {
        records_per_dimension(document, || RecordDetails::ObjectStorage {
            storage_class: document.attribute_or_na("storageClass"),
            volume_type: document.attribute_or_na("volumeType"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_storage_class_normalization() {
        assert_eq!(normalize_storage_class(Some("冷藏")), "Glacier");
        assert_eq!(normalize_storage_class(Some("S3 Glacier")), "Glacier");
        assert_eq!(normalize_storage_class(Some("glacier deep archive")), "Glacier Deep Archive");
        assert_eq!(normalize_storage_class(Some("深度歸檔")), "Glacier Deep Archive");
        assert_eq!(normalize_storage_class(Some("Standard-IA")), "Standard-Infrequent Access");
        assert_eq!(normalize_storage_class(Some("One Zone-IA")), "One Zone-Infrequent Access");
        assert_eq!(normalize_storage_class(Some("智能分層")), "Intelligent-Tiering");
        assert_eq!(normalize_storage_class(Some("標準")), "Standard");
        assert_eq!(normalize_storage_class(Some("something else")), "Standard");
        assert_eq!(normalize_storage_class(None), "Standard");
    }

    #[test]
    fn test_storage_class_filter_always_present() {
        let filters = ObjectStorage.build_filters(&QueryParameters::default(), None);
        assert_eq!(filters.len(), 1);
        assert_eq!(filters[0].field, "storageClass");
        assert_eq!(filters[0].value, "Standard");
    }

    #[test]
    fn test_one_record_per_dimension() {
        let doc = ProductDocument::new(json!({
            "product": {"attributes": {
                "location": "US East (N. Virginia)",
                "storageClass": "General Purpose",
                "volumeType": "Standard"
            }},
            "terms": {"OnDemand": {
                "T1": {"priceDimensions": {
                    "D1": {"unit": "GB-Mo", "description": "first 50 TB", "pricePerUnit": {"USD": "0.023"}},
                    "D2": {"unit": "GB-Mo", "description": "next 450 TB", "pricePerUnit": {"USD": "0.022"}}
                }},
                "T2": {"priceDimensions": {
                    "D3": {"unit": "Requests", "pricePerUnit": {"USD": "0.0004"}}
                }}
            }}
        }));

        let records = ObjectStorage.extract_records(&doc);
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.region == "US East (N. Virginia)"));
        assert_eq!(records[2].unit, "Requests");
        assert!(records[2].description.is_none());
    }

    #[test]
    fn test_empty_terms_yield_no_records() {
        let doc = ProductDocument::new(json!({"product": {"attributes": {}}, "terms": {}}));
        assert!(ObjectStorage.extract_records(&doc).is_empty());
    }
}
