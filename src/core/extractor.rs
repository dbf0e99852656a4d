use crate::core::services;
use crate::domain::model::{PriceRecord, ProductDocument, ServiceType};

/// 將產品文件攤平成價格記錄
///
/// 結構錯誤的文件記錄警告後略過，不影響其他文件。
pub fn extract(service: ServiceType, documents: &[ProductDocument]) -> Vec<PriceRecord> {
    let handler = services::handler(service);
    let mut records = Vec::new();

    for (index, document) in documents.iter().enumerate() {
        if let Err(e) = document.ensure_well_formed() {
            tracing::warn!(
                service = %service,
                document = index,
                "Skipping malformed product document: {}",
                e
            );
            continue;
        }

        records.extend(handler.extract_records(document));
    }

    tracing::debug!(
        "Extracted {} price records from {} documents",
        records.len(),
        documents.len()
    );
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_malformed_document_is_skipped() {
        let documents = vec![
            ProductDocument::new(json!({"terms": {}})),
            ProductDocument::new(json!("not an object")),
            ProductDocument::new(json!({
                "product": {"attributes": {"instanceType": "m5.large", "location": "EU (Paris)"}},
                "terms": {"OnDemand": {"T": {"priceDimensions": {
                    "D": {"unit": "Hrs", "pricePerUnit": {"USD": "0.112"}}
                }}}}
            })),
        ];

        let records = extract(ServiceType::ComputeInstance, &documents);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].price, "0.112");
    }

    #[test]
    fn test_empty_attributes_degrade_to_sentinel() {
        let documents = vec![ProductDocument::new(json!({"product": {}}))];
        let records = extract(ServiceType::ComputeInstance, &documents);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].region, "N/A");
        assert_eq!(records[0].price, "N/A");
    }

    #[test]
    fn test_multi_dimension_service_drops_document_without_terms() {
        let documents = vec![ProductDocument::new(json!({"product": {"attributes": {}}, "terms": {}}))];
        assert!(extract(ServiceType::KeyValueStore, &documents).is_empty());
    }
}
