use super::{records_per_dimension, PricingService};
use crate::domain::model::{
    Filter, PriceRecord, ProductDocument, QueryParameters, RecordDetails, FIELD_LOCATION,
};

/// 以 `group` 屬性區分記錄的服務，只接受地區條件
fn region_only(region: Option<&str>) -> Vec<Filter> {
    region
        .map(|location| vec![Filter::optional(FIELD_LOCATION, location)])
        .unwrap_or_default()
}

fn grouped_records(document: &ProductDocument) -> Vec<PriceRecord> {
    records_per_dimension(document, || RecordDetails::Grouped {
        group: document.attribute_or_na("group"),
    })
}

/// Lambda
pub struct ServerlessFunction;

/// DynamoDB
pub struct KeyValueStore;

impl PricingService for ServerlessFunction {
    fn build_filters(&self, _params: &QueryParameters, region: Option<&str>) -> Vec<Filter> {
        region_only(region)
    }

    fn extract_records(&self, document: &ProductDocument) -> Vec<PriceRecord> {
        grouped_records(document)
    }
}

impl PricingService for KeyValueStore {
    fn build_filters(&self, _params: &QueryParameters, region: Option<&str>) -> Vec<Filter> {
        region_only(region)
    }

    fn extract_records(&self, document: &ProductDocument) -> Vec<PriceRecord> {
        grouped_records(document)
    }
}
