use crate::domain::model::{CatalogQuery, PricingOutcome, ProductDocument, QueryParameters};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 價格目錄服務：以 service code 與條件查詢產品文件
///
/// 空結果與找不到不做區分，都以空清單回傳。
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn get_products(&self, query: &CatalogQuery) -> Result<Vec<ProductDocument>>;
}

/// 將自然語言查詢轉為結構化參數
#[async_trait]
pub trait ParameterExtractor: Send + Sync {
    async fn extract_parameters(&self, query: &str) -> Result<QueryParameters>;
}

/// 將價格結果轉為自然語言回應，錯誤也以文字回應呈現
#[async_trait]
pub trait ResponseGenerator: Send + Sync {
    async fn generate_response(&self, query: &str, pricing: &PricingOutcome) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn host(&self) -> &str;
    fn port(&self) -> u16;
    fn openai_api_key(&self) -> &str;
    fn openai_base_url(&self) -> &str;
    fn extraction_model(&self) -> &str;
    fn response_model(&self) -> &str;
    fn request_timeout_secs(&self) -> u64;
    fn pricing_region(&self) -> &str;
    fn max_catalog_pages(&self) -> usize;
}
