use crate::domain::model::{CatalogQuery, ProductDocument};
use crate::domain::ports::CatalogClient;
use crate::utils::error::{PriceError, Result};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_pricing::config::Region;
use aws_sdk_pricing::error::DisplayErrorContext;
use aws_sdk_pricing::types::{Filter as PricingFilter, FilterType};
use aws_sdk_pricing::Client as PricingClient;

/// Price List API 只在少數區域提供
pub const DEFAULT_PRICING_REGION: &str = "us-east-1";

const PAGE_SIZE: i32 = 100;

/// 以 AWS Price List API (GetProducts) 實作的價格目錄
#[derive(Debug, Clone)]
pub struct AwsPricingCatalog {
    client: PricingClient,
    max_pages: usize,
}

impl AwsPricingCatalog {
    pub fn new(client: PricingClient) -> Self {
        Self {
            client,
            max_pages: 1,
        }
    }

    /// 憑證來自預設的 provider chain（環境變數、profile、IMDS…）
    pub async fn from_env(region: &str) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;
        Self::new(PricingClient::new(&config))
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    fn build_filters(query: &CatalogQuery) -> Result<Vec<PricingFilter>> {
        query
            .filters
            .iter()
            .map(|filter| {
                PricingFilter::builder()
                    .r#type(FilterType::TermMatch)
                    .field(&filter.field)
                    .value(&filter.value)
                    .build()
                    .map_err(|e| PriceError::CatalogTransportError {
                        message: format!("invalid filter '{}': {}", filter.field, e),
                    })
            })
            .collect()
    }
}

#[async_trait]
impl CatalogClient for AwsPricingCatalog {
    async fn get_products(&self, query: &CatalogQuery) -> Result<Vec<ProductDocument>> {
        let filters = Self::build_filters(query)?;
        let mut documents = Vec::new();
        let mut next_token: Option<String> = None;

        for page in 0..self.max_pages {
            let output = self
                .client
                .get_products()
                .service_code(query.service_code())
                .format_version("aws_v1")
                .set_filters(Some(filters.clone()))
                .max_results(PAGE_SIZE)
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| PriceError::CatalogTransportError {
                    message: DisplayErrorContext(&e).to_string(),
                })?;

            for (index, entry) in output.price_list().iter().enumerate() {
                match ProductDocument::from_json_str(entry) {
                    Ok(document) => documents.push(document),
                    Err(e) => tracing::warn!(
                        page = page,
                        entry = index,
                        "Skipping unparsable price list entry: {}",
                        e
                    ),
                }
            }

            next_token = output.next_token().map(str::to_string);
            if next_token.is_none() {
                break;
            }
        }

        tracing::debug!(
            "GetProducts {} returned {} documents",
            query.service_code(),
            documents.len()
        );
        Ok(documents)
    }
}
