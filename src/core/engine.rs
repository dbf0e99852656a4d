use crate::core::pricing::PricingEngine;
use crate::domain::model::{ExtractedParameters, PricingOutcome, QueryResponse};
use crate::domain::ports::{CatalogClient, ParameterExtractor, ResponseGenerator};

/// 一次查詢的完整流程：擷取參數、解析價格、產生回應
pub struct QueryEngine<E, C, R>
where
    E: ParameterExtractor,
    C: CatalogClient,
    R: ResponseGenerator,
{
    extractor: E,
    pricing: PricingEngine<C>,
    responder: R,
}

impl<E, C, R> QueryEngine<E, C, R>
where
    E: ParameterExtractor,
    C: CatalogClient,
    R: ResponseGenerator,
{
    pub fn new(extractor: E, catalog: C, responder: R) -> Self {
        Self {
            extractor,
            pricing: PricingEngine::new(catalog),
            responder,
        }
    }

    pub async fn run(&self, query: &str) -> QueryResponse {
        tracing::info!("🔍 Processing query: {}", query);

        // 1. 擷取參數
        let (parameters, pricing_data) = match self.extractor.extract_parameters(query).await {
            Ok(params) => {
                tracing::debug!("Extracted parameters: {:?}", params);

                // 2. 查詢價格
                let pricing_data = self.pricing.resolve_outcome(&params).await;
                (ExtractedParameters::Parameters(params), pricing_data)
            }
            Err(e) => {
                tracing::error!("❌ Parameter extraction failed: {}", e);
                tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
                let error = e.detail();
                (
                    ExtractedParameters::Error {
                        error: error.clone(),
                    },
                    PricingOutcome::Error { error },
                )
            }
        };

        // 3. 產生回應
        let response = self.responder.generate_response(query, &pricing_data).await;

        tracing::info!("✅ Query processed");
        QueryResponse {
            query: query.to_string(),
            parameters,
            pricing_data,
            response,
        }
    }
}
