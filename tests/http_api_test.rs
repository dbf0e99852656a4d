use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use price_query::core::{
    CatalogClient, CatalogQuery, ParameterExtractor, PricingOutcome, ProductDocument,
    QueryParameters, ResponseGenerator,
};
use price_query::{create_router, PriceError, QueryEngine, Result};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

enum StubExtractor {
    Returns(QueryParameters),
    Fails(&'static str),
}

#[async_trait]
impl ParameterExtractor for StubExtractor {
    async fn extract_parameters(&self, _query: &str) -> Result<QueryParameters> {
        match self {
            StubExtractor::Returns(params) => Ok(params.clone()),
            StubExtractor::Fails(message) => Err(PriceError::ExtractionError {
                message: message.to_string(),
            }),
        }
    }
}

#[derive(Clone, Default)]
struct CountingCatalog {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl CatalogClient for CountingCatalog {
    async fn get_products(&self, _query: &CatalogQuery) -> Result<Vec<ProductDocument>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![ProductDocument::new(json!({
            "product": {"attributes": {"location": "US East (N. Virginia)", "group": "AWS-Lambda-Requests"}},
            "terms": {"OnDemand": {"T": {"priceDimensions": {"D": {
                "unit": "Requests",
                "description": "$0.20 per 1M requests",
                "pricePerUnit": {"USD": "0.0000002000"}
            }}}}}
        }))])
    }
}

struct EchoResponder;

#[async_trait]
impl ResponseGenerator for EchoResponder {
    async fn generate_response(&self, _query: &str, pricing: &PricingOutcome) -> String {
        match pricing {
            PricingOutcome::Records(records) => format!("{} records", records.len()),
            PricingOutcome::Error { error } => format!("error: {}", error),
        }
    }
}

fn app(extractor: StubExtractor, catalog: CountingCatalog) -> axum::Router {
    create_router(Arc::new(QueryEngine::new(extractor, catalog, EchoResponder)))
}

fn lambda_extractor() -> StubExtractor {
    StubExtractor::Returns(QueryParameters {
        service: Some("lambda".to_string()),
        region: Some("us-east-1".to_string()),
        ..Default::default()
    })
}

fn post_query(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/query")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_query_returns_full_response_shape() {
    let catalog = CountingCatalog::default();
    let response = app(lambda_extractor(), catalog.clone())
        .oneshot(post_query(r#"{"query": "Lambda 在維吉尼亞的價格"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;

    assert_eq!(body["query"], "Lambda 在維吉尼亞的價格");
    assert_eq!(body["parameters"]["service"], "lambda");
    assert_eq!(body["parameters"]["region"], "us-east-1");
    assert_eq!(body["pricing_data"][0]["region"], "US East (N. Virginia)");
    assert_eq!(body["pricing_data"][0]["group"], "AWS-Lambda-Requests");
    assert_eq!(body["pricing_data"][0]["price"], "0.0000002000");
    assert_eq!(body["response"], "1 records");
    assert_eq!(catalog.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_empty_query_is_rejected() {
    let catalog = CountingCatalog::default();

    for body in [r#"{"query": ""}"#, r#"{"query": "   "}"#, r#"{"query": null}"#, r#"{}"#] {
        let response = app(lambda_extractor(), catalog.clone())
            .oneshot(post_query(body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await, json!({"error": "請提供查詢內容"}));
    }

    assert_eq!(catalog.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_extraction_error_passes_through_without_catalog_call() {
    let catalog = CountingCatalog::default();
    let response = app(StubExtractor::Fails("timeout"), catalog.clone())
        .oneshot(post_query(r#"{"query": "s3 多少錢"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;

    assert_eq!(body["parameters"], json!({"error": "timeout"}));
    assert_eq!(body["pricing_data"], json!({"error": "timeout"}));
    assert_eq!(body["response"], "error: timeout");
    assert_eq!(catalog.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_malformed_body_is_internal_error() {
    let response = app(lambda_extractor(), CountingCatalog::default())
        .oneshot(post_query("not json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("處理查詢時發生錯誤"));
}

#[tokio::test]
async fn test_health_check() {
    let response = app(lambda_extractor(), CountingCatalog::default())
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({"status": "ok"}));
}
