use crate::domain::model::{PricingOutcome, QueryParameters};
use crate::domain::ports::{ConfigProvider, ParameterExtractor, ResponseGenerator};
use crate::utils::error::{PriceError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_EXTRACTION_MODEL: &str = "gpt-3.5-turbo-0125";
pub const DEFAULT_RESPONSE_MODEL: &str = "gpt-3.5-turbo";

const EXTRACTION_TOOL: &str = "get_aws_price";

const EXTRACTION_PROMPT: &str =
    "你是一個專門解析AWS價格查詢的助手。提取關鍵參數如服務類型、地區、實例類型、作業系統、儲存類別、儲存容量與資料庫引擎等。";

const RESPONSE_PROMPT: &str = "你是一個AWS成本專家，提供準確的價格信息和建議。價格為 \"N/A\" 代表目錄中沒有該項目的價格資料，請明確告知使用者而不要自行推測數字。";

const EMPTY_RESULT_MESSAGE: &str =
    "抱歉，使用提供的參數沒有找到任何價格信息。請嘗試使用不同的參數或更具體的查詢。";

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Vec<ToolCall>,
}

#[derive(Debug, Deserialize)]
struct ToolCall {
    function: FunctionCall,
}

#[derive(Debug, Deserialize)]
struct FunctionCall {
    arguments: String,
}

/// OpenAI Chat Completions：參數擷取與回應產生
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: Client,
    api_key: String,
    base_url: String,
    extraction_model: String,
    response_model: String,
    timeout: Duration,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            extraction_model: DEFAULT_EXTRACTION_MODEL.to_string(),
            response_model: DEFAULT_RESPONSE_MODEL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self::new(config.openai_api_key(), config.openai_base_url())
            .with_models(config.extraction_model(), config.response_model())
            .with_timeout(Duration::from_secs(config.request_timeout_secs()))
    }

    pub fn with_models(mut self, extraction: &str, response: &str) -> Self {
        self.extraction_model = extraction.to_string();
        self.response_model = response.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn chat_completion(&self, body: &Value) -> Result<ResponseMessage> {
        let url = format!("{}/chat/completions", self.base_url);
        tracing::debug!("Calling chat completions: {}", url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PriceError::UpstreamError { status, message });
        }

        let completion: ChatCompletionResponse = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| PriceError::ParseError {
                message: "completion contained no choices".to_string(),
            })
    }

    fn extraction_request(&self, query: &str) -> Value {
        json!({
            "model": self.extraction_model,
            "messages": [
                {"role": "system", "content": EXTRACTION_PROMPT},
                {"role": "user", "content": query}
            ],
            "tools": [{
                "type": "function",
                "function": {
                    "name": EXTRACTION_TOOL,
                    "description": "獲取AWS服務的價格信息",
                    "parameters": {
                        "type": "object",
                        "properties": {
                            "service": {"type": "string", "description": "AWS服務類型，如EC2、S3、RDS、Lambda、DynamoDB"},
                            "region": {"type": "string", "description": "AWS區域，如us-east-1、ap-northeast-1(東京)等"},
                            "instance_type": {"type": "string", "description": "實例類型，如t2.micro、m5.large、db.t3.micro等"},
                            "os": {"type": "string", "description": "操作系統，如Linux、Windows等"},
                            "storage_class": {"type": "string", "description": "S3儲存類別，如Standard、Glacier、Intelligent-Tiering等"},
                            "storage_size": {"type": "string", "description": "儲存容量，含單位，如100GB、2TB"},
                            "database_engine": {"type": "string", "description": "資料庫引擎，如MySQL、PostgreSQL、Aurora等"}
                        },
                        "required": ["service"]
                    }
                }
            }],
            "tool_choice": {"type": "function", "function": {"name": EXTRACTION_TOOL}}
        })
    }

    async fn try_extract(&self, query: &str) -> Result<QueryParameters> {
        let message = self.chat_completion(&self.extraction_request(query)).await?;
        let call = message
            .tool_calls
            .into_iter()
            .next()
            .ok_or_else(|| PriceError::ParseError {
                message: "model did not return a tool call".to_string(),
            })?;

        Ok(serde_json::from_str(&call.function.arguments)?)
    }
}

#[async_trait]
impl ParameterExtractor for OpenAiClient {
    async fn extract_parameters(&self, query: &str) -> Result<QueryParameters> {
        tracing::info!("Extracting parameters from query: {}", query);

        self.try_extract(query).await.map_err(|e| {
            tracing::error!("OpenAI parameter extraction failed: {}", e);
            PriceError::ExtractionError {
                message: e.to_string(),
            }
        })
    }
}

#[async_trait]
impl ResponseGenerator for OpenAiClient {
    async fn generate_response(&self, query: &str, pricing: &PricingOutcome) -> String {
        let records = match pricing {
            PricingOutcome::Error { error } => {
                return format!("抱歉，在獲取價格時出現問題: {}", error);
            }
            PricingOutcome::Records(records) if records.is_empty() => {
                return EMPTY_RESULT_MESSAGE.to_string();
            }
            PricingOutcome::Records(records) => records,
        };

        let pricing_json = match serde_json::to_string(records) {
            Ok(json) => json,
            Err(e) => return format!("抱歉，在生成回應時遇到問題: {}", e),
        };

        let body = json!({
            "model": self.response_model,
            "messages": [
                {"role": "system", "content": RESPONSE_PROMPT},
                {"role": "user", "content": format!(
                    "用戶查詢: '{}'\n\n價格數據: {}\n\n請提供簡潔明了的回應，包含用戶請求的價格信息。",
                    query, pricing_json
                )}
            ]
        });

        match self.chat_completion(&body).await {
            Ok(message) => message.content.unwrap_or_default(),
            Err(e) => {
                tracing::error!("Response generation failed: {}", e);
                format!("抱歉，在生成回應時遇到問題: {}", e)
            }
        }
    }
}
