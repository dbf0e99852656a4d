use thiserror::Error;

#[derive(Error, Debug)]
pub enum PriceError {
    #[error("Parameter extraction failed: {message}")]
    ExtractionError { message: String },

    #[error("Unsupported service: {service}")]
    UnsupportedServiceError { service: String },

    #[error("Missing required parameter: {field}")]
    MissingParameterError { field: String },

    #[error("Pricing catalog request failed: {message}")]
    CatalogTransportError { message: String },

    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("Upstream API error ({status}): {message}")]
    UpstreamError { status: u16, message: String },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Extraction,
    Request,
    Catalog,
    Data,
    Network,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PriceError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PriceError::ExtractionError { .. } => ErrorCategory::Extraction,
            PriceError::UnsupportedServiceError { .. } | PriceError::MissingParameterError { .. } => {
                ErrorCategory::Request
            }
            PriceError::CatalogTransportError { .. } => ErrorCategory::Catalog,
            PriceError::ParseError { .. } | PriceError::SerializationError(_) => ErrorCategory::Data,
            PriceError::UpstreamError { .. } | PriceError::HttpError(_) => ErrorCategory::Network,
            PriceError::ConfigError { .. }
            | PriceError::ConfigValidationError { .. }
            | PriceError::InvalidConfigValueError { .. }
            | PriceError::MissingConfigError { .. } => ErrorCategory::Configuration,
            PriceError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Data => ErrorSeverity::Low,
            ErrorCategory::Extraction | ErrorCategory::Request | ErrorCategory::Network => {
                ErrorSeverity::Medium
            }
            ErrorCategory::Catalog | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Extraction => "請重新描述查詢，包含服務類型（例如 EC2、S3、RDS）",
            ErrorCategory::Request => "支援的服務: EC2、S3、RDS、Lambda、DynamoDB",
            ErrorCategory::Catalog => "請確認 AWS 憑證與 Price List API 區域設定",
            ErrorCategory::Data => "此筆資料已略過，其餘結果不受影響",
            ErrorCategory::Network => "請檢查網路連線或稍後再試",
            ErrorCategory::Configuration => "請檢查命令列參數、環境變數或 TOML 配置檔",
            ErrorCategory::System => "請檢查檔案權限與系統資源",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PriceError::ExtractionError { message } => format!("無法解析查詢參數: {}", message),
            PriceError::UnsupportedServiceError { service } => {
                format!("目前不支援此服務: {}", service)
            }
            PriceError::MissingParameterError { field } => format!("缺少必要參數: {}", field),
            PriceError::CatalogTransportError { .. } => "查詢 AWS 價格目錄失敗".to_string(),
            PriceError::ConfigError { .. }
            | PriceError::ConfigValidationError { .. }
            | PriceError::InvalidConfigValueError { .. }
            | PriceError::MissingConfigError { .. } => format!("配置錯誤: {}", self),
            other => other.to_string(),
        }
    }

    /// 折疊成 `{ "error": ... }` 時使用的原始訊息
    pub fn detail(&self) -> String {
        match self {
            PriceError::ExtractionError { message }
            | PriceError::CatalogTransportError { message }
            | PriceError::ParseError { message } => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PriceError>;
