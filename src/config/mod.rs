pub mod toml_config;

use crate::adapters::aws_pricing::DEFAULT_PRICING_REGION;
use crate::adapters::openai::{DEFAULT_BASE_URL, DEFAULT_EXTRACTION_MODEL, DEFAULT_RESPONSE_MODEL};
use crate::core::ConfigProvider;
use crate::utils::error::{PriceError, Result};
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};

/// 合併命令列與 TOML 後的執行期設定，查詢期間唯讀
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub host: String,
    pub port: u16,
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub extraction_model: String,
    pub response_model: String,
    pub request_timeout_secs: u64,
    pub pricing_region: String,
    pub max_catalog_pages: usize,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            openai_api_key: String::new(),
            openai_base_url: DEFAULT_BASE_URL.to_string(),
            extraction_model: DEFAULT_EXTRACTION_MODEL.to_string(),
            response_model: DEFAULT_RESPONSE_MODEL.to_string(),
            request_timeout_secs: 30,
            pricing_region: DEFAULT_PRICING_REGION.to_string(),
            max_catalog_pages: 1,
        }
    }
}

impl ConfigProvider for AppSettings {
    fn host(&self) -> &str {
        &self.host
    }

    fn port(&self) -> u16 {
        self.port
    }

    fn openai_api_key(&self) -> &str {
        &self.openai_api_key
    }

    fn openai_base_url(&self) -> &str {
        &self.openai_base_url
    }

    fn extraction_model(&self) -> &str {
        &self.extraction_model
    }

    fn response_model(&self) -> &str {
        &self.response_model
    }

    fn request_timeout_secs(&self) -> u64 {
        self.request_timeout_secs
    }

    fn pricing_region(&self) -> &str {
        &self.pricing_region
    }

    fn max_catalog_pages(&self) -> usize {
        self.max_catalog_pages
    }
}

impl Validate for AppSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("host", &self.host)?;
        validation::validate_range("port", self.port, 1, u16::MAX)?;
        if self.openai_api_key.trim().is_empty() {
            return Err(PriceError::MissingConfigError {
                field: "openai_api_key".to_string(),
            });
        }
        validation::validate_url("openai_base_url", &self.openai_base_url)?;
        validation::validate_non_empty_string("extraction_model", &self.extraction_model)?;
        validation::validate_non_empty_string("response_model", &self.response_model)?;
        validation::validate_range("request_timeout_secs", self.request_timeout_secs, 1, 600)?;
        validation::validate_aws_region("pricing_region", &self.pricing_region)?;
        validation::validate_range("max_catalog_pages", self.max_catalog_pages, 1, 100)?;
        Ok(())
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "price-query")]
#[command(about = "Answer natural-language AWS pricing questions over HTTP")]
pub struct CliConfig {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value = "5000")]
    pub port: u16,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub openai_base_url: String,

    #[arg(long, default_value = DEFAULT_EXTRACTION_MODEL)]
    pub extraction_model: String,

    #[arg(long, default_value = DEFAULT_RESPONSE_MODEL)]
    pub response_model: String,

    #[arg(long, default_value = "30")]
    pub request_timeout_secs: u64,

    #[arg(long, env = "PRICING_REGION", default_value = DEFAULT_PRICING_REGION)]
    pub pricing_region: String,

    #[arg(long, default_value = "1")]
    pub max_catalog_pages: usize,

    /// TOML 配置檔，檔案中的值覆蓋命令列
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 合併命令列與 TOML；API key 可只出現在其中一邊，必填檢查交給 `validate`
    pub fn to_settings(&self) -> Result<AppSettings> {
        let mut settings = AppSettings {
            host: self.host.clone(),
            port: self.port,
            openai_api_key: self.openai_api_key.clone().unwrap_or_default(),
            openai_base_url: self.openai_base_url.clone(),
            extraction_model: self.extraction_model.clone(),
            response_model: self.response_model.clone(),
            request_timeout_secs: self.request_timeout_secs,
            pricing_region: self.pricing_region.clone(),
            max_catalog_pages: self.max_catalog_pages,
        };

        if let Some(path) = &self.config {
            tracing::info!("📁 Loading configuration from: {}", path);
            toml_config::TomlConfig::from_file(path)?.apply_to(&mut settings);
        }

        Ok(settings)
    }
}
