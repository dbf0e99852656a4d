use crate::config::AppSettings;
use crate::utils::error::{PriceError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub server: Option<ServerSection>,
    pub openai: Option<OpenAiSection>,
    pub pricing: Option<PricingSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OpenAiSection {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub extraction_model: Option<String>,
    pub response_model: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricingSection {
    pub region: Option<String>,
    pub max_pages: Option<usize>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PriceError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PriceError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${OPENAI_API_KEY})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PriceError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 檔案中有設定的欄位覆蓋既有設定
    pub fn apply_to(&self, settings: &mut AppSettings) {
        if let Some(server) = &self.server {
            if let Some(host) = &server.host {
                settings.host = host.clone();
            }
            if let Some(port) = server.port {
                settings.port = port;
            }
        }

        if let Some(openai) = &self.openai {
            if let Some(api_key) = &openai.api_key {
                settings.openai_api_key = api_key.clone();
            }
            if let Some(base_url) = &openai.base_url {
                settings.openai_base_url = base_url.clone();
            }
            if let Some(model) = &openai.extraction_model {
                settings.extraction_model = model.clone();
            }
            if let Some(model) = &openai.response_model {
                settings.response_model = model.clone();
            }
            if let Some(timeout) = openai.timeout_seconds {
                settings.request_timeout_secs = timeout;
            }
        }

        if let Some(pricing) = &self.pricing {
            if let Some(region) = &pricing.region {
                settings.pricing_region = region.clone();
            }
            if let Some(max_pages) = pricing.max_pages {
                settings.max_catalog_pages = max_pages;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::Validate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_and_apply() {
        let toml_content = r#"
[server]
port = 8080

[openai]
api_key = "sk-from-file"
response_model = "gpt-4o-mini"

[pricing]
region = "ap-south-1"
max_pages = 3
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let mut settings = AppSettings::default();
        config.apply_to(&mut settings);

        assert_eq!(settings.port, 8080);
        assert_eq!(settings.host, "0.0.0.0");
        assert_eq!(settings.openai_api_key, "sk-from-file");
        assert_eq!(settings.response_model, "gpt-4o-mini");
        assert_eq!(settings.extraction_model, "gpt-3.5-turbo-0125");
        assert_eq!(settings.pricing_region, "ap-south-1");
        assert_eq!(settings.max_catalog_pages, 3);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PRICE_QUERY_TEST_KEY", "sk-env");

        let toml_content = r#"
[openai]
api_key = "${PRICE_QUERY_TEST_KEY}"
base_url = "${PRICE_QUERY_UNSET_VAR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let openai = config.openai.unwrap();
        assert_eq!(openai.api_key.as_deref(), Some("sk-env"));
        assert_eq!(openai.base_url.as_deref(), Some("${PRICE_QUERY_UNSET_VAR}"));

        std::env::remove_var("PRICE_QUERY_TEST_KEY");
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        assert!(matches!(
            TomlConfig::from_toml_str("[server\nport = "),
            Err(PriceError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[pricing]\nregion = \"eu-west-1\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.pricing.unwrap().region.as_deref(), Some("eu-west-1"));
    }
}
