use crate::utils::error::{PriceError, Result};
use regex::Regex;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(PriceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(PriceError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(PriceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PriceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(PriceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// 區域代碼形如 `us-east-1`、`us-gov-west-1`
pub fn validate_aws_region(field_name: &str, region: &str) -> Result<()> {
    validate_non_empty_string(field_name, region)?;

    let re = Regex::new(r"^[a-z]{2}(-gov)?-[a-z]+-\d+$").map_err(|e| PriceError::ConfigError {
        message: format!("invalid region pattern: {}", e),
    })?;

    if !re.is_match(region) {
        return Err(PriceError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: region.to_string(),
            reason: "expected an AWS region code such as us-east-1".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("openai_base_url", "https://api.openai.com/v1").is_ok());
        assert!(validate_url("openai_base_url", "http://localhost:8080").is_ok());
        assert!(validate_url("openai_base_url", "").is_err());
        assert!(validate_url("openai_base_url", "invalid-url").is_err());
        assert!(validate_url("openai_base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("request_timeout_secs", 30, 1, 300).is_ok());
        assert!(validate_range("request_timeout_secs", 0, 1, 300).is_err());
    }

    #[test]
    fn test_validate_aws_region() {
        assert!(validate_aws_region("pricing_region", "us-east-1").is_ok());
        assert!(validate_aws_region("pricing_region", "us-gov-west-1").is_ok());
        assert!(validate_aws_region("pricing_region", "US_EAST").is_err());
        assert!(validate_aws_region("pricing_region", "Asia Pacific (Tokyo)").is_err());
        assert!(validate_aws_region("pricing_region", "  ").is_err());
    }
}
