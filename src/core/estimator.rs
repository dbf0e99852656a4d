use crate::domain::model::{EstimatedCost, PriceRecord, NOT_AVAILABLE};
use crate::utils::error::{PriceError, Result};
use regex::Regex;

pub const ESTIMATED_COST_UNIT: &str = "USD per Month";

/// 月費 per-GB 單位；目錄實際回傳 "GB-Mo"，也涵蓋 "GB-Month"
const MONTHLY_GB_UNIT: &str = "GB-Mo";

/// 解析 "100GB"、"2 TB"、"500mb" 等容量字串，回傳 GB
pub fn parse_size_gb(token: &str) -> Result<f64> {
    let re = Regex::new(r"(?i)^\s*(\d+(?:\.\d+)?)\s*(gb|tb|mb)?\s*$").map_err(|e| {
        PriceError::ParseError {
            message: format!("invalid size pattern: {}", e),
        }
    })?;

    let caps = re.captures(token).ok_or_else(|| PriceError::ParseError {
        message: format!("unrecognized storage size '{}'", token),
    })?;

    let value: f64 = caps[1].parse().map_err(|_| PriceError::ParseError {
        message: format!("invalid numeric value in '{}'", token),
    })?;

    let unit = caps
        .get(2)
        .map(|m| m.as_str().to_lowercase())
        .unwrap_or_else(|| "gb".to_string());

    Ok(match unit.as_str() {
        "tb" => value * 1024.0,
        "mb" => value / 1024.0,
        _ => value,
    })
}

/// 為單位為 GB-Month 的記錄加上預估月費；容量無法解析時原樣回傳
pub fn estimate(records: Vec<PriceRecord>, size_token: &str) -> Vec<PriceRecord> {
    let size_gb = match parse_size_gb(size_token) {
        Ok(size) => size,
        Err(e) => {
            tracing::warn!("Skipping cost estimation: {}", e);
            return records;
        }
    };

    records
        .into_iter()
        .map(|mut record| {
            if record.unit.contains(MONTHLY_GB_UNIT) {
                let cost = if record.price == NOT_AVAILABLE {
                    EstimatedCost::NotAvailable
                } else {
                    match record.price.trim().parse::<f64>() {
                        Ok(price) => EstimatedCost::Amount(price * size_gb),
                        Err(_) => EstimatedCost::NotAvailable,
                    }
                };
                record.estimated_cost = Some(cost);
                record.estimated_cost_unit = Some(ESTIMATED_COST_UNIT.to_string());
            }
            record
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{PriceDimension, RecordDetails};

    fn record(price: &str, unit: &str) -> PriceRecord {
        PriceRecord::new(
            "US East (N. Virginia)".to_string(),
            RecordDetails::ObjectStorage {
                storage_class: "Archive".to_string(),
                volume_type: "Amazon Glacier".to_string(),
            },
            Some(PriceDimension {
                unit: Some(unit.to_string()),
                description: None,
                price_usd: Some(price.to_string()),
            }),
        )
    }

    #[test]
    fn test_parse_size_units() {
        assert_eq!(parse_size_gb("100GB").unwrap(), 100.0);
        assert_eq!(parse_size_gb("1TB").unwrap(), 1024.0);
        assert!((parse_size_gb("500MB").unwrap() - 0.48828125).abs() < 1e-9);
        assert_eq!(parse_size_gb("2tb").unwrap(), 2048.0);
        assert_eq!(parse_size_gb("  50 ").unwrap(), 50.0);
        assert_eq!(parse_size_gb("1.5 Tb").unwrap(), 1536.0);
    }

    #[test]
    fn test_parse_size_rejects_garbage() {
        assert!(parse_size_gb("lots").is_err());
        assert!(parse_size_gb("10PB").is_err());
        assert!(parse_size_gb("").is_err());
    }

    #[test]
    fn test_estimate_only_monthly_gb_records() {
        let records = vec![
            record("0.004", "GB-Mo"),
            record("0.05", "Requests"),
            record("N/A", "GB-Month"),
        ];

        let estimated = estimate(records, "2TB");
        assert_eq!(estimated[0].estimated_cost, Some(EstimatedCost::Amount(0.004 * 2048.0)));
        assert_eq!(estimated[0].estimated_cost_unit.as_deref(), Some("USD per Month"));
        assert!(estimated[1].estimated_cost.is_none());
        assert_eq!(estimated[2].estimated_cost, Some(EstimatedCost::NotAvailable));
    }

    #[test]
    fn test_unparsable_size_leaves_records_untouched() {
        let records = vec![record("0.023", "GB-Mo")];
        let estimated = estimate(records.clone(), "a lot");
        assert_eq!(estimated, records);
    }
}
