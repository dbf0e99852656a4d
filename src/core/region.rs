use crate::domain::model::{CandidateFormat, RegionCandidate, RegionCandidates};

/// 在地化地名 → 區域代碼，子字串比對
const REGION_ALIASES: &[(&str, &str)] = &[
    ("東京", "ap-northeast-1"),
    ("东京", "ap-northeast-1"),
    ("tokyo", "ap-northeast-1"),
    ("大阪", "ap-northeast-3"),
    ("osaka", "ap-northeast-3"),
    ("首爾", "ap-northeast-2"),
    ("首尔", "ap-northeast-2"),
    ("seoul", "ap-northeast-2"),
    ("新加坡", "ap-southeast-1"),
    ("singapore", "ap-southeast-1"),
    ("雪梨", "ap-southeast-2"),
    ("悉尼", "ap-southeast-2"),
    ("sydney", "ap-southeast-2"),
    ("香港", "ap-east-1"),
    ("hong kong", "ap-east-1"),
    ("孟買", "ap-south-1"),
    ("孟买", "ap-south-1"),
    ("mumbai", "ap-south-1"),
    ("維吉尼亞", "us-east-1"),
    ("弗吉尼亚", "us-east-1"),
    ("virginia", "us-east-1"),
    ("俄亥俄", "us-east-2"),
    ("ohio", "us-east-2"),
    ("加州", "us-west-1"),
    ("california", "us-west-1"),
    ("奧勒岡", "us-west-2"),
    ("俄勒冈", "us-west-2"),
    ("oregon", "us-west-2"),
    ("法蘭克福", "eu-central-1"),
    ("法兰克福", "eu-central-1"),
    ("frankfurt", "eu-central-1"),
    ("愛爾蘭", "eu-west-1"),
    ("爱尔兰", "eu-west-1"),
    ("ireland", "eu-west-1"),
    ("倫敦", "eu-west-2"),
    ("伦敦", "eu-west-2"),
    ("london", "eu-west-2"),
    ("巴黎", "eu-west-3"),
    ("paris", "eu-west-3"),
    ("聖保羅", "sa-east-1"),
    ("圣保罗", "sa-east-1"),
    ("sao paulo", "sa-east-1"),
];

/// 區域代碼 → Price List API 的 location 名稱
const REGION_LOCATIONS: &[(&str, &str)] = &[
    ("us-east-1", "US East (N. Virginia)"),
    ("us-east-2", "US East (Ohio)"),
    ("us-west-1", "US West (N. California)"),
    ("us-west-2", "US West (Oregon)"),
    ("af-south-1", "Africa (Cape Town)"),
    ("ap-east-1", "Asia Pacific (Hong Kong)"),
    ("ap-south-1", "Asia Pacific (Mumbai)"),
    ("ap-south-2", "Asia Pacific (Hyderabad)"),
    ("ap-northeast-1", "Asia Pacific (Tokyo)"),
    ("ap-northeast-2", "Asia Pacific (Seoul)"),
    ("ap-northeast-3", "Asia Pacific (Osaka)"),
    ("ap-southeast-1", "Asia Pacific (Singapore)"),
    ("ap-southeast-2", "Asia Pacific (Sydney)"),
    ("ap-southeast-3", "Asia Pacific (Jakarta)"),
    ("ap-southeast-4", "Asia Pacific (Melbourne)"),
    ("ca-central-1", "Canada (Central)"),
    ("eu-central-1", "EU (Frankfurt)"),
    ("eu-central-2", "EU (Zurich)"),
    ("eu-west-1", "EU (Ireland)"),
    ("eu-west-2", "EU (London)"),
    ("eu-west-3", "EU (Paris)"),
    ("eu-south-1", "EU (Milan)"),
    ("eu-south-2", "EU (Spain)"),
    ("eu-north-1", "EU (Stockholm)"),
    ("me-south-1", "Middle East (Bahrain)"),
    ("me-central-1", "Middle East (UAE)"),
    ("il-central-1", "Israel (Tel Aviv)"),
    ("sa-east-1", "South America (Sao Paulo)"),
];

const GEOGRAPHY_PREFIXES: &[(&str, &str)] = &[
    ("us", "US"),
    ("ap", "Asia Pacific"),
    ("eu", "EU"),
    ("sa", "South America"),
    ("ca", "Canada"),
    ("me", "Middle East"),
    ("af", "Africa"),
    ("il", "Israel"),
    ("mx", "Mexico"),
];

fn lookup(table: &[(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// 把使用者輸入的地區轉成標準區域代碼；無法辨識時回傳清理後的輸入
pub fn canonical_region_code(token: &str) -> String {
    let lowered = token.trim().to_lowercase();

    if lookup(REGION_LOCATIONS, &lowered).is_some() {
        return lowered;
    }

    REGION_ALIASES
        .iter()
        .find(|(alias, _)| lowered.contains(alias))
        .map(|(_, code)| code.to_string())
        .unwrap_or(lowered)
}

pub fn location_for_code(code: &str) -> Option<&'static str> {
    lookup(REGION_LOCATIONS, code)
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `ap-northeast-1` → ("Asia Pacific", "Northeast")
fn split_code(code: &str) -> Option<(String, String)> {
    let segments: Vec<&str> = code.split('-').collect();
    if segments.len() < 2 || !segments.iter().all(|s| !s.is_empty()) {
        return None;
    }

    let first = segments[0];
    if !first.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let geography = lookup(GEOGRAPHY_PREFIXES, first)
        .map(str::to_string)
        .unwrap_or_else(|| first.to_uppercase());

    let place = segments[1..]
        .iter()
        .filter(|s| !s.chars().all(|c| c.is_ascii_digit()))
        .map(|s| capitalize(s))
        .collect::<Vec<_>>()
        .join(" ");

    if place.is_empty() {
        return None;
    }

    Some((geography, place))
}

/// 產生依序嘗試的 location 候選清單
///
/// 清單永不為空，最後一筆一定是原始輸入。
pub fn resolve(region_token: &str) -> RegionCandidates {
    let code = canonical_region_code(region_token);
    let mut candidates: Vec<RegionCandidate> = Vec::new();

    let mut push = |format: CandidateFormat, location: String| {
        if location != region_token && !candidates.iter().any(|c| c.location == location) {
            candidates.push(RegionCandidate { format, location });
        }
    };

    if let Some(location) = location_for_code(&code) {
        push(CandidateFormat::CatalogName, location.to_string());
        push(
            CandidateFormat::GeographyPlain,
            location.replace(['(', ')'], ""),
        );
    }

    if let Some((geography, place)) = split_code(&code) {
        push(
            CandidateFormat::GeographyParenthesized,
            format!("{} ({})", geography, place),
        );
        push(
            CandidateFormat::GeographyPlain,
            format!("{} {}", geography, place),
        );
        push(CandidateFormat::RegionCode, code.clone());
    }

    candidates.push(RegionCandidate {
        format: CandidateFormat::RawInput,
        location: region_token.to_string(),
    });

    RegionCandidates::new(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_japanese_alias_maps_to_tokyo() {
        assert_eq!(canonical_region_code("東京"), "ap-northeast-1");
        assert_eq!(canonical_region_code("日本東京區域"), "ap-northeast-1");

        let candidates = resolve("東京");
        assert_eq!(candidates.primary().location, "Asia Pacific (Tokyo)");
        assert_eq!(candidates.primary().format, CandidateFormat::CatalogName);
        assert_eq!(
            candidates.locations(),
            vec![
                "Asia Pacific (Tokyo)",
                "Asia Pacific Tokyo",
                "Asia Pacific (Northeast)",
                "Asia Pacific Northeast",
                "ap-northeast-1",
                "東京",
            ]
        );
    }

    #[test]
    fn test_known_code_is_not_repeated_at_the_end() {
        let candidates = resolve("us-east-1");
        assert_eq!(candidates.primary().location, "US East (N. Virginia)");
        let locations = candidates.locations();
        assert_eq!(locations.last(), Some(&"us-east-1"));
        assert_eq!(locations.iter().filter(|l| **l == "us-east-1").count(), 1);
    }

    #[test]
    fn test_unknown_code_synthesizes_formats() {
        let candidates = resolve("xx-moon-1");
        assert_eq!(
            candidates.locations(),
            vec!["XX (Moon)", "XX Moon", "xx-moon-1"]
        );
    }

    #[test]
    fn test_unknown_code_with_known_geography() {
        let candidates = resolve("ap-southeast-9");
        assert_eq!(candidates.primary().location, "Asia Pacific (Southeast)");
        assert_eq!(candidates.primary().format, CandidateFormat::GeographyParenthesized);
    }

    #[test]
    fn test_resolver_is_total() {
        for token in ["", "  ", "mars", "東京", "EU-WEST-1", "a-b-c-d", "-", "123-456"] {
            let candidates = resolve(token);
            assert!(!candidates.is_empty());
            assert_eq!(candidates.iter().last().unwrap().location, token);
        }
    }

    #[test]
    fn test_free_text_without_code_shape_is_passed_through() {
        let candidates = resolve("mars");
        assert_eq!(candidates.locations(), vec!["mars"]);
        assert_eq!(candidates.primary().format, CandidateFormat::RawInput);
    }
}
