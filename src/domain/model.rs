use crate::utils::error::{PriceError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// 價格資料不可用時的佔位值
pub const NOT_AVAILABLE: &str = "N/A";

pub const FIELD_LOCATION: &str = "location";
pub const FIELD_INSTANCE_TYPE: &str = "instanceType";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceType {
    ComputeInstance,
    ObjectStorage,
    RelationalDatabase,
    ServerlessFunction,
    KeyValueStore,
}

impl ServiceType {
    pub const ALL: [ServiceType; 5] = [
        ServiceType::ComputeInstance,
        ServiceType::ObjectStorage,
        ServiceType::RelationalDatabase,
        ServiceType::ServerlessFunction,
        ServiceType::KeyValueStore,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::ComputeInstance => "compute-instance",
            ServiceType::ObjectStorage => "object-storage",
            ServiceType::RelationalDatabase => "relational-database",
            ServiceType::ServerlessFunction => "serverless-function",
            ServiceType::KeyValueStore => "key-value-store",
        }
    }

    /// Price List API 的 ServiceCode
    pub fn service_code(&self) -> &'static str {
        match self {
            ServiceType::ComputeInstance => "AmazonEC2",
            ServiceType::ObjectStorage => "AmazonS3",
            ServiceType::RelationalDatabase => "AmazonRDS",
            ServiceType::ServerlessFunction => "AWSLambda",
            ServiceType::KeyValueStore => "AmazonDynamoDB",
        }
    }

    /// 只有運算實例走多階段放寬查詢
    pub fn supports_fallback(&self) -> bool {
        matches!(self, ServiceType::ComputeInstance)
    }
}

impl FromStr for ServiceType {
    type Err = PriceError;

    fn from_str(token: &str) -> Result<Self> {
        let normalized = token.trim().to_lowercase().replace(['_', ' '], "-");
        let normalized = normalized
            .strip_prefix("amazon-")
            .or_else(|| normalized.strip_prefix("aws-"))
            .unwrap_or(&normalized);

        match normalized {
            "ec2" | "compute-instance" | "compute" => Ok(ServiceType::ComputeInstance),
            "s3" | "object-storage" | "storage" => Ok(ServiceType::ObjectStorage),
            "rds" | "relational-database" | "database" => Ok(ServiceType::RelationalDatabase),
            "lambda" | "serverless-function" | "serverless" => Ok(ServiceType::ServerlessFunction),
            "dynamodb" | "key-value-store" | "dynamo" => Ok(ServiceType::KeyValueStore),
            _ => Err(PriceError::UnsupportedServiceError {
                service: token.to_string(),
            }),
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 由參數擷取器產出的查詢參數，缺少的欄位不會造成失敗
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParameters {
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub service: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub region: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_string",
        alias = "instanceType",
        skip_serializing_if = "Option::is_none"
    )]
    pub instance_type: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_string",
        rename = "os",
        alias = "operating_system",
        alias = "operatingSystem",
        skip_serializing_if = "Option::is_none"
    )]
    pub operating_system: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_string",
        alias = "storageClass",
        skip_serializing_if = "Option::is_none"
    )]
    pub storage_class: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_string",
        alias = "storageSize",
        skip_serializing_if = "Option::is_none"
    )]
    pub storage_size: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_string",
        alias = "databaseEngine",
        alias = "db_engine",
        skip_serializing_if = "Option::is_none"
    )]
    pub database_engine: Option<String>,
}

/// 模型偶爾回傳數字或布林（例如 `"storage_size": 100`），轉成字串；
/// 其他型別視為未提供
fn lenient_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

impl QueryParameters {
    pub fn service_type(&self) -> Result<ServiceType> {
        let token = present(&self.service).ok_or_else(|| PriceError::MissingParameterError {
            field: "service".to_string(),
        })?;
        token.parse()
    }

    pub fn region(&self) -> Option<&str> {
        present(&self.region)
    }

    pub fn instance_type(&self) -> Option<&str> {
        present(&self.instance_type)
    }

    pub fn operating_system(&self) -> Option<&str> {
        present(&self.operating_system)
    }

    pub fn storage_class(&self) -> Option<&str> {
        present(&self.storage_class)
    }

    pub fn storage_size(&self) -> Option<&str> {
        present(&self.storage_size)
    }

    pub fn database_engine(&self) -> Option<&str> {
        present(&self.database_engine)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateFormat {
    CatalogName,
    GeographyPlain,
    GeographyParenthesized,
    RegionCode,
    RawInput,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionCandidate {
    pub format: CandidateFormat,
    pub location: String,
}

/// 依優先順序排列的地區候選字串，至少包含原始輸入
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionCandidates(Vec<RegionCandidate>);

impl RegionCandidates {
    /// `candidates` 的最後一筆必須是原始輸入
    pub(crate) fn new(candidates: Vec<RegionCandidate>) -> Self {
        debug_assert!(!candidates.is_empty());
        Self(candidates)
    }

    pub fn primary(&self) -> &RegionCandidate {
        &self.0[0]
    }

    pub fn alternates(&self) -> &[RegionCandidate] {
        &self.0[1..]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RegionCandidate> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn locations(&self) -> Vec<&str> {
        self.0.iter().map(|c| c.location.as_str()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterRole {
    Mandatory,
    Optional,
}

/// 單一 TERM_MATCH 條件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub field: String,
    pub value: String,
    pub role: FilterRole,
}

impl Filter {
    pub fn mandatory(field: &str, value: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            value: value.into(),
            role: FilterRole::Mandatory,
        }
    }

    pub fn optional(field: &str, value: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            value: value.into(),
            role: FilterRole::Optional,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    pub service: ServiceType,
    pub filters: Vec<Filter>,
}

impl CatalogQuery {
    pub fn new(service: ServiceType, filters: Vec<Filter>) -> Self {
        Self { service, filters }
    }

    pub fn service_code(&self) -> &'static str {
        self.service.service_code()
    }

    pub fn filter_value(&self, field: &str) -> Option<&str> {
        self.filters
            .iter()
            .find(|f| f.field == field)
            .map(|f| f.value.as_str())
    }

    pub fn has_region(&self) -> bool {
        self.filter_value(FIELD_LOCATION).is_some()
    }

    /// 只保留實例類型與地區條件
    pub fn reduced(&self) -> Self {
        Self {
            service: self.service,
            filters: self
                .filters
                .iter()
                .filter(|f| f.field == FIELD_INSTANCE_TYPE || f.field == FIELD_LOCATION)
                .cloned()
                .collect(),
        }
    }

    pub fn with_region(&self, location: &str) -> Self {
        let mut query = self.clone();
        for filter in query.filters.iter_mut().filter(|f| f.field == FIELD_LOCATION) {
            filter.value = location.to_string();
        }
        query
    }
}

/// 一筆 PriceDimension 的扁平化內容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceDimension {
    pub unit: Option<String>,
    pub description: Option<String>,
    pub price_usd: Option<String>,
}

impl PriceDimension {
    fn from_value(value: &Value) -> Self {
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            unit: text("unit"),
            description: text("description"),
            price_usd: value
                .get("pricePerUnit")
                .and_then(|p| p.get("USD"))
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }
}

/// Price List API 回傳的單一產品文件
///
/// `terms.OnDemand` 與 `priceDimensions` 的鍵是無法預測的內部 ID，
/// 所以只依值的順序走訪。
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDocument(Value);

impl ProductDocument {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(Self(serde_json::from_str(raw)?))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// 結構檢查：必須有 `product` 物件
    pub fn ensure_well_formed(&self) -> Result<()> {
        match self.0.get("product") {
            Some(Value::Object(_)) => Ok(()),
            Some(_) => Err(PriceError::ParseError {
                message: "'product' is not an object".to_string(),
            }),
            None => Err(PriceError::ParseError {
                message: "document has no 'product' section".to_string(),
            }),
        }
    }

    pub fn attributes(&self) -> Option<&Map<String, Value>> {
        self.0
            .get("product")
            .and_then(|p| p.get("attributes"))
            .and_then(Value::as_object)
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes()
            .and_then(|attrs| attrs.get(key))
            .and_then(Value::as_str)
    }

    /// 缺少的屬性退化為 "N/A"
    pub fn attribute_or_na(&self, key: &str) -> String {
        self.attribute(key).unwrap_or(NOT_AVAILABLE).to_string()
    }

    fn on_demand_terms(&self) -> impl Iterator<Item = &Value> {
        self.0
            .get("terms")
            .and_then(|t| t.get("OnDemand"))
            .and_then(Value::as_object)
            .into_iter()
            .flat_map(|terms| terms.values())
    }

    /// 第一個 OnDemand 條款的第一個價格維度
    pub fn first_price_dimension(&self) -> Option<PriceDimension> {
        self.on_demand_terms()
            .next()
            .and_then(|term| term.get("priceDimensions"))
            .and_then(Value::as_object)
            .and_then(|dims| dims.values().next())
            .map(PriceDimension::from_value)
    }

    /// 所有 OnDemand 條款底下的所有價格維度
    pub fn price_dimensions(&self) -> Vec<PriceDimension> {
        self.on_demand_terms()
            .filter_map(|term| term.get("priceDimensions").and_then(Value::as_object))
            .flat_map(|dims| dims.values())
            .map(PriceDimension::from_value)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RecordDetails {
    Compute {
        #[serde(rename = "instanceType")]
        instance_type: String,
        #[serde(rename = "operatingSystem")]
        operating_system: String,
    },
    ObjectStorage {
        #[serde(rename = "storageClass")]
        storage_class: String,
        #[serde(rename = "volumeType")]
        volume_type: String,
    },
    Database {
        #[serde(rename = "databaseEngine")]
        database_engine: String,
        #[serde(rename = "instanceType")]
        instance_type: String,
        #[serde(rename = "deploymentOption")]
        deployment_option: String,
    },
    Grouped {
        group: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EstimatedCost {
    Amount(f64),
    NotAvailable,
}

impl Serialize for EstimatedCost {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            EstimatedCost::Amount(amount) => serializer.serialize_f64(*amount),
            EstimatedCost::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRecord {
    pub region: String,
    #[serde(flatten)]
    pub details: RecordDetails,
    pub price: String,
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<EstimatedCost>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_cost_unit: Option<String>,
}

impl PriceRecord {
    pub fn new(region: String, details: RecordDetails, dimension: Option<PriceDimension>) -> Self {
        let dimension = dimension.unwrap_or(PriceDimension {
            unit: None,
            description: None,
            price_usd: None,
        });
        Self {
            region,
            details,
            price: dimension.price_usd.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            unit: dimension.unit.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            description: dimension.description,
            estimated_cost: None,
            estimated_cost_unit: None,
        }
    }
}

/// 價格查詢結果：記錄清單或錯誤映射
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PricingOutcome {
    Records(Vec<PriceRecord>),
    Error { error: String },
}

impl PricingOutcome {
    pub fn from_error(err: &PriceError) -> Self {
        PricingOutcome::Error { error: err.detail() }
    }
}

/// 參數擷取結果，錯誤時原樣帶出 `{ "error": ... }`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExtractedParameters {
    Parameters(QueryParameters),
    Error { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResponse {
    pub query: String,
    pub parameters: ExtractedParameters,
    pub pricing_data: PricingOutcome,
    pub response: String,
}
