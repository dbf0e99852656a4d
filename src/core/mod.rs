pub mod engine;
pub mod estimator;
pub mod executor;
pub mod extractor;
pub mod pricing;
pub mod region;
pub mod services;

pub use crate::domain::model::{
    CatalogQuery, Filter, PriceRecord, PricingOutcome, ProductDocument, QueryParameters,
    QueryResponse, RegionCandidates, ServiceType,
};
pub use crate::domain::ports::{CatalogClient, ConfigProvider, ParameterExtractor, ResponseGenerator};
pub use crate::utils::error::Result;
