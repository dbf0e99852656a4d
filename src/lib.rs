pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{aws_pricing::AwsPricingCatalog, http::create_router, openai::OpenAiClient};
pub use config::AppSettings;
pub use core::{engine::QueryEngine, pricing::PricingEngine};
pub use utils::error::{PriceError, Result};
