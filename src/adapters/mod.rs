// Adapters layer: concrete implementations for external systems (pricing catalog, LLM, http).

pub mod aws_pricing;
pub mod http;
pub mod openai;
