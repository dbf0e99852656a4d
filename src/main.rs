use clap::Parser;
use price_query::core::ConfigProvider;
use price_query::utils::{logger, validation::Validate};
use price_query::{create_router, AwsPricingCatalog, CliConfig, OpenAiClient, QueryEngine};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting price-query server");

    // 載入並驗證配置
    let settings = match cli.to_settings().and_then(|s| s.validate().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let catalog = AwsPricingCatalog::from_env(settings.pricing_region())
        .await
        .with_max_pages(settings.max_catalog_pages());
    let openai = OpenAiClient::from_config(&settings);

    let engine = Arc::new(QueryEngine::new(openai.clone(), catalog, openai));
    let app = create_router(engine);

    let listener = tokio::net::TcpListener::bind((settings.host(), settings.port())).await?;
    tracing::info!(
        "🌐 Listening on {} (pricing region: {})",
        listener.local_addr()?,
        settings.pricing_region()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received, draining connections...");
        })
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
