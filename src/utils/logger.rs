use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` 優先；否則只開本 crate 與 tower_http 的請求追蹤
fn default_filter(verbose: bool) -> EnvFilter {
    let directives = if verbose {
        "price_query=debug,tower_http=debug,info"
    } else {
        "price_query=info,tower_http=info,warn"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives))
}

pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(default_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(verbose)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

pub fn init_json_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(default_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .json() // 容器環境下方便日誌收集
                .with_current_span(true)
                .flatten_event(true),
        )
        .init();
}
