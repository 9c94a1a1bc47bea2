use talentra::chat::{assistant_routes, AssistantState};
use talentra::config::ServerConfig;
use talentra::llm::create_provider;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = ServerConfig::from_env()?;

    eprintln!("Talentra v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Model: {}", config.model);
    eprintln!("   Chat API: http://0.0.0.0:{}/api/assistant/chat", config.port);

    let llm = create_provider(&config);
    let app = assistant_routes(AssistantState { llm });

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    tracing::info!(port = config.port, "Assistant server started");
    axum::serve(listener, app).await?;

    Ok(())
}
