use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spanish_ocr::api::{create_router, AppState};
use spanish_ocr::config::Config;
use spanish_ocr::ocr::default_engine_factory;
use spanish_ocr::processing::PdftoppmRasterizer;

#[derive(Parser)]
#[command(name = "spanish-ocr")]
#[command(about = "OCR service for Spanish text in images and PDFs")]
struct Args {
    /// Address to bind (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides PORT)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spanish_ocr=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env();
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let factory = default_engine_factory(&config.ocr);
    tracing::info!(
        "OCR backend: {} (default model type: {}, text score threshold: {}, models: {})",
        factory.name(),
        config.ocr.default_model_type,
        config.ocr.text_score_threshold,
        config.ocr.model_dir.display()
    );
    tracing::info!("Engines are built on first use per model type");

    let rasterizer = Arc::new(PdftoppmRasterizer::new(config.pdf.dpi));
    let state = AppState::new(config.clone(), factory, rasterizer);
    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Spanish OCR starting on http://{}", addr);
    tracing::info!("  Health check: http://{}/health", addr);
    tracing::info!("  API docs:     http://{}/docs", addr);
    tracing::info!("  Max upload:   {}MB", config.upload.max_file_size_mb);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
