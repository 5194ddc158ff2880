use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tropico_mock::core::ConfigProvider;
use tropico_mock::utils::{logger, validation::Validate};
use tropico_mock::{serve, AppState, CliConfig, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting tropico-mock");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 設定檔優先於命令列參數
    let config: Box<dyn ConfigProvider> = match &cli.config {
        Some(path) => {
            let file_config = TomlConfig::from_file(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?;
            if let Err(e) = file_config.validate() {
                tracing::error!("❌ Configuration validation failed: {}", e);
                return Err(e.into());
            }
            Box::new(file_config)
        }
        None => {
            if let Err(e) = cli.validate() {
                tracing::error!("❌ Configuration validation failed: {}", e);
                return Err(e.into());
            }
            Box::new(cli.clone())
        }
    };

    if config.bearer_token().is_none() {
        tracing::warn!("Authentication disabled, every route is open");
    }
    tracing::info!(
        pending = ?config.pending_threshold(),
        profile = ?config.result_profile(),
        "Scan simulator configured"
    );

    let bind_address = config.bind_address();
    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {}", bind_address))?;

    let state = AppState::from_config(config.as_ref());
    serve(listener, state, shutdown_signal()).await?;

    tracing::info!("✅ Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
