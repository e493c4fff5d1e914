mod api;
mod middleware;

use tracing_subscriber::EnvFilter;

use freightgate_datafrete::DatafreteClient;
use freightgate_platform::PlatformClient;

use crate::api::{build_app, AppState};
use crate::middleware::OperatorAuth;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = freightgate_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let datafrete = DatafreteClient::new(config.datafrete_timeout_secs)?;
    let platform = PlatformClient::new(
        &config.platform_api_base_url,
        config.platform_timeout_secs,
        config.platform_authentication_id.clone(),
        config.platform_api_key.clone(),
    )?;

    let operator_auth = OperatorAuth::from_config(
        config.operator_token.as_deref(),
        matches!(config.env, freightgate_core::Environment::Development),
    )?;
    let app = build_app(
        AppState {
            datafrete,
            platform,
        },
        operator_auth,
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "freightgate listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
