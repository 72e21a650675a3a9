use std::sync::Arc;

use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;
use tracing::info;

use crate::cache::token_slot::TokenSlot;
use crate::config::platform::ServiceConfig;
use crate::observability::metrics::{get_metrics, Metrics};
use crate::observability::routes::MetricsState;
use crate::server::routes;
use crate::sources::ApimClient;
use crate::utils::constants::{ROUTE_AUTOMATE, ROUTE_FETCH_DATA, ROUTE_HEALTH};

/// Upstream client, token holder and fan-out limit shared by the handlers.
#[derive(Clone)]
pub struct AutomationState {
    pub client: ApimClient,
    pub token_slot: TokenSlot,
    pub max_concurrency: usize,
}

impl AutomationState {
    pub fn new(client: ApimClient, token_slot: TokenSlot) -> Self {
        let max_concurrency = client.config().settings.fan_out.max_concurrency;
        Self {
            client,
            token_slot,
            max_concurrency,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub metrics_state: MetricsState,
    pub automation_state: AutomationState,
}

impl AppState {
    pub fn new(metrics: &Metrics, automation_state: AutomationState) -> Self {
        Self {
            metrics_state: MetricsState::new(metrics.registry.clone()),
            automation_state,
        }
    }
}

/// Service routes plus the metrics route when enabled.
pub fn router(state: AppState) -> Router {
    let metrics_config = state.automation_state.client.config().settings.metrics.clone();

    Router::new()
        .route(ROUTE_AUTOMATE, post(routes::automate))
        .route(ROUTE_FETCH_DATA, get(routes::fetch_data))
        .route(ROUTE_HEALTH, get(routes::health))
        .merge(state.metrics_state.router(&metrics_config))
        .with_state(state)
}

/// Start the HTTP server and run until a shutdown signal arrives.
pub async fn start(service_config: Arc<ServiceConfig>) -> Result<()> {
    let metrics = get_metrics().await;
    let server_config = service_config.settings.server.clone();

    let client = ApimClient::new(service_config)?;
    let state = AppState::new(metrics, AutomationState::new(client, TokenSlot::new()));
    let app = router(state);

    let bind_addr = format!("{}:{}", server_config.host, server_config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    info!("listening on {}", bind_addr);

    metrics.up.set(1);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    metrics.up.set(0);

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
