// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! HTTP server command

use anyhow::{Context, Result};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};

use edhub_core::domain::service_config::ServiceConfig;
use edhub_core::infrastructure::event_bus::{spawn_event_logger, EventBus};
use edhub_core::presentation::{app, AppState};

const LOGGER_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

pub async fn run(mut config: ServiceConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config
        .validate()
        .context("Configuration validation failed")?;

    info!(
        app = %config.app_name,
        environment = %config.environment,
        "Starting service"
    );

    let event_bus = EventBus::default();
    let event_logger = spawn_event_logger(&event_bus);
    let state = AppState::from_config(&config, event_bus)
        .context("Failed to initialize application state")?;
    let router = app(state, &config.cors);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    // The router owned the last publishers, so the logger drains and stops
    match tokio::time::timeout(LOGGER_DRAIN_TIMEOUT, event_logger).await {
        Ok(Ok(logged)) => info!(events = logged, "Service shut down"),
        Ok(Err(e)) => error!("Event logger task failed: {}", e),
        Err(_) => warn!("Event logger did not drain before shutdown"),
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
