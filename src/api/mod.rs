// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! HTTP API module for EdgeRouter Exporter
//!
//! Provides endpoints for health checks and Prometheus metrics export.
//!
//! # Endpoints
//! - `GET /health`: health check (JSON)
//! - `GET /healthz`: liveness check (plain text)
//! - `GET /metrics`: Prometheus metrics, collected on request

pub mod handlers;

use axum::{Router, routing::get};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::edgerouter::EdgeRouterClient;

/// Application state shared with endpoints
pub struct AppState {
    pub config: Config,
    pub client: EdgeRouterClient,
    /// Cancelled on process shutdown; scrapes run under a child token
    pub shutdown: CancellationToken,
}

/// Creates the main Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/healthz", get(handlers::liveness))
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(state)
}
