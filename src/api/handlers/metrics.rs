// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;

use crate::api::AppState;
use crate::error::Result;
use crate::metrics::MetricsRegistry;

const OPENMETRICS_CONTENT_TYPE: &str = "application/openmetrics-text; version=1.0.0; charset=utf-8";

/// GET /metrics
///
/// Runs every CLI report, then renders the snapshot into a registry built
/// for this request only. Any collection or encoding failure answers 500
/// without a body.
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    let cancel = state.shutdown.child_token();
    let start = Instant::now();

    let snapshot = match state.client.collect_metrics(&cancel).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::error!("Failed to collect metrics: {}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    let duration = start.elapsed().as_secs_f64();
    tracing::debug!("/metrics collected in {:.3}s", duration);

    let registry = MetricsRegistry::new();
    registry.update_metrics(&snapshot);
    registry.record_scrape_duration(duration);

    metrics_response(registry.encode_metrics())
}

fn metrics_response(encoded: Result<String>) -> Response {
    match encoded {
        Ok(metrics_text) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, OPENMETRICS_CONTENT_TYPE)],
            metrics_text,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use http_body_util::BodyExt;

    async fn body_of(resp: Response) -> Vec<u8> {
        resp.into_body().collect().await.unwrap().to_bytes().to_vec()
    }

    #[tokio::test]
    async fn test_encoded_metrics_response() {
        let resp = metrics_response(Ok("# EOF\n".to_string()));
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            OPENMETRICS_CONTENT_TYPE
        );
        assert_eq!(body_of(resp).await, b"# EOF\n");
    }

    #[tokio::test]
    async fn test_encode_failure_has_empty_body() {
        let resp = metrics_response(Err(AppError::Metrics("an error occurred".to_string())));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_of(resp).await.is_empty());
    }
}
