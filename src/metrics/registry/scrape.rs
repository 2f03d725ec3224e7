// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Scrape encoding and timing helpers

use crate::error::Result;
use prometheus_client::encoding::text::encode;

use super::MetricsRegistry;

impl MetricsRegistry {
    /// Renders the registry in OpenMetrics text format
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::AppError::Metrics`] when encoding fails.
    pub fn encode_metrics(&self) -> Result<String> {
        let mut buffer = String::new();
        encode(&mut buffer, &self.registry)?;
        Ok(buffer)
    }

    pub fn record_scrape_duration(&self, duration_secs: f64) {
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let millis = (duration_secs * 1000.0).round() as i64;
        self.scrape_duration_milliseconds.set(millis);
    }
}
