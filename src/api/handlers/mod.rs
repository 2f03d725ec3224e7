// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

mod health;
mod metrics;

pub use health::{health_check, liveness};
pub use metrics::metrics_handler;
