// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! # EdgeRouter Exporter
//!
//! Prometheus exporter for Ubiquiti EdgeRouter (EdgeOS) devices.
//!
//! This library runs the router's operational CLI tools, parses their text
//! reports into typed records and exposes them in Prometheus format.
//!
//! ## Main modules
//! - `api`: HTTP API handlers
//! - `config`: configuration management
//! - `edgerouter`: CLI execution and report parsers
//! - `error`: error types
//! - `metrics`: metrics labels and registry
//! - `prelude`: commonly used types and traits

mod api;
mod config;
mod edgerouter;
mod error;
mod metrics;
pub mod prelude;

// Re-export commonly used types
/// Application configuration
pub use config::{CommandConfig, Config};

/// Application error and result type
pub use error::{AppError, ParseError, Result};

/// HTTP API router and state
pub use api::{AppState, create_router};

/// Metrics registry and labels
pub use metrics::{InfoLabels, MetricsRegistry};

/// EdgeRouter client, command execution and report types
pub use edgerouter::{
    AddrInfo, BgpNeighbor, BgpStatus, ChildSa, ChildSaState, CommandExecutor, DdnsStatus,
    EdgeRouterClient, IkeSa, IkeSaState, Interface, IpProtocol, IpsecSource, LoadBalanceGroup,
    LoadBalancePing, LoadBalanceStatus, PppoeClientSession, ProcessExecutor, RouterMetrics,
    TunnelStatus, VersionInfo, ViciClient,
};

/// Report parsers and value normalizers
pub use edgerouter::parse;
