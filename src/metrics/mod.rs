// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Metrics registry and update module for EdgeRouter Exporter
//!
//! Contains label types and the per-scrape Prometheus registry.

mod labels;
mod registry;


/// Labels for every exported series
pub use labels::{
    BgpFamilyLabels, BgpNeighborLabels, DdnsLabels, InfoLabels, InterfaceAddressLabels,
    InterfaceLabels, IpsecTunnelLabels, LoadBalanceLabels, LoadBalancePingLabels,
    PppoeSessionLabels,
};

/// Prometheus metrics registry
pub use registry::MetricsRegistry;
