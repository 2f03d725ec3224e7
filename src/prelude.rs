// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for convenient use.
//! Users of the library can import everything they need with:
//!
//! ```rust
//! use edgerouter_exporter::prelude::*;
//! ```

// Core types
pub use crate::config::{CommandConfig, Config};
pub use crate::error::{AppError, ParseError, Result};

// HTTP API
pub use crate::api::{AppState, create_router};

// Metrics types
pub use crate::metrics::{
    BgpFamilyLabels, BgpNeighborLabels, DdnsLabels, InfoLabels, InterfaceAddressLabels,
    InterfaceLabels, IpsecTunnelLabels, LoadBalanceLabels, LoadBalancePingLabels,
    MetricsRegistry, PppoeSessionLabels,
};

// EdgeRouter client
pub use crate::edgerouter::{
    AddrInfo, BgpNeighbor, BgpStatus, ChildSa, ChildSaState, CommandExecutor, DdnsStatus,
    EdgeRouterClient, IkeSa, IkeSaState, Interface, IpProtocol, IpsecSource, LoadBalanceGroup,
    LoadBalancePing, LoadBalanceStatus, PppoeClientSession, ProcessExecutor, RouterMetrics,
    TunnelStatus, VersionInfo, ViciClient,
};
