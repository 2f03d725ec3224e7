// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! EdgeOS command-line client module
//!
//! Runs the router's operational CLI tools and turns their text reports into
//! typed records. IPsec state is read from strongSwan over vici.

mod client;
mod command;
mod ipsec;
pub mod parse;
mod types;

pub use client::EdgeRouterClient;
pub use command::{CommandExecutor, ProcessExecutor};
pub use ipsec::{IpsecSource, ViciClient};
pub use types::{
    AddrInfo, BgpNeighbor, BgpStatus, ChildSa, ChildSaState, DdnsStatus, IkeSa, IkeSaState,
    Interface, IpProtocol, LoadBalanceGroup, LoadBalancePing, LoadBalanceStatus,
    PppoeClientSession, RouterMetrics, TunnelStatus, VersionInfo,
};
