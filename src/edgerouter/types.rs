// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Type definitions for EdgeRouter reports

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::Deserialize;
use std::fmt;
use std::net::IpAddr;
use std::time::Duration;

/// Output of `show version`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionInfo {
    pub version: String,
    pub build_id: String,
    pub build_on: Option<NaiveDateTime>,
    pub copyright: String,
    pub hw_model: String,
    pub hw_serial_number: String,
    pub uptime: String,
}

/// IP protocol family a BGP summary is scoped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpProtocol {
    V4,
    V6,
}

impl IpProtocol {
    /// Whether `addr` belongs to this family
    ///
    /// IPv4-mapped IPv6 literals (`::ffff:192.0.2.1`) are treated as IPv4.
    #[must_use]
    pub fn matches(self, addr: IpAddr) -> bool {
        match (self, addr.to_canonical()) {
            (Self::V4, IpAddr::V4(_)) | (Self::V6, IpAddr::V6(_)) => true,
            _ => false,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::V4 => "ipv4",
            Self::V6 => "ipv6",
        }
    }
}

impl fmt::Display for IpProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// BGP summary for one protocol family
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BgpStatus {
    pub router_id: String,
    pub local_as: u32,
    pub table_version: u64,
    pub as_paths: u64,
    pub communities: u64,
    pub ebgp_maximum_paths: Option<u64>,
    pub ibgp_maximum_paths: Option<u64>,
    pub neighbors: Vec<BgpNeighbor>,
    pub neighbor_count: Option<u64>,
    pub established_sessions: Option<u64>,
}

/// One row of the BGP neighbor table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BgpNeighbor {
    pub address: IpAddr,
    pub version: u32,
    pub remote_as: u32,
    pub messages_received: u64,
    pub messages_sent: u64,
    pub table_version: u64,
    pub in_queue: u64,
    pub out_queue: u64,
    /// `None` when the peer has never been established
    pub uptime: Option<Duration>,
    /// Session state name, set only when the peer is not Established
    pub state: Option<String>,
    /// Received prefixes; 0 whenever `state` is set, even though the real
    /// count is unknown in that case
    pub prefixes_received: u64,
}

/// One interface block of the dynamic DNS status report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DdnsStatus {
    pub interface: String,
    pub ip_address: Option<IpAddr>,
    pub host_name: String,
    pub last_update: Option<NaiveDateTime>,
    pub update_status: String,
}

impl DdnsStatus {
    /// Whether the last update was accepted by the DDNS provider
    #[must_use]
    pub fn is_good(&self) -> bool {
        self.update_status == "good"
    }
}

/// Load-balance group as reported by the watchdog
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadBalanceGroup {
    pub name: String,
    pub statuses: Vec<LoadBalanceStatus>,
}

/// Watchdog state of one interface in a load-balance group
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadBalanceStatus {
    pub interface: String,
    pub status: String,
    pub failover_only_mode: bool,
    pub pings: u64,
    pub fails: u64,
    pub run_fails: u64,
    pub route_drops: u64,
    pub ping: LoadBalancePing,
    pub last_route_drop: Option<NaiveDateTime>,
    pub last_route_recover: Option<NaiveDateTime>,
}

impl LoadBalanceStatus {
    /// Creates an empty status for `interface`
    #[must_use]
    pub fn new(interface: impl Into<String>) -> Self {
        Self {
            interface: interface.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_healthy(&self) -> bool {
        matches!(self.status.as_str(), "OK" | "Running")
    }
}

/// Result of the watchdog ping towards the group gateway
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadBalancePing {
    pub gateway: String,
    pub status: String,
}

impl LoadBalancePing {
    #[must_use]
    pub fn is_reachable(&self) -> bool {
        self.status == "REACHABLE"
    }
}

/// One row of `show pppoe-client`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PppoeClientSession {
    pub user: String,
    pub time: Option<Duration>,
    pub protocol: String,
    pub interface: String,
    pub remote_ip: String,
    pub transmit_packets: u64,
    pub transmit_bytes: u64,
    pub receive_packets: u64,
    pub receive_bytes: u64,
}

/// One link of `ip --json addr show`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Interface {
    pub ifname: String,
    pub operstate: String,
    #[serde(default)]
    pub addr_info: Vec<AddrInfo>,
}

impl Interface {
    #[must_use]
    pub fn is_up(&self) -> bool {
        self.operstate == "UP"
    }
}

/// Address assigned to a link
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddrInfo {
    pub local: IpAddr,
    /// Peer address of point-to-point links
    #[serde(default)]
    pub address: Option<IpAddr>,
    pub prefixlen: u8,
}

/// IKE SA as listed by strongSwan `list-sas`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct IkeSa {
    /// Connection name, the key of the `list-sa` event
    #[serde(skip)]
    pub name: String,
    pub uniqueid: u32,
    pub state: IkeSaState,
    pub remote_host: Option<String>,
    #[serde(default)]
    pub child_sas: IndexMap<String, ChildSa>,
}

/// IKE SA states of charon's `ike_sa.h`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IkeSaState {
    Created,
    Connecting,
    Established,
    Passive,
    Rekeying,
    Rekeyed,
    Deleting,
    Destroying,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ChildSa {
    pub name: String,
    pub state: ChildSaState,
    pub bytes_in: Option<u64>,
    pub packets_in: Option<u64>,
    pub bytes_out: Option<u64>,
    pub packets_out: Option<u64>,
}

/// CHILD SA states of charon's `child_sa.h`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChildSaState {
    Created,
    Routed,
    Installing,
    Installed,
    Updating,
    Rekeying,
    Rekeyed,
    Retrying,
    Deleting,
    Destroying,
    #[serde(other)]
    Unknown,
}

/// Exported tunnel state, ordered from healthy to unknown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TunnelStatus {
    Up = 0,
    /// IKE SA established but its CHILD SA is not installed
    ChildDown = 1,
    Down = 2,
    Unknown = 3,
}

impl IkeSa {
    /// First CHILD SA, which carries the tunnel traffic counters
    #[must_use]
    pub fn child(&self) -> Option<&ChildSa> {
        self.child_sas.values().next()
    }

    /// Tunnel name: the first CHILD SA name, else the connection name
    #[must_use]
    pub fn tunnel_name(&self) -> &str {
        self.child().map_or(self.name.as_str(), |c| c.name.as_str())
    }

    #[must_use]
    pub fn status(&self) -> TunnelStatus {
        match (self.state, self.child().map(|c| c.state)) {
            (IkeSaState::Unknown, _) | (_, Some(ChildSaState::Unknown) | None) => {
                TunnelStatus::Unknown
            }
            (
                IkeSaState::Established,
                Some(ChildSaState::Installed | ChildSaState::Rekeying | ChildSaState::Rekeyed),
            ) => TunnelStatus::Up,
            (IkeSaState::Established, Some(_)) => TunnelStatus::ChildDown,
            _ => TunnelStatus::Down,
        }
    }
}

/// Complete report snapshot collected for one scrape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterMetrics {
    pub version: VersionInfo,
    pub bgp_ipv4: BgpStatus,
    pub bgp_ipv6: BgpStatus,
    pub ddns: Vec<DdnsStatus>,
    pub load_balance: Vec<LoadBalanceGroup>,
    pub pppoe: Vec<PppoeClientSession>,
    pub interfaces: Vec<Interface>,
    pub ipsec: Vec<IkeSa>,
}

impl RouterMetrics {
    /// BGP neighbors of both families, IPv4 first
    pub fn bgp_neighbors(&self) -> impl Iterator<Item = &BgpNeighbor> {
        self.bgp_ipv4
            .neighbors
            .iter()
            .chain(self.bgp_ipv6.neighbors.iter())
    }
}
