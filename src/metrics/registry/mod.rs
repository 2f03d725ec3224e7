// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Metrics registry and update logic
//!
//! A registry holds the samples of exactly one scrape. The HTTP handler
//! builds a fresh one per request so series of vanished neighbors, sessions
//! or interfaces never linger.

mod init;
mod scrape;
mod update;

use crate::metrics::labels::{
    BgpFamilyLabels, BgpNeighborLabels, DdnsLabels, InfoLabels, InterfaceAddressLabels,
    InterfaceLabels, IpsecTunnelLabels, LoadBalanceLabels, LoadBalancePingLabels,
    PppoeSessionLabels,
};
use prometheus_client::metrics::family::Family;
use prometheus_client::metrics::gauge::Gauge;
use prometheus_client::registry::Registry;
use std::sync::atomic::AtomicU64;

/// Gauge holding fractional seconds
type SecondsGauge = Gauge<f64, AtomicU64>;

pub struct MetricsRegistry {
    registry: Registry,
    info: Family<InfoLabels, Gauge>,
    // BGP
    bgp_message_received: Family<BgpNeighborLabels, Gauge>,
    bgp_message_sent: Family<BgpNeighborLabels, Gauge>,
    bgp_message_in_queue: Family<BgpNeighborLabels, Gauge>,
    bgp_message_out_queue: Family<BgpNeighborLabels, Gauge>,
    bgp_session_seconds: Family<BgpNeighborLabels, SecondsGauge>,
    bgp_prefix_received: Family<BgpNeighborLabels, Gauge>,
    bgp_established_sessions: Family<BgpFamilyLabels, Gauge>,
    // dynamic DNS
    dynamic_dns_status: Family<DdnsLabels, Gauge>,
    // load balancer watchdog
    load_balancer_health: Family<LoadBalanceLabels, Gauge>,
    load_balancer_ping_health: Family<LoadBalancePingLabels, Gauge>,
    load_balancer_ping_total: Family<LoadBalanceLabels, Gauge>,
    load_balancer_ping_fail_total: Family<LoadBalanceLabels, Gauge>,
    load_balancer_run_fail_total: Family<LoadBalanceLabels, Gauge>,
    load_balancer_route_drop_total: Family<LoadBalanceLabels, Gauge>,
    // PPPoE client sessions
    pppoe_session_seconds: Family<PppoeSessionLabels, SecondsGauge>,
    pppoe_transmit_packets: Family<PppoeSessionLabels, Gauge>,
    pppoe_transmit_bytes: Family<PppoeSessionLabels, Gauge>,
    pppoe_receive_packets: Family<PppoeSessionLabels, Gauge>,
    pppoe_receive_bytes: Family<PppoeSessionLabels, Gauge>,
    // interfaces
    interface_up: Family<InterfaceLabels, Gauge>,
    interface_address_info: Family<InterfaceAddressLabels, Gauge>,
    // IPsec tunnels
    ipsec_up: Family<IpsecTunnelLabels, Gauge>,
    ipsec_status: Family<IpsecTunnelLabels, Gauge>,
    ipsec_in_bytes: Family<IpsecTunnelLabels, Gauge>,
    ipsec_out_bytes: Family<IpsecTunnelLabels, Gauge>,
    ipsec_in_packets: Family<IpsecTunnelLabels, Gauge>,
    ipsec_out_packets: Family<IpsecTunnelLabels, Gauge>,
    // scrape timing
    scrape_duration_milliseconds: Gauge,
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts a report counter to a gauge value, saturating at `i64::MAX`
fn gauge_value(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
