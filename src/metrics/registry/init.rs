// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Registry initialization and metric registration

use crate::metrics::labels::{
    BgpFamilyLabels, BgpNeighborLabels, DdnsLabels, InfoLabels, InterfaceAddressLabels,
    InterfaceLabels, IpsecTunnelLabels, LoadBalanceLabels, LoadBalancePingLabels,
    PppoeSessionLabels,
};
use prometheus_client::metrics::family::Family;
use prometheus_client::metrics::gauge::Gauge;
use prometheus_client::registry::Registry;

use super::{MetricsRegistry, SecondsGauge};

impl MetricsRegistry {
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Registry::default();

        let info = Family::<InfoLabels, Gauge>::default();
        registry.register("edgerouter_info", "Version info", info.clone());

        let bgp_message_received = Family::<BgpNeighborLabels, Gauge>::default();
        registry.register(
            "edgerouter_bgp_message_received_total",
            "Total number of BGP messages received",
            bgp_message_received.clone(),
        );
        let bgp_message_sent = Family::<BgpNeighborLabels, Gauge>::default();
        registry.register(
            "edgerouter_bgp_message_sent_total",
            "Total number of BGP messages sent",
            bgp_message_sent.clone(),
        );
        let bgp_message_in_queue = Family::<BgpNeighborLabels, Gauge>::default();
        registry.register(
            "edgerouter_bgp_message_in_queue",
            "Number of BGP messages in incoming queue",
            bgp_message_in_queue.clone(),
        );
        let bgp_message_out_queue = Family::<BgpNeighborLabels, Gauge>::default();
        registry.register(
            "edgerouter_bgp_message_out_queue",
            "Number of BGP messages in outgoing queue",
            bgp_message_out_queue.clone(),
        );
        let bgp_session_seconds = Family::<BgpNeighborLabels, SecondsGauge>::default();
        registry.register(
            "edgerouter_bgp_session_seconds_total",
            "Total seconds for established BGP session",
            bgp_session_seconds.clone(),
        );
        let bgp_prefix_received = Family::<BgpNeighborLabels, Gauge>::default();
        registry.register(
            "edgerouter_bgp_prefix_received_total",
            "Total number of BGP prefixes received",
            bgp_prefix_received.clone(),
        );
        let bgp_established_sessions = Family::<BgpFamilyLabels, Gauge>::default();
        registry.register(
            "edgerouter_bgp_established_sessions",
            "Number of established BGP sessions reported by the router",
            bgp_established_sessions.clone(),
        );

        let dynamic_dns_status = Family::<DdnsLabels, Gauge>::default();
        registry.register(
            "edgerouter_dynamic_dns_status",
            "Result of DDNS update",
            dynamic_dns_status.clone(),
        );

        let load_balancer_health = Family::<LoadBalanceLabels, Gauge>::default();
        registry.register(
            "edgerouter_load_balancer_health",
            "Result of watchdog",
            load_balancer_health.clone(),
        );
        let load_balancer_ping_health = Family::<LoadBalancePingLabels, Gauge>::default();
        registry.register(
            "edgerouter_load_balancer_ping_health",
            "Result of ping",
            load_balancer_ping_health.clone(),
        );
        let load_balancer_ping_total = Family::<LoadBalanceLabels, Gauge>::default();
        registry.register(
            "edgerouter_load_balancer_ping_total",
            "Total number of pings",
            load_balancer_ping_total.clone(),
        );
        let load_balancer_ping_fail_total = Family::<LoadBalanceLabels, Gauge>::default();
        registry.register(
            "edgerouter_load_balancer_ping_fail_total",
            "Total number of ping failures",
            load_balancer_ping_fail_total.clone(),
        );
        let load_balancer_run_fail_total = Family::<LoadBalanceLabels, Gauge>::default();
        registry.register(
            "edgerouter_load_balancer_run_fail_total",
            "Total number of run failures",
            load_balancer_run_fail_total.clone(),
        );
        let load_balancer_route_drop_total = Family::<LoadBalanceLabels, Gauge>::default();
        registry.register(
            "edgerouter_load_balancer_route_drop_total",
            "Total number of route drops",
            load_balancer_route_drop_total.clone(),
        );

        let pppoe_session_seconds = Family::<PppoeSessionLabels, SecondsGauge>::default();
        registry.register(
            "edgerouter_pppoe_client_session_seconds_total",
            "Total seconds for PPPoE client session",
            pppoe_session_seconds.clone(),
        );
        let pppoe_transmit_packets = Family::<PppoeSessionLabels, Gauge>::default();
        registry.register(
            "edgerouter_pppoe_client_session_transmit_packets_total",
            "Total transmit packets for PPPoE client session",
            pppoe_transmit_packets.clone(),
        );
        let pppoe_transmit_bytes = Family::<PppoeSessionLabels, Gauge>::default();
        registry.register(
            "edgerouter_pppoe_client_session_transmit_bytes_total",
            "Total transmit bytes for PPPoE client session",
            pppoe_transmit_bytes.clone(),
        );
        let pppoe_receive_packets = Family::<PppoeSessionLabels, Gauge>::default();
        registry.register(
            "edgerouter_pppoe_client_session_receive_packets_total",
            "Total receive packets for PPPoE client session",
            pppoe_receive_packets.clone(),
        );
        let pppoe_receive_bytes = Family::<PppoeSessionLabels, Gauge>::default();
        registry.register(
            "edgerouter_pppoe_client_session_receive_bytes_total",
            "Total receive bytes for PPPoE client session",
            pppoe_receive_bytes.clone(),
        );

        let interface_up = Family::<InterfaceLabels, Gauge>::default();
        registry.register(
            "edgerouter_interface_up",
            "Whether the link operational state is UP",
            interface_up.clone(),
        );
        let interface_address_info = Family::<InterfaceAddressLabels, Gauge>::default();
        registry.register(
            "edgerouter_interface_address_info",
            "Address assigned to a link",
            interface_address_info.clone(),
        );

        let ipsec_up = Family::<IpsecTunnelLabels, Gauge>::default();
        registry.register(
            "edgerouter_ipsec_up",
            "Result of IPsec metrics scrape",
            ipsec_up.clone(),
        );
        let ipsec_status = Family::<IpsecTunnelLabels, Gauge>::default();
        registry.register(
            "edgerouter_ipsec_status",
            "Status of IPsec tunnel (0 up, 1 child SA down, 2 down, 3 unknown)",
            ipsec_status.clone(),
        );
        let ipsec_in_bytes = Family::<IpsecTunnelLabels, Gauge>::default();
        registry.register(
            "edgerouter_ipsec_in_bytes",
            "Total receive bytes for IPsec tunnel",
            ipsec_in_bytes.clone(),
        );
        let ipsec_out_bytes = Family::<IpsecTunnelLabels, Gauge>::default();
        registry.register(
            "edgerouter_ipsec_out_bytes",
            "Total transmit bytes for IPsec tunnel",
            ipsec_out_bytes.clone(),
        );
        let ipsec_in_packets = Family::<IpsecTunnelLabels, Gauge>::default();
        registry.register(
            "edgerouter_ipsec_in_packets",
            "Total receive packets for IPsec tunnel",
            ipsec_in_packets.clone(),
        );
        let ipsec_out_packets = Family::<IpsecTunnelLabels, Gauge>::default();
        registry.register(
            "edgerouter_ipsec_out_packets",
            "Total transmit packets for IPsec tunnel",
            ipsec_out_packets.clone(),
        );

        let scrape_duration_milliseconds = Gauge::default();
        registry.register(
            "edgerouter_scrape_duration_milliseconds",
            "Duration of the CLI collection for this scrape in milliseconds",
            scrape_duration_milliseconds.clone(),
        );

        Self {
            registry,
            info,
            bgp_message_received,
            bgp_message_sent,
            bgp_message_in_queue,
            bgp_message_out_queue,
            bgp_session_seconds,
            bgp_prefix_received,
            bgp_established_sessions,
            dynamic_dns_status,
            load_balancer_health,
            load_balancer_ping_health,
            load_balancer_ping_total,
            load_balancer_ping_fail_total,
            load_balancer_run_fail_total,
            load_balancer_route_drop_total,
            pppoe_session_seconds,
            pppoe_transmit_packets,
            pppoe_transmit_bytes,
            pppoe_receive_packets,
            pppoe_receive_bytes,
            interface_up,
            interface_address_info,
            ipsec_up,
            ipsec_status,
            ipsec_in_bytes,
            ipsec_out_bytes,
            ipsec_in_packets,
            ipsec_out_packets,
            scrape_duration_milliseconds,
        }
    }
}
