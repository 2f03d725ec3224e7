// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Metric update logic for router snapshots

use crate::edgerouter::{
    BgpStatus, ChildSa, DdnsStatus, IkeSa, Interface, IpProtocol, LoadBalanceGroup, PppoeClientSession,
    RouterMetrics, VersionInfo,
};
use crate::metrics::labels::{
    BgpFamilyLabels, BgpNeighborLabels, DdnsLabels, InfoLabels, InterfaceAddressLabels,
    InterfaceLabels, IpsecTunnelLabels, LoadBalanceLabels, LoadBalancePingLabels,
    PppoeSessionLabels,
};

use super::{MetricsRegistry, gauge_value};

impl MetricsRegistry {
    /// Sets every gauge from one collected snapshot
    pub fn update_metrics(&self, metrics: &RouterMetrics) {
        self.update_version(&metrics.version);
        self.update_bgp(IpProtocol::V4, &metrics.bgp_ipv4);
        self.update_bgp(IpProtocol::V6, &metrics.bgp_ipv6);
        self.update_ddns(&metrics.ddns);
        self.update_load_balance(&metrics.load_balance);
        self.update_pppoe(&metrics.pppoe);
        self.update_interfaces(&metrics.interfaces);
        self.update_ipsec(&metrics.ipsec);
    }

    fn update_version(&self, version: &VersionInfo) {
        let labels = InfoLabels {
            version: version.version.clone(),
            build_id: version.build_id.clone(),
            model: version.hw_model.clone(),
        };
        self.info.get_or_create(&labels).set(1);
    }

    fn update_bgp(&self, family: IpProtocol, status: &BgpStatus) {
        for neighbor in &status.neighbors {
            let labels = BgpNeighborLabels {
                neighbor: neighbor.address.to_string(),
                r#as: neighbor.remote_as.to_string(),
                table_version: neighbor.table_version.to_string(),
            };
            let uptime = neighbor.uptime.map_or(0.0, |d| d.as_secs_f64());

            self.bgp_message_received
                .get_or_create(&labels)
                .set(gauge_value(neighbor.messages_received));
            self.bgp_message_sent
                .get_or_create(&labels)
                .set(gauge_value(neighbor.messages_sent));
            self.bgp_message_in_queue
                .get_or_create(&labels)
                .set(gauge_value(neighbor.in_queue));
            self.bgp_message_out_queue
                .get_or_create(&labels)
                .set(gauge_value(neighbor.out_queue));
            self.bgp_session_seconds.get_or_create(&labels).set(uptime);
            self.bgp_prefix_received
                .get_or_create(&labels)
                .set(gauge_value(neighbor.prefixes_received));
        }

        if let Some(established) = status.established_sessions {
            let labels = BgpFamilyLabels {
                family: family.to_string(),
            };
            self.bgp_established_sessions
                .get_or_create(&labels)
                .set(gauge_value(established));
        }
    }

    fn update_ddns(&self, statuses: &[DdnsStatus]) {
        for status in statuses {
            let labels = DdnsLabels {
                interface_name: status.interface.clone(),
                ip_address: status
                    .ip_address
                    .map(|addr| addr.to_string())
                    .unwrap_or_default(),
                hostname: status.host_name.clone(),
            };
            self.dynamic_dns_status
                .get_or_create(&labels)
                .set(i64::from(status.is_good()));
        }
    }

    fn update_load_balance(&self, groups: &[LoadBalanceGroup]) {
        for group in groups {
            for status in &group.statuses {
                let labels = LoadBalanceLabels {
                    group_name: group.name.clone(),
                    interface_name: status.interface.clone(),
                };
                let ping_labels = LoadBalancePingLabels {
                    group_name: group.name.clone(),
                    interface_name: status.interface.clone(),
                    gateway: status.ping.gateway.clone(),
                };

                self.load_balancer_health
                    .get_or_create(&labels)
                    .set(i64::from(status.is_healthy()));
                self.load_balancer_ping_health
                    .get_or_create(&ping_labels)
                    .set(i64::from(status.ping.is_reachable()));
                self.load_balancer_ping_total
                    .get_or_create(&labels)
                    .set(gauge_value(status.pings));
                self.load_balancer_ping_fail_total
                    .get_or_create(&labels)
                    .set(gauge_value(status.fails));
                self.load_balancer_run_fail_total
                    .get_or_create(&labels)
                    .set(gauge_value(status.run_fails));
                self.load_balancer_route_drop_total
                    .get_or_create(&labels)
                    .set(gauge_value(status.route_drops));
            }
        }
    }

    fn update_pppoe(&self, sessions: &[PppoeClientSession]) {
        for session in sessions {
            let labels = PppoeSessionLabels {
                user: session.user.clone(),
                protocol: session.protocol.clone(),
                interface_name: session.interface.clone(),
                ip_address: session.remote_ip.clone(),
            };

            // Sessions with an unreadable duration export no seconds sample
            if let Some(time) = session.time {
                self.pppoe_session_seconds
                    .get_or_create(&labels)
                    .set(time.as_secs_f64());
            }
            self.pppoe_transmit_packets
                .get_or_create(&labels)
                .set(gauge_value(session.transmit_packets));
            self.pppoe_transmit_bytes
                .get_or_create(&labels)
                .set(gauge_value(session.transmit_bytes));
            self.pppoe_receive_packets
                .get_or_create(&labels)
                .set(gauge_value(session.receive_packets));
            self.pppoe_receive_bytes
                .get_or_create(&labels)
                .set(gauge_value(session.receive_bytes));
        }
    }

    fn update_interfaces(&self, interfaces: &[Interface]) {
        for link in interfaces {
            let labels = InterfaceLabels {
                interface_name: link.ifname.clone(),
            };
            self.interface_up
                .get_or_create(&labels)
                .set(i64::from(link.is_up()));

            for addr in &link.addr_info {
                let labels = InterfaceAddressLabels {
                    interface_name: link.ifname.clone(),
                    address: addr.local.to_string(),
                    prefix_length: addr.prefixlen.to_string(),
                };
                self.interface_address_info.get_or_create(&labels).set(1);
            }
        }
    }

    fn update_ipsec(&self, sas: &[IkeSa]) {
        for sa in sas {
            let labels = IpsecTunnelLabels {
                tunnel: sa.tunnel_name().to_string(),
            };
            let child = sa.child();
            // Counters of an SA without CHILD SA read as zero
            let counter = |pick: fn(&ChildSa) -> Option<u64>| {
                gauge_value(child.and_then(pick).unwrap_or_default())
            };

            self.ipsec_up.get_or_create(&labels).set(1);
            self.ipsec_status
                .get_or_create(&labels)
                .set(sa.status() as i64);
            self.ipsec_in_bytes
                .get_or_create(&labels)
                .set(counter(|c| c.bytes_in));
            self.ipsec_out_bytes
                .get_or_create(&labels)
                .set(counter(|c| c.bytes_out));
            self.ipsec_in_packets
                .get_or_create(&labels)
                .set(counter(|c| c.packets_in));
            self.ipsec_out_packets
                .get_or_create(&labels)
                .set(counter(|c| c.packets_out));
        }
    }
}
