// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

use super::grammar::{self, KeyValue};
use super::units::{TimeLayout, parse_number, parse_timestamp};
use super::{LineKind, ParseResult, is_blank};
use crate::edgerouter::types::{LoadBalanceGroup, LoadBalancePing, LoadBalanceStatus};
use crate::error::ParseError;

/// Group being filled, with its still open interface status
struct GroupBuilder {
    group: LoadBalanceGroup,
    status: Option<LoadBalanceStatus>,
}

impl GroupBuilder {
    fn new(name: &str) -> Self {
        Self {
            group: LoadBalanceGroup {
                name: name.to_string(),
                statuses: Vec::new(),
            },
            status: None,
        }
    }

    fn open_status(&mut self, interface: &str) {
        self.group.statuses.extend(self.status.take());
        self.status = Some(LoadBalanceStatus::new(interface));
    }

    fn finish(mut self) -> LoadBalanceGroup {
        self.group.statuses.extend(self.status.take());
        self.group
    }
}

fn unexpected(expected: &'static str, line: &str) -> ParseError {
    ParseError::UnexpectedToken {
        expected,
        line: line.to_string(),
    }
}

/// Parses `show load-balance watchdog`
///
/// # Errors
///
/// Returns [`ParseError::UnexpectedToken`] when a `key: value` line shows up
/// before any group, or inside a group before any interface line.
pub fn parse_load_balance_watchdog(lines: &[&str]) -> ParseResult<Vec<LoadBalanceGroup>> {
    let mut groups = Vec::new();
    let mut current: Option<GroupBuilder> = None;
    let mut state = LineKind::None;

    for line in lines {
        if is_blank(line) {
            state = LineKind::None;
            continue;
        }
        if grammar::is_not_configured(line) {
            return Ok(Vec::new());
        }

        if let Some(kv) = grammar::key_value(line) {
            let builder = current.as_mut().ok_or_else(|| unexpected("group", line))?;
            let status = builder
                .status
                .as_mut()
                .ok_or_else(|| unexpected("interface", line))?;
            apply_item(status, kv);
            state = LineKind::ItemLine;
            continue;
        }

        if let Some(name) = grammar::group_header(line) {
            groups.extend(current.take().map(GroupBuilder::finish));
            current = Some(GroupBuilder::new(name));
            state = LineKind::GroupHeader;
            continue;
        }

        if grammar::is_failover_only(line) {
            if let Some(status) = current.as_mut().and_then(|b| b.status.as_mut()) {
                status.failover_only_mode = true;
            }
            continue;
        }

        if matches!(state, LineKind::GroupHeader | LineKind::None) {
            let builder = current.as_mut().ok_or_else(|| unexpected("group", line))?;
            builder.open_status(line.trim());
            state = LineKind::EntryHeader;
        }
    }

    groups.extend(current.map(GroupBuilder::finish));
    Ok(groups)
}

fn apply_item(status: &mut LoadBalanceStatus, KeyValue { key, value }: KeyValue<'_>) {
    match key {
        "status" => status.status = value.to_string(),
        "pings" => status.pings = parse_number(key, value).unwrap_or_default(),
        "fails" => status.fails = parse_number(key, value).unwrap_or_default(),
        "run fails" => {
            status.run_fails = match grammar::run_fails(value) {
                Some((failed, _)) => parse_number(key, failed).unwrap_or_default(),
                None => {
                    tracing::warn!("Cannot parse {:?} to run fails (key {:?})", value, key);
                    0
                }
            };
        }
        "route drops" => status.route_drops = parse_number(key, value).unwrap_or_default(),
        "ping gateway" => match grammar::ping_gateway(value) {
            Some((gateway, ping_status)) => {
                status.ping = LoadBalancePing {
                    gateway: gateway.to_string(),
                    status: ping_status.to_string(),
                };
            }
            None => tracing::warn!("Cannot parse {:?} to a ping gateway (key {:?})", value, key),
        },
        "last route drop" => {
            status.last_route_drop = parse_timestamp(TimeLayout::Generic, key, value);
        }
        "last route recover" => {
            status.last_route_recover = parse_timestamp(TimeLayout::Generic, key, value);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn jan2(h: u32, m: u32, s: u32) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(2006, 1, 2)
            .unwrap()
            .and_hms_opt(h, m, s)
    }

    fn ping(gateway: &str, status: &str) -> LoadBalancePing {
        LoadBalancePing {
            gateway: gateway.to_string(),
            status: status.to_string(),
        }
    }

    const TWO_GROUPS: &[&str] = &[
        "Group FAILOVER_01",
        "  eth0",
        "  status: OK",
        "  failover-only mode",
        "  pings: 1000",
        "  fails: 1",
        "  run fails: 0/3",
        "  route drops: 0",
        "  ping gateway: ping.ubnt.com - REACHABLE",
        "",
        "  eth1",
        "  status: Waiting on recovery (0/3)",
        "  pings: 1000",
        "  fails: 10",
        "  run fails: 3/3",
        "  route drops: 1",
        "  ping gateway: ping.ubnt.com - DOWN",
        "  last route drop   : Mon Jan  2 15:04:05 2006",
        "  last route recover: Mon Jan  2 15:04:00 2006",
        "",
        "Group FAILOVER_02",
        "  eth2",
        "  status: OK",
        "  pings: 1000",
        "  fails: 0",
        "  run fails: 0/3",
        "  route drops: 0",
        "  ping gateway: ping.ubnt.com - REACHABLE",
        "",
        "  eth3",
        "  status: OK",
        "  pings: 1000",
        "  fails: 0",
        "  run fails: 0/3",
        "  route drops: 0",
        "  ping gateway: ping.ubnt.com - REACHABLE",
        "  last route drop   : Mon Jan  2 15:04:05 2006",
        "",
        "",
    ];

    #[test]
    fn test_parse_empty() {
        assert!(parse_load_balance_watchdog(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_not_configured_is_empty() {
        let groups = parse_load_balance_watchdog(&["load-balance is not configured"]).unwrap();
        assert!(groups.is_empty());
    }

    #[test]
    fn test_empty_group() {
        let groups = parse_load_balance_watchdog(&["Group FAILOVER_01"]).unwrap();
        assert_eq!(
            groups,
            vec![LoadBalanceGroup {
                name: "FAILOVER_01".to_string(),
                statuses: Vec::new(),
            }]
        );
    }

    #[test]
    fn test_parse_one_group() {
        let groups = parse_load_balance_watchdog(&TWO_GROUPS[..20]).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(
            groups[0].statuses,
            vec![
                LoadBalanceStatus {
                    interface: "eth0".to_string(),
                    status: "OK".to_string(),
                    failover_only_mode: true,
                    pings: 1000,
                    fails: 1,
                    run_fails: 0,
                    route_drops: 0,
                    ping: ping("ping.ubnt.com", "REACHABLE"),
                    last_route_drop: None,
                    last_route_recover: None,
                },
                LoadBalanceStatus {
                    interface: "eth1".to_string(),
                    status: "Waiting on recovery (0/3)".to_string(),
                    failover_only_mode: false,
                    pings: 1000,
                    fails: 10,
                    run_fails: 3,
                    route_drops: 1,
                    ping: ping("ping.ubnt.com", "DOWN"),
                    last_route_drop: jan2(15, 4, 5),
                    last_route_recover: jan2(15, 4, 0),
                },
            ]
        );
    }

    #[test]
    fn test_parse_multiple_groups() {
        let groups = parse_load_balance_watchdog(TWO_GROUPS).unwrap();

        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["FAILOVER_01", "FAILOVER_02"]);

        let second = &groups[1].statuses;
        assert_eq!(second.len(), 2);
        assert_eq!(second[0].interface, "eth2");
        assert!(second[0].is_healthy());
        assert!(!second[0].failover_only_mode);
        assert_eq!(second[1].interface, "eth3");
        assert_eq!(second[1].last_route_drop, jan2(15, 4, 5));
        assert_eq!(second[1].last_route_recover, None);
    }

    #[test]
    fn test_item_before_group_is_error() {
        let line = "mesg: ttyname failed: Inappropriate ioctl for device";
        let mut lines = vec![line];
        lines.extend_from_slice(TWO_GROUPS);

        let err = parse_load_balance_watchdog(&lines).unwrap_err();
        assert_eq!(err.line(), Some(line));
        assert_eq!(
            err.to_string(),
            "unexpected token, expecting group: mesg: ttyname failed: Inappropriate ioctl for device"
        );
    }

    #[test]
    fn test_item_right_after_group_header_is_error() {
        let err = parse_load_balance_watchdog(&["Group FAILOVER_01", "  status: OK"]).unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedToken {
                expected: "interface",
                line: "  status: OK".to_string(),
            }
        );
    }

    #[test]
    fn test_interface_before_group_is_error() {
        let err = parse_load_balance_watchdog(&["  eth0"]).unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnexpectedToken { expected: "group", .. }
        ));
    }

    #[test]
    fn test_malformed_values_keep_defaults() {
        let groups = parse_load_balance_watchdog(&[
            "Group G",
            "  eth0",
            "  pings: lots",
            "  run fails: unknown",
            "  ping gateway: nowhere",
        ])
        .unwrap();
        let status = &groups[0].statuses[0];
        assert_eq!(status.pings, 0);
        assert_eq!(status.run_fails, 0);
        assert_eq!(status.ping, LoadBalancePing::default());
    }

    #[test]
    fn test_parse_is_repeatable() {
        assert_eq!(
            parse_load_balance_watchdog(TWO_GROUPS),
            parse_load_balance_watchdog(TWO_GROUPS)
        );
    }
}
