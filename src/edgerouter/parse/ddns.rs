// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

use super::grammar;
use super::units::{TimeLayout, parse_timestamp};
use super::{LineKind, ParseResult, is_blank};
use crate::edgerouter::types::DdnsStatus;
use std::net::IpAddr;

/// Parses the output of the dynamic DNS status tool
///
/// Blocks are separated by blank lines. A report that only says the service
/// is not configured yields no statuses.
///
/// # Errors
///
/// Never fails on the known report shapes; the `Result` keeps the signature
/// in line with the other report parsers.
pub fn parse_ddns_status(lines: &[&str]) -> ParseResult<Vec<DdnsStatus>> {
    let mut statuses = Vec::new();
    let mut current: Option<DdnsStatus> = None;
    let mut state = LineKind::None;

    for line in lines {
        if is_blank(line) {
            state = LineKind::None;
            continue;
        }
        if grammar::is_not_configured(line) {
            return Ok(Vec::new());
        }

        if state == LineKind::None {
            statuses.extend(current.take());
            state = LineKind::EntryHeader;
        }
        let entry = current.get_or_insert_with(DdnsStatus::default);

        let Some(kv) = grammar::key_value(line) else {
            continue;
        };
        state = LineKind::ItemLine;

        match kv.key {
            "interface" => entry.interface = grammar::interface_name(kv.value).to_string(),
            "ip address" => entry.ip_address = parse_address(kv.key, kv.value),
            "host-name" => entry.host_name = kv.value.to_string(),
            "last update" => {
                entry.last_update = parse_timestamp(TimeLayout::Generic, kv.key, kv.value);
            }
            "update-status" => entry.update_status = kv.value.to_string(),
            _ => {}
        }
    }

    statuses.extend(current);
    Ok(statuses)
}

fn parse_address(key: &str, value: &str) -> Option<IpAddr> {
    match value.parse() {
        Ok(addr) => Some(addr),
        Err(e) => {
            tracing::warn!("Cannot parse {:?} to an IP address (key {:?}): {}", value, key, e);
            None
        }
    }
}
