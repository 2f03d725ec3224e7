// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

use super::grammar::{self, BgpPreamble};
use super::units::{parse_clock_duration, parse_compact_duration, parse_number};
use super::{LineKind, ParseResult, is_blank};
use crate::edgerouter::types::{BgpNeighbor, BgpStatus, IpProtocol};
use crate::error::ParseError;
use std::net::IpAddr;

const NEIGHBOR_FIELDS: usize = 10;

/// Parses a BGP summary, keeping only neighbors of `family`
///
/// # Errors
///
/// Fails when a neighbor row does not have exactly ten columns or when its
/// first column is not an IP address.
pub fn parse_bgp_status(lines: &[&str], family: IpProtocol) -> ParseResult<BgpStatus> {
    let mut status = BgpStatus::default();
    let mut state = LineKind::None;

    for line in lines {
        if is_blank(line) {
            state = LineKind::None;
            continue;
        }

        if let Some(preamble) = grammar::bgp_preamble(line) {
            apply_preamble(&mut status, preamble);
            state = LineKind::HeaderBlock;
            continue;
        }

        match state {
            // Column header of the neighbor table
            LineKind::None => state = LineKind::Separator,
            LineKind::Separator | LineKind::ItemLine => {
                state = LineKind::ItemLine;
                if let Some(neighbor) = parse_neighbor(line, family)? {
                    status.neighbors.push(neighbor);
                }
            }
            _ => {}
        }
    }

    Ok(status)
}

fn apply_preamble(status: &mut BgpStatus, preamble: BgpPreamble<'_>) {
    match preamble {
        BgpPreamble::Router {
            router_id,
            local_as,
        } => {
            status.router_id = router_id.to_string();
            status.local_as = parse_number("local AS number", local_as).unwrap_or_default();
        }
        BgpPreamble::TableVersion(v) => {
            status.table_version = parse_number("table version", v).unwrap_or_default();
        }
        BgpPreamble::AsPaths(v) => {
            status.as_paths = parse_number("AS-PATH entries", v).unwrap_or_default();
        }
        BgpPreamble::Communities(v) => {
            status.communities = parse_number("community entries", v).unwrap_or_default();
        }
        BgpPreamble::EbgpMultipath(v) => {
            status.ebgp_maximum_paths = parse_number("ebgp ECMP multipath", v);
        }
        BgpPreamble::IbgpMultipath(v) => {
            status.ibgp_maximum_paths = parse_number("ibgp ECMP multipath", v);
        }
        BgpPreamble::NeighborTotal(v) => {
            status.neighbor_count = parse_number("number of neighbors", v);
        }
        BgpPreamble::EstablishedTotal(v) => {
            status.established_sessions = parse_number("number of Established sessions", v);
        }
    }
}

/// Parses one neighbor row; `None` when it belongs to the other family
fn parse_neighbor(line: &str, family: IpProtocol) -> ParseResult<Option<BgpNeighbor>> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [
        neighbor,
        version,
        remote_as,
        received,
        sent,
        table_version,
        in_queue,
        out_queue,
        up_down,
        state_or_prefixes,
    ] = fields.as_slice()
    else {
        return Err(ParseError::FieldCountMismatch {
            expected: NEIGHBOR_FIELDS,
            line: line.to_string(),
        });
    };

    let address: IpAddr = neighbor.parse().map_err(|_| ParseError::AddressParse {
        value: (*neighbor).to_string(),
        line: line.to_string(),
    })?;
    if !family.matches(address) {
        return Ok(None);
    }

    let uptime = if up_down.contains('d') {
        parse_compact_duration("Up/Down", up_down)
    } else if up_down.contains(':') {
        parse_clock_duration("Up/Down", up_down)
    } else {
        None
    };

    // A non-numeric last column is the session state; the prefix count is
    // not reported in that case.
    let (state, prefixes_received) = match state_or_prefixes.parse::<u64>() {
        Ok(n) => (None, n),
        Err(_) => (Some((*state_or_prefixes).to_string()), 0),
    };

    Ok(Some(BgpNeighbor {
        address: address.to_canonical(),
        version: parse_number("V", version).unwrap_or_default(),
        remote_as: parse_number("AS", remote_as).unwrap_or_default(),
        messages_received: parse_number("MsgRcvd", received).unwrap_or_default(),
        messages_sent: parse_number("MsgSent", sent).unwrap_or_default(),
        table_version: parse_number("TblVer", table_version).unwrap_or_default(),
        in_queue: parse_number("InQ", in_queue).unwrap_or_default(),
        out_queue: parse_number("OutQ", out_queue).unwrap_or_default(),
        uptime,
        state,
        prefixes_received,
    }))
}
