// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

use super::grammar;
use super::units::{parse_bytes, parse_compact_duration};
use super::{LineKind, ParseResult, is_blank};
use crate::edgerouter::types::PppoeClientSession;
use crate::error::ParseError;

const SESSION_FIELDS: usize = 9;

/// Parses `show pppoe-client`
///
/// Rows are read only after the dashed separator under the column header.
///
/// # Errors
///
/// Returns [`ParseError::FieldCountMismatch`] for a row that does not have
/// exactly nine columns.
pub fn parse_pppoe_client_sessions(lines: &[&str]) -> ParseResult<Vec<PppoeClientSession>> {
    let mut sessions = Vec::new();
    let mut state = LineKind::None;

    for line in lines {
        if is_blank(line) {
            state = LineKind::None;
            continue;
        }
        if grammar::is_no_active_sessions(line) {
            return Ok(Vec::new());
        }
        if grammar::is_separator(line) {
            state = LineKind::Separator;
            continue;
        }

        if matches!(state, LineKind::Separator | LineKind::ItemLine) {
            state = LineKind::ItemLine;
            sessions.push(parse_session(line)?);
        }
    }

    Ok(sessions)
}

fn parse_session(line: &str) -> ParseResult<PppoeClientSession> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [user, time, protocol, interface, remote_ip, tx_pkt, tx_byte, rx_pkt, rx_byte] =
        fields.as_slice()
    else {
        return Err(ParseError::FieldCountMismatch {
            expected: SESSION_FIELDS,
            line: line.to_string(),
        });
    };

    Ok(PppoeClientSession {
        user: (*user).to_string(),
        time: parse_compact_duration("Time", time),
        protocol: (*protocol).to_string(),
        interface: (*interface).to_string(),
        remote_ip: (*remote_ip).to_string(),
        transmit_packets: parse_bytes("TX pkt", tx_pkt).unwrap_or_default(),
        transmit_bytes: parse_bytes("TX byte", tx_byte).unwrap_or_default(),
        receive_packets: parse_bytes("RX pkt", rx_pkt).unwrap_or_default(),
        receive_bytes: parse_bytes("RX byte", rx_byte).unwrap_or_default(),
    })
}
