// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Line grammar shared by the report parsers
//!
//! Each rule is a precompiled pattern wrapped in a small function returning
//! the captured pieces, already trimmed. Parsers never touch the regexes
//! directly.

use once_cell::sync::Lazy;
use regex::Regex;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|_| unreachable!())
}

static KEY_VALUE: Lazy<Regex> = Lazy::new(|| compile(r"(.+?): (.+)"));
static GROUP_HEADER: Lazy<Regex> = Lazy::new(|| compile(r"^Group (.+)"));
static SEPARATOR: Lazy<Regex> = Lazy::new(|| compile(r"^[ -]+$"));
static NOT_CONFIGURED: Lazy<Regex> = Lazy::new(|| compile(r".* not configured"));
static NO_ACTIVE_SESSIONS: Lazy<Regex> = Lazy::new(|| compile(r"^No active .*sessions"));
static FAILOVER_ONLY: Lazy<Regex> = Lazy::new(|| compile(r"^\s*failover-only mode\s*$"));
static RUN_FAILS: Lazy<Regex> = Lazy::new(|| compile(r"(\d+)/(\d+)"));
static PING_GATEWAY: Lazy<Regex> = Lazy::new(|| compile(r"^(.+) - (.+)"));

static BGP_ROUTER: Lazy<Regex> =
    Lazy::new(|| compile(r"BGP router identifier ([\d.]+), local AS number (\d+)"));
static BGP_TABLE: Lazy<Regex> = Lazy::new(|| compile(r"BGP table version is (\d+)"));
static BGP_AS_PATH: Lazy<Regex> = Lazy::new(|| compile(r"(\d+) BGP AS-PATH entries"));
static BGP_COMMUNITY: Lazy<Regex> = Lazy::new(|| compile(r"(\d+) BGP community entries"));
static BGP_ECMP: Lazy<Regex> =
    Lazy::new(|| compile(r"^\s*(\d+)\s+Configured (ebgp|ibgp) ECMP multipath"));
static BGP_NEIGHBOR_TOTAL: Lazy<Regex> =
    Lazy::new(|| compile(r"^Total number of neighbors (\d+)"));
static BGP_ESTABLISHED_TOTAL: Lazy<Regex> =
    Lazy::new(|| compile(r"^Total number of Established sessions (\d+)"));

/// `key: value` item line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct KeyValue<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

pub(crate) fn key_value(line: &str) -> Option<KeyValue<'_>> {
    let caps = KEY_VALUE.captures(line)?;
    Some(KeyValue {
        key: caps.get(1)?.as_str().trim(),
        value: caps.get(2)?.as_str().trim(),
    })
}

/// Name of a load-balance group header (`Group FAILOVER_01`)
pub(crate) fn group_header(line: &str) -> Option<&str> {
    let caps = GROUP_HEADER.captures(line)?;
    Some(caps.get(1)?.as_str().trim())
}

/// Table separator made of dashes and spaces only
pub(crate) fn is_separator(line: &str) -> bool {
    SEPARATOR.is_match(line)
}

/// `Dynamic DNS not configured`, `load-balance is not configured`
pub(crate) fn is_not_configured(line: &str) -> bool {
    NOT_CONFIGURED.is_match(line)
}

/// `No active PPPoE client sessions`
pub(crate) fn is_no_active_sessions(line: &str) -> bool {
    NO_ACTIVE_SESSIONS.is_match(line)
}

pub(crate) fn is_failover_only(line: &str) -> bool {
    FAILOVER_ONLY.is_match(line)
}

/// Interface name without its bracketed annotation
///
/// `eth1 [ Currently no IP address ]` yields `eth1`.
pub(crate) fn interface_name(value: &str) -> &str {
    value.split('[').next().unwrap_or_default().trim()
}

/// `(failed runs, threshold)` from a `N/M` value
pub(crate) fn run_fails(value: &str) -> Option<(&str, &str)> {
    let caps = RUN_FAILS.captures(value)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

/// `(gateway, status)` from a `<gateway> - <status>` value
pub(crate) fn ping_gateway(value: &str) -> Option<(&str, &str)> {
    let caps = PING_GATEWAY.captures(value)?;
    Some((caps.get(1)?.as_str().trim(), caps.get(2)?.as_str().trim()))
}

/// Recognized line of the BGP summary outside the neighbor table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BgpPreamble<'a> {
    Router { router_id: &'a str, local_as: &'a str },
    TableVersion(&'a str),
    AsPaths(&'a str),
    Communities(&'a str),
    EbgpMultipath(&'a str),
    IbgpMultipath(&'a str),
    NeighborTotal(&'a str),
    EstablishedTotal(&'a str),
}

pub(crate) fn bgp_preamble(line: &str) -> Option<BgpPreamble<'_>> {
    if let Some(caps) = BGP_ROUTER.captures(line) {
        return Some(BgpPreamble::Router {
            router_id: caps.get(1)?.as_str().trim(),
            local_as: caps.get(2)?.as_str(),
        });
    }
    if let Some(caps) = BGP_TABLE.captures(line) {
        return Some(BgpPreamble::TableVersion(caps.get(1)?.as_str()));
    }
    if let Some(caps) = BGP_AS_PATH.captures(line) {
        return Some(BgpPreamble::AsPaths(caps.get(1)?.as_str()));
    }
    if let Some(caps) = BGP_COMMUNITY.captures(line) {
        return Some(BgpPreamble::Communities(caps.get(1)?.as_str()));
    }
    if let Some(caps) = BGP_ECMP.captures(line) {
        let paths = caps.get(1)?.as_str();
        return match caps.get(2)?.as_str() {
            "ebgp" => Some(BgpPreamble::EbgpMultipath(paths)),
            _ => Some(BgpPreamble::IbgpMultipath(paths)),
        };
    }
    if let Some(caps) = BGP_NEIGHBOR_TOTAL.captures(line) {
        return Some(BgpPreamble::NeighborTotal(caps.get(1)?.as_str()));
    }
    if let Some(caps) = BGP_ESTABLISHED_TOTAL.captures(line) {
        return Some(BgpPreamble::EstablishedTotal(caps.get(1)?.as_str()));
    }
    None
}
