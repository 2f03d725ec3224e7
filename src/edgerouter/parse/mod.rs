// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Line-oriented parsers for EdgeRouter CLI reports
//!
//! Every parser is a single pass over the report lines driven by an explicit
//! [`LineKind`] state. Structural violations abort with a [`ParseError`]
//! carrying the raw line; unparsable values are logged and left at their
//! zero or absent value. The `ip` report is JSON and is decoded with serde
//! instead.

mod bgp;
mod ddns;
pub(crate) mod grammar;
mod interface;
mod load_balance;
mod pppoe;
pub mod units;
mod version;

pub use bgp::parse_bgp_status;
pub use ddns::parse_ddns_status;
pub use interface::parse_interfaces;
pub use load_balance::parse_load_balance_watchdog;
pub use pppoe::parse_pppoe_client_sessions;
pub use version::parse_version;

use crate::error::ParseError;

/// Result of a report parser
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Kind of the previously consumed line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum LineKind {
    /// Start of input or after a blank line
    #[default]
    None,
    /// BGP preamble or trailer line
    HeaderBlock,
    /// `Group <name>` line
    GroupHeader,
    /// Line opening a DDNS block or a load-balance interface
    EntryHeader,
    /// Table header or dashed separator; rows follow
    Separator,
    /// `key: value` line or table row
    ItemLine,
}

pub(crate) fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}
