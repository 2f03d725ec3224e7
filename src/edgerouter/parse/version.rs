// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

use super::grammar;
use super::units::{TimeLayout, parse_timestamp};
use super::ParseResult;
use crate::edgerouter::types::VersionInfo;
use crate::error::ParseError;

/// Parses the output of `show version`
///
/// # Errors
///
/// Returns [`ParseError::MissingField`] when no `Version:` line is present.
pub fn parse_version(lines: &[&str]) -> ParseResult<VersionInfo> {
    let mut info = VersionInfo::default();

    for line in lines {
        let Some(kv) = grammar::key_value(line) else {
            continue;
        };

        match kv.key {
            "Version" => info.version = kv.value.to_string(),
            "Build ID" => info.build_id = kv.value.to_string(),
            "Build on" => info.build_on = parse_timestamp(TimeLayout::Build, kv.key, kv.value),
            "Copyright" => info.copyright = kv.value.to_string(),
            "HW model" => info.hw_model = kv.value.to_string(),
            "HW S/N" => info.hw_serial_number = kv.value.to_string(),
            "Uptime" => info.uptime = kv.value.to_string(),
            _ => {}
        }
    }

    if info.version.is_empty() {
        return Err(ParseError::MissingField { field: "version" });
    }
    Ok(info)
}
