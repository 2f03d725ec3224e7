// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

use super::ParseResult;
use crate::edgerouter::types::Interface;
use crate::error::ParseError;

/// Decodes the output of `ip --json addr show`
///
/// # Errors
///
/// Returns [`ParseError::Json`] when the output is not the expected array of
/// links.
pub fn parse_interfaces(output: &str) -> ParseResult<Vec<Interface>> {
    serde_json::from_str(output).map_err(|e| ParseError::Json {
        report: "interface",
        message: e.to_string(),
    })
}
