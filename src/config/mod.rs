// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! Configuration module for EdgeRouter Exporter application
//!
//! Loads and validates configuration from environment variables.

use crate::error::{AppError, Result};


/// Default configuration values
pub mod defaults {
    pub const LISTEN_HOST: &str = "0.0.0.0";
    pub const OP_COMMAND: &str = "/opt/vyatta/bin/vyatta-op-cmd-wrapper";
    pub const OP_DDNS_COMMAND: &str = "/opt/vyatta/bin/sudo-users/vyatta-op-dynamic-dns.pl";
    pub const VTYSH_COMMAND: &str = "/opt/vyatta/sbin/ubnt_vtysh";
    pub const IP_COMMAND: &str = "/bin/ip";
    pub const VICI_PATH: &str = "/run/charon.vici";
    pub const COMMAND_TIMEOUT_SECS: u64 = 30;
}

/// Environment variable names used by the application
pub mod env_vars {
    pub const PORT: &str = "PORT";
    pub const OP_COMMAND: &str = "OP_COMMAND";
    pub const OP_DDNS_COMMAND: &str = "OP_DDNS_COMMAND";
    pub const VTYSH_COMMAND: &str = "VTYSH_COMMAND";
    pub const IP_COMMAND: &str = "IP_COMMAND";
    pub const VICI_PATH: &str = "VICI_PATH";
    pub const COMMAND_TIMEOUT_SECONDS: &str = "COMMAND_TIMEOUT_SECONDS";
}

/// Paths of the external CLI tools queried on every scrape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandConfig {
    /// Operational mode wrapper (`show version`, `show pppoe-client`, ...)
    pub op_command: String,
    /// Dynamic DNS status script
    pub op_ddns_command: String,
    /// Routing shell used for BGP summaries
    pub vtysh_command: String,
    /// iproute2 binary, queried with `--json addr show`
    pub ip_command: String,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            op_command: defaults::OP_COMMAND.to_string(),
            op_ddns_command: defaults::OP_DDNS_COMMAND.to_string(),
            vtysh_command: defaults::VTYSH_COMMAND.to_string(),
            ip_command: defaults::IP_COMMAND.to_string(),
        }
    }
}

impl CommandConfig {
    /// Validates command paths
    pub fn validate(&self) -> std::result::Result<(), String> {
        for (name, value) in [
            (env_vars::OP_COMMAND, &self.op_command),
            (env_vars::OP_DDNS_COMMAND, &self.op_ddns_command),
            (env_vars::VTYSH_COMMAND, &self.vtysh_command),
            (env_vars::IP_COMMAND, &self.ip_command),
        ] {
            if value.trim().is_empty() {
                return Err(format!("{name} cannot be empty"));
            }
        }
        Ok(())
    }
}

/// Application-wide configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: String,
    pub commands: CommandConfig,
    /// strongSwan vici socket
    pub vici_path: String,
    pub command_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_addr: format!("{}:9090", defaults::LISTEN_HOST),
            commands: CommandConfig::default(),
            vici_path: defaults::VICI_PATH.to_string(),
            command_timeout_secs: defaults::COMMAND_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Config`] when `PORT` is missing or invalid, or when
    /// a command path is set to an empty string.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds configuration from an arbitrary variable source
    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup(env_vars::PORT)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| AppError::Config(format!("missing value for {}", env_vars::PORT)))?;
        let port: u16 = port.trim().parse().map_err(|e| {
            AppError::Config(format!("invalid {} '{}': {}", env_vars::PORT, port, e))
        })?;

        let commands = CommandConfig {
            op_command: lookup(env_vars::OP_COMMAND)
                .unwrap_or_else(|| defaults::OP_COMMAND.to_string()),
            op_ddns_command: lookup(env_vars::OP_DDNS_COMMAND)
                .unwrap_or_else(|| defaults::OP_DDNS_COMMAND.to_string()),
            vtysh_command: lookup(env_vars::VTYSH_COMMAND)
                .unwrap_or_else(|| defaults::VTYSH_COMMAND.to_string()),
            ip_command: lookup(env_vars::IP_COMMAND)
                .unwrap_or_else(|| defaults::IP_COMMAND.to_string()),
        };
        commands.validate().map_err(AppError::Config)?;

        let vici_path = lookup(env_vars::VICI_PATH)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| defaults::VICI_PATH.to_string());

        let command_timeout_secs = match lookup(env_vars::COMMAND_TIMEOUT_SECONDS) {
            Some(v) => match v.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    tracing::warn!(
                        "Invalid {} '{}', using {}s",
                        env_vars::COMMAND_TIMEOUT_SECONDS,
                        v,
                        defaults::COMMAND_TIMEOUT_SECS
                    );
                    defaults::COMMAND_TIMEOUT_SECS
                }
            },
            None => defaults::COMMAND_TIMEOUT_SECS,
        };

        Ok(Config {
            server_addr: format!("{}:{}", defaults::LISTEN_HOST, port),
            commands,
            vici_path,
            command_timeout_secs,
        })
    }
}
