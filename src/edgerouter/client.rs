// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

//! High-level EdgeRouter client

use crate::config::CommandConfig;
use crate::error::Result;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::command::CommandExecutor;
use super::ipsec::IpsecSource;
use super::parse::{
    parse_bgp_status, parse_ddns_status, parse_interfaces, parse_load_balance_watchdog,
    parse_pppoe_client_sessions, parse_version,
};
use super::types::{
    BgpStatus, DdnsStatus, IkeSa, Interface, IpProtocol, LoadBalanceGroup, PppoeClientSession,
    RouterMetrics, VersionInfo,
};

/// EdgeOS command-line client
///
/// Runs the operational CLI tools through a [`CommandExecutor`] and parses
/// their reports into typed records. IPsec SAs come from an optional
/// [`IpsecSource`]; without one no tunnels are reported.
#[derive(Clone)]
pub struct EdgeRouterClient {
    commands: CommandConfig,
    executor: Arc<dyn CommandExecutor>,
    ipsec: Option<Arc<dyn IpsecSource>>,
}

impl EdgeRouterClient {
    #[must_use]
    pub fn new(commands: CommandConfig, executor: Arc<dyn CommandExecutor>) -> Self {
        Self {
            commands,
            executor,
            ipsec: None,
        }
    }

    /// Queries IPsec SAs from `source` on every collection
    #[must_use]
    pub fn with_ipsec(mut self, source: Arc<dyn IpsecSource>) -> Self {
        self.ipsec = Some(source);
        self
    }

    fn op(&self, args: &[&str]) -> Vec<String> {
        argv(&self.commands.op_command, args)
    }

    async fn run(&self, argv: Vec<String>, cancel: &CancellationToken) -> Result<String> {
        self.executor.output(&argv, cancel).await
    }

    /// `show version`
    ///
    /// # Errors
    ///
    /// Fails when the command fails or the report has no version.
    pub async fn version(&self, cancel: &CancellationToken) -> Result<VersionInfo> {
        let output = self.run(self.op(&["show", "version"]), cancel).await?;
        Ok(parse_version(&lines(&output))?)
    }

    /// BGP summary for one protocol family
    ///
    /// # Errors
    ///
    /// Fails when the command fails or a neighbor row is malformed.
    pub async fn bgp_status(
        &self,
        protocol: IpProtocol,
        cancel: &CancellationToken,
    ) -> Result<BgpStatus> {
        let query = match protocol {
            IpProtocol::V4 => "show ip bgp summary",
            IpProtocol::V6 => "show bgp ipv6 summary",
        };
        let output = self
            .run(argv(&self.commands.vtysh_command, &["-c", query]), cancel)
            .await?;
        Ok(parse_bgp_status(&lines(&output), protocol)?)
    }

    /// Dynamic DNS status
    ///
    /// # Errors
    ///
    /// Fails when the command fails.
    pub async fn ddns_status(&self, cancel: &CancellationToken) -> Result<Vec<DdnsStatus>> {
        let output = self
            .run(argv(&self.commands.op_ddns_command, &["--show-status"]), cancel)
            .await?;
        Ok(parse_ddns_status(&lines(&output))?)
    }

    /// `show load-balance watchdog`
    ///
    /// # Errors
    ///
    /// Fails when the command fails or the report is out of order.
    pub async fn load_balance_watchdog(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<LoadBalanceGroup>> {
        let output = self
            .run(self.op(&["show", "load-balance", "watchdog"]), cancel)
            .await?;
        Ok(parse_load_balance_watchdog(&lines(&output))?)
    }

    /// `show pppoe-client`
    ///
    /// # Errors
    ///
    /// Fails when the command fails or a session row is malformed.
    pub async fn pppoe_client_sessions(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<PppoeClientSession>> {
        let output = self.run(self.op(&["show", "pppoe-client"]), cancel).await?;
        Ok(parse_pppoe_client_sessions(&lines(&output))?)
    }

    /// `ip --json addr show`
    ///
    /// # Errors
    ///
    /// Fails when the command fails or prints something other than JSON links.
    pub async fn interfaces(&self, cancel: &CancellationToken) -> Result<Vec<Interface>> {
        let output = self
            .run(
                argv(&self.commands.ip_command, &["--json", "addr", "show"]),
                cancel,
            )
            .await?;
        Ok(parse_interfaces(&output)?)
    }

    /// IKE SAs with their CHILD SAs
    ///
    /// # Errors
    ///
    /// Fails when the IPsec source cannot be queried.
    pub async fn ipsec_sas(&self, cancel: &CancellationToken) -> Result<Vec<IkeSa>> {
        match &self.ipsec {
            Some(source) => source.security_associations(cancel).await,
            None => Ok(Vec::new()),
        }
    }

    /// Collects every report for one scrape
    ///
    /// Reports are queried one after another; the first failure aborts the
    /// whole collection.
    ///
    /// # Errors
    ///
    /// Returns the first execution or parse error.
    pub async fn collect_metrics(&self, cancel: &CancellationToken) -> Result<RouterMetrics> {
        let version = self.version(cancel).await?;
        let bgp_ipv4 = self.bgp_status(IpProtocol::V4, cancel).await?;
        let bgp_ipv6 = self.bgp_status(IpProtocol::V6, cancel).await?;
        let ddns = self.ddns_status(cancel).await?;
        let load_balance = self.load_balance_watchdog(cancel).await?;
        let pppoe = self.pppoe_client_sessions(cancel).await?;
        let interfaces = self.interfaces(cancel).await?;
        let ipsec = self.ipsec_sas(cancel).await?;

        tracing::debug!(
            "Collected {} BGP neighbors, {} DDNS statuses, {} load-balance groups, {} PPPoE sessions, {} interfaces, {} IPsec SAs",
            bgp_ipv4.neighbors.len() + bgp_ipv6.neighbors.len(),
            ddns.len(),
            load_balance.len(),
            pppoe.len(),
            interfaces.len(),
            ipsec.len()
        );

        Ok(RouterMetrics {
            version,
            bgp_ipv4,
            bgp_ipv6,
            ddns,
            load_balance,
            pppoe,
            interfaces,
            ipsec,
        })
    }
}

fn argv(program: &str, args: &[&str]) -> Vec<String> {
    std::iter::once(program)
        .chain(args.iter().copied())
        .map(str::to_string)
        .collect()
}

fn lines(output: &str) -> Vec<&str> {
    output.lines().collect()
}
