// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

use axum::http::{Request, StatusCode};
use edgerouter_exporter::{
    AppError, AppState, CommandConfig, CommandExecutor, Config, EdgeRouterClient, IkeSa,
    IpsecSource, Result, create_router,
};
use futures_util::future::BoxFuture;
use http_body_util::BodyExt;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

const VERSION: &str = "\
Version:      v2.0.6
Build ID:     5208541
Build on:     01/02/06 15:04
Copyright:    2012-2018 Ubiquiti Networks, Inc.
HW model:     EdgeRouter X 5-Port
HW S/N:       000000000000
Uptime:       01:00:00 up  1:00,  1 user,  load average: 1.00, 1.00, 1.00
";

const BGP_SUMMARY: &str = "\
BGP router identifier 192.0.2.1, local AS number 64496
BGP table version is 128
1 BGP AS-PATH entries
2 BGP community entries

Neighbor                 V   AS   MsgRcv    MsgSen TblVer   InQ   OutQ    Up/Down   State/PfxRcd
192.0.2.2                4 64497 1000       5000     128      1      5  01:11:11               9
192.0.2.4                4 64497    0          0       0      0      0     never     Connect
2001:db8::2              4 64497 3000       7000     128      3      7  03:33:33              11

Total number of neighbors 3

Total number of Established sessions 2
";

const DDNS: &str = "\
interface    : eth0
ip address   : 192.0.2.1
host-name    : example.com
last update  : Mon Jan  2 15:04:05 2006
update-status: good

";

const WATCHDOG: &str = "\
Group FAILOVER_01
  eth0
  status: OK
  pings: 7777
  fails: 1
  run fails: 0/3
  route drops: 0
  ping gateway: ping.ubnt.com - REACHABLE

";

const PPPOE: &str = "\
Active PPPoE client sessions:

User       Time      Proto Iface   Remote IP       TX pkt/byte   RX pkt/byte
---------- --------- ----- -----   --------------- ------ ------ ------ ------
user01     01h02m03s PPPoE pppoe0  192.0.2.255   384  34.8K   1.2K  58.2K

Total sessions: 1
";

const LINKS: &str = r#"[
    {"ifname": "lo", "operstate": "UNKNOWN", "addr_info": [{"local": "127.0.0.1", "prefixlen": 8}]},
    {"ifname": "eth0", "operstate": "UP", "addr_info": [{"local": "192.0.2.1", "prefixlen": 24}]}
]"#;

/// Serves canned CLI output keyed by the joined command line
#[derive(Default)]
struct FakeExecutor {
    outputs: HashMap<String, String>,
    calls: Mutex<usize>,
}

impl FakeExecutor {
    fn router() -> Self {
        Self::default()
            .with("op show version", VERSION)
            .with("vtysh -c show ip bgp summary", BGP_SUMMARY)
            .with("vtysh -c show bgp ipv6 summary", BGP_SUMMARY)
            .with("op-ddns --show-status", DDNS)
            .with("op show load-balance watchdog", WATCHDOG)
            .with("op show pppoe-client", PPPOE)
            .with("ip --json addr show", LINKS)
    }

    fn with(mut self, command: &str, output: &str) -> Self {
        self.outputs.insert(command.to_string(), output.to_string());
        self
    }
}

impl CommandExecutor for FakeExecutor {
    fn output<'a>(
        &'a self,
        argv: &'a [String],
        _cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<String>> {
        Box::pin(async move {
            *self.calls.lock().unwrap() += 1;
            let command = argv.join(" ");
            self.outputs
                .get(&command)
                .cloned()
                .ok_or(AppError::Execution {
                    command,
                    message: "exit status: 1".to_string(),
                })
        })
    }
}

/// Serves a fixed `list-sas` answer
struct FakeIpsec(Vec<IkeSa>);

impl IpsecSource for FakeIpsec {
    fn security_associations<'a>(
        &'a self,
        _cancel: &'a CancellationToken,
    ) -> BoxFuture<'a, Result<Vec<IkeSa>>> {
        Box::pin(async move { Ok(self.0.clone()) })
    }
}

fn commands() -> CommandConfig {
    CommandConfig {
        op_command: "op".to_string(),
        op_ddns_command: "op-ddns".to_string(),
        vtysh_command: "vtysh".to_string(),
        ip_command: "ip".to_string(),
    }
}

fn state_with(client: EdgeRouterClient) -> Arc<AppState> {
    let config = Config {
        server_addr: "127.0.0.1:9090".to_string(),
        commands: commands(),
        vici_path: "/run/charon.vici".to_string(),
        command_timeout_secs: 30,
    };
    Arc::new(AppState {
        config,
        client,
        shutdown: CancellationToken::new(),
    })
}

fn make_state(executor: Arc<FakeExecutor>) -> Arc<AppState> {
    state_with(EdgeRouterClient::new(commands(), executor))
}

async fn get(state: Arc<AppState>, uri: &str) -> (StatusCode, Option<String>, String) {
    let resp = create_router(state)
        .oneshot(Request::get(uri).body(String::new()).unwrap())
        .await
        .unwrap();

    let status = resp.status();
    let content_type = resp
        .headers()
        .get("content-type")
        .map(|v| v.to_str().unwrap().to_string());
    let body = String::from_utf8(
        resp.into_body()
            .collect()
            .await
            .unwrap()
            .to_bytes()
            .to_vec(),
    )
    .unwrap();
    (status, content_type, body)
}

// --- /metrics endpoint ---

#[tokio::test]
async fn metrics_returns_200_with_openmetrics_content_type() {
    let state = make_state(Arc::new(FakeExecutor::router()));
    let (status, content_type, _) = get(state, "/metrics").await;

    assert_eq!(status, StatusCode::OK);
    let ct = content_type.unwrap();
    assert!(
        ct.contains("openmetrics-text"),
        "Expected OpenMetrics content-type, got: {ct}"
    );
}

#[tokio::test]
async fn metrics_contains_router_reports() {
    let state = make_state(Arc::new(FakeExecutor::router()));
    let (_, _, body) = get(state, "/metrics").await;

    assert!(body.contains(
        r#"edgerouter_info{version="v2.0.6",build_id="5208541",model="EdgeRouter X 5-Port"} 1"#
    ));
    assert!(body.contains(
        r#"edgerouter_bgp_prefix_received_total{neighbor="192.0.2.2",as="64497",table_version="128"} 9"#
    ));
    assert!(body.contains(
        r#"edgerouter_bgp_prefix_received_total{neighbor="2001:db8::2",as="64497",table_version="128"} 11"#
    ));
    assert!(body.contains(
        r#"edgerouter_dynamic_dns_status{interface_name="eth0",ip_address="192.0.2.1",hostname="example.com"} 1"#
    ));
    assert!(body.contains(
        r#"edgerouter_load_balancer_ping_total{group_name="FAILOVER_01",interface_name="eth0"} 7777"#
    ));
    assert!(body.contains(
        r#"edgerouter_pppoe_client_session_transmit_bytes_total{user="user01",protocol="PPPoE",interface_name="pppoe0",ip_address="192.0.2.255"} 35635"#
    ));
    assert!(body.contains("edgerouter_scrape_duration_milliseconds"));
}

#[tokio::test]
async fn metrics_neighbor_appears_once_per_family() {
    let state = make_state(Arc::new(FakeExecutor::router()));
    let (_, _, body) = get(state, "/metrics").await;

    let v4_series = body
        .lines()
        .filter(|l| l.starts_with("edgerouter_bgp_message_sent_total{neighbor=\"192.0.2.2\""))
        .count();
    assert_eq!(v4_series, 1);
}

#[tokio::test]
async fn metrics_are_collected_on_every_request() {
    let executor = Arc::new(FakeExecutor::router());
    let state = make_state(executor.clone());

    get(state.clone(), "/metrics").await;
    get(state, "/metrics").await;

    assert_eq!(*executor.calls.lock().unwrap(), 14);
}

#[tokio::test]
async fn metrics_returns_500_when_a_command_fails() {
    let mut executor = FakeExecutor::router();
    executor.outputs.remove("op-ddns --show-status");
    let state = make_state(Arc::new(executor));

    let (status, _, body) = get(state, "/metrics").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.is_empty());
}

#[tokio::test]
async fn metrics_returns_500_on_malformed_report() {
    let executor = FakeExecutor::router().with(
        "op show load-balance watchdog",
        "Group FAILOVER_01\n  status: OK\n",
    );
    let state = make_state(Arc::new(executor));

    let (status, _, _) = get(state, "/metrics").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn metrics_with_unconfigured_services() {
    let executor = FakeExecutor::router()
        .with("op-ddns --show-status", "Dynamic DNS not configured\n")
        .with(
            "op show load-balance watchdog",
            "load-balance is not configured\n",
        )
        .with("op show pppoe-client", "No active PPPoE client sessions\n");
    let state = make_state(Arc::new(executor));

    let (status, _, body) = get(state, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("edgerouter_dynamic_dns_status{"));
    assert!(!body.contains("edgerouter_load_balancer_health{"));
    assert!(!body.contains("edgerouter_pppoe_client_session_receive_bytes_total{"));
}

#[tokio::test]
async fn metrics_contains_interfaces_and_tunnels() {
    let sa: IkeSa = serde_json::from_str(
        r#"{"uniqueid": 1, "state": "ESTABLISHED", "child-sas": {"office-lan-1": {
            "name": "office-lan", "state": "INSTALLED", "bytes-in": 4096, "bytes-out": 512}}}"#,
    )
    .unwrap();
    let client = EdgeRouterClient::new(commands(), Arc::new(FakeExecutor::router()))
        .with_ipsec(Arc::new(FakeIpsec(vec![sa])));

    let (status, _, body) = get(state_with(client), "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"edgerouter_interface_up{interface_name="eth0"} 1"#));
    assert!(body.contains(r#"edgerouter_interface_up{interface_name="lo"} 0"#));
    assert!(body.contains(
        r#"edgerouter_interface_address_info{interface_name="eth0",address="192.0.2.1",prefix_length="24"} 1"#
    ));
    assert!(body.contains(r#"edgerouter_ipsec_status{tunnel="office-lan"} 0"#));
    assert!(body.contains(r#"edgerouter_ipsec_in_bytes{tunnel="office-lan"} 4096"#));
}

#[tokio::test]
async fn metrics_returns_500_on_non_json_interfaces() {
    let executor = FakeExecutor::router().with("ip --json addr show", "Usage: ip [ OPTIONS ]");
    let state = make_state(Arc::new(executor));

    let (status, _, body) = get(state, "/metrics").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.is_empty());
}

// --- /health endpoints ---

#[tokio::test]
async fn health_returns_200_without_touching_router() {
    let executor = Arc::new(FakeExecutor::default());
    let state = make_state(executor.clone());
    let (status, _, body) = get(state, "/health").await;

    assert_eq!(status, StatusCode::OK);
    let health: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(health["status"], "ok");
    assert_eq!(health["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(*executor.calls.lock().unwrap(), 0);
}

#[tokio::test]
async fn healthz_returns_ok() {
    let state = make_state(Arc::new(FakeExecutor::default()));
    let (status, _, body) = get(state, "/healthz").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

// --- 404 for unknown routes ---

#[tokio::test]
async fn unknown_route_returns_404() {
    let state = make_state(Arc::new(FakeExecutor::default()));
    let (status, _, _) = get(state, "/unknown").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
