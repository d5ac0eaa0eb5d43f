//! Mock Tendermint RPC nodes backed by `wiremock`.

use std::time::Duration;

use rpc_finder::testing::{net_info_body, status_body};
use rpc_finder::{Endpoint, NET_INFO_PATH, STATUS_PATH};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// One local node listening on an ephemeral loopback port.
pub struct MockNode {
    server: MockServer,
}

impl MockNode {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Start `count` nodes.
    pub async fn start_many(count: usize) -> Vec<Self> {
        let mut nodes = Vec::with_capacity(count);
        for _ in 0..count {
            nodes.push(Self::start().await);
        }
        nodes
    }

    pub fn port(&self) -> u16 {
        self.server.address().port()
    }

    /// `http://127.0.0.1:{port}`, exactly what a peer's `/net_info` entry maps to.
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::from_ip_port("127.0.0.1", self.port())
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Answer `/net_info` (JSON accept header required) with `peers`.
    pub async fn serve_peers(&self, peers: &[&MockNode], delay: Option<Duration>) {
        let addresses: Vec<String> = peers
            .iter()
            .map(|p| format!("tcp://0.0.0.0:{}", p.port()))
            .collect();
        let entries: Vec<(&str, &str)> = addresses
            .iter()
            .map(|rpc| ("127.0.0.1", rpc.as_str()))
            .collect();

        let mut response = ResponseTemplate::new(200).set_body_string(net_info_body(&entries));
        if let Some(delay) = delay {
            response = response.set_delay(delay);
        }

        Mock::given(method("GET"))
            .and(path(NET_INFO_PATH))
            .and(header("accept", "application/json"))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }

    /// Answer `/status` as a node on `network`.
    pub async fn serve_status(&self, network: &str, voting_power: i64, delay: Option<Duration>) {
        let moniker = format!("node-{}", self.port());
        let mut response =
            ResponseTemplate::new(200).set_body_string(status_body(network, &moniker, voting_power));
        if let Some(delay) = delay {
            response = response.set_delay(delay);
        }

        Mock::given(method("GET"))
            .and(path(STATUS_PATH))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }

    /// Answer `route` with a bare HTTP status.
    pub async fn serve_status_code(&self, route: &str, code: u16) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(code))
            .mount(&self.server)
            .await;
    }

    /// Answer `route` with an arbitrary 200 body.
    pub async fn serve_body(&self, route: &str, body: &str) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_string(body.to_string()))
            .mount(&self.server)
            .await;
    }
}
