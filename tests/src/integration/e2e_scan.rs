//! End-to-end scans over real HTTP against local mock nodes.

use std::collections::BTreeSet;
use std::time::Duration;

use rpc_finder::testing::FixedTimeSource;
use rpc_finder::{
    write_report, Crawler, Endpoint, HttpProbe, NodeProbe, Report, ScanConfig, SeedSources,
    NET_INFO_PATH, STATUS_PATH,
};

use super::nodes::MockNode;

const NETWORK: &str = "odyssey-0";

fn config(threads: usize) -> ScanConfig {
    ScanConfig {
        network_id: NETWORK.to_string(),
        threads_count: threads,
        ..ScanConfig::default()
    }
}

fn crawler(timeout: Duration) -> Crawler<HttpProbe, FixedTimeSource> {
    let probe = HttpProbe::new(timeout).unwrap();
    Crawler::with_time_source(probe, FixedTimeSource::from_secs(1_700_000_000), config(4))
}

// =============================================================================
// FULL SCAN
// =============================================================================

#[tokio::test]
async fn test_cycle_of_three_nodes_is_crawled_and_classified() {
    let nodes = MockNode::start_many(3).await;
    let (a, b, c) = (&nodes[0], &nodes[1], &nodes[2]);

    a.serve_peers(&[b], None).await;
    b.serve_peers(&[c], None).await;
    c.serve_peers(&[a], None).await;

    a.serve_status(NETWORK, 10, None).await;
    b.serve_status(NETWORK, 0, None).await;
    c.serve_status("other-chain", 99, None).await;

    let crawler = crawler(Duration::from_secs(5));
    let outcome = crawler.scan([a.endpoint()]).await;

    let expected: BTreeSet<Endpoint> = nodes.iter().map(MockNode::endpoint).collect();
    assert_eq!(outcome.crawl.visited, expected);
    assert_eq!(outcome.crawl.round_count(), 3);

    assert_eq!(outcome.classification.probed, 3);
    assert_eq!(outcome.classification.records.len(), 2);
    assert_eq!(outcome.classification.unavailable, 1);

    let report = outcome.report();
    assert_eq!(report.available.len(), 2);
    assert_eq!(report.vulnerable.len(), 1);
    assert_eq!(report.vulnerable[0].endpoint, a.endpoint());
    assert_eq!(report.affected_stake, 10);

    let dir = tempfile::tempdir().unwrap();
    let artifacts = write_report(dir.path(), &report).unwrap();

    let valid = std::fs::read_to_string(&artifacts.valid_rpc).unwrap();
    assert_eq!(valid.lines().count(), 3);
    let cell = |node: &MockNode| format!("{},", node.endpoint());
    assert!(valid.contains(&cell(a)));
    assert!(valid.contains(&cell(b)));
    assert!(!valid.contains(&cell(c)));

    let vulnerable = std::fs::read_to_string(&artifacts.vulnerable).unwrap();
    assert_eq!(vulnerable.lines().count(), 2);
    assert!(vulnerable.contains(&format!("node-{}", a.port())));
}

#[tokio::test]
async fn test_slow_node_times_out_and_crawl_still_terminates() {
    let nodes = MockNode::start_many(3).await;
    let (a, b, c) = (&nodes[0], &nodes[1], &nodes[2]);

    a.serve_peers(&[b, c], None).await;
    b.serve_peers(&[a], Some(Duration::from_secs(3))).await;
    c.serve_peers(&[], None).await;

    a.serve_status(NETWORK, 1, None).await;
    b.serve_status(NETWORK, 2, Some(Duration::from_secs(3))).await;
    c.serve_status(NETWORK, 0, None).await;

    let crawler = crawler(Duration::from_millis(300));
    let outcome = crawler.scan([a.endpoint()]).await;

    assert_eq!(outcome.crawl.visited.len(), 3);
    assert_eq!(outcome.crawl.round_count(), 2);
    assert_eq!(outcome.crawl.rounds[1].failed, 1);

    let endpoints: Vec<&Endpoint> = outcome
        .classification
        .records
        .iter()
        .map(|r| &r.endpoint)
        .collect();
    assert!(!endpoints.contains(&&b.endpoint()));
    assert_eq!(outcome.classification.unavailable, 1);
    assert_eq!(outcome.report().affected_stake, 1);
}

#[tokio::test]
async fn test_error_statuses_are_absorbed() {
    let nodes = MockNode::start_many(3).await;
    let (a, b, c) = (&nodes[0], &nodes[1], &nodes[2]);

    a.serve_peers(&[b, c], None).await;
    b.serve_status_code(NET_INFO_PATH, 500).await;
    b.serve_status_code(STATUS_PATH, 500).await;
    // c serves nothing: every route answers 404.

    a.serve_status(NETWORK, 7, None).await;

    let crawler = crawler(Duration::from_secs(5));
    let outcome = crawler.scan([a.endpoint()]).await;

    assert_eq!(outcome.crawl.visited.len(), 3);
    assert_eq!(outcome.crawl.rounds[1].failed, 2);
    assert_eq!(outcome.classification.records.len(), 1);
    assert_eq!(outcome.classification.records[0].endpoint, a.endpoint());
}

#[tokio::test]
async fn test_non_rpc_body_is_not_available() {
    let node = MockNode::start().await;
    node.serve_body(NET_INFO_PATH, "<html>not a node</html>").await;
    node.serve_body(STATUS_PATH, "<html>not a node</html>").await;

    let crawler = crawler(Duration::from_secs(5));
    let outcome = crawler.scan([node.endpoint()]).await;

    assert_eq!(outcome.crawl.visited.len(), 1);
    assert_eq!(outcome.crawl.rounds[0].failed, 0);
    assert!(outcome.classification.records.is_empty());
    assert!(!Report::build(outcome.classification.records).has_vulnerable());
}

// =============================================================================
// HTTP PROBE
// =============================================================================

#[tokio::test]
async fn test_probe_sends_json_accept_header() {
    let node = MockNode::start().await;
    node.serve_peers(&[], None).await;

    let probe = HttpProbe::new(Duration::from_secs(5)).unwrap();
    let body = probe.probe(&node.endpoint(), NET_INFO_PATH).await.unwrap();

    assert!(body.contains("\"peers\""));
}

#[tokio::test]
async fn test_probe_reports_http_status() {
    let node = MockNode::start().await;
    node.serve_status_code(STATUS_PATH, 503).await;

    let probe = HttpProbe::new(Duration::from_secs(5)).unwrap();
    let err = probe.probe(&node.endpoint(), STATUS_PATH).await.unwrap_err();

    assert_eq!(err, rpc_finder::ProbeError::Status(503));
}

// =============================================================================
// GENESIS SEEDS
// =============================================================================

#[tokio::test]
async fn test_genesis_download_is_filtered_and_cached() {
    let node = MockNode::start().await;
    node.serve_body(
        "/genesis.json",
        r#"{"gentxs":[{"memo":"abc@10.0.0.1:26656"},{"memo":"def@8.8.8.8:26656"},{"memo":"ghi@1.1.1.1:26656"}]}"#,
    )
    .await;

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("rpc.txt"), "http://9.9.9.9:26657\n").unwrap();
    let sources = SeedSources {
        rpc_file: dir.path().join("rpc.txt"),
        genesis_url: Some(format!("{}/genesis.json", node.uri())),
        genesis_cache: dir.path().join("genesis_ips.txt"),
        default_rpc_port: 26657,
    };
    let probe = HttpProbe::new(Duration::from_secs(5)).unwrap();

    let seeds = sources.load(&probe).await.unwrap();

    let expected: BTreeSet<Endpoint> = [
        Endpoint::from_ip_port("1.1.1.1", 26657),
        Endpoint::from_ip_port("8.8.8.8", 26657),
        Endpoint::from_ip_port("9.9.9.9", 26657),
    ]
    .into_iter()
    .collect();
    assert_eq!(seeds, expected);

    let cache = std::fs::read_to_string(dir.path().join("genesis_ips.txt")).unwrap();
    assert_eq!(cache, "http://1.1.1.1:26657\nhttp://8.8.8.8:26657\n");
}
