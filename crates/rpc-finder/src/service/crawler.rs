//! Frontier Crawler.
//!
//! Two phases, each a sequence of barrier-separated rounds:
//!
//! 1. **Discovery.** Probe `/net_info` on every frontier endpoint with at
//!    most `threads_count` requests in flight. When the whole round has
//!    drained, the next frontier is every reported endpoint not already in
//!    `visited`. Stops when a round reports nothing new.
//! 2. **Classification.** Probe `/status` once on every visited endpoint.
//!
//! `visited` lives on the driving task only and is touched between rounds;
//! per-endpoint work is a pure function of the endpoint and the probe.

use std::collections::BTreeSet;

use futures::stream::{self, StreamExt};
use tracing::{debug, info};

use crate::adapters::SystemTimeSource;
use crate::domain::{
    classify, extract_peers, Classification, Endpoint, Report, ScanConfig, Unavailable,
    ValidatorRecord,
};
use crate::ports::{NodeProbe, ProbeError, TimeSource, NET_INFO_PATH, STATUS_PATH};

/// What one discovery round did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundSummary {
    /// 1-based round number.
    pub round: usize,
    /// Endpoints probed this round (frontier size).
    pub probed: usize,
    /// Probes that failed outright.
    pub failed: usize,
    /// Distinct endpoints reported by the frontier.
    pub reported: usize,
    /// Reported endpoints never seen before; the next frontier.
    pub new: usize,
    /// Size of `visited` after the round.
    pub visited: usize,
}

/// Result of the discovery phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlOutcome {
    /// Seeds plus every endpoint any node reported.
    pub visited: BTreeSet<Endpoint>,
    pub rounds: Vec<RoundSummary>,
}

impl CrawlOutcome {
    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }
}

/// Result of the classification phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifyOutcome {
    /// Available records, ordered by endpoint.
    pub records: Vec<ValidatorRecord>,
    pub probed: usize,
    pub unavailable: usize,
}

/// Both phases together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    pub crawl: CrawlOutcome,
    pub classification: ClassifyOutcome,
}

impl ScanOutcome {
    pub fn report(&self) -> Report {
        Report::build(self.classification.records.clone())
    }
}

/// Breadth-first crawler over the RPC peer graph.
pub struct Crawler<P, T = SystemTimeSource> {
    probe: P,
    clock: T,
    config: ScanConfig,
}

impl<P: NodeProbe> Crawler<P, SystemTimeSource> {
    /// Crawler stamping records with the system clock.
    pub fn new(probe: P, config: ScanConfig) -> Self {
        Self::with_time_source(probe, SystemTimeSource::new(), config)
    }
}

impl<P: NodeProbe, T: TimeSource> Crawler<P, T> {
    pub fn with_time_source(probe: P, clock: T, config: ScanConfig) -> Self {
        Self {
            probe,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    fn workers(&self) -> usize {
        self.config.threads_count.max(1)
    }

    /// Run discovery from `seeds`, then classify everything found.
    pub async fn scan<I>(&self, seeds: I) -> ScanOutcome
    where
        I: IntoIterator<Item = Endpoint>,
    {
        let crawl = self.discover(seeds).await;
        let classification = self.classify(&crawl.visited).await;
        ScanOutcome {
            crawl,
            classification,
        }
    }

    /// Phase A: expand the peer graph until no round finds a new endpoint.
    pub async fn discover<I>(&self, seeds: I) -> CrawlOutcome
    where
        I: IntoIterator<Item = Endpoint>,
    {
        let mut visited: BTreeSet<Endpoint> = seeds.into_iter().collect();
        let mut frontier: BTreeSet<Endpoint> = visited.clone();
        let mut rounds = Vec::new();

        info!(seeds = visited.len(), "searching for peer IPs and their RPC ports");

        while !frontier.is_empty() {
            let round = rounds.len() + 1;

            // Barrier: collect() resolves only once every probe in the round has finished.
            let results: Vec<Result<BTreeSet<Endpoint>, ProbeError>> = stream::iter(&frontier)
                .map(|endpoint| self.peers_of(endpoint))
                .buffer_unordered(self.workers())
                .collect()
                .await;

            let failed = results.iter().filter(|r| r.is_err()).count();
            let discovered: BTreeSet<Endpoint> = results.into_iter().flatten().flatten().collect();

            let next: BTreeSet<Endpoint> = discovered.difference(&visited).cloned().collect();
            visited.extend(next.iter().cloned());

            let summary = RoundSummary {
                round,
                probed: frontier.len(),
                failed,
                reported: discovered.len(),
                new: next.len(),
                visited: visited.len(),
            };
            info!(
                round,
                probed = summary.probed,
                failed,
                reported = summary.reported,
                new = summary.new,
                visited = summary.visited,
                "discovery round complete"
            );
            rounds.push(summary);

            frontier = next;
        }

        info!(peers = visited.len(), rounds = rounds.len(), "peer discovery finished");
        CrawlOutcome { visited, rounds }
    }

    /// Phase B: probe `/status` on every endpoint and keep the available records.
    pub async fn classify(&self, endpoints: &BTreeSet<Endpoint>) -> ClassifyOutcome {
        info!(
            endpoints = endpoints.len(),
            network = %self.config.network_id,
            "searching for vulnerable validators"
        );

        let classifications: Vec<Classification> = stream::iter(endpoints)
            .map(|endpoint| self.classify_one(endpoint))
            .buffer_unordered(self.workers())
            .collect()
            .await;

        let probed = classifications.len();
        let mut records: Vec<ValidatorRecord> = classifications
            .into_iter()
            .filter_map(Classification::into_record)
            .collect();
        records.sort_by(|a, b| a.endpoint.cmp(&b.endpoint));
        let unavailable = probed - records.len();

        info!(probed, available = records.len(), unavailable, "classification finished");
        ClassifyOutcome {
            records,
            probed,
            unavailable,
        }
    }

    async fn peers_of(&self, endpoint: &Endpoint) -> Result<BTreeSet<Endpoint>, ProbeError> {
        match self.probe.probe(endpoint, NET_INFO_PATH).await {
            Ok(body) => {
                let peers = extract_peers(&body, self.config.default_rpc_port);
                debug!(%endpoint, peers = peers.len(), "net_info");
                Ok(peers)
            }
            Err(err) => {
                debug!(%endpoint, error = %err, "net_info probe failed");
                Err(err)
            }
        }
    }

    async fn classify_one(&self, endpoint: &Endpoint) -> Classification {
        let classification = match self.probe.probe(endpoint, STATUS_PATH).await {
            Ok(body) => classify(endpoint, &body, &self.config.network_id, self.clock.now()),
            Err(err) => Classification::Unavailable(Unavailable::ProbeFailed(err.to_string())),
        };
        if let Classification::Unavailable(reason) = &classification {
            debug!(%endpoint, %reason, "rpc not available");
        }
        classification
    }
}
