//! rpc-finder: find every reachable RPC node of a network and report the
//! validators exposing their voting power through `/status`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use rpc_finder::{
    render_table, write_report, Crawler, Endpoint, HttpProbe, Report, ScanConfig, SeedSources,
};

/// Recursive RPC peer crawler and exposed-validator scanner
#[derive(Parser, Debug)]
#[command(name = "rpc-finder", version)]
#[command(about = "Crawl /net_info peers and flag validators exposing voting power via /status")]
struct Args {
    /// YAML configuration file
    #[arg(short, long, default_value = "config.yml")]
    config: PathBuf,

    /// Target network id (overrides `network_id`)
    #[arg(long)]
    network: Option<String>,

    /// Worker-pool size (overrides `threads_count`)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Per-request timeout in seconds (overrides `provider_timeout`)
    #[arg(long)]
    timeout: Option<u64>,

    /// Output directory for CSV files (overrides `results_dir`)
    #[arg(long)]
    results_dir: Option<PathBuf>,

    /// Extra seed endpoint, e.g. http://1.2.3.4:26657 (repeatable)
    #[arg(long = "seed")]
    seeds: Vec<String>,

    /// Do not read or download genesis seeds
    #[arg(long)]
    no_genesis: bool,

    /// Debug logging (same as `verbose_mode: true`)
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Command-line flags take precedence over the config file.
    fn apply(&self, config: &mut ScanConfig) {
        if let Some(network) = &self.network {
            config.network_id = network.clone();
        }
        if let Some(threads) = self.threads {
            config.threads_count = threads;
        }
        if let Some(timeout) = self.timeout {
            config.provider_timeout = timeout;
        }
        if let Some(dir) = &self.results_dir {
            config.results_dir = dir.clone();
        }
        if self.no_genesis {
            config.genesis_file_url = None;
        }
        config.verbose_mode |= self.verbose;
    }
}

/// Config file, then flag overrides, then one validation pass.
fn resolve_config(args: &Args) -> Result<ScanConfig> {
    let mut config = ScanConfig::read(&args.config)
        .with_context(|| format!("can't read config file {}", args.config.display()))?;
    args.apply(&mut config);
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = resolve_config(&args)?;

    init_tracing(config.verbose_mode);
    info!(
        version = env!("CARGO_PKG_VERSION"),
        network = %config.network_id,
        threads = config.threads_count,
        "starting scan"
    );

    let probe = HttpProbe::new(config.timeout()).context("failed to build HTTP client")?;
    info!(timeout_ms = probe.timeout().as_millis() as u64, "HTTP probe ready");

    let sources = SeedSources::from_config(&config);
    let mut seeds = if args.no_genesis {
        sources.read_rpc_file()?
    } else {
        sources.load(&probe).await?
    };
    for raw in &args.seeds {
        seeds.insert(Endpoint::parse(raw).with_context(|| format!("bad --seed {raw:?}"))?);
    }
    if seeds.is_empty() {
        warn!("seed set is empty, nothing to crawl");
    }

    let crawler = Crawler::new(probe, config);
    let outcome = crawler.scan(seeds).await;

    println!("Found {} peers", outcome.crawl.visited.len());

    let mut report = Report::build(outcome.classification.records);
    report
        .vulnerable
        .sort_by(|a, b| b.voting_power.cmp(&a.voting_power).then_with(|| a.endpoint.cmp(&b.endpoint)));

    let results_dir = &crawler.config().results_dir;
    let artifacts = write_report(results_dir, &report)
        .with_context(|| format!("failed to write results to {}", results_dir.display()))?;

    if report.has_vulnerable() {
        println!("{}", render_table(&report.vulnerable));
        println!("{}", report.summary());
        println!("Check file: {}", artifacts.vulnerable.display());
    } else {
        println!("Vulnerable validators not found");
    }
    println!("All available nodes: {}", artifacts.valid_rpc.display());

    Ok(())
}
