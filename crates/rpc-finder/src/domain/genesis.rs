//! Seed extraction from genesis documents.
//!
//! Genesis files carry validator `persistent_peers`/memo strings such as
//! `id@1.2.3.4:26656`. We only need the public IPv4 addresses.

use std::collections::BTreeSet;
use std::net::Ipv4Addr;
use std::sync::LazyLock;

use regex::Regex;

use super::endpoint::Endpoint;

static DOTTED_QUAD: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}").ok());

/// True for addresses reachable on the public internet.
pub fn is_public_ipv4(ip: Ipv4Addr) -> bool {
    let [a, b, c, _] = ip.octets();
    let this_network = a == 0;
    let shared = a == 100 && (64..128).contains(&b);
    let benchmarking = a == 198 && (b == 18 || b == 19);
    let ietf_protocol = a == 192 && b == 0 && c == 0;
    let reserved = a >= 240;

    !(ip.is_private()
        || ip.is_loopback()
        || ip.is_link_local()
        || this_network
        || ip.is_broadcast()
        || ip.is_documentation()
        || shared
        || benchmarking
        || ietf_protocol
        || reserved)
}

/// Public IPv4 addresses found anywhere in `text`. Matches that are not
/// valid addresses (e.g. `999.1.1.1`) are dropped.
pub fn extract_genesis_ips(text: &str) -> BTreeSet<Ipv4Addr> {
    DOTTED_QUAD
        .iter()
        .flat_map(|pattern| pattern.find_iter(text))
        .filter_map(|m| m.as_str().parse::<Ipv4Addr>().ok())
        .filter(|ip| is_public_ipv4(*ip))
        .collect()
}

/// Seed endpoints on `port` for every public IP in `text`.
pub fn genesis_endpoints(text: &str, port: u16) -> BTreeSet<Endpoint> {
    extract_genesis_ips(text)
        .into_iter()
        .map(|ip| Endpoint::from_ip_port(&ip.to_string(), port))
        .collect()
}
