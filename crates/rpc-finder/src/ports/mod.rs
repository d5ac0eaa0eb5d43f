//! # Ports Layer
//!
//! Trait definitions for external dependencies.

pub mod outbound;

pub use outbound::{NodeProbe, ProbeError, ProbeResult, TimeSource, NET_INFO_PATH, STATUS_PATH};
