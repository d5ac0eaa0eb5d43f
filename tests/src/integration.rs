//! Integration tests over real HTTP.

pub mod nodes;

#[cfg(test)]
mod e2e_scan;
