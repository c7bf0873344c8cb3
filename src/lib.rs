//! blockstore-ingester: configuration bootstrap for the block storage ingester
//!
//! Locates the config file among the command-line arguments, loads it with
//! optional environment expansion, merges it strictly into [`config::Config`]
//! and publishes a fingerprint of the file as a Prometheus gauge.

pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod metrics;
pub mod utils;
