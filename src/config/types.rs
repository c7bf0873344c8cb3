//! Ingester configuration schema
//!
//! Every struct is `deny_unknown_fields`: a key in the YAML document that has
//! no field here is a load error at any nesting level. Fields missing from the
//! document keep whatever value the target already held.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Module to run.
    pub target: String,
    /// Require a tenant ID on incoming requests.
    pub auth_enabled: bool,
    /// Prefix for all HTTP endpoints.
    pub http_prefix: String,
    pub server: ServerConfig,
    pub ingester: IngesterConfig,
    pub blocks_storage: BlocksStorageConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target: "ingester".to_string(),
            auth_enabled: true,
            http_prefix: "/api/prom".to_string(),
            server: ServerConfig::default(),
            ingester: IngesterConfig::default(),
            blocks_storage: BlocksStorageConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub http_listen_address: String,
    pub http_listen_port: u16,
    pub grpc_listen_address: String,
    pub grpc_listen_port: u16,
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_listen_address: String::new(),
            http_listen_port: 80,
            grpc_listen_address: String::new(),
            grpc_listen_port: 9095,
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IngesterConfig {
    pub lifecycler: LifecyclerConfig,
    pub max_transfer_retries: u32,
}

impl Default for IngesterConfig {
    fn default() -> Self {
        Self { lifecycler: LifecyclerConfig::default(), max_transfer_retries: 10 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LifecyclerConfig {
    pub num_tokens: u32,
    pub join_after: String,
    pub final_sleep: String,
    pub address: String,
}

impl Default for LifecyclerConfig {
    fn default() -> Self {
        Self {
            num_tokens: 128,
            join_after: "0s".to_string(),
            final_sleep: "30s".to_string(),
            address: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BlocksStorageConfig {
    /// Object store backend: s3, gcs, azure, swift or filesystem.
    pub backend: String,
    pub tsdb: TsdbConfig,
    pub filesystem: FilesystemConfig,
}

impl Default for BlocksStorageConfig {
    fn default() -> Self {
        Self {
            backend: "s3".to_string(),
            tsdb: TsdbConfig::default(),
            filesystem: FilesystemConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TsdbConfig {
    /// Local directory holding TSDB blocks before they are shipped.
    pub dir: PathBuf,
    pub block_ranges_period: Vec<String>,
    pub retention_period: String,
    pub ship_interval: String,
}

impl Default for TsdbConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("tsdb"),
            block_ranges_period: vec!["2h".to_string()],
            retention_period: "6h".to_string(),
            ship_interval: "1m".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilesystemConfig {
    pub dir: PathBuf,
}
