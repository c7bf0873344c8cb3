//! Prometheus metrics for the ingester bootstrap.
//!
//! ## Metrics
//!
//! **Gauges:**
//! - `cortex_config_hash{sha256}` — fingerprint of the currently active config
//!   file, always 1. Exactly one label value is present after a config file
//!   has been read; every new observation clears the previous one.
//!
//! The gauge lives in a caller-supplied [`Registry`] rather than the
//! prometheus default registry, so tests can assert label transitions on an
//! isolated sink.

use prometheus::core::Collector;
use prometheus::{Encoder, IntGaugeVec, Opts, Registry, TextEncoder};

/// Metric name of the config fingerprint gauge.
pub const CONFIG_HASH_METRIC: &str = "cortex_config_hash";

/// Label carrying the hex fingerprint.
pub const CONFIG_HASH_LABEL: &str = "sha256";

/// Gauge recording the fingerprint of the last config file read from disk.
#[derive(Clone)]
pub struct ConfigHashGauge {
    gauge: IntGaugeVec,
}

impl ConfigHashGauge {
    /// Create the gauge and register it with `registry`.
    pub fn new(registry: &Registry) -> Result<Self, prometheus::Error> {
        let gauge = IntGaugeVec::new(
            Opts::new(CONFIG_HASH_METRIC, "Hash of the currently active config file."),
            &[CONFIG_HASH_LABEL],
        )?;
        registry.register(Box::new(gauge.clone()))?;
        Ok(Self { gauge })
    }

    /// Replace whatever fingerprint is currently recorded with `fingerprint`.
    pub fn observe(&self, fingerprint: &str) {
        self.gauge.reset();
        self.gauge.with_label_values(&[fingerprint]).set(1);
    }

    /// Fingerprints currently carried by the gauge.
    pub fn active(&self) -> Vec<String> {
        self.gauge
            .collect()
            .iter()
            .flat_map(|family| family.get_metric().iter())
            .flat_map(|metric| metric.get_label().iter())
            .filter(|label| label.get_name() == CONFIG_HASH_LABEL)
            .map(|label| label.get_value().to_string())
            .collect()
    }
}

/// Render every metric in `registry` in the Prometheus text exposition format.
pub fn encode_text(registry: &Registry) -> Result<String, prometheus::Error> {
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&registry.gather(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}
