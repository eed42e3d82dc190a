use crate::config::ServerConfig;
use crate::error::ServerResult;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::Lazy;
use std::sync::Arc;
use string_analyzer::StringAnalyzer;

/// Process-wide Prometheus recorder; a second install in one process fails,
/// so every state shares this handle.
static PROMETHEUS: Lazy<Option<PrometheusHandle>> =
    Lazy::new(|| match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => Some(handle),
        Err(err) => {
            tracing::warn!("Prometheus recorder unavailable: {err}");
            None
        }
    });

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Analyzer service (store + parser), shared across requests
    pub analyzer: Arc<StringAnalyzer>,

    /// Metrics renderer, present when metrics are enabled
    pub metrics: Option<PrometheusHandle>,
}

impl ServerState {
    /// Create new server state, opening the configured storage backend
    pub fn new(config: ServerConfig) -> ServerResult<Self> {
        let backend = config.storage.backend_config();
        let analyzer = Arc::new(StringAnalyzer::new(&backend)?);

        let metrics = if config.metrics_enabled {
            PROMETHEUS.clone()
        } else {
            None
        };

        Ok(Self {
            config: Arc::new(config),
            analyzer,
            metrics,
        })
    }
}

/// Server metadata for health checks
#[derive(Debug, serde::Serialize)]
pub struct ServerMetadata {
    pub version: String,
    pub uptime_seconds: u64,
}
