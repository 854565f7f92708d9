//! Gateway configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for the gateway and its HTTP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Listen port for the HTTP server.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Per-engine fetch timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Public base URL advertised in the OpenSearch descriptor.
    /// Defaults to `http://localhost:<port>`.
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_port() -> u16 {
    8000
}

fn default_timeout() -> u64 {
    10
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            timeout_seconds: default_timeout(),
            base_url: None,
        }
    }
}

impl GatewayConfig {
    /// The per-engine fetch timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// The externally visible base URL of this service.
    pub fn public_base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| format!("http://localhost:{}", self.port))
    }
}
