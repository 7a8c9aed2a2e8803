//! API configuration.

use common::{DatabaseConfig, ServiceConfig};

/// Everything the HTTP server needs at startup.
#[derive(Debug, Clone, Default)]
pub struct ApiConfig {
    pub service: ServiceConfig,
    pub database: DatabaseConfig,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            service: ServiceConfig::from_env(),
            database: DatabaseConfig::from_env(),
        }
    }

    /// Apply `--host` / `--port` from the command line.
    pub fn with_overrides(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.service.host = host;
        }
        if let Some(port) = port {
            self.service.port = port;
        }
        self
    }
}
