//! Listener settings for the restservice router
//!
//! Read from the `http` section of the service config file. Omitted keys keep
//! the loopback defaults so a bare `{}` serves on `127.0.0.1:8080`.

use serde::{Deserialize, Serialize};

/// Where the resource is served and which browser origins may call it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Bind address (default: "127.0.0.1")
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port (default: 8080)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins allowed to call `/api/restservice` cross-site. Empty allows any.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl HttpServerConfig {
    /// Loopback defaults on `port`
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// `host:port` as handed to the listener
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
