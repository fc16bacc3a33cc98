//! Common utilities shared across examples.

#![allow(dead_code)]

use std::env;
use std::net::Ipv4Addr;

/// Default multicast group for the demo feed.
pub const DEFAULT_GROUP: &str = "239.255.0.17";

/// Default UDP port for the demo feed.
pub const DEFAULT_PORT: u16 = 30017;

/// Demo feed endpoints loaded from environment variables.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    /// Multicast group address.
    pub group: Ipv4Addr,
    /// UDP port.
    pub port: u16,
    /// Listen interface; `0.0.0.0` lets the OS choose.
    pub interface: Ipv4Addr,
}

impl DemoConfig {
    /// Reads `FEED_GROUP`, `FEED_PORT` and `FEED_INTERFACE`, falling back
    /// to the demo defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        let group = env::var("FEED_GROUP")
            .unwrap_or_else(|_| DEFAULT_GROUP.to_string())
            .parse()?;
        let port = env::var("FEED_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let interface = env::var("FEED_INTERFACE")
            .unwrap_or_else(|_| "0.0.0.0".to_string())
            .parse()?;
        Ok(Self {
            group,
            port,
            interface,
        })
    }
}

/// Initializes logging for examples.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .try_init();
}
