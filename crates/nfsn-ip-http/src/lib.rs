// # HTTP IP Source
//
// This crate provides an HTTP-based public IP source for the dyndns updater.
//
// ## Architecture
//
// Asks an IP echo service (ipify by default) for the caller's address. The
// service must answer with JSON of the form:
//
// ```json
// {"ip": "203.0.113.7"}
// ```
//
// Only IPv4 answers are accepted, since the updater manages an A record.
//
// One GET per lookup; no polling, retry or caching.

use nfsn_core::traits::IpSource;
use nfsn_core::{Error, Result};
use serde::Deserialize;

use std::net::IpAddr;
use std::time::Duration;

/// Default IP echo service
pub const DEFAULT_IP_SERVICE: &str = "https://api.ipify.org?format=json";

/// HTTP timeout for IP lookups
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct EchoResponse {
    ip: String,
}

/// HTTP-based public IP source
#[derive(Debug)]
pub struct HttpIpSource {
    /// URL to fetch IP from
    url: String,

    /// HTTP client
    client: reqwest::Client,
}

impl Default for HttpIpSource {
    fn default() -> Self {
        Self::new(DEFAULT_IP_SERVICE)
    }
}

impl HttpIpSource {
    /// Create a new HTTP IP source
    ///
    /// # Parameters
    ///
    /// - `url`: URL of a JSON echo service (e.g., "https://api.ipify.org?format=json")
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::builder()
                .timeout(DEFAULT_HTTP_TIMEOUT)
                .build()
                .unwrap_or_default(),
        }
    }

    /// URL this source queries
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch current IP from the echo service
    async fn fetch_ip(&self) -> Result<IpAddr> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::ip_source(format!("Request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::ip_source(format!("reading response: {}", e)))?;

        if !status.is_success() {
            return Err(Error::ip_source(format!("HTTP error: {}: {}", status, body)));
        }

        let echo: EchoResponse = serde_json::from_str(&body)
            .map_err(|e| Error::ip_source(format!("Bad JSON response: {}", e)))?;

        let ip_text = echo.ip.trim();
        let ip: IpAddr = ip_text
            .parse()
            .map_err(|_| Error::ip_source(format!("Invalid IP address: {}", ip_text)))?;

        match ip {
            IpAddr::V4(_) => Ok(ip),
            IpAddr::V6(_) => Err(Error::ip_source(format!("Not an IPv4 address: {}", ip_text))),
        }
    }
}

#[async_trait::async_trait]
impl IpSource for HttpIpSource {
    async fn current(&self) -> Result<IpAddr> {
        let ip = self.fetch_ip().await?;
        tracing::debug!("Echo service {} reported {}", self.url, ip);
        Ok(ip)
    }

    fn source_name(&self) -> &'static str {
        "http"
    }
}
