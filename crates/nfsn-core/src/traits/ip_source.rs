// # IP Source Trait
//
// Defines the interface for detecting the caller's current public IP.
//
// ## Implementations
//
// - HTTP echo service: `nfsn-ip-http` crate
//
// ## Usage
//
// ```rust,ignore
// use nfsn_core::IpSource;
//
// async fn show(source: &dyn IpSource) -> nfsn_core::Result<()> {
//     let ip = source.current().await?;
//     println!("Public IP: {}", ip);
//     Ok(())
// }
// ```

use async_trait::async_trait;
use std::net::IpAddr;

/// Trait for IP source implementations
///
/// Implementations must be thread-safe and usable across async tasks.
/// A lookup is a single attempt: no polling, no retry, no caching.
#[async_trait]
pub trait IpSource: Send + Sync {
    /// Get the current public IP address
    ///
    /// # Returns
    ///
    /// - `Ok(IpAddr)`: The current IP address
    /// - `Err(Error)`: If unable to determine the current IP
    async fn current(&self) -> Result<IpAddr, crate::Error>;

    /// Get the source name (for logging/debugging)
    fn source_name(&self) -> &'static str {
        "unknown"
    }
}
