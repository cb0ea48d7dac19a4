// # DNS API Trait
//
// Defines the narrow DNS operation set offered by the provider.
//
// ## Implementations
//
// - NFSN: `nfsn-client` crate (`NfsnClient`)
// - Test doubles: `tests/common/mod.rs`
//
// ## Usage
//
// ```rust,ignore
// use nfsn_core::{DnsApi, DnsRecord};
//
// async fn show(api: &dyn DnsApi) -> nfsn_core::Result<()> {
//     for record in api.list_records("example.com").await? {
//         println!("{}", record);
//     }
//     api.add_record("example.com", &DnsRecord::new("www", "A", "1.2.3.4").with_ttl(300))
//         .await?;
//     Ok(())
// }
// ```

use async_trait::async_trait;

use crate::record::DnsRecord;

/// Trait for DNS record APIs
///
/// Each method performs exactly one remote call. Implementations do not
/// retry, cache or batch; composite operations (delete then add) are the
/// caller's responsibility, including recovery from partial failure.
///
/// # Thread Safety
///
/// Implementations must be thread-safe and usable across async tasks.
#[async_trait]
pub trait DnsApi: Send + Sync {
    /// List every record of `domain`
    async fn list_records(&self, domain: &str) -> Result<Vec<DnsRecord>, crate::Error>;

    /// Add `record` to `domain`
    ///
    /// The TTL is only sent when it is greater than zero.
    async fn add_record(&self, domain: &str, record: &DnsRecord) -> Result<(), crate::Error>;

    /// Delete the record of `domain` matching `record`'s name, type and data
    async fn delete_record(&self, domain: &str, record: &DnsRecord) -> Result<(), crate::Error>;

    /// Get the API name (for logging/debugging)
    fn api_name(&self) -> &'static str;
}
