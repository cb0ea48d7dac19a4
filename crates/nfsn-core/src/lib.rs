// # nfsn-core
//
// Core library for the NFSN DNS tools.
//
// ## Architecture Overview
//
// - **DnsApi**: Trait for listing, adding and deleting DNS records
// - **IpSource**: Trait for detecting the caller's public IP
// - **DyndnsEngine**: Reconciles one A record with the public IP
// - **Credential**: Login and API key loaded from `~/.nfsn-api`
//
// Concrete implementations live in sibling crates: the signed HTTPS client in
// `nfsn-client` and the IP echo lookup in `nfsn-ip-http`.

pub mod config;
pub mod engine;
pub mod error;
pub mod record;
pub mod traits;

// Re-export core types for convenience
pub use config::{Credential, DyndnsConfig};
pub use engine::{DyndnsEngine, ReconcileOutcome};
pub use error::{Error, Result};
pub use record::DnsRecord;
pub use traits::{DnsApi, IpSource};
