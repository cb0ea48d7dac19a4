//! Core traits for the NFSN DNS tools
//!
//! These are the seams between the dyndns engine and the outside world.
//!
//! - [`DnsApi`]: List, add and delete DNS records
//! - [`IpSource`]: Detect the caller's current public IP

pub mod dns_api;
pub mod ip_source;

pub use dns_api::DnsApi;
pub use ip_source::IpSource;
