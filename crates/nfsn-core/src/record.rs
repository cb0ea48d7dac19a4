//! DNS resource record model

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Record type for IPv4 address records
pub const RECORD_TYPE_A: &str = "A";

/// Record type of an alias; it cannot share its name with any other record
pub const RECORD_TYPE_CNAME: &str = "CNAME";

/// One DNS resource record scoped to a domain
///
/// There is no provider-side ID; a record is identified by its
/// `(name, type, data)` tuple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    /// Record name relative to the domain, e.g. "www" ("" for the apex)
    pub name: String,

    /// Record type, e.g. "A", "CNAME", "NS"
    #[serde(rename = "type")]
    pub record_type: String,

    /// IP for A, FQDN for CNAME and NS
    pub data: String,

    /// Time-to-live in seconds
    #[serde(default, deserialize_with = "deserialize_ttl", skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,

    /// Who owns the record ("system" or "member"), as reported by the provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl DnsRecord {
    /// Create a new record without a TTL
    pub fn new(
        name: impl Into<String>,
        record_type: impl Into<String>,
        data: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            record_type: record_type.into(),
            data: data.into(),
            ttl: None,
            scope: None,
        }
    }

    /// Set the TTL
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Whether this is an A record
    pub fn is_a(&self) -> bool {
        self.record_type == RECORD_TYPE_A
    }

    /// Whether this is a CNAME record
    pub fn is_cname(&self) -> bool {
        self.record_type.eq_ignore_ascii_case(RECORD_TYPE_CNAME)
    }

    /// TTL to send to the provider; zero means "provider default"
    pub fn effective_ttl(&self) -> Option<u32> {
        self.ttl.filter(|ttl| *ttl > 0)
    }
}

impl fmt::Display for DnsRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.record_type, self.data)?;
        if let Some(ttl) = self.ttl {
            write!(f, " (ttl {}s)", ttl)?;
        }
        Ok(())
    }
}

/// Accepts the TTL as a JSON number or a numeric string
fn deserialize_ttl<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Ttl {
        Number(u32),
        Text(String),
    }

    match Option::<Ttl>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Ttl::Number(n)) => Ok(Some(n)),
        Some(Ttl::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Ttl::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid ttl: {:?}", s))),
    }
}
