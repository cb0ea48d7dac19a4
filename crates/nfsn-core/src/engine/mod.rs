//! Dyndns engine
//!
//! The DyndnsEngine keeps one A record in sync with the caller's public IP.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   current()   ┌──────────────┐   list / delete / add   ┌─────────────┐
//! │  IpSource   │──────────────▶│ DyndnsEngine │────────────────────────▶│   DnsApi    │
//! └─────────────┘               └──────────────┘                         └─────────────┘
//! ```
//!
//! ## Reconciliation Flow
//!
//! 1. Fetch the public IP (IPv4 only; the managed record is an A record)
//! 2. List the domain's records and look for the subdomain's A record
//! 3. If it already holds the public IP, stop
//! 4. Otherwise delete the stale A record, or a CNAME squatting on the name,
//!    and add a fresh A record
//!
//! Other record types sharing the name (TXT, MX, AAAA, ...) are never touched.
//!
//! Step 4 is two separate API calls. If the add fails after the delete
//! succeeded, the subdomain is left without a record; the next run
//! recreates it.

use crate::config::DyndnsConfig;
use crate::error::{Error, Result};
use crate::record::{DnsRecord, RECORD_TYPE_A};
use crate::traits::{DnsApi, IpSource};
use std::net::IpAddr;
use tracing::{debug, error, info, warn};

/// Result of one reconciliation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// The existing record already points at the public IP (no-op)
    Unchanged {
        /// The matching record
        record: DnsRecord,
    },
    /// A stale record was deleted and a new one added
    Replaced {
        /// The deleted record
        previous: DnsRecord,
        /// The added record
        current: DnsRecord,
    },
    /// No record existed; a new one was added
    Created {
        /// The added record
        current: DnsRecord,
    },
}

impl ReconcileOutcome {
    /// Whether any mutation was (or, in dry-run mode, would have been) made
    pub fn changed(&self) -> bool {
        !matches!(self, ReconcileOutcome::Unchanged { .. })
    }
}

/// What the subdomain currently has, relative to the public IP
enum Current {
    /// An A record already holding the IP
    Matching(DnsRecord),
    /// A record to delete before adding the new one
    Stale(DnsRecord),
    /// Nothing in the way
    Missing,
}

/// Core dyndns engine
///
/// One engine handles one `(domain, subdomain)` pair. Every call to
/// [`DyndnsEngine::reconcile`] is independent: nothing is remembered
/// between runs.
pub struct DyndnsEngine {
    /// Source of the public IP
    ip_source: Box<dyn IpSource>,

    /// DNS record API
    api: Box<dyn DnsApi>,

    /// What to manage
    config: DyndnsConfig,
}

impl DyndnsEngine {
    /// Create a new dyndns engine
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `config` fails validation.
    pub fn new(
        ip_source: Box<dyn IpSource>,
        api: Box<dyn DnsApi>,
        config: DyndnsConfig,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            ip_source,
            api,
            config,
        })
    }

    /// The managed configuration
    pub fn config(&self) -> &DyndnsConfig {
        &self.config
    }

    /// Bring the subdomain's record in line with the current public IP
    pub async fn reconcile(&self) -> Result<ReconcileOutcome> {
        let ip = self.ip_source.current().await?;
        info!("Public IP: {} (via {})", ip, self.ip_source.source_name());

        self.reconcile_with_ip(ip).await
    }

    /// Bring the subdomain's record in line with `ip`
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error for an IPv6 address, before any API call.
    pub async fn reconcile_with_ip(&self, ip: IpAddr) -> Result<ReconcileOutcome> {
        let domain = &self.config.domain;
        let subdomain = &self.config.subdomain;

        let IpAddr::V4(ipv4) = ip else {
            return Err(Error::invalid_input(format!(
                "public IP {} is not IPv4; an A record cannot hold it",
                ip
            )));
        };
        let ip_text = ipv4.to_string();

        let records = self.api.list_records(domain).await?;
        debug!("{} record(s) in {}", records.len(), domain);

        let existing = match Self::find_current(records, subdomain, &ip_text) {
            Current::Matching(rr) => {
                info!("Found existing RR: {}", rr);
                info!("({}).{} already configured correctly", subdomain, domain);
                return Ok(ReconcileOutcome::Unchanged { record: rr });
            }
            Current::Stale(rr) => {
                info!("Found existing RR: {}", rr);
                warn!("Existing RR has incorrect configuration: {}", rr);
                Some(rr)
            }
            Current::Missing => None,
        };

        let desired =
            DnsRecord::new(subdomain.clone(), RECORD_TYPE_A, ip_text).with_ttl(self.config.ttl);

        if self.config.dry_run {
            if let Some(ref rr) = existing {
                info!("[DRY-RUN] Would delete RR: {}", rr);
            }
            info!("[DRY-RUN] Would add RR: {}", desired);
            return Ok(Self::outcome(existing, desired));
        }

        if let Some(ref rr) = existing {
            self.api.delete_record(domain, rr).await?;
            info!("Deleted stale RR: {}", rr);
        }

        if let Err(e) = self.api.add_record(domain, &desired).await {
            if existing.is_some() {
                error!(
                    "Adding new RR failed after the stale one was deleted; \
                     ({}).{} has no record until the next run",
                    subdomain, domain
                );
            }
            return Err(e);
        }
        info!("New RR created: {}", desired);

        Ok(Self::outcome(existing, desired))
    }

    /// Classify the subdomain's current record against `ip_text`
    ///
    /// The first A record named `subdomain` is the one compared. Without one,
    /// a same-name CNAME is stale since it would block the add.
    fn find_current(records: Vec<DnsRecord>, subdomain: &str, ip_text: &str) -> Current {
        let mut cname = None;
        for rr in records.into_iter().filter(|rr| rr.name == subdomain) {
            if rr.is_a() {
                return if rr.data == ip_text {
                    Current::Matching(rr)
                } else {
                    Current::Stale(rr)
                };
            }
            if rr.is_cname() && cname.is_none() {
                cname = Some(rr);
            }
        }
        cname.map_or(Current::Missing, Current::Stale)
    }

    fn outcome(existing: Option<DnsRecord>, current: DnsRecord) -> ReconcileOutcome {
        match existing {
            Some(previous) => ReconcileOutcome::Replaced { previous, current },
            None => ReconcileOutcome::Created { current },
        }
    }
}
