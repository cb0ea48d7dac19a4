//! Signed HTTPS client for the NFSN DNS API
//!
//! Every call is one `POST` to `https://api.nearlyfreespeech.net/dns/{domain}/{method}`
//! carrying a freshly signed `X-NFSN-Authentication` header. Nothing is
//! retried, cached or pooled beyond the underlying connection pool.

use crate::auth::{AUTH_HEADER, Authenticator};
use async_trait::async_trait;
use nfsn_core::traits::DnsApi;
use nfsn_core::{Credential, DnsRecord, Error, Result};
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// NFSN API base URL
pub const NFSN_API_BASE: &str = "https://api.nearlyfreespeech.net";

/// Default HTTP timeout for API requests (30 seconds)
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// NFSN API client
///
/// Safe to share between tasks: the salt generator inside the
/// authenticator is the only mutable state and it is locked.
///
/// # Security
///
/// The Debug implementation does NOT expose the API key.
pub struct NfsnClient {
    /// Scheme and host requests are sent to
    base_url: Url,

    /// Signs each request
    auth: Authenticator,

    /// HTTP client for API requests
    client: reqwest::Client,
}

impl std::fmt::Debug for NfsnClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NfsnClient")
            .field("base_url", &self.base_url.as_str())
            .field("login", &self.auth.login())
            .field("api_key", &"<REDACTED>")
            .finish()
    }
}

impl NfsnClient {
    /// Create a new client for `credential`
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the credential is incomplete or the
    /// HTTP client cannot be built.
    pub fn new(credential: Credential) -> Result<Self> {
        credential.validate()?;

        let client = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::config(format!("building HTTP client: {}", e)))?;

        let base_url = Url::parse(NFSN_API_BASE)
            .map_err(|e| Error::config(format!("invalid API base URL: {}", e)))?;

        Ok(Self {
            base_url,
            auth: Authenticator::new(credential),
            client,
        })
    }

    /// Create a client from the per-user credential file (`~/.nfsn-api`)
    pub fn from_default_config() -> Result<Self> {
        Self::new(Credential::load()?)
    }

    /// Create a client from a credential file at `path`
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(Credential::from_file(path)?)
    }

    /// Send requests to `base_url` instead of the NFSN API host
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        let url = Url::parse(base_url)
            .map_err(|e| Error::invalid_input(format!("invalid base URL {}: {}", base_url, e)))?;
        if url.cannot_be_a_base() {
            return Err(Error::invalid_input(format!(
                "invalid base URL {}: cannot be a base",
                base_url
            )));
        }
        self.base_url = url;
        Ok(self)
    }

    /// Replace the authenticator (fixed salt seed in tests)
    pub fn with_authenticator(mut self, auth: Authenticator) -> Self {
        self.auth = auth;
        self
    }

    /// List every record of `domain`
    ///
    /// # API Call
    ///
    /// ```http
    /// POST /dns/:domain/listRRs
    /// X-NFSN-Authentication: <login>;<timestamp>;<salt>;<signature>
    /// ```
    pub async fn list_records(&self, domain: &str) -> Result<Vec<DnsRecord>> {
        let url = self.dns_endpoint(domain, "listRRs")?;
        let body = self.post(url, None).await?;

        let records: Vec<DnsRecord> = serde_json::from_str(&body)
            .map_err(|e| Error::decode(e.to_string()))?;

        tracing::debug!("Listed {} record(s) for {}", records.len(), domain);
        Ok(records)
    }

    /// Add `record` to `domain`
    ///
    /// The `ttl` field is only sent when the record's TTL is greater than zero.
    ///
    /// # API Call
    ///
    /// ```http
    /// POST /dns/:domain/addRR
    /// Content-Type: application/x-www-form-urlencoded
    ///
    /// data=1.2.3.4&name=www&ttl=300&type=A
    /// ```
    pub async fn add_record(&self, domain: &str, record: &DnsRecord) -> Result<()> {
        let url = self.dns_endpoint(domain, "addRR")?;
        let form = encode_form(record, record.effective_ttl());

        tracing::debug!("Adding RR to {}: {}", domain, record);
        self.post(url, Some(form)).await?;
        Ok(())
    }

    /// Delete the record of `domain` matching `record`'s name, type and data
    ///
    /// # API Call
    ///
    /// ```http
    /// POST /dns/:domain/deleteRR
    /// Content-Type: application/x-www-form-urlencoded
    ///
    /// data=1.2.3.4&name=www&type=A
    /// ```
    pub async fn delete_record(&self, domain: &str, record: &DnsRecord) -> Result<()> {
        let url = self.dns_endpoint(domain, "deleteRR")?;
        let form = encode_form(record, None);

        tracing::debug!("Deleting RR from {}: {}", domain, record);
        self.post(url, Some(form)).await?;
        Ok(())
    }

    /// Build `/dns/{domain}/{method}` with the domain escaped as one segment
    fn dns_endpoint(&self, domain: &str, method: &str) -> Result<Url> {
        if domain.is_empty() {
            return Err(Error::invalid_input("domain cannot be empty"));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::invalid_input("base URL cannot be a base"))?
            .pop_if_empty()
            .extend(["dns", domain, method]);
        Ok(url)
    }

    /// Sign and send one POST; returns the body of a 200 response
    async fn post(&self, url: Url, form: Option<String>) -> Result<String> {
        let has_body = form.is_some();
        let body = form.unwrap_or_default().into_bytes();
        let header = self.auth.header(url.path(), &body);

        let mut request = self.client.post(url.clone()).header(AUTH_HEADER, header);
        if has_body {
            request = request.header(CONTENT_TYPE, FORM_CONTENT_TYPE);
        }

        let response = request
            .body(body)
            .send()
            .await
            .map_err(|e| Error::transport(format!("POST {}: {}", url.path(), e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::transport(format!("reading response: {}", e)))?;

        if status != StatusCode::OK {
            tracing::debug!("POST {} failed with {}", url.path(), status);
            return Err(Error::protocol(status.to_string(), text));
        }

        Ok(text)
    }
}

/// Form-encode a record in sorted key order
fn encode_form(record: &DnsRecord, ttl: Option<u32>) -> String {
    let mut form = url::form_urlencoded::Serializer::new(String::new());
    form.append_pair("data", &record.data);
    form.append_pair("name", &record.name);
    if let Some(ttl) = ttl {
        form.append_pair("ttl", &ttl.to_string());
    }
    form.append_pair("type", &record.record_type);
    form.finish()
}

#[async_trait]
impl DnsApi for NfsnClient {
    async fn list_records(&self, domain: &str) -> Result<Vec<DnsRecord>> {
        NfsnClient::list_records(self, domain).await
    }

    async fn add_record(&self, domain: &str, record: &DnsRecord) -> Result<()> {
        NfsnClient::add_record(self, domain, record).await
    }

    async fn delete_record(&self, domain: &str, record: &DnsRecord) -> Result<()> {
        NfsnClient::delete_record(self, domain, record).await
    }

    fn api_name(&self) -> &'static str {
        "nfsn"
    }
}
