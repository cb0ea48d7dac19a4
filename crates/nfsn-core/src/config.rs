//! Credential configuration
//!
//! The API credential lives in a small JSON file in the user's home
//! directory:
//!
//! ```json
//! {"login": "exampleuser", "api-key": "p3kxmRKf9dk3l6ls"}
//! ```

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File name of the credential file under the home directory
pub const CONFIG_FILE_NAME: &str = ".nfsn-api";

/// Environment variable that overrides the credential file location
pub const CONFIG_PATH_ENV: &str = "NFSN_API_CONFIG";

/// Login name and API key for the NFSN API
///
/// The Debug implementation does NOT expose the API key.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Credential {
    /// Member login
    pub login: String,

    /// API key
    /// ⚠️ NEVER log this value
    #[serde(rename = "api-key")]
    pub api_key: String,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("login", &self.login)
            .field("api_key", &"<REDACTED>")
            .finish()
    }
}

impl Credential {
    /// Create a credential from its parts
    pub fn new(login: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            api_key: api_key.into(),
        }
    }

    /// Location of the credential file: `$NFSN_API_CONFIG` if set,
    /// otherwise `~/.nfsn-api`
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }

        let home = dirs::home_dir()
            .ok_or_else(|| Error::config("finding user's home dir: not available"))?;
        Ok(home.join(CONFIG_FILE_NAME))
    }

    /// Load the credential from [`Credential::default_path`]
    pub fn load() -> Result<Self> {
        Self::from_file(Self::default_path()?)
    }

    /// Load the credential from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("reading {}: {}", path.display(), e)))?;

        let credential = Self::from_json(&raw)
            .map_err(|e| Error::config(format!("parsing {}: {}", path.display(), e)))?;

        tracing::debug!("Loaded credential for {} from {}", credential.login, path.display());
        Ok(credential)
    }

    /// Parse the credential from JSON text
    pub fn from_json(raw: &str) -> Result<Self> {
        let credential: Credential =
            serde_json::from_str(raw).map_err(|e| Error::config(e.to_string()))?;
        credential.validate()?;
        Ok(credential)
    }

    /// Validate the credential
    pub fn validate(&self) -> Result<()> {
        if self.login.is_empty() {
            return Err(Error::config("login cannot be empty"));
        }
        if self.api_key.is_empty() {
            return Err(Error::config("api-key cannot be empty"));
        }
        Ok(())
    }
}

/// Default TTL for records created by the dyndns engine (5 minutes)
pub const DEFAULT_DYNDNS_TTL: u32 = 300;

/// Dyndns engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DyndnsConfig {
    /// Domain whose records are managed (e.g. "example.com")
    pub domain: String,

    /// Record name that tracks the public IP (e.g. "home")
    pub subdomain: String,

    /// TTL of newly created records, in seconds
    pub ttl: u32,

    /// Log intended mutations without sending them
    pub dry_run: bool,
}

impl DyndnsConfig {
    /// Create a new configuration with defaults
    pub fn new(domain: impl Into<String>, subdomain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            subdomain: subdomain.into(),
            ttl: DEFAULT_DYNDNS_TTL,
            dry_run: false,
        }
    }

    /// Set the TTL of created records
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    /// Enable or disable dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.domain.is_empty() {
            return Err(Error::config("domain must be set"));
        }
        if self.subdomain.is_empty() {
            return Err(Error::config("subdomain must be set"));
        }
        validate_domain_name(&self.domain)?;
        validate_subdomain(&self.subdomain)?;
        Ok(())
    }
}

/// Looser check for the record name: any non-empty dotted labels
///
/// Wildcards such as `*` or `*.lab` are record names the provider accepts,
/// so only empty labels and whitespace are refused.
pub fn validate_subdomain(name: &str) -> Result<()> {
    if name.split('.').any(str::is_empty) {
        return Err(Error::invalid_input(format!("Subdomain has empty label: '{}'", name)));
    }

    if name.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(Error::invalid_input(format!("Subdomain contains whitespace: '{}'", name)));
    }

    Ok(())
}

/// Basic RFC 1035 name check: label lengths and characters
///
/// Underscores are accepted since they appear in service records.
pub fn validate_domain_name(name: &str) -> Result<()> {
    if name.len() > 253 {
        return Err(Error::invalid_input(format!(
            "Domain name too long: {} chars (max 253). Got: {}",
            name.len(),
            name
        )));
    }

    for label in name.split('.') {
        if label.is_empty() {
            return Err(Error::invalid_input(format!(
                "Domain name has empty label: '{}'",
                name
            )));
        }

        if label.len() > 63 {
            return Err(Error::invalid_input(format!(
                "Domain label too long: {} chars (max 63). Label: '{}'",
                label.len(),
                label
            )));
        }

        if !label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(Error::invalid_input(format!(
                "Domain label contains invalid characters. Label: '{}'",
                label
            )));
        }

        if label.starts_with('-') || label.ends_with('-') {
            return Err(Error::invalid_input(format!(
                "Domain label cannot start or end with hyphen. Label: '{}'",
                label
            )));
        }
    }

    Ok(())
}
