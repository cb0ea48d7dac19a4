//! Request authentication
//!
//! Every API call carries an `X-NFSN-Authentication` header:
//!
//! ```text
//! login;timestamp;salt;SHA1(login;timestamp;salt;api-key;request-path;SHA1(body))
//! ```
//!
//! Both hashes are lowercase hex. Field order, separators and hash choice are
//! fixed by the provider.

use nfsn_core::Credential;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha1::{Digest, Sha1};
use std::sync::{Mutex, PoisonError};

/// Name of the authentication header
pub const AUTH_HEADER: &str = "X-NFSN-Authentication";

/// Number of characters in a salt
pub const SALT_LEN: usize = 16;

/// Characters a salt is drawn from
pub const SALT_ALPHABET: &[u8; 62] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Compute the authentication header value
///
/// Pure: the same inputs always produce the same header.
pub fn sign(
    login: &str,
    timestamp: i64,
    salt: &str,
    api_key: &str,
    path: &str,
    body: &[u8],
) -> String {
    let body_hash = hex::encode(Sha1::digest(body));
    let hash_input = format!(
        "{};{};{};{};{};{}",
        login, timestamp, salt, api_key, path, body_hash
    );
    let signature = hex::encode(Sha1::digest(hash_input.as_bytes()));

    format!("{};{};{};{}", login, timestamp, salt, signature)
}

/// Random salt generator, safe to share between tasks
pub struct SaltGenerator {
    rng: Mutex<StdRng>,
}

impl std::fmt::Debug for SaltGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SaltGenerator").finish_non_exhaustive()
    }
}

impl Default for SaltGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SaltGenerator {
    /// Create a generator seeded from the thread-local RNG
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_rng(&mut rand::rng())),
        }
    }

    /// Create a generator with a fixed seed
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Draw a fresh 16-character salt
    pub fn generate(&self) -> String {
        // Only the RNG needs serialising.
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        (0..SALT_LEN)
            .map(|_| SALT_ALPHABET[rng.random_range(0..SALT_ALPHABET.len())] as char)
            .collect()
    }
}

/// Produces headers for one credential using the current time and a fresh salt
#[derive(Debug)]
pub struct Authenticator {
    credential: Credential,
    salts: SaltGenerator,
}

impl Authenticator {
    /// Create an authenticator for `credential`
    pub fn new(credential: Credential) -> Self {
        Self {
            credential,
            salts: SaltGenerator::new(),
        }
    }

    /// Create an authenticator with a caller-provided salt generator
    pub fn with_salts(credential: Credential, salts: SaltGenerator) -> Self {
        Self { credential, salts }
    }

    /// Login this authenticator signs for
    pub fn login(&self) -> &str {
        &self.credential.login
    }

    /// Header value for a request to `path` with `body`, signed now
    pub fn header(&self, path: &str, body: &[u8]) -> String {
        self.header_at(chrono::Utc::now().timestamp(), path, body)
    }

    /// Header value for a request signed at `timestamp`
    pub fn header_at(&self, timestamp: i64, path: &str, body: &[u8]) -> String {
        let salt = self.salts.generate();
        sign(
            &self.credential.login,
            timestamp,
            &salt,
            &self.credential.api_key,
            path,
            body,
        )
    }
}
