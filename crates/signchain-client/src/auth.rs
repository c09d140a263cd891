//! Request signatures proving possession of the vault's shared secret.
//!
//! A signature token has three dot-separated segments, each the lowercase
//! RFC 4648 base32 encoding (with padding) of:
//!
//! 1. a 32-byte random nonce,
//! 2. the signing time as big-endian milliseconds since the Unix epoch,
//! 3. `SHA-256(payload || nonce || timestamp || secret)`.
//!
//! The secret itself never leaves the process. A server holding the same
//! secret recomputes the digest from the nonce and timestamp it receives.
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use signchain_client::auth::AuthSecretKey;
//!
//! let key = AuthSecretKey::new("shared-secret");
//! let body = br#"{"name":"treasury"}"#;
//!
//! let signature = key.sign(Utc::now(), body)?;
//! assert!(key.verify(&signature, body));
//! # Ok::<(), signchain_client::ClientError>(())
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use data_encoding::BASE32;
use rand_core::{OsRng, RngCore};
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::error::ClientError;

/// Header carrying the signature token on signed requests.
pub const SIGNATURE_HEADER: &str = "X-Vault-Auth-Signature";

/// Length of the random nonce in bytes.
pub const NONCE_LEN: usize = 32;

const TIMESTAMP_LEN: usize = 8;
const DIGEST_LEN: usize = 32;

/// Shared secret keying request signatures.
///
/// Stored as a `SecretString`, so it is zeroed on drop and redacted from
/// `Debug` output.
#[derive(Clone)]
pub struct AuthSecretKey(SecretString);

impl fmt::Debug for AuthSecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthSecretKey([REDACTED])")
    }
}

impl From<SecretString> for AuthSecretKey {
    fn from(secret: SecretString) -> Self {
        Self(secret)
    }
}

impl AuthSecretKey {
    /// Wraps a secret string.
    pub fn new(secret: impl Into<String>) -> Self {
        Self(SecretString::new(secret.into().into()))
    }

    /// Signs `payload` at `timestamp` with a fresh random nonce.
    ///
    /// `timestamp` is truncated to millisecond resolution.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::EntropyError`] if the operating system cannot
    /// provide secure random bytes for the nonce.
    pub fn sign(
        &self,
        timestamp: DateTime<Utc>,
        payload: &[u8],
    ) -> Result<AuthSignature, ClientError> {
        let mut nonce = [0u8; NONCE_LEN];
        OsRng.try_fill_bytes(&mut nonce)?;
        Ok(self.sign_with_nonce(&nonce, timestamp, payload))
    }

    pub(crate) fn sign_with_nonce(
        &self,
        nonce: &[u8; NONCE_LEN],
        timestamp: DateTime<Utc>,
        payload: &[u8],
    ) -> AuthSignature {
        let timestamp = timestamp.timestamp_millis().to_be_bytes();
        let digest = self.digest(payload, nonce, &timestamp);

        AuthSignature(format!(
            "{}.{}.{}",
            encode_segment(nonce),
            encode_segment(&timestamp),
            encode_segment(&digest)
        ))
    }

    /// Checks that `signature` was produced with this key over `payload`.
    ///
    /// Only the keyed digest is checked. Deciding whether the embedded
    /// timestamp is recent enough is left to the caller.
    #[must_use]
    pub fn verify(&self, signature: &AuthSignature, payload: &[u8]) -> bool {
        let Ok(parts) = signature.decode() else {
            return false;
        };

        let expected = self.digest(
            payload,
            &parts.nonce,
            &parts.timestamp_millis.to_be_bytes(),
        );
        expected.as_slice().ct_eq(parts.digest.as_slice()).into()
    }

    fn digest(
        &self,
        payload: &[u8],
        nonce: &[u8; NONCE_LEN],
        timestamp: &[u8; TIMESTAMP_LEN],
    ) -> [u8; DIGEST_LEN] {
        let mut hasher = Sha256::new();
        hasher.update(payload);
        hasher.update(nonce);
        hasher.update(timestamp);
        hasher.update(self.0.expose_secret().as_bytes());
        hasher.finalize().into()
    }
}

/// A signature token of the form `nonce.timestamp.digest`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuthSignature(String);

impl AuthSignature {
    /// Wraps a token received from elsewhere, e.g. a request header.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Splits the token and decodes its three segments.
    ///
    /// Segments are accepted in either letter case.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidSignature`] if the token does not have
    /// exactly three segments, a segment is not valid base32, or a segment
    /// decodes to the wrong number of bytes.
    pub fn decode(&self) -> Result<SignatureParts, ClientError> {
        let mut segments = self.0.split('.');
        let (Some(nonce), Some(timestamp), Some(digest), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(ClientError::InvalidSignature(
                "expected three dot-separated segments".to_string(),
            ));
        };

        let nonce: [u8; NONCE_LEN] = decode_segment("nonce", nonce)?;
        let timestamp: [u8; TIMESTAMP_LEN] = decode_segment("timestamp", timestamp)?;
        let digest: [u8; DIGEST_LEN] = decode_segment("digest", digest)?;

        Ok(SignatureParts {
            nonce,
            timestamp_millis: i64::from_be_bytes(timestamp),
            digest,
        })
    }
}

impl fmt::Display for AuthSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AuthSignature {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The decoded segments of an [`AuthSignature`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureParts {
    /// The random nonce.
    pub nonce: [u8; NONCE_LEN],
    /// Signing time in milliseconds since the Unix epoch.
    pub timestamp_millis: i64,
    /// The keyed SHA-256 digest.
    pub digest: [u8; DIGEST_LEN],
}

impl SignatureParts {
    /// Returns the signing time, if it is representable.
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp_millis)
    }
}

fn encode_segment(bytes: &[u8]) -> String {
    BASE32.encode(bytes).to_ascii_lowercase()
}

fn decode_segment<const N: usize>(name: &str, segment: &str) -> Result<[u8; N], ClientError> {
    let bytes = BASE32
        .decode(segment.to_ascii_uppercase().as_bytes())
        .map_err(|e| ClientError::InvalidSignature(format!("{name} segment: {e}")))?;

    <[u8; N]>::try_from(bytes.as_slice()).map_err(|_| {
        ClientError::InvalidSignature(format!(
            "{name} segment decodes to {} bytes, expected {N}",
            bytes.len()
        ))
    })
}
