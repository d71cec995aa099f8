//! Signed download tokens
//!
//! A presigned URL carries an HS256 token whose subject is the object key and
//! whose audience is [`DOWNLOAD_AUDIENCE`], so it can't be replayed for a
//! different object or mistaken for an access token.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{DownloadTokenError, StorageError};

/// Audience claim carried by every download token
pub const DOWNLOAD_AUDIENCE: &str = "download";

/// Longest lifetime a download token may be given (one year)
const MAX_TTL_SECONDS: u64 = 365 * 24 * 60 * 60;

/// Claims of a download token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadClaims {
    /// Object key
    pub sub: String,
    /// Filename to serve the object as
    pub filename: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and checks download tokens
#[derive(Clone)]
pub struct DownloadSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    public_url: String,
}

impl DownloadSigner {
    /// Create a signer; `public_url` is the externally visible server origin
    #[must_use]
    pub fn new(secret: &str, public_url: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            public_url: public_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build `{public_url}/files/{key}?token={token}`
    pub fn presign(&self, key: &str, filename: &str, ttl_seconds: u64) -> Result<String, StorageError> {
        let token = self.sign(key, filename, Utc::now(), ttl_seconds)?;
        Ok(format!("{}/files/{key}?token={token}", self.public_url))
    }

    fn sign(
        &self,
        key: &str,
        filename: &str,
        issued_at: DateTime<Utc>,
        ttl_seconds: u64,
    ) -> Result<String, StorageError> {
        let ttl = Duration::seconds(ttl_seconds.min(MAX_TTL_SECONDS) as i64);
        let claims = DownloadClaims {
            sub: key.to_string(),
            filename: filename.to_string(),
            aud: DOWNLOAD_AUDIENCE.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        };
        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }

    /// Check a token against the requested key and return the filename it grants
    pub fn verify(&self, key: &str, token: &str) -> Result<String, DownloadTokenError> {
        let mut validation = Validation::default();
        validation.leeway = 0;
        validation.set_audience(&[DOWNLOAD_AUDIENCE]);
        validation.set_required_spec_claims(&["exp", "aud", "sub"]);

        let claims = decode::<DownloadClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => DownloadTokenError::Expired,
                _ => DownloadTokenError::Invalid,
            })?;

        if claims.sub != key {
            return Err(DownloadTokenError::KeyMismatch);
        }
        Ok(claims.filename)
    }
}

impl std::fmt::Debug for DownloadSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadSigner")
            .field("public_url", &self.public_url)
            .finish_non_exhaustive()
    }
}
