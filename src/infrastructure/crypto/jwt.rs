//! JWT access-token handling
//!
//! Tokens carry only `{sub, exp}`. Signing settings come from configuration and
//! are validated every time a codec is built: a missing secret, algorithm or
//! lifetime is an error, never a silent default.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const JWT_SECRET_KEY_ENV: &str = "JWT_SECRET_KEY";
pub const JWT_ALGORITHM_ENV: &str = "JWT_ALGORITHM";
pub const ACCESS_TOKEN_EXPIRE_MINUTES_ENV: &str = "ACCESS_TOKEN_EXPIRE_MINUTES";

/// Token failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// A required signing setting is unset
    #[error("Missing critical JWT setting: {0}")]
    MissingSetting(&'static str),

    /// A signing setting is present but unusable
    #[error("Invalid JWT setting: {0}")]
    InvalidSetting(String),

    /// Signature valid, expiry instant passed
    #[error("Token expired")]
    Expired,

    /// Bad signature, corrupt structure, or missing/non-numeric subject
    #[error("Malformed token")]
    Malformed,

    #[error("Failed to sign token: {0}")]
    Signing(String),
}

impl TokenError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingSetting(_) | Self::InvalidSetting(_))
    }
}

/// Raw signing settings as read from configuration
#[derive(Clone, Default)]
pub struct JwtConfig {
    /// Shared secret for HMAC signing
    pub secret: Option<String>,
    /// Algorithm name, e.g. `HS256`
    pub algorithm: Option<String>,
    /// Default token lifetime in minutes (decimal integer)
    pub expire_minutes: Option<String>,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("algorithm", &self.algorithm)
            .field("expire_minutes", &self.expire_minutes)
            .finish()
    }
}

impl JwtConfig {
    pub fn new(
        secret: impl Into<String>,
        algorithm: impl Into<String>,
        expire_minutes: impl Into<String>,
    ) -> Self {
        Self {
            secret: Some(secret.into()),
            algorithm: Some(algorithm.into()),
            expire_minutes: Some(expire_minutes.into()),
        }
    }

    /// Validate the settings and build a codec from them.
    pub fn codec(&self) -> Result<TokenCodec, TokenError> {
        let secret = required(&self.secret, JWT_SECRET_KEY_ENV)?;
        let algorithm = required(&self.algorithm, JWT_ALGORITHM_ENV)?;
        let expire_minutes = required(&self.expire_minutes, ACCESS_TOKEN_EXPIRE_MINUTES_ENV)?;

        let algorithm = Algorithm::from_str(algorithm).map_err(|_| {
            TokenError::InvalidSetting(format!("unknown signing algorithm '{}'", algorithm))
        })?;
        if !matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(TokenError::InvalidSetting(format!(
                "algorithm {:?} cannot sign with a shared secret",
                algorithm
            )));
        }

        let minutes: i64 = expire_minutes.parse().map_err(|_| {
            TokenError::InvalidSetting(format!(
                "{} must be an integer",
                ACCESS_TOKEN_EXPIRE_MINUTES_ENV
            ))
        })?;
        if minutes <= 0 {
            return Err(TokenError::InvalidSetting(format!(
                "{} must be positive",
                ACCESS_TOKEN_EXPIRE_MINUTES_ENV
            )));
        }

        Ok(TokenCodec {
            algorithm,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            default_ttl: Duration::minutes(minutes),
        })
    }
}

fn required<'a>(value: &'a Option<String>, name: &'static str) -> Result<&'a str, TokenError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(TokenError::MissingSetting(name)),
    }
}

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    /// Subject (account ID, decimal string)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl TokenClaims {
    pub fn new(subject: i32, expires_at: DateTime<Utc>) -> Self {
        Self {
            sub: subject.to_string(),
            exp: expires_at.timestamp(),
        }
    }

    /// Expired once `now` is strictly past the encoded instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() > self.exp
    }
}

/// Validated signing settings
#[derive(Clone)]
pub struct TokenCodec {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    default_ttl: Duration,
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &self.algorithm)
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    /// Sign a token for `subject` valid for `ttl` (configured lifetime when `None`).
    pub fn issue(&self, subject: i32, ttl: Option<Duration>) -> Result<String, TokenError> {
        let expires_at = Utc::now() + ttl.unwrap_or(self.default_ttl);
        let claims = TokenClaims::new(subject, expires_at);

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify a token against the current time and return its subject.
    pub fn verify(&self, token: &str) -> Result<i32, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token as of `now`.
    ///
    /// The signature is checked before expiry, so a tampered expired token is
    /// `Malformed`, not `Expired`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<i32, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation.validate_exp = false;
        validation.leeway = 0;

        let claims = decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            })?
            .claims;

        if claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }

        claims.sub.parse::<i32>().map_err(|_| TokenError::Malformed)
    }
}

/// Create an access token for an account
pub fn create_access_token(
    subject: i32,
    ttl: Option<Duration>,
    config: &JwtConfig,
) -> Result<String, TokenError> {
    config.codec()?.issue(subject, ttl)
}
