use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod password;

pub use password::{PasswordError, PasswordHasher};

/// Identity claims carried by a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: i32,
    pub name: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("JWT secret is empty")]
    InvalidSecret,

    #[error("JWT generation error: {0}")]
    Generation(String),

    #[error("token rejected")]
    Rejected,
}

/// A freshly signed token and its expiry
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Signs and verifies HS256 session tokens with a process-wide secret.
///
/// Verification is a pure function of the token, the secret and the supplied
/// clock reading: a token issued at `T` is accepted for `now` in `[T, T + ttl)`.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl: std::time::Duration) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::InvalidSecret);
        }
        let ttl = Duration::from_std(ttl).map_err(|e| TokenError::Generation(e.to_string()))?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, id: i32, name: &str) -> Result<IssuedToken, TokenError> {
        self.issue_at(id, name, Utc::now())
    }

    pub fn issue_at(&self, id: i32, name: &str, now: DateTime<Utc>) -> Result<IssuedToken, TokenError> {
        let expires_at = now + self.ttl;
        let claims = Claims {
            id,
            name: name.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Generation(e.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Check signature and claim shape, then expiry against `now`. Every
    /// failure collapses into `TokenError::Rejected`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        // Expiry is checked below against the injected clock, not the library's.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!("JWT decode failed: {}", e);
            TokenError::Rejected
        })?;

        if now.timestamp() >= data.claims.exp {
            tracing::debug!("JWT expired for user {}", data.claims.id);
            return Err(TokenError::Rejected);
        }

        Ok(data.claims)
    }
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer").field("ttl", &self.ttl).finish()
    }
}
