//! bcrypt password hashing

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("bcrypt failure: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("hashing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Salted one-way password hasher with a fixed work factor.
///
/// The async methods move the CPU-bound bcrypt work onto tokio's blocking
/// pool so it never stalls the request executor.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn hash_blocking(&self, password: &str) -> Result<String, PasswordError> {
        Ok(bcrypt::hash(password, self.cost)?)
    }

    /// A malformed stored hash verifies as `false` rather than erroring.
    pub fn verify_blocking(&self, password: &str, hash: &str) -> bool {
        bcrypt::verify(password, hash).unwrap_or(false)
    }

    pub async fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let hasher = *self;
        let password = password.to_string();
        tokio::task::spawn_blocking(move || hasher.hash_blocking(&password)).await?
    }

    pub async fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let hasher = *self;
        let password = password.to_string();
        let hash = hash.to_string();
        Ok(tokio::task::spawn_blocking(move || hasher.verify_blocking(&password, &hash)).await?)
    }
}
