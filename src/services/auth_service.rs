use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::auth::{IssuedToken, PasswordError, PasswordHasher, TokenError, TokenIssuer};
use crate::database::{DatabaseError, UserRepository, UserSummary};

/// Width of `users.name`, counted in characters.
pub const MAX_NAME_CHARS: usize = 255;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),

    #[error("name already registered")]
    NameTaken,

    /// Unknown name and wrong password are reported identically
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Database(DatabaseError),
}

/// Validated registration input
#[derive(Debug, Clone)]
pub struct Registration {
    name: String,
    password: String,
}

impl Registration {
    pub fn new(
        name: Option<String>,
        password: Option<String>,
        confirm_password: Option<String>,
    ) -> Result<Self, AuthError> {
        let name = name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
        let password = password.filter(|p| !p.is_empty());

        let (Some(name), Some(password)) = (name, password) else {
            return Err(AuthError::Validation("Name and password are required".into()));
        };
        if name.chars().count() > MAX_NAME_CHARS {
            return Err(AuthError::Validation(format!(
                "Name must be at most {} characters",
                MAX_NAME_CHARS
            )));
        }
        if confirm_password.as_deref() != Some(password.as_str()) {
            return Err(AuthError::Validation("Passwords do not match".into()));
        }

        Ok(Self { name, password })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Validated login input
#[derive(Debug, Clone)]
pub struct Credentials {
    name: String,
    password: String,
}

impl Credentials {
    pub fn new(name: Option<String>, password: Option<String>) -> Result<Self, AuthError> {
        let name = name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
        let password = password.filter(|p| !p.is_empty());

        match (name, password) {
            (Some(name), Some(password)) => Ok(Self { name, password }),
            _ => Err(AuthError::Validation("Name and password are required".into())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub user: UserSummary,
    pub token: IssuedToken,
}

/// Registration, credential verification and token issuance
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    hasher: PasswordHasher,
    tokens: Arc<TokenIssuer>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, hasher: PasswordHasher, tokens: Arc<TokenIssuer>) -> Self {
        Self { users, hasher, tokens }
    }

    pub async fn register(&self, registration: Registration) -> Result<UserSummary, AuthError> {
        // Fast rejection only; the store's unique constraint is authoritative.
        if self
            .users
            .find_by_name(&registration.name)
            .await
            .map_err(AuthError::Database)?
            .is_some()
        {
            return Err(AuthError::NameTaken);
        }

        let hash = self.hasher.hash(&registration.password).await?;

        let user = match self.users.insert(&registration.name, &hash).await {
            Ok(user) => user,
            Err(DatabaseError::UniqueViolation(_)) => return Err(AuthError::NameTaken),
            Err(e) => return Err(AuthError::Database(e)),
        };

        info!("Registered user {} ({})", user.name, user.id);
        Ok(user)
    }

    pub async fn login(&self, credentials: Credentials) -> Result<LoginOutcome, AuthError> {
        let Some(user) = self
            .users
            .find_by_name(&credentials.name)
            .await
            .map_err(AuthError::Database)?
        else {
            warn!("Login rejected: unknown user");
            return Err(AuthError::InvalidCredentials);
        };

        if !self.hasher.verify(&credentials.password, &user.password).await? {
            warn!("Login rejected: bad password for user {}", user.id);
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(user.id, &user.name)?;
        info!("User {} logged in", user.id);

        Ok(LoginOutcome {
            user: user.into(),
            token,
        })
    }

    pub async fn ping(&self) -> Result<(), DatabaseError> {
        self.users.ping().await
    }
}
