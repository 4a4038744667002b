use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use super::entities::{ConfirmationToken, UsageKind, User};
use super::errors::AuthError;
use super::value_objects::{Email, Password, PasswordHash, TokenHash};

/// Repository trait for user persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
  async fn create(&self, user: User) -> Result<User, AuthError>;

  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AuthError>;

  async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError>;

  /// Persists profile and enabled flag. Usage counters are only changed
  /// through the atomic quota methods below.
  async fn update(&self, user: User) -> Result<User, AuthError>;

  /// Atomically counts one use of `kind` for `today` when the user is under
  /// `limit`. Returns false when the limit is reached.
  async fn try_consume_usage(
    &self,
    user_id: Uuid,
    kind: UsageKind,
    today: NaiveDate,
    limit: u32,
  ) -> Result<bool, AuthError>;

  /// Gives back one use of `kind` counted for `today`
  async fn release_usage(
    &self,
    user_id: Uuid,
    kind: UsageKind,
    today: NaiveDate,
  ) -> Result<(), AuthError>;
}

/// Repository trait for email confirmation tokens
#[async_trait]
pub trait ConfirmationTokenRepository: Send + Sync {
  async fn create(&self, token: ConfirmationToken) -> Result<ConfirmationToken, AuthError>;

  async fn find_by_hash(&self, hash: &TokenHash) -> Result<Option<ConfirmationToken>, AuthError>;

  async fn update(&self, token: ConfirmationToken) -> Result<ConfirmationToken, AuthError>;
}

/// Service trait for password hashing operations
#[async_trait]
pub trait PasswordHasher: Send + Sync {
  async fn hash(&self, password: &Password) -> Result<PasswordHash, AuthError>;

  async fn verify(
    &self,
    password: &Password,
    hashed_password: &PasswordHash,
  ) -> Result<bool, AuthError>;
}

/// Service trait for secure token generation
#[async_trait]
pub trait TokenGenerator: Send + Sync {
  /// Generates a URL-safe random secret
  async fn generate(&self) -> Result<String, AuthError>;
}

/// A signed bearer token handed to clients
#[derive(Debug, Clone)]
pub struct AccessToken {
  pub token: String,
  pub expires_at: DateTime<Utc>,
}

/// Identity carried by a verified access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessTokenClaims {
  pub user_id: Uuid,
  pub email: String,
}

/// Issues and verifies stateless access tokens
pub trait AccessTokenService: Send + Sync {
  fn issue(&self, user: &User) -> Result<AccessToken, AuthError>;

  fn verify(&self, token: &str) -> Result<AccessTokenClaims, AuthError>;
}
