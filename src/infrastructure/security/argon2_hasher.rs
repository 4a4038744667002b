use argon2::password_hash::SaltString;
use argon2::{
  Algorithm, Argon2, Params, Version,
  password_hash::{
    PasswordHash as Argon2PasswordHash, PasswordHasher as Argon2PasswordHasherTrait,
    PasswordVerifier,
  },
};
use async_trait::async_trait;

use crate::domain::auth::errors::{AuthError, HashError};
use crate::domain::auth::ports::PasswordHasher;
use crate::domain::auth::value_objects::{Password, PasswordHash};

/// Argon2id password hasher (19 MiB, 2 iterations, 1 lane).
///
/// Hashing runs on the blocking thread pool so it never stalls the
/// actix workers.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
  argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
  pub fn new() -> Result<Self, AuthError> {
    let params = Params::new(19_456, 2, 1, Some(32)).map_err(|e| {
      HashError::HashingFailed(format!("Failed to create Argon2 params: {}", e))
    })?;

    Ok(Self {
      argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
    })
  }

  fn hash_blocking(&self, password: &str) -> Result<String, HashError> {
    let salt = SaltString::generate(&mut rand::rngs::OsRng);
    self
      .argon2
      .hash_password(password.as_bytes(), &salt)
      .map(|hash| hash.to_string())
      .map_err(|e| HashError::HashingFailed(e.to_string()))
  }

  fn verify_blocking(&self, password: &str, hash: &str) -> Result<bool, HashError> {
    let parsed = Argon2PasswordHash::new(hash)
      .map_err(|e| HashError::VerificationFailed(format!("Invalid hash format: {}", e)))?;

    match self.argon2.verify_password(password.as_bytes(), &parsed) {
      Ok(()) => Ok(true),
      Err(argon2::password_hash::Error::Password) => Ok(false),
      Err(e) => Err(HashError::VerificationFailed(e.to_string())),
    }
  }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
  async fn hash(&self, password: &Password) -> Result<PasswordHash, AuthError> {
    let hasher = self.clone();
    let password = password.clone();

    let hash = tokio::task::spawn_blocking(move || hasher.hash_blocking(password.as_str()))
      .await
      .map_err(|e| HashError::HashingFailed(format!("Hashing task failed: {}", e)))??;

    Ok(PasswordHash::from_hash(hash)?)
  }

  async fn verify(
    &self,
    password: &Password,
    hashed_password: &PasswordHash,
  ) -> Result<bool, AuthError> {
    let hasher = self.clone();
    let password = password.clone();
    let hash = hashed_password.as_str().to_string();

    let matches =
      tokio::task::spawn_blocking(move || hasher.verify_blocking(password.as_str(), &hash))
        .await
        .map_err(|e| HashError::VerificationFailed(format!("Verification task failed: {}", e)))??;

    Ok(matches)
  }
}
