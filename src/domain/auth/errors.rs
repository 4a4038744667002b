use thiserror::Error;

use super::value_objects::ValueObjectError;
use crate::domain::errors::RepositoryError;

/// Main authentication error type
#[derive(Debug, Error)]
pub enum AuthError {
  #[error("Invalid credentials provided")]
  InvalidCredentials,

  #[error("Email already exists")]
  EmailAlreadyExists,

  #[error("User not found")]
  UserNotFound,

  #[error("Invalid or expired access token")]
  InvalidAccessToken,

  #[error("Confirmation token not found")]
  InvalidConfirmationToken,

  #[error("Confirmation token expired")]
  ConfirmationTokenExpired,

  #[error("Email already confirmed")]
  EmailAlreadyConfirmed,

  #[error("Token signing failed: {0}")]
  TokenSigning(String),

  #[error("Repository error: {0}")]
  Repository(#[from] RepositoryError),

  #[error("Hash error: {0}")]
  Hash(#[from] HashError),

  #[error("Value object error: {0}")]
  ValueObject(#[from] ValueObjectError),
}

/// Password hashing and verification errors
#[derive(Debug, Error)]
pub enum HashError {
  #[error("Failed to hash password: {0}")]
  HashingFailed(String),

  #[error("Failed to verify password: {0}")]
  VerificationFailed(String),
}

impl From<sqlx::Error> for AuthError {
  fn from(error: sqlx::Error) -> Self {
    AuthError::Repository(RepositoryError::from(error))
  }
}
