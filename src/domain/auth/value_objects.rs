use argon2::PasswordHash as Argon2PasswordHash;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use thiserror::Error;
use validator::ValidateEmail;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ValueObjectError {
  #[error("E-mail inválido: {0}")]
  InvalidEmail(String),

  #[error("A senha deve ter no mínimo 8 caracteres")]
  PasswordTooShort,

  #[error("A senha deve ter no máximo 128 caracteres")]
  PasswordTooLong,

  #[error("O nome é obrigatório e deve ter no máximo {max} caracteres")]
  InvalidName { max: usize },

  #[error("Invalid password hash format")]
  InvalidPasswordHash,

  #[error("Token de confirmação inválido")]
  InvalidToken,
}

// ============================================================================
// Email Value Object
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
  /// Creates a new Email after validation
  pub fn new(email: impl Into<String>) -> Result<Self, ValueObjectError> {
    let email = email.into();
    let email = email.trim();

    if !email.validate_email() {
      return Err(ValueObjectError::InvalidEmail(email.to_string()));
    }

    // Normalize to lowercase
    Ok(Self(email.to_lowercase()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for Email {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl AsRef<str> for Email {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

// ============================================================================
// UserName Value Object
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserName(String);

impl UserName {
  const MAX_LENGTH: usize = 100;

  pub fn new(name: impl Into<String>) -> Result<Self, ValueObjectError> {
    let name = name.into();
    let trimmed = name.trim();

    if trimmed.is_empty() || trimmed.chars().count() > Self::MAX_LENGTH {
      return Err(ValueObjectError::InvalidName {
        max: Self::MAX_LENGTH,
      });
    }

    Ok(Self(trimmed.to_string()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

// ============================================================================
// Password Value Object (Plain Password - Never Stored)
// ============================================================================

/// Plain-text password, wiped from memory when dropped
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Password(String);

impl Password {
  const MIN_LENGTH: usize = 8;
  const MAX_LENGTH: usize = 128;

  /// Creates a new Password after validation
  pub fn new(password: impl Into<String>) -> Result<Self, ValueObjectError> {
    let password = password.into();
    let length = password.chars().count();

    if length < Self::MIN_LENGTH {
      return Err(ValueObjectError::PasswordTooShort);
    }

    if length > Self::MAX_LENGTH {
      return Err(ValueObjectError::PasswordTooLong);
    }

    Ok(Self(password))
  }

  /// Returns the password as a string slice (use with caution)
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Debug for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Password(***)")
  }
}

// ============================================================================
// PasswordHash Value Object (Argon2id Hash)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordHash(String);

impl PasswordHash {
  /// Wraps an existing PHC hash string after checking its format
  pub fn from_hash(hash: impl Into<String>) -> Result<Self, ValueObjectError> {
    let hash = hash.into();

    Argon2PasswordHash::new(&hash).map_err(|_| ValueObjectError::InvalidPasswordHash)?;

    Ok(Self(hash))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

// ============================================================================
// ConfirmationSecret Value Object (Random Token Sent By Email)
// ============================================================================

/// The secret half of an email confirmation token.
///
/// Only its [`TokenHash`] is persisted; the plain value travels in the
/// confirmation link.
#[derive(Clone)]
pub struct ConfirmationSecret(String);

impl ConfirmationSecret {
  /// 32 random bytes in unpadded base64url
  const ENCODED_LENGTH: usize = 43;

  /// Wraps a freshly generated secret
  pub fn new(secret: impl Into<String>) -> Result<Self, ValueObjectError> {
    Self::from_string(secret)
  }

  /// Parses a secret received from a client
  pub fn from_string(secret: impl Into<String>) -> Result<Self, ValueObjectError> {
    let secret = secret.into();
    let secret = secret.trim();

    if secret.len() != Self::ENCODED_LENGTH {
      return Err(ValueObjectError::InvalidToken);
    }

    if !secret
      .chars()
      .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
      return Err(ValueObjectError::InvalidToken);
    }

    Ok(Self(secret.to_string()))
  }

  /// SHA-256 of the secret, hex encoded
  pub fn hash(&self) -> TokenHash {
    let mut hasher = Sha256::new();
    hasher.update(self.0.as_bytes());
    TokenHash(hex::encode(hasher.finalize()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Debug for ConfirmationSecret {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("ConfirmationSecret(***)")
  }
}

// ============================================================================
// TokenHash Value Object (SHA-256 Hash of Token)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHash(String);

impl TokenHash {
  pub fn from_hash(hash: impl Into<String>) -> Result<Self, ValueObjectError> {
    let hash = hash.into();

    // SHA-256 produces 64 hex characters
    if hash.len() != 64 || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
      return Err(ValueObjectError::InvalidToken);
    }

    Ok(Self(hash))
  }

  pub fn verify(&self, secret: &ConfirmationSecret) -> bool {
    self.0 == secret.hash().0
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for TokenHash {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const SECRET: &str = "q3JXUv0Ue0mP7yZt6bW1xk2lVb9oR8sTcQ4nA5dEf-_";

  #[test]
  fn test_email_validation() {
    assert!(Email::new("aluno@pdfocus.com.br").is_ok());
    assert!(Email::new("user.name@domain.co.uk").is_ok());

    assert!(Email::new("invalid").is_err());
    assert!(Email::new("@example.com").is_err());
    assert!(Email::new("test@").is_err());
  }

  #[test]
  fn test_email_normalization() {
    let email = Email::new("  Aluno@PDFocus.COM ").unwrap();
    assert_eq!(email.as_str(), "aluno@pdfocus.com");
  }

  #[test]
  fn test_user_name_is_trimmed_and_required() {
    assert_eq!(UserName::new("  Maria  ").unwrap().as_str(), "Maria");
    assert!(UserName::new("   ").is_err());
    assert!(UserName::new("a".repeat(101)).is_err());
  }

  #[test]
  fn test_password_validation() {
    assert!(Password::new("password123").is_ok());

    assert!(matches!(
      Password::new("short"),
      Err(ValueObjectError::PasswordTooShort)
    ));

    assert!(matches!(
      Password::new("a".repeat(129)),
      Err(ValueObjectError::PasswordTooLong)
    ));
  }

  #[test]
  fn test_password_length_counts_characters() {
    // 8 characters, 11 bytes
    assert!(Password::new("açãoação").is_ok());
  }

  #[test]
  fn test_password_debug_is_redacted() {
    let password = Password::new("supersecret").unwrap();
    assert_eq!(format!("{:?}", password), "Password(***)");
  }

  #[test]
  fn test_password_hash_rejects_garbage() {
    assert!(PasswordHash::from_hash("not-a-phc-string").is_err());
  }

  #[test]
  fn test_confirmation_secret_format() {
    assert!(ConfirmationSecret::from_string(SECRET).is_ok());
    assert!(ConfirmationSecret::from_string("too-short").is_err());

    let with_plus = format!("{}+", &SECRET[..42]);
    assert!(ConfirmationSecret::from_string(with_plus).is_err());
  }

  #[test]
  fn test_token_hash_verifies_its_secret() {
    let secret = ConfirmationSecret::from_string(SECRET).unwrap();
    let hash = secret.hash();

    assert_eq!(hash.as_str().len(), 64);
    assert!(hash.verify(&secret));

    let other = ConfirmationSecret::from_string(format!("{}A", &SECRET[..42])).unwrap();
    assert!(!hash.verify(&other));
  }

  #[test]
  fn test_token_hash_round_trips_from_storage() {
    let secret = ConfirmationSecret::from_string(SECRET).unwrap();
    let stored = secret.hash().into_inner();
    assert_eq!(TokenHash::from_hash(stored).unwrap(), secret.hash());
    assert!(TokenHash::from_hash("xyz").is_err());
  }
}
