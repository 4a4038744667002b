use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::TokenGenerator;

const TOKEN_BYTES: usize = 32;

/// 32 random bytes from the OS RNG, base64url encoded without padding
#[derive(Debug, Default, Clone, Copy)]
pub struct SecureTokenGenerator;

impl SecureTokenGenerator {
  pub fn new() -> Self {
    Self
  }
}

#[async_trait]
impl TokenGenerator for SecureTokenGenerator {
  async fn generate(&self) -> Result<String, AuthError> {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    Ok(URL_SAFE_NO_PAD.encode(bytes))
  }
}
