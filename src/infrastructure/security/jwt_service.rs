use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::auth::entities::User;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::{AccessToken, AccessTokenClaims, AccessTokenService};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
  /// User email
  sub: String,
  uid: Uuid,
  iat: i64,
  exp: i64,
}

/// HS256 bearer tokens signed with a base64 encoded secret
pub struct JwtAccessTokenService {
  encoding_key: EncodingKey,
  decoding_key: DecodingKey,
  validation: Validation,
  expiration: Duration,
}

impl JwtAccessTokenService {
  pub fn new(secret_base64: &str, expiration_seconds: i64) -> Result<Self, AuthError> {
    let encoding_key = EncodingKey::from_base64_secret(secret_base64)
      .map_err(|e| AuthError::TokenSigning(format!("Invalid JWT secret: {}", e)))?;
    let decoding_key = DecodingKey::from_base64_secret(secret_base64)
      .map_err(|e| AuthError::TokenSigning(format!("Invalid JWT secret: {}", e)))?;

    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    Ok(Self {
      encoding_key,
      decoding_key,
      validation,
      expiration: Duration::seconds(expiration_seconds),
    })
  }
}

impl AccessTokenService for JwtAccessTokenService {
  fn issue(&self, user: &User) -> Result<AccessToken, AuthError> {
    let issued_at = Utc::now();
    let expires_at = issued_at + self.expiration;

    let claims = Claims {
      sub: user.email.clone(),
      uid: user.id,
      iat: issued_at.timestamp(),
      exp: expires_at.timestamp(),
    };

    let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
      .map_err(|e| AuthError::TokenSigning(e.to_string()))?;

    Ok(AccessToken { token, expires_at })
  }

  fn verify(&self, token: &str) -> Result<AccessTokenClaims, AuthError> {
    let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
      tracing::debug!("Rejected access token: {}", e);
      AuthError::InvalidAccessToken
    })?;

    Ok(AccessTokenClaims {
      user_id: data.claims.uid,
      email: data.claims.sub,
    })
  }
}
