use chrono::{Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

use super::entities::{ConfirmationToken, User};
use super::errors::{AuthError, HashError};
use super::ports::{
  AccessToken, AccessTokenService, ConfirmationTokenRepository, PasswordHasher, TokenGenerator,
  UserRepository,
};
use super::value_objects::{ConfirmationSecret, Email, Password, PasswordHash, UserName};
use crate::domain::errors::RepositoryError;
use crate::domain::notifications::{AccountConfirmation, Notifier};

/// Runtime settings for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
  pub confirmation_token_ttl: Duration,
  /// Base URL of the web client, used to build confirmation links
  pub frontend_url: String,
}

/// Authentication service implementing core business logic
pub struct AuthService {
  user_repo: Arc<dyn UserRepository>,
  token_repo: Arc<dyn ConfirmationTokenRepository>,
  password_hasher: Arc<dyn PasswordHasher>,
  token_generator: Arc<dyn TokenGenerator>,
  access_tokens: Arc<dyn AccessTokenService>,
  notifier: Arc<dyn Notifier>,
  config: AuthServiceConfig,
}

impl AuthService {
  pub fn new(
    user_repo: Arc<dyn UserRepository>,
    token_repo: Arc<dyn ConfirmationTokenRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_generator: Arc<dyn TokenGenerator>,
    access_tokens: Arc<dyn AccessTokenService>,
    notifier: Arc<dyn Notifier>,
    config: AuthServiceConfig,
  ) -> Self {
    Self {
      user_repo,
      token_repo,
      password_hasher,
      token_generator,
      access_tokens,
      notifier,
      config,
    }
  }

  /// Registers a new, unconfirmed user and emails a confirmation link.
  ///
  /// # Errors
  /// Returns `AuthError::EmailAlreadyExists` if email is already registered.
  /// Mail delivery problems are logged and never fail the registration.
  pub async fn register(
    &self,
    name: UserName,
    email: Email,
    password: Password,
  ) -> Result<User, AuthError> {
    if self.user_repo.find_by_email(&email).await?.is_some() {
      return Err(AuthError::EmailAlreadyExists);
    }

    let password_hash = self.password_hasher.hash(&password).await?;

    let user = User::new(
      name.into_inner(),
      email.into_inner(),
      password_hash.into_inner(),
    );

    let created_user = match self.user_repo.create(user).await {
      Ok(user) => user,
      Err(AuthError::Repository(RepositoryError::DuplicateKey(_))) => {
        return Err(AuthError::EmailAlreadyExists);
      }
      Err(e) => return Err(e),
    };

    let secret = ConfirmationSecret::new(self.token_generator.generate().await?)?;
    let token = ConfirmationToken::new(
      created_user.id,
      secret.hash().into_inner(),
      self.config.confirmation_token_ttl,
    );
    self.token_repo.create(token).await?;

    let message = AccountConfirmation {
      name: created_user.name.clone(),
      email: created_user.email.clone(),
      confirmation_link: self.confirmation_link(&secret),
    };

    if let Err(e) = self.notifier.send_account_confirmation(message).await {
      tracing::warn!(user_id = %created_user.id, "Failed to send confirmation email: {}", e);
    }

    tracing::info!(user_id = %created_user.id, "User registered");

    Ok(created_user)
  }

  /// Verifies credentials and issues an access token
  pub async fn login(
    &self,
    email: Email,
    password: Password,
  ) -> Result<(User, AccessToken), AuthError> {
    let user = self
      .user_repo
      .find_by_email(&email)
      .await?
      .ok_or(AuthError::InvalidCredentials)?;

    let password_hash = PasswordHash::from_hash(&user.password_hash)
      .map_err(|e| AuthError::Hash(HashError::VerificationFailed(e.to_string())))?;

    if !self.password_hasher.verify(&password, &password_hash).await? {
      return Err(AuthError::InvalidCredentials);
    }

    let access_token = self.access_tokens.issue(&user)?;

    Ok((user, access_token))
  }

  /// Consumes a confirmation secret, enables the account and logs the user in
  pub async fn confirm_email(
    &self,
    secret: ConfirmationSecret,
  ) -> Result<(User, AccessToken), AuthError> {
    let mut token = self
      .token_repo
      .find_by_hash(&secret.hash())
      .await?
      .ok_or(AuthError::InvalidConfirmationToken)?;

    if token.is_confirmed() {
      return Err(AuthError::EmailAlreadyConfirmed);
    }

    let now = Utc::now();
    if token.is_expired_at(now) {
      return Err(AuthError::ConfirmationTokenExpired);
    }

    let mut user = self
      .user_repo
      .find_by_id(token.user_id)
      .await?
      .ok_or(AuthError::UserNotFound)?;

    user.enable();
    let user = self.user_repo.update(user).await?;

    token.confirm(now);
    self.token_repo.update(token).await?;

    tracing::info!(user_id = %user.id, "Email confirmed");

    let access_token = self.access_tokens.issue(&user)?;

    Ok((user, access_token))
  }

  /// Resolves the user behind a bearer token
  pub async fn authenticate(&self, access_token: &str) -> Result<User, AuthError> {
    let claims = self.access_tokens.verify(access_token)?;

    self
      .user_repo
      .find_by_id(claims.user_id)
      .await?
      .ok_or(AuthError::InvalidAccessToken)
  }

  pub async fn get_user(&self, user_id: Uuid) -> Result<User, AuthError> {
    self
      .user_repo
      .find_by_id(user_id)
      .await?
      .ok_or(AuthError::UserNotFound)
  }

  fn confirmation_link(&self, secret: &ConfirmationSecret) -> String {
    format!(
      "{}/confirmar-email?token={}",
      self.config.frontend_url.trim_end_matches('/'),
      secret.as_str()
    )
  }
}
