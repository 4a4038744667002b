use std::sync::Arc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::ConfirmationSecret;

#[derive(Debug, Clone)]
pub struct ConfirmEmailCommand {
  /// Secret from the confirmation link
  pub token: String,
}

/// The confirmed user, already logged in
#[derive(Debug, Clone)]
pub struct ConfirmEmailResponse {
  pub token: String,
  pub name: String,
  pub email: String,
}

pub struct ConfirmEmailUseCase {
  auth_service: Arc<AuthService>,
}

impl ConfirmEmailUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  pub async fn execute(
    &self,
    command: ConfirmEmailCommand,
  ) -> Result<ConfirmEmailResponse, AuthError> {
    let secret = ConfirmationSecret::from_string(command.token)
      .map_err(|_| AuthError::InvalidConfirmationToken)?;

    let (user, access_token) = self.auth_service.confirm_email(secret).await?;

    Ok(ConfirmEmailResponse {
      token: access_token.token,
      name: user.name,
      email: user.email,
    })
  }
}
