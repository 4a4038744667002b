use std::sync::Arc;

use crate::domain::auth::entities::User;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;

/// Response containing the authenticated user
#[derive(Debug, Clone)]
pub struct GetCurrentUserResponse {
  pub user: User,
}

/// Use case for resolving the user behind a bearer token
pub struct GetCurrentUserUseCase {
  auth_service: Arc<AuthService>,
}

impl GetCurrentUserUseCase {
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// # Errors
  /// Returns `AuthError::InvalidAccessToken` for a bad or expired token, or
  /// when the user no longer exists
  pub async fn execute(&self, access_token: String) -> Result<GetCurrentUserResponse, AuthError> {
    let user = self.auth_service.authenticate(&access_token).await?;
    Ok(GetCurrentUserResponse { user })
  }
}
