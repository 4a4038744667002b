pub mod auth;
pub mod dashboard;
pub mod feedback;
pub mod materials;
pub mod subjects;
pub mod summaries;
pub mod users;

use crate::{
  adapters::http::errors::{ApiError, AuthErrorKind},
  domain::auth::entities::User,
};
use actix_web::{HttpMessage, HttpRequest};

/// Extract authenticated user from request extensions
pub fn get_user(req: &HttpRequest) -> Result<User, ApiError> {
  let user = req.extensions().get::<User>().cloned();

  if user.is_none() {
    tracing::warn!(
      "get_user: User not found in request extensions for path {}",
      req.path()
    );
  }

  user.ok_or(ApiError::Auth(AuthErrorKind::InvalidToken))
}
