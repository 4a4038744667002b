use thiserror::Error;

use crate::domain::auth::AuthError;
use crate::domain::errors::RepositoryError;

#[derive(Debug, Error)]
pub enum FeedbackError {
  #[error("Tipo de feedback inválido: {0}")]
  InvalidKind(String),

  #[error("A avaliação deve estar entre 1 e 5, recebido {0}")]
  InvalidRating(u8),

  #[error("{0}")]
  Validation(String),

  #[error("Daily feedback limit of {limit} reached")]
  DailyLimitReached { limit: u32 },

  #[error("Repository error: {0}")]
  Repository(#[from] RepositoryError),

  #[error("Auth error: {0}")]
  Auth(#[from] AuthError),
}

impl From<sqlx::Error> for FeedbackError {
  fn from(error: sqlx::Error) -> Self {
    FeedbackError::Repository(RepositoryError::from(error))
  }
}
