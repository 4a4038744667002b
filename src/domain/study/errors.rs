use thiserror::Error;
use uuid::Uuid;

use super::ports::{ExtractionError, StorageError};
use super::value_objects::ValueObjectError;
use crate::domain::auth::AuthError;
use crate::domain::errors::RepositoryError;

#[derive(Debug, Error)]
pub enum StudyError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("Subject not found: {0}")]
  SubjectNotFound(Uuid),

  #[error("Material not found: {0}")]
  MaterialNotFound(Uuid),

  #[error("Summary not found: {0}")]
  SummaryNotFound(Uuid),

  #[error("Daily summary limit of {limit} reached")]
  DailySummaryLimitReached { limit: u32 },

  #[error("Uploaded file is empty")]
  EmptyFile,

  #[error("Uploaded file exceeds {max_bytes} bytes")]
  FileTooLarge { max_bytes: u64 },

  #[error("No text could be extracted from '{0}'")]
  TextCannotBeExtracted(String),

  #[error("Text extraction failed: {0}")]
  Extraction(#[from] ExtractionError),

  #[error("Storage error: {0}")]
  Storage(#[from] StorageError),

  #[error("Repository error: {0}")]
  Repository(#[from] RepositoryError),

  #[error("Auth error: {0}")]
  Auth(#[from] AuthError),

  #[error("Internal error: {0}")]
  Internal(String),
}

impl From<sqlx::Error> for StudyError {
  fn from(error: sqlx::Error) -> Self {
    StudyError::Repository(RepositoryError::from(error))
  }
}
