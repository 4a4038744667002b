use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use super::entities::{Material, RecentMaterial, Subject, Summary};
use super::errors::StudyError;
use super::value_objects::PageRequest;

#[async_trait]
pub trait SubjectRepository: Send + Sync {
  async fn create(&self, subject: Subject) -> Result<Subject, StudyError>;
  async fn update(&self, subject: Subject) -> Result<Subject, StudyError>;
  async fn find_by_id_and_user(&self, id: Uuid, user_id: Uuid)
  -> Result<Option<Subject>, StudyError>;
  async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Subject>, StudyError>;
  async fn delete(&self, id: Uuid) -> Result<(), StudyError>;
  async fn count_by_user(&self, user_id: Uuid) -> Result<i64, StudyError>;
}

#[async_trait]
pub trait MaterialRepository: Send + Sync {
  async fn create(&self, material: Material) -> Result<Material, StudyError>;
  async fn find_by_id_and_user(
    &self,
    id: Uuid,
    user_id: Uuid,
  ) -> Result<Option<Material>, StudyError>;
  async fn find_by_subject_and_user(
    &self,
    subject_id: Uuid,
    user_id: Uuid,
  ) -> Result<Vec<Material>, StudyError>;
  async fn find_page_by_subject(
    &self,
    subject_id: Uuid,
    page: PageRequest,
  ) -> Result<Vec<Material>, StudyError>;
  /// Newest uploads first, joined with the subject name
  async fn find_recent_by_user(
    &self,
    user_id: Uuid,
    limit: i64,
  ) -> Result<Vec<RecentMaterial>, StudyError>;
  async fn delete(&self, id: Uuid) -> Result<(), StudyError>;
  async fn delete_by_subject(&self, subject_id: Uuid) -> Result<u64, StudyError>;
  async fn count_by_user(&self, user_id: Uuid) -> Result<i64, StudyError>;
}

#[async_trait]
pub trait SummaryRepository: Send + Sync {
  async fn create(&self, summary: Summary) -> Result<Summary, StudyError>;
  async fn update(&self, summary: Summary) -> Result<Summary, StudyError>;
  async fn find_by_id_and_user(&self, id: Uuid, user_id: Uuid)
  -> Result<Option<Summary>, StudyError>;
  async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Summary>, StudyError>;
  async fn find_by_subject_and_user(
    &self,
    subject_id: Uuid,
    user_id: Uuid,
  ) -> Result<Vec<Summary>, StudyError>;
  async fn delete(&self, id: Uuid) -> Result<(), StudyError>;
  async fn delete_by_subject(&self, subject_id: Uuid) -> Result<u64, StudyError>;
  async fn count_by_user(&self, user_id: Uuid) -> Result<i64, StudyError>;
}

#[derive(Debug, Error)]
pub enum StorageError {
  #[error("Stored file not found: {0}")]
  NotFound(String),

  #[error("Invalid storage name: {0}")]
  InvalidName(String),

  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),
}

/// Blob storage for uploaded materials, addressed by storage name
#[async_trait]
pub trait FileStorage: Send + Sync {
  async fn store(&self, storage_name: &str, bytes: &[u8]) -> Result<(), StorageError>;
  async fn read(&self, storage_name: &str) -> Result<Vec<u8>, StorageError>;
  async fn delete(&self, storage_name: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Error)]
pub enum ExtractionError {
  #[error("Invalid input: {0}")]
  InvalidInput(String),

  #[error("Document is encrypted")]
  Encrypted,

  #[error("Document could not be read: {0}")]
  Unreadable(String),
}

/// Pulls plain text out of an uploaded document
#[async_trait]
pub trait TextExtractor: Send + Sync {
  async fn extract(&self, bytes: Vec<u8>, file_name: &str) -> Result<String, ExtractionError>;
}

/// Condenses a text to roughly `max_words` words
pub trait Summarizer: Send + Sync {
  fn summarize(&self, text: &str, max_words: usize) -> String;
}
