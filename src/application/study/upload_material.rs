use std::sync::Arc;
use uuid::Uuid;

use super::responses::MaterialResponse;
use crate::domain::study::{StudyError, StudyService, UploadedFile};

#[derive(Debug, Clone)]
pub struct UploadMaterialCommand {
  pub user_id: Uuid,
  pub subject_id: Uuid,
  pub file_name: String,
  pub content_type: Option<String>,
  pub bytes: Vec<u8>,
}

pub struct UploadMaterialUseCase {
  study_service: Arc<StudyService>,
}

impl UploadMaterialUseCase {
  pub fn new(study_service: Arc<StudyService>) -> Self {
    Self { study_service }
  }

  /// Largest accepted upload, used by the HTTP layer to stop reading early
  pub fn max_file_size_bytes(&self) -> u64 {
    self.study_service.config().max_file_size_bytes
  }

  pub async fn execute(
    &self,
    command: UploadMaterialCommand,
  ) -> Result<MaterialResponse, StudyError> {
    let file = UploadedFile {
      file_name: command.file_name,
      content_type: command.content_type,
      bytes: command.bytes,
    };

    let material = self
      .study_service
      .upload_material(command.user_id, command.subject_id, file)
      .await?;

    Ok(material.into())
  }
}
