use std::sync::Arc;
use uuid::Uuid;

use crate::domain::study::{StudyError, StudyService};

/// Stored bytes of a material plus what is needed to serve them
#[derive(Debug, Clone)]
pub struct MaterialFileResponse {
  pub file_name: String,
  pub content_type: String,
  pub bytes: Vec<u8>,
}

pub struct GetMaterialFileUseCase {
  study_service: Arc<StudyService>,
}

impl GetMaterialFileUseCase {
  pub fn new(study_service: Arc<StudyService>) -> Self {
    Self { study_service }
  }

  pub async fn execute(
    &self,
    user_id: Uuid,
    material_id: Uuid,
  ) -> Result<MaterialFileResponse, StudyError> {
    let (material, bytes) = self
      .study_service
      .load_material_file(user_id, material_id)
      .await?;

    Ok(MaterialFileResponse {
      file_name: material.original_name,
      content_type: material.content_type,
      bytes,
    })
  }
}
