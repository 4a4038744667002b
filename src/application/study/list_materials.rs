use std::sync::Arc;
use uuid::Uuid;

use super::responses::MaterialResponse;
use crate::domain::study::{StudyError, StudyService};

pub struct ListMaterialsUseCase {
  study_service: Arc<StudyService>,
}

impl ListMaterialsUseCase {
  pub fn new(study_service: Arc<StudyService>) -> Self {
    Self { study_service }
  }

  pub async fn execute(
    &self,
    user_id: Uuid,
    subject_id: Uuid,
  ) -> Result<Vec<MaterialResponse>, StudyError> {
    let materials = self
      .study_service
      .list_materials(user_id, subject_id)
      .await?;
    Ok(materials.into_iter().map(Into::into).collect())
  }
}
