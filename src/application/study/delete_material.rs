use std::sync::Arc;
use uuid::Uuid;

use crate::domain::study::{StudyError, StudyService};

pub struct DeleteMaterialUseCase {
  study_service: Arc<StudyService>,
}

impl DeleteMaterialUseCase {
  pub fn new(study_service: Arc<StudyService>) -> Self {
    Self { study_service }
  }

  pub async fn execute(&self, user_id: Uuid, material_id: Uuid) -> Result<(), StudyError> {
    self
      .study_service
      .delete_material(user_id, material_id)
      .await
  }
}
