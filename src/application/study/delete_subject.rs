use std::sync::Arc;
use uuid::Uuid;

use crate::domain::study::{StudyError, StudyService};

/// Deletes a subject along with its summaries and materials
pub struct DeleteSubjectUseCase {
  study_service: Arc<StudyService>,
}

impl DeleteSubjectUseCase {
  pub fn new(study_service: Arc<StudyService>) -> Self {
    Self { study_service }
  }

  pub async fn execute(&self, user_id: Uuid, subject_id: Uuid) -> Result<(), StudyError> {
    self.study_service.delete_subject(user_id, subject_id).await
  }
}
