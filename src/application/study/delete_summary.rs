use std::sync::Arc;
use uuid::Uuid;

use crate::domain::study::{StudyError, StudyService};

pub struct DeleteSummaryUseCase {
  study_service: Arc<StudyService>,
}

impl DeleteSummaryUseCase {
  pub fn new(study_service: Arc<StudyService>) -> Self {
    Self { study_service }
  }

  pub async fn execute(&self, user_id: Uuid, summary_id: Uuid) -> Result<(), StudyError> {
    self.study_service.delete_summary(user_id, summary_id).await
  }
}
