use std::sync::Arc;
use uuid::Uuid;

use super::responses::SummaryResponse;
use crate::domain::study::{StudyError, StudyService};

pub struct GetSummaryUseCase {
  study_service: Arc<StudyService>,
}

impl GetSummaryUseCase {
  pub fn new(study_service: Arc<StudyService>) -> Self {
    Self { study_service }
  }

  pub async fn execute(&self, user_id: Uuid, summary_id: Uuid) -> Result<SummaryResponse, StudyError> {
    let summary = self.study_service.get_summary(user_id, summary_id).await?;
    Ok(summary.into())
  }
}
