use std::sync::Arc;
use uuid::Uuid;

use super::responses::SummaryResponse;
use crate::domain::study::{StudyError, StudyService};

pub struct ListSummariesUseCase {
  study_service: Arc<StudyService>,
}

impl ListSummariesUseCase {
  pub fn new(study_service: Arc<StudyService>) -> Self {
    Self { study_service }
  }

  /// Newest first; `subject_id` narrows the list to one subject
  pub async fn execute(
    &self,
    user_id: Uuid,
    subject_id: Option<Uuid>,
  ) -> Result<Vec<SummaryResponse>, StudyError> {
    let summaries = self
      .study_service
      .list_summaries(user_id, subject_id)
      .await?;
    Ok(summaries.into_iter().map(Into::into).collect())
  }
}
