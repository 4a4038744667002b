use std::sync::Arc;
use uuid::Uuid;

use super::responses::SubjectResponse;
use crate::domain::study::{StudyError, StudyService};

/// Lists the user's subjects ordered by name
pub struct ListSubjectsUseCase {
  study_service: Arc<StudyService>,
}

impl ListSubjectsUseCase {
  pub fn new(study_service: Arc<StudyService>) -> Self {
    Self { study_service }
  }

  pub async fn execute(&self, user_id: Uuid) -> Result<Vec<SubjectResponse>, StudyError> {
    let subjects = self.study_service.list_subjects(user_id).await?;
    Ok(subjects.into_iter().map(SubjectResponse::from).collect())
  }
}
