use std::sync::Arc;
use uuid::Uuid;

use super::responses::SubjectResponse;
use crate::domain::study::{StudyError, StudyService, SubjectName};

#[derive(Debug, Clone)]
pub struct CreateSubjectCommand {
  pub user_id: Uuid,
  pub name: String,
  pub description: Option<String>,
}

pub struct CreateSubjectUseCase {
  study_service: Arc<StudyService>,
}

impl CreateSubjectUseCase {
  pub fn new(study_service: Arc<StudyService>) -> Self {
    Self { study_service }
  }

  pub async fn execute(&self, command: CreateSubjectCommand) -> Result<SubjectResponse, StudyError> {
    let name = SubjectName::new(command.name)?;

    let subject = self
      .study_service
      .create_subject(command.user_id, name, command.description)
      .await?;

    Ok(subject.into())
  }
}
