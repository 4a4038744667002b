use std::sync::Arc;
use uuid::Uuid;

use super::responses::RecentMaterialResponse;
use crate::domain::study::{StudyError, StudyService};

/// The user's newest uploads for the dashboard
pub struct ListRecentMaterialsUseCase {
  study_service: Arc<StudyService>,
}

impl ListRecentMaterialsUseCase {
  pub fn new(study_service: Arc<StudyService>) -> Self {
    Self { study_service }
  }

  pub async fn execute(&self, user_id: Uuid) -> Result<Vec<RecentMaterialResponse>, StudyError> {
    let recent = self.study_service.recent_materials(user_id).await?;
    Ok(recent.into_iter().map(Into::into).collect())
  }
}
