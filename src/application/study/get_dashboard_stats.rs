use std::sync::Arc;
use uuid::Uuid;

use crate::domain::study::{StudyError, StudyService};

#[derive(Debug, Clone, Copy)]
pub struct DashboardStatsResponse {
  pub total_subjects: i64,
  pub total_summaries: i64,
  pub total_materials: i64,
}

pub struct GetDashboardStatsUseCase {
  study_service: Arc<StudyService>,
}

impl GetDashboardStatsUseCase {
  pub fn new(study_service: Arc<StudyService>) -> Self {
    Self { study_service }
  }

  pub async fn execute(&self, user_id: Uuid) -> Result<DashboardStatsResponse, StudyError> {
    let stats = self.study_service.dashboard_stats(user_id).await?;

    Ok(DashboardStatsResponse {
      total_subjects: stats.total_subjects,
      total_summaries: stats.total_summaries,
      total_materials: stats.total_materials,
    })
  }
}
