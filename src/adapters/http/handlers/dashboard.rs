use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;

use crate::adapters::http::{
  dtos::{DashboardStatsDto, RecentMaterialDto},
  errors::ApiError,
  handlers::get_user,
};
use crate::application::study::{GetDashboardStatsUseCase, ListRecentMaterialsUseCase};

/// GET /dashboard/estatisticas
pub async fn dashboard_stats_handler(
  use_case: web::Data<Arc<GetDashboardStatsUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&http_req)?;

  let stats = use_case.execute(user.id).await?;

  Ok(HttpResponse::Ok().json(DashboardStatsDto::from(stats)))
}

/// GET /dashboard/materiais/recentes
pub async fn recent_materials_handler(
  use_case: web::Data<Arc<ListRecentMaterialsUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&http_req)?;

  let materials = use_case.execute(user.id).await?;
  let body: Vec<RecentMaterialDto> = materials.into_iter().map(Into::into).collect();

  Ok(HttpResponse::Ok().json(body))
}
