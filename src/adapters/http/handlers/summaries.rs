use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::adapters::http::{
  dtos::{
    CreateSummaryRequest, GenerateSummaryRequest, SummaryDto, SummaryListQuery,
    UpdateSummaryRequest,
  },
  errors::ApiError,
  handlers::get_user,
};
use crate::application::study::*;

/// GET /resumos?disciplinaId=
pub async fn list_summaries_handler(
  query: web::Query<SummaryListQuery>,
  use_case: web::Data<Arc<ListSummariesUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&http_req)?;

  let summaries = use_case.execute(user.id, query.disciplina_id).await?;
  let body: Vec<SummaryDto> = summaries.into_iter().map(Into::into).collect();

  Ok(HttpResponse::Ok().json(body))
}

/// POST /resumos
pub async fn create_summary_handler(
  request: web::Json<CreateSummaryRequest>,
  use_case: web::Data<Arc<CreateSummaryUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let user = get_user(&http_req)?;

  let request = request.into_inner();
  let command = CreateSummaryCommand {
    user_id: user.id,
    subject_id: request.subject_id,
    title: request.title,
    content: request.content,
  };

  let response = use_case.execute(command).await?;

  Ok(HttpResponse::Created().json(SummaryDto::from(response)))
}

/// Summarise a material, subject to the daily quota
/// POST /resumos/gerar-automatico
pub async fn generate_summary_handler(
  request: web::Json<GenerateSummaryRequest>,
  use_case: web::Data<Arc<GenerateSummaryUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&http_req)?;

  let request = request.into_inner();
  let command = GenerateSummaryCommand {
    user_id: user.id,
    material_id: request.material_id,
    subject_id: request.subject_id,
    title: request.title,
    content: request.content,
  };

  let response = use_case.execute(command).await?;

  Ok(HttpResponse::Created().json(SummaryDto::from(response)))
}

/// GET /resumos/{id}
pub async fn get_summary_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<GetSummaryUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&http_req)?;

  let response = use_case.execute(user.id, path.into_inner()).await?;

  Ok(HttpResponse::Ok().json(SummaryDto::from(response)))
}

/// PUT /resumos/{id}
pub async fn update_summary_handler(
  path: web::Path<Uuid>,
  request: web::Json<UpdateSummaryRequest>,
  use_case: web::Data<Arc<UpdateSummaryUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let user = get_user(&http_req)?;

  let request = request.into_inner();
  let command = UpdateSummaryCommand {
    user_id: user.id,
    summary_id: path.into_inner(),
    title: request.title,
    content: request.content,
  };

  let response = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(SummaryDto::from(response)))
}

/// DELETE /resumos/{id}
pub async fn delete_summary_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<DeleteSummaryUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&http_req)?;

  use_case.execute(user.id, path.into_inner()).await?;

  Ok(HttpResponse::NoContent().finish())
}
