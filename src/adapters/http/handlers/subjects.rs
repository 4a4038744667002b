use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::adapters::http::{
  dtos::{PageQuery, SubjectDetailsDto, SubjectDto, SubjectRequest},
  errors::ApiError,
  handlers::get_user,
};
use crate::application::study::*;

/// Create a subject
/// POST /disciplinas
pub async fn create_subject_handler(
  request: web::Json<SubjectRequest>,
  use_case: web::Data<Arc<CreateSubjectUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let user = get_user(&http_req)?;

  let request = request.into_inner();
  let command = CreateSubjectCommand {
    user_id: user.id,
    name: request.name,
    description: request.description,
  };

  let response = use_case.execute(command).await?;

  Ok(HttpResponse::Created().json(SubjectDto::from(response)))
}

/// List the user's subjects
/// GET /disciplinas
pub async fn list_subjects_handler(
  use_case: web::Data<Arc<ListSubjectsUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&http_req)?;

  let subjects = use_case.execute(user.id).await?;
  let body: Vec<SubjectDto> = subjects.into_iter().map(Into::into).collect();

  Ok(HttpResponse::Ok().json(body))
}

/// Subject with its summaries and a page of its materials
/// GET /disciplinas/{id}?page=&size=
pub async fn get_subject_details_handler(
  path: web::Path<Uuid>,
  query: web::Query<PageQuery>,
  use_case: web::Data<Arc<GetSubjectDetailsUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&http_req)?;

  let command = GetSubjectDetailsCommand {
    user_id: user.id,
    subject_id: path.into_inner(),
    page: query.page,
    size: query.size,
  };

  let response = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(SubjectDetailsDto::from(response)))
}

/// PUT /disciplinas/{id}
pub async fn update_subject_handler(
  path: web::Path<Uuid>,
  request: web::Json<SubjectRequest>,
  use_case: web::Data<Arc<UpdateSubjectUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let user = get_user(&http_req)?;

  let request = request.into_inner();
  let command = UpdateSubjectCommand {
    user_id: user.id,
    subject_id: path.into_inner(),
    name: request.name,
    description: request.description,
  };

  let response = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(SubjectDto::from(response)))
}

/// Delete a subject together with its summaries and materials
/// DELETE /disciplinas/{id}
pub async fn delete_subject_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<DeleteSubjectUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let user = get_user(&http_req)?;

  use_case.execute(user.id, path.into_inner()).await?;

  Ok(HttpResponse::NoContent().finish())
}
