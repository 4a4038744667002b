use actix_web::{HttpRequest, HttpResponse};

use crate::adapters::http::{dtos::CurrentUserResponse, errors::ApiError, handlers::get_user};

/// GET /usuarios/me
pub async fn current_user_handler(req: HttpRequest) -> Result<HttpResponse, ApiError> {
  let user = get_user(&req)?;

  Ok(HttpResponse::Ok().json(CurrentUserResponse {
    name: user.name,
    email: user.email,
  }))
}
