use actix_web::{HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use crate::adapters::http::{
  dtos::{
    ConfirmEmailQuery, ConfirmEmailResponse, LoginRequest, LoginResponse, RegisterRequest,
    RegisterResponse,
  },
  errors::ApiError,
};
use crate::application::auth::{
  ConfirmEmailCommand, ConfirmEmailUseCase, LoginUserCommand, LoginUserUseCase,
  RegisterUserCommand, RegisterUserUseCase,
};

/// Handler for user registration
///
/// POST /auth/register
/// Body: RegisterRequest (JSON)
/// Response: RegisterResponse (JSON) with status 201
pub async fn register_handler(
  request: web::Json<RegisterRequest>,
  use_case: web::Data<Arc<RegisterUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let request = request.into_inner();
  let command = RegisterUserCommand {
    name: request.name,
    email: request.email,
    password: request.password,
  };

  let response = use_case.execute(command).await?;

  Ok(HttpResponse::Created().json(RegisterResponse {
    id: response.user_id,
    name: response.name,
    email: response.email,
  }))
}

/// Handler for user login
///
/// POST /auth/login
/// Body: LoginRequest (JSON)
/// Response: `{token}` with status 200
pub async fn login_handler(
  request: web::Json<LoginRequest>,
  use_case: web::Data<Arc<LoginUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;

  let request = request.into_inner();
  let command = LoginUserCommand {
    email: request.email,
    password: request.password,
  };

  let response = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(LoginResponse {
    token: response.token,
  }))
}

/// Handler for email confirmation
///
/// POST /auth/confirm-email?token=...
/// Response: `{token, nome, email}` so the client is logged in right away
pub async fn confirm_email_handler(
  query: web::Query<ConfirmEmailQuery>,
  use_case: web::Data<Arc<ConfirmEmailUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let command = ConfirmEmailCommand {
    token: query.into_inner().token,
  };

  let response = use_case.execute(command).await?;

  Ok(HttpResponse::Ok().json(ConfirmEmailResponse {
    token: response.token,
    name: response.name,
    email: response.email,
  }))
}
