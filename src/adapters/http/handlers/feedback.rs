use actix_web::{HttpRequest, HttpResponse, http::header, web};
use std::sync::Arc;
use validator::Validate;

use crate::adapters::http::{
  dtos::{FeedbackRequest, FeedbackResponse},
  errors::ApiError,
  handlers::get_user,
};
use crate::application::feedback::{SubmitFeedbackCommand, SubmitFeedbackUseCase};

/// Submit product feedback, subject to the daily quota
/// POST /feedback
pub async fn submit_feedback_handler(
  request: web::Json<FeedbackRequest>,
  use_case: web::Data<Arc<SubmitFeedbackUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  request.validate()?;
  let user = get_user(&http_req)?;

  let request = request.into_inner();
  let user_agent = request
    .user_agent
    .filter(|ua| !ua.trim().is_empty())
    .or_else(|| header_user_agent(&http_req))
    .unwrap_or_default();

  let command = SubmitFeedbackCommand {
    user_id: user.id,
    kind: request.kind,
    rating: request.rating,
    message: request.message,
    user_email: request.user_email,
    page: request.page,
    user_agent,
  };

  let response = use_case.execute(command).await?;

  Ok(HttpResponse::Created().json(FeedbackResponse::from(response)))
}

fn header_user_agent(req: &HttpRequest) -> Option<String> {
  req
    .headers()
    .get(header::USER_AGENT)
    .and_then(|h| h.to_str().ok())
    .map(|s| s.to_string())
}
