use actix_web::web;
use std::sync::Arc;

use crate::application::auth::{
  ConfirmEmailUseCase, GetCurrentUserUseCase, LoginUserUseCase, RegisterUserUseCase,
};
use crate::application::feedback::SubmitFeedbackUseCase;
use crate::application::study::*;
use crate::domain::study::StudyService;

use super::errors::ApiError;
use super::handlers::auth::{confirm_email_handler, login_handler, register_handler};
use super::handlers::{dashboard, feedback, materials, subjects, summaries, users};
use super::middleware::AuthMiddleware;

/// Rejections from the JSON, path and query extractors answer with the
/// standard error body instead of actix's plain text
fn configure_extractors(cfg: &mut web::ServiceConfig) {
  cfg
    .app_data(web::JsonConfig::default().error_handler(|err, _req| {
      ApiError::Validation(format!("Corpo JSON inválido: {}", err)).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
      ApiError::Validation(format!("Parâmetro de rota inválido: {}", err)).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
      ApiError::Validation(format!("Parâmetro de consulta inválido: {}", err)).into()
    }));
}

/// Configure authentication routes
///
/// Mounts the public endpoints under the provided scope (`/auth`). Rate
/// limiting is applied by the caller on the scope.
///
/// # Routes
///
/// - POST /register - Register a new account and send the confirmation email
/// - POST /login - Exchange credentials for a JWT
/// - POST /confirm-email?token= - Confirm the account and log in
pub fn configure_auth_routes(
  cfg: &mut web::ServiceConfig,
  register_use_case: Arc<RegisterUserUseCase>,
  login_use_case: Arc<LoginUserUseCase>,
  confirm_email_use_case: Arc<ConfirmEmailUseCase>,
) {
  configure_extractors(cfg);
  cfg
    .app_data(web::Data::new(register_use_case))
    .app_data(web::Data::new(login_use_case))
    .app_data(web::Data::new(confirm_email_use_case))
    .route("/register", web::post().to(register_handler))
    .route("/login", web::post().to(login_handler))
    .route("/confirm-email", web::post().to(confirm_email_handler));
}

/// Every use case behind the study endpoints
#[derive(Clone)]
pub struct StudyUseCases {
  pub create_subject: Arc<CreateSubjectUseCase>,
  pub list_subjects: Arc<ListSubjectsUseCase>,
  pub get_subject_details: Arc<GetSubjectDetailsUseCase>,
  pub update_subject: Arc<UpdateSubjectUseCase>,
  pub delete_subject: Arc<DeleteSubjectUseCase>,
  pub upload_material: Arc<UploadMaterialUseCase>,
  pub list_materials: Arc<ListMaterialsUseCase>,
  pub delete_material: Arc<DeleteMaterialUseCase>,
  pub get_material_file: Arc<GetMaterialFileUseCase>,
  pub list_recent_materials: Arc<ListRecentMaterialsUseCase>,
  pub create_summary: Arc<CreateSummaryUseCase>,
  pub list_summaries: Arc<ListSummariesUseCase>,
  pub get_summary: Arc<GetSummaryUseCase>,
  pub update_summary: Arc<UpdateSummaryUseCase>,
  pub delete_summary: Arc<DeleteSummaryUseCase>,
  pub generate_summary: Arc<GenerateSummaryUseCase>,
  pub dashboard_stats: Arc<GetDashboardStatsUseCase>,
}

impl StudyUseCases {
  pub fn new(service: Arc<StudyService>) -> Self {
    Self {
      create_subject: Arc::new(CreateSubjectUseCase::new(service.clone())),
      list_subjects: Arc::new(ListSubjectsUseCase::new(service.clone())),
      get_subject_details: Arc::new(GetSubjectDetailsUseCase::new(service.clone())),
      update_subject: Arc::new(UpdateSubjectUseCase::new(service.clone())),
      delete_subject: Arc::new(DeleteSubjectUseCase::new(service.clone())),
      upload_material: Arc::new(UploadMaterialUseCase::new(service.clone())),
      list_materials: Arc::new(ListMaterialsUseCase::new(service.clone())),
      delete_material: Arc::new(DeleteMaterialUseCase::new(service.clone())),
      get_material_file: Arc::new(GetMaterialFileUseCase::new(service.clone())),
      list_recent_materials: Arc::new(ListRecentMaterialsUseCase::new(service.clone())),
      create_summary: Arc::new(CreateSummaryUseCase::new(service.clone())),
      list_summaries: Arc::new(ListSummariesUseCase::new(service.clone())),
      get_summary: Arc::new(GetSummaryUseCase::new(service.clone())),
      update_summary: Arc::new(UpdateSummaryUseCase::new(service.clone())),
      delete_summary: Arc::new(DeleteSummaryUseCase::new(service.clone())),
      generate_summary: Arc::new(GenerateSummaryUseCase::new(service.clone())),
      dashboard_stats: Arc::new(GetDashboardStatsUseCase::new(service)),
    }
  }
}

/// Dependencies of the authenticated API
#[derive(Clone)]
pub struct ApiRouteDependencies {
  pub get_current_user: Arc<GetCurrentUserUseCase>,
  pub study: StudyUseCases,
  pub submit_feedback: Arc<SubmitFeedbackUseCase>,
}

/// Configure the JWT protected API
///
/// Each resource scope is wrapped in [`AuthMiddleware`]; `/auth` and
/// `/health` live outside of it.
pub fn configure_api_routes(cfg: &mut web::ServiceConfig, deps: ApiRouteDependencies) {
  let auth = || AuthMiddleware::new(deps.get_current_user.clone());
  let study = &deps.study;

  configure_extractors(cfg);
  cfg
    .app_data(web::Data::new(study.create_subject.clone()))
    .app_data(web::Data::new(study.list_subjects.clone()))
    .app_data(web::Data::new(study.get_subject_details.clone()))
    .app_data(web::Data::new(study.update_subject.clone()))
    .app_data(web::Data::new(study.delete_subject.clone()))
    .app_data(web::Data::new(study.upload_material.clone()))
    .app_data(web::Data::new(study.list_materials.clone()))
    .app_data(web::Data::new(study.delete_material.clone()))
    .app_data(web::Data::new(study.get_material_file.clone()))
    .app_data(web::Data::new(study.list_recent_materials.clone()))
    .app_data(web::Data::new(study.create_summary.clone()))
    .app_data(web::Data::new(study.list_summaries.clone()))
    .app_data(web::Data::new(study.get_summary.clone()))
    .app_data(web::Data::new(study.update_summary.clone()))
    .app_data(web::Data::new(study.delete_summary.clone()))
    .app_data(web::Data::new(study.generate_summary.clone()))
    .app_data(web::Data::new(study.dashboard_stats.clone()))
    .app_data(web::Data::new(deps.submit_feedback.clone()));

  cfg.service(
    web::scope("/usuarios")
      .wrap(auth())
      .route("/me", web::get().to(users::current_user_handler)),
  );

  cfg.service(
    web::scope("/disciplinas")
      .wrap(auth())
      .route("", web::get().to(subjects::list_subjects_handler))
      .route("", web::post().to(subjects::create_subject_handler))
      .route("/{id}", web::get().to(subjects::get_subject_details_handler))
      .route("/{id}", web::put().to(subjects::update_subject_handler))
      .route("/{id}", web::delete().to(subjects::delete_subject_handler)),
  );

  cfg.service(
    web::scope("/materiais")
      .wrap(auth())
      .route("", web::get().to(materials::list_materials_handler))
      .route("", web::post().to(materials::upload_material_handler))
      .route("/{id}", web::delete().to(materials::delete_material_handler))
      .route("/{id}/download", web::get().to(materials::download_material_handler))
      .route("/{id}/visualizar", web::get().to(materials::view_material_handler)),
  );

  cfg.service(
    web::scope("/resumos")
      .wrap(auth())
      .route("", web::get().to(summaries::list_summaries_handler))
      .route("", web::post().to(summaries::create_summary_handler))
      .route(
        "/gerar-automatico",
        web::post().to(summaries::generate_summary_handler),
      )
      .route("/{id}", web::get().to(summaries::get_summary_handler))
      .route("/{id}", web::put().to(summaries::update_summary_handler))
      .route("/{id}", web::delete().to(summaries::delete_summary_handler)),
  );

  cfg.service(
    web::scope("/dashboard")
      .wrap(auth())
      .route("/estatisticas", web::get().to(dashboard::dashboard_stats_handler))
      .route(
        "/materiais/recentes",
        web::get().to(dashboard::recent_materials_handler),
      ),
  );

  cfg.service(
    web::scope("/feedback")
      .wrap(auth())
      .route("", web::post().to(feedback::submit_feedback_handler)),
  );
}
