use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::{App, HttpServer, middleware::Logger, web};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pdfocus::{
  adapters::http::{
    ApiRouteDependencies, RequestIdMiddleware, StudyUseCases, configure_api_routes,
    configure_auth_routes,
  },
  application::auth::{
    ConfirmEmailUseCase, GetCurrentUserUseCase, LoginUserUseCase, RegisterUserUseCase,
  },
  application::feedback::SubmitFeedbackUseCase,
  domain::auth::{AuthService, AuthServiceConfig},
  domain::feedback::FeedbackService,
  domain::study::{StudyConfig, StudyService},
  infrastructure::{
    config::Config,
    mail::{EmailNotifier, EmailNotifierConfig, LogMailer, Mailer, ResendMailer, TemplateEngine},
    persistence::postgres::{
      PostgresConfirmationTokenRepository, PostgresFeedbackRepository, PostgresMaterialRepository,
      PostgresSubjectRepository, PostgresSummaryRepository, PostgresUserRepository,
    },
    security::{Argon2PasswordHasher, JwtAccessTokenService, SecureTokenGenerator},
    storage::LocalFileStorage,
    summarizer::ExtractiveSummarizer,
    text::PdfTextExtractor,
  },
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pdfocus=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting PDFocus API");

  let config = Config::load().expect("Failed to load configuration");
  tracing::info!("Configuration loaded successfully");

  // Database
  let db_pool = tokio::time::timeout(
    Duration::from_secs(config.database.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(config.database.max_connections)
      .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_seconds))
      .connect(&config.database.url),
  )
  .await
  .map_err(|_| {
    tracing::error!(
      "Database connection timed out after {} seconds. Is PostgreSQL running?",
      config.database.connect_timeout_seconds
    );
    std::io::Error::new(
      std::io::ErrorKind::TimedOut,
      format!(
        "Database connection timed out after {} seconds",
        config.database.connect_timeout_seconds
      ),
    )
  })?
  .map_err(|e| {
    tracing::error!("Failed to connect to database: {}", e);
    match e {
      sqlx::Error::Io(_) => std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "Could not connect to database. Is PostgreSQL running?",
      ),
      _ => std::io::Error::other(format!("Database error: {}", e)),
    }
  })?;

  tracing::info!("Running database migrations");
  sqlx::migrate!("./migrations")
    .run(&db_pool)
    .await
    .expect("Failed to run database migrations");

  // Repositories
  let user_repo = Arc::new(PostgresUserRepository::new(db_pool.clone()));
  let token_repo = Arc::new(PostgresConfirmationTokenRepository::new(db_pool.clone()));
  let subject_repo = Arc::new(PostgresSubjectRepository::new(db_pool.clone()));
  let material_repo = Arc::new(PostgresMaterialRepository::new(db_pool.clone()));
  let summary_repo = Arc::new(PostgresSummaryRepository::new(db_pool.clone()));
  let feedback_repo = Arc::new(PostgresFeedbackRepository::new(db_pool.clone()));

  // Security
  let password_hasher =
    Arc::new(Argon2PasswordHasher::new().expect("Failed to create password hasher"));
  let access_tokens = Arc::new(
    JwtAccessTokenService::new(
      &config.security.jwt_secret_base64,
      config.security.jwt_expiration_seconds,
    )
    .expect("Invalid JWT secret"),
  );
  let token_generator = Arc::new(SecureTokenGenerator::new());

  // Mail
  let mailer: Arc<dyn Mailer> = match &config.mail.api_key {
    Some(api_key) => Arc::new(ResendMailer::new(config.mail.api_url.clone(), api_key.clone())),
    None => {
      tracing::warn!("No mail API key configured, emails will only be logged");
      Arc::new(LogMailer)
    }
  };
  let templates = TemplateEngine::new().expect("Failed to initialize email templates");
  let notifier = Arc::new(EmailNotifier::new(
    mailer,
    templates,
    EmailNotifierConfig {
      auth_from: config.mail.auth_from.clone(),
      feedback_from: config.mail.feedback_from.clone(),
      feedback_recipient: config.mail.feedback_recipient.clone(),
    },
  ));

  // Domain services
  let auth_service = Arc::new(AuthService::new(
    user_repo.clone(),
    token_repo,
    password_hasher,
    token_generator,
    access_tokens,
    notifier.clone(),
    AuthServiceConfig {
      confirmation_token_ttl: chrono::Duration::minutes(
        config.security.confirmation_token_ttl_minutes,
      ),
      frontend_url: config.server.frontend_url.clone(),
    },
  ));

  let storage = Arc::new(
    LocalFileStorage::new(&config.storage.directory)
      .await
      .map_err(|e| std::io::Error::other(format!("Storage error: {}", e)))?,
  );

  let study_service = Arc::new(StudyService::new(
    subject_repo,
    material_repo,
    summary_repo,
    user_repo.clone(),
    storage,
    Arc::new(PdfTextExtractor::new()),
    Arc::new(ExtractiveSummarizer::new()),
    StudyConfig {
      daily_summary_limit: config.limits.daily_summaries,
      max_file_size_bytes: config.storage.max_file_size_bytes,
      ..StudyConfig::default()
    },
  ));

  let feedback_service = Arc::new(FeedbackService::new(
    feedback_repo,
    user_repo,
    notifier,
    config.limits.daily_feedbacks,
  ));

  // Use cases
  let register_use_case = Arc::new(RegisterUserUseCase::new(auth_service.clone()));
  let login_use_case = Arc::new(LoginUserUseCase::new(auth_service.clone()));
  let confirm_email_use_case = Arc::new(ConfirmEmailUseCase::new(auth_service.clone()));

  let api_dependencies = ApiRouteDependencies {
    get_current_user: Arc::new(GetCurrentUserUseCase::new(auth_service)),
    study: StudyUseCases::new(study_service),
    submit_feedback: Arc::new(SubmitFeedbackUseCase::new(feedback_service)),
  };

  let governor_config = GovernorConfigBuilder::default()
    .seconds_per_request(config.rate_limit.auth_replenish_seconds)
    .burst_size(config.rate_limit.auth_burst_size)
    .finish()
    .expect("Invalid rate limit configuration");

  // Multipart bodies are capped by the service; leave room for the form framing
  let payload_limit = config.storage.max_file_size_bytes as usize + 64 * 1024;

  let server_host = config.server.host.clone();
  let server_port = config.server.port;

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  HttpServer::new(move || {
    App::new()
      .wrap(RequestIdMiddleware::new())
      .wrap(Logger::default())
      .app_data(web::PayloadConfig::new(payload_limit))
      .service(
        web::scope("/auth")
          .wrap(Governor::new(&governor_config))
          .configure(|cfg| {
            configure_auth_routes(
              cfg,
              register_use_case.clone(),
              login_use_case.clone(),
              confirm_email_use_case.clone(),
            )
          }),
      )
      .configure(|cfg| configure_api_routes(cfg, api_dependencies.clone()))
      .route("/health", web::get().to(health_check))
  })
  .bind((server_host.as_str(), server_port))?
  .run()
  .await
}

/// Health check endpoint
async fn health_check() -> &'static str {
  "OK"
}
