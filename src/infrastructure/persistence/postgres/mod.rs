pub mod confirmation_token_repository;
pub mod feedback_repository;
pub mod material_repository;
pub mod subject_repository;
pub mod summary_repository;
pub mod user_repository;

pub use confirmation_token_repository::PostgresConfirmationTokenRepository;
pub use feedback_repository::PostgresFeedbackRepository;
pub use material_repository::PostgresMaterialRepository;
pub use subject_repository::PostgresSubjectRepository;
pub use summary_repository::PostgresSummaryRepository;
pub use user_repository::PostgresUserRepository;

#[cfg(test)]
pub(crate) mod test_support {
  use sqlx::PgPool;
  use sqlx::postgres::PgPoolOptions;
  use testcontainers::ImageExt;
  use testcontainers_modules::postgres::Postgres;
  use testcontainers_modules::testcontainers::{ContainerAsync, runners::AsyncRunner};
  use uuid::Uuid;

  /// Starts PostgreSQL 16 and applies the migrations
  pub async fn setup_test_db() -> (PgPool, ContainerAsync<Postgres>) {
    let container = Postgres::default()
      .with_tag("16-alpine")
      .start()
      .await
      .expect("Failed to start postgres container");

    let host = container.get_host().await.expect("Failed to get host");
    let port = container
      .get_host_port_ipv4(5432)
      .await
      .expect("Failed to get port");
    let database_url = format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

    let pool = PgPoolOptions::new()
      .max_connections(5)
      .connect(&database_url)
      .await
      .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
      .run(&pool)
      .await
      .expect("Failed to run migrations");

    (pool, container)
  }

  pub async fn create_test_user(pool: &PgPool, email: &str) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO users (id, name, email, password_hash) VALUES ($1, $2, $3, $4)")
      .bind(id)
      .bind("Test User")
      .bind(email)
      .bind("hash")
      .execute(pool)
      .await
      .expect("Failed to create test user");
    id
  }

  pub async fn create_test_subject(pool: &PgPool, user_id: Uuid, name: &str) -> Uuid {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO subjects (id, user_id, name) VALUES ($1, $2, $3)")
      .bind(id)
      .bind(user_id)
      .bind(name)
      .execute(pool)
      .await
      .expect("Failed to create test subject");
    id
  }
}
