pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use errors::{ApiError, AuthErrorKind};
pub use middleware::{AuthMiddleware, RequestId, RequestIdExt, RequestIdMiddleware};
pub use routes::{ApiRouteDependencies, StudyUseCases, configure_api_routes, configure_auth_routes};
