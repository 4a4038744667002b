mod argon2_hasher;
mod jwt_service;
mod token_generator;

pub use argon2_hasher::Argon2PasswordHasher;
pub use jwt_service::JwtAccessTokenService;
pub use token_generator::SecureTokenGenerator;
