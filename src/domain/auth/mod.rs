pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::{ConfirmationToken, DailyUsage, UsageKind, User};
pub use errors::{AuthError, HashError};
pub use ports::{
  AccessToken, AccessTokenClaims, AccessTokenService, ConfirmationTokenRepository, PasswordHasher,
  TokenGenerator, UserRepository,
};
pub use services::{AuthService, AuthServiceConfig};
pub use value_objects::{
  ConfirmationSecret, Email, Password, PasswordHash, TokenHash, UserName, ValueObjectError,
};
