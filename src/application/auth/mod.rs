//! Authentication use cases
//!
//! Registration, login, email confirmation and bearer token resolution.

mod confirm_email;
mod get_current_user;
mod login_user;
mod register_user;

pub use confirm_email::{ConfirmEmailCommand, ConfirmEmailResponse, ConfirmEmailUseCase};
pub use get_current_user::{GetCurrentUserResponse, GetCurrentUserUseCase};
pub use login_user::{LoginUserCommand, LoginUserResponse, LoginUserUseCase};
pub use register_user::{RegisterUserCommand, RegisterUserResponse, RegisterUserUseCase};
