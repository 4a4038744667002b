pub mod auth;
pub mod errors;
pub mod feedback;
pub mod notifications;
pub mod study;

#[cfg(test)]
pub(crate) mod testing;
