//! Application layer
//!
//! Use cases that turn raw commands into domain calls and shape the results
//! for the HTTP adapters.

pub mod auth;
pub mod feedback;
pub mod study;
