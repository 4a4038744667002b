//! PDFocus study companion API.
//!
//! Students organise subjects, upload PDF materials, write or generate
//! summaries and send product feedback.

pub mod adapters;
pub mod application;
pub mod domain;
pub mod infrastructure;
