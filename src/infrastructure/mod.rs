pub mod config;
pub mod mail;
pub mod persistence;
pub mod security;
pub mod storage;
pub mod summarizer;
pub mod text;
