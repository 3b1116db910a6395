pub mod app;
pub mod config;
pub mod error;
pub mod extractor;
pub mod handlers;
pub mod models;
pub mod state;
