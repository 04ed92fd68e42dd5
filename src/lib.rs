//! ragchat - a terminal client for a document-grounded chat assistant
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod models;
pub mod sse;
pub mod traits;
