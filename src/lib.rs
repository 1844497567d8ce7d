//! observability-test-app - a small HTTP service for exercising an observability pipeline
//!
//! It provides:
//! - Health and ping endpoints under `/`, `/api` and `/api/v2`
//! - Alertmanager webhook receivers that log each alert
//! - Version reporting resolved from project metadata at startup

pub mod alerts;
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod settings;
pub mod version;

pub use error::{Error, Result};
