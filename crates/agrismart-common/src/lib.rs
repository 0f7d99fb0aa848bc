//! ---
//! agri_section: "01-core-functionality"
//! agri_subsection: "module"
//! agri_type: "source"
//! agri_scope: "code"
//! agri_description: "Shared primitives and utilities for the client core."
//! agri_version: "v0.1.0-alpha"
//! agri_owner: "tbd"
//! ---
//! Shared primitives for the AgriSmart client workspace.
//! This crate exposes configuration loading and the tracing bootstrap
//! consumed across the workspace.

pub mod config;
pub mod logging;

pub use config::{ApiConfig, AppConfig, LoggingConfig, StorageConfig, UiConfig};
pub use logging::{init_tracing, LogFormat};
