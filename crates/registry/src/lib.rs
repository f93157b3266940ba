//! Registry crate for the fleetdeck provider schema catalog.
//!
//! This crate owns the static, insertion-ordered catalog of credential
//! provider schemas and generates the CLI command tree from it, so that the
//! catalog drives the terminal surface the same way it drives the dashboard
//! forms.

pub mod clap_builder;
pub mod config;
pub mod models;

pub use clap_builder::build_clap;
pub use config::{PROVIDERS_PATH_ENV_VAR, RegistryConfig, default_config_path};
pub use fleetdeck_types::{FieldKind, FieldSchema, ProviderSchema};
pub use models::ProviderRegistry;
