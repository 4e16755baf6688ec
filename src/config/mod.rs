//! Configuration management module for boardcamp-rs
//!
//! Layered configuration loading with support for TOML files, per-environment
//! overlays and environment variable overrides.
//!
//! # Configuration Priority (lowest to highest)
//! 1. `default.toml` - Base default configuration
//! 2. `{environment}.toml` - Environment-specific configuration
//! 3. `local.toml` - Local overrides (not committed to version control)
//! 4. `BOARDCAMP_*` environment variables, e.g. `BOARDCAMP_DATABASE__URL`
//! 5. Command-line flags (applied by the CLI)

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use loader::ConfigLoader;
pub use settings::{DatabaseConfig, ServerConfig, Settings};
