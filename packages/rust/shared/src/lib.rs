//! Shared types, error model, and configuration for stackconf.
//!
//! This crate is the foundation depended on by all other stackconf crates.
//! It provides:
//! - [`SettingsError`] and [`StoreError`] — the error taxonomy
//! - Store-facing types ([`Parameter`], [`Page`], [`Settings`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, SsmConfig, config_dir, config_file_path, init_config,
    init_config_in, load_config, load_config_from, load_config_in,
};
pub use error::{Result, SettingsError, StoreError};
pub use types::{Page, Parameter, Scope, Settings};
