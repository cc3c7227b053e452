//! Configuration for stackconf.
//!
//! User config lives at `~/.stackconf/stackconf.toml`. Values passed
//! explicitly by the embedding application override config file values,
//! which override defaults.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SettingsError};
use crate::types::Scope;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "stackconf.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".stackconf";

/// Upper bound the SSM by-path listing accepts for `MaxResults`.
const MAX_PAGE_SIZE: i32 = 10;

// ---------------------------------------------------------------------------
// Config structs (matching stackconf.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default settings target.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// SSM adapter settings.
    #[serde(default)]
    pub ssm: SsmConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Application (stack) name; the first path segment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<String>,

    /// Scope segment.
    #[serde(default = "default_scope")]
    pub scope: String,

    /// Context segment, e.g. the deployment environment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            application: None,
            scope: default_scope(),
            context: None,
        }
    }
}

fn default_scope() -> String {
    Scope::Stack.as_str().into()
}

/// `[ssm]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SsmConfig {
    /// `MaxResults` per by-path page (1–10). Unset uses the service default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i32>,

    /// Decrypt `SecureString` values when listing.
    #[serde(default)]
    pub with_decryption: bool,
}

impl SsmConfig {
    /// Reject a `page_size` the by-path listing would refuse.
    pub fn validate(&self) -> Result<()> {
        match self.page_size {
            Some(size) if !(1..=MAX_PAGE_SIZE).contains(&size) => Err(SettingsError::config(
                format!("ssm.page_size must be between 1 and {MAX_PAGE_SIZE}, got {size}"),
            )),
            _ => Ok(()),
        }
    }
}

impl AppConfig {
    /// Check value ranges that TOML parsing alone cannot enforce.
    pub fn validate(&self) -> Result<()> {
        self.ssm.validate()
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// `~/.stackconf/`
pub fn config_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(CONFIG_DIR_NAME))
        .ok_or_else(|| SettingsError::config("could not determine home directory"))
}

/// `~/.stackconf/stackconf.toml`
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load `stackconf.toml` from the user config directory.
pub fn load_config() -> Result<AppConfig> {
    load_config_in(&config_dir()?)
}

/// Load `stackconf.toml` from `dir`, falling back to defaults when there is none.
pub fn load_config_in(dir: &Path) -> Result<AppConfig> {
    let path = dir.join(CONFIG_FILE_NAME);
    match std::fs::read_to_string(&path) {
        Ok(content) => parse_config(&path, &content),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(?path, "no config file, using defaults");
            Ok(AppConfig::default())
        }
        Err(e) => Err(SettingsError::io(path, e)),
    }
}

/// Load and validate a config file that must exist.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| SettingsError::io(path, e))?;
    parse_config(path, &content)
}

fn parse_config(path: &Path, content: &str) -> Result<AppConfig> {
    let config: AppConfig = toml::from_str(content)
        .map_err(|e| SettingsError::config(format!("failed to parse {}: {e}", path.display())))?;
    config.validate()?;
    Ok(config)
}

/// Write a default `stackconf.toml` into the user config directory.
pub fn init_config() -> Result<PathBuf> {
    init_config_in(&config_dir()?)
}

/// Write a default `stackconf.toml` into `dir` and return its path.
///
/// An existing file is never replaced; that case is a config error.
pub fn init_config_in(dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| SettingsError::io(dir, e))?;
    let path = dir.join(CONFIG_FILE_NAME);

    let content = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| SettingsError::config(e.to_string()))?;

    let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            return Err(SettingsError::config(format!(
                "{} already exists, leaving it untouched",
                path.display()
            )));
        }
        Err(e) => return Err(SettingsError::io(path, e)),
    };
    file.write_all(content.as_bytes())
        .map_err(|e| SettingsError::io(&path, e))?;

    tracing::info!(?path, "wrote default config");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("stackconf_dir_{}", Uuid::now_v7()))
    }

    fn write_temp(content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("stackconf_test_{}.toml", Uuid::now_v7()));
        std::fs::write(&path, content).expect("write temp config");
        path
    }

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("scope = \"stack\""));
        assert!(toml_str.contains("with_decryption = false"));
        assert!(!toml_str.contains("application"));
    }

    #[test]
    fn config_from_file() {
        let path = write_temp(
            r#"
[defaults]
application = "hello-nrfcloud"
context = "prod"

[ssm]
page_size = 10
"#,
        );
        let config = load_config_from(&path).expect("load");
        assert_eq!(config.defaults.application.as_deref(), Some("hello-nrfcloud"));
        assert_eq!(config.defaults.scope, "stack");
        assert_eq!(config.defaults.context.as_deref(), Some("prod"));
        assert_eq!(config.ssm.page_size, Some(10));
        assert!(!config.ssm.with_decryption);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn page_size_out_of_range() {
        let path = write_temp("[ssm]\npage_size = 50\n");
        let err = load_config_from(&path).expect_err("page size 50 must be rejected");
        assert!(err.to_string().contains("ssm.page_size"));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn malformed_toml_is_config_error() {
        let path = write_temp("[defaults\n");
        let err = load_config_from(&path).expect_err("malformed");
        assert!(matches!(err, SettingsError::Config { .. }));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_file_is_io_error() {
        let path = std::env::temp_dir().join(format!("stackconf_missing_{}.toml", Uuid::now_v7()));
        let err = load_config_from(&path).expect_err("missing");
        assert!(matches!(err, SettingsError::Io { .. }));
    }

    #[test]
    fn missing_file_in_dir_gives_defaults() {
        let dir = temp_dir();
        let config = load_config_in(&dir).expect("defaults");
        assert_eq!(config.defaults.scope, "stack");
        assert!(config.defaults.application.is_none());
        assert!(config.ssm.page_size.is_none());
    }

    #[test]
    fn init_then_load_in_dir() {
        let dir = temp_dir();
        let path = init_config_in(&dir).expect("init");
        assert_eq!(path, dir.join(CONFIG_FILE_NAME));

        let config = load_config_in(&dir).expect("load");
        assert_eq!(config.defaults.scope, "stack");
        assert!(!config.ssm.with_decryption);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn init_leaves_existing_file_intact() {
        let dir = temp_dir();
        std::fs::create_dir_all(&dir).expect("mkdir");
        let path = dir.join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[defaults]\napplication = \"mine\"\n").expect("seed");

        let err = init_config_in(&dir).expect_err("existing file");
        assert!(matches!(err, SettingsError::Config { .. }));
        assert!(err.to_string().contains("already exists"));

        let config = load_config_in(&dir).expect("load");
        assert_eq!(config.defaults.application.as_deref(), Some("mine"));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn ssm_page_size_bounds() {
        for ok in [None, Some(1), Some(10)] {
            let ssm = SsmConfig { page_size: ok, ..Default::default() };
            assert!(ssm.validate().is_ok(), "{ok:?} should be accepted");
        }
        for bad in [0, 11, -3] {
            let ssm = SsmConfig { page_size: Some(bad), ..Default::default() };
            assert!(ssm.validate().is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn config_file_lives_in_config_dir() {
        let (Ok(dir), Ok(file)) = (config_dir(), config_file_path()) else {
            return; // no home directory in this environment
        };
        assert!(dir.ends_with(CONFIG_DIR_NAME));
        assert_eq!(file, dir.join(CONFIG_FILE_NAME));
    }
}
