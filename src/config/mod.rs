//! Configuration system (layered: defaults > config file > env).

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::actions::resolver::ResolveOptions;
use crate::error::{ActionError, Result};

/// Global default config (lazy-initialized from file and env).
static DEFAULT_CONFIG: OnceLock<ActionViewConfig> = OnceLock::new();

/// Default separator for delimited-list arguments.
pub const DEFAULT_LIST_DELIMITER: &str = "|";

const ENV_LIST_DELIMITER: &str = "ACTIONVIEW_LIST_DELIMITER";
const ENV_PROGRESSIVE_RENDER: &str = "ACTIONVIEW_PROGRESSIVE_RENDER";
const ENV_COERCE_SCALARS: &str = "ACTIONVIEW_COERCE_SCALARS";

/// Layered configuration for action dispatch.
///
/// Resolution order (later wins):
/// 1. Built-in defaults
/// 2. `config.toml` in the platform config directory (or an explicit path)
/// 3. `ACTIONVIEW_*` environment variables (a `.env` file is honoured)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionViewConfig {
    /// Default separator for manifest delimited-list arguments without a `delimiter`.
    pub list_delimiter: String,
    /// Render on every partial fragment, not only on the final one.
    pub progressive_render: bool,
    /// Coerce scalar strings ("42", "true") into their declared kinds.
    pub coerce_scalars: bool,
}

impl Default for ActionViewConfig {
    fn default() -> Self {
        Self {
            list_delimiter: DEFAULT_LIST_DELIMITER.to_string(),
            progressive_render: true,
            coerce_scalars: true,
        }
    }
}

/// On-disk shape; every key is optional so files only override what they set.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    list_delimiter: Option<String>,
    progressive_render: Option<bool>,
    coerce_scalars: Option<bool>,
}

impl ActionViewConfig {
    /// Default location of the config file, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "actionview")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Parse a TOML document on top of the defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let mut config = Self::default();
        config.apply_file(toml::from_str(raw)?)?;
        Ok(config)
    }

    /// Read a TOML file on top of the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ActionError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&raw)
    }

    /// Load all layers. A missing config file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error

        let path = path.map(Path::to_path_buf).or_else(Self::default_path);
        let mut config = match path {
            Some(ref p) if p.exists() => Self::from_file(p)?,
            _ => Self::default(),
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Get (or create) the global default config.
    ///
    /// Falls back to defaults when the layered load fails.
    pub fn global() -> &'static ActionViewConfig {
        DEFAULT_CONFIG.get_or_init(|| {
            Self::load(None).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Falling back to default configuration");
                Self::default()
            })
        })
    }

    /// Options handed to the argument resolver.
    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            coerce_scalars: self.coerce_scalars,
        }
    }

    fn apply_file(&mut self, file: ConfigFile) -> Result<()> {
        if let Some(delimiter) = file.list_delimiter {
            self.list_delimiter = validate_delimiter(delimiter)?;
        }
        if let Some(progressive) = file.progressive_render {
            self.progressive_render = progressive;
        }
        if let Some(coerce) = file.coerce_scalars {
            self.coerce_scalars = coerce;
        }
        Ok(())
    }

    /// Apply `ACTIONVIEW_*` overrides from the process environment.
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(delimiter) = std::env::var(ENV_LIST_DELIMITER) {
            self.list_delimiter = validate_delimiter(delimiter)?;
        }
        if let Ok(raw) = std::env::var(ENV_PROGRESSIVE_RENDER) {
            self.progressive_render = parse_env_bool(ENV_PROGRESSIVE_RENDER, &raw)?;
        }
        if let Ok(raw) = std::env::var(ENV_COERCE_SCALARS) {
            self.coerce_scalars = parse_env_bool(ENV_COERCE_SCALARS, &raw)?;
        }
        Ok(())
    }
}

fn validate_delimiter(delimiter: String) -> Result<String> {
    if delimiter.is_empty() {
        return Err(ActionError::Configuration(
            "list_delimiter must not be empty".into(),
        ));
    }
    Ok(delimiter)
}

fn parse_env_bool(var: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ActionError::Configuration(format!(
            "{var} must be a boolean, got '{other}'"
        ))),
    }
}
