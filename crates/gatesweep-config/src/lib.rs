pub mod error;

pub use error::*;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Region used when none is configured
pub const DEFAULT_REGION: &str = "us-east-1";

/// Where the deployment framework writes the compiled template
pub const DEFAULT_TEMPLATE_PATH: &str = ".serverless/cloudformation-template-update-stack.json";

/// Environment variable pointing directly at a settings file
pub const CONFIG_PATH_ENV: &str = "GATESWEEP_CONFIG_PATH";

const CANDIDATES: [&str; 3] = ["gatesweep.local.yaml", "gatesweep.yaml", ".gatesweep.yaml"];

/// Cleanup settings
///
/// Every field is optional; flags given on the command line take precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub region: Option<String>,
    pub service: Option<String>,
    pub stage: Option<String>,
    pub api_name: Option<String>,
    pub template: Option<PathBuf>,
    pub cooldown_secs: u64,
}

impl Settings {
    /// Discover and load the settings file, or defaults when there is none
    pub fn load() -> Result<Self> {
        match find_settings_file()? {
            Some(path) => Self::from_path(&path),
            None => {
                tracing::debug!("No settings file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings =
            serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        tracing::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn region(&self) -> &str {
        self.region.as_deref().unwrap_or(DEFAULT_REGION)
    }

    pub fn template_path(&self) -> PathBuf {
        self.template
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATE_PATH))
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }
}

/// Locate the settings file
///
/// Search order:
/// 1. `GATESWEEP_CONFIG_PATH` (must exist when set)
/// 2. current directory: gatesweep.local.yaml, gatesweep.yaml, .gatesweep.yaml
/// 3. ~/.config/gatesweep/config.yaml
pub fn find_settings_file() -> Result<Option<PathBuf>> {
    if let Ok(config_path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(config_path);
        if path.exists() {
            return Ok(Some(path));
        }
        return Err(ConfigError::SettingsFileNotFound(path));
    }

    let current_dir = std::env::current_dir()?;
    for filename in &CANDIDATES {
        let path = current_dir.join(filename);
        if path.exists() {
            return Ok(Some(path));
        }
    }

    Ok(global_settings_path().filter(|path| path.exists()))
}

/// ~/.config/gatesweep/config.yaml
pub fn global_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gatesweep").join("config.yaml"))
}
