use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "Settings file not found: {0}\n\
        GATESWEEP_CONFIG_PATH must point to an existing file"
    )]
    SettingsFileNotFound(PathBuf),

    #[error("Failed to parse settings file: {path}\nReason: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
