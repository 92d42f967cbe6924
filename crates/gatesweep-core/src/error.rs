use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Failed to read template: {path}\nReason: {source}")]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse template: {path}\nReason: {source}")]
    TemplateParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Template has no Resources section: {0}")]
    MissingResources(PathBuf),

    #[error(transparent)]
    Cloud(#[from] gatesweep_cloud::CloudError),
}

pub type Result<T> = std::result::Result<T, CoreError>;
