//! Cloud provider error types

use thiserror::Error;

/// Cloud provider errors
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("API not found: {0}")]
    ApiNotFound(String),

    #[error("{service}.{operation} failed: {message}")]
    RequestFailed {
        service: String,
        operation: String,
        message: String,
    },

    #[error("Unsupported operation: {service}.{operation}")]
    UnsupportedOperation { service: String, operation: String },

    #[error("Invalid parameters for {operation}: {message}")]
    InvalidParams { operation: String, message: String },

    #[error("Invalid response from {operation}: {source}")]
    InvalidResponse {
        operation: String,
        #[source]
        source: serde_json::Error,
    },
}

impl CloudError {
    pub fn request_failed(
        service: impl Into<String>,
        operation: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        CloudError::RequestFailed {
            service: service.into(),
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn unsupported(service: impl Into<String>, operation: impl Into<String>) -> Self {
        CloudError::UnsupportedOperation {
            service: service.into(),
            operation: operation.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CloudError>;
