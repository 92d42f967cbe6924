//! Provider request abstraction

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Service name used for every API Gateway request
pub const API_GATEWAY_SERVICE: &str = "APIGateway";

/// Operation names understood by request transports
pub mod operation {
    pub const GET_REST_APIS: &str = "getRestApis";
    pub const GET_STAGES: &str = "getStages";
    pub const DELETE_STAGE: &str = "deleteStage";
}

/// Generic "make a provider request" capability
///
/// Components never build their own clients; a requester is handed to each
/// call so tests can swap in a scripted fake. Parameters and responses are
/// JSON values shaped like the provider's REST API (camelCase keys).
#[async_trait]
pub trait ProviderRequest: Send + Sync {
    /// Issue a single request and wait for the provider's response
    async fn request(&self, service: &str, operation: &str, params: Value) -> Result<Value>;
}

