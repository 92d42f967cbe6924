//! Provider records for API Gateway reconciliation

use serde::{Deserialize, Serialize};

/// A REST API as listed by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiIdentity {
    /// Opaque provider identifier
    pub id: String,

    /// Display name, compared exactly
    #[serde(default)]
    pub name: String,
}

/// A stage currently live on an API
///
/// Any additional metadata returned by the provider is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageRecord {
    pub stage_name: String,
}

impl StageRecord {
    pub fn new(stage_name: impl Into<String>) -> Self {
        Self {
            stage_name: stage_name.into(),
        }
    }
}

/// One page of `getRestApis`
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RestApiPage {
    #[serde(default)]
    pub items: Vec<ApiIdentity>,

    /// Continuation token for the next page
    #[serde(default)]
    pub position: Option<String>,
}

/// Response of `getStages`
#[derive(Debug, Default, Deserialize)]
pub(crate) struct StageList {
    #[serde(default)]
    pub item: Vec<StageRecord>,
}

/// Completion record for a deleted stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionRecord {
    pub stage_name: String,
}

impl std::fmt::Display for DeletionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Deleted stage: {}", self.stage_name)
    }
}
