//! API Gateway stage operations
//!
//! Each operation takes the request capability as an argument and issues its
//! requests one after another; nothing here runs requests concurrently.

use crate::error::{CloudError, Result};
use crate::record::{DeletionRecord, RestApiPage, StageList, StageRecord};
use crate::request::{API_GATEWAY_SERVICE, ProviderRequest, operation};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

/// Largest page size `getRestApis` accepts
const REST_API_PAGE_LIMIT: u32 = 500;

async fn call<T: DeserializeOwned>(
    requester: &dyn ProviderRequest,
    op: &str,
    params: Value,
) -> Result<T> {
    tracing::debug!("Requesting {}.{} {}", API_GATEWAY_SERVICE, op, params);
    let response = requester.request(API_GATEWAY_SERVICE, op, params).await?;
    serde_json::from_value(response).map_err(|source| CloudError::InvalidResponse {
        operation: op.to_string(),
        source,
    })
}

/// Resolve an API display name to its provider id
///
/// Returns the id of the first API whose name matches exactly. Further pages
/// are only requested while no match has been found.
pub async fn locate_api_id(requester: &dyn ProviderRequest, api_name: &str) -> Result<String> {
    let mut position: Option<String> = None;

    loop {
        let mut params = json!({ "limit": REST_API_PAGE_LIMIT });
        if let Some(token) = &position {
            params["position"] = json!(token);
        }

        let page: RestApiPage = call(requester, operation::GET_REST_APIS, params).await?;

        if let Some(api) = page.items.into_iter().find(|api| api.name == api_name) {
            tracing::debug!("Resolved API {} to {}", api_name, api.id);
            return Ok(api.id);
        }

        match page.position {
            Some(next) if !next.is_empty() => position = Some(next),
            _ => return Err(CloudError::ApiNotFound(api_name.to_string())),
        }
    }
}

/// List the stages of an API that are not the current one
///
/// Provider order is preserved. `current == None` excludes nothing; callers
/// must not feed the result to [`delete_stages`] in that case.
pub async fn unused_stages(
    requester: &dyn ProviderRequest,
    api_id: &str,
    current: Option<&str>,
) -> Result<Vec<StageRecord>> {
    let stages: StageList = call(
        requester,
        operation::GET_STAGES,
        json!({ "restApiId": api_id }),
    )
    .await?;

    Ok(stages
        .item
        .into_iter()
        .filter(|stage| Some(stage.stage_name.as_str()) != current)
        .collect())
}

/// Delete stages one at a time, in order
///
/// Each delete completes before the next is issued; concurrent deletes on one
/// API race at the provider. The first failure is returned as-is and the
/// remaining stages are left untouched.
pub async fn delete_stages(
    requester: &dyn ProviderRequest,
    api_id: &str,
    stages: &[StageRecord],
) -> Result<Vec<DeletionRecord>> {
    let mut deleted = Vec::with_capacity(stages.len());

    for stage in stages {
        requester
            .request(
                API_GATEWAY_SERVICE,
                operation::DELETE_STAGE,
                json!({ "restApiId": api_id, "stageName": stage.stage_name }),
            )
            .await?;

        let record = DeletionRecord {
            stage_name: stage.stage_name.clone(),
        };
        tracing::info!("    {}", record);
        deleted.push(record);
    }

    Ok(deleted)
}
