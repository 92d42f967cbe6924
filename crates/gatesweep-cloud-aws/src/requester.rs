//! API Gateway transport backed by the AWS SDK

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_apigateway::Client;
use aws_sdk_apigateway::error::DisplayErrorContext;
use aws_sdk_apigateway::types::{RestApi, Stage};
use gatesweep_cloud::{API_GATEWAY_SERVICE, CloudError, ProviderRequest, Result, operation};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

/// AWS API Gateway requester
///
/// Holds an SDK client for one region. The client keeps no request state of
/// its own, so one requester serves the whole cleanup run.
pub struct AwsGatewayRequester {
    client: Client,
    region: String,
}

impl AwsGatewayRequester {
    /// Build a requester from the default credential chain for `region`
    pub async fn connect(region: impl Into<String>) -> Self {
        let region = region.into();
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.clone()))
            .load()
            .await;

        tracing::debug!("Created API Gateway client for {}", region);
        Self {
            client: Client::new(&config),
            region,
        }
    }

    /// Wrap an existing client
    pub fn from_client(client: Client, region: impl Into<String>) -> Self {
        Self {
            client,
            region: region.into(),
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    async fn get_rest_apis(&self, params: GetRestApisParams) -> Result<Value> {
        let output = self
            .client
            .get_rest_apis()
            .set_limit(params.limit)
            .set_position(params.position)
            .send()
            .await
            .map_err(|e| sdk_error(operation::GET_REST_APIS, e))?;

        Ok(rest_api_page(output.items(), output.position()))
    }

    async fn get_stages(&self, params: GetStagesParams) -> Result<Value> {
        let output = self
            .client
            .get_stages()
            .rest_api_id(params.rest_api_id)
            .send()
            .await
            .map_err(|e| sdk_error(operation::GET_STAGES, e))?;

        Ok(stage_list(output.item()))
    }

    async fn delete_stage(&self, params: DeleteStageParams) -> Result<Value> {
        self.client
            .delete_stage()
            .rest_api_id(params.rest_api_id)
            .stage_name(params.stage_name)
            .send()
            .await
            .map_err(|e| sdk_error(operation::DELETE_STAGE, e))?;

        Ok(json!({}))
    }
}

#[async_trait]
impl ProviderRequest for AwsGatewayRequester {
    async fn request(&self, service: &str, op: &str, params: Value) -> Result<Value> {
        if service != API_GATEWAY_SERVICE {
            return Err(CloudError::unsupported(service, op));
        }

        tracing::debug!("{} {} in {}", service, op, self.region);

        match op {
            operation::GET_REST_APIS => self.get_rest_apis(decode(op, params)?).await,
            operation::GET_STAGES => self.get_stages(decode(op, params)?).await,
            operation::DELETE_STAGE => self.delete_stage(decode(op, params)?).await,
            _ => Err(CloudError::unsupported(service, op)),
        }
    }
}

// ============ Request parameters ============

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct GetRestApisParams {
    limit: Option<i32>,
    position: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GetStagesParams {
    rest_api_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteStageParams {
    rest_api_id: String,
    stage_name: String,
}

fn decode<T: DeserializeOwned>(op: &str, params: Value) -> Result<T> {
    serde_json::from_value(params).map_err(|e| CloudError::InvalidParams {
        operation: op.to_string(),
        message: e.to_string(),
    })
}

fn sdk_error<E>(op: &str, err: E) -> CloudError
where
    E: std::error::Error + 'static,
{
    CloudError::request_failed(
        API_GATEWAY_SERVICE,
        op,
        DisplayErrorContext(err).to_string(),
    )
}

// ============ Response shapes ============

fn rest_api_page(items: &[RestApi], position: Option<&str>) -> Value {
    let items: Vec<Value> = items
        .iter()
        .map(|api| {
            json!({
                "id": api.id().unwrap_or_default(),
                "name": api.name().unwrap_or_default(),
            })
        })
        .collect();

    json!({ "items": items, "position": position })
}

fn stage_list(stages: &[Stage]) -> Value {
    let item: Vec<Value> = stages
        .iter()
        .filter_map(|stage| {
            stage.stage_name().map(|name| {
                json!({
                    "stageName": name,
                    "deploymentId": stage.deployment_id(),
                })
            })
        })
        .collect();

    json!({ "item": item })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_get_rest_apis_defaults() {
        let params: GetRestApisParams = decode(operation::GET_REST_APIS, json!({})).unwrap();
        assert!(params.limit.is_none());
        assert!(params.position.is_none());

        let params: GetRestApisParams = decode(
            operation::GET_REST_APIS,
            json!({ "limit": 500, "position": "next" }),
        )
        .unwrap();
        assert_eq!(params.limit, Some(500));
        assert_eq!(params.position.as_deref(), Some("next"));
    }

    #[test]
    fn test_decode_delete_stage_requires_stage_name() {
        let err = decode::<DeleteStageParams>(
            operation::DELETE_STAGE,
            json!({ "restApiId": "abc" }),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            CloudError::InvalidParams { operation, .. } if operation == "deleteStage"
        ));
    }

    #[test]
    fn test_rest_api_page_shape() {
        let apis = vec![
            RestApi::builder().id("abc").name("other-api-name").build(),
            RestApi::builder().id("def").name("test-api-name").build(),
        ];

        let page = rest_api_page(&apis, None);

        assert_eq!(
            page,
            json!({
                "items": [
                    { "id": "abc", "name": "other-api-name" },
                    { "id": "def", "name": "test-api-name" }
                ],
                "position": null
            })
        );
    }

    #[test]
    fn test_stage_list_skips_unnamed_stages() {
        let stages = vec![
            Stage::builder().stage_name("dev").deployment_id("d1").build(),
            Stage::builder().deployment_id("d2").build(),
        ];

        let list = stage_list(&stages);

        assert_eq!(
            list,
            json!({ "item": [{ "stageName": "dev", "deploymentId": "d1" }] })
        );
    }
}
