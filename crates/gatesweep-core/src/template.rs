//! Compiled CloudFormation template
//!
//! Only the `Resources` section is modelled. Resources keep their document
//! order, which decides the "last one wins" rule of [`resolve_stage_name`].

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::path::Path;

pub const STAGE_RESOURCE_TYPE: &str = "AWS::ApiGateway::Stage";
pub const DEPLOYMENT_RESOURCE_TYPE: &str = "AWS::ApiGateway::Deployment";

/// Where the framework keeps the compiled template inside its state file
const STATE_TEMPLATE_POINTER: &str = "/service/provider/compiledCloudFormationTemplate";

/// Compiled infrastructure template, keyed by logical resource name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompiledTemplate {
    #[serde(rename = "Resources", default)]
    resources: Map<String, Value>,
}

impl CompiledTemplate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource with the given type and optional `StageName`
    pub fn with_resource(
        mut self,
        logical_name: impl Into<String>,
        resource_type: &str,
        stage_name: Option<&str>,
    ) -> Self {
        let mut resource = json!({ "Type": resource_type });
        if let Some(name) = stage_name {
            resource["Properties"] = json!({ "StageName": name });
        }
        self.resources.insert(logical_name.into(), resource);
        self
    }

    /// Load a template from a JSON file
    ///
    /// Accepts a bare template (top-level `Resources`) or the framework's
    /// deployment state file, which nests the compiled template under
    /// `service.provider.compiledCloudFormationTemplate`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CoreError::TemplateRead {
            path: path.to_path_buf(),
            source,
        })?;

        let document: Value =
            serde_json::from_str(&content).map_err(|source| CoreError::TemplateParse {
                path: path.to_path_buf(),
                source,
            })?;

        let template = Self::from_document(document)
            .ok_or_else(|| CoreError::MissingResources(path.to_path_buf()))?;

        tracing::debug!(
            "Loaded template {} with {} resources",
            path.display(),
            template.len()
        );
        Ok(template)
    }

    /// Extract a template from a parsed JSON document
    pub fn from_document(mut document: Value) -> Option<Self> {
        let template = if document.get("Resources").is_some() {
            document
        } else {
            document.pointer_mut(STATE_TEMPLATE_POINTER)?.take()
        };

        serde_json::from_value(template).ok()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Iterate resources in document order
    pub fn resources(&self) -> impl Iterator<Item = (&str, ResourceDescriptor<'_>)> {
        self.resources
            .iter()
            .map(|(name, value)| (name.as_str(), ResourceDescriptor { value }))
    }
}

/// Kinds of resource the resolver looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Stage,
    Deployment,
    Other,
}

impl ResourceKind {
    pub fn from_type(resource_type: &str) -> Self {
        match resource_type {
            STAGE_RESOURCE_TYPE => ResourceKind::Stage,
            DEPLOYMENT_RESOURCE_TYPE => ResourceKind::Deployment,
            _ => ResourceKind::Other,
        }
    }
}

/// Borrowed view of a single template resource
///
/// Lenient by construction: a resource without `Type` is `Other`, and a
/// missing or non-string `StageName` reads as `None`.
#[derive(Debug, Clone, Copy)]
pub struct ResourceDescriptor<'a> {
    value: &'a Value,
}

impl<'a> ResourceDescriptor<'a> {
    pub fn resource_type(&self) -> Option<&'a str> {
        self.value.get("Type").and_then(Value::as_str)
    }

    pub fn kind(&self) -> ResourceKind {
        self.resource_type()
            .map_or(ResourceKind::Other, ResourceKind::from_type)
    }

    pub fn properties(&self) -> Option<&'a Map<String, Value>> {
        self.value.get("Properties").and_then(Value::as_object)
    }

    pub fn stage_name(&self) -> Option<&'a str> {
        self.properties()
            .and_then(|props| props.get("StageName"))
            .and_then(Value::as_str)
    }
}

/// Determine the stage the template declares as current
///
/// Every Stage resource overwrites the Stage candidate and every Deployment
/// resource overwrites the Deployment candidate, so the last of each kind in
/// document order wins. A named Stage beats any Deployment. Returns `None`
/// when neither kind yields a non-empty name.
pub fn resolve_stage_name(template: &CompiledTemplate) -> Option<String> {
    let mut stage_kind_name = None;
    let mut deployment_kind_name = None;

    for (_, resource) in template.resources() {
        match resource.kind() {
            ResourceKind::Stage => stage_kind_name = resource.stage_name(),
            ResourceKind::Deployment => deployment_kind_name = resource.stage_name(),
            ResourceKind::Other => {}
        }
    }

    stage_kind_name
        .filter(|name| !name.is_empty())
        .or(deployment_kind_name.filter(|name| !name.is_empty()))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_last_stage_wins_over_deployments() {
        let template = CompiledTemplate::new()
            .with_resource("Other", "Other", None)
            .with_resource("Foo", DEPLOYMENT_RESOURCE_TYPE, Some("Foo"))
            .with_resource("Bar", STAGE_RESOURCE_TYPE, Some("Bar"))
            .with_resource("Baz", STAGE_RESOURCE_TYPE, Some("Baz"))
            .with_resource("Blah", DEPLOYMENT_RESOURCE_TYPE, Some("Blah"));

        assert_eq!(resolve_stage_name(&template).as_deref(), Some("Baz"));
    }

    #[test]
    fn test_last_deployment_wins_without_stage() {
        let template = CompiledTemplate::new()
            .with_resource("Other", "Other", None)
            .with_resource("Foo", DEPLOYMENT_RESOURCE_TYPE, Some("Foo"))
            .with_resource("Blah", DEPLOYMENT_RESOURCE_TYPE, Some("Blah"));

        assert_eq!(resolve_stage_name(&template).as_deref(), Some("Blah"));
    }

    #[test]
    fn test_single_stage_beats_any_deployment_order() {
        let template = CompiledTemplate::new()
            .with_resource("Live", STAGE_RESOURCE_TYPE, Some("live"))
            .with_resource("D1", DEPLOYMENT_RESOURCE_TYPE, Some("d1"))
            .with_resource("D2", DEPLOYMENT_RESOURCE_TYPE, Some("d2"));

        assert_eq!(resolve_stage_name(&template).as_deref(), Some("live"));
    }

    #[test]
    fn test_empty_template_resolves_nothing() {
        assert_eq!(resolve_stage_name(&CompiledTemplate::new()), None);

        let template = CompiledTemplate::new().with_resource("Bucket", "AWS::S3::Bucket", None);
        assert_eq!(resolve_stage_name(&template), None);
    }

    #[test]
    fn test_unnamed_stage_falls_back_to_deployment() {
        let template = CompiledTemplate::new()
            .with_resource("Named", STAGE_RESOURCE_TYPE, Some("named"))
            .with_resource("Deploy", DEPLOYMENT_RESOURCE_TYPE, Some("dev"))
            .with_resource("Unnamed", STAGE_RESOURCE_TYPE, None);

        assert_eq!(resolve_stage_name(&template).as_deref(), Some("dev"));
    }

    #[test]
    fn test_malformed_resources_are_ignored() {
        let template: CompiledTemplate = serde_json::from_value(json!({
            "Resources": {
                "NoType": { "Properties": { "StageName": "x" } },
                "NotAnObject": "oops",
                "BadName": { "Type": DEPLOYMENT_RESOURCE_TYPE, "Properties": { "StageName": 42 } }
            }
        }))
        .unwrap();

        assert_eq!(template.len(), 3);
        assert_eq!(resolve_stage_name(&template), None);
    }

    #[test]
    fn test_document_order_is_preserved() {
        let template: CompiledTemplate = serde_json::from_str(
            r#"{
                "Resources": {
                    "Zeta": { "Type": "AWS::ApiGateway::Deployment", "Properties": { "StageName": "zeta" } },
                    "Alpha": { "Type": "AWS::ApiGateway::Deployment", "Properties": { "StageName": "alpha" } }
                }
            }"#,
        )
        .unwrap();

        let names: Vec<_> = template.resources().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
        assert_eq!(resolve_stage_name(&template).as_deref(), Some("alpha"));
    }

    #[test]
    fn test_load_bare_template() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("cloudformation-template-update-stack.json");
        fs::write(
            &path,
            r#"{
                "AWSTemplateFormatVersion": "2010-09-09",
                "Resources": {
                    "ApiGatewayDeployment1": {
                        "Type": "AWS::ApiGateway::Deployment",
                        "Properties": { "StageName": "prod" }
                    }
                }
            }"#,
        )
        .unwrap();

        let template = CompiledTemplate::load(&path).unwrap();
        assert_eq!(resolve_stage_name(&template).as_deref(), Some("prod"));
    }

    #[test]
    fn test_load_state_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("serverless-state.json");
        fs::write(
            &path,
            r#"{
                "service": {
                    "service": "my-service",
                    "provider": {
                        "compiledCloudFormationTemplate": {
                            "Resources": {
                                "ApiGatewayStage": {
                                    "Type": "AWS::ApiGateway::Stage",
                                    "Properties": { "StageName": "staging" }
                                }
                            }
                        }
                    }
                }
            }"#,
        )
        .unwrap();

        let template = CompiledTemplate::load(&path).unwrap();
        assert_eq!(resolve_stage_name(&template).as_deref(), Some("staging"));
    }

    #[test]
    fn test_load_errors() {
        let temp_dir = tempfile::tempdir().unwrap();

        let missing = temp_dir.path().join("missing.json");
        assert!(matches!(
            CompiledTemplate::load(&missing),
            Err(CoreError::TemplateRead { .. })
        ));

        let invalid = temp_dir.path().join("invalid.json");
        fs::write(&invalid, "{ not json").unwrap();
        assert!(matches!(
            CompiledTemplate::load(&invalid),
            Err(CoreError::TemplateParse { .. })
        ));

        let unrelated = temp_dir.path().join("package.json");
        fs::write(&unrelated, r#"{ "name": "app" }"#).unwrap();
        assert!(matches!(
            CompiledTemplate::load(&unrelated),
            Err(CoreError::MissingResources(_))
        ));
    }
}
