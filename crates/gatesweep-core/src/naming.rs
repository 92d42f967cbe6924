//! Deployment framework naming conventions

/// Stage used when a deployment does not name one
pub const DEFAULT_STAGE: &str = "dev";

/// Inputs for deriving the REST API display name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceNaming {
    pub service: String,
    pub stage: Option<String>,
    /// Explicit API name configured on the provider
    pub api_name: Option<String>,
}

impl ServiceNaming {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            ..Default::default()
        }
    }

    pub fn with_stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = Some(stage.into());
        self
    }

    pub fn with_api_name(mut self, api_name: impl Into<String>) -> Self {
        self.api_name = Some(api_name.into());
        self
    }

    pub fn stage(&self) -> &str {
        self.stage.as_deref().unwrap_or(DEFAULT_STAGE)
    }

    /// `<stage>-<service>` unless an explicit API name is set
    pub fn api_gateway_name(&self) -> String {
        match self.api_name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("{}-{}", self.stage(), self.service),
        }
    }
}
