//! Deployment-finalize cleanup hook
//!
//! Runs once after a deployment finishes: resolve the current stage from the
//! compiled template, then remove every other stage from the REST API.

use crate::error::Result;
use crate::template::{CompiledTemplate, resolve_stage_name};
use gatesweep_cloud::{
    DeletionRecord, ProviderRequest, delete_stages, locate_api_id, unused_stages,
};
use std::time::Duration;
use tracing::{info, instrument};

/// Options controlling a cleanup run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookOptions {
    /// Wait applied once before the API lookup, letting the provider settle
    /// after the deployment finalizes
    pub cooldown: Duration,
}

impl HookOptions {
    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }
}

/// Deployment state handed to the hook by its host
#[derive(Debug, Clone)]
pub struct DeploymentContext {
    pub template: CompiledTemplate,
    /// Display name of the deployed REST API
    pub api_name: String,
}

/// Result of a cleanup run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupOutcome {
    /// The template names no current stage; nothing was touched
    Skipped,
    Completed {
        api_id: String,
        current_stage: String,
        deleted: Vec<DeletionRecord>,
    },
}

impl CleanupOutcome {
    pub fn deleted(&self) -> &[DeletionRecord] {
        match self {
            CleanupOutcome::Skipped => &[],
            CleanupOutcome::Completed { deleted, .. } => deleted,
        }
    }
}

/// Removes stale API Gateway stages after a deployment
#[derive(Debug, Clone, Default)]
pub struct CleanupHook {
    options: HookOptions,
}

impl CleanupHook {
    /// Lifecycle event this hook is registered for
    pub const EVENT: &'static str = "after:aws:deploy:finalize:cleanup";

    pub fn new(options: HookOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &HookOptions {
        &self.options
    }

    pub fn handles(&self, event: &str) -> bool {
        event == Self::EVENT
    }

    /// Run the cleanup against the given provider
    ///
    /// Without a current stage name nothing can be classified as unused, so
    /// the run ends as [`CleanupOutcome::Skipped`] before any request is made.
    /// Provider failures propagate unchanged; stages deleted before a failure
    /// stay deleted.
    #[instrument(skip_all, fields(api_name = %context.api_name))]
    pub async fn run(
        &self,
        requester: &dyn ProviderRequest,
        context: &DeploymentContext,
    ) -> Result<CleanupOutcome> {
        info!("Starting delete unused stages...");

        let Some(current_stage) = resolve_stage_name(&context.template) else {
            info!("No API Gateway stage declared in the compiled template, skipping cleanup");
            return Ok(CleanupOutcome::Skipped);
        };

        if !self.options.cooldown.is_zero() {
            info!(
                "Waiting {}s before cleaning up stages",
                self.options.cooldown.as_secs()
            );
            tokio::time::sleep(self.options.cooldown).await;
        }

        let api_id = locate_api_id(requester, &context.api_name).await?;
        let unused = unused_stages(requester, &api_id, Some(&current_stage)).await?;
        info!(
            current_stage = %current_stage,
            unused = unused.len(),
            "Resolved stages for {}",
            api_id
        );

        let deleted = delete_stages(requester, &api_id, &unused).await?;

        Ok(CleanupOutcome::Completed {
            api_id,
            current_stage,
            deleted,
        })
    }
}
