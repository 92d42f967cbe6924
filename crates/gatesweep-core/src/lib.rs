//! gatesweep core
//!
//! Reconciles the stages of a deployed API Gateway REST API against the
//! compiled template of the current deployment.
//!
//! ```ignore
//! use gatesweep_core::{CleanupHook, CompiledTemplate, DeploymentContext, HookOptions};
//!
//! let context = DeploymentContext {
//!     template: CompiledTemplate::load(path)?,
//!     api_name: "dev-my-service".to_string(),
//! };
//! let outcome = CleanupHook::new(HookOptions::default())
//!     .run(&requester, &context)
//!     .await?;
//! ```

pub mod error;
pub mod hook;
pub mod naming;
pub mod template;

pub use error::{CoreError, Result};
pub use hook::{CleanupHook, CleanupOutcome, DeploymentContext, HookOptions};
pub use naming::{DEFAULT_STAGE, ServiceNaming};
pub use template::{
    CompiledTemplate, DEPLOYMENT_RESOURCE_TYPE, ResourceDescriptor, ResourceKind,
    STAGE_RESOURCE_TYPE, resolve_stage_name,
};
