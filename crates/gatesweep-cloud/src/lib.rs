//! gatesweep cloud layer
//!
//! Provider request abstraction and the API Gateway stage operations built on
//! top of it.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │             gatesweep-core (CleanupHook)         │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │                gatesweep-cloud                   │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │  locate_api_id / unused_stages /          │   │
//! │  │  delete_stages                            │   │
//! │  └──────────────────┬───────────────────────┘   │
//! │  ┌──────────────────▼───────────────────────┐   │
//! │  │  trait ProviderRequest { request(..) }    │   │
//! │  └──────────────────────────────────────────┘   │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//!           ┌───────▼───────┐
//!           │ gatesweep-    │
//!           │ cloud-aws     │
//!           └───────────────┘
//! ```

pub mod error;
pub mod gateway;
pub mod record;
pub mod request;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-exports
pub use error::{CloudError, Result};
pub use gateway::{delete_stages, locate_api_id, unused_stages};
pub use record::{ApiIdentity, DeletionRecord, StageRecord};
pub use request::{API_GATEWAY_SERVICE, ProviderRequest, operation};
