//! AWS transport for gatesweep
//!
//! Implements [`gatesweep_cloud::ProviderRequest`] on top of
//! `aws-sdk-apigateway`, translating the three API Gateway operations the
//! cleanup uses (`getRestApis`, `getStages`, `deleteStage`) into SDK calls.
//!
//! # Requirements
//!
//! - AWS credentials resolvable by the default provider chain
//!   (`AWS_PROFILE`, `AWS_ACCESS_KEY_ID`/`AWS_SECRET_ACCESS_KEY`, SSO, IMDS)
//!
//! # Example
//!
//! ```ignore
//! use gatesweep_cloud_aws::AwsGatewayRequester;
//!
//! let requester = AwsGatewayRequester::connect("us-east-1").await;
//! let id = gatesweep_cloud::locate_api_id(&requester, "dev-my-service").await?;
//! ```

pub mod requester;

pub use requester::AwsGatewayRequester;
