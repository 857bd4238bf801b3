//! SNS Platform Application Handler Library
//!
//! Lifecycle handling for the `Custom::SnsPlatformApplication` CloudFormation
//! resource. The controller decides between create, in-place update, replace
//! and delete; APNS credentials are rebuilt into multi-line PEM before they
//! reach SNS.
//!
//! Tests are included in the module files and under `tests/`.

pub mod config;
pub mod constants;
pub mod controller;
pub mod credentials;
pub mod error;
pub mod observability;
pub mod provider;
pub mod resource;

pub use controller::{dispatch, failure_response, send_response, LifecycleController};
pub use error::{HandlerError, ValidationError};
pub use provider::aws::AwsSnsPlatformApplications;
pub use provider::{CreateApplicationInput, PlatformApplicationProvider};
pub use resource::{CustomResourceResponse, ResourceRequest};
