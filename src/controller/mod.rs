//! # Controller
//!
//! Lifecycle decisions for the platform application custom resource.
//!
//! - `lifecycle`: Create / Update / Replace / Delete sequencing
//! - `validation`: Required property checks and the ARN shape test
//! - `dispatch`: Turns a request into exactly one CloudFormation response

pub mod dispatch;
pub mod lifecycle;
pub mod validation;

pub use dispatch::{dispatch, failure_response, send_response};
pub use lifecycle::{requires_replacement, LifecycleController, ReplacePhase};
pub use validation::{is_platform_application_arn, validate_properties, DesiredApplication};
