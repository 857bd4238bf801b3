//! # Custom Resource Types
//!
//! Wire types exchanged with CloudFormation: the incoming request event and
//! the response posted back to the presigned `ResponseURL`.

pub mod request;
pub mod response;

pub use request::{Attributes, PlatformApplicationProperties, RequestType, ResourceRequest};
pub use response::{CustomResourceResponse, ResponseStatus};
