//! # Custom Resource Request
//!
//! The CloudFormation custom resource event, as delivered to the handler.
//!
//! ## Example
//!
//! ```json
//! {
//!   "RequestType": "Update",
//!   "RequestId": "0b6c5a8e-...",
//!   "StackId": "arn:aws:cloudformation:eu-west-1:123456789012:stack/push/...",
//!   "LogicalResourceId": "IosApplication",
//!   "ResponseURL": "https://cloudformation-custom-resource-response-euwest1.s3...",
//!   "ResourceType": "Custom::SnsPlatformApplication",
//!   "PhysicalResourceId": "arn:aws:sns:eu-west-1:123456789012:app/APNS/ios",
//!   "ResourceProperties": {
//!     "ServiceToken": "arn:aws:lambda:...",
//!     "Name": "ios",
//!     "Platform": "APNS",
//!     "Attributes": { "PlatformCredential": "...", "PlatformPrincipal": "..." }
//!   },
//!   "OldResourceProperties": { "Name": "ios", "Platform": "APNS", "Attributes": {} }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// SNS platform application attributes
pub type Attributes = HashMap<String, String>;

/// Lifecycle transition requested by CloudFormation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum RequestType {
    Create,
    Update,
    Delete,
}

impl RequestType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RequestType::Create => "create",
            RequestType::Update => "update",
            RequestType::Delete => "delete",
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `ResourceProperties` / `OldResourceProperties` of the template resource.
///
/// Every field is optional on the wire; presence is enforced by validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlatformApplicationProperties {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub attributes: Option<Attributes>,
    /// Lambda ARN CloudFormation invokes. Never forwarded to SNS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_token: Option<String>,
}

/// A single custom resource invocation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceRequest {
    pub request_type: RequestType,
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub stack_id: String,
    #[serde(default)]
    pub logical_resource_id: String,
    #[serde(default, rename = "ResponseURL", skip_serializing_if = "Option::is_none")]
    pub response_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    /// Present for Update and Delete
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_resource_id: Option<String>,
    #[serde(default)]
    pub resource_properties: PlatformApplicationProperties,
    /// Present for Update only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_resource_properties: Option<PlatformApplicationProperties>,
}

impl ResourceRequest {
    /// Build a request carrying only the lifecycle fields
    #[must_use]
    pub fn new(request_type: RequestType, resource_properties: PlatformApplicationProperties) -> Self {
        Self {
            request_type,
            request_id: String::new(),
            stack_id: String::new(),
            logical_resource_id: String::new(),
            response_url: None,
            resource_type: None,
            physical_resource_id: None,
            resource_properties,
            old_resource_properties: None,
        }
    }

    #[must_use]
    pub fn with_physical_resource_id(mut self, physical_resource_id: impl Into<String>) -> Self {
        self.physical_resource_id = Some(physical_resource_id.into());
        self
    }

    #[must_use]
    pub fn with_old_resource_properties(mut self, old: PlatformApplicationProperties) -> Self {
        self.old_resource_properties = Some(old);
        self
    }
}
