//! # Provider Modules
//!
//! The transport the lifecycle controller drives. The production
//! implementation talks to Amazon SNS; tests substitute an in-memory double.

use crate::resource::Attributes;
use anyhow::Result;
use async_trait::async_trait;

/// Input of `CreatePlatformApplication`.
///
/// Only these three fields reach SNS, so transport-internal properties such as
/// the `ServiceToken` have no way through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateApplicationInput {
    pub name: String,
    pub platform: String,
    pub attributes: Attributes,
}

/// Provider trait for push-notification platform applications
#[async_trait]
pub trait PlatformApplicationProvider: Send + Sync {
    /// Create a platform application and return its ARN
    async fn create_application(&self, input: &CreateApplicationInput) -> Result<String>;

    /// Delete the platform application identified by `application_arn`
    async fn delete_application(&self, application_arn: &str) -> Result<()>;

    /// Overwrite attributes of an existing platform application in place
    async fn set_attributes(&self, application_arn: &str, attributes: &Attributes) -> Result<()>;
}

#[async_trait]
impl<P: PlatformApplicationProvider + ?Sized> PlatformApplicationProvider for std::sync::Arc<P> {
    async fn create_application(&self, input: &CreateApplicationInput) -> Result<String> {
        (**self).create_application(input).await
    }

    async fn delete_application(&self, application_arn: &str) -> Result<()> {
        (**self).delete_application(application_arn).await
    }

    async fn set_attributes(&self, application_arn: &str, attributes: &Attributes) -> Result<()> {
        (**self).set_attributes(application_arn, attributes).await
    }
}

pub mod aws;
