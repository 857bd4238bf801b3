//! # Configuration
//!
//! Runtime configuration for the SNS client. Credentials always come from the
//! AWS SDK default chain (environment, profile, IRSA, instance metadata).

/// AWS configuration for SNS
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AwsConfig {
    /// AWS region (e.g., "us-east-1"). Falls back to the SDK region chain when unset.
    pub region: Option<String>,
    /// Endpoint override for SNS-compatible emulators such as LocalStack
    pub endpoint_url: Option<String>,
}

impl AwsConfig {
    #[must_use]
    pub fn new(region: Option<String>, endpoint_url: Option<String>) -> Self {
        Self {
            region: region.filter(|r| !r.is_empty()),
            endpoint_url: endpoint_url.filter(|u| !u.is_empty()),
        }
    }
}
