//! # AWS SNS Client
//!
//! Client for the SNS platform application API.
//!
//! This module provides functionality to:
//! - Create platform applications
//! - Update platform application attributes in place
//! - Delete platform applications
//!
//! SDK errors are returned unchanged so the caller surfaces exactly what SNS reported.

use crate::config::AwsConfig;
use crate::constants::SNS_PROVIDER_LABEL;
use crate::observability::metrics;
use crate::provider::{CreateApplicationInput, PlatformApplicationProvider};
use crate::resource::Attributes;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_sns::Client as SnsClient;
use std::time::Instant;
use tracing::{field, info, info_span, Instrument, Span};

/// AWS SNS platform application provider
pub struct AwsSnsPlatformApplications {
    client: SnsClient,
    region: Option<String>,
}

impl std::fmt::Debug for AwsSnsPlatformApplications {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsSnsPlatformApplications")
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}

impl AwsSnsPlatformApplications {
    /// Create a new SNS client from the default credential chain
    ///
    /// # Errors
    ///
    /// Fails when the shared AWS configuration cannot be loaded.
    pub async fn new(config: &AwsConfig) -> Result<Self> {
        let sdk_config = Self::create_default_config(config).await?;
        let region = sdk_config.region().map(ToString::to_string);

        match &region {
            Some(region) => info!("Using SNS in region {}", region),
            None => info!("No AWS region configured, SNS calls will fail until one is set"),
        }

        Ok(Self::from_client(SnsClient::new(&sdk_config), region))
    }

    /// Wrap an already configured SNS client
    #[must_use]
    pub fn from_client(client: SnsClient, region: Option<String>) -> Self {
        Self { client, region }
    }

    async fn create_default_config(config: &AwsConfig) -> Result<SdkConfig> {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(aws_config::Region::new(region.clone()));
        }
        if let Some(endpoint_url) = &config.endpoint_url {
            info!("Using SNS endpoint override: {}", endpoint_url);
            loader = loader.endpoint_url(endpoint_url);
        }

        Ok(loader.load().await)
    }

    fn operation_span(&self, name: &'static str, application_arn: Option<&str>) -> Span {
        info_span!(
            "sns.platform_application",
            operation.name = name,
            application.arn = application_arn,
            region = self.region.as_deref(),
            operation.success = field::Empty,
            operation.duration_ms = field::Empty,
            error.message = field::Empty,
        )
    }
}

/// Record span fields and metrics for a finished SNS call
fn finish_operation<T>(span: &Span, operation: &str, start: Instant, result: &Result<T>) {
    let elapsed = start.elapsed();
    span.record(
        "operation.duration_ms",
        u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
    );
    metrics::record_provider_operation(SNS_PROVIDER_LABEL, operation, elapsed.as_secs_f64());

    match result {
        Ok(_) => {
            span.record("operation.success", true);
        }
        Err(e) => {
            span.record("operation.success", false);
            span.record("error.message", field::display(e));
            metrics::increment_provider_operation_errors(SNS_PROVIDER_LABEL, operation);
        }
    }
}

#[async_trait]
impl PlatformApplicationProvider for AwsSnsPlatformApplications {
    async fn create_application(&self, input: &CreateApplicationInput) -> Result<String> {
        let span = self.operation_span("create", None);
        let span_clone = span.clone();
        let start = Instant::now();

        async move {
            info!(
                "Creating SNS platform application {} on {}",
                input.name, input.platform
            );
            let result: Result<String> = async {
                let output = self
                    .client
                    .create_platform_application()
                    .name(input.name.as_str())
                    .platform(input.platform.as_str())
                    .set_attributes(Some(input.attributes.clone()))
                    .send()
                    .await?;

                output
                    .platform_application_arn()
                    .map(ToString::to_string)
                    .ok_or_else(|| anyhow!("CreatePlatformApplication returned no PlatformApplicationArn"))
            }
            .await;

            if let Ok(arn) = &result {
                span_clone.record("application.arn", arn.as_str());
                info!("Created SNS platform application {}", arn);
            }
            finish_operation(&span_clone, "create", start, &result);
            result
        }
        .instrument(span)
        .await
    }

    async fn delete_application(&self, application_arn: &str) -> Result<()> {
        let span = self.operation_span("delete", Some(application_arn));
        let span_clone = span.clone();
        let start = Instant::now();

        async move {
            info!("Deleting SNS platform application {}", application_arn);
            let result = self
                .client
                .delete_platform_application()
                .platform_application_arn(application_arn)
                .send()
                .await
                .map(|_| ())
                .map_err(anyhow::Error::from);

            finish_operation(&span_clone, "delete", start, &result);
            result
        }
        .instrument(span)
        .await
    }

    async fn set_attributes(&self, application_arn: &str, attributes: &Attributes) -> Result<()> {
        let span = self.operation_span("set_attributes", Some(application_arn));
        let span_clone = span.clone();
        let start = Instant::now();

        async move {
            let mut keys: Vec<&str> = attributes.keys().map(String::as_str).collect();
            keys.sort_unstable();
            info!(
                "Updating SNS platform application {} attributes: {}",
                application_arn,
                keys.join(", ")
            );

            let result = self
                .client
                .set_platform_application_attributes()
                .platform_application_arn(application_arn)
                .set_attributes(Some(attributes.clone()))
                .send()
                .await
                .map(|_| ())
                .map_err(anyhow::Error::from);

            finish_operation(&span_clone, "set_attributes", start, &result);
            result
        }
        .instrument(span)
        .await
    }
}

