//! # Metrics
//!
//! Prometheus metrics for monitoring the handler.
//!
//! ## Metrics Exposed
//!
//! - `sns_platform_application_requests_total` - Requests handled, by request type
//! - `sns_platform_application_request_errors_total` - Failed requests, by request type and error kind
//! - `sns_platform_application_request_duration_seconds` - Duration of request handling
//! - `sns_platform_application_replacements_total` - Updates that replaced the application
//! - `sns_platform_application_skipped_deletes_total` - Deletes skipped because the id is not an SNS ARN
//! - `sns_platform_application_credential_normalizations_total` - Requests whose APNS credentials were normalized
//! - `sns_platform_application_provider_operations_total` - Provider calls, by provider and operation
//! - `sns_platform_application_provider_operation_duration_seconds` - Duration of provider calls
//! - `sns_platform_application_provider_operation_errors_total` - Failed provider calls

use anyhow::Result;
use prometheus::{Encoder, HistogramVec, IntCounter, IntCounterVec, Registry, TextEncoder};
use std::sync::LazyLock;

pub(crate) static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

static REQUESTS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "sns_platform_application_requests_total",
            "Total number of custom resource requests by request type",
        ),
        &["request_type"],
    )
    .expect("Failed to create REQUESTS_TOTAL metric - this should never happen")
});

static REQUEST_ERRORS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "sns_platform_application_request_errors_total",
            "Total number of failed custom resource requests by request type and error kind",
        ),
        &["request_type", "kind"],
    )
    .expect("Failed to create REQUEST_ERRORS_TOTAL metric - this should never happen")
});

static REQUEST_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    HistogramVec::new(
        prometheus::HistogramOpts::new(
            "sns_platform_application_request_duration_seconds",
            "Duration of custom resource request handling in seconds",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0]),
        &["request_type"],
    )
    .expect("Failed to create REQUEST_DURATION metric - this should never happen")
});

static REPLACEMENTS_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "sns_platform_application_replacements_total",
        "Total number of updates that replaced the platform application",
    )
    .expect("Failed to create REPLACEMENTS_TOTAL metric - this should never happen")
});

static SKIPPED_DELETES_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "sns_platform_application_skipped_deletes_total",
        "Total number of deletes skipped because the physical id is not a platform application ARN",
    )
    .expect("Failed to create SKIPPED_DELETES_TOTAL metric - this should never happen")
});

static CREDENTIAL_NORMALIZATIONS_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    IntCounter::new(
        "sns_platform_application_credential_normalizations_total",
        "Total number of requests whose APNS credentials were normalized",
    )
    .expect("Failed to create CREDENTIAL_NORMALIZATIONS_TOTAL metric - this should never happen")
});

static PROVIDER_OPERATIONS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "sns_platform_application_provider_operations_total",
            "Total number of provider operations by provider and operation",
        ),
        &["provider", "operation"],
    )
    .expect("Failed to create PROVIDER_OPERATIONS_TOTAL metric - this should never happen")
});

static PROVIDER_OPERATION_DURATION: LazyLock<HistogramVec> = LazyLock::new(|| {
    HistogramVec::new(
        prometheus::HistogramOpts::new(
            "sns_platform_application_provider_operation_duration_seconds",
            "Duration of provider operations in seconds by provider and operation",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.0, 5.0, 10.0]),
        &["provider", "operation"],
    )
    .expect("Failed to create PROVIDER_OPERATION_DURATION metric - this should never happen")
});

static PROVIDER_OPERATION_ERRORS_TOTAL: LazyLock<IntCounterVec> = LazyLock::new(|| {
    IntCounterVec::new(
        prometheus::Opts::new(
            "sns_platform_application_provider_operation_errors_total",
            "Total number of provider operation errors by provider and operation",
        ),
        &["provider", "operation"],
    )
    .expect("Failed to create PROVIDER_OPERATION_ERRORS_TOTAL metric - this should never happen")
});

/// Register every metric with the crate registry
///
/// # Errors
///
/// Fails when a metric is already registered, e.g. on a second call.
pub fn register_metrics() -> Result<()> {
    REGISTRY.register(Box::new(REQUESTS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(REQUEST_ERRORS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(REQUEST_DURATION.clone()))?;
    REGISTRY.register(Box::new(REPLACEMENTS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(SKIPPED_DELETES_TOTAL.clone()))?;
    REGISTRY.register(Box::new(CREDENTIAL_NORMALIZATIONS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(PROVIDER_OPERATIONS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(PROVIDER_OPERATION_DURATION.clone()))?;
    REGISTRY.register(Box::new(PROVIDER_OPERATION_ERRORS_TOTAL.clone()))?;

    Ok(())
}

/// Encode every registered metric in the Prometheus text format
///
/// # Errors
///
/// Fails when encoding fails or the output is not UTF-8.
pub fn gather_metrics() -> Result<String> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    encoder.encode(&REGISTRY.gather(), &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

pub fn increment_requests(request_type: &str) {
    REQUESTS_TOTAL.with_label_values(&[request_type]).inc();
}

pub fn increment_request_errors(request_type: &str, kind: &str) {
    REQUEST_ERRORS_TOTAL
        .with_label_values(&[request_type, kind])
        .inc();
}

pub fn observe_request_duration(request_type: &str, duration: f64) {
    REQUEST_DURATION
        .with_label_values(&[request_type])
        .observe(duration);
}

pub fn increment_replacements() {
    REPLACEMENTS_TOTAL.inc();
}

pub fn increment_skipped_deletes() {
    SKIPPED_DELETES_TOTAL.inc();
}

pub fn increment_credential_normalizations() {
    CREDENTIAL_NORMALIZATIONS_TOTAL.inc();
}

pub fn record_provider_operation(provider: &str, operation: &str, duration: f64) {
    PROVIDER_OPERATIONS_TOTAL
        .with_label_values(&[provider, operation])
        .inc();
    PROVIDER_OPERATION_DURATION
        .with_label_values(&[provider, operation])
        .observe(duration);
}

pub fn increment_provider_operation_errors(provider: &str, operation: &str) {
    PROVIDER_OPERATION_ERRORS_TOTAL
        .with_label_values(&[provider, operation])
        .inc();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registered_metrics_are_gathered() {
        register_metrics().expect("metrics should register once");

        increment_requests("create");
        increment_request_errors("create", "provider");
        record_provider_operation("sns", "create", 0.2);

        let text = gather_metrics().expect("metrics should encode");
        assert!(text.contains("sns_platform_application_requests_total"));
        assert!(text.contains("request_type=\"create\""));
        assert!(text.contains("sns_platform_application_provider_operation_duration_seconds"));
    }
}
