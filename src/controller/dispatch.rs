//! # Dispatch
//!
//! Entry point for one custom resource event: run the lifecycle controller
//! and turn its single outcome into the response CloudFormation waits for.

use crate::controller::LifecycleController;
use crate::error::HandlerError;
use crate::provider::PlatformApplicationProvider;
use crate::resource::{CustomResourceResponse, ResourceRequest};
use anyhow::{Context, Result};
use reqwest::header::CONTENT_TYPE;
use tracing::{error, info, info_span, Instrument};

/// Handle `request` and build its response. Never fails: errors become a FAILED response.
pub async fn dispatch<P: PlatformApplicationProvider>(
    controller: &LifecycleController<P>,
    request: &ResourceRequest,
) -> CustomResourceResponse {
    let span = info_span!(
        "custom_resource.request",
        request.id = request.request_id.as_str(),
        request.kind = request.request_type.as_str(),
        logical_resource_id = request.logical_resource_id.as_str(),
    );

    async move {
        info!("Handling {} request", request.request_type);
        let outcome = controller.handle(request).await;
        let response = CustomResourceResponse::from_outcome(request, &outcome);

        match &outcome {
            Err(e) => error!("{} request failed: {}", request.request_type, e.reason()),
            Ok(_) => info!(
                "{} request succeeded for {}",
                request.request_type, response.physical_resource_id
            ),
        }

        response
    }
    .instrument(span)
    .await
}

/// FAILED response for a request that could not be handled at all, e.g.
/// because the SNS client failed to initialize.
#[must_use]
pub fn failure_response(request: &ResourceRequest, error: anyhow::Error) -> CustomResourceResponse {
    let error = HandlerError::Provider(error);
    error!("{} request failed before dispatch: {}", request.request_type, error.reason());
    CustomResourceResponse::from_outcome(request, &Err(error))
}

/// PUT the response to the presigned `ResponseURL`.
///
/// The presigned URL is signed without a content type, so the header is sent empty.
///
/// # Errors
///
/// Serialization, transport, or a non-success HTTP status.
pub async fn send_response(
    client: &reqwest::Client,
    response_url: &str,
    response: &CustomResourceResponse,
) -> Result<()> {
    let body = serde_json::to_string(response).context("Failed to serialize response")?;

    client
        .put(response_url)
        .header(CONTENT_TYPE, "")
        .body(body)
        .send()
        .await
        .context("Failed to send custom resource response")?
        .error_for_status()
        .context("Custom resource response was rejected")?;

    info!("Sent {:?} response for {}", response.status, response.logical_resource_id);
    Ok(())
}
