//! # Custom Resource Response
//!
//! Every request gets exactly one response. It is built from the single
//! outcome of the lifecycle controller.

use crate::error::HandlerError;
use crate::resource::ResourceRequest;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseStatus {
    Success,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomResourceResponse {
    pub status: ResponseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub physical_resource_id: String,
    pub stack_id: String,
    pub request_id: String,
    pub logical_resource_id: String,
}

impl CustomResourceResponse {
    /// Build the response for `request` from the controller outcome.
    ///
    /// When the outcome carries no new identifier the request's own physical id
    /// is echoed. A failed Create has none, so the logical id stands in; the
    /// Delete that CloudFormation sends during rollback then fails the ARN shape
    /// check and is skipped.
    #[must_use]
    pub fn from_outcome(
        request: &ResourceRequest,
        outcome: &Result<Option<String>, HandlerError>,
    ) -> Self {
        let fallback_id = || {
            request
                .physical_resource_id
                .clone()
                .unwrap_or_else(|| request.logical_resource_id.clone())
        };

        let (status, reason, physical_resource_id) = match outcome {
            Ok(Some(id)) => (ResponseStatus::Success, None, id.clone()),
            Ok(None) => (ResponseStatus::Success, None, fallback_id()),
            Err(error) => (ResponseStatus::Failed, Some(error.reason()), fallback_id()),
        };

        Self {
            status,
            reason,
            physical_resource_id,
            stack_id: request.stack_id.clone(),
            request_id: request.request_id.clone(),
            logical_resource_id: request.logical_resource_id.clone(),
        }
    }
}
