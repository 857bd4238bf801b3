//! # Lifecycle Controller
//!
//! Decides which SNS calls a custom resource request turns into.
//!
//! | Request | Provider calls |
//! |---------|----------------|
//! | Create  | `create_application` |
//! | Update, Name and Platform unchanged | `set_attributes` |
//! | Update, Name or Platform changed | `create_application`, then `delete_application` on the old ARN |
//! | Delete, ARN-shaped id | `delete_application` |
//! | Delete, any other id | none |
//!
//! Replacement is not atomic. When the delete of the old application fails
//! after the new one was created, both stay live and the delete error is
//! returned without the new ARN. No intent is recorded between the two calls;
//! a redelivered Update runs the whole replacement again.

use crate::controller::validation::{
    is_platform_application_arn, validate_properties, DesiredApplication,
};
use crate::credentials::normalize_apns_attributes;
use crate::error::{HandlerError, ValidationError};
use crate::observability::metrics;
use crate::provider::{CreateApplicationInput, PlatformApplicationProvider};
use crate::resource::{PlatformApplicationProperties, RequestType, ResourceRequest};
use std::time::Instant;
use tracing::{field, info, info_span, warn, Instrument};

/// Step of a replacement in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplacePhase {
    Creating,
    Deleting,
}

impl ReplacePhase {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ReplacePhase::Creating => "creating",
            ReplacePhase::Deleting => "deleting",
        }
    }
}

/// Replacement is required when a field SNS cannot change in place differs
#[must_use]
pub fn requires_replacement(
    desired: &DesiredApplication,
    previous: &PlatformApplicationProperties,
) -> bool {
    previous.name.as_deref() != Some(desired.name.as_str())
        || previous.platform.as_deref() != Some(desired.platform.as_str())
}

#[derive(Debug, Clone)]
pub struct LifecycleController<P> {
    provider: P,
}

impl<P: PlatformApplicationProvider> LifecycleController<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Run one request to completion.
    ///
    /// `Ok(Some(arn))` for a Create or a replacing Update, `Ok(None)` for an
    /// in-place Update or a Delete.
    ///
    /// # Errors
    ///
    /// `HandlerError::Validation` before any provider call, or
    /// `HandlerError::Provider` with the provider error unchanged.
    pub async fn handle(&self, request: &ResourceRequest) -> Result<Option<String>, HandlerError> {
        let request_type = request.request_type;
        let start = Instant::now();
        metrics::increment_requests(request_type.as_str());

        let outcome = match request_type {
            RequestType::Create => self.create(request).await.map(Some),
            RequestType::Update => self.update(request).await,
            RequestType::Delete => self.delete(request).await.map(|()| None),
        };

        metrics::observe_request_duration(request_type.as_str(), start.elapsed().as_secs_f64());
        if let Err(e) = &outcome {
            metrics::increment_request_errors(request_type.as_str(), e.kind());
        }
        outcome
    }

    /// Check the desired properties of `request`
    ///
    /// # Errors
    ///
    /// The first of `Attributes`, `Name`, `Platform` that is missing.
    #[allow(
        clippy::unused_self,
        reason = "Validate sits next to create/update/delete as a controller operation"
    )]
    pub fn validate(
        &self,
        request: &ResourceRequest,
    ) -> Result<DesiredApplication, ValidationError> {
        validate_properties(&request.resource_properties)
    }

    /// Create the platform application and return its ARN
    ///
    /// # Errors
    ///
    /// Validation failures, or the provider's create error unchanged.
    pub async fn create(&self, request: &ResourceRequest) -> Result<String, HandlerError> {
        let desired = self.validate(request)?;
        self.create_application(desired).await
    }

    /// Update in place, or replace when Name or Platform changed.
    ///
    /// # Errors
    ///
    /// Validation failures (including a missing `PhysicalResourceId` or
    /// `OldResourceProperties`), or the first provider error.
    pub async fn update(&self, request: &ResourceRequest) -> Result<Option<String>, HandlerError> {
        let desired = self.validate(request)?;
        let physical_id = request
            .physical_resource_id
            .as_deref()
            .ok_or(ValidationError::MissingProperty("PhysicalResourceId"))?;
        let previous = request
            .old_resource_properties
            .as_ref()
            .ok_or(ValidationError::MissingProperty("OldResourceProperties"))?;

        if requires_replacement(&desired, previous) {
            info!(
                "Name or Platform of {} changed ({:?}/{:?} -> {}/{}), replacing",
                physical_id, previous.name, previous.platform, desired.name, desired.platform
            );
            return self.replace(physical_id, desired).await.map(Some);
        }

        let DesiredApplication {
            platform,
            mut attributes,
            ..
        } = desired;
        if normalize_apns_attributes(&platform, &mut attributes) {
            metrics::increment_credential_normalizations();
        }

        self.provider
            .set_attributes(physical_id, &attributes)
            .await
            .map_err(HandlerError::Provider)?;
        Ok(None)
    }

    /// Delete the platform application named by the request.
    ///
    /// An id that is not an SNS platform application ARN was never created
    /// (a failed Create reports the logical id instead), so nothing is called.
    ///
    /// # Errors
    ///
    /// The provider's delete error unchanged.
    pub async fn delete(&self, request: &ResourceRequest) -> Result<(), HandlerError> {
        match request.physical_resource_id.as_deref() {
            Some(physical_id) => self.delete_application(physical_id).await,
            None => {
                info!("Delete request carries no PhysicalResourceId, nothing to delete");
                metrics::increment_skipped_deletes();
                Ok(())
            }
        }
    }

    async fn replace(
        &self,
        old_physical_id: &str,
        desired: DesiredApplication,
    ) -> Result<String, HandlerError> {
        let span = info_span!(
            "platform_application.replace",
            old.arn = old_physical_id,
            new.arn = field::Empty,
            replace.phase = ReplacePhase::Creating.as_str(),
        );
        let span_clone = span.clone();

        async move {
            metrics::increment_replacements();

            // A failed create leaves the old application untouched
            let new_physical_id = self.create_application(desired).await?;
            span_clone.record("new.arn", new_physical_id.as_str());
            span_clone.record("replace.phase", ReplacePhase::Deleting.as_str());

            if let Err(e) = self.delete_application(old_physical_id).await {
                warn!(
                    "Replacement created {} but failed to delete {}; both applications exist",
                    new_physical_id, old_physical_id
                );
                return Err(e);
            }

            info!("Replaced {} with {}", old_physical_id, new_physical_id);
            Ok(new_physical_id)
        }
        .instrument(span)
        .await
    }

    async fn create_application(
        &self,
        desired: DesiredApplication,
    ) -> Result<String, HandlerError> {
        let DesiredApplication {
            name,
            platform,
            mut attributes,
        } = desired;
        if normalize_apns_attributes(&platform, &mut attributes) {
            metrics::increment_credential_normalizations();
        }

        let input = CreateApplicationInput {
            name,
            platform,
            attributes,
        };
        self.provider
            .create_application(&input)
            .await
            .map_err(HandlerError::Provider)
    }

    async fn delete_application(&self, physical_id: &str) -> Result<(), HandlerError> {
        if !is_platform_application_arn(physical_id) {
            info!(
                "{} is not a platform application ARN, treating as never created",
                physical_id
            );
            metrics::increment_skipped_deletes();
            return Ok(());
        }

        self.provider
            .delete_application(physical_id)
            .await
            .map_err(HandlerError::Provider)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::Attributes;

    fn desired(name: &str, platform: &str) -> DesiredApplication {
        DesiredApplication {
            name: name.to_string(),
            platform: platform.to_string(),
            attributes: Attributes::new(),
        }
    }

    fn previous(name: &str, platform: &str, attributes: Attributes) -> PlatformApplicationProperties {
        PlatformApplicationProperties {
            name: Some(name.to_string()),
            platform: Some(platform.to_string()),
            attributes: Some(attributes),
            service_token: None,
        }
    }

    #[test]
    fn test_attribute_changes_never_replace() {
        let mut old_attributes = Attributes::new();
        old_attributes.insert("PlatformCredential".to_string(), "old".to_string());

        assert!(!requires_replacement(
            &desired("ios", "APNS"),
            &previous("ios", "APNS", old_attributes)
        ));
    }

    #[test]
    fn test_name_or_platform_change_replaces() {
        assert!(requires_replacement(
            &desired("ios-v2", "APNS"),
            &previous("ios", "APNS", Attributes::new())
        ));
        assert!(requires_replacement(
            &desired("ios", "APNS_SANDBOX"),
            &previous("ios", "APNS", Attributes::new())
        ));
    }

    #[test]
    fn test_previous_without_name_replaces() {
        let old = PlatformApplicationProperties {
            name: None,
            ..previous("ios", "APNS", Attributes::new())
        };
        assert!(requires_replacement(&desired("ios", "APNS"), &old));
    }

    #[test]
    fn test_replace_phase_labels() {
        assert_eq!(ReplacePhase::Creating.as_str(), "creating");
        assert_eq!(ReplacePhase::Deleting.as_str(), "deleting");
    }
}
