//! # Request Validation
//!
//! Presence checks on the desired properties and the ARN shape test that
//! gates deletes.

use crate::constants::PLATFORM_APPLICATION_ARN_PATTERN;
use crate::error::ValidationError;
use crate::resource::{Attributes, PlatformApplicationProperties};
use regex::Regex;
use std::sync::LazyLock;

static PLATFORM_APPLICATION_ARN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(PLATFORM_APPLICATION_ARN_PATTERN)
        .expect("PLATFORM_APPLICATION_ARN_PATTERN is a valid regex - this should never happen")
});

/// Desired state of a platform application once every required property is present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesiredApplication {
    pub name: String,
    pub platform: String,
    pub attributes: Attributes,
}

/// Check `Attributes`, `Name` and `Platform`, in that order.
///
/// An empty string counts as missing. An empty attribute map is present.
///
/// # Errors
///
/// `ValidationError::MissingProperty` naming the first missing property.
pub fn validate_properties(
    properties: &PlatformApplicationProperties,
) -> Result<DesiredApplication, ValidationError> {
    let attributes = properties
        .attributes
        .clone()
        .ok_or(ValidationError::MissingProperty("Attributes"))?;
    let name = required_string(properties.name.as_deref(), "Name")?;
    let platform = required_string(properties.platform.as_deref(), "Platform")?;

    Ok(DesiredApplication {
        name,
        platform,
        attributes,
    })
}

fn required_string(value: Option<&str>, property: &'static str) -> Result<String, ValidationError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ValidationError::MissingProperty(property)),
    }
}

/// Whether `physical_id` looks like an SNS platform application ARN
#[must_use]
pub fn is_platform_application_arn(physical_id: &str) -> bool {
    PLATFORM_APPLICATION_ARN.is_match(physical_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> PlatformApplicationProperties {
        PlatformApplicationProperties {
            name: Some("Name".to_string()),
            platform: Some("Platform".to_string()),
            attributes: Some(Attributes::new()),
            service_token: None,
        }
    }

    #[test]
    fn test_complete_properties_pass() {
        let desired = validate_properties(&complete()).expect("complete properties should validate");
        assert_eq!(desired.name, "Name");
        assert_eq!(desired.platform, "Platform");
        assert!(desired.attributes.is_empty());
    }

    #[test]
    fn test_each_missing_property_is_named() {
        let cases: Vec<(&str, fn(&mut PlatformApplicationProperties))> = vec![
            ("Attributes", |p| p.attributes = None),
            ("Name", |p| p.name = None),
            ("Platform", |p| p.platform = None),
        ];

        for (property, strip) in cases {
            let mut properties = complete();
            strip(&mut properties);
            let error = validate_properties(&properties).expect_err("validation should fail");
            assert_eq!(
                error.to_string(),
                format!("Missing required property {property}"),
                "Removing {property} should be reported as {property}"
            );
        }
    }

    #[test]
    fn test_empty_strings_are_missing() {
        let mut properties = complete();
        properties.name = Some(String::new());
        assert_eq!(
            validate_properties(&properties),
            Err(ValidationError::MissingProperty("Name"))
        );
    }

    #[test]
    fn test_attributes_checked_first() {
        assert_eq!(
            validate_properties(&PlatformApplicationProperties::default()),
            Err(ValidationError::MissingProperty("Attributes"))
        );
    }

    #[test]
    fn test_platform_application_arn_shape() {
        let valid = vec![
            "arn:aws:sns:eu-west-1:1234567890:app/test/test",
            "arn:aws:sns:us-gov-west-1:123456789012:app/APNS_SANDBOX/ios",
            "arn:aws:sns:::app",
        ];
        for id in valid {
            assert!(is_platform_application_arn(id), "'{id}' should be an application ARN");
        }

        let invalid = vec![
            "not-an-arn",
            "PhysicalResourceId",
            "IosApplication",
            "arn:aws:sns:eu-west-1:1234567890:topic",
            "arn:aws:sns:EU-WEST-1:1234567890:app/test/test",
            " arn:aws:sns:eu-west-1:1234567890:app/test/test",
            "",
        ];
        for id in invalid {
            assert!(!is_platform_application_arn(id), "'{id}' should not be an application ARN");
        }
    }
}
