//! Common test utilities for lifecycle and dispatch tests
//!
//! Provides an in-memory provider that records every call in order and can be
//! told to fail individual operations.

#![allow(dead_code, reason = "Not every test binary uses every helper")]

use anyhow::Result;
use async_trait::async_trait;
use sns_platform_application::provider::{CreateApplicationInput, PlatformApplicationProvider};
use sns_platform_application::resource::{
    Attributes, PlatformApplicationProperties, RequestType, ResourceRequest,
};
use std::fmt;
use std::sync::Mutex;

pub const OLD_ARN: &str = "arn:aws:sns:eu-west-1:1234567890:app/test/test";

/// Error type standing in for an SNS service fault
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnsFault {
    pub code: &'static str,
}

impl fmt::Display for SnsFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SNS fault: {}", self.code)
    }
}

impl std::error::Error for SnsFault {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCall {
    Create(CreateApplicationInput),
    Delete(String),
    SetAttributes(String, Attributes),
}

#[derive(Debug, Default)]
pub struct RecordingProvider {
    calls: Mutex<Vec<ProviderCall>>,
    fail_create: Option<&'static str>,
    fail_delete: Option<&'static str>,
    fail_set_attributes: Option<&'static str>,
}

impl RecordingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_create(mut self, code: &'static str) -> Self {
        self.fail_create = Some(code);
        self
    }

    pub fn failing_delete(mut self, code: &'static str) -> Self {
        self.fail_delete = Some(code);
        self
    }

    pub fn failing_set_attributes(mut self, code: &'static str) -> Self {
        self.fail_set_attributes = Some(code);
        self
    }

    pub fn calls(&self) -> Vec<ProviderCall> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }

    pub fn create_calls(&self) -> Vec<CreateApplicationInput> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ProviderCall::Create(input) => Some(input),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: ProviderCall) {
        self.calls.lock().expect("calls lock poisoned").push(call);
    }
}

/// ARN the recording provider hands out for a created application
pub fn arn_for(platform: &str, name: &str) -> String {
    format!("arn:aws:sns:eu-west-1:1234567890:app/{platform}/{name}")
}

fn fault(code: Option<&'static str>) -> Result<()> {
    match code {
        Some(code) => Err(anyhow::Error::new(SnsFault { code })),
        None => Ok(()),
    }
}

#[async_trait]
impl PlatformApplicationProvider for RecordingProvider {
    async fn create_application(&self, input: &CreateApplicationInput) -> Result<String> {
        self.record(ProviderCall::Create(input.clone()));
        fault(self.fail_create)?;
        Ok(arn_for(&input.platform, &input.name))
    }

    async fn delete_application(&self, application_arn: &str) -> Result<()> {
        self.record(ProviderCall::Delete(application_arn.to_string()));
        fault(self.fail_delete)
    }

    async fn set_attributes(&self, application_arn: &str, attributes: &Attributes) -> Result<()> {
        self.record(ProviderCall::SetAttributes(
            application_arn.to_string(),
            attributes.clone(),
        ));
        fault(self.fail_set_attributes)
    }
}

pub fn attributes(pairs: &[(&str, &str)]) -> Attributes {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

pub fn properties(name: &str, platform: &str, attrs: Attributes) -> PlatformApplicationProperties {
    PlatformApplicationProperties {
        name: Some(name.to_string()),
        platform: Some(platform.to_string()),
        attributes: Some(attrs),
        service_token: Some("arn:aws:lambda:eu-west-1:1234567890:function:handler".to_string()),
    }
}

pub fn create_request(name: &str, platform: &str, attrs: Attributes) -> ResourceRequest {
    ResourceRequest::new(RequestType::Create, properties(name, platform, attrs))
}

pub fn update_request(
    physical_id: &str,
    desired: PlatformApplicationProperties,
    previous: PlatformApplicationProperties,
) -> ResourceRequest {
    ResourceRequest::new(RequestType::Update, desired)
        .with_physical_resource_id(physical_id)
        .with_old_resource_properties(previous)
}

pub fn delete_request(physical_id: &str) -> ResourceRequest {
    ResourceRequest::new(
        RequestType::Delete,
        properties("Name", "Platform", Attributes::new()),
    )
    .with_physical_resource_id(physical_id)
}
