//! # SNS Platform Application Handler
//!
//! Runs one `Custom::SnsPlatformApplication` CloudFormation event to completion.
//!
//! ## Usage
//!
//! ```bash
//! # Handle an event and print the response
//! sns-platform-application --event event.json
//!
//! # Handle an event from stdin and PUT the response to its ResponseURL
//! cat event.json | sns-platform-application --respond
//!
//! # Against LocalStack
//! SNS_ENDPOINT_URL=http://localhost:4566 AWS_REGION=eu-west-1 sns-platform-application -e event.json
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use sns_platform_application::config::AwsConfig;
use sns_platform_application::constants::DEFAULT_LOG_FILTER;
use sns_platform_application::observability::metrics;
use sns_platform_application::resource::ResponseStatus;
use sns_platform_application::{
    dispatch, failure_response, send_response, AwsSnsPlatformApplications, LifecycleController,
    ResourceRequest,
};
use std::process::ExitCode;
use tokio::io::AsyncReadExt;
use tracing::{debug, info, warn};

/// CloudFormation custom resource handler for SNS platform applications
#[derive(Parser, Debug)]
#[command(name = "sns-platform-application", version)]
struct Cli {
    /// Custom resource event JSON file, or `-` for stdin
    #[arg(short, long, default_value = "-")]
    event: String,

    /// PUT the response to the event's ResponseURL instead of printing it
    #[arg(long)]
    respond: bool,

    /// Print Prometheus metrics to stderr before exiting
    #[arg(long)]
    print_metrics: bool,

    /// AWS region for SNS
    #[arg(long, env = "AWS_REGION")]
    region: Option<String>,

    /// SNS endpoint override (e.g., LocalStack)
    #[arg(long, env = "SNS_ENDPOINT_URL")]
    endpoint_url: Option<String>,
}

async fn read_event(source: &str) -> Result<ResourceRequest> {
    let raw = if source == "-" {
        let mut buffer = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buffer)
            .await
            .context("Failed to read event from stdin")?;
        buffer
    } else {
        tokio::fs::read_to_string(source)
            .await
            .with_context(|| format!("Failed to read event file {source}"))?
    };

    serde_json::from_str(&raw).context("Failed to parse custom resource event")
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // stdout carries the response JSON, logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .init();

    // Required for rustls 0.23+ when no default provider is set via features
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    info!(
        "Starting SNS platform application handler (build {} at {})",
        env!("BUILD_GIT_HASH"),
        env!("BUILD_DATETIME")
    );

    // Metrics are diagnostics only, the request is still handled without them
    if let Err(e) = metrics::register_metrics() {
        warn!("Failed to register metrics: {:#}", e);
    }

    let request = read_event(&cli.event).await?;

    // From here on every failure must still reach CloudFormation as a response
    let provider = AwsSnsPlatformApplications::new(&AwsConfig::new(cli.region, cli.endpoint_url))
        .await
        .context("Failed to initialize SNS client");
    let response = match provider {
        Ok(provider) => dispatch(&LifecycleController::new(provider), &request).await,
        Err(e) => failure_response(&request, e),
    };

    let exit_code = if cli.respond {
        let response_url = request
            .response_url
            .as_deref()
            .context("Event has no ResponseURL to respond to")?;
        send_response(&reqwest::Client::new(), response_url, &response).await?;
        // CloudFormation has been told about any failure
        ExitCode::SUCCESS
    } else {
        println!(
            "{}",
            serde_json::to_string_pretty(&response).context("Failed to serialize response")?
        );
        match response.status {
            ResponseStatus::Success => ExitCode::SUCCESS,
            ResponseStatus::Failed => ExitCode::FAILURE,
        }
    };

    if cli.print_metrics {
        eprintln!("{}", metrics::gather_metrics()?);
    }

    Ok(exit_code)
}
