//! EdgeStack Synthesizer - evaluates the static-site declaration and writes
//! the engine-consumable template.
//!
//! The binary builds the declaration from environment configuration,
//! synthesizes the template, and writes the JSON to stdout or a file. It
//! never talks to a provider; applying the template is the provisioning
//! engine's job.
//!
//! # Usage
//!
//! ```text
//! STACK_NAME=webapp-static-site edgestack-synth > template.json
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `STACK_NAME` | `webapp-static-site` | Name of the synthesized stack |
//! | `OAI_COMMENT` | `OAI for accessing the S3 bucket` | Origin access identity comment |
//! | `BUCKET_NAME` | *(unset = engine-chosen)* | Physical bucket name |
//! | `TEMPLATE_OUT` | `-` | Output path (`-` = stdout) |
//! | `TEMPLATE_COMPACT` | `false` | Render compact instead of pretty JSON |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

mod config;

use std::fs;
use std::io::Write;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use edgestack_core::{StackName, Template};
use edgestack_site::{StaticSite, StaticSiteProps};

use crate::config::{STDOUT_DESTINATION, SynthConfig};

/// Synthesizer version reported in the startup log.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    Ok(())
}

/// Build the declaration from the configuration and synthesize its template.
fn synthesize(config: &SynthConfig) -> Result<Template> {
    let stack_name = StackName::new(config.stack_name.clone())
        .with_context(|| format!("invalid stack name: {}", config.stack_name))?;
    let site = StaticSite::new(
        stack_name,
        StaticSiteProps::builder()
            .oai_comment(config.oai_comment.clone())
            .bucket_name(config.bucket_name.clone())
            .build(),
    )
    .context("failed to declare the static site")?;

    Ok(site.to_template())
}

/// Render the template as JSON, compact or pretty-printed.
fn render(template: &Template, compact: bool) -> Result<String> {
    let json = if compact {
        template.to_json()
    } else {
        template.to_json_pretty()
    };
    json.context("failed to render template JSON")
}

/// Write the rendered template to the configured destination.
fn write_template(json: &str, destination: &str) -> Result<()> {
    if destination == STDOUT_DESTINATION {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(json.as_bytes())
            .and_then(|()| stdout.write_all(b"\n"))
            .context("failed to write template to stdout")?;
    } else {
        fs::write(destination, json)
            .with_context(|| format!("failed to write template to {destination}"))?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let config = SynthConfig::from_env();
    init_tracing(&config.log_level)?;

    info!(
        stack_name = %config.stack_name,
        destination = %config.template_out,
        version = VERSION,
        "starting EdgeStack synthesizer",
    );

    let template = synthesize(&config)?;
    let json = render(&template, config.template_compact)?;
    write_template(&json, &config.template_out)?;

    info!(
        resources = template.resource_count(),
        bytes = json.len(),
        "template written",
    );

    Ok(())
}
