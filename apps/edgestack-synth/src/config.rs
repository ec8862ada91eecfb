//! Synthesizer configuration.
//!
//! Provides [`SynthConfig`] for configuring the template synthesizer.
//! Configuration values are loaded from environment variables.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use edgestack_site::DEFAULT_OAI_COMMENT;

/// Destination value meaning "write the template to stdout".
pub const STDOUT_DESTINATION: &str = "-";

/// Default name of the synthesized stack.
pub const DEFAULT_STACK_NAME: &str = "webapp-static-site";

/// Synthesizer configuration.
///
/// All fields have defaults producing a pretty-printed template on stdout.
/// Configuration can be loaded from environment variables via
/// [`SynthConfig::from_env`].
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct SynthConfig {
    /// Name of the synthesized stack.
    #[builder(default = String::from(DEFAULT_STACK_NAME))]
    pub stack_name: String,

    /// Comment attached to the origin access identity.
    #[builder(default = DEFAULT_OAI_COMMENT.to_owned())]
    pub oai_comment: String,

    /// Physical bucket name; engine-chosen when absent.
    #[builder(default)]
    pub bucket_name: Option<String>,

    /// Where the rendered template is written (`"-"` = stdout).
    #[builder(default = String::from(STDOUT_DESTINATION))]
    pub template_out: String,

    /// Whether to render compact instead of pretty-printed JSON.
    #[builder(default = false)]
    pub template_compact: bool,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from("info"))]
    pub log_level: String,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            stack_name: String::from(DEFAULT_STACK_NAME),
            oai_comment: DEFAULT_OAI_COMMENT.to_owned(),
            bucket_name: None,
            template_out: String::from(STDOUT_DESTINATION),
            template_compact: false,
            log_level: String::from("info"),
        }
    }
}

impl SynthConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads the following environment variables (falling back to defaults):
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `STACK_NAME` | `webapp-static-site` |
    /// | `OAI_COMMENT` | `OAI for accessing the S3 bucket` |
    /// | `BUCKET_NAME` | *(unset = engine-chosen)* |
    /// | `TEMPLATE_OUT` | `-` |
    /// | `TEMPLATE_COMPACT` | `false` |
    /// | `LOG_LEVEL` | `info` |
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("STACK_NAME") {
            config.stack_name = v;
        }
        if let Ok(v) = std::env::var("OAI_COMMENT") {
            config.oai_comment = v;
        }
        if let Ok(v) = std::env::var("BUCKET_NAME") {
            config.bucket_name = Some(v);
        }
        if let Ok(v) = std::env::var("TEMPLATE_OUT") {
            config.template_out = v;
        }
        if let Ok(v) = std::env::var("TEMPLATE_COMPACT") {
            config.template_compact = parse_bool(&v);
        }
        if let Ok(v) = std::env::var("LOG_LEVEL") {
            config.log_level = v;
        }

        config
    }
}

/// Parse a string as a boolean, accepting `"1"` and `"true"` (case-insensitive).
fn parse_bool(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}
