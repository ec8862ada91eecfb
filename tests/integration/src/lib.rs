//! Integration tests for the EdgeStack static-site declaration.
//!
//! These tests exercise the declaration end-to-end: they evaluate it,
//! synthesize the template JSON the provisioning engine would consume, and
//! assert on that artifact. Resolution-phase tests simulate the engine by
//! binding physical ids and attributes directly.
//!
//! Run them with:
//! ```text
//! cargo test -p edgestack-integration
//! ```

use std::sync::Once;

use edgestack_core::StackName;
use edgestack_site::{StaticSite, StaticSiteProps};

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Declare the site under test with default props.
#[must_use]
pub fn site() -> StaticSite {
    site_with(StaticSiteProps::default())
}

/// Declare the site under test with the given props.
#[must_use]
pub fn site_with(props: StaticSiteProps) -> StaticSite {
    init_tracing();
    StaticSite::new(StackName::new("webapp").unwrap(), props)
        .unwrap_or_else(|e| panic!("failed to declare site: {e}"))
}

/// Synthesize the default site's template and parse it back as JSON.
#[must_use]
pub fn template_json() -> serde_json::Value {
    let rendered = site()
        .to_template()
        .to_json()
        .unwrap_or_else(|e| panic!("failed to render template: {e}"));
    serde_json::from_str(&rendered)
        .unwrap_or_else(|e| panic!("rendered template is not valid JSON: {e}"))
}

mod test_distribution;
mod test_output;
mod test_policy;
mod test_site_graph;
mod test_synthesis;
mod test_teardown;
