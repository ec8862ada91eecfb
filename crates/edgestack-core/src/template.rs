//! The engine-facing template artifact.
//!
//! A [`Template`] is the serializable form of a synthesized stack: a format
//! version, the `Resources` map, and the `Outputs` map. Maps are kept in
//! [`BTreeMap`]s and rendered with [`serde_json`], so repeated synthesis of
//! the same declaration produces byte-identical JSON.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::CoreError;
use crate::types::{LogicalId, RemovalPolicy};
use crate::value::Value;

/// Template format version understood by the provisioning engine.
pub const TEMPLATE_FORMAT_VERSION: &str = "2010-09-09";

/// A single resource entry in the template's `Resources` map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateResource {
    /// Provider resource type identifier, e.g. `AWS::S3::Bucket`.
    #[serde(rename = "Type")]
    resource_type: String,

    /// Provider-specific property document.
    #[serde(rename = "Properties")]
    properties: serde_json::Value,

    /// Logical ids this resource depends on.
    #[serde(rename = "DependsOn", skip_serializing_if = "Vec::is_empty")]
    depends_on: Vec<LogicalId>,

    /// Engine-facing metadata attached to the resource.
    #[serde(rename = "Metadata", skip_serializing_if = "Option::is_none")]
    metadata: Option<serde_json::Value>,

    /// What the engine does with the resource on stack deletion.
    #[serde(rename = "DeletionPolicy", skip_serializing_if = "Option::is_none")]
    deletion_policy: Option<String>,

    /// What the engine does with the old resource when a replacement is
    /// created during an update.
    #[serde(rename = "UpdateReplacePolicy", skip_serializing_if = "Option::is_none")]
    update_replace_policy: Option<String>,
}

impl TemplateResource {
    /// Create a template resource entry.
    ///
    /// The removal policy, when present, is written as both `DeletionPolicy`
    /// and `UpdateReplacePolicy` so a replaced resource follows the same
    /// teardown rule as a deleted one.
    #[must_use]
    pub fn new(
        resource_type: String,
        properties: serde_json::Value,
        removal_policy: Option<RemovalPolicy>,
        metadata: Option<serde_json::Value>,
        depends_on: Vec<LogicalId>,
    ) -> Self {
        let policy = removal_policy.map(|p| p.as_deletion_policy().to_owned());
        Self {
            resource_type,
            properties,
            depends_on,
            metadata,
            deletion_policy: policy.clone(),
            update_replace_policy: policy,
        }
    }

    /// The provider resource type identifier.
    #[must_use]
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// The provider-specific property document.
    #[must_use]
    pub fn properties(&self) -> &serde_json::Value {
        &self.properties
    }

    /// Logical ids this resource depends on.
    #[must_use]
    pub fn depends_on(&self) -> &[LogicalId] {
        &self.depends_on
    }

    /// The engine-facing metadata, if any.
    #[must_use]
    pub fn metadata(&self) -> Option<&serde_json::Value> {
        self.metadata.as_ref()
    }

    /// The `DeletionPolicy` value, if any.
    #[must_use]
    pub fn deletion_policy(&self) -> Option<&str> {
        self.deletion_policy.as_deref()
    }

    /// The `UpdateReplacePolicy` value, if any.
    #[must_use]
    pub fn update_replace_policy(&self) -> Option<&str> {
        self.update_replace_policy.as_deref()
    }
}

/// A single output entry in the template's `Outputs` map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateOutput {
    /// The output's value token.
    #[serde(rename = "Value")]
    value: Value,

    /// Human-readable description of the output.
    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl TemplateOutput {
    /// Create a template output entry.
    #[must_use]
    pub fn new(value: Value, description: Option<String>) -> Self {
        Self { value, description }
    }

    /// The output's value token.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The output's description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// The serializable artifact the provisioning engine consumes.
///
/// # Examples
///
/// ```
/// use edgestack_core::{Stack, StackName, TEMPLATE_FORMAT_VERSION};
///
/// let stack = Stack::new(StackName::new("demo").unwrap());
/// let template = stack.to_template();
/// assert_eq!(template.format_version(), TEMPLATE_FORMAT_VERSION);
/// assert_eq!(template.resource_count(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Template {
    /// Template format version.
    #[serde(rename = "AWSTemplateFormatVersion")]
    format_version: String,

    /// Human-readable template description.
    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    description: Option<String>,

    /// Resource entries, keyed by logical id.
    #[serde(rename = "Resources")]
    resources: BTreeMap<String, TemplateResource>,

    /// Output entries, keyed by output name.
    #[serde(rename = "Outputs", skip_serializing_if = "BTreeMap::is_empty")]
    outputs: BTreeMap<String, TemplateOutput>,
}

impl Template {
    /// Create a template from resource and output entries.
    #[must_use]
    pub fn new(
        resources: BTreeMap<String, TemplateResource>,
        outputs: BTreeMap<String, TemplateOutput>,
    ) -> Self {
        Self {
            format_version: TEMPLATE_FORMAT_VERSION.to_owned(),
            description: None,
            resources,
            outputs,
        }
    }

    /// Attach a human-readable description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The template format version.
    #[must_use]
    pub fn format_version(&self) -> &str {
        &self.format_version
    }

    /// The template description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Number of resource entries.
    #[must_use]
    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    /// Look up a resource entry by logical id.
    #[must_use]
    pub fn resource(&self, logical_id: &str) -> Option<&TemplateResource> {
        self.resources.get(logical_id)
    }

    /// All resource entries, keyed by logical id.
    #[must_use]
    pub fn resources(&self) -> &BTreeMap<String, TemplateResource> {
        &self.resources
    }

    /// Look up an output entry by name.
    #[must_use]
    pub fn output(&self, name: &str) -> Option<&TemplateOutput> {
        self.outputs.get(name)
    }

    /// All output entries, keyed by output name.
    #[must_use]
    pub fn outputs(&self) -> &BTreeMap<String, TemplateOutput> {
        &self.outputs
    }

    /// Render the template as compact JSON.
    ///
    /// Rendering is deterministic: the same template always produces the
    /// same bytes.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Render the template as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
