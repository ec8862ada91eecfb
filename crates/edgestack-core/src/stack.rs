//! Stack assembly: the ordered resource graph and its outputs.

use tracing::debug;

use crate::error::CoreError;
use crate::resource::StackResource;
use crate::template::{Template, TemplateOutput, TemplateResource};
use crate::types::{LogicalId, RemovalPolicy, StackName};
use crate::value::Value;

/// Maximum length of an output name in characters.
const MAX_OUTPUT_NAME_LEN: usize = 255;

/// A named export of a stack, carrying a value token and a human-readable
/// description.
///
/// # Examples
///
/// ```
/// use edgestack_core::{LogicalId, Output, Value};
///
/// let distribution = LogicalId::new("SiteDistribution").unwrap();
/// let url = Value::join(vec![
///     Value::literal("https://"),
///     Value::get_att(&distribution, "DomainName"),
/// ]);
/// let output = Output::new("CloudFrontURL", url)
///     .unwrap()
///     .with_description("The CloudFront distribution URL");
/// assert_eq!(output.name(), "CloudFrontURL");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Output {
    name: String,
    value: Value,
    description: Option<String>,
}

impl Output {
    /// Create a new output.
    ///
    /// # Errors
    /// Returns an error if the name is empty, longer than 255 characters,
    /// or contains anything other than ASCII letters and digits.
    pub fn new(name: impl Into<String>, value: Value) -> Result<Self, CoreError> {
        let name = name.into();
        if name.is_empty() || name.len() > MAX_OUTPUT_NAME_LEN {
            return Err(CoreError::InvalidOutputName {
                name,
                reason: format!("must be between 1 and {MAX_OUTPUT_NAME_LEN} characters long"),
            });
        }
        if !name.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(CoreError::InvalidOutputName {
                name,
                reason: "must contain only ASCII letters and digits".to_owned(),
            });
        }
        Ok(Self {
            name,
            value,
            description: None,
        })
    }

    /// Attach a human-readable description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The output's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
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

/// A registered resource, rendered at the time it was added.
#[derive(Debug, Clone)]
struct ResourceEntry {
    logical_id: LogicalId,
    resource_type: String,
    properties: serde_json::Value,
    removal_policy: Option<RemovalPolicy>,
    metadata: Option<serde_json::Value>,
    references: Vec<LogicalId>,
}

/// An ordered collection of resource declarations and outputs.
///
/// Resources must be declared before they are referenced; the stack rejects
/// duplicate ids and forward references at registration time, so a stack
/// that was assembled successfully always synthesizes a consistent
/// template.
///
/// # Examples
///
/// ```
/// use edgestack_core::{Output, Stack, StackName, Value};
///
/// let name = StackName::new("demo").unwrap();
/// let mut stack = Stack::new(name);
/// stack
///     .add_output(Output::new("Greeting", Value::literal("hello")).unwrap())
///     .unwrap();
/// assert_eq!(stack.to_template().outputs().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Stack {
    name: StackName,
    resources: Vec<ResourceEntry>,
    outputs: Vec<Output>,
}

impl Stack {
    /// Create an empty stack.
    #[must_use]
    pub fn new(name: StackName) -> Self {
        Self {
            name,
            resources: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// The stack's name.
    #[must_use]
    pub fn name(&self) -> &StackName {
        &self.name
    }

    /// Number of registered resources.
    #[must_use]
    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    /// Whether a resource with this logical id is registered.
    #[must_use]
    pub fn contains(&self, logical_id: &LogicalId) -> bool {
        self.resources
            .iter()
            .any(|entry| &entry.logical_id == logical_id)
    }

    /// Register a resource, rendering its properties immediately.
    ///
    /// # Errors
    /// Returns an error if the logical id is already taken, if the resource
    /// references a logical id that has not been declared yet, or if its
    /// properties cannot be rendered.
    pub fn add_resource(&mut self, resource: &dyn StackResource) -> Result<(), CoreError> {
        let logical_id = resource.logical_id().clone();
        if self.contains(&logical_id) {
            return Err(CoreError::DuplicateLogicalId(logical_id));
        }

        let references = resource.references();
        for target in &references {
            if !self.contains(target) {
                return Err(CoreError::UnknownReference {
                    referrer: logical_id.to_string(),
                    target: target.clone(),
                });
            }
        }

        let properties = resource.properties()?;
        debug!(
            stack = %self.name,
            logical_id = %logical_id,
            resource_type = resource.resource_type(),
            "registered resource",
        );

        self.resources.push(ResourceEntry {
            logical_id,
            resource_type: resource.resource_type().to_owned(),
            properties,
            removal_policy: resource.removal_policy(),
            metadata: resource.metadata(),
            references,
        });

        Ok(())
    }

    /// Register an output.
    ///
    /// # Errors
    /// Returns an error if an output with the same name exists or if the
    /// output's value references an undeclared logical id.
    pub fn add_output(&mut self, output: Output) -> Result<(), CoreError> {
        if self.outputs.iter().any(|o| o.name() == output.name()) {
            return Err(CoreError::DuplicateOutput(output.name().to_owned()));
        }
        for target in output.value().references() {
            if !self.contains(target) {
                return Err(CoreError::UnknownReference {
                    referrer: format!("output {}", output.name()),
                    target: target.clone(),
                });
            }
        }
        debug!(stack = %self.name, output = output.name(), "registered output");
        self.outputs.push(output);
        Ok(())
    }

    /// Logical ids in declaration order.
    ///
    /// Because forward references are rejected, this order is a valid
    /// creation order for the provisioning engine.
    #[must_use]
    pub fn creation_order(&self) -> Vec<&LogicalId> {
        self.resources.iter().map(|entry| &entry.logical_id).collect()
    }

    /// Logical ids referenced by the resource with this logical id.
    #[must_use]
    pub fn references_of(&self, logical_id: &LogicalId) -> Option<&[LogicalId]> {
        self.resources
            .iter()
            .find(|entry| &entry.logical_id == logical_id)
            .map(|entry| entry.references.as_slice())
    }

    /// The stack's outputs, in declaration order.
    #[must_use]
    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    /// Assemble the engine-facing template from the registered resources
    /// and outputs.
    #[must_use]
    pub fn to_template(&self) -> Template {
        let resources = self
            .resources
            .iter()
            .map(|entry| {
                (
                    entry.logical_id.to_string(),
                    TemplateResource::new(
                        entry.resource_type.clone(),
                        entry.properties.clone(),
                        entry.removal_policy,
                        entry.metadata.clone(),
                        entry.references.clone(),
                    ),
                )
            })
            .collect();

        let outputs = self
            .outputs
            .iter()
            .map(|output| {
                (
                    output.name().to_owned(),
                    TemplateOutput::new(
                        output.value().clone(),
                        output.description().map(ToOwned::to_owned),
                    ),
                )
            })
            .collect();

        debug!(
            stack = %self.name,
            resources = self.resources.len(),
            outputs = self.outputs.len(),
            "synthesized template",
        );
        Template::new(resources, outputs)
    }
}
