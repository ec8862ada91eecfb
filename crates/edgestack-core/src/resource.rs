//! The structural contract every resource declaration satisfies.

use crate::error::CoreError;
use crate::types::{LogicalId, RemovalPolicy};

/// A declarable resource: a typed descriptor the stack can register and
/// render into the engine-facing template.
///
/// Implementations are plain value types; rendering happens once, when the
/// resource is added to a [`Stack`](crate::Stack). [`properties`] returns
/// the provider-specific property document with [`Value`](crate::Value)
/// tokens serialized in place of post-provisioning data.
///
/// [`properties`]: StackResource::properties
pub trait StackResource {
    /// Provider resource type identifier, e.g. `AWS::S3::Bucket`.
    fn resource_type(&self) -> &str;

    /// Logical id of this resource within its stack.
    fn logical_id(&self) -> &LogicalId;

    /// Render the provider-specific properties of this resource.
    ///
    /// # Errors
    /// Returns an error if the properties cannot be serialized.
    fn properties(&self) -> Result<serde_json::Value, CoreError>;

    /// Removal policy applied when the stack is torn down, if any.
    fn removal_policy(&self) -> Option<RemovalPolicy> {
        None
    }

    /// Engine-facing metadata attached to the resource, if any.
    fn metadata(&self) -> Option<serde_json::Value> {
        None
    }

    /// Logical ids of the resources this resource references.
    ///
    /// The stack uses these edges to reject forward references and to
    /// expose a creation order the engine can follow.
    fn references(&self) -> Vec<LogicalId> {
        Vec::new()
    }
}
