//! Bucket resource declaration.

use serde::Serialize;
use tracing::debug;
use typed_builder::TypedBuilder;

use edgestack_core::{CoreError, LogicalId, RemovalPolicy, StackResource, Value};
use edgestack_iam::{PolicyDocument, PolicyStatement};

use crate::error::S3DeclarationError;
use crate::validation::validate_bucket_name;

/// Inputs for declaring a [`Bucket`].
///
/// All fields default to the provider's behavior for an unconfigured bucket:
/// an engine-chosen name, no versioning, no removal policy, and contents
/// kept on teardown.
#[derive(Debug, Clone, Default, PartialEq, TypedBuilder)]
pub struct BucketProps {
    /// Physical bucket name; engine-chosen when absent.
    #[builder(default)]
    pub bucket_name: Option<String>,

    /// Whether object versioning is enabled.
    #[builder(default)]
    pub versioned: bool,

    /// What the engine does with the bucket when its stack is torn down.
    #[builder(default)]
    pub removal_policy: Option<RemovalPolicy>,

    /// Whether the engine empties the bucket before deleting it, so
    /// teardown never leaves orphaned objects behind.
    #[builder(default)]
    pub auto_delete_objects: bool,
}

/// A declared S3 bucket.
///
/// The bucket carries its own resource policy document; statements attached
/// through [`Bucket::add_to_resource_policy`] are materialized as a separate
/// [`BucketPolicy`](crate::BucketPolicy) resource.
///
/// # Examples
///
/// ```
/// use edgestack_core::{LogicalId, RemovalPolicy};
/// use edgestack_s3::{Bucket, BucketProps};
///
/// let bucket = Bucket::new(
///     LogicalId::new("SiteBucket").unwrap(),
///     BucketProps::builder()
///         .versioned(true)
///         .removal_policy(Some(RemovalPolicy::Destroy))
///         .auto_delete_objects(true)
///         .build(),
/// )
/// .unwrap();
/// assert!(bucket.versioned());
/// ```
#[derive(Debug, Clone)]
pub struct Bucket {
    logical_id: LogicalId,
    props: BucketProps,
    resource_policy: PolicyDocument,
}

impl Bucket {
    /// Declare a bucket.
    ///
    /// # Errors
    /// Returns an error if a declared bucket name violates the S3 naming
    /// rules, or if `auto_delete_objects` is set without the `Destroy`
    /// removal policy (teardown would orphan the contents).
    pub fn new(logical_id: LogicalId, props: BucketProps) -> Result<Self, S3DeclarationError> {
        if let Some(name) = &props.bucket_name {
            validate_bucket_name(name)?;
        }
        if props.auto_delete_objects && props.removal_policy != Some(RemovalPolicy::Destroy) {
            return Err(S3DeclarationError::AutoDeleteWithoutDestroy {
                logical_id: logical_id.to_string(),
            });
        }

        debug!(
            logical_id = %logical_id,
            versioned = props.versioned,
            auto_delete_objects = props.auto_delete_objects,
            "declared bucket",
        );
        Ok(Self {
            logical_id,
            props,
            resource_policy: PolicyDocument::new(),
        })
    }

    /// The bucket's logical id.
    #[must_use]
    pub fn logical_id(&self) -> &LogicalId {
        &self.logical_id
    }

    /// The declared physical bucket name, if any.
    #[must_use]
    pub fn bucket_name(&self) -> Option<&str> {
        self.props.bucket_name.as_deref()
    }

    /// Whether object versioning is enabled.
    #[must_use]
    pub fn versioned(&self) -> bool {
        self.props.versioned
    }

    /// Whether the engine empties the bucket before deleting it.
    #[must_use]
    pub fn auto_delete_objects(&self) -> bool {
        self.props.auto_delete_objects
    }

    /// The bucket's removal policy, if any.
    #[must_use]
    pub fn removal_policy(&self) -> Option<RemovalPolicy> {
        self.props.removal_policy
    }

    /// Token for the engine-assigned physical bucket name.
    #[must_use]
    pub fn name_ref(&self) -> Value {
        Value::reference(&self.logical_id)
    }

    /// Token for the bucket's ARN.
    #[must_use]
    pub fn attr_arn(&self) -> Value {
        Value::get_att(&self.logical_id, "Arn")
    }

    /// Token for the bucket's regional domain name, the DNS name an edge
    /// distribution fetches from.
    #[must_use]
    pub fn attr_regional_domain_name(&self) -> Value {
        Value::get_att(&self.logical_id, "RegionalDomainName")
    }

    /// Token for the ARN covering every object in the bucket (the bucket
    /// ARN followed by the `/*` wildcard).
    #[must_use]
    pub fn arn_for_objects(&self) -> Value {
        Value::join(vec![self.attr_arn(), Value::literal("/*")])
    }

    /// Attach a statement to the bucket's resource policy.
    ///
    /// # Errors
    /// Returns an error if the statement names no principal; a resource
    /// policy statement without a grantee grants nothing.
    pub fn add_to_resource_policy(
        &mut self,
        statement: PolicyStatement,
    ) -> Result<(), S3DeclarationError> {
        if statement.principals().is_empty() {
            return Err(S3DeclarationError::StatementWithoutPrincipal {
                logical_id: self.logical_id.to_string(),
            });
        }
        debug!(logical_id = %self.logical_id, "attached resource policy statement");
        self.resource_policy.add_statement(statement);
        Ok(())
    }

    /// The accumulated resource policy document.
    #[must_use]
    pub fn resource_policy(&self) -> &PolicyDocument {
        &self.resource_policy
    }
}

/// Bucket property document rendered into the template.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct BucketProperties<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    bucket_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    versioning_configuration: Option<VersioningConfiguration>,
}

/// Versioning section of the bucket properties.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct VersioningConfiguration {
    status: &'static str,
}

impl StackResource for Bucket {
    fn resource_type(&self) -> &str {
        "AWS::S3::Bucket"
    }

    fn logical_id(&self) -> &LogicalId {
        &self.logical_id
    }

    fn properties(&self) -> Result<serde_json::Value, CoreError> {
        let properties = BucketProperties {
            bucket_name: self.bucket_name(),
            versioning_configuration: self
                .props
                .versioned
                .then_some(VersioningConfiguration { status: "Enabled" }),
        };
        Ok(serde_json::to_value(properties)?)
    }

    fn removal_policy(&self) -> Option<RemovalPolicy> {
        self.props.removal_policy
    }

    fn metadata(&self) -> Option<serde_json::Value> {
        self.props
            .auto_delete_objects
            .then(|| serde_json::json!({ "AutoDeleteObjects": true }))
    }
}
