//! Bucket policy resource declaration.

use serde::Serialize;

use edgestack_core::{CoreError, LogicalId, StackResource, Value};
use edgestack_iam::PolicyDocument;

use crate::bucket::Bucket;
use crate::error::S3DeclarationError;

/// The resource-level policy attached to a bucket.
///
/// A bucket accumulates statements through
/// [`Bucket::add_to_resource_policy`]; this type materializes them as the
/// separate policy resource the provisioning engine expects, wired to the
/// bucket by reference.
///
/// # Examples
///
/// ```
/// use edgestack_core::LogicalId;
/// use edgestack_iam::{Action, PolicyStatement, PolicyStatementProps, Principal};
/// use edgestack_s3::{Bucket, BucketPolicy, BucketProps};
///
/// let mut bucket = Bucket::new(
///     LogicalId::new("SiteBucket").unwrap(),
///     BucketProps::default(),
/// )
/// .unwrap();
/// bucket
///     .add_to_resource_policy(
///         PolicyStatement::new(
///             PolicyStatementProps::builder()
///                 .actions(vec![Action::new("s3:GetObject").unwrap()])
///                 .resources(vec![bucket.arn_for_objects()])
///                 .principals(vec![Principal::arn("arn:aws:iam::123:user/cdn")])
///                 .build(),
///         )
///         .unwrap(),
///     )
///     .unwrap();
///
/// let policy = BucketPolicy::for_bucket(
///     LogicalId::new("SiteBucketPolicy").unwrap(),
///     &bucket,
/// )
/// .unwrap();
/// assert_eq!(policy.document().statement_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct BucketPolicy {
    logical_id: LogicalId,
    bucket_id: LogicalId,
    document: PolicyDocument,
}

impl BucketPolicy {
    /// Materialize the policy resource for a bucket.
    ///
    /// # Errors
    /// Returns an error if the bucket has no attached statements; an empty
    /// policy resource is a structural defect, not a provider default.
    pub fn for_bucket(logical_id: LogicalId, bucket: &Bucket) -> Result<Self, S3DeclarationError> {
        if bucket.resource_policy().is_empty() {
            return Err(S3DeclarationError::EmptyResourcePolicy {
                bucket: bucket.logical_id().to_string(),
            });
        }
        Ok(Self {
            logical_id,
            bucket_id: bucket.logical_id().clone(),
            document: bucket.resource_policy().clone(),
        })
    }

    /// The policy resource's logical id.
    #[must_use]
    pub fn logical_id(&self) -> &LogicalId {
        &self.logical_id
    }

    /// Logical id of the bucket the policy is attached to.
    #[must_use]
    pub fn bucket_id(&self) -> &LogicalId {
        &self.bucket_id
    }

    /// The materialized policy document.
    #[must_use]
    pub fn document(&self) -> &PolicyDocument {
        &self.document
    }
}

/// Bucket policy property document rendered into the template.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct BucketPolicyProperties<'a> {
    bucket: Value,
    policy_document: &'a PolicyDocument,
}

impl StackResource for BucketPolicy {
    fn resource_type(&self) -> &str {
        "AWS::S3::BucketPolicy"
    }

    fn logical_id(&self) -> &LogicalId {
        &self.logical_id
    }

    fn properties(&self) -> Result<serde_json::Value, CoreError> {
        let properties = BucketPolicyProperties {
            bucket: Value::reference(&self.bucket_id),
            policy_document: &self.document,
        };
        Ok(serde_json::to_value(properties)?)
    }

    fn references(&self) -> Vec<LogicalId> {
        let mut refs = vec![self.bucket_id.clone()];
        for target in self.document.references() {
            if !refs.contains(target) {
                refs.push(target.clone());
            }
        }
        refs
    }
}
