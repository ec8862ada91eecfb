//! Composition of the static-site topology.

use tracing::debug;
use typed_builder::TypedBuilder;

use edgestack_cloudfront::{
    Behavior, Distribution, DistributionProps, OriginAccessIdentity, S3OriginSource,
    SourceConfiguration,
};
use edgestack_core::{
    AttributeBindings, LogicalId, Output, RemovalPolicy, Stack, StackName, Template, Value,
};
use edgestack_iam::{Action, PolicyStatement, PolicyStatementProps};
use edgestack_s3::{Bucket, BucketPolicy, BucketProps};

use crate::error::SiteResult;

/// Default comment attached to the site's origin access identity.
pub const DEFAULT_OAI_COMMENT: &str = "OAI for accessing the S3 bucket";

/// Name of the public-URL output.
pub const URL_OUTPUT_NAME: &str = "CloudFrontURL";

/// Description attached to the public-URL output.
pub const URL_OUTPUT_DESCRIPTION: &str = "The CloudFront distribution URL";

/// The single action the site's policy binding grants. Read-only by
/// construction; nothing in the declaration widens it.
const READ_OBJECT_ACTION: &str = "s3:GetObject";

const BUCKET_ID: &str = "SiteBucket";
const IDENTITY_ID: &str = "SiteOriginIdentity";
const BUCKET_POLICY_ID: &str = "SiteBucketPolicy";
const DISTRIBUTION_ID: &str = "SiteDistribution";

/// Inputs for declaring a [`StaticSite`].
#[derive(Debug, Clone, PartialEq, TypedBuilder)]
pub struct StaticSiteProps {
    /// Comment attached to the origin access identity.
    #[builder(default = DEFAULT_OAI_COMMENT.to_owned())]
    pub oai_comment: String,

    /// Physical bucket name; engine-chosen when absent.
    #[builder(default)]
    pub bucket_name: Option<String>,
}

impl Default for StaticSiteProps {
    fn default() -> Self {
        Self {
            oai_comment: DEFAULT_OAI_COMMENT.to_owned(),
            bucket_name: None,
        }
    }
}

/// The declared static-site hosting topology.
///
/// One construction declares the whole graph in dependency order: the
/// private versioned bucket (destroyed with its contents on teardown), the
/// origin access identity, the bucket policy granting that identity
/// read-only object access, the single-origin distribution, and the
/// `CloudFrontURL` output. Evaluating the declaration twice with the same
/// inputs produces byte-identical template JSON.
///
/// # Examples
///
/// ```
/// use edgestack_core::StackName;
/// use edgestack_site::{StaticSite, StaticSiteProps};
///
/// let site = StaticSite::new(
///     StackName::new("webapp").unwrap(),
///     StaticSiteProps::default(),
/// )
/// .unwrap();
/// assert_eq!(site.stack().resource_count(), 4);
/// assert!(site.to_template().output("CloudFrontURL").is_some());
/// ```
#[derive(Debug, Clone)]
pub struct StaticSite {
    stack: Stack,
    bucket_id: LogicalId,
    identity_id: LogicalId,
    bucket_policy_id: LogicalId,
    distribution_id: LogicalId,
    url: Value,
}

impl StaticSite {
    /// Declare the site.
    ///
    /// # Errors
    /// Returns an error if any piece of the declaration is invalid: a bad
    /// bucket name, a blank identity comment, or a stack rule violation.
    pub fn new(stack_name: StackName, props: StaticSiteProps) -> SiteResult<Self> {
        let bucket_id = LogicalId::new(BUCKET_ID)?;
        let identity_id = LogicalId::new(IDENTITY_ID)?;
        let bucket_policy_id = LogicalId::new(BUCKET_POLICY_ID)?;
        let distribution_id = LogicalId::new(DISTRIBUTION_ID)?;

        let mut bucket = Bucket::new(
            bucket_id.clone(),
            BucketProps::builder()
                .bucket_name(props.bucket_name)
                .versioned(true)
                .removal_policy(Some(RemovalPolicy::Destroy))
                .auto_delete_objects(true)
                .build(),
        )?;

        let identity = OriginAccessIdentity::new(identity_id.clone(), props.oai_comment)?;

        bucket.add_to_resource_policy(PolicyStatement::new(
            PolicyStatementProps::builder()
                .actions(vec![Action::new(READ_OBJECT_ACTION)?])
                .resources(vec![bucket.arn_for_objects()])
                .principals(vec![identity.grant_principal()])
                .build(),
        )?)?;
        let bucket_policy = BucketPolicy::for_bucket(bucket_policy_id.clone(), &bucket)?;

        let distribution = Distribution::new(
            distribution_id.clone(),
            DistributionProps::builder()
                .origin_configs(vec![SourceConfiguration::new(
                    S3OriginSource::new(&bucket, &identity),
                    vec![Behavior::default_behavior()],
                )])
                .build(),
        )?;

        let url = Value::join(vec![
            Value::literal("https://"),
            distribution.attr_domain_name(),
        ]);

        let mut stack = Stack::new(stack_name);
        stack.add_resource(&bucket)?;
        stack.add_resource(&identity)?;
        stack.add_resource(&bucket_policy)?;
        stack.add_resource(&distribution)?;
        stack.add_output(
            Output::new(URL_OUTPUT_NAME, url.clone())?.with_description(URL_OUTPUT_DESCRIPTION),
        )?;

        debug!(stack = %stack.name(), "declared static site");
        Ok(Self {
            stack,
            bucket_id,
            identity_id,
            bucket_policy_id,
            distribution_id,
            url,
        })
    }

    /// The assembled stack.
    #[must_use]
    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    /// Logical id of the site bucket.
    #[must_use]
    pub fn bucket_id(&self) -> &LogicalId {
        &self.bucket_id
    }

    /// Logical id of the origin access identity.
    #[must_use]
    pub fn identity_id(&self) -> &LogicalId {
        &self.identity_id
    }

    /// Logical id of the bucket policy.
    #[must_use]
    pub fn bucket_policy_id(&self) -> &LogicalId {
        &self.bucket_policy_id
    }

    /// Logical id of the distribution.
    #[must_use]
    pub fn distribution_id(&self) -> &LogicalId {
        &self.distribution_id
    }

    /// The public-URL output value: `https://` joined with the
    /// distribution's engine-derived hostname.
    #[must_use]
    pub fn url(&self) -> &Value {
        &self.url
    }

    /// Synthesize the engine-facing template.
    #[must_use]
    pub fn to_template(&self) -> Template {
        self.stack.to_template()
    }

    /// Resolve the public URL from engine-provided bindings.
    ///
    /// # Errors
    /// Returns an error until the engine has bound the distribution's
    /// domain name attribute.
    pub fn resolved_url(&self, bindings: &AttributeBindings) -> SiteResult<String> {
        Ok(self.url.resolve(bindings)?)
    }
}
