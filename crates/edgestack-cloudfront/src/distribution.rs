//! Web distribution declaration.

use serde::Serialize;
use tracing::debug;
use typed_builder::TypedBuilder;

use edgestack_core::{CoreError, LogicalId, StackResource, Value};
use edgestack_s3::Bucket;

use crate::error::CloudFrontDeclarationError;
use crate::identity::OriginAccessIdentity;

/// A routing behavior within a distribution.
///
/// Exactly one behavior across a distribution is the default; it matches
/// everything no path-matched behavior claims and therefore carries no
/// pattern. Every other behavior requires one. The constructors make the
/// remaining combinations unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Behavior {
    is_default_behavior: bool,
    path_pattern: Option<String>,
}

impl Behavior {
    /// The catch-all default behavior.
    #[must_use]
    pub fn default_behavior() -> Self {
        Self {
            is_default_behavior: true,
            path_pattern: None,
        }
    }

    /// A behavior matching requests against a path pattern.
    ///
    /// # Errors
    /// Returns an error if the pattern is blank or contains whitespace.
    pub fn for_path_pattern(
        pattern: impl Into<String>,
    ) -> Result<Self, CloudFrontDeclarationError> {
        let pattern = pattern.into();
        if pattern.trim().is_empty() {
            return Err(CloudFrontDeclarationError::InvalidPathPattern {
                pattern,
                reason: "must not be empty".to_owned(),
            });
        }
        if pattern.chars().any(char::is_whitespace) {
            return Err(CloudFrontDeclarationError::InvalidPathPattern {
                pattern,
                reason: "must not contain whitespace".to_owned(),
            });
        }
        Ok(Self {
            is_default_behavior: false,
            path_pattern: Some(pattern),
        })
    }

    /// Whether this is the distribution's default behavior.
    #[must_use]
    pub fn is_default_behavior(&self) -> bool {
        self.is_default_behavior
    }

    /// The path pattern this behavior matches, absent on the default.
    #[must_use]
    pub fn path_pattern(&self) -> Option<&str> {
        self.path_pattern.as_deref()
    }
}

/// A private S3 origin: the bucket's regional domain paired with the
/// identity path the distribution fetches through.
///
/// Both fields are tokens; the engine substitutes the bucket's domain and
/// the identity's id after provisioning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3OriginSource {
    domain_name: Value,
    origin_access_identity: Value,
}

impl S3OriginSource {
    /// Pair a bucket with the identity that may read from it.
    #[must_use]
    pub fn new(bucket: &Bucket, identity: &OriginAccessIdentity) -> Self {
        Self {
            domain_name: bucket.attr_regional_domain_name(),
            origin_access_identity: identity.origin_access_identity_path(),
        }
    }

    /// Token for the origin's DNS name.
    #[must_use]
    pub fn domain_name(&self) -> &Value {
        &self.domain_name
    }

    /// Token for the `origin-access-identity/cloudfront/<id>` path.
    #[must_use]
    pub fn origin_access_identity(&self) -> &Value {
        &self.origin_access_identity
    }

    /// All logical ids this origin source references.
    #[must_use]
    pub fn references(&self) -> Vec<&LogicalId> {
        let mut refs = self.domain_name.references();
        refs.extend(self.origin_access_identity.references());
        refs
    }
}

/// An origin source together with the behaviors routed to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfiguration {
    origin_source: S3OriginSource,
    behaviors: Vec<Behavior>,
}

impl SourceConfiguration {
    /// Pair an origin source with its behaviors.
    #[must_use]
    pub fn new(origin_source: S3OriginSource, behaviors: Vec<Behavior>) -> Self {
        Self {
            origin_source,
            behaviors,
        }
    }

    /// The origin source requests are routed to.
    #[must_use]
    pub fn origin_source(&self) -> &S3OriginSource {
        &self.origin_source
    }

    /// The behaviors routed to this origin.
    #[must_use]
    pub fn behaviors(&self) -> &[Behavior] {
        &self.behaviors
    }
}

/// Inputs for declaring a [`Distribution`].
#[derive(Debug, Clone, PartialEq, TypedBuilder)]
pub struct DistributionProps {
    /// Origin sources with their routing behaviors, in declaration order.
    pub origin_configs: Vec<SourceConfiguration>,
}

/// A declared CloudFront web distribution.
///
/// Caching, TLS, and geographic-restriction knobs are left to provider
/// defaults; the declaration carries only the structural shape of the
/// distribution (origins and routing).
///
/// # Examples
///
/// ```
/// use edgestack_cloudfront::{
///     Behavior, Distribution, DistributionProps, OriginAccessIdentity, S3OriginSource,
///     SourceConfiguration,
/// };
/// use edgestack_core::LogicalId;
/// use edgestack_s3::{Bucket, BucketProps};
///
/// let bucket =
///     Bucket::new(LogicalId::new("SiteBucket").unwrap(), BucketProps::default()).unwrap();
/// let identity = OriginAccessIdentity::new(
///     LogicalId::new("SiteOriginIdentity").unwrap(),
///     "OAI for accessing the S3 bucket",
/// )
/// .unwrap();
///
/// let distribution = Distribution::new(
///     LogicalId::new("SiteDistribution").unwrap(),
///     DistributionProps::builder()
///         .origin_configs(vec![SourceConfiguration::new(
///             S3OriginSource::new(&bucket, &identity),
///             vec![Behavior::default_behavior()],
///         )])
///         .build(),
/// )
/// .unwrap();
/// assert_eq!(distribution.origin_configs().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Distribution {
    logical_id: LogicalId,
    origin_configs: Vec<SourceConfiguration>,
    default_origin_index: usize,
}

impl Distribution {
    /// Declare a distribution.
    ///
    /// # Errors
    /// Returns an error if no origin is declared, an origin has no
    /// behaviors, or the declaration does not carry exactly one default
    /// behavior.
    pub fn new(
        logical_id: LogicalId,
        props: DistributionProps,
    ) -> Result<Self, CloudFrontDeclarationError> {
        if props.origin_configs.is_empty() {
            return Err(CloudFrontDeclarationError::NoOrigins);
        }
        for (index, config) in props.origin_configs.iter().enumerate() {
            if config.behaviors().is_empty() {
                return Err(CloudFrontDeclarationError::OriginWithoutBehaviors {
                    origin_index: index,
                });
            }
        }

        let default_origins: Vec<usize> = props
            .origin_configs
            .iter()
            .enumerate()
            .flat_map(|(index, config)| {
                config
                    .behaviors()
                    .iter()
                    .filter(|behavior| behavior.is_default_behavior())
                    .map(move |_| index)
            })
            .collect();
        let default_origin_index = match default_origins.as_slice() {
            [] => return Err(CloudFrontDeclarationError::NoDefaultBehavior),
            [index] => *index,
            defaults => {
                return Err(CloudFrontDeclarationError::MultipleDefaultBehaviors {
                    count: defaults.len(),
                });
            }
        };

        debug!(
            logical_id = %logical_id,
            origins = props.origin_configs.len(),
            "declared distribution",
        );
        Ok(Self {
            logical_id,
            origin_configs: props.origin_configs,
            default_origin_index,
        })
    }

    /// The distribution's logical id.
    #[must_use]
    pub fn logical_id(&self) -> &LogicalId {
        &self.logical_id
    }

    /// The declared origin configurations, in declaration order.
    #[must_use]
    pub fn origin_configs(&self) -> &[SourceConfiguration] {
        &self.origin_configs
    }

    /// Token for the distribution's derived hostname, available only
    /// post-provisioning.
    #[must_use]
    pub fn attr_domain_name(&self) -> Value {
        Value::get_att(&self.logical_id, "DomainName")
    }
}

/// Stable id of the origin at `index`, in declaration order.
fn origin_id(index: usize) -> String {
    format!("origin{}", index + 1)
}

/// Distribution property document rendered into the template.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct DistributionProperties {
    distribution_config: DistributionConfig,
}

/// Configuration section of the distribution properties.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct DistributionConfig {
    enabled: bool,
    origins: Vec<OriginProperties>,
    default_cache_behavior: CacheBehaviorProperties,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    cache_behaviors: Vec<CacheBehaviorProperties>,
}

/// One origin entry of the distribution configuration.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct OriginProperties {
    id: String,
    domain_name: Value,
    s3_origin_config: S3OriginConfig,
}

/// Private-origin section of an origin entry.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct S3OriginConfig {
    origin_access_identity: Value,
}

/// A cache behavior entry; the default carries no path pattern.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct CacheBehaviorProperties {
    target_origin_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    path_pattern: Option<String>,
}

impl StackResource for Distribution {
    fn resource_type(&self) -> &str {
        "AWS::CloudFront::Distribution"
    }

    fn logical_id(&self) -> &LogicalId {
        &self.logical_id
    }

    fn properties(&self) -> Result<serde_json::Value, CoreError> {
        let mut origins = Vec::with_capacity(self.origin_configs.len());
        let mut cache_behaviors = Vec::new();
        for (index, config) in self.origin_configs.iter().enumerate() {
            let origin_id = origin_id(index);
            origins.push(OriginProperties {
                id: origin_id.clone(),
                domain_name: config.origin_source().domain_name().clone(),
                s3_origin_config: S3OriginConfig {
                    origin_access_identity: config.origin_source().origin_access_identity().clone(),
                },
            });
            for behavior in config.behaviors() {
                if !behavior.is_default_behavior() {
                    cache_behaviors.push(CacheBehaviorProperties {
                        target_origin_id: origin_id.clone(),
                        path_pattern: behavior.path_pattern().map(ToOwned::to_owned),
                    });
                }
            }
        }

        let properties = DistributionProperties {
            distribution_config: DistributionConfig {
                enabled: true,
                origins,
                default_cache_behavior: CacheBehaviorProperties {
                    target_origin_id: origin_id(self.default_origin_index),
                    path_pattern: None,
                },
                cache_behaviors,
            },
        };
        Ok(serde_json::to_value(properties)?)
    }

    fn references(&self) -> Vec<LogicalId> {
        let mut refs = Vec::new();
        for config in &self.origin_configs {
            for target in config.origin_source().references() {
                if !refs.contains(target) {
                    refs.push(target.clone());
                }
            }
        }
        refs
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use edgestack_s3::BucketProps;

    use super::*;

    fn logical_id(id: &str) -> LogicalId {
        LogicalId::new(id).unwrap()
    }

    fn site_bucket() -> Bucket {
        Bucket::new(logical_id("SiteBucket"), BucketProps::default()).unwrap()
    }

    fn site_identity() -> OriginAccessIdentity {
        OriginAccessIdentity::new(
            logical_id("SiteOriginIdentity"),
            "OAI for accessing the S3 bucket",
        )
        .unwrap()
    }

    fn single_origin(behaviors: Vec<Behavior>) -> DistributionProps {
        DistributionProps::builder()
            .origin_configs(vec![SourceConfiguration::new(
                S3OriginSource::new(&site_bucket(), &site_identity()),
                behaviors,
            )])
            .build()
    }

    fn two_origins() -> DistributionProps {
        let assets = Bucket::new(logical_id("AssetsBucket"), BucketProps::default()).unwrap();
        DistributionProps::builder()
            .origin_configs(vec![
                SourceConfiguration::new(
                    S3OriginSource::new(&site_bucket(), &site_identity()),
                    vec![Behavior::for_path_pattern("/static/*").unwrap()],
                ),
                SourceConfiguration::new(
                    S3OriginSource::new(&assets, &site_identity()),
                    vec![Behavior::default_behavior()],
                ),
            ])
            .build()
    }

    // -----------------------------------------------------------------------
    // Behaviors
    // -----------------------------------------------------------------------

    #[test]
    fn test_should_keep_default_behavior_free_of_path_pattern() {
        let default = Behavior::default_behavior();
        assert!(default.is_default_behavior());
        assert!(default.path_pattern().is_none());

        let matched = Behavior::for_path_pattern("/images/*").unwrap();
        assert!(!matched.is_default_behavior());
        assert_eq!(matched.path_pattern(), Some("/images/*"));
    }

    #[test]
    fn test_should_reject_blank_path_pattern() {
        for pattern in ["", "   "] {
            let err = Behavior::for_path_pattern(pattern).unwrap_err();
            assert!(matches!(
                err,
                CloudFrontDeclarationError::InvalidPathPattern { .. }
            ));
        }
    }

    #[test]
    fn test_should_reject_path_pattern_with_whitespace() {
        let err = Behavior::for_path_pattern("/my images/*").unwrap_err();
        assert!(matches!(
            err,
            CloudFrontDeclarationError::InvalidPathPattern { .. }
        ));
    }

    // -----------------------------------------------------------------------
    // Distribution shape
    // -----------------------------------------------------------------------

    #[test]
    fn test_should_declare_single_origin_distribution() {
        let distribution = Distribution::new(
            logical_id("SiteDistribution"),
            single_origin(vec![Behavior::default_behavior()]),
        )
        .unwrap();
        assert_eq!(distribution.origin_configs().len(), 1);
        assert_eq!(
            serde_json::to_value(distribution.attr_domain_name()).unwrap(),
            json!({ "Fn::GetAtt": ["SiteDistribution", "DomainName"] })
        );
    }

    #[test]
    fn test_should_reject_distribution_without_origins() {
        let props = DistributionProps::builder().origin_configs(vec![]).build();
        let err = Distribution::new(logical_id("SiteDistribution"), props).unwrap_err();
        assert!(matches!(err, CloudFrontDeclarationError::NoOrigins));
    }

    #[test]
    fn test_should_reject_origin_without_behaviors() {
        let err =
            Distribution::new(logical_id("SiteDistribution"), single_origin(vec![])).unwrap_err();
        assert!(matches!(
            err,
            CloudFrontDeclarationError::OriginWithoutBehaviors { origin_index: 0 }
        ));
    }

    #[test]
    fn test_should_reject_distribution_without_default_behavior() {
        let props = single_origin(vec![Behavior::for_path_pattern("/images/*").unwrap()]);
        let err = Distribution::new(logical_id("SiteDistribution"), props).unwrap_err();
        assert!(matches!(err, CloudFrontDeclarationError::NoDefaultBehavior));
    }

    #[test]
    fn test_should_reject_multiple_default_behaviors() {
        let props = single_origin(vec![
            Behavior::default_behavior(),
            Behavior::default_behavior(),
        ]);
        let err = Distribution::new(logical_id("SiteDistribution"), props).unwrap_err();
        assert!(matches!(
            err,
            CloudFrontDeclarationError::MultipleDefaultBehaviors { count: 2 }
        ));
    }

    #[test]
    fn test_should_reject_defaults_spread_across_origins() {
        let assets = Bucket::new(logical_id("AssetsBucket"), BucketProps::default()).unwrap();
        let props = DistributionProps::builder()
            .origin_configs(vec![
                SourceConfiguration::new(
                    S3OriginSource::new(&site_bucket(), &site_identity()),
                    vec![Behavior::default_behavior()],
                ),
                SourceConfiguration::new(
                    S3OriginSource::new(&assets, &site_identity()),
                    vec![Behavior::default_behavior()],
                ),
            ])
            .build();
        let err = Distribution::new(logical_id("SiteDistribution"), props).unwrap_err();
        assert!(matches!(
            err,
            CloudFrontDeclarationError::MultipleDefaultBehaviors { count: 2 }
        ));
    }

    // -----------------------------------------------------------------------
    // Template rendering
    // -----------------------------------------------------------------------

    #[test]
    fn test_should_render_structural_distribution_config_only() {
        let distribution = Distribution::new(
            logical_id("SiteDistribution"),
            single_origin(vec![Behavior::default_behavior()]),
        )
        .unwrap();
        assert_eq!(distribution.resource_type(), "AWS::CloudFront::Distribution");
        assert_eq!(
            distribution.properties().unwrap(),
            json!({
                "DistributionConfig": {
                    "Enabled": true,
                    "Origins": [
                        {
                            "Id": "origin1",
                            "DomainName": {
                                "Fn::GetAtt": ["SiteBucket", "RegionalDomainName"]
                            },
                            "S3OriginConfig": {
                                "OriginAccessIdentity": {
                                    "Fn::Join": [
                                        "",
                                        [
                                            "origin-access-identity/cloudfront/",
                                            { "Ref": "SiteOriginIdentity" }
                                        ]
                                    ]
                                }
                            }
                        }
                    ],
                    "DefaultCacheBehavior": { "TargetOriginId": "origin1" }
                }
            })
        );
    }

    #[test]
    fn test_should_render_path_matched_behaviors_as_cache_behaviors() {
        let distribution = Distribution::new(
            logical_id("SiteDistribution"),
            single_origin(vec![
                Behavior::default_behavior(),
                Behavior::for_path_pattern("/images/*").unwrap(),
            ]),
        )
        .unwrap();
        let properties = distribution.properties().unwrap();
        assert_eq!(
            properties["DistributionConfig"]["CacheBehaviors"],
            json!([{ "TargetOriginId": "origin1", "PathPattern": "/images/*" }])
        );
    }

    #[test]
    fn test_should_assign_origin_ids_in_declaration_order() {
        let distribution =
            Distribution::new(logical_id("SiteDistribution"), two_origins()).unwrap();
        let properties = distribution.properties().unwrap();
        let config = &properties["DistributionConfig"];

        assert_eq!(config["Origins"][0]["Id"], json!("origin1"));
        assert_eq!(config["Origins"][1]["Id"], json!("origin2"));
        assert_eq!(config["DefaultCacheBehavior"]["TargetOriginId"], json!("origin2"));
        assert_eq!(
            config["CacheBehaviors"],
            json!([{ "TargetOriginId": "origin1", "PathPattern": "/static/*" }])
        );
    }

    // -----------------------------------------------------------------------
    // References
    // -----------------------------------------------------------------------

    #[test]
    fn test_should_collect_origin_references_without_duplicates() {
        let distribution = Distribution::new(
            logical_id("SiteDistribution"),
            single_origin(vec![Behavior::default_behavior()]),
        )
        .unwrap();
        assert_eq!(
            distribution.references(),
            vec![logical_id("SiteBucket"), logical_id("SiteOriginIdentity")]
        );

        let two = Distribution::new(logical_id("SiteDistribution"), two_origins()).unwrap();
        assert_eq!(
            two.references(),
            vec![
                logical_id("SiteBucket"),
                logical_id("SiteOriginIdentity"),
                logical_id("AssetsBucket"),
            ]
        );
    }
}
