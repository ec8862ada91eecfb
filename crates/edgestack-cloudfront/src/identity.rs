//! Origin access identity declaration.

use serde::Serialize;
use tracing::debug;

use edgestack_core::{CoreError, LogicalId, StackResource, Value};
use edgestack_iam::Principal;

use crate::error::CloudFrontDeclarationError;

/// Prefix of the legacy canonical ARN CloudFront materializes for an
/// origin access identity. The identity's opaque id completes it.
const CANONICAL_USER_ARN_PREFIX: &str =
    "arn:aws:iam::cloudfront:user/CloudFront Origin Access Identity ";

/// Prefix of the identity path an origin carries in its configuration.
const ORIGIN_ACCESS_PATH_PREFIX: &str = "origin-access-identity/cloudfront/";

/// Provider limit on the identity comment length, in characters.
const MAX_COMMENT_LENGTH: usize = 128;

/// A declared CloudFront origin access identity.
///
/// The identity is the principal a distribution presents when fetching
/// from a private origin. Its only declared attribute is a comment; the
/// opaque id is allocated by the provisioning engine, so everything built
/// from the id ([`grant_principal`], [`origin_access_identity_path`]) is a
/// token resolved post-provisioning.
///
/// [`grant_principal`]: OriginAccessIdentity::grant_principal
/// [`origin_access_identity_path`]: OriginAccessIdentity::origin_access_identity_path
///
/// # Examples
///
/// ```
/// use edgestack_cloudfront::OriginAccessIdentity;
/// use edgestack_core::LogicalId;
///
/// let identity = OriginAccessIdentity::new(
///     LogicalId::new("SiteOriginIdentity").unwrap(),
///     "OAI for accessing the S3 bucket",
/// )
/// .unwrap();
/// assert_eq!(identity.comment(), "OAI for accessing the S3 bucket");
/// ```
#[derive(Debug, Clone)]
pub struct OriginAccessIdentity {
    logical_id: LogicalId,
    comment: String,
}

impl OriginAccessIdentity {
    /// Declare an origin access identity.
    ///
    /// # Errors
    /// Returns an error if the comment is empty after trimming or exceeds
    /// the provider's 128-character limit.
    pub fn new(
        logical_id: LogicalId,
        comment: impl Into<String>,
    ) -> Result<Self, CloudFrontDeclarationError> {
        let comment = comment.into();
        if comment.trim().is_empty() {
            return Err(CloudFrontDeclarationError::InvalidComment {
                reason: "must not be empty".to_owned(),
            });
        }
        let length = comment.chars().count();
        if length > MAX_COMMENT_LENGTH {
            return Err(CloudFrontDeclarationError::InvalidComment {
                reason: format!(
                    "must be at most {MAX_COMMENT_LENGTH} characters, got {length}"
                ),
            });
        }

        debug!(logical_id = %logical_id, "declared origin access identity");
        Ok(Self {
            logical_id,
            comment,
        })
    }

    /// The identity's logical id.
    #[must_use]
    pub fn logical_id(&self) -> &LogicalId {
        &self.logical_id
    }

    /// The human-readable comment.
    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Token for the engine-allocated opaque identity id.
    #[must_use]
    pub fn id_ref(&self) -> Value {
        Value::reference(&self.logical_id)
    }

    /// The principal this identity presents, as the legacy canonical ARN
    /// with the identity id embedded verbatim.
    #[must_use]
    pub fn grant_principal(&self) -> Principal {
        Principal::arn(Value::join(vec![
            Value::literal(CANONICAL_USER_ARN_PREFIX),
            self.id_ref(),
        ]))
    }

    /// The canonical ARN principal for an already-known identity id.
    ///
    /// # Errors
    /// Returns an error if the id is blank; a blank id would produce a
    /// principal granting access to nothing that exists.
    pub fn grant_principal_for_id(
        id: &str,
    ) -> Result<Principal, CloudFrontDeclarationError> {
        if id.trim().is_empty() {
            return Err(CloudFrontDeclarationError::EmptyIdentityId);
        }
        Ok(Principal::arn(format!("{CANONICAL_USER_ARN_PREFIX}{id}")))
    }

    /// The identity path an origin configuration carries,
    /// `origin-access-identity/cloudfront/<id>`.
    #[must_use]
    pub fn origin_access_identity_path(&self) -> Value {
        Value::join(vec![
            Value::literal(ORIGIN_ACCESS_PATH_PREFIX),
            self.id_ref(),
        ])
    }
}

/// Identity property document rendered into the template.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct IdentityProperties<'a> {
    cloud_front_origin_access_identity_config: IdentityConfig<'a>,
}

/// Configuration section of the identity properties.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct IdentityConfig<'a> {
    comment: &'a str,
}

impl StackResource for OriginAccessIdentity {
    fn resource_type(&self) -> &str {
        "AWS::CloudFront::CloudFrontOriginAccessIdentity"
    }

    fn logical_id(&self) -> &LogicalId {
        &self.logical_id
    }

    fn properties(&self) -> Result<serde_json::Value, CoreError> {
        let properties = IdentityProperties {
            cloud_front_origin_access_identity_config: IdentityConfig {
                comment: &self.comment,
            },
        };
        Ok(serde_json::to_value(properties)?)
    }
}
