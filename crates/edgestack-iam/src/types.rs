//! Actions, effects, and principals.

use std::fmt;

use edgestack_core::{LogicalId, Value};

use crate::error::PolicyError;

/// Whether a statement grants or denies its actions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Effect {
    /// The statement grants the named actions.
    #[default]
    Allow,
    /// The statement denies the named actions.
    Deny,
}

impl Effect {
    /// The effect as it appears in policy JSON.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Allow => "Allow",
            Self::Deny => "Deny",
        }
    }
}

/// A validated IAM action name.
///
/// Actions are either the wildcard `*` or `service:Operation`, where the
/// service is lowercase and the operation may end in a wildcard (e.g.
/// `s3:GetObject`, `s3:Get*`).
///
/// # Examples
///
/// ```
/// use edgestack_iam::Action;
///
/// let action = Action::new("s3:GetObject").unwrap();
/// assert_eq!(action.as_str(), "s3:GetObject");
/// assert!(Action::new("GetObject").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Action(String);

impl Action {
    /// Create a new action.
    ///
    /// # Errors
    /// Returns an error unless the action is `*` or `service:Operation` with
    /// a lowercase service name and an alphanumeric (optionally wildcarded)
    /// operation name.
    pub fn new(action: impl Into<String>) -> Result<Self, PolicyError> {
        let action = action.into();
        if let Some(reason) = action_syntax_error(&action) {
            return Err(PolicyError::InvalidAction { action, reason });
        }
        Ok(Self(action))
    }

    /// Get the action as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Check an action name, returning the reason it is invalid, if any.
fn action_syntax_error(action: &str) -> Option<String> {
    if action == "*" {
        return None;
    }
    let Some((service, operation)) = action.split_once(':') else {
        return Some("must be '*' or 'service:Operation'".to_owned());
    };
    if service.is_empty()
        || !service
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
    {
        return Some(
            "service must be non-empty lowercase letters, digits, and hyphens".to_owned(),
        );
    }
    if operation.is_empty()
        || !operation
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'*')
    {
        return Some("operation must be non-empty letters, digits, and '*'".to_owned());
    }
    None
}

/// A principal a statement grants to or denies.
///
/// Principal identities may be declaration-time literals or engine-resolved
/// tokens; blank literal identities are rejected when the statement is
/// constructed, since they would grant access to no valid principal.
#[derive(Debug, Clone, PartialEq)]
pub enum Principal {
    /// An AWS principal addressed by its ARN.
    Arn(Value),
    /// An AWS service principal, e.g. `cloudfront.amazonaws.com`.
    Service(String),
    /// An S3 canonical user principal.
    CanonicalUser(Value),
}

impl Principal {
    /// An AWS principal addressed by its ARN.
    #[must_use]
    pub fn arn(arn: impl Into<Value>) -> Self {
        Self::Arn(arn.into())
    }

    /// An AWS service principal.
    #[must_use]
    pub fn service(service: impl Into<String>) -> Self {
        Self::Service(service.into())
    }

    /// An S3 canonical user principal.
    #[must_use]
    pub fn canonical_user(id: impl Into<Value>) -> Self {
        Self::CanonicalUser(id.into())
    }

    /// The key under which this principal is written in policy JSON.
    #[must_use]
    pub fn key(&self) -> &'static str {
        match self {
            Self::Arn(_) => "AWS",
            Self::Service(_) => "Service",
            Self::CanonicalUser(_) => "CanonicalUser",
        }
    }

    /// Whether the principal's identity is a blank declaration-time literal.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Arn(value) | Self::CanonicalUser(value) => {
                matches!(value, Value::Literal(s) if s.trim().is_empty())
            }
            Self::Service(service) => service.trim().is_empty(),
        }
    }

    /// All logical ids this principal references.
    #[must_use]
    pub fn references(&self) -> Vec<&LogicalId> {
        match self {
            Self::Arn(value) | Self::CanonicalUser(value) => value.references(),
            Self::Service(_) => Vec::new(),
        }
    }

    /// The principal's identity as policy JSON.
    ///
    /// # Errors
    /// Returns an error if the identity value cannot be serialized.
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            Self::Arn(value) | Self::CanonicalUser(value) => serde_json::to_value(value),
            Self::Service(service) => Ok(serde_json::Value::String(service.clone())),
        }
    }
}
