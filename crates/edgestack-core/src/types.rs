//! Identifier and lifecycle types shared by all resource declarations.

use std::fmt;

use crate::error::CoreError;

/// Maximum length of a logical id in characters.
const MAX_LOGICAL_ID_LEN: usize = 255;

/// Maximum length of a stack name in characters.
const MAX_STACK_NAME_LEN: usize = 128;

/// Logical id of a resource within a stack.
///
/// Logical ids are the declaration-time handles resources use to reference
/// each other; the provisioning engine maps each one to a provider-assigned
/// physical id at apply time.
///
/// # Examples
///
/// ```
/// use edgestack_core::LogicalId;
///
/// let id = LogicalId::new("SiteBucket").unwrap();
/// assert_eq!(id.as_str(), "SiteBucket");
/// assert!(LogicalId::new("not-alphanumeric").is_err());
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct LogicalId(String);

impl LogicalId {
    /// Create a new logical id.
    ///
    /// # Errors
    /// Returns an error if the id is empty, longer than 255 characters, or
    /// contains anything other than ASCII letters and digits.
    pub fn new(id: impl Into<String>) -> Result<Self, CoreError> {
        let id = id.into();
        if id.is_empty() || id.len() > MAX_LOGICAL_ID_LEN {
            return Err(CoreError::InvalidLogicalId {
                id,
                reason: format!("must be between 1 and {MAX_LOGICAL_ID_LEN} characters long"),
            });
        }
        if !id.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(CoreError::InvalidLogicalId {
                id,
                reason: "must contain only ASCII letters and digits".to_owned(),
            });
        }
        Ok(Self(id))
    }

    /// Get the logical id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LogicalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Name of a stack, the deletion-cascading boundary owning the declared
/// resources.
///
/// # Examples
///
/// ```
/// use edgestack_core::StackName;
///
/// let name = StackName::new("webapp-static-site").unwrap();
/// assert_eq!(name.as_str(), "webapp-static-site");
/// assert!(StackName::new("1-starts-with-digit").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct StackName(String);

impl StackName {
    /// Create a new stack name.
    ///
    /// # Errors
    /// Returns an error unless the name starts with an ASCII letter, contains
    /// only ASCII letters, digits, and hyphens, and is at most 128 characters
    /// long.
    pub fn new(name: impl Into<String>) -> Result<Self, CoreError> {
        let name = name.into();
        if name.is_empty() || name.len() > MAX_STACK_NAME_LEN {
            return Err(CoreError::InvalidStackName {
                name,
                reason: format!("must be between 1 and {MAX_STACK_NAME_LEN} characters long"),
            });
        }
        if !name.as_bytes()[0].is_ascii_alphabetic() {
            return Err(CoreError::InvalidStackName {
                name,
                reason: "must start with an ASCII letter".to_owned(),
            });
        }
        if !name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-')
        {
            return Err(CoreError::InvalidStackName {
                name,
                reason: "must contain only ASCII letters, digits, and hyphens".to_owned(),
            });
        }
        Ok(Self(name))
    }

    /// Get the stack name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StackName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the provisioning engine does with a resource when its stack is torn
/// down or the resource is replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RemovalPolicy {
    /// Delete the resource together with the stack.
    Destroy,
    /// Keep the resource alive after the stack is gone.
    Retain,
}

impl RemovalPolicy {
    /// The engine-facing `DeletionPolicy` value for this policy.
    #[must_use]
    pub fn as_deletion_policy(self) -> &'static str {
        match self {
            Self::Destroy => "Delete",
            Self::Retain => "Retain",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_create_valid_logical_id() {
        let id = LogicalId::new("SiteBucket").unwrap();
        assert_eq!(id.as_str(), "SiteBucket");
        assert_eq!(id.to_string(), "SiteBucket");
    }

    #[test]
    fn test_should_accept_digits_in_logical_id() {
        assert!(LogicalId::new("Bucket2").is_ok());
        assert!(LogicalId::new("0Bucket").is_ok());
    }

    #[test]
    fn test_should_reject_empty_logical_id() {
        assert!(LogicalId::new("").is_err());
    }

    #[test]
    fn test_should_reject_too_long_logical_id() {
        assert!(LogicalId::new("A".repeat(255)).is_ok());
        assert!(LogicalId::new("A".repeat(256)).is_err());
    }

    #[test]
    fn test_should_reject_non_alphanumeric_logical_id() {
        assert!(LogicalId::new("my-bucket").is_err());
        assert!(LogicalId::new("My Bucket").is_err());
        assert!(LogicalId::new("Bucket_1").is_err());
    }

    #[test]
    fn test_should_create_valid_stack_name() {
        let name = StackName::new("webapp").unwrap();
        assert_eq!(name.as_str(), "webapp");
        assert!(StackName::new("webapp-static-site").is_ok());
        assert!(StackName::new("A").is_ok());
    }

    #[test]
    fn test_should_reject_empty_stack_name() {
        assert!(StackName::new("").is_err());
    }

    #[test]
    fn test_should_reject_too_long_stack_name() {
        assert!(StackName::new("a".repeat(128)).is_ok());
        assert!(StackName::new("a".repeat(129)).is_err());
    }

    #[test]
    fn test_should_reject_stack_name_starting_with_digit_or_hyphen() {
        assert!(StackName::new("1webapp").is_err());
        assert!(StackName::new("-webapp").is_err());
    }

    #[test]
    fn test_should_reject_stack_name_with_invalid_characters() {
        assert!(StackName::new("web app").is_err());
        assert!(StackName::new("web_app").is_err());
        assert!(StackName::new("web.app").is_err());
    }

    #[test]
    fn test_should_map_removal_policy_to_deletion_policy() {
        assert_eq!(RemovalPolicy::Destroy.as_deletion_policy(), "Delete");
        assert_eq!(RemovalPolicy::Retain.as_deletion_policy(), "Retain");
    }
}
