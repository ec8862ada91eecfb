//! Error types for the EdgeStack core.

use crate::types::LogicalId;

/// Core error type for stack declaration and template synthesis.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    // -----------------------------------------------------------------------
    // Identifier errors
    // -----------------------------------------------------------------------
    /// The logical id does not satisfy the identifier rules.
    #[error("invalid logical id: {id}: {reason}")]
    InvalidLogicalId {
        /// The invalid logical id.
        id: String,
        /// The reason for the error.
        reason: String,
    },

    /// The stack name does not satisfy the naming rules.
    #[error("invalid stack name: {name}: {reason}")]
    InvalidStackName {
        /// The invalid stack name.
        name: String,
        /// The reason for the error.
        reason: String,
    },

    /// The output name does not satisfy the naming rules.
    #[error("invalid output name: {name}: {reason}")]
    InvalidOutputName {
        /// The invalid output name.
        name: String,
        /// The reason for the error.
        reason: String,
    },

    // -----------------------------------------------------------------------
    // Graph errors
    // -----------------------------------------------------------------------
    /// A resource with the same logical id is already declared.
    #[error("duplicate logical id: {0}")]
    DuplicateLogicalId(LogicalId),

    /// An output with the same name is already declared.
    #[error("duplicate output: {0}")]
    DuplicateOutput(String),

    /// A declaration references a logical id that has not been declared yet.
    #[error("{referrer} references undeclared logical id {target}")]
    UnknownReference {
        /// The resource or output holding the reference.
        referrer: String,
        /// The logical id that is not declared.
        target: LogicalId,
    },

    // -----------------------------------------------------------------------
    // Resolution errors
    // -----------------------------------------------------------------------
    /// No physical id has been bound for the referenced resource.
    #[error("unresolved reference: no physical id bound for {target}")]
    UnresolvedReference {
        /// The logical id whose physical id is missing.
        target: LogicalId,
    },

    /// No value has been bound for the referenced attribute.
    #[error("unresolved attribute: no value bound for {target}.{attribute}")]
    UnresolvedAttribute {
        /// The logical id whose attribute is missing.
        target: LogicalId,
        /// The attribute name that is missing.
        attribute: String,
    },

    // -----------------------------------------------------------------------
    // Rendering errors
    // -----------------------------------------------------------------------
    /// Resource properties or the template could not be serialized.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error with context.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Convenience result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
