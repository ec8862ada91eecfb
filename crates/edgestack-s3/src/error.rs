//! Error types for bucket declarations.

/// S3 declaration error type.
#[derive(Debug, thiserror::Error)]
pub enum S3DeclarationError {
    /// The bucket name does not satisfy the S3 naming rules.
    #[error("invalid bucket name: {name}: {reason}")]
    InvalidBucketName {
        /// The invalid bucket name.
        name: String,
        /// The reason for the error.
        reason: String,
    },

    /// Auto-deleting contents only makes sense for a bucket that is itself
    /// deleted with its stack.
    #[error("auto-delete-objects on {logical_id} requires the Destroy removal policy")]
    AutoDeleteWithoutDestroy {
        /// The bucket's logical id.
        logical_id: String,
    },

    /// A resource policy statement must name the principal it grants to.
    #[error("resource policy statement on {logical_id} must name at least one principal")]
    StatementWithoutPrincipal {
        /// The bucket's logical id.
        logical_id: String,
    },

    /// A bucket policy resource cannot be materialized from a bucket with no
    /// attached statements.
    #[error("bucket {bucket} has no resource policy statements")]
    EmptyResourcePolicy {
        /// The bucket's logical id.
        bucket: String,
    },
}

/// Convenience result type for S3 declaration operations.
pub type S3DeclarationResult<T> = Result<T, S3DeclarationError>;
