//! Error types for policy construction.

/// Policy construction error type.
///
/// Every variant is a structural defect caught while building a statement,
/// before the declaration reaches the provisioning engine.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    /// The action name does not follow the `service:Operation` form.
    #[error("invalid action: {action}: {reason}")]
    InvalidAction {
        /// The invalid action name.
        action: String,
        /// The reason for the error.
        reason: String,
    },

    /// The statement names no actions.
    #[error("policy statement must name at least one action")]
    EmptyActions,

    /// The statement names no resources.
    #[error("policy statement must name at least one resource")]
    EmptyResources,

    /// A principal resolves to an empty identity, which would grant access
    /// to no valid principal.
    #[error("policy statement principal must not be empty")]
    EmptyPrincipal,

    /// The statement id does not satisfy the naming rules.
    #[error("invalid statement id: {sid}: {reason}")]
    InvalidSid {
        /// The invalid statement id.
        sid: String,
        /// The reason for the error.
        reason: String,
    },
}

/// Convenience result type for policy operations.
pub type PolicyResult<T> = Result<T, PolicyError>;
