//! Error types for CloudFront declarations.

use thiserror::Error;

/// Errors raised while declaring CloudFront resources.
///
/// These are declaration-phase errors: they fire when a distribution or
/// origin access identity is constructed with an invalid shape, before any
/// template is rendered.
#[derive(Debug, Error)]
pub enum CloudFrontDeclarationError {
    // -----------------------------------------------------------------------
    // Origin access identity errors
    // -----------------------------------------------------------------------
    /// The identity comment is empty or too long.
    #[error("invalid origin access identity comment: {reason}")]
    InvalidComment {
        /// Why the comment was rejected.
        reason: String,
    },

    /// A grant principal was requested for a blank identity id.
    #[error("origin access identity id must not be blank")]
    EmptyIdentityId,

    // -----------------------------------------------------------------------
    // Behavior errors
    // -----------------------------------------------------------------------
    /// A path pattern is empty or otherwise unusable.
    #[error("invalid path pattern {pattern:?}: {reason}")]
    InvalidPathPattern {
        /// The offending pattern.
        pattern: String,
        /// Why the pattern was rejected.
        reason: String,
    },

    // -----------------------------------------------------------------------
    // Distribution shape errors
    // -----------------------------------------------------------------------
    /// The distribution was declared without any origin.
    #[error("distribution requires at least one origin")]
    NoOrigins,

    /// An origin was declared without any behavior.
    #[error("origin at index {origin_index} has no behaviors")]
    OriginWithoutBehaviors {
        /// Zero-based position of the origin in the declaration.
        origin_index: usize,
    },

    /// No origin carries the default cache behavior.
    #[error("distribution requires exactly one default behavior, found none")]
    NoDefaultBehavior,

    /// More than one default cache behavior was declared.
    #[error("distribution requires exactly one default behavior, found {count}")]
    MultipleDefaultBehaviors {
        /// How many default behaviors were declared.
        count: usize,
    },
}

/// A `Result` alias where the `Err` case is `CloudFrontDeclarationError`.
pub type CloudFrontDeclarationResult<T> = Result<T, CloudFrontDeclarationError>;
