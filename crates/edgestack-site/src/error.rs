//! Error type for the site declaration.

use thiserror::Error;

use edgestack_cloudfront::CloudFrontDeclarationError;
use edgestack_core::CoreError;
use edgestack_iam::PolicyError;
use edgestack_s3::S3DeclarationError;

/// Errors raised while composing the static-site declaration.
///
/// Composition delegates to the per-service declaration crates; this enum
/// carries their errors through unchanged.
#[derive(Debug, Error)]
pub enum SiteError {
    /// A stack-level rule was violated during composition.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The access policy could not be constructed.
    #[error(transparent)]
    Policy(#[from] PolicyError),

    /// The bucket declaration was invalid.
    #[error(transparent)]
    S3(#[from] S3DeclarationError),

    /// The identity or distribution declaration was invalid.
    #[error(transparent)]
    CloudFront(#[from] CloudFrontDeclarationError),
}

/// A `Result` alias where the `Err` case is `SiteError`.
pub type SiteResult<T> = Result<T, SiteError>;
