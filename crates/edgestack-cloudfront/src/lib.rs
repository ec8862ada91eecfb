//! CloudFront declarations for EdgeStack.
//!
//! An [`OriginAccessIdentity`] is the opaque principal a distribution uses
//! to fetch from a private origin; a [`Distribution`] is the edge-caching
//! front end itself, declared as one or more origins each carrying routing
//! behaviors, exactly one of which is the catch-all default.

mod distribution;
mod error;
mod identity;

pub use distribution::{
    Behavior, Distribution, DistributionProps, S3OriginSource, SourceConfiguration,
};
pub use error::{CloudFrontDeclarationError, CloudFrontDeclarationResult};
pub use identity::OriginAccessIdentity;
