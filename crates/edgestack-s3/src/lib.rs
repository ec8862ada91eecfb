//! S3 bucket declarations for EdgeStack.
//!
//! A [`Bucket`] is the declaration-time descriptor of a durable object
//! container: its versioning flag, removal policy, auto-delete-contents
//! flag, and an accumulated resource policy. When at least one statement has
//! been attached, the policy is materialized as a separate [`BucketPolicy`]
//! resource referencing the bucket.

mod bucket;
mod error;
mod policy;
pub mod validation;

pub use bucket::{Bucket, BucketProps};
pub use error::{S3DeclarationError, S3DeclarationResult};
pub use policy::BucketPolicy;
