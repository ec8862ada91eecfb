//! Validation for declared bucket names.
//!
//! A physical bucket name is optional on a [`Bucket`](crate::Bucket); when
//! one is declared it must satisfy the rules from the
//! [Amazon S3 documentation](https://docs.aws.amazon.com/AmazonS3/latest/userguide/bucketnamingrules.html),
//! so the declaration fails fast instead of surfacing a provider rejection
//! at apply time.

use std::net::Ipv4Addr;

use crate::error::S3DeclarationError;

/// Minimum bucket name length.
const MIN_BUCKET_NAME_LEN: usize = 3;

/// Maximum bucket name length.
const MAX_BUCKET_NAME_LEN: usize = 63;

/// Validate an S3 bucket name.
///
/// Rules (per AWS documentation):
/// - 3-63 characters long
/// - Only lowercase letters, numbers, hyphens, and dots
/// - Must start and end with a letter or number
/// - No consecutive dots (`..`)
/// - Not formatted as an IPv4 address (e.g. `192.168.0.1`)
/// - Must not start with `xn--`
/// - Must not end with `-s3alias`
/// - Must not start with `sthree-`
///
/// # Errors
///
/// Returns [`S3DeclarationError::InvalidBucketName`] if any rule is violated.
///
/// # Examples
///
/// ```
/// use edgestack_s3::validation::validate_bucket_name;
///
/// assert!(validate_bucket_name("site-assets").is_ok());
/// assert!(validate_bucket_name("AB").is_err());
/// ```
pub fn validate_bucket_name(name: &str) -> Result<(), S3DeclarationError> {
    let len = name.len();

    if !(MIN_BUCKET_NAME_LEN..=MAX_BUCKET_NAME_LEN).contains(&len) {
        return Err(S3DeclarationError::InvalidBucketName {
            name: name.to_owned(),
            reason: format!(
                "must be between {MIN_BUCKET_NAME_LEN} and {MAX_BUCKET_NAME_LEN} characters long"
            ),
        });
    }

    if !name
        .bytes()
        .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'.')
    {
        return Err(S3DeclarationError::InvalidBucketName {
            name: name.to_owned(),
            reason: "must only contain lowercase letters, numbers, hyphens, and dots".to_owned(),
        });
    }

    let first = name.as_bytes()[0];
    let last = name.as_bytes()[len - 1];
    if !(first.is_ascii_lowercase() || first.is_ascii_digit())
        || !(last.is_ascii_lowercase() || last.is_ascii_digit())
    {
        return Err(S3DeclarationError::InvalidBucketName {
            name: name.to_owned(),
            reason: "must start and end with a letter or number".to_owned(),
        });
    }

    if name.contains("..") {
        return Err(S3DeclarationError::InvalidBucketName {
            name: name.to_owned(),
            reason: "must not contain consecutive dots".to_owned(),
        });
    }

    if name.parse::<Ipv4Addr>().is_ok() {
        return Err(S3DeclarationError::InvalidBucketName {
            name: name.to_owned(),
            reason: "must not be formatted as an IP address".to_owned(),
        });
    }

    if name.starts_with("xn--") {
        return Err(S3DeclarationError::InvalidBucketName {
            name: name.to_owned(),
            reason: "must not start with 'xn--'".to_owned(),
        });
    }

    if name.ends_with("-s3alias") {
        return Err(S3DeclarationError::InvalidBucketName {
            name: name.to_owned(),
            reason: "must not end with '-s3alias'".to_owned(),
        });
    }

    if name.starts_with("sthree-") {
        return Err(S3DeclarationError::InvalidBucketName {
            name: name.to_owned(),
            reason: "must not start with 'sthree-'".to_owned(),
        });
    }

    Ok(())
}
