//! The static-site hosting declaration.
//!
//! [`StaticSite`] composes the whole topology in one construction: a
//! private, versioned bucket; the origin access identity the distribution
//! fetches through; the read-only policy binding between them; the
//! distribution itself; and the public-URL output. The result is a
//! [`Stack`](edgestack_core::Stack) ready for template synthesis.

mod error;
mod site;

pub use error::{SiteError, SiteResult};
pub use site::{
    DEFAULT_OAI_COMMENT, StaticSite, StaticSiteProps, URL_OUTPUT_DESCRIPTION, URL_OUTPUT_NAME,
};
