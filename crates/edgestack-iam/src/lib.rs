//! IAM policy modeling for EdgeStack declarations.
//!
//! Resource declarations grant capabilities by attaching a [`PolicyDocument`]
//! to a resource; the document is a list of [`PolicyStatement`]s, each naming
//! an effect, a validated action set, a resource scope, and the principals
//! the grant applies to. Resource scopes and principal identities may carry
//! [`edgestack_core::Value`] tokens, so a statement can reference data the
//! provisioning engine only produces after apply.

mod error;
mod policy;
mod types;

pub use error::{PolicyError, PolicyResult};
pub use policy::{IAM_POLICY_VERSION, PolicyDocument, PolicyStatement, PolicyStatementProps};
pub use types::{Action, Effect, Principal};
