//! Core building blocks for declaring cloud resources and synthesizing the
//! engine-facing template.
//!
//! EdgeStack declarations follow a two-phase model. The declaration phase
//! assembles a [`Stack`] of plain resource records whose post-provisioning
//! data is represented by [`Value`] tokens; the resolution phase — owned by
//! the external provisioning engine — fills an [`AttributeBindings`] that
//! turns those tokens into concrete strings. This crate provides both
//! phases' building blocks plus the [`Template`] artifact the engine
//! consumes.

mod error;
mod resource;
mod stack;
mod template;
mod types;
mod value;

pub use error::{CoreError, CoreResult};
pub use resource::StackResource;
pub use stack::{Output, Stack};
pub use template::{TEMPLATE_FORMAT_VERSION, Template, TemplateOutput, TemplateResource};
pub use types::{LogicalId, RemovalPolicy, StackName};
pub use value::{AttributeBindings, Value};
