//! Declaration-time value tokens and their post-provisioning resolution.
//!
//! A [`Value`] is either a literal known at declaration time or a typed
//! placeholder for something only the provisioning engine can produce: a
//! resource's physical id ([`Value::Ref`]) or a named attribute populated
//! after creation ([`Value::GetAtt`]). Tokens serialize to the engine's
//! intrinsic forms and resolve to plain strings once the engine has filled
//! an [`AttributeBindings`].

use std::collections::BTreeMap;

use serde::ser::{SerializeMap, Serializer};

use crate::error::CoreError;
use crate::types::LogicalId;

/// A declaration-time value: a literal or a placeholder the provisioning
/// engine fills in after apply.
///
/// # Examples
///
/// ```
/// use edgestack_core::{LogicalId, Value};
///
/// let id = LogicalId::new("SiteBucket").unwrap();
/// let arn = Value::get_att(&id, "Arn");
/// let objects = Value::join(vec![arn, Value::literal("/*")]);
/// assert_eq!(objects.references(), vec![&id]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A plain string known at declaration time.
    Literal(String),
    /// The physical id the engine assigns to the referenced resource.
    Ref(LogicalId),
    /// A named attribute of a resource, available after provisioning.
    GetAtt {
        /// The resource whose attribute is referenced.
        target: LogicalId,
        /// The provider-defined attribute name.
        attribute: String,
    },
    /// Concatenation of parts, resolved left to right.
    Join(Vec<Value>),
}

impl Value {
    /// A literal value.
    #[must_use]
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }

    /// A reference to the physical id of the resource with this logical id.
    #[must_use]
    pub fn reference(target: &LogicalId) -> Self {
        Self::Ref(target.clone())
    }

    /// A reference to a named post-provisioning attribute of a resource.
    #[must_use]
    pub fn get_att(target: &LogicalId, attribute: impl Into<String>) -> Self {
        Self::GetAtt {
            target: target.clone(),
            attribute: attribute.into(),
        }
    }

    /// Concatenation of the given parts.
    #[must_use]
    pub fn join(parts: Vec<Value>) -> Self {
        Self::Join(parts)
    }

    /// All logical ids this value references, in order of appearance.
    #[must_use]
    pub fn references(&self) -> Vec<&LogicalId> {
        let mut refs = Vec::new();
        self.collect_references(&mut refs);
        refs
    }

    fn collect_references<'a>(&'a self, refs: &mut Vec<&'a LogicalId>) {
        match self {
            Self::Literal(_) => {}
            Self::Ref(target) | Self::GetAtt { target, .. } => refs.push(target),
            Self::Join(parts) => {
                for part in parts {
                    part.collect_references(refs);
                }
            }
        }
    }

    /// Resolve this value to a plain string using engine-provided bindings.
    ///
    /// # Errors
    /// Returns an error if a referenced physical id or attribute has not
    /// been bound.
    ///
    /// # Examples
    ///
    /// ```
    /// use edgestack_core::{AttributeBindings, LogicalId, Value};
    ///
    /// let id = LogicalId::new("SiteBucket").unwrap();
    /// let mut bindings = AttributeBindings::new();
    /// bindings.bind_physical_id(id.clone(), "webapp-sitebucket-1f8a");
    ///
    /// let name = Value::reference(&id).resolve(&bindings).unwrap();
    /// assert_eq!(name, "webapp-sitebucket-1f8a");
    /// ```
    pub fn resolve(&self, bindings: &AttributeBindings) -> Result<String, CoreError> {
        match self {
            Self::Literal(value) => Ok(value.clone()),
            Self::Ref(target) => bindings
                .physical_id(target)
                .map(ToOwned::to_owned)
                .ok_or_else(|| CoreError::UnresolvedReference {
                    target: target.clone(),
                }),
            Self::GetAtt { target, attribute } => bindings
                .attribute(target, attribute)
                .map(ToOwned::to_owned)
                .ok_or_else(|| CoreError::UnresolvedAttribute {
                    target: target.clone(),
                    attribute: attribute.clone(),
                }),
            Self::Join(parts) => {
                let resolved: Result<Vec<String>, CoreError> =
                    parts.iter().map(|part| part.resolve(bindings)).collect();
                Ok(resolved?.concat())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Literal(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Literal(value)
    }
}

impl serde::Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Literal(value) => serializer.serialize_str(value),
            Self::Ref(target) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Ref", target.as_str())?;
                map.end()
            }
            Self::GetAtt { target, attribute } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Fn::GetAtt", &[target.as_str(), attribute.as_str()])?;
                map.end()
            }
            Self::Join(parts) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("Fn::Join", &("", parts))?;
                map.end()
            }
        }
    }
}

/// Provider-assigned identifiers and attribute values, bound by the
/// provisioning engine after it has applied the declaration.
///
/// The declaration never invents these values; it only declares the
/// placeholders. Tests simulate the engine by binding values directly.
#[derive(Debug, Clone, Default)]
pub struct AttributeBindings {
    physical_ids: BTreeMap<LogicalId, String>,
    attributes: BTreeMap<LogicalId, BTreeMap<String, String>>,
}

impl AttributeBindings {
    /// Create an empty set of bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the physical id the engine assigned to a resource.
    pub fn bind_physical_id(&mut self, target: LogicalId, physical_id: impl Into<String>) {
        self.physical_ids.insert(target, physical_id.into());
    }

    /// Bind a named attribute value for a resource.
    pub fn bind_attribute(
        &mut self,
        target: LogicalId,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.attributes
            .entry(target)
            .or_default()
            .insert(attribute.into(), value.into());
    }

    /// Look up the physical id bound for a resource.
    #[must_use]
    pub fn physical_id(&self, target: &LogicalId) -> Option<&str> {
        self.physical_ids.get(target).map(String::as_str)
    }

    /// Look up an attribute value bound for a resource.
    #[must_use]
    pub fn attribute(&self, target: &LogicalId, attribute: &str) -> Option<&str> {
        self.attributes
            .get(target)
            .and_then(|attrs| attrs.get(attribute))
            .map(String::as_str)
    }
}
