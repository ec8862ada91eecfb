//! Policy statements and documents.

use std::collections::BTreeMap;

use serde::ser::{Error as _, SerializeMap, Serializer};
use typed_builder::TypedBuilder;

use edgestack_core::{LogicalId, Value};

use crate::error::PolicyError;
use crate::types::{Action, Effect, Principal};

/// Policy language version written into every document.
pub const IAM_POLICY_VERSION: &str = "2012-10-17";

/// Inputs for constructing a [`PolicyStatement`].
#[derive(Debug, Clone, PartialEq, TypedBuilder)]
pub struct PolicyStatementProps {
    /// Optional statement id.
    #[builder(default)]
    pub sid: Option<String>,

    /// Whether the statement grants or denies.
    #[builder(default)]
    pub effect: Effect,

    /// The actions the statement covers.
    pub actions: Vec<Action>,

    /// The resource scopes the statement covers.
    pub resources: Vec<Value>,

    /// The principals the statement applies to. May be empty for identity
    /// policies; resource policies require at least one.
    #[builder(default)]
    pub principals: Vec<Principal>,
}

/// A single authorization statement.
///
/// Statements are validated at construction: the action and resource sets
/// must be non-empty, principals must not be blank literals, and a statement
/// id (if given) must be alphanumeric. A constructed statement is immutable.
///
/// # Examples
///
/// ```
/// use edgestack_core::Value;
/// use edgestack_iam::{Action, Effect, PolicyStatement, PolicyStatementProps, Principal};
///
/// let statement = PolicyStatement::new(
///     PolicyStatementProps::builder()
///         .actions(vec![Action::new("s3:GetObject").unwrap()])
///         .resources(vec![Value::literal("arn:aws:s3:::site-assets/*")])
///         .principals(vec![Principal::service("cloudfront.amazonaws.com")])
///         .build(),
/// )
/// .unwrap();
/// assert_eq!(statement.effect(), Effect::Allow);
/// assert_eq!(statement.actions().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyStatement {
    sid: Option<String>,
    effect: Effect,
    actions: Vec<Action>,
    resources: Vec<Value>,
    principals: Vec<Principal>,
}

impl PolicyStatement {
    /// Create a new statement.
    ///
    /// # Errors
    /// Returns an error if the action or resource set is empty, if any
    /// principal is a blank literal, or if the statement id is not
    /// alphanumeric.
    pub fn new(props: PolicyStatementProps) -> Result<Self, PolicyError> {
        if props.actions.is_empty() {
            return Err(PolicyError::EmptyActions);
        }
        if props.resources.is_empty() {
            return Err(PolicyError::EmptyResources);
        }
        if props.principals.iter().any(Principal::is_blank) {
            return Err(PolicyError::EmptyPrincipal);
        }
        if let Some(sid) = &props.sid {
            if sid.is_empty() || !sid.bytes().all(|b| b.is_ascii_alphanumeric()) {
                return Err(PolicyError::InvalidSid {
                    sid: sid.clone(),
                    reason: "must be non-empty ASCII letters and digits".to_owned(),
                });
            }
        }
        Ok(Self {
            sid: props.sid,
            effect: props.effect,
            actions: props.actions,
            resources: props.resources,
            principals: props.principals,
        })
    }

    /// The statement id, if any.
    #[must_use]
    pub fn sid(&self) -> Option<&str> {
        self.sid.as_deref()
    }

    /// Whether the statement grants or denies.
    #[must_use]
    pub fn effect(&self) -> Effect {
        self.effect
    }

    /// The actions the statement covers.
    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// The resource scopes the statement covers.
    #[must_use]
    pub fn resources(&self) -> &[Value] {
        &self.resources
    }

    /// The principals the statement applies to.
    #[must_use]
    pub fn principals(&self) -> &[Principal] {
        &self.principals
    }

    /// All logical ids referenced by the statement's resources and
    /// principals, in order of appearance.
    #[must_use]
    pub fn references(&self) -> Vec<&LogicalId> {
        let mut refs = Vec::new();
        for resource in &self.resources {
            refs.extend(resource.references());
        }
        for principal in &self.principals {
            refs.extend(principal.references());
        }
        refs
    }

    /// The `Principal` map for policy JSON, grouping identities by kind and
    /// collapsing single-element lists to scalars.
    fn principal_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        let mut grouped: BTreeMap<&'static str, Vec<serde_json::Value>> = BTreeMap::new();
        for principal in &self.principals {
            grouped
                .entry(principal.key())
                .or_default()
                .push(principal.to_json()?);
        }

        let mut map = serde_json::Map::new();
        for (key, mut identities) in grouped {
            let value = if identities.len() == 1 {
                identities.remove(0)
            } else {
                serde_json::Value::Array(identities)
            };
            map.insert(key.to_owned(), value);
        }
        Ok(serde_json::Value::Object(map))
    }
}

/// Serialize a one-element slice as a scalar and anything else as an array,
/// matching the conventional policy JSON shape.
fn scalar_or_list<T: serde::Serialize>(items: &[T]) -> Result<serde_json::Value, serde_json::Error> {
    if items.len() == 1 {
        serde_json::to_value(&items[0])
    } else {
        serde_json::to_value(items)
    }
}

impl serde::Serialize for PolicyStatement {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        if let Some(sid) = &self.sid {
            map.serialize_entry("Sid", sid)?;
        }
        map.serialize_entry("Effect", self.effect.as_str())?;
        if !self.principals.is_empty() {
            let principal = self.principal_json().map_err(S::Error::custom)?;
            map.serialize_entry("Principal", &principal)?;
        }
        let action = scalar_or_list(&self.actions).map_err(S::Error::custom)?;
        map.serialize_entry("Action", &action)?;
        let resource = scalar_or_list(&self.resources).map_err(S::Error::custom)?;
        map.serialize_entry("Resource", &resource)?;
        map.end()
    }
}

/// An ordered list of statements with the policy language version.
///
/// # Examples
///
/// ```
/// use edgestack_core::Value;
/// use edgestack_iam::{Action, PolicyDocument, PolicyStatement, PolicyStatementProps};
///
/// let mut document = PolicyDocument::new();
/// assert!(document.is_empty());
///
/// document.add_statement(
///     PolicyStatement::new(
///         PolicyStatementProps::builder()
///             .actions(vec![Action::new("s3:GetObject").unwrap()])
///             .resources(vec![Value::literal("arn:aws:s3:::site-assets/*")])
///             .build(),
///     )
///     .unwrap(),
/// );
/// assert_eq!(document.statement_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolicyDocument {
    statements: Vec<PolicyStatement>,
}

impl PolicyDocument {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a statement to the document.
    pub fn add_statement(&mut self, statement: PolicyStatement) {
        self.statements.push(statement);
    }

    /// Whether the document holds no statements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Number of statements in the document.
    #[must_use]
    pub fn statement_count(&self) -> usize {
        self.statements.len()
    }

    /// The document's statements, in order.
    #[must_use]
    pub fn statements(&self) -> &[PolicyStatement] {
        &self.statements
    }

    /// All logical ids referenced by any statement, in order of appearance.
    #[must_use]
    pub fn references(&self) -> Vec<&LogicalId> {
        self.statements
            .iter()
            .flat_map(PolicyStatement::references)
            .collect()
    }
}

impl serde::Serialize for PolicyDocument {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("Version", IAM_POLICY_VERSION)?;
        map.serialize_entry("Statement", &self.statements)?;
        map.end()
    }
}
