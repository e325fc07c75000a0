//! Resolved attributes and the subcontexts that hold them.

use std::collections::HashMap;
use std::fmt;

use crate::context::Subcontexts;
use crate::error::{ConfigError, ErrorKind};

/// Trims an attribute id, returning `None` if nothing is left.
pub(crate) fn trim_attribute_id(id: &str) -> Option<&str> {
    Some(id.trim()).filter(|id| !id.is_empty())
}

/// A single attribute value.
///
/// The [`Display`](fmt::Display) form is what audit extraction records:
/// - `String(v)` renders as `v`
/// - `Scoped { value, scope }` renders as `value@scope`
/// - `Empty` renders as an empty string, so value positions are preserved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// Plain string value
    String(String),
    /// Value qualified by a security domain
    Scoped {
        /// The unscoped value
        value: String,
        /// The scope, typically a DNS domain
        scope: String,
    },
    /// Value that is present but carries no data
    Empty,
}

impl AttributeValue {
    /// Creates a plain string value.
    pub fn string(value: impl Into<String>) -> Self {
        AttributeValue::String(value.into())
    }

    /// Creates a scoped value.
    pub fn scoped(value: impl Into<String>, scope: impl Into<String>) -> Self {
        AttributeValue::Scoped {
            value: value.into(),
            scope: scope.into(),
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::String(v) => f.write_str(v),
            AttributeValue::Scoped { value, scope } => write!(f, "{}@{}", value, scope),
            AttributeValue::Empty => Ok(()),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

/// A named attribute with its ordered values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdpAttribute {
    id: String,
    values: Vec<AttributeValue>,
}

impl IdpAttribute {
    /// Creates an attribute with no values.
    ///
    /// Surrounding whitespace is trimmed from `id`, the same way extractors
    /// trim the id they look for.
    ///
    /// # Errors
    ///
    /// Returns `Err(ConfigError)` with [`ErrorKind::MissingAttributeId`] if
    /// the id is blank.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = id.into();
        let id = trim_attribute_id(&id).ok_or_else(|| {
            ConfigError::new(ErrorKind::MissingAttributeId, "Attribute id may not be null")
        })?;

        Ok(Self {
            id: id.to_string(),
            values: Vec::new(),
        })
    }

    /// Replaces the values, keeping their order.
    pub fn with_values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<AttributeValue>,
    {
        self.set_values(values);
        self
    }

    /// Returns the attribute id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the values in stored order.
    pub fn values(&self) -> &[AttributeValue] {
        &self.values
    }

    /// Replaces the values, keeping their order.
    pub fn set_values<I, V>(&mut self, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<AttributeValue>,
    {
        self.values = values.into_iter().map(Into::into).collect();
    }
}

/// Subcontext holding the attributes resolved for a relying party.
///
/// Unfiltered attributes are everything attribute resolution produced.
/// Filtered attributes are what release policy let through.
#[derive(Debug, Clone, Default)]
pub struct AttributeContext {
    unfiltered: HashMap<String, IdpAttribute>,
    filtered: HashMap<String, IdpAttribute>,
}

impl AttributeContext {
    /// Creates an empty attribute context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the unfiltered attributes keyed by id.
    pub fn unfiltered_attributes(&self) -> &HashMap<String, IdpAttribute> {
        &self.unfiltered
    }

    /// Returns the unfiltered attribute with the given id.
    pub fn unfiltered_attribute(&self, id: &str) -> Option<&IdpAttribute> {
        self.unfiltered.get(id)
    }

    /// Replaces the unfiltered attributes. A later duplicate id wins.
    pub fn set_unfiltered_attributes(&mut self, attributes: impl IntoIterator<Item = IdpAttribute>) {
        self.unfiltered = index_by_id(attributes);
    }

    /// Returns the filtered attributes keyed by id.
    pub fn attributes(&self) -> &HashMap<String, IdpAttribute> {
        &self.filtered
    }

    /// Returns the filtered attribute with the given id.
    pub fn attribute(&self, id: &str) -> Option<&IdpAttribute> {
        self.filtered.get(id)
    }

    /// Replaces the filtered attributes. A later duplicate id wins.
    pub fn set_attributes(&mut self, attributes: impl IntoIterator<Item = IdpAttribute>) {
        self.filtered = index_by_id(attributes);
    }
}

fn index_by_id(attributes: impl IntoIterator<Item = IdpAttribute>) -> HashMap<String, IdpAttribute> {
    attributes
        .into_iter()
        .map(|attribute| (attribute.id.clone(), attribute))
        .collect()
}

/// Subcontext describing the relying party a request is issued for.
///
/// It owns its own children; the [`AttributeContext`] lives here.
#[derive(Debug, Default)]
pub struct RelyingPartyContext {
    relying_party_id: Option<String>,
    subcontexts: Subcontexts,
}

impl RelyingPartyContext {
    /// Creates a context for the given relying party.
    pub fn new(relying_party_id: impl Into<String>) -> Self {
        Self {
            relying_party_id: Some(relying_party_id.into()),
            subcontexts: Subcontexts::new(),
        }
    }

    /// Returns the relying party id, if known.
    pub fn relying_party_id(&self) -> Option<&str> {
        self.relying_party_id.as_deref()
    }

    /// Sets the relying party id.
    pub fn set_relying_party_id(&mut self, relying_party_id: impl Into<String>) {
        self.relying_party_id = Some(relying_party_id.into());
    }

    /// Returns the children of this context.
    pub fn subcontexts(&self) -> &Subcontexts {
        &self.subcontexts
    }

    /// Returns the children of this context mutably.
    pub fn subcontexts_mut(&mut self) -> &mut Subcontexts {
        &mut self.subcontexts
    }
}
