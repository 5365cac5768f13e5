//! Declarative resource schemas
//!
//! A [`Schema`] names every attribute a resource exposes to the host, its
//! type, and whether the user must, may, or cannot set it. The host uses it to
//! check configuration before any API call is made.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::{Result, StateError, json_kind};
use crate::state::Attributes;

/// Value type of an attribute
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "elem", rename_all = "snake_case")]
pub enum AttributeType {
    String,
    Int,
    Bool,
    List(Box<AttributeType>),
    Map(Box<AttributeType>),
    /// Ordered list of nested blocks
    Block(Schema),
}

impl AttributeType {
    pub fn list_of(elem: AttributeType) -> Self {
        Self::List(Box::new(elem))
    }

    pub fn map_of(elem: AttributeType) -> Self {
        Self::Map(Box::new(elem))
    }

    fn describe(&self) -> &'static str {
        match self {
            Self::String => "a string",
            Self::Int => "an integer",
            Self::Bool => "a bool",
            Self::List(_) => "a list",
            Self::Map(_) => "a map",
            Self::Block(_) => "a list of blocks",
        }
    }
}

/// Who provides an attribute's value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Presence {
    /// Must be set in configuration
    Required,
    /// May be set in configuration
    Optional,
    /// Set by the remote service only
    Computed,
    /// May be set in configuration, otherwise filled in by the remote service
    OptionalComputed,
}

/// One attribute of a schema
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    #[serde(flatten)]
    pub kind: AttributeType,
    pub presence: Presence,
}

impl Attribute {
    pub fn required(kind: AttributeType) -> Self {
        Self {
            kind,
            presence: Presence::Required,
        }
    }

    pub fn optional(kind: AttributeType) -> Self {
        Self {
            kind,
            presence: Presence::Optional,
        }
    }

    pub fn computed(kind: AttributeType) -> Self {
        Self {
            kind,
            presence: Presence::Computed,
        }
    }

    pub fn optional_computed(kind: AttributeType) -> Self {
        Self {
            kind,
            presence: Presence::OptionalComputed,
        }
    }
}

/// Attribute contract of a resource or nested block
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Schema {
    attributes: BTreeMap<String, Attribute>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style attribute declaration
    pub fn attribute(mut self, name: &str, attribute: Attribute) -> Self {
        self.attributes.insert(name.to_string(), attribute);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Attribute)> {
        self.attributes
            .iter()
            .map(|(name, attribute)| (name.as_str(), attribute))
    }

    /// Check a configuration against this schema
    ///
    /// Computed attributes are accepted because a record read back from the
    /// remote service carries them.
    pub fn validate(&self, attributes: &Attributes) -> Result<()> {
        self.validate_at("", attributes)
    }

    fn validate_at(&self, prefix: &str, attributes: &Attributes) -> Result<()> {
        for (name, attribute) in &self.attributes {
            if attribute.presence == Presence::Required && !attributes.contains(name) {
                return Err(StateError::MissingRequired(format!("{prefix}{name}")));
            }
        }

        for (name, value) in attributes.iter() {
            let path = format!("{prefix}{name}");
            let Some(attribute) = self.attributes.get(name) else {
                return Err(StateError::UnknownAttribute(path));
            };
            if value.is_null() {
                continue;
            }
            check_value(&path, &attribute.kind, value)?;
        }

        Ok(())
    }
}

fn check_value(path: &str, kind: &AttributeType, value: &Value) -> Result<()> {
    let mismatch = || StateError::TypeMismatch {
        key: path.to_string(),
        expected: kind.describe(),
        found: json_kind(value),
    };

    match (kind, value) {
        (AttributeType::String, Value::String(_)) => Ok(()),
        (AttributeType::Bool, Value::Bool(_)) => Ok(()),
        (AttributeType::Int, Value::Number(n)) if n.is_i64() => Ok(()),
        (AttributeType::List(elem), Value::Array(items)) => items
            .iter()
            .enumerate()
            .try_for_each(|(i, item)| check_value(&format!("{path}.{i}"), elem, item)),
        (AttributeType::Map(elem), Value::Object(map)) => map
            .iter()
            .try_for_each(|(key, item)| check_value(&format!("{path}.{key}"), elem, item)),
        (AttributeType::Block(schema), Value::Array(items)) => {
            items.iter().enumerate().try_for_each(|(i, item)| {
                let Value::Object(map) = item else {
                    return Err(StateError::TypeMismatch {
                        key: format!("{path}.{i}"),
                        expected: "a block",
                        found: json_kind(item),
                    });
                };
                schema.validate_at(&format!("{path}.{i}."), &Attributes::from(map.clone()))
            })
        }
        _ => Err(mismatch()),
    }
}
