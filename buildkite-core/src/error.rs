//! Error types for resource records and schemas

use thiserror::Error;

/// Result type alias for record and schema operations
pub type Result<T> = std::result::Result<T, StateError>;

/// Errors raised while reading, writing or validating a resource record
#[derive(Debug, Error)]
pub enum StateError {
    /// Stored value does not have the expected shape
    #[error("attribute `{key}` should be {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Integer does not fit the range accepted by the API
    #[error("attribute `{key}` value {value} is out of range")]
    OutOfRange { key: String, value: i64 },

    /// Required attribute is absent or null
    #[error("missing required attribute `{0}`")]
    MissingRequired(String),

    /// Attribute is not part of the schema
    #[error("unknown attribute `{0}`")]
    UnknownAttribute(String),

    /// Value could not be encoded into the record
    #[error("failed to encode attribute `{key}`: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StateError {
    pub(crate) fn type_mismatch(
        key: impl Into<String>,
        expected: &'static str,
        found: &serde_json::Value,
    ) -> Self {
        Self::TypeMismatch {
            key: key.into(),
            expected,
            found: json_kind(found),
        }
    }
}

/// Human-readable name of a JSON value's kind
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a bool",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "a list",
        serde_json::Value::Object(_) => "a map",
    }
}
