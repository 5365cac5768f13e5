//! Resource records
//!
//! A [`ResourceData`] is the host's view of one managed resource: an identity
//! string plus a map of attribute values. Values are plain JSON so nested
//! blocks are simply lists of attribute maps.
//!
//! Getters follow the host's zero-value convention: an absent or `null`
//! attribute reads as `""`, `0`, an empty map or an empty list. Only a value
//! of the wrong shape is an error.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::error::{Result, StateError};

/// Attribute map of a resource or of one nested block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(Map<String, Value>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value of an attribute, `None` when absent or null
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|value| !value.is_null())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Store any serializable value under `key`
    pub fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value).map_err(|source| StateError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.0.insert(key.to_string(), value);
        Ok(())
    }

    /// Store a list of nested blocks under `key`, preserving order
    pub fn set_blocks(&mut self, key: &str, blocks: Vec<Attributes>) {
        let list = blocks.into_iter().map(|block| Value::Object(block.0)).collect();
        self.0.insert(key.to_string(), Value::Array(list));
    }

    pub fn get_string(&self, key: &str) -> Result<String> {
        match self.get(key) {
            None => Ok(String::new()),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(other) => Err(StateError::type_mismatch(key, "a string", other)),
        }
    }

    pub fn get_int(&self, key: &str) -> Result<i64> {
        match self.get(key) {
            None => Ok(0),
            Some(value) => value
                .as_i64()
                .ok_or_else(|| StateError::type_mismatch(key, "an integer", value)),
        }
    }

    /// Integer attribute that must fit an unsigned 32-bit API field
    pub fn get_u32(&self, key: &str) -> Result<u32> {
        let value = self.get_int(key)?;
        u32::try_from(value).map_err(|_| StateError::OutOfRange {
            key: key.to_string(),
            value,
        })
    }

    /// List of strings, element order preserved
    pub fn get_string_list(&self, key: &str) -> Result<Vec<String>> {
        match self.get(key) {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| match item {
                    Value::String(s) => Ok(s.clone()),
                    other => Err(StateError::type_mismatch(
                        format!("{key}.{i}"),
                        "a string",
                        other,
                    )),
                })
                .collect(),
            Some(other) => Err(StateError::type_mismatch(key, "a list", other)),
        }
    }

    pub fn get_string_map(&self, key: &str) -> Result<HashMap<String, String>> {
        self.get_map(key, "a string", |value| value.as_str().map(str::to_string))
    }

    pub fn get_bool_map(&self, key: &str) -> Result<HashMap<String, bool>> {
        self.get_map(key, "a bool", Value::as_bool)
    }

    /// Nested blocks stored under `key`, in order
    pub fn get_blocks(&self, key: &str) -> Result<Vec<Attributes>> {
        match self.get(key) {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(i, item)| match item {
                    Value::Object(map) => Ok(Attributes(map.clone())),
                    other => Err(StateError::type_mismatch(
                        format!("{key}.{i}"),
                        "a block",
                        other,
                    )),
                })
                .collect(),
            Some(other) => Err(StateError::type_mismatch(key, "a list of blocks", other)),
        }
    }

    fn get_map<T>(
        &self,
        key: &str,
        expected: &'static str,
        convert: impl Fn(&Value) -> Option<T>,
    ) -> Result<HashMap<String, T>> {
        match self.get(key) {
            None => Ok(HashMap::new()),
            Some(Value::Object(map)) => map
                .iter()
                .map(|(name, value)| {
                    convert(value)
                        .map(|converted| (name.clone(), converted))
                        .ok_or_else(|| {
                            StateError::type_mismatch(format!("{key}.{name}"), expected, value)
                        })
                })
                .collect(),
            Some(other) => Err(StateError::type_mismatch(key, "a map", other)),
        }
    }
}

impl From<Map<String, Value>> for Attributes {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// The host's record of one resource
///
/// An empty `id` means there is no remote object behind the record. Clearing
/// the id during a read is how a resource reports that it was deleted
/// out-of-band.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceData {
    #[serde(default)]
    id: String,
    #[serde(default)]
    attributes: Attributes,
}

impl ResourceData {
    /// Record for a resource that does not exist remotely yet
    pub fn new(attributes: Attributes) -> Self {
        Self {
            id: String::new(),
            attributes,
        }
    }

    /// Record that only knows its identity, as produced by an import
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: Attributes::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(value: Value) -> Attributes {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_absent_attributes_read_as_zero_values() {
        let a = attrs(json!({ "description": null }));

        assert_eq!(a.get_string("description").unwrap(), "");
        assert_eq!(a.get_int("timeout_in_minutes").unwrap(), 0);
        assert!(a.get_string_map("env").unwrap().is_empty());
        assert!(a.get_bool_map("provider_settings").unwrap().is_empty());
        assert!(a.get_string_list("agent_query_rules").unwrap().is_empty());
        assert!(a.get_blocks("step").unwrap().is_empty());
        assert!(!a.contains("description"));
    }

    #[test]
    fn test_type_mismatch_is_reported() {
        let a = attrs(json!({ "name": 42, "env": { "A": true } }));

        let err = a.get_string("name").unwrap_err();
        assert!(matches!(
            err,
            StateError::TypeMismatch { ref key, found: "a number", .. } if key == "name"
        ));

        let err = a.get_string_map("env").unwrap_err();
        assert!(matches!(err, StateError::TypeMismatch { ref key, .. } if key == "env.A"));
    }

    #[test]
    fn test_get_u32_rejects_negative_values() {
        let a = attrs(json!({ "parallelism": -1, "concurrency": 3 }));

        assert_eq!(a.get_u32("concurrency").unwrap(), 3);
        assert!(matches!(
            a.get_u32("parallelism"),
            Err(StateError::OutOfRange { value: -1, .. })
        ));
    }

    #[test]
    fn test_string_list_preserves_order() {
        let a = attrs(json!({ "agent_query_rules": ["queue=deploy", "os=linux", "arch=arm64"] }));

        assert_eq!(
            a.get_string_list("agent_query_rules").unwrap(),
            vec!["queue=deploy", "os=linux", "arch=arm64"]
        );
    }

    #[test]
    fn test_blocks_round_trip_in_order() {
        let mut first = Attributes::new();
        first.set("type", "script").unwrap();
        first.set("command", "make test").unwrap();
        let mut second = Attributes::new();
        second.set("type", "waiter").unwrap();

        let mut a = Attributes::new();
        a.set_blocks("step", vec![first.clone(), second.clone()]);

        assert_eq!(a.get_blocks("step").unwrap(), vec![first, second]);
    }

    #[test]
    fn test_resource_data_serialization() {
        let mut data = ResourceData::with_id("deploy");
        data.attributes_mut().set("name", "Deploy").unwrap();

        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(
            value,
            json!({ "id": "deploy", "attributes": { "name": "Deploy" } })
        );

        let decoded: ResourceData = serde_json::from_value(json!({
            "attributes": { "name": "Deploy" }
        }))
        .unwrap();
        assert!(!decoded.has_id());
        assert_eq!(decoded.attributes().get_string("name").unwrap(), "Deploy");
    }
}
