//! Typed access to resolved action arguments.

use serde::{Deserialize, Serialize};

use crate::error::ActionError;

/// Arguments after resolution against an [`ArgumentSchema`](super::ArgumentSchema).
///
/// Only arguments that resolved successfully are present. Delimited lists are
/// stored as arrays of strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResolvedArguments {
    values: serde_json::Map<String, serde_json::Value>,
}

impl ResolvedArguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, value: serde_json::Value) {
        self.values.insert(name.into(), value);
    }

    /// Whether an argument has resolved.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get the resolved value for an argument.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.values.get(key)
    }

    /// The resolved arguments as a JSON object.
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::Value::Object(self.values.clone())
    }

    /// Get a string argument by key.
    pub fn get_str(&self, key: &str) -> Result<&str, ActionError> {
        self.values
            .get(key)
            .and_then(|v| v.as_str())
            .ok_or_else(|| missing(key, "string"))
    }

    /// Get an optional string argument.
    pub fn get_str_opt(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(|v| v.as_str())
    }

    /// Get a number argument.
    pub fn get_f64(&self, key: &str) -> Result<f64, ActionError> {
        self.values
            .get(key)
            .and_then(|v| v.as_f64())
            .ok_or_else(|| missing(key, "number"))
    }

    /// Get a boolean argument.
    pub fn get_bool(&self, key: &str) -> Result<bool, ActionError> {
        self.values
            .get(key)
            .and_then(|v| v.as_bool())
            .ok_or_else(|| missing(key, "boolean"))
    }

    /// Get a decoded delimited list.
    pub fn get_list(&self, key: &str) -> Result<Vec<&str>, ActionError> {
        self.values
            .get(key)
            .and_then(|v| v.as_array())
            .and_then(|items| items.iter().map(|item| item.as_str()).collect::<Option<Vec<_>>>())
            .ok_or_else(|| missing(key, "delimited_list"))
    }

    /// Get a nested object.
    pub fn get_object(&self, key: &str) -> Result<&serde_json::Map<String, serde_json::Value>, ActionError> {
        self.values
            .get(key)
            .and_then(|v| v.as_object())
            .ok_or_else(|| missing(key, "object"))
    }

    /// Deserialize the arguments into a typed struct.
    pub fn deserialize<T: serde::de::DeserializeOwned>(&self) -> Result<T, ActionError> {
        serde_json::from_value(self.to_value())
            .map_err(|e| ActionError::decode("*", std::any::type_name::<T>(), e.to_string()))
    }
}

fn missing(key: &str, expected: &str) -> ActionError {
    ActionError::decode(key, expected, "argument is not resolved")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ResolvedArguments {
        let mut args = ResolvedArguments::new();
        args.insert("productName", json!("Echo Dot"));
        args.insert("price", json!(49.99));
        args.insert("tactics", json!(["Scarcity", "Urgency"]));
        args
    }

    #[test]
    fn typed_getters_read_resolved_values() {
        let args = sample();

        assert_eq!(args.get_str("productName").unwrap(), "Echo Dot");
        assert_eq!(args.get_f64("price").unwrap(), 49.99);
        assert_eq!(args.get_list("tactics").unwrap(), ["Scarcity", "Urgency"]);
        assert!(args.get_bool("price").is_err());
        assert_eq!(args.get_str_opt("missing"), None);
    }

    #[test]
    fn deserialize_into_struct() {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Product {
            product_name: String,
            tactics: Vec<String>,
        }

        let product: Product = sample().deserialize().unwrap();
        assert_eq!(product.product_name, "Echo Dot");
        assert_eq!(product.tactics.len(), 2);
    }

    #[test]
    fn serializes_as_plain_object() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["tactics"][1], "Urgency");
    }
}
