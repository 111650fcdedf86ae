//! Argument schemas: the typed shape an action declares for its arguments.

use bon::Builder;
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::config::DEFAULT_LIST_DELIMITER;

/// Semantic type of a single argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ArgumentKind {
    String,
    Number,
    Boolean,
    /// A string of `delimiter`-separated items decoded into a list of strings.
    DelimitedList { delimiter: String },
    Object,
}

impl ArgumentKind {
    /// Delimited list using the default `|` separator.
    pub fn delimited_list() -> Self {
        Self::DelimitedList {
            delimiter: DEFAULT_LIST_DELIMITER.to_string(),
        }
    }

    fn json_schema_type(&self) -> &'static str {
        match self {
            Self::String | Self::DelimitedList { .. } => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Object => "object",
        }
    }
}

/// One named entry of an [`ArgumentSchema`].
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
pub struct ArgumentSpec {
    #[builder(into)]
    pub name: String,
    pub kind: ArgumentKind,
    #[builder(default)]
    #[serde(default)]
    pub required: bool,
    #[builder(into)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Ordered list of argument specs, unique by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentSchema {
    arguments: Vec<ArgumentSpec>,
}

impl ArgumentSchema {
    /// Create an empty schema (no arguments).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builder: create a schema argument by argument.
    pub fn object() -> SchemaBuilder {
        SchemaBuilder {
            arguments: Vec::new(),
        }
    }

    /// Look up an argument spec by name.
    pub fn get(&self, name: &str) -> Option<&ArgumentSpec> {
        self.arguments.iter().find(|spec| spec.name == name)
    }

    /// Iterate specs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ArgumentSpec> {
        self.arguments.iter()
    }

    /// Names of required arguments, in declaration order.
    pub fn required(&self) -> impl Iterator<Item = &str> {
        self.arguments
            .iter()
            .filter(|spec| spec.required)
            .map(|spec| spec.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }

    /// Export as a JSON Schema object so a runtime can advertise the action as a tool.
    ///
    /// Delimited lists travel as strings; their separator is carried in `x-delimiter`.
    pub fn to_json_schema(&self) -> serde_json::Value {
        let mut properties = serde_json::Map::new();
        for spec in &self.arguments {
            let mut prop = serde_json::Map::new();
            prop.insert("type".into(), spec.kind.json_schema_type().into());
            if let Some(description) = &spec.description {
                prop.insert("description".into(), description.clone().into());
            }
            if let ArgumentKind::DelimitedList { delimiter } = &spec.kind {
                prop.insert("x-delimiter".into(), delimiter.clone().into());
            }
            properties.insert(spec.name.clone(), serde_json::Value::Object(prop));
        }
        let required: Vec<&str> = self.required().collect();

        serde_json::json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

impl FromIterator<ArgumentSpec> for ArgumentSchema {
    fn from_iter<I: IntoIterator<Item = ArgumentSpec>>(iter: I) -> Self {
        iter.into_iter()
            .fold(ArgumentSchema::object(), SchemaBuilder::argument)
            .build()
    }
}

/// Builder for constructing argument schemas.
pub struct SchemaBuilder {
    arguments: Vec<ArgumentSpec>,
}

impl SchemaBuilder {
    /// Add a fully specified argument. A repeated name replaces the earlier
    /// entry in place.
    pub fn argument(mut self, spec: ArgumentSpec) -> Self {
        match self.arguments.iter_mut().find(|s| s.name == spec.name) {
            Some(existing) => *existing = spec,
            None => self.arguments.push(spec),
        }
        self
    }

    fn push(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
        kind: ArgumentKind,
        required: bool,
    ) -> Self {
        self.argument(
            ArgumentSpec::builder()
                .name(name)
                .kind(kind)
                .required(required)
                .description(description)
                .build(),
        )
    }

    /// Add a string argument.
    pub fn string(self, name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        self.push(name, description, ArgumentKind::String, required)
    }

    /// Add a number argument.
    pub fn number(self, name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        self.push(name, description, ArgumentKind::Number, required)
    }

    /// Add a boolean argument.
    pub fn boolean(self, name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        self.push(name, description, ArgumentKind::Boolean, required)
    }

    /// Add an object argument.
    pub fn object(self, name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        self.push(name, description, ArgumentKind::Object, required)
    }

    /// Add a `|`-delimited list argument.
    pub fn delimited_list(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        self.push(name, description, ArgumentKind::delimited_list(), required)
    }

    /// Add a delimited list argument with a custom separator.
    pub fn delimited_list_with(
        self,
        name: impl Into<String>,
        description: impl Into<String>,
        delimiter: impl Into<String>,
        required: bool,
    ) -> Self {
        let kind = ArgumentKind::DelimitedList {
            delimiter: delimiter.into(),
        };
        self.push(name, description, kind, required)
    }

    pub fn build(self) -> ArgumentSchema {
        ArgumentSchema {
            arguments: self.arguments,
        }
    }
}
