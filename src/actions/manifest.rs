//! TOML action manifests.
//!
//! ```toml
//! [[action]]
//! name = "analyze_product_marketing"
//! requires_response = true
//!
//! [[action.argument]]
//! name = "manipulativeTactics"
//! kind = "delimited_list"
//! required = true
//! ```

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use super::definition::{ActionDefinition, Renderer};
use super::registry::ActionRegistry;
use super::schema::{ArgumentKind, ArgumentSchema, ArgumentSpec};
use crate::config::ActionViewConfig;
use crate::error::{ActionError, Result};

/// Parsed manifest; bind a renderer to turn it into definitions.
#[derive(Debug, Clone, Deserialize)]
pub struct ActionManifest {
    #[serde(default, rename = "action")]
    pub actions: Vec<ManifestAction>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ManifestAction {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub requires_response: bool,
    #[serde(default, rename = "argument")]
    pub arguments: Vec<ManifestArgument>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ManifestArgument {
    pub name: String,
    pub kind: ManifestKind,
    #[serde(default)]
    pub required: bool,
    /// Only meaningful for `delimited_list`; defaults to the configured delimiter.
    #[serde(default)]
    pub delimiter: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ManifestKind {
    String,
    Number,
    Boolean,
    DelimitedList,
    Object,
}

impl ActionManifest {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let manifest: Self = toml::from_str(raw)?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ActionError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&raw)
    }

    fn validate(&self) -> Result<()> {
        for action in &self.actions {
            if action.name.trim().is_empty() {
                return Err(ActionError::Configuration("action name must not be empty".into()));
            }
            for arg in &action.arguments {
                if arg.delimiter.as_deref() == Some("") {
                    return Err(ActionError::Configuration(format!(
                        "argument '{}' of '{}' has an empty delimiter",
                        arg.name, action.name
                    )));
                }
            }
        }
        Ok(())
    }

    /// Build definitions that all share `renderer`.
    pub fn definitions(
        &self,
        config: &ActionViewConfig,
        renderer: Arc<dyn Renderer>,
    ) -> Vec<ActionDefinition> {
        self.actions
            .iter()
            .map(|action| {
                let schema: ArgumentSchema = action
                    .arguments
                    .iter()
                    .map(|arg| arg.to_spec(config))
                    .collect();
                let mut definition =
                    ActionDefinition::with_renderer(action.name.clone(), schema, renderer.clone())
                        .requires_response(action.requires_response);
                if let Some(description) = &action.description {
                    definition = definition.description(description.clone());
                }
                definition
            })
            .collect()
    }

    /// Register every action of the manifest. Returns the registered names.
    pub fn register_all(
        &self,
        registry: &ActionRegistry,
        config: &ActionViewConfig,
        renderer: Arc<dyn Renderer>,
    ) -> Vec<String> {
        self.definitions(config, renderer)
            .into_iter()
            .map(|definition| {
                let name = definition.name().to_string();
                registry.register(definition);
                name
            })
            .collect()
    }
}

impl ManifestArgument {
    fn to_spec(&self, config: &ActionViewConfig) -> ArgumentSpec {
        let kind = match self.kind {
            ManifestKind::String => ArgumentKind::String,
            ManifestKind::Number => ArgumentKind::Number,
            ManifestKind::Boolean => ArgumentKind::Boolean,
            ManifestKind::Object => ArgumentKind::Object,
            ManifestKind::DelimitedList => ArgumentKind::DelimitedList {
                delimiter: self
                    .delimiter
                    .clone()
                    .unwrap_or_else(|| config.list_delimiter.clone()),
            },
        };
        ArgumentSpec::builder()
            .name(self.name.clone())
            .kind(kind)
            .required(self.required)
            .maybe_description(self.description.clone())
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
[[action]]
name = "analyze_product_marketing"
description = "Flag manipulative marketing"
requires_response = true

[[action.argument]]
name = "productName"
kind = "string"
required = true

[[action.argument]]
name = "manipulativeTactics"
kind = "delimited_list"
required = true

[[action.argument]]
name = "tags"
kind = "delimited_list"
delimiter = ","
"#;

    fn ignore(_: &crate::lifecycle::RenderFrame) -> std::result::Result<(), crate::actions::RenderError> {
        Ok(())
    }

    fn noop() -> Arc<dyn Renderer> {
        Arc::new(ignore)
    }

    #[test]
    fn parses_actions_and_arguments() {
        let manifest = ActionManifest::from_toml_str(MANIFEST).unwrap();

        assert_eq!(manifest.actions.len(), 1);
        let action = &manifest.actions[0];
        assert!(action.requires_response);
        assert_eq!(action.arguments[1].kind, ManifestKind::DelimitedList);
    }

    #[test]
    fn delimiter_defaults_to_config() {
        let manifest = ActionManifest::from_toml_str(MANIFEST).unwrap();
        let config = ActionViewConfig {
            list_delimiter: ";".into(),
            ..Default::default()
        };

        let definitions = manifest.definitions(&config, noop());
        let schema = definitions[0].schema();

        assert_eq!(
            schema.get("manipulativeTactics").unwrap().kind,
            ArgumentKind::DelimitedList { delimiter: ";".into() }
        );
        assert_eq!(
            schema.get("tags").unwrap().kind,
            ArgumentKind::DelimitedList { delimiter: ",".into() }
        );
        assert!(definitions[0].needs_response());
    }

    #[test]
    fn register_all_fills_registry() {
        let manifest = ActionManifest::from_toml_str(MANIFEST).unwrap();
        let registry = ActionRegistry::new();

        let names = manifest.register_all(&registry, &ActionViewConfig::default(), noop());

        assert_eq!(names, ["analyze_product_marketing"]);
        assert!(registry.contains("analyze_product_marketing"));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let raw = "[[action]]\nname = \"a\"\n[[action.argument]]\nname = \"x\"\nkind = \"date\"\n";

        assert!(matches!(
            ActionManifest::from_toml_str(raw),
            Err(ActionError::Configuration(_))
        ));
    }

    #[test]
    fn empty_delimiter_is_rejected() {
        let raw = "[[action]]\nname = \"a\"\n[[action.argument]]\nname = \"x\"\nkind = \"delimited_list\"\ndelimiter = \"\"\n";

        assert!(ActionManifest::from_toml_str(raw).is_err());
    }
}
