//! Declaration file loading from require_api.toml.

use std::collections::BTreeMap;
use std::path::Path;

use controller::ControllerDef;
use filter::Restriction;
use registry::CapabilityPath;
use serde::Deserialize;

/// Top-level declaration file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Controllers, parents listed before their children.
    #[serde(default, rename = "controller")]
    pub controllers: Vec<ControllerConfig>,
}

/// One controller and its API declarations.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ControllerConfig {
    pub name: String,

    /// Controller whose filters and declarations are inherited.
    pub parent: Option<String>,

    #[serde(default, rename = "require_api")]
    pub declarations: Vec<DeclarationConfig>,
}

/// A single `[[controller.require_api]]` entry.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeclarationConfig {
    pub path: CapabilityPath,

    /// Which actions the declaration applies to; every action when omitted.
    #[serde(default)]
    pub restriction: Restriction,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string.
    pub fn parse(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Build every controller definition, keyed by name.
    pub fn controllers(&self) -> Result<BTreeMap<String, ControllerDef>, ConfigError> {
        let mut defs: BTreeMap<String, ControllerDef> = BTreeMap::new();

        for cfg in &self.controllers {
            let mut def = match &cfg.parent {
                Some(parent) => {
                    let parent_def = defs
                        .get(parent)
                        .ok_or_else(|| ConfigError::UnknownParent {
                            controller: cfg.name.clone(),
                            parent: parent.clone(),
                        })?;
                    ControllerDef::inherit(&cfg.name, parent_def)
                }
                None => ControllerDef::new(&cfg.name),
            };

            for decl in &cfg.declarations {
                def.declare_path(decl.path.clone(), decl.restriction.clone());
            }

            if defs.insert(cfg.name.clone(), def).is_some() {
                return Err(ConfigError::DuplicateController(cfg.name.clone()));
            }
        }

        Ok(defs)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read declarations: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse declarations: {0}")]
    Parse(String),

    #[error("controller '{controller}' inherits from unknown controller '{parent}'")]
    UnknownParent { controller: String, parent: String },

    #[error("controller '{0}' is defined more than once")]
    DuplicateController(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    const DECLARATIONS: &str = r#"
[[controller]]
name = "application"

[[controller.require_api]]
path = ["jquery"]

[[controller]]
name = "maps"
parent = "application"

[[controller.require_api]]
path = ["google", "maps"]

[[controller.require_api]]
path = ["yui", "slider"]
restriction = { only = ["edit"] }

[[controller.require_api]]
path = ["google", "visualization"]

[controller.require_api.restriction]
applies_to = ["index", "show"]
except = ["show"]
"#;

    #[test]
    fn test_parse_declarations() {
        let config = Config::parse(DECLARATIONS).unwrap();
        assert_eq!(config.controllers.len(), 2);

        let maps = &config.controllers[1];
        assert_eq!(maps.parent.as_deref(), Some("application"));
        assert_eq!(maps.declarations.len(), 3);
        assert_eq!(maps.declarations[0].restriction, Restriction::all());
        assert_eq!(maps.declarations[1].restriction, Restriction::only(["edit"]));
        assert_eq!(
            maps.declarations[2].restriction,
            Restriction::only(["index", "show"]).excluding(["show"])
        );
    }

    #[test]
    fn test_build_controllers() {
        let defs = Config::parse(DECLARATIONS).unwrap().controllers().unwrap();
        let maps = &defs["maps"];
        assert_eq!(maps.declarations().len(), 4);

        let show = maps.dispatch("show", |_| ()).context;
        assert!(show.has_capability(&["jquery"]));
        assert!(show.has_capability(&["google", "maps"]));
        assert!(!show.has_capability(&["google", "visualization"]));
        assert!(!show.has_capability(&["yui"]));

        let edit = maps.dispatch("edit", |_| ()).context;
        assert!(edit.has_capability(&["yui", "slider"]));

        let index = maps.dispatch("index", |_| ()).context;
        assert!(index.has_capability(&["google", "visualization"]));

        let app = defs["application"].dispatch("show", |_| ()).context;
        assert!(!app.has_capability(&["google"]));
    }

    #[test]
    fn test_unknown_parent() {
        let config = Config::parse(
            r#"
[[controller]]
name = "maps"
parent = "application"
"#,
        )
        .unwrap();
        assert!(matches!(
            config.controllers(),
            Err(ConfigError::UnknownParent { .. })
        ));
    }

    #[test]
    fn test_duplicate_controller() {
        let config = Config::parse(
            r#"
[[controller]]
name = "maps"

[[controller]]
name = "maps"
"#,
        )
        .unwrap();
        assert!(matches!(
            config.controllers(),
            Err(ConfigError::DuplicateController(name)) if name == "maps"
        ));
    }

    #[test]
    fn test_rejects_empty_path_and_unknown_keys() {
        let empty = r#"
[[controller]]
name = "maps"

[[controller.require_api]]
path = []
"#;
        assert!(matches!(Config::parse(empty), Err(ConfigError::Parse(_))));

        let typo = r#"
[[controller]]
name = "maps"

[[controller.require_api]]
path = ["google"]
restriction = { expect = ["show"] }
"#;
        assert!(matches!(Config::parse(typo), Err(ConfigError::Parse(_))));

        let flat = r#"
[[controller]]
name = "maps"

[[controller.require_api]]
path = ["google"]
only = ["show"]
"#;
        assert!(matches!(Config::parse(flat), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_empty_file() {
        let config = Config::parse("").unwrap();
        assert!(config.controllers().unwrap().is_empty());
    }
}
