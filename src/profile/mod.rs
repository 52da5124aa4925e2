//! Launch profiles
//!
//! A profile is one entry of the `configurations` array in `launch.json`
//! carrying the Jest-specific keys. Everything else in the entry is kept as
//! caller-supplied settings and takes part in the merge.

mod launch_file;
mod select;

pub use launch_file::{load_profiles, parse_profiles, strip_json_comments};
pub use select::{choose_profile, Chooser, NoChooser, TerminalChooser};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One file-pattern routing entry (`jestConfigMap` element)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct RoutingRule {
    /// Regex source, matched unanchored against the test file path
    #[serde(default)]
    pub pattern: Option<String>,
    /// Jest config to use, may contain `${workspaceFolder}`
    #[serde(default)]
    pub config: Option<String>,
    /// Working directory, may contain `${workspaceFolder}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,
}

impl RoutingRule {
    pub fn new(pattern: &str, config: &str, cwd: Option<&str>) -> Self {
        Self {
            pattern: Some(pattern.to_string()),
            config: Some(config.to_string()),
            cwd: cwd.map(str::to_string),
        }
    }
}

/// A named Jest launch profile
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub default_jest_config_path: Option<String>,

    #[serde(default)]
    pub default_cwd: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jest_config_map: Option<Vec<RoutingRule>>,

    /// Remaining launch.json keys (`type`, `args`, `env`, ...)
    #[serde(flatten)]
    pub settings: Map<String, Value>,
}

impl Profile {
    pub fn new(default_jest_config_path: &str, default_cwd: &str) -> Self {
        Self {
            default_jest_config_path: Some(default_jest_config_path.to_string()),
            default_cwd: Some(default_cwd.to_string()),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_rule(mut self, rule: RoutingRule) -> Self {
        self.jest_config_map.get_or_insert_with(Vec::new).push(rule);
        self
    }

    pub fn with_setting(mut self, key: &str, value: Value) -> Self {
        self.settings.insert(key.to_string(), value);
        self
    }

    /// Routing rules in declaration order
    pub fn rules(&self) -> &[RoutingRule] {
        self.jest_config_map.as_deref().unwrap_or(&[])
    }

    /// Name shown to the user
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("(unnamed)")
    }
}

pub(crate) fn non_empty(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.is_empty())
}
