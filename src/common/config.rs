//! Configuration file handling

use serde::Deserialize;
use std::path::PathBuf;

use super::paths::config_path;
use super::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Where profiles are read from
    #[serde(default)]
    pub launch: LaunchConfig,

    /// Node runtime settings
    #[serde(default)]
    pub runtime: RuntimeConfig,

    /// Default settings
    #[serde(default)]
    pub defaults: Defaults,
}

/// Launch file settings
#[derive(Debug, Deserialize)]
pub struct LaunchConfig {
    /// Launch file path, relative to the workspace root
    #[serde(default = "default_launch_file")]
    pub file: PathBuf,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            file: default_launch_file(),
        }
    }
}

fn default_launch_file() -> PathBuf {
    PathBuf::from(".vscode").join("launch.json")
}

/// Node runtime settings
#[derive(Debug, Deserialize)]
pub struct RuntimeConfig {
    /// Node executable name or path
    #[serde(default = "default_node")]
    pub node: String,

    /// Version pin file, relative to the workspace root
    #[serde(default = "default_version_file")]
    pub version_file: PathBuf,

    /// Shell used for terminal runs
    #[serde(default = "default_shell")]
    pub shell: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            node: default_node(),
            version_file: default_version_file(),
            shell: default_shell(),
        }
    }
}

fn default_node() -> String {
    "node".to_string()
}
fn default_version_file() -> PathBuf {
    PathBuf::from(".nvmrc")
}
fn default_shell() -> String {
    "sh".to_string()
}

/// Default settings
#[derive(Debug, Deserialize, Default)]
pub struct Defaults {
    /// Profile to pick when several qualify and none is given on the command line
    #[serde(default)]
    pub profile: Option<String>,
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = config_path() {
            if path.exists() {
                let content = std::fs::read_to_string(&path).map_err(|e| {
                    super::Error::FileRead {
                        path: path.display().to_string(),
                        error: e.to_string(),
                    }
                })?;
                return Self::parse(&content);
            }
        }
        Ok(Self::default())
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| super::Error::ConfigParse(e.to_string()))
    }

    /// Locate the node executable
    ///
    /// Searches PATH for bare names; explicit paths are returned as given.
    pub fn node_path(&self) -> PathBuf {
        let node = PathBuf::from(&self.runtime.node);
        if node.components().count() > 1 {
            return node;
        }
        which::which(&self.runtime.node).unwrap_or(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.launch.file, PathBuf::from(".vscode/launch.json"));
        assert_eq!(config.runtime.node, "node");
        assert_eq!(config.runtime.version_file, PathBuf::from(".nvmrc"));
        assert!(config.defaults.profile.is_none());
    }

    #[test]
    fn test_parse_partial_file() {
        let config = Config::parse(
            r#"
[runtime]
node = "/opt/node/bin/node"

[defaults]
profile = "unit"
"#,
        )
        .unwrap();

        assert_eq!(config.runtime.node, "/opt/node/bin/node");
        assert_eq!(config.runtime.shell, "sh");
        assert_eq!(config.defaults.profile.as_deref(), Some("unit"));
        assert_eq!(config.node_path(), PathBuf::from("/opt/node/bin/node"));
    }

    #[test]
    fn test_parse_rejects_bad_toml() {
        let err = Config::parse("[runtime\nnode = 1").unwrap_err();
        assert!(matches!(err, crate::Error::ConfigParse(_)));
    }
}
