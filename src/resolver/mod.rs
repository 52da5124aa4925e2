//! Configuration resolution
//!
//! Turns a profile and a test file into a launch-ready
//! [`ResolvedConfiguration`]. Resolution is a single stateless pass through
//! a fixed sequence of gates:
//!
//! 1. profile validation (abort on failure)
//! 2. default working directory, default config and jest binary
//! 3. existence checks on those three paths (abort on failure)
//! 4. routing rule selection with the wildcard fallback
//! 5. merge with the required settings (override warnings only)
//!
//! Failures are reported through the [`Reporter`] and surface as `None`.

pub mod merge;
pub mod rules;
pub mod template;
pub mod validate;

pub use merge::required_settings;
pub use rules::{select_rule, wildcard_rule, RuleMatch};
pub use validate::{validate_paths, validate_profile};

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::probe::Probe;
use crate::profile::Profile;
use crate::report::Reporter;

/// Launch parameters for one test file
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfiguration {
    /// Jest config passed with `--config`
    pub config_path: PathBuf,
    /// Directory jest runs in
    pub working_dir: PathBuf,
    /// The test file being run
    pub test_file_path: PathBuf,
    /// Absolute path of the jest binary
    pub runner_path: PathBuf,
    /// Arguments for jest, caller arguments first
    pub extra_args: Vec<String>,
    /// Environment for the jest process
    pub environment: BTreeMap<String, String>,
    /// Complete merged launch settings, in editor launch.json shape
    pub settings: Map<String, Value>,
}

impl ResolvedConfiguration {
    /// The merged settings as a launch.json configuration object
    pub fn to_launch_json(&self) -> Value {
        Value::Object(self.settings.clone())
    }
}

/// Jest binary location for a workspace root
pub fn runner_path(root: &Path) -> PathBuf {
    root.join("node_modules").join(".bin").join("jest")
}

/// Resolves profiles against a workspace
pub struct ConfigResolver<'a> {
    probe: &'a dyn Probe,
    reporter: &'a dyn Reporter,
}

impl<'a> ConfigResolver<'a> {
    pub fn new(probe: &'a dyn Probe, reporter: &'a dyn Reporter) -> Self {
        Self { probe, reporter }
    }

    /// Resolve `profile` for `file_path` inside the workspace at `root`
    ///
    /// Returns `None` after reporting at least one error when the profile is
    /// invalid or a required path is missing.
    pub fn resolve(
        &self,
        profile: &Profile,
        file_path: &Path,
        root: &Path,
    ) -> Option<ResolvedConfiguration> {
        if !validate_profile(profile, self.reporter) {
            return None;
        }

        let default_cwd = expand(profile.default_cwd.as_deref(), root)
            .unwrap_or_else(|| root.join("src"));
        let default_config = expand(profile.default_jest_config_path.as_deref(), root)
            .unwrap_or_else(|| default_cwd.join("jest.config.js"));
        let runner = runner_path(root);

        if !validate_paths(
            &default_cwd,
            &default_config,
            &runner,
            self.probe,
            self.reporter,
        ) {
            return None;
        }

        let test_file_path = root.join(file_path);
        let file_str = test_file_path.to_string_lossy();

        let fallback;
        let rule = match select_rule(profile.rules(), &file_str, self.reporter) {
            Some(rule) => rule,
            None => {
                tracing::debug!("No routing rule matched, using profile defaults");
                fallback = wildcard_rule(
                    &default_config.to_string_lossy(),
                    &default_cwd.to_string_lossy(),
                );
                &fallback
            }
        };

        let config_path = expand(rule.config.as_deref(), root).unwrap_or(default_config);
        let working_dir = expand(rule.cwd.as_deref(), root).unwrap_or(default_cwd);

        let merged = merge::merge(
            &profile.settings,
            merge::Computed {
                cwd: &working_dir.to_string_lossy(),
                args: vec![
                    file_str.into_owned(),
                    "--config".to_string(),
                    config_path.to_string_lossy().into_owned(),
                ],
            },
            self.reporter,
        );

        let mut settings = merged.settings;
        if let Some(name) = &profile.name {
            settings.insert("name".to_string(), Value::String(name.clone()));
        }

        tracing::debug!(
            config = %config_path.display(),
            cwd = %working_dir.display(),
            "Resolved Jest configuration"
        );

        Some(ResolvedConfiguration {
            config_path,
            working_dir,
            test_file_path,
            runner_path: runner,
            extra_args: merged.args,
            environment: merged.environment,
            settings,
        })
    }
}

/// Substitute the workspace root and anchor relative results at it
///
/// Empty results count as absent.
fn expand(template: Option<&str>, root: &Path) -> Option<PathBuf> {
    template::resolve(template, root)
        .filter(|s| !s.is_empty())
        .map(|s| root.join(s))
}
