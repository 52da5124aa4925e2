//! Profile and filesystem validation gates

use regex::Regex;
use std::path::Path;

use crate::probe::Probe;
use crate::profile::{non_empty, Profile};
use crate::report::Reporter;

/// Check a profile's required keys and routing rules
///
/// Every problem is reported, not just the first; the result is a single
/// pass/fail.
pub fn validate_profile(profile: &Profile, reporter: &dyn Reporter) -> bool {
    let mut valid = true;

    if !non_empty(&profile.default_jest_config_path) {
        reporter.report_error("defaultJestConfigPath is required in launch configuration");
        valid = false;
    }

    if !non_empty(&profile.default_cwd) {
        reporter.report_error("defaultCwd is required in launch configuration");
        valid = false;
    }

    for rule in profile.rules() {
        let Some(pattern) = rule.pattern.as_deref().filter(|p| !p.is_empty()) else {
            reporter.report_error(
                "Each jestConfigMap entry must have both pattern and config properties",
            );
            valid = false;
            continue;
        };

        if !non_empty(&rule.config) {
            reporter.report_error(
                "Each jestConfigMap entry must have both pattern and config properties",
            );
            valid = false;
        }

        if let Err(e) = Regex::new(pattern) {
            tracing::debug!("Regex compile error: {e}");
            reporter.report_error(&format!("Invalid regex pattern in jestConfigMap: {pattern}"));
            valid = false;
        }
    }

    valid
}

/// Check that the working directory, config file and jest binary exist
///
/// Stops at the first missing path, in that order.
pub fn validate_paths(
    working_dir: &Path,
    config_path: &Path,
    runner_path: &Path,
    probe: &dyn Probe,
    reporter: &dyn Reporter,
) -> bool {
    if !probe.exists(working_dir) {
        reporter.report_error(&format!(
            "Working directory not found: {}",
            working_dir.display()
        ));
        return false;
    }

    if !probe.exists(config_path) {
        reporter.report_error(&format!(
            "Default Jest config not found: {}",
            config_path.display()
        ));
        return false;
    }

    if !probe.exists(runner_path) {
        reporter.report_error(&format!("Jest not found at: {}", runner_path.display()));
        return false;
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::MemoryProbe;
    use crate::profile::RoutingRule;
    use crate::report::RecordingReporter;

    #[test]
    fn test_valid_profile() {
        let profile = Profile::new("/p/jest.config.js", "/p")
            .with_rule(RoutingRule::new("integration", "/p/int.js", None));
        let reporter = RecordingReporter::new();
        assert!(validate_profile(&profile, &reporter));
        assert!(reporter.entries().is_empty());
    }

    #[test]
    fn test_missing_defaults() {
        let reporter = RecordingReporter::new();
        assert!(!validate_profile(&Profile::new("", "/p"), &reporter));
        assert_eq!(
            reporter.errors(),
            vec!["defaultJestConfigPath is required in launch configuration".to_string()]
        );

        let reporter = RecordingReporter::new();
        assert!(!validate_profile(&Profile::default(), &reporter));
        assert_eq!(reporter.errors().len(), 2);
    }

    #[test]
    fn test_rule_missing_fields() {
        let profile = Profile::new("/p/jest.config.js", "/p").with_rule(RoutingRule {
            pattern: Some("x".into()),
            config: None,
            cwd: None,
        });
        let reporter = RecordingReporter::new();
        assert!(!validate_profile(&profile, &reporter));
        assert!(reporter.errors()[0].contains("both pattern and config"));
    }

    #[test]
    fn test_every_invalid_rule_reported() {
        let profile = Profile::new("/p/jest.config.js", "/p")
            .with_rule(RoutingRule::new("(", "/p/a.js", None))
            .with_rule(RoutingRule::new("ok", "/p/b.js", None))
            .with_rule(RoutingRule::new("[", "/p/c.js", None));
        let reporter = RecordingReporter::new();
        assert!(!validate_profile(&profile, &reporter));
        assert_eq!(
            reporter.errors(),
            vec![
                "Invalid regex pattern in jestConfigMap: (".to_string(),
                "Invalid regex pattern in jestConfigMap: [".to_string(),
            ]
        );
    }

    #[test]
    fn test_validate_paths_order() {
        let (cwd, config, jest) = (
            Path::new("/p"),
            Path::new("/p/jest.config.js"),
            Path::new("/p/node_modules/.bin/jest"),
        );

        let reporter = RecordingReporter::new();
        assert!(!validate_paths(cwd, config, jest, &MemoryProbe::new(), &reporter));
        assert_eq!(reporter.errors(), vec!["Working directory not found: /p".to_string()]);

        let reporter = RecordingReporter::new();
        let probe = MemoryProbe::new().with_path(cwd);
        assert!(!validate_paths(cwd, config, jest, &probe, &reporter));
        assert_eq!(
            reporter.errors(),
            vec!["Default Jest config not found: /p/jest.config.js".to_string()]
        );

        let reporter = RecordingReporter::new();
        let probe = probe.with_path(config);
        assert!(!validate_paths(cwd, config, jest, &probe, &reporter));
        assert_eq!(
            reporter.errors(),
            vec!["Jest not found at: /p/node_modules/.bin/jest".to_string()]
        );

        let reporter = RecordingReporter::new();
        let probe = probe.with_path(jest);
        assert!(validate_paths(cwd, config, jest, &probe, &reporter));
        assert!(reporter.entries().is_empty());
    }
}
