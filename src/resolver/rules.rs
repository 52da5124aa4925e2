//! Routing rule selection
//!
//! Patterns are matched unanchored: `integration` selects any path that
//! contains it anywhere, the way a JavaScript `RegExp.test` would. Anchor
//! explicitly (`^`, `$`) to narrow a rule. Patterns use the `regex` crate
//! syntax, so look-around and backreferences are not available.

use regex::Regex;

use crate::profile::RoutingRule;
use crate::report::Reporter;

/// Pattern of the implicit rule used when nothing else matches
pub const WILDCARD_PATTERN: &str = ".*";

/// Outcome of testing one rule against a path
#[derive(Debug)]
pub enum RuleMatch {
    Matched,
    NotMatched,
    /// The pattern did not compile; the rule is skipped
    Invalid(regex::Error),
}

/// Test a single rule against a file path
pub fn test_rule(rule: &RoutingRule, file_path: &str) -> RuleMatch {
    let Some(pattern) = rule.pattern.as_deref() else {
        return RuleMatch::NotMatched;
    };
    match Regex::new(pattern) {
        Ok(re) if re.is_match(file_path) => RuleMatch::Matched,
        Ok(_) => RuleMatch::NotMatched,
        Err(e) => RuleMatch::Invalid(e),
    }
}

/// First rule, in order, whose pattern matches `file_path`
///
/// Invalid patterns are reported and skipped; later rules are still tested.
/// `None` means the caller falls back to the wildcard rule.
pub fn select_rule<'a>(
    rules: &'a [RoutingRule],
    file_path: &str,
    reporter: &dyn Reporter,
) -> Option<&'a RoutingRule> {
    for rule in rules {
        match test_rule(rule, file_path) {
            RuleMatch::Matched => {
                tracing::debug!(pattern = ?rule.pattern, "Routing rule matched {file_path}");
                return Some(rule);
            }
            RuleMatch::NotMatched => {}
            RuleMatch::Invalid(e) => {
                tracing::debug!("Regex compile error: {e}");
                reporter.report_error(&format!(
                    "Invalid regex pattern: {}",
                    rule.pattern.as_deref().unwrap_or_default()
                ));
            }
        }
    }
    None
}

/// The implicit rule built from the profile defaults
pub fn wildcard_rule(config: &str, cwd: &str) -> RoutingRule {
    RoutingRule::new(WILDCARD_PATTERN, config, Some(cwd))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::RecordingReporter;

    fn rule(pattern: &str, config: &str) -> RoutingRule {
        RoutingRule::new(pattern, config, None)
    }

    #[test]
    fn test_first_match_wins() {
        let rules = vec![
            rule("e2e", "e2e.config.js"),
            rule("integration", "int.config.js"),
            rule(r"\.test\.js$", "unit.config.js"),
        ];
        let reporter = RecordingReporter::new();

        let selected = select_rule(&rules, "/proj/integration/a.test.js", &reporter).unwrap();
        assert_eq!(selected.config.as_deref(), Some("int.config.js"));
        assert!(reporter.entries().is_empty());
    }

    #[test]
    fn test_unanchored_substring_match() {
        let rules = vec![rule("test", "any.config.js")];
        let reporter = RecordingReporter::new();
        assert!(select_rule(&rules, "/home/me/contest/src/a.js", &reporter).is_some());
    }

    #[test]
    fn test_no_match_returns_none() {
        let rules = vec![rule("^/other", "other.config.js")];
        let reporter = RecordingReporter::new();
        assert!(select_rule(&rules, "/proj/a.test.js", &reporter).is_none());
        assert!(select_rule(&[], "/proj/a.test.js", &reporter).is_none());
    }

    #[test]
    fn test_invalid_pattern_skipped_and_reported() {
        let rules = vec![rule("([unclosed", "bad.config.js"), rule("proj", "good.config.js")];
        let reporter = RecordingReporter::new();

        let selected = select_rule(&rules, "/proj/a.test.js", &reporter).unwrap();
        assert_eq!(selected.config.as_deref(), Some("good.config.js"));
        assert_eq!(
            reporter.errors(),
            vec!["Invalid regex pattern: ([unclosed".to_string()]
        );
    }

    #[test]
    fn test_invalid_pattern_never_selected() {
        let rules = vec![rule("(", "bad.config.js")];
        let reporter = RecordingReporter::new();
        assert!(select_rule(&rules, "(", &reporter).is_none());
        assert_eq!(reporter.errors().len(), 1);
    }

    #[test]
    fn test_wildcard_matches_everything() {
        let wildcard = wildcard_rule("/proj/jest.config.js", "/proj");
        assert!(matches!(test_rule(&wildcard, ""), RuleMatch::Matched));
        assert!(matches!(test_rule(&wildcard, "/any/path"), RuleMatch::Matched));
        assert_eq!(wildcard.cwd.as_deref(), Some("/proj"));
    }
}
