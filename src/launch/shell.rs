//! Terminal command line for run mode

use std::borrow::Cow;

use shell_escape::unix::escape;

use crate::resolver::ResolvedConfiguration;

use super::runtime_args;

/// Quote a word for a POSIX shell when it needs it
pub fn quote(word: &str) -> String {
    escape(Cow::Borrowed(word)).into_owned()
}

/// `cd <cwd> && <env> node <runtime args> <jest> <args>`
pub fn shell_command(resolved: &ResolvedConfiguration, node: &str) -> String {
    let mut words = vec![
        "cd".to_string(),
        quote(&resolved.working_dir.to_string_lossy()),
        "&&".to_string(),
    ];
    words.extend(
        resolved
            .environment
            .iter()
            .map(|(key, value)| format!("{key}={}", quote(value))),
    );
    words.push(quote(node));
    words.extend(runtime_args(resolved).iter().map(|a| quote(a)));
    words.push(quote(&resolved.runner_path.to_string_lossy()));
    words.extend(resolved.extra_args.iter().map(|a| quote(a)));
    words.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    #[test]
    fn test_quote() {
        assert_eq!(quote("/proj/src"), "/proj/src");
        assert_eq!(quote("--dns-result-order=ipv4first"), "--dns-result-order=ipv4first");
        assert_eq!(quote("my tests"), "'my tests'");
        assert_eq!(quote("it's"), r"'it'\''s'");
        assert_eq!(quote(""), "''");
        assert_eq!(quote("$HOME/`x`"), "'$HOME/`x`'");
    }

    #[test]
    fn test_shell_command() {
        let mut settings = serde_json::Map::new();
        settings.insert("runtimeArgs".into(), json!(["--dns-result-order=ipv4first"]));
        let resolved = ResolvedConfiguration {
            config_path: PathBuf::from("/proj/jest.config.js"),
            working_dir: PathBuf::from("/proj/my app"),
            test_file_path: PathBuf::from("/proj/a.test.js"),
            runner_path: PathBuf::from("/proj/node_modules/.bin/jest"),
            extra_args: vec![
                "/proj/a.test.js".into(),
                "--config".into(),
                "/proj/jest.config.js".into(),
            ],
            environment: BTreeMap::from([("NODE_ENV".to_string(), "test".to_string())]),
            settings,
        };

        assert_eq!(
            shell_command(&resolved, "node"),
            "cd '/proj/my app' && NODE_ENV=test node --dns-result-order=ipv4first \
             /proj/node_modules/.bin/jest /proj/a.test.js --config /proj/jest.config.js"
        );
    }
}
