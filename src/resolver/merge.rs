//! Required launch settings and the override-aware merge
//!
//! The merge runs in two passes. The first lays the computed values over the
//! caller's settings. The second writes every required setting on top,
//! comparing against what the first pass produced to decide whether the
//! caller's value was discarded.

use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

use crate::report::Reporter;

/// Runtime flag passed to node for every session
pub const DNS_RESULT_ORDER_FLAG: &str = "--dns-result-order=ipv4first";

/// Environment variable forced for every session
pub const TEST_ENV_KEY: &str = "NODE_ENV";
pub const TEST_ENV_VALUE: &str = "test";

/// Jest binary, relative to the workspace root
pub const RUNNER_TEMPLATE: &str = "${workspaceFolder}/node_modules/.bin/jest";

/// Settings every resolved configuration carries, in output order
pub fn required_settings() -> Vec<(&'static str, Value)> {
    vec![
        ("type", json!("node")),
        ("request", json!("launch")),
        ("program", json!(RUNNER_TEMPLATE)),
        ("console", json!("integratedTerminal")),
        ("internalConsoleOptions", json!("neverOpen")),
        ("runtimeArgs", json!([DNS_RESULT_ORDER_FLAG])),
        ("skipFiles", json!(["<node_internals>/**"])),
        ("autoAttachChildProcesses", json!(true)),
        (
            "resolveSourceMapLocations",
            json!(["${workspaceFolder}/**", "!**/node_modules/**"]),
        ),
    ]
}

/// Values computed by the resolver for one test file
#[derive(Debug)]
pub struct Computed<'a> {
    pub cwd: &'a str,
    pub args: Vec<String>,
}

/// Result of the merge
#[derive(Debug)]
pub struct Merged {
    pub settings: Map<String, Value>,
    pub args: Vec<String>,
    pub environment: BTreeMap<String, String>,
}

/// Merge caller settings with computed and required values
///
/// Caller `args` are kept and the computed arguments appended. Caller `env`
/// entries are kept except `NODE_ENV`, which is forced. Each required key
/// the caller set to a different value produces exactly one warning.
pub fn merge(caller: &Map<String, Value>, computed: Computed<'_>, reporter: &dyn Reporter) -> Merged {
    // First pass: caller settings with the computed values laid over them
    let mut settings = caller.clone();

    let mut args = string_list(caller.get("args"));
    args.extend(computed.args);
    settings.insert("cwd".to_string(), json!(computed.cwd));
    settings.insert("args".to_string(), json!(args));

    let mut environment = string_map(caller.get("env"));

    // Second pass: required settings win
    for (key, value) in required_settings() {
        if let Some(previous) = settings.get(key) {
            if !previous.is_null() && *previous != value {
                warn_override(reporter, key, previous, &value);
            }
        }
        settings.insert(key.to_string(), value);
    }

    if let Some(previous) = environment.get(TEST_ENV_KEY) {
        if previous != TEST_ENV_VALUE {
            warn_override(
                reporter,
                &format!("env.{TEST_ENV_KEY}"),
                &json!(previous),
                &json!(TEST_ENV_VALUE),
            );
        }
    }
    environment.insert(TEST_ENV_KEY.to_string(), TEST_ENV_VALUE.to_string());
    settings.insert("env".to_string(), json!(environment));

    Merged {
        settings,
        args,
        environment,
    }
}

fn warn_override(reporter: &dyn Reporter, key: &str, previous: &Value, required: &Value) {
    reporter.report_warning(&format!(
        "Overriding user setting \"{key}\": \"{}\" with required value: \"{}\"",
        display_value(previous),
        display_value(required)
    ));
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().map(display_value).collect(),
        Some(Value::String(s)) => vec![s.clone()],
        _ => Vec::new(),
    }
}

fn string_map(value: Option<&Value>) -> BTreeMap<String, String> {
    match value {
        Some(Value::Object(entries)) => entries
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| (k.clone(), display_value(v)))
            .collect(),
        _ => BTreeMap::new(),
    }
}
