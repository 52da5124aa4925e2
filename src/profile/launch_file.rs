//! Reading profiles from `launch.json`
//!
//! Editors write launch files as JSON with comments and trailing commas, so
//! both are removed before handing the text to serde_json.

use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

use super::Profile;
use crate::common::{Error, Result};

#[derive(Deserialize)]
struct LaunchFile {
    #[serde(default)]
    configurations: Vec<Value>,
}

/// Load every Jest profile from a launch file
///
/// Entries that are not Jest profiles are skipped. A Jest profile with
/// malformed fields is an error naming the profile.
pub fn load_profiles(path: &Path) -> Result<Vec<Profile>> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::LaunchFileRead {
        path: path.display().to_string(),
        error: e.to_string(),
    })?;

    parse_profiles(&content).map_err(|e| match e {
        Error::Json(e) => Error::LaunchFileParse {
            path: path.display().to_string(),
            error: e.to_string(),
        },
        other => other,
    })
}

/// Parse Jest profiles from launch file text
pub fn parse_profiles(content: &str) -> Result<Vec<Profile>> {
    let launch: LaunchFile = serde_json::from_str(&strip_json_comments(content))?;

    let profiles = launch
        .configurations
        .into_iter()
        .filter(is_jest_entry)
        .map(|entry| {
            let name = entry
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or("(unnamed)")
                .to_string();
            serde_json::from_value::<Profile>(entry).map_err(|e| Error::InvalidProfile {
                name,
                error: e.to_string(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!("Found {} Jest profile(s)", profiles.len());
    Ok(profiles)
}

/// A node configuration with both default keys set to non-empty strings
fn is_jest_entry(entry: &Value) -> bool {
    let text = |key: &str| entry.get(key).and_then(Value::as_str).is_some_and(|s| !s.is_empty());
    entry.get("type").and_then(Value::as_str) == Some("node")
        && text("defaultJestConfigPath")
        && text("defaultCwd")
}

/// Remove `//` and `/* */` comments and trailing commas
///
/// String literals are copied untouched, including escaped quotes.
pub fn strip_json_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '/' if chars.peek() == Some(&'/') => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
            }
            _ => out.push(c),
        }
    }

    strip_trailing_commas(&out)
}

fn strip_trailing_commas(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut in_string = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if in_string {
            out.push(c);
            if c == '\\' {
                if let Some(&escaped) = chars.get(i + 1) {
                    out.push(escaped);
                    i += 1;
                }
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
            out.push(c);
        } else if c == ',' {
            let next = chars[i + 1..].iter().find(|ch| !ch.is_whitespace());
            if !matches!(next, Some('}') | Some(']')) {
                out.push(c);
            }
        } else {
            out.push(c);
        }
        i += 1;
    }

    out
}
