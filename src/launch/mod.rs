//! Launching jest from a resolved configuration
//!
//! Run mode composes the same shell line a terminal would receive and hands
//! it to the configured shell. Debug mode starts node directly under the
//! inspector, paused before the first line, so any DAP client or Chrome
//! DevTools can attach.

mod shell;

pub use shell::{quote, shell_command};

use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command as TokioCommand;

use crate::common::{Error, Result};
use crate::resolver::ResolvedConfiguration;

/// Inspector flag for debug sessions
pub const INSPECT_FLAG: &str = "--inspect-brk";

/// How the session is started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchMode {
    /// Plain terminal run
    Run,
    /// Node inspector, paused on start
    Debug,
}

/// A fully specified process invocation
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    pub env: BTreeMap<String, String>,
}

impl LaunchCommand {
    /// Build the invocation for `mode`
    ///
    /// `node` is the node executable, `shell` the shell used in run mode.
    pub fn build(
        resolved: &ResolvedConfiguration,
        mode: LaunchMode,
        node: &str,
        shell: &str,
    ) -> Self {
        match mode {
            LaunchMode::Run => Self {
                program: PathBuf::from(shell),
                args: vec!["-c".to_string(), shell_command(resolved, node)],
                cwd: resolved.working_dir.clone(),
                env: BTreeMap::new(),
            },
            LaunchMode::Debug => {
                let mut args = vec![INSPECT_FLAG.to_string()];
                args.extend(runtime_args(resolved));
                args.push(resolved.runner_path.to_string_lossy().into_owned());
                args.extend(resolved.extra_args.iter().cloned());
                Self {
                    program: PathBuf::from(node),
                    args,
                    cwd: resolved.working_dir.clone(),
                    env: resolved.environment.clone(),
                }
            }
        }
    }

    /// Spawn the process with inherited stdio and wait for it
    pub async fn run(&self) -> Result<()> {
        let program = self.program.display().to_string();
        tracing::info!("Launching {} in {}", program, self.cwd.display());
        tracing::debug!(args = ?self.args, env = ?self.env, "Launch command");

        let status = TokioCommand::new(&self.program)
            .args(&self.args)
            .current_dir(&self.cwd)
            .envs(&self.env)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| Error::spawn(&program, e))?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::RunnerExited(status.code().unwrap_or(1)))
        }
    }
}

/// Node runtime arguments from the merged settings
pub fn runtime_args(resolved: &ResolvedConfiguration) -> Vec<String> {
    match resolved.settings.get("runtimeArgs") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::MemoryProbe;
    use crate::profile::Profile;
    use crate::report::RecordingReporter;
    use crate::resolver::ConfigResolver;
    use std::path::Path;

    fn resolved() -> ResolvedConfiguration {
        let probe = MemoryProbe::new()
            .with_path("/proj/src")
            .with_path("/proj/src/jest.config.js")
            .with_path("/proj/node_modules/.bin/jest");
        let reporter = RecordingReporter::new();
        ConfigResolver::new(&probe, &reporter)
            .resolve(
                &Profile::new("/proj/src/jest.config.js", "/proj/src"),
                Path::new("/proj/src/foo.test.js"),
                Path::new("/proj"),
            )
            .unwrap()
    }

    #[test]
    fn test_debug_command() {
        let cmd = LaunchCommand::build(&resolved(), LaunchMode::Debug, "node", "sh");

        assert_eq!(cmd.program, PathBuf::from("node"));
        assert_eq!(
            cmd.args,
            vec![
                "--inspect-brk",
                "--dns-result-order=ipv4first",
                "/proj/node_modules/.bin/jest",
                "/proj/src/foo.test.js",
                "--config",
                "/proj/src/jest.config.js",
            ]
        );
        assert_eq!(cmd.cwd, PathBuf::from("/proj/src"));
        assert_eq!(cmd.env["NODE_ENV"], "test");
    }

    #[test]
    fn test_run_command_uses_shell() {
        let cmd = LaunchCommand::build(&resolved(), LaunchMode::Run, "node", "bash");

        assert_eq!(cmd.program, PathBuf::from("bash"));
        assert_eq!(cmd.args[0], "-c");
        assert!(cmd.args[1].starts_with("cd /proj/src && NODE_ENV=test node"));
    }

    #[tokio::test]
    async fn test_run_reports_exit_code() {
        let tmp = tempfile::tempdir().unwrap();
        let cmd = LaunchCommand {
            program: PathBuf::from("sh"),
            args: vec!["-c".into(), "exit 3".into()],
            cwd: tmp.path().to_path_buf(),
            env: BTreeMap::new(),
        };

        match cmd.run().await {
            Err(Error::RunnerExited(code)) => assert_eq!(code, 3),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_run_missing_program() {
        let tmp = tempfile::tempdir().unwrap();
        let cmd = LaunchCommand {
            program: PathBuf::from("/nonexistent/node"),
            args: Vec::new(),
            cwd: tmp.path().to_path_buf(),
            env: BTreeMap::new(),
        };

        assert!(matches!(cmd.run().await, Err(Error::Spawn { .. })));
    }
}
