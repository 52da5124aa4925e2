//! CLI command handling
//!
//! Plays the host role around the resolver: finds the workspace, reads the
//! launch profiles, picks one, resolves it for the requested file and
//! either prints or launches the result.

use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::commands::{Commands, GlobalOptions};
use crate::common::config::Config;
use crate::common::{paths, Error, Result};
use crate::launch::{LaunchCommand, LaunchMode};
use crate::probe::SystemProbe;
use crate::profile::{self, Profile, TerminalChooser};
use crate::report::TerminalReporter;
use crate::resolver::{ConfigResolver, ResolvedConfiguration};
use crate::version::{check_node_version, VersionCheck};

/// Dispatch a CLI command
pub async fn dispatch(command: Commands, opts: GlobalOptions) -> Result<()> {
    let config = Config::load()?;

    match command {
        Commands::Debug { file } => launch(config, &opts, &file, LaunchMode::Debug).await,

        Commands::Run { file } => launch(config, &opts, &file, LaunchMode::Run).await,

        Commands::Resolve { file, json } => {
            let workspace = Workspace::open(config, &opts, Some(&file))?;
            let resolved = workspace.resolve(&opts, &file)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&resolved.to_launch_json())?);
            } else {
                print_resolved(&resolved);
            }
            Ok(())
        }

        Commands::Profiles => {
            let workspace = Workspace::open(config, &opts, None)?;
            let profiles = workspace.profiles()?;

            if profiles.is_empty() {
                return Err(Error::NoProfiles);
            }
            for p in &profiles {
                print_profile(p);
            }
            Ok(())
        }

        Commands::CheckVersion => {
            let workspace = Workspace::open(config, &opts, None)?;
            match workspace.check_version() {
                VersionCheck::NoPinFile => println!(
                    "No {} in {}",
                    workspace.config.runtime.version_file.display(),
                    workspace.root.display()
                ),
                VersionCheck::Match(version) => {
                    println!("{} Node {}", "✓".green(), version)
                }
                VersionCheck::Mismatch { .. } => {}
                VersionCheck::Unavailable(reason) => {
                    println!("Could not check Node version: {}", reason)
                }
            }
            Ok(())
        }
    }
}

async fn launch(config: Config, opts: &GlobalOptions, file: &Path, mode: LaunchMode) -> Result<()> {
    let workspace = Workspace::open(config, opts, Some(file))?;
    let resolved = workspace.resolve(opts, file)?;

    let node = workspace.config.node_path();
    let command = LaunchCommand::build(
        &resolved,
        mode,
        &node.to_string_lossy(),
        &workspace.config.runtime.shell,
    );
    if mode == LaunchMode::Debug {
        println!(
            "Debugging {} (attach a debugger to the node inspector)",
            resolved.test_file_path.display()
        );
    }
    command.run().await
}

/// Workspace context for one command
struct Workspace {
    root: PathBuf,
    config: Config,
    probe: SystemProbe,
}

impl Workspace {
    /// Locate the workspace root
    ///
    /// `--root` wins; otherwise the search starts at the target file, or
    /// the current directory when there is none.
    fn open(config: Config, opts: &GlobalOptions, file: Option<&Path>) -> Result<Self> {
        let root = match &opts.root {
            Some(root) => paths::absolutize(root)?,
            None => {
                let start = match file {
                    Some(file) => paths::absolutize(file)?,
                    None => std::env::current_dir()?,
                };
                paths::find_workspace_root(&start, &config.launch.file)
                    .ok_or(Error::NoWorkspace)?
            }
        };

        if !root.is_dir() {
            return Err(Error::NoWorkspace);
        }

        tracing::debug!("Workspace root: {}", root.display());
        let probe = SystemProbe::new(config.node_path());
        Ok(Self {
            root,
            config,
            probe,
        })
    }

    fn profiles(&self) -> Result<Vec<Profile>> {
        profile::load_profiles(&self.root.join(&self.config.launch.file))
    }

    fn check_version(&self) -> VersionCheck {
        check_node_version(
            &self.root,
            &self.config.runtime.version_file,
            &self.probe,
            &TerminalReporter,
        )
    }

    /// Choose a profile and resolve it for `file`
    fn resolve(&self, opts: &GlobalOptions, file: &Path) -> Result<ResolvedConfiguration> {
        let file = paths::absolutize(file)?;
        if !file.is_file() {
            return Err(Error::TestFileNotFound(file));
        }

        let requested = opts
            .profile
            .as_deref()
            .or(self.config.defaults.profile.as_deref());
        let profile = profile::choose_profile(self.profiles()?, requested, &TerminalChooser)?;
        tracing::debug!("Using profile {}", profile.display_name());

        self.check_version();

        ConfigResolver::new(&self.probe, &TerminalReporter)
            .resolve(&profile, &file, &self.root)
            .ok_or(Error::ResolutionFailed(file))
    }
}

fn print_resolved(resolved: &ResolvedConfiguration) {
    println!("{} {}", "Test file:".bold(), resolved.test_file_path.display());
    println!("{} {}", "Config:".bold(), resolved.config_path.display());
    println!("{} {}", "Working dir:".bold(), resolved.working_dir.display());
    println!("{} {}", "Jest:".bold(), resolved.runner_path.display());
    println!("{} {}", "Args:".bold(), resolved.extra_args.join(" "));
    let env = resolved
        .environment
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(" ");
    println!("{} {}", "Env:".bold(), env);
}

fn print_profile(profile: &Profile) {
    println!("{}", profile.display_name().white().bold());
    println!(
        "  Config: {}",
        profile.default_jest_config_path.as_deref().unwrap_or_default()
    );
    println!(
        "  Working Dir: {}",
        profile.default_cwd.as_deref().unwrap_or_default()
    );
    for rule in profile.rules() {
        println!(
            "  {} {} -> {}",
            "route".dimmed(),
            rule.pattern.as_deref().unwrap_or_default(),
            rule.config.as_deref().unwrap_or_default()
        );
    }
}
