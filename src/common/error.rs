//! Error types for jest-debug
//!
//! Resolution diagnostics (invalid profiles, missing paths, override
//! warnings) travel through the [`Reporter`](crate::report::Reporter).
//! This type covers the host-level failures around the resolver: finding
//! the workspace, reading `launch.json`, choosing a profile and spawning
//! node.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for jest-debug
#[derive(Error, Debug)]
pub enum Error {
    // === Workspace Errors ===
    #[error("No workspace folder found. Pass --root or run inside a project containing package.json")]
    NoWorkspace,

    #[error("Test file not found: {0}")]
    TestFileNotFound(PathBuf),

    // === Profile Errors ===
    #[error("No Jest debug configurations found in launch.json. Please add at least one with defaultJestConfigPath and defaultCwd.")]
    NoProfiles,

    #[error("No Jest debug configuration named '{name}'. Available: {available}")]
    ProfileNotFound { name: String, available: String },

    #[error("Profile selection cancelled")]
    SelectionCancelled,

    #[error("Failed to read launch configuration '{path}': {error}")]
    LaunchFileRead { path: String, error: String },

    #[error("Invalid launch configuration '{path}': {error}")]
    LaunchFileParse { path: String, error: String },

    #[error("Invalid Jest profile '{name}': {error}")]
    InvalidProfile { name: String, error: String },

    // === Resolution Errors ===
    #[error("Could not resolve a Jest configuration for {0}; see the errors above")]
    ResolutionFailed(PathBuf),

    // === Launch Errors ===
    #[error("Failed to start '{program}': {error}")]
    Spawn { program: String, error: String },

    #[error("Jest exited with code {0}")]
    RunnerExited(i32),

    // === Configuration Errors ===
    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a profile not found error listing the available names
    pub fn profile_not_found<S: AsRef<str>>(name: &str, available: &[S]) -> Self {
        Self::ProfileNotFound {
            name: name.to_string(),
            available: available
                .iter()
                .map(|s| s.as_ref())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    /// Create a spawn error for the given program
    pub fn spawn(program: &str, error: impl std::fmt::Display) -> Self {
        Self::Spawn {
            program: program.to_string(),
            error: error.to_string(),
        }
    }
}
