//! Environment probe
//!
//! Filesystem and process queries the resolver depends on, behind a trait
//! so tests can describe a workspace without touching disk.

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Queries about the machine the session will run on
pub trait Probe {
    /// Whether `path` exists
    fn exists(&self, path: &Path) -> bool;

    /// Version string reported by the node runtime, e.g. `v20.11.1`
    fn runtime_version(&self) -> io::Result<String>;

    /// Read a file as UTF-8 text
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// Probe backed by the real filesystem and a node executable
#[derive(Debug, Clone)]
pub struct SystemProbe {
    node: PathBuf,
}

impl SystemProbe {
    pub fn new(node: impl Into<PathBuf>) -> Self {
        Self { node: node.into() }
    }
}

impl Default for SystemProbe {
    fn default() -> Self {
        Self::new("node")
    }
}

impl Probe for SystemProbe {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn runtime_version(&self) -> io::Result<String> {
        let output = Command::new(&self.node).arg("--version").output()?;
        if !output.status.success() {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!(
                    "'{} --version' exited with {:?}",
                    self.node.display(),
                    output.status.code()
                ),
            ));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// In-memory probe
///
/// Paths registered with [`MemoryProbe::with_path`] or
/// [`MemoryProbe::with_file`] exist; everything else does not.
#[derive(Debug, Default, Clone)]
pub struct MemoryProbe {
    paths: HashSet<PathBuf>,
    files: HashMap<PathBuf, String>,
    version: Option<String>,
}

impl MemoryProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.paths.insert(path.into());
        self
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: &str) -> Self {
        let path = path.into();
        self.paths.insert(path.clone());
        self.files.insert(path, contents.to_string());
        self
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }
}

impl Probe for MemoryProbe {
    fn exists(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    fn runtime_version(&self) -> io::Result<String> {
        self.version
            .clone()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "node not available"))
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )
        })
    }
}
