//! Node version pin check
//!
//! Compares the running node against the workspace's `.nvmrc`. Advisory
//! only: a mismatch is a warning and probe failures are logged and ignored.

use std::path::Path;

use crate::probe::Probe;
use crate::report::Reporter;

/// Outcome of the version check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionCheck {
    /// No pin file in the workspace
    NoPinFile,
    /// Running version equals the pin
    Match(String),
    /// Running version differs from the pin
    Mismatch { current: String, pinned: String },
    /// Version or pin file could not be read
    Unavailable(String),
}

/// Prefix the version with `v` unless it already has one
pub fn normalize_version(version: &str) -> String {
    let version = version.trim();
    if version.starts_with('v') {
        version.to_string()
    } else {
        format!("v{version}")
    }
}

/// Compare the node version with the pin file at `root/pin_file`
///
/// Emits a warning through `reporter` on mismatch.
pub fn check_node_version(
    root: &Path,
    pin_file: &Path,
    probe: &dyn Probe,
    reporter: &dyn Reporter,
) -> VersionCheck {
    let pin_path = root.join(pin_file);
    if !probe.exists(&pin_path) {
        return VersionCheck::NoPinFile;
    }

    let pinned = match probe.read_to_string(&pin_path) {
        Ok(content) => normalize_version(&content),
        Err(e) => {
            tracing::debug!("Error reading {}: {e}", pin_path.display());
            return VersionCheck::Unavailable(e.to_string());
        }
    };

    let current = match probe.runtime_version() {
        Ok(version) => normalize_version(&version),
        Err(e) => {
            tracing::debug!("Error checking Node version: {e}");
            return VersionCheck::Unavailable(e.to_string());
        }
    };

    if current == pinned {
        return VersionCheck::Match(current);
    }

    reporter.report_warning(&format!(
        "Node version mismatch: using {current}, but {} specifies {pinned}",
        pin_file.display()
    ));
    VersionCheck::Mismatch { current, pinned }
}
