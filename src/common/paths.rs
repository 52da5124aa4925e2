//! Configuration and workspace paths

use std::io;
use std::path::{Path, PathBuf};

/// Name used for the configuration directory
const APP_NAME: &str = "jest-debug";

/// Marks a package directory when no launch file is found
const PACKAGE_MARKER: &str = "package.json";

/// Get the configuration directory path
///
/// Uses the directories crate for platform-appropriate locations:
/// - Linux: `~/.config/jest-debug/`
/// - macOS: `~/Library/Application Support/jest-debug/`
/// - Windows: `%APPDATA%\jest-debug\`
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the configuration file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Find the workspace root for a file
///
/// Walks up from `start` (or its parent when `start` is a file). The nearest
/// ancestor holding `launch_file` (relative, e.g. `.vscode/launch.json`)
/// wins, even above nested packages; only when no ancestor has one does the
/// nearest directory with a `package.json` count as the root.
pub fn find_workspace_root(start: &Path, launch_file: &Path) -> Option<PathBuf> {
    let first = if start.is_dir() {
        Some(start)
    } else {
        start.parent()
    };
    let ancestors = || first.into_iter().flat_map(Path::ancestors);

    ancestors()
        .find(|dir| dir.join(launch_file).is_file())
        .or_else(|| ancestors().find(|dir| dir.join(PACKAGE_MARKER).is_file()))
        .map(Path::to_path_buf)
}

/// Make `path` absolute against the current directory
///
/// Does not touch the filesystem beyond reading the current directory, so
/// paths that do not exist yet stay usable for error messages.
pub fn absolutize(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn launch() -> &'static Path {
        Path::new(".vscode/launch.json")
    }

    #[test]
    fn test_config_dir_is_valid() {
        let dir = config_dir();
        assert!(dir.is_some());
    }

    #[test]
    fn test_find_workspace_root_from_nested_file() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        std::fs::write(root.join("package.json"), "{}").unwrap();
        let nested = root.join("src").join("deep");
        std::fs::create_dir_all(&nested).unwrap();
        let file = nested.join("foo.test.js");
        std::fs::write(&file, "").unwrap();

        assert_eq!(find_workspace_root(&file, launch()).as_deref(), Some(root));
    }

    #[test]
    fn test_find_workspace_root_nearest_launch_file() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        std::fs::write(root.join("package.json"), "{}").unwrap();
        let pkg = root.join("packages").join("api");
        std::fs::create_dir_all(pkg.join(".vscode")).unwrap();
        std::fs::write(pkg.join(".vscode").join("launch.json"), "{}").unwrap();

        assert_eq!(find_workspace_root(&pkg, launch()).as_deref(), Some(pkg.as_path()));
    }

    #[test]
    fn test_find_workspace_root_skips_nested_package() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        std::fs::create_dir_all(root.join(".vscode")).unwrap();
        std::fs::write(root.join(".vscode").join("launch.json"), "{}").unwrap();
        std::fs::write(root.join("package.json"), "{}").unwrap();
        let pkg = root.join("packages").join("api");
        std::fs::create_dir_all(&pkg).unwrap();
        std::fs::write(pkg.join("package.json"), "{}").unwrap();
        let file = pkg.join("a.test.js");
        std::fs::write(&file, "").unwrap();

        assert_eq!(find_workspace_root(&file, launch()).as_deref(), Some(root));
    }

    #[test]
    fn test_find_workspace_root_without_launch_file() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        let pkg = root.join("packages").join("api");
        std::fs::create_dir_all(&pkg).unwrap();
        std::fs::write(pkg.join("package.json"), "{}").unwrap();

        assert_eq!(find_workspace_root(&pkg, launch()).as_deref(), Some(pkg.as_path()));
    }

    #[test]
    fn test_absolutize_keeps_absolute() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(absolutize(tmp.path()).unwrap(), tmp.path());
    }
}
