//! `${workspaceFolder}` substitution

use std::path::Path;

/// Placeholder replaced with the workspace root
pub const WORKSPACE_FOLDER: &str = "${workspaceFolder}";

/// Substitute the workspace root into a path template
///
/// Only the first occurrence of the placeholder is replaced. Strings without
/// it come back unchanged, and `None` stays `None`.
pub fn resolve(template: Option<&str>, root: &Path) -> Option<String> {
    template.map(|t| t.replacen(WORKSPACE_FOLDER, &root.to_string_lossy(), 1))
}
