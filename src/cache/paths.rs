// Cache path utilities.
// Locates the platform cache directory and maps store keys to files.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

/// Get the base cache directory (~/.cache/folio on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "folio").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Path to the viewer's log file.
pub fn log_path(dir: &Path) -> PathBuf {
    dir.join("folio.log")
}

/// Path to the file backing a store key.
pub fn entry_path(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{}.json", sanitize_name(key)))
}

/// Sanitize a name for use in filesystem paths.
/// Replaces problematic characters with underscores.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '.' => '_',
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("github_events"), "github_events");
        assert_eq!(sanitize_name("../escape"), "___escape");
        assert_eq!(sanitize_name("owner:name"), "owner_name");
    }

    #[test]
    fn test_entry_path() {
        let dir = Path::new("/tmp/folio");
        assert_eq!(
            entry_path(dir, "github_projects"),
            PathBuf::from("/tmp/folio/github_projects.json")
        );
        assert!(log_path(dir).ends_with("folio.log"));
    }
}
