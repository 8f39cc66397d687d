use crate::utils::error::{FleetError, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_MARKER: &str = "Cargo.toml";
pub const DEFAULT_CARS_FILE: &str = "Cars.txt";
pub const DEFAULT_MOTOR_BOATS_FILE: &str = "MotorBoats.txt";

/// How far above the executable directory to write when no marker is found.
pub const FALLBACK_DEPTH: usize = 4;

/// Directory holding the running executable.
pub fn executable_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| FleetError::ConfigError {
            message: format!("executable path {} has no parent", exe.display()),
        })
}

/// Nearest directory at or above `start` containing `marker`.
///
/// `marker` is either a file name or a `*.ext` pattern.
pub fn find_marked_ancestor(start: &Path, marker: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| contains_marker(dir, marker))
        .map(Path::to_path_buf)
}

fn contains_marker(dir: &Path, marker: &str) -> bool {
    match marker.strip_prefix("*.") {
        Some(extension) => fs::read_dir(dir)
            .map(|entries| {
                entries.flatten().any(|entry| {
                    let path = entry.path();
                    path.is_file() && path.extension().is_some_and(|ext| ext == extension)
                })
            })
            .unwrap_or(false),
        None => dir.join(marker).is_file(),
    }
}

/// Picks the output directory: `explicit` if given, else the marked
/// ancestor of `start`, else [`FALLBACK_DEPTH`] levels above `start`.
pub fn resolve_output_dir(explicit: Option<&Path>, start: &Path, marker: &str) -> PathBuf {
    if let Some(dir) = explicit {
        return dir.to_path_buf();
    }

    if let Some(root) = find_marked_ancestor(start, marker) {
        tracing::debug!("Found {} in {}", marker, root.display());
        return root;
    }

    let fallback = start
        .ancestors()
        .take(FALLBACK_DEPTH + 1)
        .last()
        .unwrap_or(start)
        .to_path_buf();
    tracing::warn!(
        "No {} found above {}, writing to {}",
        marker,
        start.display(),
        fallback.display()
    );
    fallback
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn nested(root: &Path) -> PathBuf {
        let deep = root.join("a").join("b").join("c").join("d").join("e");
        fs::create_dir_all(&deep).unwrap();
        deep
    }

    #[test]
    fn test_explicit_dir_wins() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Cargo.toml"), "").unwrap();
        let explicit = PathBuf::from("/somewhere/else");
        assert_eq!(
            resolve_output_dir(Some(&explicit), dir.path(), DEFAULT_MARKER),
            explicit
        );
    }

    #[test]
    fn test_finds_marker_file() {
        let dir = TempDir::new().unwrap();
        let deep = nested(dir.path());
        fs::write(dir.path().join("a").join("fleet.marker"), "").unwrap();

        assert_eq!(
            resolve_output_dir(None, &deep, "fleet.marker"),
            dir.path().join("a")
        );
    }

    #[test]
    fn test_finds_marker_extension() {
        let dir = TempDir::new().unwrap();
        let deep = nested(dir.path());
        fs::write(dir.path().join("a").join("b").join("Fleet.sln"), "").unwrap();

        assert_eq!(
            find_marked_ancestor(&deep, "*.sln"),
            Some(dir.path().join("a").join("b"))
        );
    }

    #[test]
    fn test_marker_directory_does_not_count() {
        let dir = TempDir::new().unwrap();
        let deep = nested(dir.path());
        fs::create_dir_all(dir.path().join("a").join("no-such-marker-7f3a")).unwrap();

        assert_eq!(find_marked_ancestor(&deep, "no-such-marker-7f3a"), None);
    }

    #[test]
    fn test_fallback_walks_up_fixed_depth() {
        let dir = TempDir::new().unwrap();
        let deep = nested(dir.path());

        assert_eq!(
            resolve_output_dir(None, &deep, "no-such-marker-7f3a"),
            dir.path().join("a")
        );
    }
}
