//! Source tree discovery
//!
//! Directory listings used by the build driver: shader sources to embed,
//! target platforms and optional engine modules. All results are sorted so
//! repeated builds visit paths in the same order.

use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding one subdirectory per target platform
pub const PLATFORMS_DIR: &str = "platforms";
/// Directory holding one subdirectory per engine module
pub const MODULES_DIR: &str = "modules";
/// File that marks a module directory as a buildable module
pub const MODULE_MARKER: &str = "config.py";

/// Recursively collect files under `base_path`.
///
/// A file is skipped when its path contains any of `excludes`. With an empty
/// `extensions` list every remaining file is returned, otherwise only files
/// ending in `.<ext>` for one of the extensions. Symlinked directories are
/// not followed. Unreadable directories are logged and skipped.
pub fn detect_files(base_path: &Path, excludes: &[String], extensions: &[String]) -> Vec<PathBuf> {
    fn recurse(dir: &Path, excludes: &[String], extensions: &[String], out: &mut Vec<PathBuf>) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Failed to read directory {:?}: {}", dir, e);
                return;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            let Ok(file_type) = entry.file_type() else {
                continue;
            };

            if file_type.is_dir() {
                recurse(&path, excludes, extensions, out);
            } else if file_type.is_symlink() && path.is_dir() {
                log::debug!("Not following directory symlink {:?}", path);
            } else if matches_filters(&path, excludes, extensions) {
                out.push(path);
            }
        }
    }

    let mut files = Vec::new();
    recurse(base_path, excludes, extensions, &mut files);
    files.sort();
    files
}

fn matches_filters(path: &Path, excludes: &[String], extensions: &[String]) -> bool {
    let path_str = path.to_string_lossy();

    if excludes.iter().any(|exclude| path_str.contains(exclude.as_str())) {
        return false;
    }

    extensions.is_empty()
        || extensions
            .iter()
            .any(|ext| path_str.ends_with(&format!(".{ext}")))
}

/// Names of the target platforms under `<root>/platforms`.
pub fn detect_platforms(root: &Path) -> Vec<String> {
    subdirectory_names(&root.join(PLATFORMS_DIR))
        .into_iter()
        .map(|(name, _)| name)
        .collect()
}

/// Names of the modules under `<root>/modules` that carry a `config.py`.
pub fn detect_modules(root: &Path) -> Vec<String> {
    subdirectory_names(&root.join(MODULES_DIR))
        .into_iter()
        .filter(|(name, path)| {
            let has_marker = path.join(MODULE_MARKER).is_file();
            if !has_marker {
                log::debug!("Skipping module {} without {}", name, MODULE_MARKER);
            }
            has_marker
        })
        .map(|(name, _)| name)
        .collect()
}

fn subdirectory_names(dir: &Path) -> Vec<(String, PathBuf)> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::debug!("No directory {:?}: {}", dir, e);
            return Vec::new();
        }
    };

    let mut names: Vec<(String, PathBuf)> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .filter_map(|path| {
            let name = path.file_name()?.to_str()?.to_string();
            Some((name, path))
        })
        .collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_matches_filters() {
        let excludes = strings(&[".gen.h"]);
        let extensions = strings(&["vert", "frag"]);

        assert!(matches_filters(Path::new("a/b.vert"), &excludes, &extensions));
        assert!(!matches_filters(Path::new("a/b.comp"), &excludes, &extensions));
        assert!(!matches_filters(
            Path::new("a/shader_b_vert.gen.h"),
            &excludes,
            &extensions
        ));
        // no dot before the extension
        assert!(!matches_filters(Path::new("a/overt"), &excludes, &extensions));
    }

    #[test]
    fn test_empty_extensions_accepts_everything() {
        assert!(matches_filters(Path::new("README"), &[], &[]));
        assert!(!matches_filters(Path::new("build/x"), &strings(&["build"]), &[]));
    }

    #[test]
    fn test_missing_directories_are_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(detect_platforms(dir.path()).is_empty());
        assert!(detect_modules(dir.path()).is_empty());
        assert!(detect_files(&dir.path().join("nope"), &[], &[]).is_empty());
    }
}
