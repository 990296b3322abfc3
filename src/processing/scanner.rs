//! Expands a glob pattern under an input directory into matching files.

use std::path::{Path, PathBuf};
use globset::{GlobBuilder, GlobMatcher};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::utils::{ConverterError, ConverterResult};

/// A directory resolved to an absolute root, ready to be scanned.
#[derive(Debug, Clone)]
pub struct DirectoryScanner {
    root: PathBuf,
}

impl DirectoryScanner {
    /// Resolves `base` to its canonical absolute path.
    ///
    /// Fails with `MissingInput` when the directory is absent or unreadable.
    pub fn open(base: &Path) -> ConverterResult<Self> {
        let root = std::fs::canonicalize(base)
            .map_err(|_| ConverterError::missing_input(base))?;
        if !root.is_dir() {
            return Err(ConverterError::missing_input(base));
        }
        std::fs::read_dir(&root).map_err(|_| ConverterError::missing_input(base))?;

        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns every regular file whose root-relative path matches `pattern`, sorted.
    ///
    /// `*` stays within one directory, `**/` spans any depth, `{a,b}` alternates,
    /// and matching ignores case. Hidden entries are skipped. Symlinks to files
    /// are kept under their link path; symlinked directories are not descended.
    pub fn scan(&self, pattern: &str) -> ConverterResult<Vec<PathBuf>> {
        let matcher = compile_pattern(pattern)?;
        let mut files = Vec::new();

        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {e}");
                    continue;
                }
            };

            if !is_regular_file(&entry) {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            if matcher.is_match(relative) {
                files.push(entry.into_path());
            }
        }

        files.sort();
        debug!("Pattern '{}' matched {} files under {}", pattern, files.len(), self.root.display());
        Ok(files)
    }
}

/// Convenience wrapper: open `base` and scan it with `pattern`.
pub fn scan_directory(base: &Path, pattern: &str) -> ConverterResult<Vec<PathBuf>> {
    DirectoryScanner::open(base)?.scan(pattern)
}

fn compile_pattern(pattern: &str) -> ConverterResult<GlobMatcher> {
    let glob = GlobBuilder::new(pattern)
        .literal_separator(true)
        .case_insensitive(true)
        .build()?;
    Ok(glob.compile_matcher())
}

/// A file, or a symlink resolving to one.
fn is_regular_file(entry: &DirEntry) -> bool {
    if entry.path_is_symlink() {
        entry.path().is_file()
    } else {
        entry.file_type().is_file()
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::DEFAULT_PATTERN;
    use std::fs;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"x").unwrap();
    }

    fn relative_names(scanner: &DirectoryScanner, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|f| {
                f.strip_prefix(scanner.root())
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_default_pattern_matches_nested_rasters() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.png");
        touch(dir.path(), "sub/b.JPG");
        touch(dir.path(), "sub/deeper/c.webp");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "done.avif");

        let scanner = DirectoryScanner::open(dir.path()).unwrap();
        let files = scanner.scan(DEFAULT_PATTERN).unwrap();

        assert_eq!(
            relative_names(&scanner, &files),
            vec!["a.png", "sub/b.JPG", "sub/deeper/c.webp"]
        );
        assert!(files.iter().all(|f| f.is_absolute()));
    }

    #[test]
    fn test_single_star_stays_in_root() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "top.png");
        touch(dir.path(), "sub/nested.png");

        let scanner = DirectoryScanner::open(dir.path()).unwrap();
        let files = scanner.scan("*.png").unwrap();
        assert_eq!(relative_names(&scanner, &files), vec!["top.png"]);
    }

    #[test]
    fn test_hidden_entries_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), ".cache/thumb.png");
        touch(dir.path(), ".hidden.png");
        touch(dir.path(), "visible.png");

        let files = scan_directory(dir.path(), DEFAULT_PATTERN).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("visible.png"));
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "readme.md");
        assert!(scan_directory(dir.path(), DEFAULT_PATTERN).unwrap().is_empty());
    }

    #[test]
    fn test_missing_base_is_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = scan_directory(&dir.path().join("absent"), DEFAULT_PATTERN).unwrap_err();
        assert!(matches!(err, ConverterError::MissingInput(_)));
    }

    #[test]
    fn test_file_as_base_is_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.png");
        let err = DirectoryScanner::open(&dir.path().join("a.png")).unwrap_err();
        assert!(matches!(err, ConverterError::MissingInput(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_files_are_included() {
        let dir = tempfile::tempdir().unwrap();
        let elsewhere = tempfile::tempdir().unwrap();
        touch(dir.path(), "plain.png");
        touch(elsewhere.path(), "real.png");
        std::os::unix::fs::symlink(elsewhere.path().join("real.png"), dir.path().join("link.png")).unwrap();
        std::os::unix::fs::symlink(elsewhere.path().join("gone.png"), dir.path().join("dangling.png")).unwrap();

        let scanner = DirectoryScanner::open(dir.path()).unwrap();
        let files = scanner.scan(DEFAULT_PATTERN).unwrap();
        assert_eq!(relative_names(&scanner, &files), vec!["link.png", "plain.png"]);
    }

    #[test]
    fn test_invalid_pattern() {
        let dir = tempfile::tempdir().unwrap();
        let err = scan_directory(dir.path(), "**/*.{png").unwrap_err();
        assert!(matches!(err, ConverterError::Pattern(_)));
    }
}
