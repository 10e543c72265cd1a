use crate::config::FilterConfig;
use crate::error::{LocScanError, Result};
use crate::scanner::file_filter::FileFilter;
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Clone)]
pub struct SourceFile {
    pub source_path: PathBuf,
    pub relative_path: PathBuf,
    pub size: u64,
}

impl SourceFile {
    pub fn new(source_path: PathBuf, relative_path: PathBuf, size: u64) -> Self {
        Self {
            source_path,
            relative_path,
            size,
        }
    }

    /// Path relative to the scan root, with the platform separator.
    pub fn display_path(&self) -> String {
        self.relative_path.display().to_string()
    }
}

pub struct SourceScanner {
    filter: FileFilter,
}

impl SourceScanner {
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            filter: FileFilter::new(config),
        }
    }

    /// Collects every matching, non-excluded file under `root`, sorted by
    /// relative path. Traversal errors abort the scan.
    pub fn scan_directory<P: AsRef<Path>>(&self, root: P) -> Result<Vec<SourceFile>> {
        let root_path = root.as_ref();

        if !root_path.exists() {
            return Err(LocScanError::InvalidPath {
                path: format!("Source directory does not exist: {}", root_path.display()),
            });
        }

        if !root_path.is_dir() {
            return Err(LocScanError::InvalidPath {
                path: format!("{} is not a directory", root_path.display()),
            });
        }

        let walker = WalkDir::new(root_path)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| self.should_traverse(e));

        let mut sources = Vec::new();
        for entry in walker {
            let entry = entry?;

            if is_file_entry(&entry) {
                if let Some(source) = self.process_file(&entry, root_path)? {
                    sources.push(source);
                }
            }
        }

        sources.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

        Ok(sources)
    }

    fn should_traverse(&self, entry: &DirEntry) -> bool {
        // The root itself is never subject to exclusion.
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return true;
        }

        self.filter.should_traverse_directory(entry.path())
    }

    fn process_file(&self, entry: &DirEntry, root_path: &Path) -> Result<Option<SourceFile>> {
        let path = entry.path();

        if !self.filter.is_source_file(path) {
            return Ok(None);
        }

        let relative_path = calculate_relative_path(path, root_path)?;
        if self.filter.is_excluded(&relative_path) {
            return Ok(None);
        }

        let size = if entry.path_is_symlink() {
            fs::metadata(path).map_err(|e| LocScanError::io(path, e))?.len()
        } else {
            entry.metadata()?.len()
        };

        Ok(Some(SourceFile::new(path.to_path_buf(), relative_path, size)))
    }
}

/// Regular files, plus symlinks that resolve to one. Directory links are not followed.
fn is_file_entry(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

fn calculate_relative_path(file_path: &Path, root_path: &Path) -> Result<PathBuf> {
    let relative = file_path
        .strip_prefix(root_path)
        .map_err(|_| LocScanError::InvalidPath {
            path: format!(
                "Cannot calculate relative path for {} from root {}",
                file_path.display(),
                root_path.display()
            ),
        })?;

    if relative
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        return Err(LocScanError::InvalidPath {
            path: format!(
                "Path contains parent directory references: {}",
                relative.display()
            ),
        });
    }

    Ok(relative.to_path_buf())
}

pub fn total_size(sources: &[SourceFile]) -> u64 {
    sources.iter().map(|s| s.size).sum()
}

pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}
