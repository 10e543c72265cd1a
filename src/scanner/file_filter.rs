use crate::config::FilterConfig;
use std::collections::BTreeSet;
use std::path::{Component, Path};

pub struct FileFilter {
    extension: String,
    exclude_dirs: BTreeSet<String>,
}

impl FileFilter {
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            extension: config.extension.clone(),
            exclude_dirs: config
                .exclude_dirs
                .iter()
                .map(|dir| dir.to_lowercase())
                .collect(),
        }
    }

    /// Extension comparison is exact: `Core.LUA` is not a `lua` file.
    pub fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| ext == self.extension)
    }

    pub fn is_excluded_name(&self, name: &str) -> bool {
        self.exclude_dirs.contains(&name.to_lowercase())
    }

    /// True when any segment of `relative_path` equals an excluded name.
    /// Segments are compared whole; `library` does not match `lib`.
    pub fn is_excluded(&self, relative_path: &Path) -> bool {
        relative_path.components().any(|component| match component {
            Component::Normal(segment) => self.is_excluded_name(&segment.to_string_lossy()),
            _ => false,
        })
    }

    pub fn should_traverse_directory(&self, path: &Path) -> bool {
        match path.file_name() {
            Some(dir_name) => !self.is_excluded_name(&dir_name.to_string_lossy()),
            None => true,
        }
    }
}
