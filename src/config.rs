use crate::encoding::TextEncoding;
use crate::error::{LocScanError, Result};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Name of the file written into the target directory.
pub const TARGET_FILE_NAME: &str = "localization_strings.lua";
pub const DEFAULT_TARGET_SUBDIR: &str = "Dict";
pub const DEFAULT_IDENTIFIERS: &str = "L,AL,C";
pub const DEFAULT_ENCODING: &str = "utf-8";
pub const DEFAULT_EXTENSION: &str = "lua";

const DEFAULT_EXCLUDED_DIRS: [&str; 9] = [
    "language", "lang", "local", "locales", "locale", "locals", "dict", "lib", "libs",
];

#[derive(Debug, Clone)]
pub struct Config {
    pub paths: PathConfig,
    pub filters: FilterConfig,
    pub extraction: ExtractionConfig,
}

#[derive(Debug, Clone)]
pub struct PathConfig {
    pub source_dir: PathBuf,
    pub target_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct FilterConfig {
    pub extension: String,
    /// Lowercased directory names; sorted so summaries are stable.
    pub exclude_dirs: BTreeSet<String>,
}

#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    pub identifiers: Vec<String>,
    pub encoding: TextEncoding,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: PathConfig::default(),
            filters: FilterConfig::default(),
            extraction: ExtractionConfig::default(),
        }
    }
}

impl Default for PathConfig {
    fn default() -> Self {
        let tool_dir = tool_directory();
        Self {
            target_dir: tool_dir.join(DEFAULT_TARGET_SUBDIR),
            source_dir: tool_dir,
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            exclude_dirs: default_excluded_dirs(),
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            identifiers: parse_identifiers(DEFAULT_IDENTIFIERS),
            encoding: TextEncoding::default(),
        }
    }
}

impl Config {
    /// Defaults, then overrides, then validation.
    pub fn resolve(overrides: &CliOverrides) -> Result<Self> {
        let mut config = Self::default();
        config.merge_with_cli_args(overrides)?;
        config.validate()?;
        Ok(config)
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) -> Result<()> {
        if let Some(ref source) = cli_args.source {
            self.paths.source_dir = absolutize(source)?;
        }

        if let Some(ref target) = cli_args.target {
            self.paths.target_dir = absolutize(target)?;
        }

        if let Some(ref exclude) = cli_args.exclude {
            self.filters
                .exclude_dirs
                .extend(exclude.iter().map(|dir| dir.to_lowercase()));
        }

        if let Some(ref encoding) = cli_args.encoding {
            self.extraction.encoding = resolve_encoding(encoding)?;
        }

        if let Some(ref identifiers) = cli_args.identifiers {
            self.extraction.identifiers = parse_identifiers(identifiers);
        }

        if let Some(ref extension) = cli_args.extension {
            self.filters.extension = extension.trim_start_matches('.').to_string();
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.extraction.identifiers.is_empty() {
            return Err(LocScanError::config(
                "At least one identifier must be specified",
            ));
        }

        if self.filters.extension.is_empty() {
            return Err(LocScanError::config("File extension must not be empty"));
        }

        Ok(())
    }

    pub fn target_file(&self) -> PathBuf {
        self.paths.target_dir.join(TARGET_FILE_NAME)
    }

    /// Creates the target directory and its parents. An existing directory is fine.
    pub fn ensure_target_dir(&self) -> Result<()> {
        let dir = &self.paths.target_dir;
        std::fs::create_dir_all(dir).map_err(|e| LocScanError::io(dir, e))
    }

    pub fn encoding_name(&self) -> &'static str {
        self.extraction.encoding.name()
    }

    pub fn excluded_dirs_display(&self) -> String {
        self.filters
            .exclude_dirs
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub source: Option<PathBuf>,
    pub target: Option<PathBuf>,
    pub exclude: Option<Vec<String>>,
    pub encoding: Option<String>,
    pub identifiers: Option<String>,
    pub extension: Option<String>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(mut self, source: Option<PathBuf>) -> Self {
        self.source = source;
        self
    }

    pub fn with_target(mut self, target: Option<PathBuf>) -> Self {
        self.target = target;
        self
    }

    pub fn with_exclude(mut self, exclude: Option<Vec<String>>) -> Self {
        self.exclude = exclude;
        self
    }

    pub fn with_encoding(mut self, encoding: Option<String>) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_identifiers(mut self, identifiers: Option<String>) -> Self {
        self.identifiers = identifiers;
        self
    }

    pub fn with_extension(mut self, extension: Option<String>) -> Self {
        self.extension = extension;
        self
    }
}

pub fn default_excluded_dirs() -> BTreeSet<String> {
    DEFAULT_EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect()
}

pub fn parse_identifiers(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

pub fn resolve_encoding(label: &str) -> Result<TextEncoding> {
    TextEncoding::for_label(label).ok_or_else(|| {
        LocScanError::config(format!("Unknown text encoding: {}", label))
    })
}

fn absolutize(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path).map_err(|e| LocScanError::io(path, e))
}

/// Directory holding the running executable.
fn tool_directory() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}
