use crate::config::Config;
use crate::encoding::TextEncoding;
use crate::error::{LocScanError, Result};
use crate::extractor::file_extractor::ExtractionProgress;
use crate::extractor::pattern::FileStrings;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Strings grouped by relative source path, in processing order.
#[derive(Debug, Clone, Default)]
pub struct ExtractionResult {
    files: IndexMap<String, FileStrings>,
}

impl ExtractionResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files without strings are not kept.
    pub fn record<S: Into<String>>(&mut self, relative_path: S, strings: FileStrings) {
        if !strings.is_empty() {
            self.files.insert(relative_path.into(), strings);
        }
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn string_count(&self) -> usize {
        self.files.values().map(IndexMap::len).sum()
    }

    pub fn file_paths(&self) -> Vec<&str> {
        self.files.keys().map(String::as_str).collect()
    }

    /// One block per file: a `--path` comment, `KEY = "VALUE"` lines, a blank line.
    pub fn render(&self) -> String {
        let mut out = String::new();

        for (file_path, strings) in &self.files {
            let _ = writeln!(out, "--{}", file_path);
            for (key, value) in strings {
                let _ = writeln!(out, "{} = \"{}\"", key, value);
            }
            out.push('\n');
        }

        out
    }

    /// Overwrites `target` with the rendered result in `encoding`.
    pub fn write_to(&self, target: &Path, encoding: TextEncoding) -> Result<()> {
        let bytes = encoding
            .encode(&self.render())
            .ok_or_else(|| LocScanError::Encode {
                path: target.display().to_string(),
                encoding: encoding.name().to_string(),
            })?;

        let file = fs::File::create(target).map_err(|e| LocScanError::io(target, e))?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(&bytes)
            .map_err(|e| LocScanError::io(target, e))?;
        writer.flush().map_err(|e| LocScanError::io(target, e))?;

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub source_dir: PathBuf,
    pub target_file: PathBuf,
    pub encoding: String,
    pub identifiers: Vec<String>,
    pub files_processed: usize,
    pub files_with_strings: usize,
    pub strings_extracted: usize,
    pub decode_failures: Vec<String>,
    pub elapsed_seconds: f64,
    pub completed_at: DateTime<Utc>,
}

impl ExtractionReport {
    pub fn new(
        config: &Config,
        result: &ExtractionResult,
        progress: &ExtractionProgress,
        elapsed: Duration,
    ) -> Self {
        Self {
            source_dir: config.paths.source_dir.clone(),
            target_file: config.target_file(),
            encoding: config.encoding_name().to_string(),
            identifiers: config.extraction.identifiers.clone(),
            files_processed: progress.files_processed,
            files_with_strings: result.file_count(),
            strings_extracted: result.string_count(),
            decode_failures: progress.decode_failures.clone(),
            elapsed_seconds: elapsed.as_secs_f64(),
            completed_at: Utc::now(),
        }
    }

    pub fn summary_line(&self) -> String {
        format!(
            "Processed {} files in {:.2} seconds.",
            self.files_processed, self.elapsed_seconds
        )
    }
}
