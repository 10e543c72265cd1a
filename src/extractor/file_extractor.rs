use crate::encoding::TextEncoding;
use crate::error::{LocScanError, Result};
use crate::extractor::output_writer::ExtractionResult;
use crate::extractor::pattern::{FileStrings, LocalizationPattern};
use crate::scanner::SourceFile;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct ExtractionProgress {
    pub files_processed: usize,
    pub files_with_strings: usize,
    pub strings_extracted: usize,
    pub start_time: Instant,
    pub decode_failures: Vec<String>,
}

impl ExtractionProgress {
    pub fn new() -> Self {
        Self {
            files_processed: 0,
            files_with_strings: 0,
            strings_extracted: 0,
            start_time: Instant::now(),
            decode_failures: Vec::new(),
        }
    }

    pub fn update_file(&mut self, strings_found: usize) {
        self.files_processed += 1;
        if strings_found > 0 {
            self.files_with_strings += 1;
            self.strings_extracted += strings_found;
        }
    }

    pub fn add_decode_failure<S: Into<String>>(&mut self, path: S) {
        self.decode_failures.push(path.into());
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

impl Default for ExtractionProgress {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome for one source file.
#[derive(Debug, Clone, PartialEq)]
pub enum FileExtraction {
    Strings(FileStrings),
    /// Bytes were not valid in the configured encoding.
    Undecodable,
}

/// Notifications emitted while walking the source list.
#[derive(Debug)]
pub enum ExtractionEvent<'a> {
    Processing(&'a SourceFile),
    Extracted { file: &'a SourceFile, count: usize },
    DecodeFailed(&'a SourceFile),
}

pub struct StringExtractor {
    pattern: LocalizationPattern,
    encoding: TextEncoding,
}

impl StringExtractor {
    pub fn new<S: AsRef<str>>(identifiers: &[S], encoding: TextEncoding) -> Result<Self> {
        Ok(Self {
            pattern: LocalizationPattern::new(identifiers)?,
            encoding,
        })
    }

    /// Reads and decodes one file, then runs the pattern over it.
    /// Only decode failures are absorbed; other I/O errors propagate.
    pub fn extract_file(&self, path: &Path) -> Result<FileExtraction> {
        let bytes = fs::read(path).map_err(|e| LocScanError::io(path, e))?;

        let content = match self.encoding.decode(&bytes) {
            Some(content) => content,
            None => return Ok(FileExtraction::Undecodable),
        };

        Ok(FileExtraction::Strings(self.pattern.extract(&content)))
    }

    pub fn extract_files(
        &self,
        sources: &[SourceFile],
        on_event: &mut dyn FnMut(ExtractionEvent<'_>),
    ) -> Result<(ExtractionResult, ExtractionProgress)> {
        let mut result = ExtractionResult::new();
        let mut progress = ExtractionProgress::new();

        for source in sources {
            on_event(ExtractionEvent::Processing(source));

            let strings = match self.extract_file(&source.source_path)? {
                FileExtraction::Strings(strings) => strings,
                FileExtraction::Undecodable => {
                    progress.add_decode_failure(source.display_path());
                    on_event(ExtractionEvent::DecodeFailed(source));
                    FileStrings::new()
                }
            };

            let count = strings.len();
            progress.update_file(count);
            on_event(ExtractionEvent::Extracted {
                file: source,
                count,
            });

            result.record(source.display_path(), strings);
        }

        Ok((result, progress))
    }

    pub fn pattern(&self) -> &LocalizationPattern {
        &self.pattern
    }
}
