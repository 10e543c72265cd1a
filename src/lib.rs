pub mod cli;
pub mod config;
pub mod encoding;
pub mod error;
pub mod extractor;
pub mod scanner;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, ExtractionConfig, FilterConfig, PathConfig};
pub use encoding::TextEncoding;
pub use error::{LocScanError, Result, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{
    ExtractionEvent, ExtractionProgress, ExtractionReport, ExtractionResult, FileStrings,
    LocalizationPattern, StringExtractor,
};
pub use scanner::{FileFilter, SourceFile, SourceScanner};
pub use ui::{OutputFormatter, OutputMode, ProgressAwareOutput, ProgressManager};

use scanner::source_scanner::{format_bytes, total_size};
use std::time::Instant;

/// Main library interface: scan, extract, write.
pub struct LocScan {
    config: Config,
    output_formatter: OutputFormatter,
    show_progress: bool,
}

impl LocScan {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        Self {
            config,
            output_formatter: OutputFormatter::new(output_mode, verbose, quiet),
            show_progress: output_mode == OutputMode::Human && !quiet,
        }
    }

    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        Ok(Self::new(
            config,
            cli_args.output_mode(),
            cli_args.verbose,
            cli_args.quiet,
        ))
    }

    /// Runs the full pipeline and overwrites the target file.
    pub fn run(&self) -> Result<ExtractionReport> {
        self.output_formatter.print_config_summary(&self.config);

        let start_time = Instant::now();

        let sources = self.scan_sources()?;
        self.config.ensure_target_dir()?;
        let (result, progress) = self.extract_strings(&sources)?;

        let target_file = self.config.target_file();
        self.output_formatter.start_operation("Writing output file");
        result.write_to(&target_file, self.config.extraction.encoding)?;

        let report = ExtractionReport::new(&self.config, &result, &progress, start_time.elapsed());
        self.output_formatter.print_extraction_report(&report);

        Ok(report)
    }

    /// Lists the files a real run would process. Nothing is read or written.
    pub fn dry_run(&self) -> Result<Vec<SourceFile>> {
        self.output_formatter.print_config_summary(&self.config);
        let sources = self.scan_sources()?;
        self.output_formatter.print_dry_run(&sources);
        Ok(sources)
    }

    fn scan_sources(&self) -> Result<Vec<SourceFile>> {
        self.output_formatter.start_operation("Scanning source files");

        let mut progress_manager = ProgressManager::new(self.show_progress);
        let _spinner = progress_manager.create_spinner("Scanning source files...");

        let scanner = SourceScanner::new(&self.config.filters);
        let scanned = scanner.scan_directory(&self.config.paths.source_dir);
        progress_manager.clear();

        let sources = scanned?;
        self.output_formatter.debug(&format!(
            "Found {} source files ({})",
            sources.len(),
            format_bytes(total_size(&sources))
        ));

        Ok(sources)
    }

    fn extract_strings(
        &self,
        sources: &[SourceFile],
    ) -> Result<(ExtractionResult, ExtractionProgress)> {
        self.output_formatter.start_operation("Extracting localization strings");

        let extractor = StringExtractor::new(
            self.config.extraction.identifiers.as_slice(),
            self.config.extraction.encoding,
        )?;
        self.output_formatter
            .debug(&format!("Pattern: {}", extractor.pattern().as_str()));

        let mut progress_manager = ProgressManager::new(self.show_progress);
        let file_progress = progress_manager.create_file_progress(sources.len() as u64);
        let output = ProgressAwareOutput::new(&self.output_formatter, Some(&progress_manager));
        let encoding_name = self.config.encoding_name();

        let extracted = extractor.extract_files(sources, &mut |event| match event {
            ExtractionEvent::Processing(file) => output.processing(&file.display_path()),
            ExtractionEvent::DecodeFailed(file) => {
                output.decode_failure(&file.source_path, encoding_name)
            }
            ExtractionEvent::Extracted { file, count } => {
                file_progress.inc(1);
                if count > 0 {
                    output.debug(&format!("{}: {} strings", file.display_path(), count));
                }
            }
        });

        match &extracted {
            Ok((_, progress)) => ui::progress::finish_progress_with_summary(
                &file_progress,
                &format!("Extracted {} strings", progress.strings_extracted),
                progress.elapsed(),
            ),
            Err(_) => file_progress.abandon(),
        }
        progress_manager.clear();

        extracted
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &LocScanError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &[u8]) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn quiet_scan(source: &Path, target: &Path) -> LocScan {
        let overrides = CliOverrides::new()
            .with_source(Some(source.to_path_buf()))
            .with_target(Some(target.to_path_buf()));
        let config = Config::resolve(&overrides).unwrap();
        LocScan::new(config, OutputMode::Plain, 0, true)
    }

    #[test]
    fn test_full_run() {
        let source = TempDir::new().unwrap();
        let target = TempDir::new().unwrap();
        let target_dir = target.path().join("Dict");

        write(source.path(), "Core.lua", br#"print(L["Hello"]) print(AL('World'))"#);
        write(source.path(), "Empty.lua", b"local x = 1");
        write(source.path(), "Locale/enUS.lua", br#"L["Skipped"] = true"#);
        write(source.path(), "Bad.lua", b"L[\"\xff\"]");
        write(source.path(), "modules/Bags.lua", br#"C["Bag"] C["Bag"]"#);

        let report = quiet_scan(source.path(), &target_dir).run().unwrap();

        assert_eq!(report.files_processed, 4);
        assert_eq!(report.files_with_strings, 2);
        assert_eq!(report.strings_extracted, 3);
        assert_eq!(report.decode_failures, vec!["Bad.lua"]);

        let written = fs::read_to_string(target_dir.join("localization_strings.lua")).unwrap();
        let bags = Path::new("modules").join("Bags.lua");
        let expected = format!(
            "--Core.lua\nL[\"Hello\"] = \"Hello\"\nAL[\"World\"] = \"World\"\n\n\
             --{}\nC[\"Bag\"] = \"Bag\"\n\n",
            bags.display()
        );
        assert_eq!(written, expected);
    }

    #[test]
    fn test_runs_are_reproducible() {
        let source = TempDir::new().unwrap();
        let target = TempDir::new().unwrap();

        for name in ["b.lua", "a.lua", "z/y.lua", "c/d.lua"] {
            write(source.path(), name, format!("L[\"{}\"]", name).as_bytes());
        }

        let locscan = quiet_scan(source.path(), target.path());
        let output = target.path().join("localization_strings.lua");

        locscan.run().unwrap();
        let first = fs::read(&output).unwrap();
        locscan.run().unwrap();
        let second = fs::read(&output).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_source_tree() {
        let source = TempDir::new().unwrap();
        let target = TempDir::new().unwrap();

        let report = quiet_scan(source.path(), target.path()).run().unwrap();

        assert_eq!(report.files_processed, 0);
        let output = target.path().join("localization_strings.lua");
        assert!(output.exists());
        assert!(fs::read(output).unwrap().is_empty());
    }

    #[test]
    fn test_missing_source_directory() {
        let temp = TempDir::new().unwrap();
        let target_dir = temp.path().join("Dict");
        let err = quiet_scan(&temp.path().join("missing"), &target_dir)
            .run()
            .unwrap_err();
        assert!(matches!(err, LocScanError::InvalidPath { .. }));
        assert_eq!(err.exit_code(), 3);
        assert!(!target_dir.exists());
    }

    #[test]
    fn test_dry_run_does_not_write() {
        let source = TempDir::new().unwrap();
        let target = TempDir::new().unwrap();
        let target_dir = target.path().join("Dict");
        write(source.path(), "Core.lua", br#"L["Hello"]"#);

        let sources = quiet_scan(source.path(), &target_dir).dry_run().unwrap();

        assert_eq!(sources.len(), 1);
        assert!(!target_dir.exists());
    }
}
