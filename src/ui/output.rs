use crate::config::Config;
use crate::error::{LocScanError, UserFriendlyError};
use crate::extractor::ExtractionReport;
use crate::scanner::SourceFile;
use console::{style, Emoji, Term};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

// Emojis with text fallbacks
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");
static ROCKET: Emoji = Emoji("🚀 ", "> ");
static SPARKLES: Emoji = Emoji("✨ ", "* ");

pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => Term::stdout().features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn warning(&self, message: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Warning, message),
                OutputMode::Json => self.print_json_message("warning", message),
                OutputMode::Plain => println!("WARNING: {}", message),
            }
        }
    }

    pub fn debug(&self, message: &str) {
        if self.should_show_message(2) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("  {}", style(message).dim());
                    } else {
                        println!("  DEBUG: {}", message);
                    }
                }
                OutputMode::Json => self.print_json_message("debug", message),
                OutputMode::Plain => println!("DEBUG: {}", message),
            }
        }
    }

    pub fn start_operation(&self, operation: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("{}{}", ROCKET, style(operation).bold());
                    } else {
                        println!("> {}", operation);
                    }
                }
                OutputMode::Json => self.print_json_message("operation_start", operation),
                OutputMode::Plain => println!("STARTING: {}", operation),
            }
        }
    }

    pub fn print_config_summary(&self, config: &Config) {
        if self.quiet {
            return;
        }

        let source_dir = config.paths.source_dir.display().to_string();
        let target_file = config.target_file().display().to_string();
        let excluded = config.excluded_dirs_display();
        let identifiers = config.extraction.identifiers.join(", ");

        match self.mode {
            OutputMode::Json => {
                self.print_json_object(&serde_json::json!({
                    "type": "config",
                    "source_dir": source_dir,
                    "target_file": target_file,
                    "excluded_dirs": config.filters.exclude_dirs,
                    "identifiers": config.extraction.identifiers,
                    "encoding": config.encoding_name(),
                    "extension": config.filters.extension,
                }));
            }
            _ => {
                self.print_field("Source directory", &source_dir);
                self.print_field("Target file", &target_file);
                self.print_field("Excluded directories", &excluded);
                self.print_field("Identifiers", &identifiers);
                self.print_field("Encoding", config.encoding_name());
                if self.verbose_level > 0 {
                    self.print_field("Extension", &config.filters.extension);
                }
                println!();
            }
        }
    }

    /// Per-file progress line.
    pub fn processing(&self, relative_path: &str) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human | OutputMode::Plain => println!("Processing: {}", relative_path),
            OutputMode::Json => self.print_json_object(&serde_json::json!({
                "type": "processing",
                "file": relative_path,
            })),
        }
    }

    /// Reported even in quiet mode; the run continues.
    pub fn decode_failure(&self, path: &Path, encoding: &str) {
        let message = format!(
            "Unable to decode {} with {} encoding.",
            path.display(),
            encoding
        );

        match self.mode {
            OutputMode::Human if self.use_colors => {
                println!("{}{}", CROSS, style(format!("Error: {}", message)).red())
            }
            OutputMode::Human | OutputMode::Plain => println!("Error: {}", message),
            OutputMode::Json => self.print_json_object(&serde_json::json!({
                "type": "decode_error",
                "file": path.display().to_string(),
                "encoding": encoding,
                "message": message,
            })),
        }
    }

    // User-friendly error handling
    pub fn print_user_friendly_error(&self, error: &LocScanError) {
        let user_message = error.user_message();
        self.error(&user_message);

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        eprintln!(
                            "{}{}",
                            INFO,
                            style(format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        eprintln!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => {
                    self.print_json_object(&serde_json::json!({
                        "type": "suggestion",
                        "message": suggestion
                    }));
                }
                OutputMode::Plain => {
                    eprintln!("SUGGESTION: {}", suggestion);
                }
            }
        }
    }

    pub fn print_extraction_report(&self, report: &ExtractionReport) {
        match self.mode {
            OutputMode::Human => self.print_human_report(report),
            OutputMode::Json => {
                let json_output =
                    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string());
                println!("{}", json_output);
            }
            OutputMode::Plain => self.print_plain_report(report),
        }
    }

    pub fn print_dry_run(&self, sources: &[SourceFile]) {
        match self.mode {
            OutputMode::Json => {
                let files: Vec<String> = sources.iter().map(SourceFile::display_path).collect();
                self.print_json_object(&serde_json::json!({
                    "type": "dry_run",
                    "files": files,
                    "file_count": sources.len(),
                }));
            }
            _ => {
                self.print_header("Dry run");
                for source in sources {
                    println!("Would process: {}", source.display_path());
                }
                println!();
                println!("{} files would be processed.", sources.len());
            }
        }
    }

    pub fn print_header(&self, title: &str) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    println!("{}{}", SPARKLES, style(title).bold().cyan());
                } else {
                    println!("=== {} ===", title);
                }
            }
            OutputMode::Json => {
                self.print_json_object(&serde_json::json!({
                    "type": "header",
                    "title": title
                }));
            }
            OutputMode::Plain => {
                println!("=== {} ===", title);
            }
        }
    }

    // Private helper methods
    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn print_field(&self, label: &str, value: &str) {
        if self.use_colors {
            println!("{}: {}", style(label).bold(), value);
        } else {
            println!("{}: {}", label, value);
        }
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        #[allow(clippy::type_complexity)]
        let (emoji, color_fn): (Emoji, Box<dyn Fn(&str) -> console::StyledObject<&str>>) =
            match msg_type {
                MessageType::Error => (CROSS, Box::new(|msg| style(msg).red().bold())),
                MessageType::Warning => (WARNING, Box::new(|msg| style(msg).yellow().bold())),
            };

        if self.use_colors {
            match msg_type {
                MessageType::Error => eprintln!("{}{}", emoji, color_fn(message)),
                _ => println!("{}{}", emoji, color_fn(message)),
            }
        } else {
            let prefix = match msg_type {
                MessageType::Error => "✗",
                MessageType::Warning => "!",
            };

            match msg_type {
                MessageType::Error => eprintln!("{} {}", prefix, message),
                _ => println!("{} {}", prefix, message),
            }
        }
    }

    fn print_json_message(&self, level: &str, message: &str) {
        self.print_json_object(&serde_json::json!({
            "type": "message",
            "level": level,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }

    fn print_human_report(&self, report: &ExtractionReport) {
        if self.quiet {
            return;
        }

        println!();
        if self.use_colors {
            println!("{}", style(report.summary_line()).green().bold());
        } else {
            println!("{}", report.summary_line());
        }
        println!("Extracted strings saved to: {}", report.target_file.display());

        if self.verbose_level > 0 {
            println!(
                "  {} strings from {} files",
                report.strings_extracted, report.files_with_strings
            );
        }

        if !report.decode_failures.is_empty() {
            self.warning(&format!(
                "{} files could not be decoded as {}",
                report.decode_failures.len(),
                report.encoding
            ));
        }
    }

    fn print_plain_report(&self, report: &ExtractionReport) {
        if self.quiet {
            return;
        }

        println!();
        println!("{}", report.summary_line());
        println!("Extracted strings saved to: {}", report.target_file.display());
        if !report.decode_failures.is_empty() {
            self.warning(&format!(
                "{} files could not be decoded as {}",
                report.decode_failures.len(),
                report.encoding
            ));
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Error,
    Warning,
}

/// Routes messages around an active progress bar so lines are not torn.
pub struct ProgressAwareOutput<'a> {
    formatter: &'a OutputFormatter,
    progress_manager: Option<&'a crate::ui::ProgressManager>,
}

impl<'a> ProgressAwareOutput<'a> {
    pub fn new(
        formatter: &'a OutputFormatter,
        progress_manager: Option<&'a crate::ui::ProgressManager>,
    ) -> Self {
        Self {
            formatter,
            progress_manager,
        }
    }

    pub fn suspend_and_print<F>(&self, f: F)
    where
        F: FnOnce(&OutputFormatter),
    {
        if let Some(pm) = self.progress_manager {
            pm.suspend(|| f(self.formatter));
        } else {
            f(self.formatter);
        }
    }

    pub fn processing(&self, relative_path: &str) {
        self.suspend_and_print(|f| f.processing(relative_path));
    }

    pub fn decode_failure(&self, path: &Path, encoding: &str) {
        self.suspend_and_print(|f| f.decode_failure(path, encoding));
    }

    pub fn debug(&self, message: &str) {
        self.suspend_and_print(|f| f.debug(message));
    }
}
