use crate::config::{CliOverrides, Config};
use crate::error::Result;
use crate::ui::OutputMode;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "locscan")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract localization strings from Lua addon sources")]
#[command(
    long_about = "locscan walks an addon source tree, collects every string passed to a \
                  localization table such as L[\"text\"] or AL('text'), and writes them, \
                  grouped by file, into <target>/localization_strings.lua."
)]
#[command(after_help = "EXAMPLES:\n  \
    locscan\n  \
    locscan --source ./MyAddon --target ./MyAddon/Dict\n  \
    locscan -s . -e Tests Media -i L,LOC\n  \
    locscan -s . --encoding windows-1252 --output-format json")]
pub struct Cli {
    /// Source directory to scan (defaults to the tool's directory)
    #[arg(short, long, env = "LOCSCAN_SOURCE")]
    pub source: Option<PathBuf>,

    /// Output directory (defaults to Dict next to the tool)
    #[arg(short, long, env = "LOCSCAN_TARGET")]
    pub target: Option<PathBuf>,

    /// Additional directory names to exclude
    #[arg(short, long, num_args = 1.., value_name = "DIR")]
    pub exclude: Option<Vec<String>>,

    /// Text encoding used to read sources and write the output [default: utf-8]
    #[arg(short = 'c', long, env = "LOCSCAN_ENCODING")]
    pub encoding: Option<String>,

    /// Comma-separated localization identifiers [default: L,AL,C]
    #[arg(short, long, env = "LOCSCAN_IDENTIFIERS")]
    pub identifiers: Option<String>,

    /// File extension to scan [default: lua]
    #[arg(long)]
    pub extension: Option<String>,

    /// Console output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (only errors are printed)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// List the files that would be scanned without extracting anything
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl From<OutputFormat> for OutputMode {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        }
    }
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        Config::resolve(&self.create_cli_overrides())
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_source(self.source.clone())
            .with_target(self.target.clone())
            .with_exclude(self.exclude.clone())
            .with_encoding(self.encoding.clone())
            .with_identifiers(self.identifiers.clone())
            .with_extension(self.extension.clone())
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_format.into()
    }
}
