pub mod file_extractor;
pub mod output_writer;
pub mod pattern;

pub use file_extractor::{ExtractionEvent, ExtractionProgress, FileExtraction, StringExtractor};
pub use output_writer::{ExtractionReport, ExtractionResult};
pub use pattern::{composite_key, FileStrings, LocalizationPattern};
