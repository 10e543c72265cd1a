use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8, WINDOWS_1252};
use std::borrow::Cow;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Text encoding used both to read sources and to write the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// Seven-bit ASCII. Any byte above 0x7F is undecodable.
    Ascii,
    /// UTF-8 that skips a leading BOM on read and writes one.
    Utf8Sig,
    Standard(&'static Encoding),
}

impl TextEncoding {
    /// Resolves a label. Common Python codec names are accepted alongside
    /// the WHATWG labels known to encoding_rs.
    pub fn for_label(label: &str) -> Option<Self> {
        let label = label.trim();
        let normalized = label.to_ascii_lowercase().replace('_', "-");

        match normalized.as_str() {
            "ascii" | "us-ascii" | "646" => Some(Self::Ascii),
            "utf-8-sig" | "utf8-sig" => Some(Self::Utf8Sig),
            "latin-1" | "cp1252" => Some(Self::Standard(WINDOWS_1252)),
            "utf-16-le" => Some(Self::Standard(UTF_16LE)),
            "utf-16-be" => Some(Self::Standard(UTF_16BE)),
            _ => Encoding::for_label_no_replacement(label.as_bytes())
                .or_else(|| Encoding::for_label_no_replacement(normalized.as_bytes()))
                .map(Self::Standard),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Ascii => "ascii",
            Self::Utf8Sig => "utf-8-sig",
            Self::Standard(encoding) => encoding.name(),
        }
    }

    /// Strict decode; `None` when the bytes are not valid in this encoding.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
        match self {
            Self::Ascii => {
                if !bytes.is_ascii() {
                    return None;
                }
                std::str::from_utf8(bytes).ok().map(Cow::Borrowed)
            }
            Self::Utf8Sig => {
                let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                UTF_8.decode_without_bom_handling_and_without_replacement(bytes)
            }
            Self::Standard(encoding) => {
                encoding.decode_without_bom_handling_and_without_replacement(bytes)
            }
        }
    }

    /// `None` when `text` holds a character the encoding cannot represent.
    pub fn encode(&self, text: &str) -> Option<Vec<u8>> {
        match self {
            Self::Ascii => text.is_ascii().then(|| text.as_bytes().to_vec()),
            Self::Utf8Sig => {
                let mut bytes = Vec::with_capacity(UTF8_BOM.len() + text.len());
                bytes.extend_from_slice(UTF8_BOM);
                bytes.extend_from_slice(text.as_bytes());
                Some(bytes)
            }
            // encoding_rs only encodes UTF-16 as UTF-8.
            Self::Standard(encoding) if *encoding == UTF_16LE => {
                Some(text.encode_utf16().flat_map(u16::to_le_bytes).collect())
            }
            Self::Standard(encoding) if *encoding == UTF_16BE => {
                Some(text.encode_utf16().flat_map(u16::to_be_bytes).collect())
            }
            Self::Standard(encoding) => {
                let (bytes, _, unmappable) = encoding.encode(text);
                (!unmappable).then(|| bytes.into_owned())
            }
        }
    }
}

impl Default for TextEncoding {
    fn default() -> Self {
        Self::Standard(UTF_8)
    }
}

impl From<&'static Encoding> for TextEncoding {
    fn from(encoding: &'static Encoding) -> Self {
        Self::Standard(encoding)
    }
}
