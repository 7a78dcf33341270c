//! Tabular text encoding
//!
//! Renders a [`TabularBlob`] as RFC 4180 CSV: a field is quoted when it
//! contains the delimiter, a quote, CR or LF, and embedded quotes are
//! doubled. The header row is always written.

use crate::config::{ExportConfig, LineTerminator};
use crate::domain::{CadreError, EncodedBlob, Result, TabularBlob};
use csv::{QuoteStyle, Terminator, WriterBuilder};

const UTF8_BOM: &str = "\u{feff}";

/// CSV dialect fixed for the lifetime of one export call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderOptions {
    pub delimiter: u8,
    pub line_terminator: LineTerminator,
    pub utf8_bom: bool,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            line_terminator: LineTerminator::Crlf,
            utf8_bom: false,
        }
    }
}

impl EncoderOptions {
    /// Dialect from the `[export]` section
    ///
    /// # Errors
    ///
    /// Returns an error if the delimiter is not a single-byte character.
    pub fn from_config(config: &ExportConfig) -> Result<Self> {
        let delimiter = u8::try_from(config.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                CadreError::Configuration(format!(
                    "export.delimiter must be an ASCII character, got {:?}",
                    config.delimiter
                ))
            })?;

        Ok(Self {
            delimiter,
            line_terminator: config.line_terminator,
            utf8_bom: config.utf8_bom,
        })
    }
}

/// Encodes blobs to CSV text
#[derive(Debug, Clone, Default)]
pub struct TabularEncoder {
    options: EncoderOptions,
}

impl TabularEncoder {
    pub fn new(options: EncoderOptions) -> Self {
        Self { options }
    }

    /// Encode one blob
    ///
    /// # Errors
    ///
    /// Returns [`CadreError::Encoding`] if a record cannot be written.
    pub fn encode(&self, blob: &TabularBlob) -> Result<EncodedBlob> {
        let terminator = match self.options.line_terminator {
            LineTerminator::Crlf => Terminator::CRLF,
            LineTerminator::Lf => Terminator::Any(b'\n'),
        };

        let mut writer = WriterBuilder::new()
            .delimiter(self.options.delimiter)
            .terminator(terminator)
            .quote_style(QuoteStyle::Necessary)
            .has_headers(false)
            .from_writer(Vec::new());

        writer.write_record(blob.header())?;
        for row in blob.rows() {
            writer.write_record(row)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| CadreError::Encoding(format!("{} dataset: {}", blob.kind(), e.error())))?;
        let body = String::from_utf8(bytes)
            .map_err(|e| CadreError::Encoding(format!("{} dataset: {e}", blob.kind())))?;

        let text = if self.options.utf8_bom {
            format!("{UTF8_BOM}{body}")
        } else {
            body
        };

        Ok(EncodedBlob {
            kind: blob.kind(),
            text,
        })
    }
}
