//! ZIP packaging of encoded datasets

use crate::domain::{CadreError, EncodedBlob, Result};
use std::collections::HashSet;
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Bundles several encoded datasets into one deflate-compressed archive
#[derive(Debug, Clone, Copy, Default)]
pub struct ArchivePackager;

impl ArchivePackager {
    pub fn new() -> Self {
        Self
    }

    /// Pack `blobs` as `<kind>.csv` members, in the given order
    ///
    /// # Errors
    ///
    /// Returns [`CadreError::Archive`] on a duplicate member name or if the
    /// archive cannot be written.
    pub fn pack(&self, blobs: &[EncodedBlob]) -> Result<Vec<u8>> {
        let mut seen = HashSet::new();
        if let Some(duplicate) = blobs.iter().find(|blob| !seen.insert(blob.kind)) {
            return Err(CadreError::Archive(format!(
                "duplicate archive member '{}'",
                duplicate.kind.member_name()
            )));
        }

        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

        for blob in blobs {
            zip.start_file(blob.kind.member_name(), options)?;
            zip.write_all(blob.text.as_bytes())
                .map_err(|e| CadreError::Archive(format!("{}: {e}", blob.kind.member_name())))?;
        }

        let bytes = zip.finish()?.into_inner();

        tracing::debug!(members = blobs.len(), bytes = bytes.len(), "Archive packed");

        Ok(bytes)
    }
}
