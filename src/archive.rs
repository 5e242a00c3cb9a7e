//! Bulk export of a finished batch as a single zip archive.
//!
//! Every produced file from every group goes into the archive root under
//! [`archive_entry_name`]. Two files that map to the same entry name collapse
//! into one entry holding the later file's bytes, so an archive never carries
//! duplicate names.

use crate::naming::archive_entry_name;
use crate::types::ResultGroup;
use std::io::{Cursor, Write};
use thiserror::Error;
use tracing::debug;
use zip::write::SimpleFileOptions;

/// File name used when no other name is configured.
pub const DEFAULT_ARCHIVE_NAME: &str = "resized_img.zip";

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Build a deflated zip archive of every file in `groups`.
pub fn export_zip(groups: &[ResultGroup]) -> Result<Vec<u8>, ArchiveError> {
    let entries = collect_entries(groups);

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    for (name, bytes) in &entries {
        writer.start_file(name.as_str(), options)?;
        writer.write_all(bytes)?;
    }
    let bytes = writer.finish()?.into_inner();
    debug!(entries = entries.len(), bytes = bytes.len(), "archive written");
    Ok(bytes)
}

/// Entry names with their contents, first-seen order, later bytes winning.
fn collect_entries(groups: &[ResultGroup]) -> Vec<(String, &[u8])> {
    let mut entries: Vec<(String, &[u8])> = Vec::new();
    for file in groups.iter().flat_map(|g| g.files.iter()) {
        let name = archive_entry_name(&file.name);
        match entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = file.bytes.as_slice(),
            None => entries.push((name, file.bytes.as_slice())),
        }
    }
    entries
}
