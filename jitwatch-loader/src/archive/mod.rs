//! Read-only access to ZIP archives (jars, source zips).
//!
//! Only what source lookup needs is supported: the central directory of a
//! single-disk archive, with stored or deflated entries.

mod entry;
mod eocd;

use std::path::Path;

use thiserror::Error;

use crate::error::{LoadError, Result};
use entry::CentralEntry;
use eocd::EndOfCentralDirectory;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Archive too small: {0} bytes")]
    TooSmall(usize),

    #[error("No end of central directory record")]
    MissingEndOfCentralDirectory,

    #[error("Record at offset {0:#x} is truncated")]
    Truncated(usize),

    #[error("Bad record signature at offset {0:#x}")]
    BadSignature(usize),

    #[error("ZIP64 archives are not supported")]
    Zip64Unsupported,

    #[error("Multi-disk archives are not supported")]
    MultiDiskUnsupported,

    #[error("Entry {0} is encrypted")]
    Encrypted(String),

    #[error("Entry {0} uses unsupported compression method {1}")]
    UnsupportedCompression(String, u16),

    #[error("Failed to inflate entry {0}: {1}")]
    Inflate(String, String),

    #[error("Entry {0} does not match its recorded size")]
    SizeMismatch(String),

    #[error("Entry {0} failed its CRC check")]
    CrcMismatch(String),
}

pub(crate) fn read_u16(data: &[u8], offset: usize) -> std::result::Result<u16, ArchiveError> {
    data.get(offset..offset + 2)
        .map(|b| u16::from_le_bytes([b[0], b[1]]))
        .ok_or(ArchiveError::Truncated(offset))
}

pub(crate) fn read_u32(data: &[u8], offset: usize) -> std::result::Result<u32, ArchiveError> {
    data.get(offset..offset + 4)
        .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .ok_or(ArchiveError::Truncated(offset))
}

/// An open archive, held in memory until the value is dropped.
pub struct Archive {
    data: Vec<u8>,
    entries: Vec<CentralEntry>,
}

impl Archive {
    /// Open and index an archive.
    pub fn open(path: &Path) -> std::result::Result<Self, ArchiveError> {
        let data = std::fs::read(path)?;
        if data.len() < EndOfCentralDirectory::SIZE {
            return Err(ArchiveError::TooSmall(data.len()));
        }

        let entries = Self::parse_directory(&data)?;
        Ok(Self { data, entries })
    }

    fn parse_directory(data: &[u8]) -> std::result::Result<Vec<CentralEntry>, ArchiveError> {
        let eocd = EndOfCentralDirectory::find(data)?;
        let start = eocd.cd_offset as usize;
        if start + eocd.cd_size as usize > data.len() {
            return Err(ArchiveError::Truncated(start));
        }

        let mut entries = Vec::with_capacity(eocd.total_entries as usize);
        let mut offset = start;
        for _ in 0..eocd.total_entries {
            let (entry, next) = CentralEntry::parse(data, offset)?;
            entries.push(entry);
            offset = next;
        }
        Ok(entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry names in central directory order, directories included.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entry(name).is_some()
    }

    fn entry(&self, name: &str) -> Option<&CentralEntry> {
        self.entries.iter().find(|e| e.name == name && !e.is_dir())
    }

    /// Contents of the entry called exactly `name`, or `None` if the archive
    /// has no such file entry.
    pub fn read(&self, name: &str) -> std::result::Result<Option<Vec<u8>>, ArchiveError> {
        match self.entry(name) {
            Some(entry) => entry.read(&self.data).map(Some),
            None => Ok(None),
        }
    }
}

impl std::fmt::Debug for Archive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Archive")
            .field("size", &self.data.len())
            .field("entries", &self.entries.len())
            .finish()
    }
}

/// Terminate every line with a single `\n`, whether the input used `\n`,
/// `\r\n` or `\r`. A final unterminated line gains a terminator; empty input
/// stays empty.
pub fn normalize_newlines(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 1);
    let mut open_line = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                chars.next_if_eq(&'\n');
                out.push('\n');
                open_line = false;
            }
            '\n' => {
                out.push('\n');
                open_line = false;
            }
            _ => {
                out.push(c);
                open_line = true;
            }
        }
    }

    if open_line {
        out.push('\n');
    }
    out
}

pub(crate) fn try_read_archive_entry(path: &Path, name: &str) -> Result<Option<String>> {
    let archive_err = |source| LoadError::Archive {
        path: path.to_owned(),
        source,
    };

    let archive = Archive::open(path).map_err(archive_err)?;
    let Some(bytes) = archive.read(name).map_err(archive_err)? else {
        log::trace!("{name} not in {}", path.display());
        return Ok(None);
    };

    let text = String::from_utf8(bytes).map_err(|_| LoadError::EntryNotUtf8 {
        path: path.to_owned(),
        entry: name.to_owned(),
    })?;
    Ok(Some(normalize_newlines(&text)))
}

/// Read the text entry called exactly `name` from the archive at `path`,
/// with line endings normalized to `\n`.
///
/// Returns `None` when the entry is absent; failures to open or decode the
/// archive are logged and also yield `None`.
pub fn read_archive_entry(path: impl AsRef<Path>, name: &str) -> Option<String> {
    crate::settle(try_read_archive_entry(path.as_ref(), name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_newlines() {
        assert_eq!(normalize_newlines(""), "");
        assert_eq!(normalize_newlines("a"), "a\n");
        assert_eq!(normalize_newlines("a\n"), "a\n");
        assert_eq!(normalize_newlines("a\r\nb\r\n"), "a\nb\n");
        assert_eq!(normalize_newlines("a\rb"), "a\nb\n");
        assert_eq!(normalize_newlines("a\n\r\n\nb"), "a\n\n\nb\n");
        assert_eq!(normalize_newlines("\r\r\n"), "\n\n");
    }

    #[test]
    fn test_read_le() {
        let data = [0x50, 0x4b, 0x05, 0x06, 0x01];
        assert_eq!(read_u32(&data, 0).unwrap(), eocd::SIGNATURE);
        assert_eq!(read_u16(&data, 3).unwrap(), 0x0106);
        assert!(matches!(read_u32(&data, 2), Err(ArchiveError::Truncated(2))));
    }
}
