use std::io::Read;

use flate2::read::DeflateDecoder;

use super::{ArchiveError, read_u16, read_u32};

pub const CENTRAL_SIGNATURE: u32 = 0x0201_4b50;
pub const LOCAL_SIGNATURE: u32 = 0x0403_4b50;

const METHOD_STORED: u16 = 0;
const METHOD_DEFLATED: u16 = 8;

const FLAG_ENCRYPTED: u16 = 1 << 0;

/// One central directory file header.
#[derive(Debug, Clone)]
pub struct CentralEntry {
    pub name: String,
    pub flags: u16,
    pub method: u16,
    pub crc32: u32,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
    pub local_header_offset: u32,
}

impl CentralEntry {
    /// Fixed part of a central directory header: 46 bytes
    pub const SIZE: usize = 46;

    /// Parse the header at `offset`; returns the entry and the offset of the
    /// next header.
    pub fn parse(data: &[u8], offset: usize) -> Result<(Self, usize), ArchiveError> {
        if offset + Self::SIZE > data.len() {
            return Err(ArchiveError::Truncated(offset));
        }
        if read_u32(data, offset)? != CENTRAL_SIGNATURE {
            return Err(ArchiveError::BadSignature(offset));
        }

        let name_len = read_u16(data, offset + 28)? as usize;
        let extra_len = read_u16(data, offset + 30)? as usize;
        let comment_len = read_u16(data, offset + 32)? as usize;

        let name_start = offset + Self::SIZE;
        let name_bytes = data
            .get(name_start..name_start + name_len)
            .ok_or(ArchiveError::Truncated(name_start))?;

        let entry = Self {
            name: String::from_utf8_lossy(name_bytes).into_owned(),
            flags: read_u16(data, offset + 8)?,
            method: read_u16(data, offset + 10)?,
            crc32: read_u32(data, offset + 16)?,
            compressed_size: read_u32(data, offset + 20)?,
            uncompressed_size: read_u32(data, offset + 24)?,
            local_header_offset: read_u32(data, offset + 42)?,
        };

        Ok((entry, name_start + name_len + extra_len + comment_len))
    }

    pub fn is_dir(&self) -> bool {
        self.name.ends_with('/')
    }

    /// Locate the entry's data through its local header.
    fn data_range(&self, data: &[u8]) -> Result<std::ops::Range<usize>, ArchiveError> {
        // Local header is 30 bytes; name and extra lengths may differ from
        // the central copy.
        let local = self.local_header_offset as usize;
        if local + 30 > data.len() {
            return Err(ArchiveError::Truncated(local));
        }
        if read_u32(data, local)? != LOCAL_SIGNATURE {
            return Err(ArchiveError::BadSignature(local));
        }
        let name_len = read_u16(data, local + 26)? as usize;
        let extra_len = read_u16(data, local + 28)? as usize;

        let start = local + 30 + name_len + extra_len;
        let end = start + self.compressed_size as usize;
        if end > data.len() {
            return Err(ArchiveError::Truncated(start));
        }
        Ok(start..end)
    }

    /// Decompress the entry and check its CRC.
    pub fn read(&self, data: &[u8]) -> Result<Vec<u8>, ArchiveError> {
        if self.flags & FLAG_ENCRYPTED != 0 {
            return Err(ArchiveError::Encrypted(self.name.clone()));
        }

        let raw = &data[self.data_range(data)?];
        let bytes = match self.method {
            METHOD_STORED => raw.to_vec(),
            METHOD_DEFLATED => {
                // Never inflate past one byte beyond the recorded size; a
                // longer stream then fails the size check below.
                let limit = u64::from(self.uncompressed_size) + 1;
                let mut out = Vec::new();
                DeflateDecoder::new(raw)
                    .take(limit)
                    .read_to_end(&mut out)
                    .map_err(|e| ArchiveError::Inflate(self.name.clone(), e.to_string()))?;
                out
            }
            other => {
                return Err(ArchiveError::UnsupportedCompression(
                    self.name.clone(),
                    other,
                ));
            }
        };

        if bytes.len() as u64 != u64::from(self.uncompressed_size) {
            return Err(ArchiveError::SizeMismatch(self.name.clone()));
        }
        let mut crc = flate2::Crc::new();
        crc.update(&bytes);
        if crc.sum() != self.crc32 {
            return Err(ArchiveError::CrcMismatch(self.name.clone()));
        }

        Ok(bytes)
    }
}
