use super::{ArchiveError, read_u16, read_u32};

pub const SIGNATURE: u32 = 0x0605_4b50;

/// End of central directory record (at the tail of the archive).
#[derive(Debug, Clone)]
pub struct EndOfCentralDirectory {
    pub disk_number: u16,
    pub cd_disk: u16,
    pub entries_on_disk: u16,
    pub total_entries: u16,
    pub cd_size: u32,
    pub cd_offset: u32,
    pub comment_len: u16,
}

impl EndOfCentralDirectory {
    /// Fixed part: 4 + 2*4 + 4*2 + 2 = 22 bytes
    pub const SIZE: usize = 22;
    const MAX_COMMENT: usize = u16::MAX as usize;

    /// Scan backwards from the end of `data` for the record. The archive
    /// comment is variable length, so the record can start anywhere in the
    /// last `SIZE + 65535` bytes.
    pub fn find(data: &[u8]) -> Result<Self, ArchiveError> {
        if data.len() < Self::SIZE {
            return Err(ArchiveError::TooSmall(data.len()));
        }

        let last = data.len() - Self::SIZE;
        let first = last.saturating_sub(Self::MAX_COMMENT);
        for offset in (first..=last).rev() {
            if read_u32(data, offset)? != SIGNATURE {
                continue;
            }
            let record = Self::parse(data, offset)?;
            // A signature inside the comment would not line up with the end.
            if offset + Self::SIZE + record.comment_len as usize == data.len() {
                record.validate()?;
                return Ok(record);
            }
        }

        Err(ArchiveError::MissingEndOfCentralDirectory)
    }

    pub fn parse(data: &[u8], offset: usize) -> Result<Self, ArchiveError> {
        if offset + Self::SIZE > data.len() {
            return Err(ArchiveError::Truncated(offset));
        }

        Ok(Self {
            disk_number: read_u16(data, offset + 4)?,
            cd_disk: read_u16(data, offset + 6)?,
            entries_on_disk: read_u16(data, offset + 8)?,
            total_entries: read_u16(data, offset + 10)?,
            cd_size: read_u32(data, offset + 12)?,
            cd_offset: read_u32(data, offset + 16)?,
            comment_len: read_u16(data, offset + 20)?,
        })
    }

    fn validate(&self) -> Result<(), ArchiveError> {
        if self.total_entries == u16::MAX || self.cd_offset == u32::MAX {
            return Err(ArchiveError::Zip64Unsupported);
        }
        if self.disk_number != 0
            || self.cd_disk != 0
            || self.entries_on_disk != self.total_entries
        {
            return Err(ArchiveError::MultiDiskUnsupported);
        }
        Ok(())
    }
}
