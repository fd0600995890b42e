//! Locates the original source text of compiled types.
//!
//! Sources are searched for across an ordered list of locations (plain
//! directories, or jar/zip archives) and an ordered list of source file
//! extensions. Lookups never fail loudly: a missing or unreadable candidate
//! is logged and skipped, and callers only ever see the text or `None`.

pub mod archive;
pub mod error;
pub mod language;
pub mod manifest;
pub mod resolver;

pub use archive::{Archive, ArchiveError, normalize_newlines, read_archive_entry};
pub use error::{LoadError, Result};
pub use language::Language;
pub use manifest::{MANIFEST_ENTRY, Properties, read_manifest};
pub use resolver::{
    SourceResolver, outer_type_name, read_file, read_file_in_directory, source_file_name,
    source_for_file_name,
};

/// Collapse an internal lookup result to the public "text or absent" form,
/// logging the failure.
fn settle(result: Result<Option<String>>) -> Option<String> {
    result.unwrap_or_else(|e| {
        log::error!("{e}");
        None
    })
}
