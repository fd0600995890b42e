//! Source lookup across directories and archives.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::archive::try_read_archive_entry;
use crate::error::{LoadError, Result};
use crate::language::Language;
use crate::settle;

/// Name of the top-level type that owns `fq_name`. Nested types (`Outer$Inner`)
/// live in their enclosing type's source file.
pub fn outer_type_name(fq_name: &str) -> &str {
    fq_name.split_once('$').map_or(fq_name, |(outer, _)| outer)
}

/// Relative source file name for a type, `/`-separated as in archives:
/// `java.util.Map` + `java` → `java/util/Map.java`.
pub fn source_file_name(type_name: &str, extension: &str) -> String {
    let extension = extension.strip_prefix('.').unwrap_or(extension);
    format!("{}.{extension}", type_name.replace('.', "/"))
}

/// Join a `/`-separated relative name onto `dir` using host separators.
fn directory_path(dir: &Path, file_name: &str) -> PathBuf {
    let mut path = dir.to_path_buf();
    path.extend(file_name.split('/').filter(|part| !part.is_empty()));
    path
}

pub(crate) fn try_read_file(path: &Path) -> Result<Option<String>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(LoadError::Io {
                path: path.to_owned(),
                source,
            });
        }
    };

    String::from_utf8(bytes)
        .map(Some)
        .map_err(|_| LoadError::InvalidUtf8 {
            path: path.to_owned(),
        })
}

/// Read a whole UTF-8 file.
///
/// Returns `None` if the file does not exist; read and decoding failures are
/// logged and also yield `None`.
pub fn read_file(path: impl AsRef<Path>) -> Option<String> {
    settle(try_read_file(path.as_ref()))
}

/// Read `file_name` (`/`-separated) below `dir`.
pub fn read_file_in_directory(dir: impl AsRef<Path>, file_name: &str) -> Option<String> {
    read_file(directory_path(dir.as_ref(), file_name))
}

fn probe(location: &Path, file_name: &str) -> Result<Option<String>> {
    let metadata = match fs::metadata(location) {
        Ok(metadata) => metadata,
        Err(e) => {
            if e.kind() == io::ErrorKind::NotFound {
                log::debug!("Skipping missing location {}", location.display());
            } else {
                log::warn!("Skipping unreadable location {}: {e}", location.display());
            }
            return Ok(None);
        }
    };

    if metadata.is_dir() {
        try_read_file(&directory_path(location, file_name))
    } else {
        try_read_archive_entry(location, file_name)
    }
}

/// Look for `file_name` in each location in turn: directories are searched
/// on disk, anything else is opened as an archive. The first hit wins.
pub fn source_for_file_name<P: AsRef<Path>>(file_name: &str, locations: &[P]) -> Option<String> {
    locations.iter().find_map(|location| {
        let location = location.as_ref();
        let found = settle(probe(location, file_name));
        if found.is_some() {
            log::debug!("Found {file_name} in {}", location.display());
        }
        found
    })
}

/// Finds the source text of a type.
///
/// Holds the ordered list of source file extensions to try. Every location
/// is searched for the first extension before the second is tried.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceResolver {
    extensions: Vec<String>,
}

impl SourceResolver {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let extensions = extensions
            .into_iter()
            .map(|ext| {
                let ext: String = ext.into();
                match ext.strip_prefix('.') {
                    Some(bare) => bare.to_owned(),
                    None => ext,
                }
            })
            .collect();
        Self { extensions }
    }

    pub fn for_languages(languages: &[Language]) -> Self {
        Self::new(languages.iter().map(|l| l.extension()))
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Source text of the fully qualified type `fq_name`, searched for in
    /// `locations` (directories or archives) in order.
    pub fn resolve<P: AsRef<Path>>(&self, fq_name: &str, locations: &[P]) -> Option<String> {
        let type_name = outer_type_name(fq_name);
        self.extensions.iter().find_map(|ext| {
            let file_name = source_file_name(type_name, ext);
            log::trace!("Looking for {file_name}");
            source_for_file_name(&file_name, locations)
        })
    }
}

impl Default for SourceResolver {
    /// All known languages.
    fn default() -> Self {
        Self::new(Language::known_extensions())
    }
}
