//! Jar manifests, read with property-file syntax.

use std::path::Path;

use indexmap::IndexMap;

use crate::archive::try_read_archive_entry;

pub const MANIFEST_ENTRY: &str = "META-INF/MANIFEST.MF";

const WHITESPACE: [char; 3] = [' ', '\t', '\x0c'];

/// Ordered key/value pairs parsed from property-file text.
///
/// Later duplicates of a key replace the earlier value but keep its
/// position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Properties {
    entries: IndexMap<String, String>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse property-file text.
    ///
    /// - blank lines and lines starting with `#` or `!` are skipped
    /// - the key ends at the first unescaped `=`, `:` or whitespace
    /// - a line ending in an odd number of backslashes continues on the next
    /// - `\t`, `\n`, `\r`, `\f` and `\uXXXX` escapes are decoded; any other
    ///   escaped character stands for itself
    pub fn parse(text: &str) -> Self {
        let mut props = Self::new();
        for line in logical_lines(text) {
            let (key, value) = split_key_value(&line);
            props.insert(unescape(key), unescape(value));
        }
        props
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn logical_lines(text: &str) -> Vec<String> {
    let text = text.replace("\r\n", "\n");
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut continuing = false;

    for natural in text.split(['\n', '\r']) {
        let trimmed = natural.trim_start_matches(WHITESPACE);
        if !continuing && (trimmed.is_empty() || trimmed.starts_with(['#', '!'])) {
            continue;
        }

        let backslashes = trimmed.chars().rev().take_while(|&c| c == '\\').count();
        if backslashes % 2 == 1 {
            current.push_str(&trimmed[..trimmed.len() - 1]);
            continuing = true;
        } else {
            current.push_str(trimmed);
            lines.push(std::mem::take(&mut current));
            continuing = false;
        }
    }

    if continuing {
        lines.push(current);
    }
    lines
}

fn split_key_value(line: &str) -> (&str, &str) {
    let mut key_end = line.len();
    let mut explicit_separator = false;
    let mut escaped = false;

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = i;
                explicit_separator = true;
                break;
            }
            ' ' | '\t' | '\x0c' => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let mut value = &line[key_end..];
    if explicit_separator {
        value = &value[1..];
    }
    value = value.trim_start_matches(WHITESPACE);
    if !explicit_separator {
        if let Some(rest) = value.strip_prefix(['=', ':']) {
            value = rest.trim_start_matches(WHITESPACE);
        }
    }
    (key, value)
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let decoded = if hex.len() == 4 && hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                    u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32)
                } else {
                    None
                };
                match decoded {
                    Some(decoded) => out.push(decoded),
                    None => {
                        log::warn!("Malformed \\u escape: \\u{hex}");
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

/// Read `META-INF/MANIFEST.MF` from the archive at `path`.
///
/// An archive without a manifest, or one that cannot be read, yields empty
/// properties; read failures are logged.
pub fn read_manifest(path: impl AsRef<Path>) -> Properties {
    let path = path.as_ref();
    match try_read_archive_entry(path, MANIFEST_ENTRY) {
        Ok(Some(text)) => Properties::parse(&text),
        Ok(None) => Properties::new(),
        Err(e) => {
            log::error!("Couldn't read manifest from {}: {e}", path.display());
            Properties::new()
        }
    }
}
