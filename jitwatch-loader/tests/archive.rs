mod common;

use std::fs;

use common::{Method, write_zip, zip_bytes};
use jitwatch_loader::*;

#[test]
fn read_stored_and_deflated_entries() {
    let dir = tempfile::tempdir().unwrap();
    let zip = write_zip(
        &dir.path().join("src.zip"),
        &[
            ("pkg/", b"", Method::Stored),
            ("pkg/A.java", b"class A {}\n", Method::Stored),
            ("pkg/B.java", b"class B {\r\n}\r\n", Method::Deflated),
        ],
    );

    let archive = Archive::open(&zip).unwrap();
    assert_eq!(archive.len(), 3);
    assert_eq!(
        archive.names().collect::<Vec<_>>(),
        ["pkg/", "pkg/A.java", "pkg/B.java"]
    );
    assert!(archive.contains("pkg/A.java"));
    assert!(!archive.contains("pkg/"));
    assert_eq!(archive.read("pkg/B.java").unwrap().unwrap(), b"class B {\r\n}\r\n");
    assert_eq!(archive.read("pkg/C.java").unwrap(), None);

    assert_eq!(read_archive_entry(&zip, "pkg/A.java").as_deref(), Some("class A {}\n"));
    assert_eq!(read_archive_entry(&zip, "pkg/B.java").as_deref(), Some("class B {\n}\n"));
}

#[test]
fn entry_text_gets_trailing_newline() {
    let dir = tempfile::tempdir().unwrap();
    let zip = write_zip(
        &dir.path().join("a.jar"),
        &[("Main.kt", b"fun main() {\r    println(1)\r}", Method::Deflated)],
    );
    assert_eq!(
        read_archive_entry(&zip, "Main.kt").as_deref(),
        Some("fun main() {\n    println(1)\n}\n")
    );
}

#[test]
fn lookup_is_exact() {
    let dir = tempfile::tempdir().unwrap();
    let zip = write_zip(
        &dir.path().join("a.zip"),
        &[("pkg/Foo.java", b"x", Method::Stored)],
    );
    assert_eq!(read_archive_entry(&zip, "pkg/foo.java"), None);
    assert_eq!(read_archive_entry(&zip, "/pkg/Foo.java"), None);
    assert_eq!(read_archive_entry(&zip, "Foo.java"), None);
    assert_eq!(read_archive_entry(&zip, "pkg/Foo.java").as_deref(), Some("x\n"));
}

#[test]
fn empty_archive() {
    let dir = tempfile::tempdir().unwrap();
    let zip = write_zip(&dir.path().join("empty.zip"), &[]);
    let archive = Archive::open(&zip).unwrap();
    assert!(archive.is_empty());
    assert_eq!(read_archive_entry(&zip, "anything"), None);
}

#[test]
fn unreadable_archives_yield_none() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("missing.zip");
    assert_eq!(read_archive_entry(&missing, "a"), None);

    let garbage = dir.path().join("garbage.jar");
    fs::write(&garbage, vec![0x42u8; 300]).unwrap();
    assert!(matches!(
        Archive::open(&garbage),
        Err(ArchiveError::MissingEndOfCentralDirectory)
    ));
    assert_eq!(read_archive_entry(&garbage, "a"), None);

    let tiny = dir.path().join("tiny.zip");
    fs::write(&tiny, b"PK").unwrap();
    assert!(matches!(Archive::open(&tiny), Err(ArchiveError::TooSmall(2))));

    let empty = dir.path().join("zero.zip");
    fs::write(&empty, b"").unwrap();
    assert_eq!(read_archive_entry(&empty, "a"), None);
}

#[test]
fn corrupt_entry_fails_crc() {
    let dir = tempfile::tempdir().unwrap();
    let mut bytes = zip_bytes(&[("A.java", b"class A {}", Method::Stored)]);
    // Local header (30) + name (6): first byte of stored data.
    bytes[36] ^= 0x20;
    let path = dir.path().join("bad.zip");
    fs::write(&path, bytes).unwrap();

    let archive = Archive::open(&path).unwrap();
    assert!(matches!(
        archive.read("A.java"),
        Err(ArchiveError::CrcMismatch(name)) if name == "A.java"
    ));
    assert_eq!(read_archive_entry(&path, "A.java"), None);
}

#[test]
fn truncated_archive() {
    let dir = tempfile::tempdir().unwrap();
    let bytes = zip_bytes(&[("A.java", b"class A {}", Method::Deflated)]);
    // Drop the local header and data but keep the directory records.
    let cut = bytes.len() - 22 - 52;
    let path = dir.path().join("cut.zip");
    fs::write(&path, &bytes[cut..]).unwrap();
    assert!(Archive::open(&path).is_err());
    assert_eq!(read_archive_entry(&path, "A.java"), None);
}

/// Rewrite the central uncompressed size of the only entry in `bytes`.
fn patch_uncompressed_size(bytes: &mut [u8], name: &str, size: u32) {
    let central = bytes.len() - 22 - (46 + name.len());
    bytes[central + 24..central + 28].copy_from_slice(&size.to_le_bytes());
}

#[test]
fn recorded_size_bounds_inflation() {
    let dir = tempfile::tempdir().unwrap();
    let contents = "class A {}\n".repeat(64);

    let mut huge = zip_bytes(&[("A.java", contents.as_bytes(), Method::Deflated)]);
    patch_uncompressed_size(&mut huge, "A.java", u32::MAX);
    let path = dir.path().join("huge.zip");
    fs::write(&path, &huge).unwrap();
    assert!(matches!(
        Archive::open(&path).unwrap().read("A.java"),
        Err(ArchiveError::SizeMismatch(name)) if name == "A.java"
    ));
    assert_eq!(read_archive_entry(&path, "A.java"), None);

    let mut short = zip_bytes(&[("A.java", contents.as_bytes(), Method::Deflated)]);
    patch_uncompressed_size(&mut short, "A.java", 16);
    let path = dir.path().join("short.zip");
    fs::write(&path, &short).unwrap();
    assert!(matches!(
        Archive::open(&path).unwrap().read("A.java"),
        Err(ArchiveError::SizeMismatch(_))
    ));
    assert_eq!(read_archive_entry(&path, "A.java"), None);
}

#[test]
fn archive_rewritten_between_reads() {
    let dir = tempfile::tempdir().unwrap();
    let zip = write_zip(
        &dir.path().join("src.jar"),
        &[("A.java", b"class A {}", Method::Deflated)],
    );
    let archive = Archive::open(&zip).unwrap();
    fs::write(&zip, b"").unwrap();
    assert_eq!(archive.read("A.java").unwrap().unwrap(), b"class A {}");
    assert_eq!(read_archive_entry(&zip, "A.java"), None);
}

#[test]
fn non_utf8_entry_yields_none() {
    let dir = tempfile::tempdir().unwrap();
    let zip = write_zip(
        &dir.path().join("latin1.zip"),
        &[("A.java", b"// caf\xe9\n", Method::Stored)],
    );
    assert_eq!(read_archive_entry(&zip, "A.java"), None);
}

// --- manifest ---

#[test]
fn manifest_properties() {
    let dir = tempfile::tempdir().unwrap();
    let zip = write_zip(
        &dir.path().join("app.jar"),
        &[
            ("META-INF/", b"", Method::Stored),
            (
                MANIFEST_ENTRY,
                b"Manifest-Version: 1.0\r\nMain-Class: org.example.App\r\n\r\n",
                Method::Deflated,
            ),
        ],
    );
    let manifest = read_manifest(&zip);
    assert_eq!(manifest.len(), 2);
    assert_eq!(manifest.get("Manifest-Version"), Some("1.0"));
    assert_eq!(manifest.get("Main-Class"), Some("org.example.App"));
}

#[test]
fn missing_manifest_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let zip = write_zip(
        &dir.path().join("lib.jar"),
        &[("pkg/Foo.class", b"\xca\xfe\xba\xbe", Method::Stored)],
    );
    assert!(read_manifest(&zip).is_empty());
    assert!(read_manifest(dir.path().join("nope.jar")).is_empty());

    let garbage = dir.path().join("garbage.jar");
    fs::write(&garbage, [0u8; 64]).unwrap();
    assert!(read_manifest(&garbage).is_empty());
}
