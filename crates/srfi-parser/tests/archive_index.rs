//! Archive scanning against tarballs built in-test.

use flate2::Compression;
use flate2::write::GzEncoder;
use pretty_assertions::assert_eq;
use srfi_parser::{ArchiveError, ArchiveIndex};

fn tarball(entries: &[(&str, &str)], gzip: bool) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());
    for (path, body) in entries {
        let mut header = tar::Header::new_gnu();
        if path.ends_with('/') {
            header.set_entry_type(tar::EntryType::Directory);
            header.set_size(0);
        } else {
            header.set_size(body.len() as u64);
        }
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, path, body.as_bytes())
            .unwrap();
    }
    let tar = builder.into_inner().unwrap();
    if !gzip {
        return tar;
    }
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    std::io::Write::write_all(&mut encoder, &tar).unwrap();
    encoder.finish().unwrap()
}

const GUILE_PATTERN: &str = r"guile-.*?/module/srfi/srfi-(\d+)";

fn guile_layout() -> Vec<(&'static str, &'static str)> {
    vec![
        ("guile-2.2.4/README", "readme"),
        ("guile-2.2.4/module/srfi/srfi-1.scm", "(define-module (srfi srfi-1))"),
        ("guile-2.2.4/module/srfi/srfi-9/", ""),
        ("guile-2.2.4/module/srfi/srfi-9/gnu.scm", ""),
        ("guile-2.2.4/module/srfi/srfi-13.scm", ""),
        ("guile-2.2.4/module/srfi/srfi-4/gnu.scm", ""),
        ("guile-2.2.4/doc/srfi-99.texi", ""),
    ]
}

#[test]
fn numbers_are_sorted_and_deduplicated() {
    let index = ArchiveIndex::open(tarball(&guile_layout(), true)).unwrap();
    assert_eq!(index.entries_matching(GUILE_PATTERN).unwrap(), vec![1, 4, 9, 13]);
}

#[test]
fn plain_tar_is_accepted() {
    let index = ArchiveIndex::open(tarball(&guile_layout(), false)).unwrap();
    assert_eq!(index.paths().len(), 7);
    assert_eq!(index.paths()[0], "guile-2.2.4/README");
}

#[test]
fn pattern_is_anchored_at_path_start() {
    let index = ArchiveIndex::open(tarball(
        &[("vendor/guile-1.0/module/srfi/srfi-2.scm", "")],
        true,
    ))
    .unwrap();
    assert!(index.entries_matching(GUILE_PATTERN).unwrap().is_empty());
}

#[test]
fn no_match_is_empty_not_error() {
    let index = ArchiveIndex::open(tarball(&[("chibi-scheme-0.8/README", "")], true)).unwrap();
    assert_eq!(
        index
            .entries_matching(r"chibi-scheme-.*?/lib/srfi/(\d+)\.sld")
            .unwrap(),
        Vec::<u32>::new()
    );
}

#[test]
fn read_entry_returns_body() {
    let index = ArchiveIndex::open(tarball(&guile_layout(), true)).unwrap();
    assert_eq!(
        index.read_entry("guile-2.2.4/module/srfi/srfi-1.scm").unwrap(),
        b"(define-module (srfi srfi-1))".to_vec()
    );
    assert!(matches!(
        index.read_entry("guile-2.2.4/missing"),
        Err(ArchiveError::MissingEntry(_))
    ));
}

#[test]
fn invalid_pattern_is_reported() {
    let index = ArchiveIndex::open(tarball(&guile_layout(), true)).unwrap();
    assert!(matches!(
        index.entries_matching("srfi-(\\d+"),
        Err(ArchiveError::Pattern(_))
    ));
}

#[test]
fn corrupt_bytes_are_rejected() {
    let garbage = vec![0x5a; 2048];
    assert!(ArchiveIndex::open(garbage).is_err());

    let mut broken_gzip = vec![0x1f, 0x8b];
    broken_gzip.extend_from_slice(&[0xff; 64]);
    assert!(ArchiveIndex::open(broken_gzip).is_err());

    assert!(matches!(ArchiveIndex::open(Vec::new()), Err(ArchiveError::Empty)));
}
