//! Zip archiver integration tests.
//!
//! These run against the real `ZipArchiver` on temp directories:
//! - Member set matches the directory contents
//! - Re-archiving identical contents is byte-identical and never trips over
//!   the pre-existing archive
//! - Missing source directories are rejected

use std::path::Path;

use tempfile::TempDir;

use chapterino_core::archive::{ArchiveError, Archiver, ZipArchiver};

fn populate(dir: &Path, files: &[(&str, &str)]) {
    std::fs::create_dir_all(dir).unwrap();
    for (name, contents) in files {
        std::fs::write(dir.join(name), contents).unwrap();
    }
}

fn member_names(archive: &Path) -> Vec<String> {
    let file = std::fs::File::open(archive).unwrap();
    let zip = zip::ZipArchive::new(file).unwrap();
    zip.file_names().map(str::to_string).collect()
}

#[tokio::test]
async fn test_archive_contains_exactly_the_directory_files() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("book_chapters_mp3");
    populate(
        &source,
        &[
            ("001_Intro.mp3", "intro audio"),
            ("002_Part_Two.mp3", "part two audio"),
        ],
    );

    let archiver = ZipArchiver::new();
    let dest = temp.path().join("book_chapters_mp3.zip");
    let summary = archiver.archive(&source, &dest).await.unwrap();

    assert_eq!(summary.member_count, 2);
    assert_eq!(summary.archive_path, dest);
    assert!(dest.exists());

    let mut names = member_names(&dest);
    names.sort();
    assert_eq!(names, vec!["001_Intro.mp3", "002_Part_Two.mp3"]);
}

#[tokio::test]
async fn test_rearchiving_identical_contents_is_byte_identical() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("chapters");
    populate(
        &source,
        &[
            ("001_One.mp3", "one"),
            ("002_Two.mp3", "two"),
            ("003_Three.mp3", "three"),
        ],
    );

    let archiver = ZipArchiver::new();
    let dest = temp.path().join("chapters.zip");

    archiver.archive(&source, &dest).await.unwrap();
    let first = std::fs::read(&dest).unwrap();

    // Second run must replace, not append, and produce the same bytes
    archiver.archive(&source, &dest).await.unwrap();
    let second = std::fs::read(&dest).unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_archive_reflects_directory_changes() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("chapters");
    populate(&source, &[("001_One.mp3", "one")]);

    let archiver = ZipArchiver::new();
    let dest = temp.path().join("chapters.zip");
    archiver.archive(&source, &dest).await.unwrap();

    populate(&source, &[("002_Two.mp3", "two")]);
    let summary = archiver.archive(&source, &dest).await.unwrap();

    assert_eq!(summary.member_count, 2);
    let mut names = member_names(&dest);
    names.sort();
    assert_eq!(names, vec!["001_One.mp3", "002_Two.mp3"]);
}

#[tokio::test]
async fn test_missing_source_directory_is_rejected() {
    let temp = TempDir::new().unwrap();
    let archiver = ZipArchiver::new();

    let result = archiver
        .archive(&temp.path().join("nope"), &temp.path().join("out.zip"))
        .await;

    assert!(matches!(result, Err(ArchiveError::SourceInvalid { .. })));
}

#[tokio::test]
async fn test_empty_directory_archives_to_zero_members() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("empty");
    std::fs::create_dir_all(&source).unwrap();

    let archiver = ZipArchiver::new();
    let dest = temp.path().join("empty.zip");
    let summary = archiver.archive(&source, &dest).await.unwrap();

    assert_eq!(summary.member_count, 0);
    assert!(dest.exists());
}
