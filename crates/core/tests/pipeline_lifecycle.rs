//! Pipeline lifecycle integration tests.
//!
//! These tests verify the conversion pipeline with mock prober, transcoder
//! and archiver:
//! - Chapter ordering and output naming
//! - Fail-fast semantics (earlier files kept, later chapters never attempted)
//! - Synthetic single-chapter passthrough
//! - Archiving only after every chapter succeeded

use std::path::PathBuf;

use tempfile::TempDir;

use chapterino_core::pipeline::{ConversionPipeline, ConversionRequest, PipelineError};
use chapterino_core::probe::ProbeError;
use chapterino_core::testing::{fixtures, MockArchiver, MockProber, MockTranscoder};
use chapterino_core::transcode::{OutputProfile, TranscodeError};
use chapterino_core::Chapter;

/// Test helper bundling the pipeline with handles to its mocks.
struct TestHarness {
    pipeline: ConversionPipeline<MockProber, MockTranscoder, MockArchiver>,
    prober: MockProber,
    transcoder: MockTranscoder,
    archiver: MockArchiver,
    temp_dir: TempDir,
}

impl TestHarness {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let prober = MockProber::new();
        let transcoder = MockTranscoder::new();
        let archiver = MockArchiver::new();

        let pipeline =
            ConversionPipeline::new(prober.clone(), transcoder.clone(), archiver.clone());

        Self {
            pipeline,
            prober,
            transcoder,
            archiver,
            temp_dir,
        }
    }

    fn request(&self) -> ConversionRequest {
        ConversionRequest {
            container: self.temp_dir.path().join("book.aax"),
            key: "1A2B3C4D".parse().unwrap(),
            output_dir: self.temp_dir.path().join("book_chapters_mp3"),
            profile: OutputProfile::default(),
        }
    }

    fn output_file(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join("book_chapters_mp3").join(name)
    }
}

#[tokio::test]
async fn test_convert_produces_one_file_per_chapter_in_order() {
    let harness = TestHarness::new();
    harness.prober.set_chapters(fixtures::chapters(4)).await;

    let files = harness.pipeline.convert(&harness.request()).await.unwrap();

    assert_eq!(files.len(), 4);
    let names: Vec<String> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "001_Chapter_1.mp3",
            "002_Chapter_2.mp3",
            "003_Chapter_3.mp3",
            "004_Chapter_4.mp3",
        ]
    );

    // Numeric prefixes equal index+1 and the list is already sorted
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);

    for file in &files {
        assert!(file.exists(), "{} missing", file.display());
    }
}

#[tokio::test]
async fn test_chapters_are_transcoded_strictly_in_index_order() {
    let harness = TestHarness::new();
    harness.prober.set_chapters(fixtures::chapters(5)).await;

    harness.pipeline.convert(&harness.request()).await.unwrap();

    let jobs = harness.transcoder.recorded_jobs().await;
    let indexes: Vec<usize> = jobs.iter().map(|r| r.job.chapter.index).collect();
    assert_eq!(indexes, vec![0, 1, 2, 3, 4]);
}

#[tokio::test]
async fn test_example_scenario_two_chapters() {
    let harness = TestHarness::new();
    harness
        .prober
        .set_chapters(vec![
            fixtures::chapter(0, 0.0, Some(120.0), "Intro"),
            fixtures::chapter(1, 120.0, None, "Part Two"),
        ])
        .await;

    let outcome = harness
        .pipeline
        .convert_and_archive(
            &harness.request(),
            &harness.temp_dir.path().join("book_chapters_mp3.zip"),
        )
        .await
        .unwrap();

    let names: Vec<String> = outcome
        .chapter_files
        .iter()
        .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["001_Intro.mp3", "002_Part_Two.mp3"]);
    assert_eq!(outcome.archive.member_count, 2);
}

#[tokio::test]
async fn test_single_synthetic_chapter_converts_whole_stream() {
    let harness = TestHarness::new();
    // MockProber defaults to the synthetic full-length chapter

    let files = harness.pipeline.convert(&harness.request()).await.unwrap();

    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with("001_Chapter_001.mp3"));

    let jobs = harness.transcoder.recorded_jobs().await;
    assert_eq!(jobs[0].job.chapter, Chapter::whole_stream());
}

#[tokio::test]
async fn test_failure_mid_run_keeps_earlier_files_and_skips_later_chapters() {
    let harness = TestHarness::new();
    harness.prober.set_chapters(fixtures::chapters(5)).await;
    harness.transcoder.set_fail_at_index(2).await;

    let err = harness
        .pipeline
        .convert(&harness.request())
        .await
        .unwrap_err();

    match err {
        PipelineError::Transcode(TranscodeError::ChapterFailed { chapter_index, .. }) => {
            assert_eq!(chapter_index, 2)
        }
        other => panic!("unexpected error: {other}"),
    }

    // Chapters 0 and 1 were written and stay on disk
    assert!(harness.output_file("001_Chapter_1.mp3").exists());
    assert!(harness.output_file("002_Chapter_2.mp3").exists());
    assert!(!harness.output_file("003_Chapter_3.mp3").exists());

    // Chapters 3 and 4 were never attempted
    let jobs = harness.transcoder.recorded_jobs().await;
    assert_eq!(jobs.len(), 3);
    assert!(!jobs.iter().any(|r| r.job.chapter.index > 2));
}

#[tokio::test]
async fn test_probe_failure_attempts_no_transcodes() {
    let harness = TestHarness::new();
    harness
        .prober
        .set_next_error(ProbeError::Failed {
            stderr: "Invalid activation bytes".to_string(),
        })
        .await;

    let err = harness
        .pipeline
        .convert(&harness.request())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Probe(ProbeError::Failed { .. })
    ));
    assert_eq!(harness.transcoder.transcode_count().await, 0);
}

#[tokio::test]
async fn test_archiver_runs_only_after_all_chapters_succeed() {
    let harness = TestHarness::new();
    harness.prober.set_chapters(fixtures::chapters(3)).await;
    harness.transcoder.set_fail_at_index(1).await;

    let archive_path = harness.temp_dir.path().join("book_chapters_mp3.zip");
    let result = harness
        .pipeline
        .convert_and_archive(&harness.request(), &archive_path)
        .await;

    assert!(result.is_err());
    assert_eq!(harness.archiver.archive_count().await, 0);
}

#[tokio::test]
async fn test_archiver_receives_output_directory_and_destination() {
    let harness = TestHarness::new();
    harness.prober.set_chapters(fixtures::chapters(2)).await;

    let archive_path = harness.temp_dir.path().join("book_chapters_mp3.zip");
    harness
        .pipeline
        .convert_and_archive(&harness.request(), &archive_path)
        .await
        .unwrap();

    let calls = harness.archiver.recorded_calls().await;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, harness.request().output_dir);
    assert_eq!(calls[0].1, archive_path);
}

#[tokio::test]
async fn test_key_and_container_are_forwarded_verbatim() {
    let harness = TestHarness::new();
    harness.prober.set_chapters(fixtures::chapters(1)).await;

    let request = harness.request();
    harness.pipeline.convert(&request).await.unwrap();

    assert_eq!(
        harness.prober.probed_containers().await,
        vec![request.container.clone()]
    );
    let jobs = harness.transcoder.recorded_jobs().await;
    assert_eq!(jobs[0].job.key.as_str(), "1A2B3C4D");
    assert_eq!(jobs[0].job.container, request.container);
}
