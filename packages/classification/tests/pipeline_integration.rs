//! End-to-end pipeline tests over temp files and mock collaborators.

use std::path::Path;
use std::time::Duration;

use classification::testing::{MockClassifier, MockSource};
use classification::{
    collect_lines, driver, Failure, Outcome, PipelineError, RetryPolicy, RunConfig, Taxonomy,
};

fn fast_config() -> RunConfig {
    RunConfig::new()
        .with_request_delay(Duration::ZERO)
        .with_policy(RetryPolicy::new().with_cooldown(Duration::ZERO))
}

fn read_rows(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .unwrap();
    reader
        .records()
        .map(|r| r.unwrap().iter().map(str::to_string).collect())
        .collect()
}

fn write_input(dir: &Path, contents: &str) -> std::path::PathBuf {
    let path = dir.join("corpus.txt");
    std::fs::write(&path, contents).unwrap();
    path
}

#[tokio::test]
async fn one_record_per_non_blank_line_in_input_order() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "안녕하세요\n\n나쁜말 예시\n");
    let output = dir.path().join("results.csv");

    let taxonomy = Taxonomy::korean_hate_speech();
    let classifier = MockClassifier::new()
        .with_outcome("안녕하세요", Outcome::Label("clean".into()))
        .with_outcome("나쁜말 예시", Outcome::Label("악플/욕설".into()));

    let summary = driver::run(&input, &output, &taxonomy, &classifier, &fast_config())
        .await
        .unwrap();

    assert_eq!(summary.lines_processed, 2);

    let rows = read_rows(&output);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], vec!["Original_Sentence", "Classified_Label"]);
    assert_eq!(rows[1], vec!["안녕하세요", "clean"]);
    assert_eq!(rows[2], vec!["나쁜말 예시", "악플/욕설"]);

    // The blank line never reached the classifier.
    assert_eq!(classifier.calls(), vec!["안녕하세요", "나쁜말 예시"]);
}

#[tokio::test]
async fn taxonomy_label_is_recorded_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "some sentence\n");
    let output = dir.path().join("results.csv");

    let taxonomy = Taxonomy::korean_hate_speech();
    let classifier =
        MockClassifier::new().with_outcome("some sentence", Outcome::Label("악플/욕설".into()));

    driver::run(&input, &output, &taxonomy, &classifier, &fast_config())
        .await
        .unwrap();

    assert_eq!(read_rows(&output)[1][1], "악플/욕설");
}

#[tokio::test]
async fn off_taxonomy_response_records_sentinel_with_raw_text() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "ambiguous sentence\n");
    let output = dir.path().join("results.csv");

    let taxonomy = Taxonomy::korean_hate_speech();
    let classifier = MockClassifier::new().with_outcome(
        "ambiguous sentence",
        Outcome::Failure(Failure::InvalidResponse {
            raw: "This sentence seems clean to me".into(),
        }),
    );

    driver::run(&input, &output, &taxonomy, &classifier, &fast_config())
        .await
        .unwrap();

    let label = &read_rows(&output)[1][1];
    assert_eq!(label, "응답_오류: This sentence seems clean to me");

    // Data-quality failures are terminal, never retried.
    assert_eq!(classifier.call_count(), 1);
}

#[tokio::test]
async fn rate_limit_then_success_records_the_label() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "borderline\n");
    let output = dir.path().join("results.csv");

    let taxonomy = Taxonomy::korean_hate_speech();
    let classifier = MockClassifier::new()
        .with_queued(Outcome::Failure(Failure::RateLimited))
        .with_queued(Outcome::Label("clean".into()));

    driver::run(&input, &output, &taxonomy, &classifier, &fast_config())
        .await
        .unwrap();

    assert_eq!(read_rows(&output)[1][1], "clean");
    assert_eq!(classifier.call_count(), 2);
}

#[tokio::test]
async fn rate_limit_twice_records_sentinel_without_looping() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "borderline\nnext line\n");
    let output = dir.path().join("results.csv");

    let taxonomy = Taxonomy::korean_hate_speech();
    let classifier = MockClassifier::new()
        .with_queued(Outcome::Failure(Failure::RateLimited))
        .with_queued(Outcome::Failure(Failure::RateLimited))
        .with_queued(Outcome::Label("clean".into()));

    driver::run(&input, &output, &taxonomy, &classifier, &fast_config())
        .await
        .unwrap();

    let rows = read_rows(&output);
    assert_eq!(rows[1], vec!["borderline", "Rate_Limit_Error"]);
    // The batch continued past the exhausted retry.
    assert_eq!(rows[2], vec!["next line", "clean"]);
    // Two attempts for line one, one for line two.
    assert_eq!(classifier.calls(), vec!["borderline", "borderline", "next line"]);
}

#[tokio::test]
async fn service_and_unknown_failures_record_their_sentinels() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "first\nsecond\n");
    let output = dir.path().join("results.csv");

    let taxonomy = Taxonomy::korean_hate_speech();
    let classifier = MockClassifier::new()
        .with_outcome(
            "first",
            Outcome::Failure(Failure::Service {
                message: "502 bad gateway".into(),
            }),
        )
        .with_outcome(
            "second",
            Outcome::Failure(Failure::Unknown {
                message: "connection reset".into(),
            }),
        );

    driver::run(&input, &output, &taxonomy, &classifier, &fast_config())
        .await
        .unwrap();

    let rows = read_rows(&output);
    assert_eq!(rows[1][1], "API_Error");
    assert_eq!(rows[2][1], "Unknown_Error");
}

#[tokio::test]
async fn missing_input_aborts_without_creating_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("does_not_exist.txt");
    let output = dir.path().join("results.csv");

    let taxonomy = Taxonomy::korean_hate_speech();
    let classifier = MockClassifier::new();

    let err = driver::run(&input, &output, &taxonomy, &classifier, &fast_config())
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::MissingInput { .. }));
    assert!(!output.exists());
    assert_eq!(classifier.call_count(), 0);
}

#[tokio::test]
async fn rerun_appends_a_second_full_set_of_records() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "one\ntwo\n");
    let output = dir.path().join("results.csv");

    let taxonomy = Taxonomy::korean_hate_speech();
    let classifier = MockClassifier::new();

    driver::run(&input, &output, &taxonomy, &classifier, &fast_config())
        .await
        .unwrap();
    driver::run(&input, &output, &taxonomy, &classifier, &fast_config())
        .await
        .unwrap();

    // No deduplication across restarts: one header, then both runs.
    let rows = read_rows(&output);
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0], vec!["Original_Sentence", "Classified_Label"]);
    assert_eq!(rows[1], rows[3]);
    assert_eq!(rows[2], rows[4]);
}

#[tokio::test]
async fn whitespace_only_lines_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path(), "  \n\t\nreal sentence\n   \n");
    let output = dir.path().join("results.csv");

    let taxonomy = Taxonomy::korean_hate_speech();
    let classifier = MockClassifier::new();

    let summary = driver::run(&input, &output, &taxonomy, &classifier, &fast_config())
        .await
        .unwrap();

    assert_eq!(summary.lines_processed, 1);
    let rows = read_rows(&output);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1][0], "real sentence");
}

#[tokio::test]
async fn collector_skips_native_and_failing_documents() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = dir.path().join("corpus.txt");

    let source = MockSource::new()
        .with_document("1", "a.txt", "line one\nline two\n")
        .with_native_document("2", "budget sheet")
        .with_failing_document("3", "broken.txt")
        .with_document("4", "b.txt", "line three\n");

    let summary = collect_lines(&source, &corpus).await.unwrap();

    assert_eq!(summary.documents_read, 2);
    assert_eq!(summary.documents_skipped, 2);
    assert_eq!(summary.lines_collected, 3);
    assert_eq!(
        std::fs::read_to_string(&corpus).unwrap(),
        "line one\nline two\nline three\n"
    );
}

#[tokio::test]
async fn collected_corpus_feeds_straight_into_the_driver() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = dir.path().join("corpus.txt");
    let output = dir.path().join("results.csv");

    let source = MockSource::new().with_document("1", "a.txt", "안녕하세요\n\n나쁜말 예시\n");
    collect_lines(&source, &corpus).await.unwrap();

    let taxonomy = Taxonomy::korean_hate_speech();
    let classifier = MockClassifier::new()
        .with_outcome("안녕하세요", Outcome::Label("clean".into()))
        .with_outcome("나쁜말 예시", Outcome::Label("악플/욕설".into()));

    let summary = driver::run(&corpus, &output, &taxonomy, &classifier, &fast_config())
        .await
        .unwrap();

    assert_eq!(summary.lines_processed, 2);
    assert_eq!(read_rows(&output).len(), 3);
}
