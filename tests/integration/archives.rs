//! Zip sources load exactly like their plain text contents

use crate::common::*;

#[test]
fn zip_equivalent_to_plain_text() {
    let lines = ["# header", "Zebra", "zed", "", "yak"];

    let plain = Corpus::new();
    plain.text("animals.txt", &lines);
    let plain_index = memory_index();
    let plain_report = load(&plain_index, &plain, LoadOptions::default()).unwrap();

    let zipped = Corpus::new();
    zipped.zip("animals.zip", "animals.txt", &lines);
    let zip_index = memory_index();
    let zip_report = load(&zip_index, &zipped, LoadOptions::default()).unwrap();

    assert_eq!(zip_report.total_lines_loaded, plain_report.total_lines_loaded);
    assert_eq!(zip_report.total_items_added, plain_report.total_items_added);
    assert_eq!(search(&zip_index, ""), search(&plain_index, ""));
    assert_eq!(search(&zip_index, "ze"), vec!["Zebra", "zed"]);
}

#[test]
fn scratch_dir_empty_after_load() {
    let corpus = Corpus::new();
    corpus.zip("one.zip", "one.txt", &["a"]);
    corpus.zip("two.zip", "nested/two.txt", &["b"]);
    corpus.text("three.txt", &["c"]);

    let index = memory_index();
    let report = load(&index, &corpus, LoadOptions::default()).unwrap();
    assert_eq!(report.files.len(), 3);
    assert_eq!(file_name(&report.files[0].path), "one.zip");
    assert!(corpus.scratch().is_dir());
    assert_eq!(corpus.scratch_entries(), 0);
}

#[test]
fn scratch_dir_empty_after_failed_load() {
    let corpus = Corpus::new();
    corpus.zip("big.zip", "big.txt", &["ok", &"x".repeat(64)]);

    let index = memory_index();
    let options = LoadOptions {
        limits: lexset::Limits::with_small_limits(),
        ..LoadOptions::default()
    };
    let err = load(&index, &corpus, options).unwrap_err();
    // Error names the archive as discovered, not the scratch copy
    assert!(err.to_string().contains("big.zip:2"));
    assert_eq!(corpus.scratch_entries(), 0);
}

#[test]
fn corrupt_archive_is_io_error() {
    let corpus = Corpus::new();
    std::fs::write(corpus.source().join("bad.zip"), b"garbage").unwrap();
    let index = memory_index();
    let err = load(&index, &corpus, LoadOptions::default()).unwrap_err();
    assert_eq!(err.exit_code(), 6);
}
