//! Loading more than once into the same index

use crate::common::*;

#[test]
fn reload_is_idempotent() {
    let corpus = Corpus::new();
    corpus.text("words.txt", &["alpha", "beta", "gamma"]);
    let index = memory_index();

    let first = load(&index, &corpus, LoadOptions::default()).unwrap();
    let second = load(&index, &corpus, LoadOptions::default()).unwrap();

    assert_eq!(first.total_items_added, 3);
    assert_eq!(second.total_lines_loaded, 3);
    assert_eq!(second.total_items_added, 0);
    assert_eq!(QueryEngine::new(&index).count().unwrap(), 3);
}

#[test]
fn clear_first_replaces_contents() {
    let corpus = Corpus::new();
    corpus.text("words.txt", &["alpha"]);
    let index = memory_index();
    index.insert_many(&[lexset::encode("stale").unwrap()]).unwrap();

    let options = LoadOptions {
        clear_first: true,
        ..LoadOptions::default()
    };
    let report = load(&index, &corpus, options).unwrap();
    assert_eq!(report.total_items_added, 1);
    assert!(search(&index, "stale").is_empty());
    assert_eq!(search(&index, ""), vec!["alpha"]);
}

#[test]
fn failure_keeps_earlier_files() {
    let corpus = Corpus::new();
    corpus.text("a.txt", &["first"]);
    corpus.text("b.txt", &["second"]);
    let index = memory_index();
    // One ZADD per file with the default batch size
    index.store().fail_adds_after(1);

    let err = load(&index, &corpus, LoadOptions::default()).unwrap_err();
    assert_eq!(err.kind(), lexset::ErrorKind::StoreUnavailable);
    assert_eq!(search(&index, ""), vec!["first"]);
}

#[test]
fn batch_size_does_not_change_result() {
    let corpus = Corpus::new();
    let words: Vec<String> = (0..50).map(|i| format!("word{:02}", i % 40)).collect();
    let refs: Vec<&str> = words.iter().map(String::as_str).collect();
    corpus.text("words.txt", &refs);

    let mut counts = Vec::new();
    for batch_size in [0, 1, 7, 10_000] {
        let index = memory_index();
        let options = LoadOptions {
            batch_size,
            ..LoadOptions::default()
        };
        let report = load(&index, &corpus, options).unwrap();
        counts.push((report.total_lines_loaded, report.total_items_added));
    }
    assert!(counts.iter().all(|c| *c == (50, 40)));
}
