//! Load a directory of plain text files and search it

use crate::common::*;
use lexset::ErrorKind;

#[test]
fn search_after_load() {
    let corpus = Corpus::new();
    corpus.text(
        "fruit.txt",
        &["# fruit list", "", "Apple", "apple", "application", "banana"],
    );
    let index = memory_index();
    let report = load(&index, &corpus, LoadOptions::default()).unwrap();

    assert_eq!(report.total_lines_loaded, 4);
    assert_eq!(report.total_items_added, 4);
    assert_eq!(search(&index, "app"), vec!["Apple", "apple", "application"]);
    assert_eq!(search(&index, "APP"), search(&index, "app"));
    assert!(search(&index, "apples").is_empty());
}

#[test]
fn files_reported_in_path_order() {
    let corpus = Corpus::new();
    corpus.text("b.txt", &["bob"]);
    corpus.text("a.txt", &["alice", "Amy"]);
    std::fs::create_dir(corpus.source().join("skipped")).unwrap();

    let index = memory_index();
    let report = load(&index, &corpus, LoadOptions::default()).unwrap();
    let names: Vec<String> = report.files.iter().map(|f| file_name(&f.path)).collect();
    assert_eq!(names, vec!["a.txt", "b.txt"]);
    assert_eq!(report.files[0].lines_loaded, 2);
    assert_eq!(search(&index, "a"), vec!["alice", "Amy"]);
}

#[test]
fn duplicates_across_files_counted_once() {
    let corpus = Corpus::new();
    corpus.text("one.txt", &["kiwi", "lime"]);
    corpus.text("two.txt", &["kiwi", "mango"]);

    let index = memory_index();
    let report = load(&index, &corpus, LoadOptions::default()).unwrap();
    assert_eq!(report.total_lines_loaded, 4);
    assert_eq!(report.total_items_added, 3);
    assert_eq!(report.files[1].items_added, 1);
    assert_eq!(QueryEngine::new(&index).count().unwrap(), 3);
}

#[test]
fn separator_characters_round_trip() {
    let corpus = Corpus::new();
    corpus.text("odd.txt", &["key:value", "C:\\path", "plain"]);

    let index = memory_index();
    load(&index, &corpus, LoadOptions::default()).unwrap();
    assert_eq!(search(&index, "key:"), vec!["key:value"]);
    assert_eq!(search(&index, "c:\\"), vec!["C:\\path"]);
    assert_eq!(search(&index, "").len(), 3);
}

#[test]
fn empty_source_dir_loads_nothing() {
    let corpus = Corpus::new();
    let index = memory_index();
    let report = load(&index, &corpus, LoadOptions::default()).unwrap();
    assert!(report.files.is_empty());
    assert_eq!(QueryEngine::new(&index).count().unwrap(), 0);
}

mod edge_cases {
    use super::*;

    #[test]
    fn missing_source_dir_leaves_index_untouched() {
        let corpus = Corpus::new();
        let index = memory_index();
        index.insert_many(&[lexset::encode("keep").unwrap()]).unwrap();
        std::fs::remove_dir(corpus.source()).unwrap();

        let options = LoadOptions {
            clear_first: true,
            ..LoadOptions::default()
        };
        let err = load(&index, &corpus, options).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(search(&index, "keep"), vec!["keep"]);
    }

    #[test]
    fn store_down_aborts_load() {
        let corpus = Corpus::new();
        corpus.text("a.txt", &["x"]);
        let index = memory_index();
        index.store().set_available(false);
        let err = load(&index, &corpus, LoadOptions::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StoreUnavailable);
    }

    #[test]
    fn unicode_case_folding() {
        let corpus = Corpus::new();
        corpus.text("names.txt", &["Ólafur", "ólöf", "Oscar"]);
        let index = memory_index();
        load(&index, &corpus, LoadOptions::default()).unwrap();
        assert_eq!(search(&index, "ÓL"), vec!["Ólafur", "ólöf"]);
        assert_eq!(search(&index, "o"), vec!["Oscar"]);
    }
}
