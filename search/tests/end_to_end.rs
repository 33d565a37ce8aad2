use findex_core::persist::{save_index, IndexPaths};
use findex_core::{Analyzer, IndexStore, Indexer};
use findex_crawler::collect_documents;
use findex_search::SearchApp;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn build_and_save(corpus: &Path, index: &Path) {
    let analyzer = Analyzer::new();
    let mut store = IndexStore::new();
    let mut indexer = Indexer::new(&mut store, &analyzer);
    indexer.index_corpus(collect_documents(corpus)).unwrap();
    save_index(&IndexPaths::new(index), &store).unwrap();
}

#[test]
fn corpus_to_ranked_results() {
    let corpus = tempdir().unwrap();
    fs::write(corpus.path().join("a.txt"), "the cat sat on the mat").unwrap();
    fs::write(corpus.path().join("b.txt"), "the cat ran across the yard").unwrap();
    fs::write(
        corpus.path().join("c.html"),
        concat!(
            "<html><head><title>Cats at Rest</title></head><body>",
            "<summary>Observations of sitting cats</summary>",
            "<time datetime=\"2021-05-04\">May</time>",
            "<p>Nothing to see here.</p></body></html>"
        ),
    )
    .unwrap();

    let index = tempdir().unwrap();
    build_and_save(corpus.path(), index.path());

    let app = SearchApp::open(index.path()).unwrap();
    assert_eq!(app.meta.num_docs, 3);

    let rows = app.query("cat sat", 10).unwrap();
    assert!(!rows.is_empty());
    assert_eq!(rows[0].rank, 1);
    assert!(rows[0].path.ends_with("a.txt"), "exact match first, got {}", rows[0].path);
    assert!(rows.iter().all(|r| r.score > 0.0));

    // Display fields come back from the stored side of the index.
    let html_row = rows.iter().find(|r| r.path.ends_with("c.html"));
    if let Some(row) = html_row {
        assert_eq!(row.title, "Cats at Rest");
        assert_eq!(row.summary, "Observations of sitting cats");
    }
}

#[test]
fn date_queries_hit_html_documents() {
    let corpus = tempdir().unwrap();
    fs::write(
        corpus.path().join("dated.html"),
        "<html><body><time datetime=\"2021-05-04\">May</time>entry</body></html>",
    )
    .unwrap();
    fs::write(corpus.path().join("plain.txt"), "no date here").unwrap();

    let index = tempdir().unwrap();
    build_and_save(corpus.path(), index.path());

    let app = SearchApp::open(index.path()).unwrap();
    let rows = app.query("date:2021", 10).unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].path.ends_with("dated.html"));
}

#[test]
fn parse_errors_are_reported_not_fatal() {
    let corpus = tempdir().unwrap();
    fs::write(corpus.path().join("a.txt"), "anything at all").unwrap();
    let index = tempdir().unwrap();
    build_and_save(corpus.path(), index.path());

    let app = SearchApp::open(index.path()).unwrap();
    let err = app.query("\"unterminated", 10).unwrap_err();
    assert!(matches!(err, findex_core::Error::QueryParse { .. }));

    // The app keeps serving queries afterwards.
    assert!(app.query("anything", 10).is_ok());
}
