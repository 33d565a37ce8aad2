use findex_core::{Analyzer, DocId, Document, Field, Hit, IndexStore, Indexer, QueryEngine};

fn text_doc(path: &str, contents: &str) -> Document {
    Document {
        path: path.to_string(),
        filename: path.to_string(),
        contents: contents.to_string(),
        ..Default::default()
    }
}

fn build(docs: &[Document]) -> IndexStore {
    let analyzer = Analyzer::new();
    let mut store = IndexStore::new();
    let mut indexer = Indexer::new(&mut store, &analyzer);
    for doc in docs {
        indexer.index_document(doc).unwrap();
    }
    store
}

fn search(store: &IndexStore, query: &str, top_k: usize) -> Vec<Hit> {
    let analyzer = Analyzer::new();
    QueryEngine::new(store, &analyzer)
        .search(query, &Field::DEFAULT_SEARCH, top_k)
        .unwrap()
}

fn ids(hits: &[Hit]) -> Vec<DocId> {
    hits.iter().map(|h| h.doc_id).collect()
}

#[test]
fn exact_match_ranks_above_partial_match() {
    let store = build(&[text_doc("a.txt", "the cat sat"), text_doc("b.txt", "the cat ran")]);
    let hits = search(&store, "cat sat", 10);
    assert_eq!(ids(&hits), vec![0, 1]);
}

#[test]
fn absent_term_returns_empty_not_error() {
    let store = build(&[text_doc("a.txt", "the cat sat")]);
    let hits = search(&store, "wombat", 10);
    assert!(hits.is_empty());
}

#[test]
fn repeated_searches_are_identical_including_tie_order() {
    // Identical documents score identically; ties resolve by ascending id.
    let docs: Vec<Document> =
        (0..4).map(|i| text_doc(&format!("{i}.txt"), "same words here")).collect();
    let store = build(&docs);
    let first = search(&store, "words", 10);
    assert_eq!(ids(&first), vec![0, 1, 2, 3]);
    for _ in 0..3 {
        assert_eq!(search(&store, "words", 10), first);
    }
}

#[test]
fn rebuilding_the_corpus_yields_identical_rankings() {
    let docs = [
        text_doc("a.txt", "glacier retreat in the alps"),
        text_doc("b.txt", "glacier mass balance"),
        text_doc("c.txt", "alpine meadows"),
    ];
    let one = build(&docs);
    let two = build(&docs);
    assert_eq!(search(&one, "glacier alps", 10), search(&two, "glacier alps", 10));
}

#[test]
fn unrelated_insertions_keep_relative_order() {
    let analyzer = Analyzer::new();
    let mut store = IndexStore::new();
    let mut indexer = Indexer::new(&mut store, &analyzer);
    indexer.index_document(&text_doc("a.txt", "alpha beta beta")).unwrap();
    indexer.index_document(&text_doc("b.txt", "alpha")).unwrap();
    let before = ids(&search(&store, "alpha", 10));

    // Adding a document without shared terms changes the per-field document
    // count, so idf (and raw scores) may shift for everyone. The document
    // frequency of "alpha" is unchanged, so the ordering must hold.
    let mut indexer = Indexer::new(&mut store, &analyzer);
    indexer.index_document(&text_doc("c.txt", "zebra")).unwrap();
    let after = ids(&search(&store, "alpha", 10));
    assert_eq!(before, after);
}

#[test]
fn verbatim_term_from_document_round_trips() {
    let store = build(&[text_doc("a.txt", "Glaciers are retreating worldwide")]);
    for query in ["glaciers", "Retreating", "WORLDWIDE"] {
        let hits = search(&store, query, 10);
        assert_eq!(ids(&hits), vec![0], "query {query:?}");
    }
}

#[test]
fn quoted_phrase_requires_relative_positions() {
    let store = build(&[
        text_doc("a.txt", "the cat sat on the mat"),
        text_doc("b.txt", "sat the cat on the mat"),
    ]);
    let hits = search(&store, "\"cat sat\"", 10);
    assert_eq!(ids(&hits), vec![0]);
}

#[test]
fn phrase_copied_verbatim_with_stopwords_matches() {
    let store = build(&[text_doc("a.txt", "the cat sat on the mat")]);
    let hits = search(&store, "\"the cat sat\"", 10);
    assert_eq!(ids(&hits), vec![0]);
}

#[test]
fn matches_in_several_fields_pool_into_one_hit() {
    let mut rich = text_doc("a.html", "rust systems");
    rich.title = "rust guide".to_string();
    let plain = text_doc("b.txt", "rust alone");
    let store = build(&[rich, plain]);

    let hits = search(&store, "rust", 10);
    assert_eq!(hits.len(), 2, "one pooled entry per document");
    assert_eq!(hits[0].doc_id, 0, "title match adds to the pooled score");
}

#[test]
fn field_qualifier_restricts_the_search() {
    let mut titled = text_doc("a.html", "nothing relevant");
    titled.title = "zephyr winds".to_string();
    let store = build(&[titled, text_doc("b.txt", "zephyr in contents")]);

    assert_eq!(ids(&search(&store, "title:zephyr", 10)), vec![0]);
    assert_eq!(ids(&search(&store, "contents:zephyr", 10)), vec![1]);
    let mut unqualified = ids(&search(&store, "zephyr", 10));
    unqualified.sort_unstable();
    assert_eq!(unqualified, vec![0, 1]);
}

#[test]
fn summary_field_is_searched_only_when_named() {
    let mut doc = text_doc("a.html", "body text");
    doc.summary = "orchid cultivation notes".to_string();
    let store = build(&[doc]);

    assert!(search(&store, "orchid", 10).is_empty());
    assert_eq!(ids(&search(&store, "summary:orchid", 10)), vec![0]);
}

#[test]
fn date_field_matches_its_tokens() {
    let mut doc = text_doc("a.html", "entry");
    doc.date = "2020-01-01".to_string();
    let store = build(&[doc, text_doc("b.txt", "undated")]);

    assert_eq!(ids(&search(&store, "date:2020", 10)), vec![0]);
    // Unqualified queries include the date field by default.
    assert_eq!(ids(&search(&store, "2020", 10)), vec![0]);
}

#[test]
fn querying_a_field_no_document_has_matches_nothing() {
    let store = build(&[text_doc("a.txt", "plain"), text_doc("b.txt", "text")]);
    assert!(search(&store, "date:2020", 10).is_empty());
    assert!(search(&store, "title:plain", 10).is_empty());
}

#[test]
fn all_stopword_query_matches_nothing() {
    let store = build(&[text_doc("a.txt", "the cat sat")]);
    assert!(search(&store, "the and of", 10).is_empty());
}

#[test]
fn top_k_truncates_the_ranking() {
    let docs: Vec<Document> =
        (0..5).map(|i| text_doc(&format!("{i}.txt"), "shared term")).collect();
    let store = build(&docs);
    assert_eq!(search(&store, "shared", 2).len(), 2);
    assert!(search(&store, "shared", 0).is_empty());
}

#[test]
fn concurrent_searches_share_the_frozen_store() {
    let store = build(&[text_doc("a.txt", "the cat sat"), text_doc("b.txt", "dogs bark")]);
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                let analyzer = Analyzer::new();
                let hits = QueryEngine::new(&store, &analyzer)
                    .search("cat", &Field::DEFAULT_SEARCH, 10)
                    .unwrap();
                assert_eq!(ids(&hits), vec![0]);
            });
        }
    });
}

#[test]
fn parse_failures_surface_as_errors_not_panics() {
    let store = build(&[text_doc("a.txt", "anything")]);
    let analyzer = Analyzer::new();
    let engine = QueryEngine::new(&store, &analyzer);
    for query in ["", "body:cat", "\"unterminated", "title:"] {
        assert!(
            engine.search(query, &Field::DEFAULT_SEARCH, 10).is_err(),
            "query {query:?} should fail to parse"
        );
    }
}
