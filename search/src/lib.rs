use anyhow::Result;
use findex_core::persist::{load_index, IndexPaths, MetaFile};
use findex_core::{Analyzer, Error, Field, IndexStore, QueryEngine};
use std::fmt;
use std::path::Path;

/// One line of the result listing, ready for display.
#[derive(Debug, Clone)]
pub struct HitRow {
    pub rank: usize,
    pub path: String,
    pub score: f32,
    pub last_modified: String,
    pub title: String,
    pub summary: String,
}

impl fmt::Display for HitRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}  score={:.4}", self.rank, self.path, self.score)?;
        if !self.last_modified.is_empty() {
            write!(f, "  [{}]", self.last_modified)?;
        }
        if !self.title.is_empty() {
            write!(f, "  {}", self.title)?;
        }
        if !self.summary.is_empty() {
            write!(f, "  ({})", self.summary)?;
        }
        Ok(())
    }
}

/// A loaded, read-only index plus the analyzer that built it. The store is
/// frozen after load, so one `SearchApp` can serve any number of queries.
pub struct SearchApp {
    store: IndexStore,
    analyzer: Analyzer,
    pub meta: MetaFile,
}

impl SearchApp {
    pub fn open(index_dir: impl AsRef<Path>) -> Result<Self> {
        let paths = IndexPaths::new(index_dir);
        let (store, meta) = load_index(&paths)?;
        tracing::info!(num_docs = meta.num_docs, created_at = %meta.created_at, "index loaded");
        Ok(Self { store, analyzer: Analyzer::new(), meta })
    }

    /// Runs a query against the default fields and resolves hits to their
    /// stored display fields. Query parse failures come back as
    /// [`Error::QueryParse`] for the caller to report and retry.
    pub fn query(&self, query: &str, top_k: usize) -> findex_core::Result<Vec<HitRow>> {
        let engine = QueryEngine::new(&self.store, &self.analyzer);
        let hits = engine.search(query, &Field::DEFAULT_SEARCH, top_k)?;

        let mut rows = Vec::with_capacity(hits.len());
        for (i, hit) in hits.into_iter().enumerate() {
            let doc = self.store.document(hit.doc_id).ok_or_else(|| {
                Error::IndexConsistency(format!("hit references unknown document {}", hit.doc_id))
            })?;
            rows.push(HitRow {
                rank: i + 1,
                path: doc.path.clone(),
                score: hit.score,
                last_modified: doc.last_modified.clone(),
                title: doc.title.clone(),
                summary: doc.summary.clone(),
            });
        }
        Ok(rows)
    }
}
