use crate::analyzer::Analyzer;
use crate::document::{DocId, Document, Field, StoredDoc};
use crate::error::{Error, Result};
use crate::index::IndexStore;
use std::collections::HashMap;

/// Writes documents into an [`IndexStore`]. Holds the store mutably for the
/// duration of the build; once the indexer is dropped the store is
/// read-ready.
pub struct Indexer<'a> {
    store: &'a mut IndexStore,
    analyzer: &'a Analyzer,
}

impl<'a> Indexer<'a> {
    pub fn new(store: &'a mut IndexStore, analyzer: &'a Analyzer) -> Self {
        Self { store, analyzer }
    }

    /// Assigns the next document id, tokenizes every searchable field and
    /// appends the resulting postings. Absent fields are indexed as empty
    /// text: zero postings, length zero.
    pub fn index_document(&mut self, doc: &Document) -> Result<DocId> {
        let doc_id = self.store.add_document(StoredDoc::from(doc));
        for field in Field::TOKENIZED {
            let tokens = self.analyzer.analyze(doc.field_text(field));
            self.store.record_length(field, doc_id, tokens.len() as u32);

            let mut terms: HashMap<String, (u32, Vec<u32>)> = HashMap::new();
            for token in tokens {
                let entry = terms.entry(token.term).or_default();
                entry.0 += 1;
                entry.1.push(token.position);
            }
            for (term, (tf, positions)) in terms {
                self.store.add_posting(field, &term, doc_id, tf, positions)?;
            }
        }
        Ok(doc_id)
    }

    /// Drains the collector's document stream. A document that failed to
    /// read is logged and skipped; a consistency violation aborts the build.
    pub fn index_corpus<I>(&mut self, docs: I) -> Result<u32>
    where
        I: IntoIterator<Item = Result<Document>>,
    {
        let mut indexed = 0u32;
        for doc in docs {
            match doc {
                Ok(doc) => {
                    let doc_id = self.index_document(&doc)?;
                    tracing::debug!(doc_id, path = %doc.path, "indexed document");
                    indexed += 1;
                }
                Err(err @ Error::DocumentRead { .. }) => {
                    tracing::warn!(%err, "skipping document");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(indexed)
    }
}
