use crate::document::{DocId, Field, StoredDoc};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One term occurrence record: which document, how often, and at which
/// word positions within the field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Posting {
    pub doc_id: DocId,
    pub tf: u32,
    pub positions: Vec<u32>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct FieldIndex {
    /// term -> postings sorted by doc_id
    postings: HashMap<String, Vec<Posting>>,
    /// token count per doc_id, for length normalization
    lengths: Vec<u32>,
    /// documents with at least one token in this field
    doc_count: u32,
}

/// In-memory inverted index over the tokenized fields, plus the stored
/// display fields. Append-only during a build pass; read-only afterwards,
/// so any number of searches may run against it concurrently.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct IndexStore {
    fields: [FieldIndex; 4],
    docs: Vec<StoredDoc>,
}

impl IndexStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a document's stored fields and hands out the next id.
    pub fn add_document(&mut self, doc: StoredDoc) -> DocId {
        let doc_id = self.docs.len() as DocId;
        self.docs.push(doc);
        doc_id
    }

    /// Appends to the postings list for (field, term). Documents arrive in
    /// increasing id order during a build, so anything else is a bug in the
    /// caller and fatal.
    pub fn add_posting(
        &mut self,
        field: Field,
        term: &str,
        doc_id: DocId,
        tf: u32,
        positions: Vec<u32>,
    ) -> Result<()> {
        let list = self.fields[field.slot()].postings.entry(term.to_string()).or_default();
        if let Some(last) = list.last() {
            if last.doc_id >= doc_id {
                return Err(Error::IndexConsistency(format!(
                    "postings for `{term}` in {field} out of document order: {} then {doc_id}",
                    last.doc_id
                )));
            }
        }
        list.push(Posting { doc_id, tf, positions });
        Ok(())
    }

    pub fn record_length(&mut self, field: Field, doc_id: DocId, len: u32) {
        let fi = &mut self.fields[field.slot()];
        let idx = doc_id as usize;
        if fi.lengths.len() <= idx {
            fi.lengths.resize(idx + 1, 0);
        }
        fi.lengths[idx] = len;
        if len > 0 {
            fi.doc_count += 1;
        }
    }

    /// Postings for (field, term), empty if the term was never seen.
    pub fn postings(&self, field: Field, term: &str) -> &[Posting] {
        self.fields[field.slot()]
            .postings
            .get(term)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn document_length(&self, doc_id: DocId, field: Field) -> u32 {
        self.fields[field.slot()].lengths.get(doc_id as usize).copied().unwrap_or(0)
    }

    /// Number of documents carrying at least one token in this field.
    pub fn document_count(&self, field: Field) -> u32 {
        self.fields[field.slot()].doc_count
    }

    pub fn document(&self, doc_id: DocId) -> Option<&StoredDoc> {
        self.docs.get(doc_id as usize)
    }

    pub fn num_docs(&self) -> u32 {
        self.docs.len() as u32
    }

    /// Distinct (field, term) entries, summed across fields.
    pub fn term_count(&self) -> usize {
        self.fields.iter().map(|f| f.postings.len()).sum()
    }
}
