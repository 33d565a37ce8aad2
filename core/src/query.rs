use crate::analyzer::{Analyzer, Token};
use crate::document::{DocId, Field};
use crate::error::{Error, Result};
use crate::index::{IndexStore, Posting};
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub doc_id: DocId,
    pub score: f32,
}

/// A parsed query clause: a bare term, a quoted phrase, or either one
/// restricted to a single field by a `field:` qualifier.
#[derive(Debug, PartialEq, Eq)]
struct Clause {
    field: Option<Field>,
    phrase: bool,
    text: String,
}

/// Read-only scorer over a finished [`IndexStore`]. Never mutates the
/// store; concurrent searches are safe without locking.
pub struct QueryEngine<'a> {
    store: &'a IndexStore,
    analyzer: &'a Analyzer,
}

impl<'a> QueryEngine<'a> {
    pub fn new(store: &'a IndexStore, analyzer: &'a Analyzer) -> Self {
        Self { store, analyzer }
    }

    /// Scores every document matching the query against `fields`, pooling
    /// per-field partial scores into one entry per document, and returns at
    /// most `top_k` hits in descending score order. Equal scores order by
    /// ascending document id.
    pub fn search(&self, query: &str, fields: &[Field], top_k: usize) -> Result<Vec<Hit>> {
        let clauses = parse_query(query)?;
        let mut scores: HashMap<DocId, f32> = HashMap::new();
        for clause in &clauses {
            let tokens = self.analyzer.analyze(&clause.text);
            if tokens.is_empty() {
                continue;
            }
            let single;
            let targets: &[Field] = match clause.field {
                Some(f) => {
                    single = [f];
                    &single
                }
                None => fields,
            };
            for &field in targets {
                if clause.phrase && tokens.len() > 1 {
                    self.score_phrase(field, &tokens, &mut scores);
                } else {
                    self.score_terms(field, &tokens, &mut scores);
                }
            }
        }
        Ok(select_top_k(scores, top_k))
    }

    /// Dampened tf, smoothed idf, classic 1/sqrt(len) length norm.
    fn weight(&self, field: Field, tf: u32, df: usize, doc_id: DocId) -> f32 {
        let n = self.store.document_count(field) as f32;
        let idf = (1.0 + n / df as f32).ln();
        let tf_w = 1.0 + (tf as f32).ln();
        let len = self.store.document_length(doc_id, field).max(1) as f32;
        tf_w * idf / len.sqrt()
    }

    fn score_terms(&self, field: Field, tokens: &[Token], scores: &mut HashMap<DocId, f32>) {
        for token in tokens {
            let postings = self.store.postings(field, &token.term);
            if postings.is_empty() {
                continue;
            }
            let df = postings.len();
            for posting in postings {
                *scores.entry(posting.doc_id).or_insert(0.0) +=
                    self.weight(field, posting.tf, df, posting.doc_id);
            }
        }
    }

    /// Documents must contain every phrase term at the phrase's relative
    /// positions. Stopwords removed by the analyzer left gaps, so a phrase
    /// quoted verbatim from a document keeps the offsets it had there.
    fn score_phrase(&self, field: Field, tokens: &[Token], scores: &mut HashMap<DocId, f32>) {
        let lists: Vec<&[Posting]> = tokens
            .iter()
            .map(|t| self.store.postings(field, &t.term))
            .collect();
        if lists.iter().any(|l| l.is_empty()) {
            return;
        }
        let base = tokens[0].position;
        let offsets: Vec<u32> = tokens.iter().map(|t| t.position - base).collect();

        for group in intersect(&lists) {
            if !phrase_occurs(&group, &offsets) {
                continue;
            }
            let doc_id = group[0].doc_id;
            for (i, posting) in group.iter().enumerate() {
                *scores.entry(doc_id).or_insert(0.0) +=
                    self.weight(field, posting.tf, lists[i].len(), doc_id);
            }
        }
    }
}

/// Linear merge over doc-id-sorted postings lists: yields the aligned
/// postings for every document present in all of them.
fn intersect<'p>(lists: &[&'p [Posting]]) -> Vec<Vec<&'p Posting>> {
    let mut groups = Vec::new();
    let mut cursors = vec![0usize; lists.len()];
    let mut candidate: DocId = 0;
    'scan: loop {
        let mut agreed = true;
        for (i, list) in lists.iter().enumerate() {
            while cursors[i] < list.len() && list[cursors[i]].doc_id < candidate {
                cursors[i] += 1;
            }
            match list.get(cursors[i]) {
                None => break 'scan,
                Some(p) if p.doc_id > candidate => {
                    candidate = p.doc_id;
                    agreed = false;
                }
                Some(_) => {}
            }
        }
        if agreed {
            groups.push(lists.iter().enumerate().map(|(i, list)| &list[cursors[i]]).collect());
            for cursor in cursors.iter_mut() {
                *cursor += 1;
            }
            candidate += 1;
        }
    }
    groups
}

fn phrase_occurs(group: &[&Posting], offsets: &[u32]) -> bool {
    group[0].positions.iter().any(|&start| {
        group
            .iter()
            .zip(offsets)
            .skip(1)
            .all(|(posting, &offset)| posting.positions.binary_search(&(start + offset)).is_ok())
    })
}

/// Bounded min-heap selection: the worst retained hit sits on top and is
/// evicted first. Ties at the cut keep the lower document id.
fn select_top_k(scores: HashMap<DocId, f32>, top_k: usize) -> Vec<Hit> {
    if top_k == 0 {
        return Vec::new();
    }
    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f32>, Reverse<DocId>)>> =
        BinaryHeap::with_capacity(top_k + 1);
    for (doc_id, score) in scores {
        heap.push(Reverse((OrderedFloat(score), Reverse(doc_id))));
        if heap.len() > top_k {
            heap.pop();
        }
    }
    let mut hits: Vec<Hit> = heap
        .into_iter()
        .map(|Reverse((score, Reverse(doc_id)))| Hit { doc_id, score: score.0 })
        .collect();
    hits.sort_unstable_by_key(|h| (Reverse(OrderedFloat(h.score)), h.doc_id));
    hits
}

fn parse_query(query: &str) -> Result<Vec<Clause>> {
    let mut rest = query.trim_start();
    let mut clauses = Vec::new();
    while !rest.is_empty() {
        let (clause, tail) = next_clause(rest)?;
        clauses.push(clause);
        rest = tail.trim_start();
    }
    if clauses.is_empty() {
        return Err(Error::query_parse("", "empty query"));
    }
    Ok(clauses)
}

fn next_clause(input: &str) -> Result<(Clause, &str)> {
    let mut field = None;
    let mut s = input;

    let word_end = s.find(|c: char| c.is_whitespace() || c == '"').unwrap_or(s.len());
    if let Some(colon) = s[..word_end].find(':') {
        let head = &s[..colon];
        match Field::parse(head) {
            Some(f) => {
                field = Some(f);
                s = &s[colon + 1..];
            }
            None => return Err(Error::query_parse(head, "unknown field")),
        }
    }

    if let Some(quoted) = s.strip_prefix('"') {
        match quoted.find('"') {
            Some(end) => {
                let clause = Clause { field, phrase: true, text: quoted[..end].to_string() };
                Ok((clause, &quoted[end + 1..]))
            }
            None => Err(Error::query_parse(s, "unbalanced quote")),
        }
    } else {
        let end = s.find(char::is_whitespace).unwrap_or(s.len());
        let word = &s[..end];
        if word.is_empty() {
            let token = &input[..input.len() - s.len()];
            return Err(Error::query_parse(token, "missing term after field qualifier"));
        }
        Ok((Clause { field, phrase: false, text: word.to_string() }, &s[end..]))
    }
}
