use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::config::{FieldWeights, IndexConfig};
use crate::error::{InvalidDocument, Result};
use crate::tokenizer::Analyzer;

pub type DocId = u32;
pub type TermId = u32;

/// A catalog record as supplied by the host.
///
/// Identity is the id: two records may share text but never an id. A record
/// that arrives without one carries `id: None` and is rejected at build time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: Option<DocId>,
    pub title: String,
    pub author: String,
    pub description: String,
}

impl Document {
    pub fn new(
        id: DocId,
        title: impl Into<String>,
        author: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id),
            title: title.into(),
            author: author.into(),
            description: description.into(),
        }
    }
}

/// One entry in a postings list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    pub doc_id: DocId,
    /// Field-weighted occurrence count of the term in this document; the raw
    /// count under unit weights.
    pub tf: f32,
}

/// Immutable index snapshot produced by [`build`].
///
/// Postings lists are sorted by doc id with at most one entry per document,
/// and the document frequency of a term is always its postings-list length.
/// A rebuild produces a new instance; nothing here mutates after build, so
/// any number of concurrent readers can share a snapshot without locking.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct InvertedIndex {
    dictionary: HashMap<String, TermId>,
    df: Vec<u32>,
    postings: HashMap<TermId, Vec<Posting>>,
    doc_lengths: HashMap<DocId, u32>,
}

impl InvertedIndex {
    /// Number of documents the index was built over, including documents
    /// whose normalized text was empty.
    pub fn total_docs(&self) -> u32 {
        self.doc_lengths.len() as u32
    }

    /// Number of distinct terms.
    pub fn term_count(&self) -> usize {
        self.dictionary.len()
    }

    /// Number of documents containing `term`; zero if the term is absent.
    pub fn document_frequency(&self, term: &str) -> u32 {
        self.term_id(term).map_or(0, |tid| self.df_of(tid))
    }

    /// Postings list for `term`, sorted by doc id.
    pub fn postings(&self, term: &str) -> Option<&[Posting]> {
        self.term_id(term).map(|tid| self.postings_of(tid))
    }

    /// Total normalized-term count of a document, `None` if the document was
    /// not part of the build.
    pub fn document_length(&self, doc_id: DocId) -> Option<u32> {
        self.doc_lengths.get(&doc_id).copied()
    }

    pub fn contains_document(&self, doc_id: DocId) -> bool {
        self.doc_lengths.contains_key(&doc_id)
    }

    /// All indexed terms, in no particular order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.dictionary.keys().map(String::as_str)
    }

    pub(crate) fn term_id(&self, term: &str) -> Option<TermId> {
        self.dictionary.get(term).copied()
    }

    pub(crate) fn df_of(&self, tid: TermId) -> u32 {
        self.df[tid as usize]
    }

    pub(crate) fn postings_of(&self, tid: TermId) -> &[Posting] {
        self.postings.get(&tid).map_or(&[], Vec::as_slice)
    }

    fn intern(&mut self, term: String) -> TermId {
        match self.dictionary.get(&term) {
            Some(&tid) => tid,
            None => {
                let tid = self.df.len() as TermId;
                self.dictionary.insert(term, tid);
                self.df.push(0);
                tid
            }
        }
    }
}

/// A record rejected during a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedDocument {
    /// Zero-based position of the record in the input stream.
    pub ordinal: usize,
    pub reason: InvalidDocument,
}

/// Outcome of a build: the finished index plus every rejected record,
/// aggregated so the caller can decide once whether to proceed.
#[derive(Debug)]
pub struct BuildReport {
    pub index: InvertedIndex,
    pub skipped: Vec<SkippedDocument>,
}

/// Term statistics of a single document, computed independently of every
/// other document. Keeping this step self-contained leaves the merge below
/// as the only ordering-sensitive part of a build.
struct DocCounts {
    doc_id: DocId,
    length: u32,
    tf: HashMap<String, f32>,
}

fn count_document(
    analyzer: &Analyzer,
    weights: &FieldWeights,
    doc_id: DocId,
    doc: &Document,
) -> DocCounts {
    let fields = [
        (&doc.title, weights.title),
        (&doc.author, weights.author),
        (&doc.description, weights.description),
    ];
    let mut tf: HashMap<String, f32> = HashMap::new();
    let mut length = 0u32;
    for (text, weight) in fields {
        for term in analyzer.analyze(text) {
            length += 1;
            *tf.entry(term).or_insert(0.0) += weight;
        }
    }
    DocCounts { doc_id, length, tf }
}

/// Build an index over `documents`.
///
/// Records with a missing or already-seen id are skipped and reported; the
/// first record with a given id wins, which keeps the surviving data
/// independent of how later duplicates are interleaved. A document whose
/// normalized text is empty contributes no postings but still counts toward
/// the document total with length zero.
///
/// Building twice over the same input and configuration yields identical
/// postings, frequencies and lengths. The only fatal error is an invalid
/// configuration.
pub fn build<I>(documents: I, config: &IndexConfig) -> Result<BuildReport>
where
    I: IntoIterator<Item = Document>,
{
    config.validate()?;
    let analyzer = Analyzer::new(&config.analyzer);

    let mut seen: HashSet<DocId> = HashSet::new();
    let mut skipped: Vec<SkippedDocument> = Vec::new();
    let mut counted: Vec<DocCounts> = Vec::new();

    for (ordinal, doc) in documents.into_iter().enumerate() {
        let reason = match doc.id {
            None => InvalidDocument::MissingId,
            Some(id) if !seen.insert(id) => InvalidDocument::DuplicateId(id),
            Some(id) => {
                counted.push(count_document(&analyzer, &config.field_weights, id, &doc));
                continue;
            }
        };
        skipped.push(SkippedDocument { ordinal, reason });
    }

    let mut index = InvertedIndex::default();
    for counts in counted {
        index.doc_lengths.insert(counts.doc_id, counts.length);
        for (term, tf) in counts.tf {
            if tf <= 0.0 {
                // zero-weighted field: term occurs but is not indexed
                continue;
            }
            let tid = index.intern(term);
            index.df[tid as usize] += 1;
            index.postings.entry(tid).or_default().push(Posting {
                doc_id: counts.doc_id,
                tf,
            });
        }
    }
    for plist in index.postings.values_mut() {
        plist.sort_by_key(|p| p.doc_id);
    }

    tracing::debug!(
        num_docs = index.total_docs(),
        num_terms = index.term_count(),
        skipped = skipped.len(),
        "index built"
    );
    Ok(BuildReport { index, skipped })
}
