use serde::Serialize;
use std::collections::HashMap;

use crate::config::{IndexConfig, TfDampening};
use crate::index::{DocId, InvertedIndex, TermId};
use crate::tokenizer::Analyzer;

/// One ranked result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub score: f32,
}

fn tf_weight(tf: f32, dampening: TfDampening) -> f32 {
    match dampening {
        TfDampening::Raw => tf,
        TfDampening::Logarithmic => 1.0 + tf.ln().max(0.0),
    }
}

/// Rank documents against `query`, highest score first.
///
/// For every distinct query term present in the index, each of the term's
/// postings contributes `tf_weight(tf) * idf * tf_weight(query_tf)` to its
/// document's score. Terms absent from the index are skipped, as are terms
/// occurring in every document (their idf is zero, so they cannot separate
/// candidates and would only produce zero-score entries). Ties are broken
/// by ascending doc id, making the order total and deterministic.
///
/// An empty normalized query yields an empty result. Purely a read over the
/// snapshot; any number of rankings may run concurrently.
pub fn rank(
    index: &InvertedIndex,
    analyzer: &Analyzer,
    config: &IndexConfig,
    query: &str,
    top_k: Option<usize>,
) -> Vec<SearchHit> {
    let terms = analyzer.analyze(query);
    if terms.is_empty() || index.total_docs() == 0 {
        return Vec::new();
    }

    // Query-side term frequencies, restricted to dictionary hits.
    let mut query_tf: HashMap<TermId, u32> = HashMap::new();
    for term in terms {
        if let Some(tid) = index.term_id(&term) {
            *query_tf.entry(tid).or_insert(0) += 1;
        }
    }

    let n = index.total_docs() as f32;
    let base_ln = config.idf_base.ln();
    let mut scores: HashMap<DocId, f64> = HashMap::new();
    for (tid, qtf) in query_tf {
        let idf = (n / index.df_of(tid) as f32).ln() / base_ln;
        if idf <= 0.0 {
            continue;
        }
        let query_weight = tf_weight(qtf as f32, config.tf_dampening);
        for posting in index.postings_of(tid) {
            let contribution = tf_weight(posting.tf, config.tf_dampening) * idf * query_weight;
            *scores.entry(posting.doc_id).or_insert(0.0) += f64::from(contribution);
        }
    }

    let mut hits: Vec<SearchHit> = scores
        .into_iter()
        .map(|(doc_id, score)| SearchHit {
            doc_id,
            score: score as f32,
        })
        .collect();
    hits.sort_by(|a, b| b.score.total_cmp(&a.score).then(a.doc_id.cmp(&b.doc_id)));
    if let Some(k) = top_k {
        hits.truncate(k);
    }
    hits
}
