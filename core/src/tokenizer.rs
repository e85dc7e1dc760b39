use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

use crate::config::{AnalyzerConfig, Stemming};

lazy_static! {
    static ref TOKEN_RE: Regex =
        Regex::new(r"(?u)[\p{L}\p{N}][\p{L}\p{N}_']*").expect("valid regex");
}

static ENGLISH_STOPWORDS: &[&str] = &[
    "a","about","above","after","again","against","all","am","an","and","any","are","aren't","as","at",
    "be","because","been","before","being","below","between","both","but","by",
    "can","can't","cannot","could","couldn't",
    "did","didn't","do","does","doesn't","doing","don't","down","during",
    "each","few","for","from","further",
    "had","hadn't","has","hasn't","have","haven't","having","he","he'd","he'll","he's","her","here","here's","hers","herself","him","himself","his","how","how's",
    "i","i'd","i'll","i'm","i've","if","in","into","is","isn't","it","it's","its","itself",
    "let's","me","more","most","mustn't","my","myself",
    "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
    "same","she","she'd","she'll","she's","should","shouldn't","so","some","such",
    "than","that","that's","the","their","theirs","them","themselves","then","there","there's","these","they","they'd","they'll","they're","they've","this","those","through","to","too",
    "under","until","up","very",
    "was","wasn't","we","we'd","we'll","we're","we've","were","weren't","what","what's","when","when's","where","where's","which","while","who","who's","whom","why","why's","with","won't","would","wouldn't",
    "you","you'd","you'll","you're","you've","your","yours","yourself","yourselves"
];

/// The default English stop-word set.
pub fn english_stopwords() -> HashSet<String> {
    ENGLISH_STOPWORDS.iter().map(|w| (*w).to_string()).collect()
}

/// Turns raw text into index terms: NFKC normalization, lowercasing, token
/// extraction (punctuation acts only as a boundary), stop-word removal, and
/// stemming.
///
/// The same analyzer serves document fields and query strings; terms can
/// only match if both sides went through identical normalization.
pub struct Analyzer {
    stemmer: Option<Stemmer>,
    stopwords: HashSet<String>,
}

impl Analyzer {
    pub fn new(config: &AnalyzerConfig) -> Self {
        let stemmer = match config.stemming {
            Stemming::Off => None,
            Stemming::English => Some(Stemmer::create(Algorithm::English)),
            Stemming::French => Some(Stemmer::create(Algorithm::French)),
            Stemming::German => Some(Stemmer::create(Algorithm::German)),
            Stemming::Spanish => Some(Stemmer::create(Algorithm::Spanish)),
        };
        Self {
            stemmer,
            stopwords: config.stop_words.clone(),
        }
    }

    /// Pure function of (text, configuration); empty input yields an empty
    /// sequence.
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let normalized = text.nfkc().collect::<String>().to_lowercase();
        let mut terms = Vec::new();
        for mat in TOKEN_RE.find_iter(&normalized) {
            let token = mat.as_str();
            if self.stopwords.contains(token) {
                continue;
            }
            let term = match &self.stemmer {
                Some(stemmer) => stemmer.stem(token).to_string(),
                None => token.to_string(),
            };
            terms.push(term);
        }
        terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_analyze() {
        let analyzer = Analyzer::new(&AnalyzerConfig::default());
        let terms = analyzer.analyze("Running, runner's run!");
        assert!(terms.iter().any(|t| t == "run"));
    }

    #[test]
    fn stemming_off_keeps_surface_forms() {
        let config = AnalyzerConfig {
            stemming: Stemming::Off,
            ..AnalyzerConfig::default()
        };
        let analyzer = Analyzer::new(&config);
        assert_eq!(analyzer.analyze("running stories"), vec!["running", "stories"]);
    }
}
