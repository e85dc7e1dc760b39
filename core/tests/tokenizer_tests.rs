use tome_core::{Analyzer, AnalyzerConfig, Stemming};

#[test]
fn it_normalizes_and_stems() {
    let analyzer = Analyzer::new(&AnalyzerConfig::default());
    let terms = analyzer.analyze("Running Runners RUN!");
    assert_eq!(terms, vec!["run", "runner", "run"]);
}

#[test]
fn it_filters_stopwords() {
    let analyzer = Analyzer::new(&AnalyzerConfig::default());
    let terms = analyzer.analyze("The quick brown fox and the lazy dog");
    assert!(!terms.contains(&"the".to_string()));
    assert!(!terms.contains(&"and".to_string()));
    assert!(terms.contains(&"quick".to_string()));
}

#[test]
fn punctuation_is_only_a_boundary() {
    let analyzer = Analyzer::new(&AnalyzerConfig::default());
    assert_eq!(
        analyzer.analyze("wealth... growth; (fortune)!"),
        vec!["wealth", "growth", "fortun"]
    );
}

#[test]
fn empty_input_yields_empty_sequence() {
    let analyzer = Analyzer::new(&AnalyzerConfig::default());
    assert!(analyzer.analyze("").is_empty());
    assert!(analyzer.analyze("  \t\n  ...").is_empty());
}

#[test]
fn compatibility_forms_are_folded() {
    let analyzer = Analyzer::new(&AnalyzerConfig::default());
    // U+FB01 LATIN SMALL LIGATURE FI and fullwidth letters decompose under NFKC
    assert_eq!(analyzer.analyze("ﬁre"), vec!["fire"]);
    assert_eq!(analyzer.analyze("Ｇｒｅａｔ"), vec!["great"]);
}

#[test]
fn numeric_tokens_survive() {
    let analyzer = Analyzer::new(&AnalyzerConfig::default());
    assert_eq!(analyzer.analyze("published 1851"), vec!["publish", "1851"]);
}

#[test]
fn renormalizing_normalized_text_is_idempotent() {
    let analyzer = Analyzer::new(&AnalyzerConfig::default());
    let terms = analyzer.analyze("great stories about wealth, voyages and whales");
    let rejoined = terms.join(" ");
    assert_eq!(analyzer.analyze(&rejoined), terms);
}

#[test]
fn custom_stopword_set_is_honored() {
    let mut config = AnalyzerConfig::default();
    config.stop_words.insert("whale".to_string());
    let analyzer = Analyzer::new(&config);
    assert_eq!(analyzer.analyze("the great whale"), vec!["great"]);
}

#[test]
fn stemming_variants_differ() {
    let english = Analyzer::new(&AnalyzerConfig::default());
    let off = Analyzer::new(&AnalyzerConfig {
        stemming: Stemming::Off,
        ..AnalyzerConfig::default()
    });
    assert_eq!(english.analyze("stories"), vec!["stori"]);
    assert_eq!(off.analyze("stories"), vec!["stories"]);
}
