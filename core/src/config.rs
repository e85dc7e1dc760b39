use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{EngineError, Result};
use crate::tokenizer;

/// Stemming variant applied by the analyzer.
///
/// Each variant is a fixed, deterministic snowball rule set; changing the
/// variant changes the index vocabulary, so an index must always be queried
/// with the configuration it was built with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stemming {
    Off,
    /// English (Porter2) rules.
    #[default]
    English,
    French,
    German,
    Spanish,
}

/// Configuration for the text analyzer.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Tokens discarded before stemming. Compared after lowercasing.
    pub stop_words: HashSet<String>,
    pub stemming: Stemming,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            stop_words: tokenizer::english_stopwords(),
            stemming: Stemming::default(),
        }
    }
}

/// Per-field multipliers applied to term counts at build time.
///
/// Unit weights make a posting's tf the raw occurrence count; a weight of
/// zero drops the field from the index entirely.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct FieldWeights {
    pub title: f32,
    pub author: f32,
    pub description: f32,
}

impl Default for FieldWeights {
    fn default() -> Self {
        Self {
            title: 1.0,
            author: 1.0,
            description: 1.0,
        }
    }
}

/// Dampening applied to term frequencies on both the document and query side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TfDampening {
    /// Use the weighted frequency as-is.
    Raw,
    /// `1 + ln(tf)`, with `ln(tf)` clamped at zero so weighted frequencies
    /// below one still contribute.
    #[default]
    Logarithmic,
}

/// Everything `build` and `rank` need beyond the documents themselves.
///
/// Constructed once by the host and threaded through both calls; the core
/// never reads ambient settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IndexConfig {
    pub analyzer: AnalyzerConfig,
    pub field_weights: FieldWeights,
    pub tf_dampening: TfDampening,
    /// Logarithm base of the idf term. Must be greater than 1.
    pub idf_base: f32,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            analyzer: AnalyzerConfig::default(),
            field_weights: FieldWeights::default(),
            tf_dampening: TfDampening::default(),
            idf_base: std::f32::consts::E,
        }
    }
}

impl IndexConfig {
    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("title", self.field_weights.title),
            ("author", self.field_weights.author),
            ("description", self.field_weights.description),
        ];
        for (field, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(EngineError::InvalidConfig(format!(
                    "{field} weight must be finite and non-negative, got {weight}"
                )));
            }
        }
        if !self.idf_base.is_finite() || self.idf_base <= 1.0 {
            return Err(EngineError::InvalidConfig(format!(
                "idf_base must be greater than 1, got {}",
                self.idf_base
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(IndexConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_negative_weight() {
        let mut config = IndexConfig::default();
        config.field_weights.author = -0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_degenerate_idf_base() {
        let mut config = IndexConfig::default();
        config.idf_base = 1.0;
        assert!(config.validate().is_err());
        config.idf_base = f32::NAN;
        assert!(config.validate().is_err());
    }
}
